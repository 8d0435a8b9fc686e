pub mod cliente;
pub mod documento;
pub mod kanban;
pub mod oportunidade;
pub mod projeto;
pub mod propriedade;
pub mod simulacao;

/// Aplica uma mudança tri-state sobre um atributo opcional.
pub(crate) fn apply_nullable<T>(target: &mut Option<T>, change: Option<Option<T>>) {
    if let Some(value) = change {
        *target = value;
    }
}

/// Aplica uma mudança simples (ausente = mantém).
pub(crate) fn apply<T>(target: &mut T, change: Option<T>) {
    if let Some(value) = change {
        *target = value;
    }
}
