// src/db/error.rs

use thiserror::Error;

use super::keys::{KeyError, ORDEM_MAX};
use super::store::StoreError;
use crate::models::simulacao::SimulacaoError;

/// Erro de um repositório. A mensagem sempre identifica a operação e a
/// entidade ("Erro ao atualizar projeto: ...").
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Erro ao {operacao} {entidade}: {source}")]
    Store {
        entidade: &'static str,
        operacao: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Erro ao {operacao} {entidade}: item corrompido ({source})")]
    Corrupted {
        entidade: &'static str,
        operacao: &'static str,
        #[source]
        source: KeyError,
    },

    #[error("A ordem {0} excede o limite de {ORDEM_MAX}")]
    OrdemForaDoLimite(u32),

    #[error("Simulação inválida: {0}")]
    Simulacao(#[from] SimulacaoError),
}
