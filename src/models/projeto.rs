// src/models/projeto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;
use crate::models::{apply, apply_nullable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusProjeto {
    #[default]
    #[serde(rename = "Em Elaboração")]
    EmElaboracao,
    #[serde(rename = "Em Análise")]
    EmAnalise,
    Aprovado,
    Reprovado,
    Contratado,
    Cancelado,
}

impl StatusProjeto {
    /// O mesmo texto gravado no atributo `status` e embutido no índice.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusProjeto::EmElaboracao => "Em Elaboração",
            StatusProjeto::EmAnalise => "Em Análise",
            StatusProjeto::Aprovado => "Aprovado",
            StatusProjeto::Reprovado => "Reprovado",
            StatusProjeto::Contratado => "Contratado",
            StatusProjeto::Cancelado => "Cancelado",
        }
    }
}

/// Projeto de crédito rural (a proposta levada à instituição financeira).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projeto {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub propriedade_id: Option<Uuid>,
    pub titulo: String,
    /// Ex.: "Pronaf Custeio", "Pronamp Investimento", "Moderfrota".
    pub linha_credito: String,
    pub valor_solicitado: Option<Decimal>,
    pub status: StatusProjeto,
    pub instituicao_financeira: Option<String>,
    pub descricao: Option<String>,
    /// Documentos vinculados. Mantido pelo vínculo best-effort dos documentos.
    #[serde(default)]
    pub documento_ids: Vec<Uuid>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjeto {
    pub cliente_id: Uuid,
    pub propriedade_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub titulo: String,
    #[validate(length(min = 1, message = "required"))]
    pub linha_credito: String,
    pub valor_solicitado: Option<Decimal>,
    pub status: Option<StatusProjeto>,
    pub instituicao_financeira: Option<String>,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjeto {
    pub cliente_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    pub propriedade_id: Option<Option<Uuid>>,
    #[validate(length(min = 1, message = "required"))]
    pub titulo: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub linha_credito: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub valor_solicitado: Option<Option<Decimal>>,
    pub status: Option<StatusProjeto>,
    #[serde(default, deserialize_with = "double_option")]
    pub instituicao_financeira: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub descricao: Option<Option<String>>,
}

impl Projeto {
    pub fn new(id: Uuid, input: CreateProjeto, agora: DateTime<Utc>) -> Self {
        Self {
            id,
            cliente_id: input.cliente_id,
            propriedade_id: input.propriedade_id,
            titulo: input.titulo,
            linha_credito: input.linha_credito,
            valor_solicitado: input.valor_solicitado,
            status: input.status.unwrap_or_default(),
            instituicao_financeira: input.instituicao_financeira,
            descricao: input.descricao,
            documento_ids: Vec::new(),
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdateProjeto) {
        apply(&mut self.cliente_id, changes.cliente_id);
        apply_nullable(&mut self.propriedade_id, changes.propriedade_id);
        apply(&mut self.titulo, changes.titulo);
        apply(&mut self.linha_credito, changes.linha_credito);
        apply_nullable(&mut self.valor_solicitado, changes.valor_solicitado);
        apply(&mut self.status, changes.status);
        apply_nullable(&mut self.instituicao_financeira, changes.instituicao_financeira);
        apply_nullable(&mut self.descricao, changes.descricao);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_uses_the_display_text_on_the_wire() {
        assert_eq!(serde_json::to_value(StatusProjeto::EmAnalise).unwrap(), json!("Em Análise"));
        let status: StatusProjeto = serde_json::from_value(json!("Em Elaboração")).unwrap();
        assert_eq!(status, StatusProjeto::EmElaboracao);
        assert_eq!(StatusProjeto::Contratado.as_str(), "Contratado");
    }
}
