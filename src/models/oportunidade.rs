// src/models/oportunidade.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;
use crate::models::{apply, apply_nullable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusOportunidade {
    #[default]
    #[serde(rename = "Prospecção")]
    Prospeccao,
    #[serde(rename = "Qualificação")]
    Qualificacao,
    Proposta,
    #[serde(rename = "Negociação")]
    Negociacao,
    Ganha,
    Perdida,
}

impl StatusOportunidade {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusOportunidade::Prospeccao => "Prospecção",
            StatusOportunidade::Qualificacao => "Qualificação",
            StatusOportunidade::Proposta => "Proposta",
            StatusOportunidade::Negociacao => "Negociação",
            StatusOportunidade::Ganha => "Ganha",
            StatusOportunidade::Perdida => "Perdida",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Oportunidade {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub titulo: String,
    pub status: StatusOportunidade,
    pub valor_estimado: Option<Decimal>,
    pub linha_credito: Option<String>,
    /// Chance de fechamento, em %.
    pub probabilidade: Option<u8>,
    pub data_prevista_fechamento: Option<NaiveDate>,
    pub observacoes: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOportunidade {
    pub cliente_id: Uuid,
    #[validate(length(min = 1, message = "required"))]
    pub titulo: String,
    pub status: Option<StatusOportunidade>,
    pub valor_estimado: Option<Decimal>,
    pub linha_credito: Option<String>,
    #[validate(range(max = 100, message = "A probabilidade vai de 0 a 100"))]
    pub probabilidade: Option<u8>,
    pub data_prevista_fechamento: Option<NaiveDate>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOportunidade {
    pub cliente_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub titulo: Option<String>,
    pub status: Option<StatusOportunidade>,
    #[serde(default, deserialize_with = "double_option")]
    pub valor_estimado: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub linha_credito: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub probabilidade: Option<Option<u8>>,
    #[serde(default, deserialize_with = "double_option")]
    pub data_prevista_fechamento: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
}

impl Oportunidade {
    pub fn new(id: Uuid, input: CreateOportunidade, agora: DateTime<Utc>) -> Self {
        Self {
            id,
            cliente_id: input.cliente_id,
            titulo: input.titulo,
            status: input.status.unwrap_or_default(),
            valor_estimado: input.valor_estimado,
            linha_credito: input.linha_credito,
            probabilidade: input.probabilidade,
            data_prevista_fechamento: input.data_prevista_fechamento,
            observacoes: input.observacoes,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdateOportunidade) {
        apply(&mut self.cliente_id, changes.cliente_id);
        apply(&mut self.titulo, changes.titulo);
        apply(&mut self.status, changes.status);
        apply_nullable(&mut self.valor_estimado, changes.valor_estimado);
        apply_nullable(&mut self.linha_credito, changes.linha_credito);
        apply_nullable(&mut self.probabilidade, changes.probabilidade);
        apply_nullable(&mut self.data_prevista_fechamento, changes.data_prevista_fechamento);
        apply_nullable(&mut self.observacoes, changes.observacoes);
    }
}
