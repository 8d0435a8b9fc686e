// src/models/propriedade.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;
use crate::models::{apply, apply_nullable};

/// Imóvel rural de um cliente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Propriedade {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub nome: String,
    /// Matrícula no cartório de registro de imóveis.
    pub matricula: Option<String>,
    pub area_hectares: Option<Decimal>,
    pub municipio: Option<String>,
    pub uf: Option<String>,
    /// Cadastro Ambiental Rural.
    pub car: Option<String>,
    /// Certificado de Cadastro de Imóvel Rural.
    pub ccir: Option<String>,
    pub atividade_principal: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropriedade {
    pub cliente_id: Uuid,
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,
    pub matricula: Option<String>,
    pub area_hectares: Option<Decimal>,
    pub municipio: Option<String>,
    #[validate(length(equal = 2, message = "A UF deve ter 2 letras"))]
    pub uf: Option<String>,
    pub car: Option<String>,
    pub ccir: Option<String>,
    pub atividade_principal: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropriedade {
    pub cliente_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub matricula: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub area_hectares: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub municipio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub uf: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub car: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub ccir: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub atividade_principal: Option<Option<String>>,
}

impl Propriedade {
    pub fn new(id: Uuid, input: CreatePropriedade, agora: DateTime<Utc>) -> Self {
        Self {
            id,
            cliente_id: input.cliente_id,
            nome: input.nome,
            matricula: input.matricula,
            area_hectares: input.area_hectares,
            municipio: input.municipio,
            uf: input.uf,
            car: input.car,
            ccir: input.ccir,
            atividade_principal: input.atividade_principal,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdatePropriedade) {
        apply(&mut self.cliente_id, changes.cliente_id);
        apply(&mut self.nome, changes.nome);
        apply_nullable(&mut self.matricula, changes.matricula);
        apply_nullable(&mut self.area_hectares, changes.area_hectares);
        apply_nullable(&mut self.municipio, changes.municipio);
        apply_nullable(&mut self.uf, changes.uf);
        apply_nullable(&mut self.car, changes.car);
        apply_nullable(&mut self.ccir, changes.ccir);
        apply_nullable(&mut self.atividade_principal, changes.atividade_principal);
    }
}
