// src/models/documento.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;
use crate::models::{apply, apply_nullable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoDocumento {
    #[serde(rename = "RG")]
    Rg,
    #[serde(rename = "CPF")]
    Cpf,
    #[serde(rename = "CNPJ")]
    Cnpj,
    #[serde(rename = "Comprovante de Residência")]
    ComprovanteResidencia,
    #[serde(rename = "Matrícula")]
    Matricula,
    #[serde(rename = "CAR")]
    Car,
    #[serde(rename = "CCIR")]
    Ccir,
    #[serde(rename = "ITR")]
    Itr,
    /// Cadastro Nacional da Agricultura Familiar (antiga DAP).
    #[serde(rename = "CAF")]
    Caf,
    #[serde(rename = "Projeto Técnico")]
    ProjetoTecnico,
    Contrato,
    Outro,
}

impl TipoDocumento {
    pub fn as_str(self) -> &'static str {
        match self {
            TipoDocumento::Rg => "RG",
            TipoDocumento::Cpf => "CPF",
            TipoDocumento::Cnpj => "CNPJ",
            TipoDocumento::ComprovanteResidencia => "Comprovante de Residência",
            TipoDocumento::Matricula => "Matrícula",
            TipoDocumento::Car => "CAR",
            TipoDocumento::Ccir => "CCIR",
            TipoDocumento::Itr => "ITR",
            TipoDocumento::Caf => "CAF",
            TipoDocumento::ProjetoTecnico => "Projeto Técnico",
            TipoDocumento::Contrato => "Contrato",
            TipoDocumento::Outro => "Outro",
        }
    }
}

/// Metadados de um documento do cliente. O arquivo em si vive no storage
/// de blobs; aqui fica só a `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documento {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub projeto_id: Option<Uuid>,
    pub nome: String,
    pub tipo: TipoDocumento,
    pub url: Option<String>,
    pub tamanho_bytes: Option<u64>,
    pub mime_type: Option<String>,
    pub data_validade: Option<NaiveDate>,
    pub observacoes: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumento {
    pub cliente_id: Uuid,
    pub projeto_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,
    pub tipo: TipoDocumento,
    #[validate(url(message = "URL inválida"))]
    pub url: Option<String>,
    pub tamanho_bytes: Option<u64>,
    pub mime_type: Option<String>,
    pub data_validade: Option<NaiveDate>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumento {
    pub cliente_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    pub projeto_id: Option<Option<Uuid>>,
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,
    pub tipo: Option<TipoDocumento>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tamanho_bytes: Option<Option<u64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub mime_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub data_validade: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
}

impl Documento {
    pub fn new(id: Uuid, input: CreateDocumento, agora: DateTime<Utc>) -> Self {
        Self {
            id,
            cliente_id: input.cliente_id,
            projeto_id: input.projeto_id,
            nome: input.nome,
            tipo: input.tipo,
            url: input.url,
            tamanho_bytes: input.tamanho_bytes,
            mime_type: input.mime_type,
            data_validade: input.data_validade,
            observacoes: input.observacoes,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdateDocumento) {
        apply(&mut self.cliente_id, changes.cliente_id);
        apply_nullable(&mut self.projeto_id, changes.projeto_id);
        apply(&mut self.nome, changes.nome);
        apply(&mut self.tipo, changes.tipo);
        apply_nullable(&mut self.url, changes.url);
        apply_nullable(&mut self.tamanho_bytes, changes.tamanho_bytes);
        apply_nullable(&mut self.mime_type, changes.mime_type);
        apply_nullable(&mut self.data_validade, changes.data_validade);
        apply_nullable(&mut self.observacoes, changes.observacoes);
    }
}
