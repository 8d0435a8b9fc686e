// src/models/cliente.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::serde_utils::double_option;
use crate::db::keys::normalize_cpf_cnpj;
use crate::models::{apply, apply_nullable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoPessoa {
    Fisica,
    Juridica,
}

impl TipoPessoa {
    /// CPF tem 11 dígitos; qualquer outro tamanho válido (14) é CNPJ.
    pub fn from_documento(cpf_cnpj: &str) -> Self {
        if normalize_cpf_cnpj(cpf_cnpj).len() == 11 {
            TipoPessoa::Fisica
        } else {
            TipoPessoa::Juridica
        }
    }
}

/// Produtor rural (pessoa física ou jurídica), raiz do tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,
    pub nome: String,
    pub cpf_cnpj: String,
    pub tipo_pessoa: TipoPessoa,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub municipio: Option<String>,
    pub uf: Option<String>,
    pub observacoes: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

pub fn validate_cpf_cnpj(value: &str) -> Result<(), ValidationError> {
    match normalize_cpf_cnpj(value).len() {
        11 | 14 => Ok(()),
        _ => Err(ValidationError::new("cpf_cnpj")
            .with_message("O CPF deve ter 11 dígitos e o CNPJ 14.".into())),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCliente {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub nome: String,
    #[validate(custom(function = "validate_cpf_cnpj"))]
    pub cpf_cnpj: String,
    pub tipo_pessoa: Option<TipoPessoa>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub municipio: Option<String>,
    #[validate(length(equal = 2, message = "A UF deve ter 2 letras"))]
    pub uf: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCliente {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub nome: Option<String>,
    #[validate(custom(function = "validate_cpf_cnpj"))]
    pub cpf_cnpj: Option<String>,
    pub tipo_pessoa: Option<TipoPessoa>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub telefone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub endereco: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub municipio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub uf: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
}

impl Cliente {
    pub fn new(id: Uuid, input: CreateCliente, agora: DateTime<Utc>) -> Self {
        let tipo_pessoa = input
            .tipo_pessoa
            .unwrap_or_else(|| TipoPessoa::from_documento(&input.cpf_cnpj));
        Self {
            id,
            nome: input.nome,
            cpf_cnpj: input.cpf_cnpj,
            tipo_pessoa,
            email: input.email,
            telefone: input.telefone,
            endereco: input.endereco,
            municipio: input.municipio,
            uf: input.uf,
            observacoes: input.observacoes,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdateCliente) {
        apply(&mut self.nome, changes.nome);
        apply(&mut self.cpf_cnpj, changes.cpf_cnpj);
        apply(&mut self.tipo_pessoa, changes.tipo_pessoa);
        apply_nullable(&mut self.email, changes.email);
        apply_nullable(&mut self.telefone, changes.telefone);
        apply_nullable(&mut self.endereco, changes.endereco);
        apply_nullable(&mut self.municipio, changes.municipio);
        apply_nullable(&mut self.uf, changes.uf);
        apply_nullable(&mut self.observacoes, changes.observacoes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_person_type_from_document() {
        assert_eq!(TipoPessoa::from_documento("123.456.789-00"), TipoPessoa::Fisica);
        assert_eq!(TipoPessoa::from_documento("12.345.678/0001-90"), TipoPessoa::Juridica);
    }

    #[test]
    fn rejects_documents_with_wrong_length() {
        let input = CreateCliente {
            nome: "João".into(),
            cpf_cnpj: "123".into(),
            tipo_pessoa: None,
            email: None,
            telefone: None,
            endereco: None,
            municipio: None,
            uf: None,
            observacoes: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cpf_cnpj"));
    }
}
