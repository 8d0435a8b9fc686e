// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::db::RepositoryError;
use crate::models::simulacao::SimulacaoError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    /// Carrega o nome da entidade procurada.
    #[error("{0} não encontrado")]
    ResourceNotFound(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Simulação inválida: {0}")]
    Simulacao(#[from] SimulacaoError),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

/// Resposta de erro simples: status + mensagem em `{"error": ...}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl AppError {
    /// Converte para o formato de resposta. Erros internos são logados aqui
    /// e chegam ao cliente apenas como mensagem genérica.
    pub fn to_api_error(&self) -> ApiError {
        let (status, message) = match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Um ou mais campos são inválidos.".to_string()),
            AppError::ResourceNotFound(entidade) => (StatusCode::NOT_FOUND, format!("{entidade} não encontrado.")),
            AppError::Repository(e @ (RepositoryError::OrdemForaDoLimite(_) | RepositoryError::Simulacao(_))) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Simulacao(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };
        ApiError { status, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::ValidationError(errors) = &self {
            let mut details = BTreeMap::new();
            collect_messages(errors, "", &mut details);
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }
        self.to_api_error().into_response()
    }
}

/// Achata os erros (inclusive de structs e listas aninhadas) em
/// `caminho -> mensagens`, como `itens[0].ordem`.
fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string()))
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::keys::KeyError;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(AppError::ResourceNotFound("Cliente").to_api_error().status, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Repository(RepositoryError::OrdemForaDoLimite(1_000_000)).to_api_error().status,
            StatusCode::BAD_REQUEST
        );

        let corrompido = RepositoryError::Corrupted {
            entidade: "cliente",
            operacao: "buscar",
            source: KeyError::NotAnObject,
        };
        let api = AppError::Repository(corrompido).to_api_error();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Ocorreu um erro inesperado.");
    }
}
