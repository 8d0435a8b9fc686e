// src/handlers.rs

use axum::Json;
use serde_json::{json, Value};

use crate::common::error::AppError;

pub mod clientes;
pub mod documentos;
pub mod kanban;
pub mod oportunidades;
pub mod projetos;
pub mod propriedades;
pub mod simulacoes;

/// `Some` ou 404 com o nome da entidade.
pub(crate) fn found<T>(value: Option<T>, entidade: &'static str) -> Result<T, AppError> {
    value.ok_or(AppError::ResourceNotFound(entidade))
}

pub(crate) fn deleted(deleted: bool) -> Json<Value> {
    Json(json!({ "deleted": deleted }))
}
