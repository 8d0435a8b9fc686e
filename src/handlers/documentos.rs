// src/handlers/documentos.rs
//
// Criação, alteração e exclusão passam pelo DocumentoService, que mantém a
// lista de documentos do projeto vinculado.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{deleted, found},
    middleware::tenancy::TenantContext,
    models::documento::{CreateDocumento, TipoDocumento, UpdateDocumento},
};

const DOCUMENTO: &str = "Documento";

#[derive(Debug, Deserialize)]
pub struct DocumentoFiltro {
    pub tipo: Option<TipoDocumento>,
}

// GET /api/documentos?tipo=CAR
pub async fn list_documentos(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(filtro): Query<DocumentoFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let documentos = match filtro.tipo {
        Some(tipo) => app_state.documentos.list_by_tipo(tenant.0, tipo).await?,
        None => app_state.documentos.list(tenant.0).await?,
    };
    Ok(Json(documentos))
}

// POST /api/documentos
pub async fn create_documento(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateDocumento>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let documento = app_state.documento_service.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(documento)))
}

// GET /api/documentos/{id}
pub async fn get_documento(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let documento = found(app_state.documentos.get_by_id(tenant.0, id).await?, DOCUMENTO)?;
    Ok(Json(documento))
}

// PATCH /api/documentos/{id}
pub async fn update_documento(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDocumento>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let documento = found(app_state.documento_service.update(tenant.0, id, payload).await?, DOCUMENTO)?;
    Ok(Json(documento))
}

// DELETE /api/documentos/{id}
pub async fn delete_documento(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.documento_service.delete(tenant.0, id).await?))
}
