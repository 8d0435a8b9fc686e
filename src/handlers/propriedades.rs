// src/handlers/propriedades.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{deleted, found},
    middleware::tenancy::TenantContext,
    models::propriedade::{CreatePropriedade, UpdatePropriedade},
};

const PROPRIEDADE: &str = "Propriedade";

// GET /api/propriedades
pub async fn list_propriedades(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.propriedades.list(tenant.0).await?))
}

// POST /api/propriedades
pub async fn create_propriedade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreatePropriedade>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let propriedade = app_state.propriedades.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(propriedade)))
}

// GET /api/propriedades/{id}
pub async fn get_propriedade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let propriedade = found(app_state.propriedades.get_by_id(tenant.0, id).await?, PROPRIEDADE)?;
    Ok(Json(propriedade))
}

// PATCH /api/propriedades/{id}
pub async fn update_propriedade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePropriedade>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let propriedade = found(app_state.propriedades.update(tenant.0, id, payload).await?, PROPRIEDADE)?;
    Ok(Json(propriedade))
}

// DELETE /api/propriedades/{id}
pub async fn delete_propriedade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.propriedades.delete(tenant.0, id).await?))
}

// GET /api/propriedades/{id}/projetos
pub async fn list_projetos_da_propriedade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.projetos.list_by_propriedade(tenant.0, id).await?))
}

// GET /api/propriedades/{id}/tarefas
pub async fn list_tarefas_da_propriedade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tarefas.list_by_propriedade(tenant.0, id).await?))
}
