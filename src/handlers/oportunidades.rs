// src/handlers/oportunidades.rs

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
    models::oportunidade::{CreateOportunidade, StatusOportunidade, UpdateOportunidade},
};

const OPORTUNIDADE: &str = "Oportunidade";

#[derive(Debug, Deserialize)]
pub struct OportunidadeFiltro {
    pub status: Option<StatusOportunidade>,
}

// GET /api/oportunidades?status=Proposta
pub async fn list_oportunidades(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(filtro): Query<OportunidadeFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let oportunidades = match filtro.status {
        Some(status) => app_state.oportunidades.list_by_status(tenant.0, status).await?,
        None => app_state.oportunidades.list(tenant.0).await?,
    };
    Ok(Json(oportunidades))
}

// POST /api/oportunidades
pub async fn create_oportunidade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateOportunidade>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let oportunidade = app_state.oportunidades.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(oportunidade)))
}

// GET /api/oportunidades/{id}
pub async fn get_oportunidade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let oportunidade = found(app_state.oportunidades.get_by_id(tenant.0, id).await?, OPORTUNIDADE)?;
    Ok(Json(oportunidade))
}

// PATCH /api/oportunidades/{id}
pub async fn update_oportunidade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOportunidade>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let oportunidade = found(app_state.oportunidades.update(tenant.0, id, payload).await?, OPORTUNIDADE)?;
    Ok(Json(oportunidade))
}

// DELETE /api/oportunidades/{id}
pub async fn delete_oportunidade(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.oportunidades.delete(tenant.0, id).await?))
}
