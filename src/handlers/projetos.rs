// src/handlers/projetos.rs

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
    models::projeto::{CreateProjeto, StatusProjeto, UpdateProjeto},
};

const PROJETO: &str = "Projeto";

#[derive(Debug, Deserialize)]
pub struct ProjetoFiltro {
    pub status: Option<StatusProjeto>,
}

// GET /api/projetos?status=Em Análise
pub async fn list_projetos(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(filtro): Query<ProjetoFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let projetos = match filtro.status {
        Some(status) => app_state.projetos.list_by_status(tenant.0, status).await?,
        None => app_state.projetos.list(tenant.0).await?,
    };
    Ok(Json(projetos))
}

// POST /api/projetos
pub async fn create_projeto(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateProjeto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let projeto = app_state.projetos.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(projeto)))
}

// GET /api/projetos/{id}
pub async fn get_projeto(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let projeto = found(app_state.projetos.get_by_id(tenant.0, id).await?, PROJETO)?;
    Ok(Json(projeto))
}

// PATCH /api/projetos/{id}
pub async fn update_projeto(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjeto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let projeto = found(app_state.projetos.update(tenant.0, id, payload).await?, PROJETO)?;
    Ok(Json(projeto))
}

// DELETE /api/projetos/{id}
pub async fn delete_projeto(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.projetos.delete(tenant.0, id).await?))
}

// GET /api/projetos/{id}/documentos
pub async fn list_documentos_do_projeto(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.documentos.list_by_projeto(tenant.0, id).await?))
}

// GET /api/projetos/{id}/simulacoes
pub async fn list_simulacoes_do_projeto(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.simulacoes.list_by_projeto(tenant.0, id).await?))
}

// GET /api/projetos/{id}/tarefas
pub async fn list_tarefas_do_projeto(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tarefas.list_by_projeto(tenant.0, id).await?))
}
