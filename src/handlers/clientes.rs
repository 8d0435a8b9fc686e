// src/handlers/clientes.rs

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
    models::cliente::{CreateCliente, UpdateCliente},
};

const CLIENTE: &str = "Cliente";

// =============================================================================
//  CRUD
// =============================================================================

// GET /api/clientes
pub async fn list_clientes(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.clientes.list(tenant.0).await?;
    Ok(Json(clientes))
}

// POST /api/clientes
pub async fn create_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateCliente>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state.clientes.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes/{id}
pub async fn get_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = found(app_state.clientes.get_by_id(tenant.0, id).await?, CLIENTE)?;
    Ok(Json(cliente))
}

// GET /api/clientes/cpf-cnpj/{documento}
pub async fn get_cliente_by_cpf_cnpj(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(documento): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = found(app_state.clientes.get_by_cpf_cnpj(tenant.0, &documento).await?, CLIENTE)?;
    Ok(Json(cliente))
}

// PATCH /api/clientes/{id}
pub async fn update_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCliente>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = found(app_state.clientes.update(tenant.0, id, payload).await?, CLIENTE)?;
    Ok(Json(cliente))
}

// DELETE /api/clientes/{id}
pub async fn delete_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.clientes.delete(tenant.0, id).await?))
}

// =============================================================================
//  CONSULTAS POR CLIENTE
// =============================================================================

// GET /api/clientes/{id}/propriedades
pub async fn list_propriedades_do_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.propriedades.list_by_parent(tenant.0, id).await?))
}

// GET /api/clientes/{id}/projetos
pub async fn list_projetos_do_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.projetos.list_by_parent(tenant.0, id).await?))
}

// GET /api/clientes/{id}/documentos
pub async fn list_documentos_do_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.documentos.list_by_parent(tenant.0, id).await?))
}

// GET /api/clientes/{id}/oportunidades
pub async fn list_oportunidades_do_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.oportunidades.list_by_parent(tenant.0, id).await?))
}

// GET /api/clientes/{id}/simulacoes
pub async fn list_simulacoes_do_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.simulacoes.list_by_parent(tenant.0, id).await?))
}

// GET /api/clientes/{id}/tarefas
pub async fn list_tarefas_do_cliente(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tarefas.list_by_cliente(tenant.0, id).await?))
}
