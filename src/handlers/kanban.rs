// src/handlers/kanban.rs

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
    models::kanban::{
        CreateLista, CreateQuadro, CreateTarefa, MoverTarefa, ReordenarPayload, UpdateLista, UpdateQuadro,
        UpdateTarefa,
    },
};

const QUADRO: &str = "Quadro";
const LISTA: &str = "Lista";
const TAREFA: &str = "Tarefa";

// =============================================================================
//  QUADROS
// =============================================================================

// GET /api/quadros
pub async fn list_quadros(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.quadros.list(tenant.0).await?))
}

// POST /api/quadros
pub async fn create_quadro(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateQuadro>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quadro = app_state.quadros.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(quadro)))
}

// GET /api/quadros/{id}
pub async fn get_quadro(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quadro = found(app_state.quadros.get_by_id(tenant.0, id).await?, QUADRO)?;
    Ok(Json(quadro))
}

// PATCH /api/quadros/{id}
pub async fn update_quadro(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuadro>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quadro = found(app_state.quadros.update(tenant.0, id, payload).await?, QUADRO)?;
    Ok(Json(quadro))
}

// DELETE /api/quadros/{id}
pub async fn delete_quadro(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.quadros.delete(tenant.0, id).await?))
}

// GET /api/quadros/{id}/listas
pub async fn list_listas_do_quadro(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.listas.list_by_parent(tenant.0, id).await?))
}

// GET /api/quadros/{id}/tarefas
pub async fn list_tarefas_do_quadro(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tarefas.list_by_quadro(tenant.0, id).await?))
}

// PUT /api/quadros/{id}/listas/ordem
// Devolve as listas do quadro já na nova ordem.
pub async fn reordenar_listas(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReordenarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.listas.reorder(tenant.0, id, &payload.itens).await?;
    Ok(Json(app_state.listas.list_by_parent(tenant.0, id).await?))
}

// =============================================================================
//  LISTAS
// =============================================================================

// GET /api/listas
pub async fn list_listas(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.listas.list(tenant.0).await?))
}

// POST /api/listas
pub async fn create_lista(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateLista>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lista = app_state.listas.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(lista)))
}

// GET /api/listas/{id}
pub async fn get_lista(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lista = found(app_state.listas.get_by_id(tenant.0, id).await?, LISTA)?;
    Ok(Json(lista))
}

// PATCH /api/listas/{id}
pub async fn update_lista(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLista>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lista = found(app_state.listas.update(tenant.0, id, payload).await?, LISTA)?;
    Ok(Json(lista))
}

// DELETE /api/listas/{id}
pub async fn delete_lista(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.listas.delete(tenant.0, id).await?))
}

// GET /api/listas/{id}/tarefas
pub async fn list_tarefas_da_lista(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.tarefas.list_by_parent(tenant.0, id).await?))
}

// PUT /api/listas/{id}/tarefas/ordem
pub async fn reordenar_tarefas(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReordenarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.tarefas.reorder(tenant.0, id, &payload.itens).await?;
    Ok(Json(app_state.tarefas.list_by_parent(tenant.0, id).await?))
}

// =============================================================================
//  TAREFAS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TarefaFiltro {
    pub etiqueta: Option<String>,
}

// GET /api/tarefas?etiqueta=pronaf
pub async fn list_tarefas(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(filtro): Query<TarefaFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let tarefas = match filtro.etiqueta {
        Some(etiqueta) => app_state.tarefas.list_by_etiqueta(tenant.0, &etiqueta).await?,
        None => app_state.tarefas.list(tenant.0).await?,
    };
    Ok(Json(tarefas))
}

// POST /api/tarefas
pub async fn create_tarefa(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateTarefa>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarefa = app_state.tarefas.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(tarefa)))
}

// GET /api/tarefas/{id}
pub async fn get_tarefa(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tarefa = found(app_state.tarefas.get_by_id(tenant.0, id).await?, TAREFA)?;
    Ok(Json(tarefa))
}

// PATCH /api/tarefas/{id}
pub async fn update_tarefa(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTarefa>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarefa = found(app_state.tarefas.update(tenant.0, id, payload).await?, TAREFA)?;
    Ok(Json(tarefa))
}

// DELETE /api/tarefas/{id}
pub async fn delete_tarefa(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.tarefas.delete(tenant.0, id).await?))
}

// POST /api/tarefas/{id}/mover
pub async fn mover_tarefa(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoverTarefa>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarefa = found(app_state.tarefas.move_to_lista(tenant.0, id, payload).await?, TAREFA)?;
    Ok(Json(tarefa))
}
