// src/handlers/simulacoes.rs

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
    models::simulacao::{calcular, CreateSimulacao, ParametrosSimulacao, UpdateSimulacao},
};

const SIMULACAO: &str = "Simulação";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulacaoFiltro {
    pub linha_credito: Option<String>,
}

// GET /api/simulacoes?linhaCredito=Pronaf
pub async fn list_simulacoes(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(filtro): Query<SimulacaoFiltro>,
) -> Result<impl IntoResponse, AppError> {
    let simulacoes = match filtro.linha_credito {
        Some(linha) => app_state.simulacoes.list_by_linha_credito(tenant.0, &linha).await?,
        None => app_state.simulacoes.list(tenant.0).await?,
    };
    Ok(Json(simulacoes))
}

// POST /api/simulacoes
// O resumo (primeira parcela, juros, total) é calculado aqui e gravado junto.
pub async fn create_simulacao(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateSimulacao>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let simulacao = app_state.simulacoes.create(tenant.0, payload).await?;
    Ok((StatusCode::CREATED, Json(simulacao)))
}

// POST /api/simulacoes/calcular
// Só calcula o cronograma; nada é gravado.
pub async fn calcular_simulacao(
    _tenant: TenantContext,
    Json(payload): Json<ParametrosSimulacao>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    Ok(Json(calcular(&payload)?))
}

// GET /api/simulacoes/{id}
pub async fn get_simulacao(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let simulacao = found(app_state.simulacoes.get_by_id(tenant.0, id).await?, SIMULACAO)?;
    Ok(Json(simulacao))
}

// PATCH /api/simulacoes/{id}
pub async fn update_simulacao(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSimulacao>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let simulacao = found(app_state.simulacoes.update(tenant.0, id, payload).await?, SIMULACAO)?;
    Ok(Json(simulacao))
}

// DELETE /api/simulacoes/{id}
pub async fn delete_simulacao(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(deleted(app_state.simulacoes.delete(tenant.0, id).await?))
}
