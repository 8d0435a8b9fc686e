// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use crate::common::error::ApiError;

pub const TENANT_ID_HEADER: &str = "x-tenant-id";

/// Tenant da requisição, lido do cabeçalho `X-Tenant-ID`.
///
/// Todo handler recebe o tenant por aqui e o repassa explicitamente aos
/// repositórios; não existe tenant "padrão".
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(TENANT_ID_HEADER) else {
            return Err(rejection("O cabeçalho X-Tenant-ID é obrigatório."));
        };

        let value_str = value
            .to_str()
            .map_err(|_| rejection("Cabeçalho X-Tenant-ID contém caracteres inválidos."))?;

        let tenant_id = Uuid::parse_str(value_str.trim())
            .map_err(|_| rejection("Cabeçalho X-Tenant-ID inválido (não é um UUID)."))?;

        Ok(TenantContext(tenant_id))
    }
}

fn rejection(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        message: message.to_string(),
    }
}
