// src/db/oportunidade_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_CLIENTE, POR_STATUS_OPORTUNIDADE};
use super::error::RepositoryError;
use super::keys::tenant_scoped;
use super::store::ItemStore;
use super::table::{TenantTable, ATUALIZAR, CRIAR};
use crate::models::oportunidade::{CreateOportunidade, Oportunidade, StatusOportunidade, UpdateOportunidade};

#[derive(Clone)]
pub struct OportunidadeRepository {
    table: TenantTable,
}

impl OportunidadeRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Oportunidade>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    /// Oportunidades de um cliente.
    pub async fn list_by_parent(&self, tenant_id: Uuid, cliente_id: Uuid) -> Result<Vec<Oportunidade>, RepositoryError> {
        self.table
            .query_index(indices::OPORTUNIDADE_POR_CLIENTE, tenant_scoped(tenant_id, POR_CLIENTE, cliente_id))
            .await
    }

    /// O funil: oportunidades numa etapa.
    pub async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: StatusOportunidade,
    ) -> Result<Vec<Oportunidade>, RepositoryError> {
        self.table
            .query_index(
                indices::OPORTUNIDADE_POR_STATUS,
                tenant_scoped(tenant_id, POR_STATUS_OPORTUNIDADE, status.as_str()),
            )
            .await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Oportunidade>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreateOportunidade) -> Result<Oportunidade, RepositoryError> {
        let oportunidade = Oportunidade::new(Uuid::new_v4(), input, Utc::now());
        self.table.put(tenant_id, &oportunidade, CRIAR).await?;
        Ok(oportunidade)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateOportunidade,
    ) -> Result<Option<Oportunidade>, RepositoryError> {
        let Some(mut oportunidade) = self.table.get::<Oportunidade>(tenant_id, id).await? else {
            return Ok(None);
        };

        oportunidade.apply(changes);
        oportunidade.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &oportunidade, ATUALIZAR).await?;
        Ok(Some(oportunidade))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Oportunidade>(tenant_id, id).await
    }
}
