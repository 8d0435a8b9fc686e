// src/db/propriedade_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_CLIENTE};
use super::error::RepositoryError;
use super::keys::tenant_scoped;
use super::store::ItemStore;
use super::table::{TenantTable, ATUALIZAR, CRIAR};
use crate::models::propriedade::{CreatePropriedade, Propriedade, UpdatePropriedade};

#[derive(Clone)]
pub struct PropriedadeRepository {
    table: TenantTable,
}

impl PropriedadeRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Propriedade>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    /// Propriedades de um cliente.
    pub async fn list_by_parent(&self, tenant_id: Uuid, cliente_id: Uuid) -> Result<Vec<Propriedade>, RepositoryError> {
        self.table
            .query_index(indices::PROPRIEDADE_POR_CLIENTE, tenant_scoped(tenant_id, POR_CLIENTE, cliente_id))
            .await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Propriedade>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreatePropriedade) -> Result<Propriedade, RepositoryError> {
        let propriedade = Propriedade::new(Uuid::new_v4(), input, Utc::now());
        self.table.put(tenant_id, &propriedade, CRIAR).await?;
        Ok(propriedade)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdatePropriedade,
    ) -> Result<Option<Propriedade>, RepositoryError> {
        let Some(mut propriedade) = self.table.get::<Propriedade>(tenant_id, id).await? else {
            return Ok(None);
        };

        propriedade.apply(changes);
        propriedade.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &propriedade, ATUALIZAR).await?;
        Ok(Some(propriedade))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Propriedade>(tenant_id, id).await
    }
}
