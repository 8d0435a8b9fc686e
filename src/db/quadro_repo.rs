// src/db/quadro_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::error::RepositoryError;
use super::store::ItemStore;
use super::table::{TenantTable, ATUALIZAR, CRIAR};
use crate::models::kanban::{CreateQuadro, Quadro, UpdateQuadro};

#[derive(Clone)]
pub struct QuadroRepository {
    table: TenantTable,
}

impl QuadroRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Quadro>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Quadro>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreateQuadro) -> Result<Quadro, RepositoryError> {
        let quadro = Quadro::new(Uuid::new_v4(), input, Utc::now());
        self.table.put(tenant_id, &quadro, CRIAR).await?;
        Ok(quadro)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateQuadro,
    ) -> Result<Option<Quadro>, RepositoryError> {
        let Some(mut quadro) = self.table.get::<Quadro>(tenant_id, id).await? else {
            return Ok(None);
        };

        quadro.apply(changes);
        quadro.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &quadro, ATUALIZAR).await?;
        Ok(Some(quadro))
    }

    /// As listas e tarefas do quadro continuam gravadas.
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Quadro>(tenant_id, id).await
    }
}
