// src/db/projeto_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_CLIENTE, POR_PROPRIEDADE, POR_STATUS_PROJETO};
use super::error::RepositoryError;
use super::keys::tenant_scoped;
use super::store::ItemStore;
use super::table::{TenantTable, ATUALIZAR, CRIAR};
use crate::models::projeto::{CreateProjeto, Projeto, StatusProjeto, UpdateProjeto};

#[derive(Clone)]
pub struct ProjetoRepository {
    table: TenantTable,
}

impl ProjetoRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Projeto>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    /// Projetos de um cliente.
    pub async fn list_by_parent(&self, tenant_id: Uuid, cliente_id: Uuid) -> Result<Vec<Projeto>, RepositoryError> {
        self.table
            .query_index(indices::PROJETO_POR_CLIENTE, tenant_scoped(tenant_id, POR_CLIENTE, cliente_id))
            .await
    }

    pub async fn list_by_propriedade(&self, tenant_id: Uuid, propriedade_id: Uuid) -> Result<Vec<Projeto>, RepositoryError> {
        self.table
            .query_index(
                indices::PROJETO_POR_PROPRIEDADE,
                tenant_scoped(tenant_id, POR_PROPRIEDADE, propriedade_id),
            )
            .await
    }

    pub async fn list_by_status(&self, tenant_id: Uuid, status: StatusProjeto) -> Result<Vec<Projeto>, RepositoryError> {
        self.table
            .query_index(
                indices::PROJETO_POR_STATUS,
                tenant_scoped(tenant_id, POR_STATUS_PROJETO, status.as_str()),
            )
            .await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Projeto>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreateProjeto) -> Result<Projeto, RepositoryError> {
        let projeto = Projeto::new(Uuid::new_v4(), input, Utc::now());
        self.table.put(tenant_id, &projeto, CRIAR).await?;

        tracing::info!(tenant_id = %tenant_id, projeto_id = %projeto.id, status = projeto.status.as_str(), "Projeto criado");
        Ok(projeto)
    }

    /// Se o status ou a propriedade mudarem, os índices acompanham na
    /// mesma gravação.
    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateProjeto,
    ) -> Result<Option<Projeto>, RepositoryError> {
        let Some(mut projeto) = self.table.get::<Projeto>(tenant_id, id).await? else {
            return Ok(None);
        };

        projeto.apply(changes);
        projeto.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &projeto, ATUALIZAR).await?;
        Ok(Some(projeto))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Projeto>(tenant_id, id).await
    }

    // =========================================================================
    //  VÍNCULO COM DOCUMENTOS
    // =========================================================================

    /// Acrescenta o documento à lista do projeto (sem duplicar). `None` se o
    /// projeto não existe.
    pub async fn attach_documento(
        &self,
        tenant_id: Uuid,
        projeto_id: Uuid,
        documento_id: Uuid,
    ) -> Result<Option<Projeto>, RepositoryError> {
        let Some(mut projeto) = self.table.get::<Projeto>(tenant_id, projeto_id).await? else {
            return Ok(None);
        };

        if !projeto.documento_ids.contains(&documento_id) {
            projeto.documento_ids.push(documento_id);
            projeto.data_atualizacao = Utc::now();
            self.table.put(tenant_id, &projeto, ATUALIZAR).await?;
        }
        Ok(Some(projeto))
    }

    pub async fn detach_documento(
        &self,
        tenant_id: Uuid,
        projeto_id: Uuid,
        documento_id: Uuid,
    ) -> Result<Option<Projeto>, RepositoryError> {
        let Some(mut projeto) = self.table.get::<Projeto>(tenant_id, projeto_id).await? else {
            return Ok(None);
        };

        let antes = projeto.documento_ids.len();
        projeto.documento_ids.retain(|id| *id != documento_id);
        if projeto.documento_ids.len() != antes {
            projeto.data_atualizacao = Utc::now();
            self.table.put(tenant_id, &projeto, ATUALIZAR).await?;
        }
        Ok(Some(projeto))
    }
}
