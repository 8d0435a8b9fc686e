// src/db/documento_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_CLIENTE, POR_PROJETO, POR_TIPO_DOCUMENTO};
use super::error::RepositoryError;
use super::keys::tenant_scoped;
use super::store::ItemStore;
use super::table::{TenantTable, ATUALIZAR, CRIAR};
use crate::models::documento::{CreateDocumento, Documento, TipoDocumento, UpdateDocumento};

/// Metadados de documentos. O vínculo com `Projeto.documentoIds` é feito
/// pelo [`DocumentoService`](crate::services::documento_service::DocumentoService).
#[derive(Clone)]
pub struct DocumentoRepository {
    table: TenantTable,
}

impl DocumentoRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Documento>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    /// Documentos de um cliente.
    pub async fn list_by_parent(&self, tenant_id: Uuid, cliente_id: Uuid) -> Result<Vec<Documento>, RepositoryError> {
        self.table
            .query_index(indices::DOCUMENTO_POR_CLIENTE, tenant_scoped(tenant_id, POR_CLIENTE, cliente_id))
            .await
    }

    pub async fn list_by_projeto(&self, tenant_id: Uuid, projeto_id: Uuid) -> Result<Vec<Documento>, RepositoryError> {
        self.table
            .query_index(indices::DOCUMENTO_POR_PROJETO, tenant_scoped(tenant_id, POR_PROJETO, projeto_id))
            .await
    }

    pub async fn list_by_tipo(&self, tenant_id: Uuid, tipo: TipoDocumento) -> Result<Vec<Documento>, RepositoryError> {
        self.table
            .query_index(
                indices::DOCUMENTO_POR_TIPO,
                tenant_scoped(tenant_id, POR_TIPO_DOCUMENTO, tipo.as_str()),
            )
            .await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Documento>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreateDocumento) -> Result<Documento, RepositoryError> {
        let documento = Documento::new(Uuid::new_v4(), input, Utc::now());
        self.table.put(tenant_id, &documento, CRIAR).await?;
        Ok(documento)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateDocumento,
    ) -> Result<Option<Documento>, RepositoryError> {
        let Some(mut documento) = self.table.get::<Documento>(tenant_id, id).await? else {
            return Ok(None);
        };

        documento.apply(changes);
        documento.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &documento, ATUALIZAR).await?;
        Ok(Some(documento))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Documento>(tenant_id, id).await
    }
}
