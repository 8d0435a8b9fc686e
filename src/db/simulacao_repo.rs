// src/db/simulacao_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_CLIENTE, POR_LINHA_CREDITO, POR_PROJETO};
use super::error::RepositoryError;
use super::keys::tenant_scoped;
use super::store::ItemStore;
use super::table::{TenantTable, ATUALIZAR, CRIAR};
use crate::models::simulacao::{CreateSimulacao, Simulacao, UpdateSimulacao};

#[derive(Clone)]
pub struct SimulacaoRepository {
    table: TenantTable,
}

impl SimulacaoRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Simulacao>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    /// Simulações de um cliente.
    pub async fn list_by_parent(&self, tenant_id: Uuid, cliente_id: Uuid) -> Result<Vec<Simulacao>, RepositoryError> {
        self.table
            .query_index(indices::SIMULACAO_POR_CLIENTE, tenant_scoped(tenant_id, POR_CLIENTE, cliente_id))
            .await
    }

    pub async fn list_by_projeto(&self, tenant_id: Uuid, projeto_id: Uuid) -> Result<Vec<Simulacao>, RepositoryError> {
        self.table
            .query_index(indices::SIMULACAO_POR_PROJETO, tenant_scoped(tenant_id, POR_PROJETO, projeto_id))
            .await
    }

    /// A linha precisa bater exatamente com a gravada ("Pronaf Custeio").
    pub async fn list_by_linha_credito(
        &self,
        tenant_id: Uuid,
        linha_credito: &str,
    ) -> Result<Vec<Simulacao>, RepositoryError> {
        self.table
            .query_index(
                indices::SIMULACAO_POR_LINHA_CREDITO,
                tenant_scoped(tenant_id, POR_LINHA_CREDITO, linha_credito),
            )
            .await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Simulacao>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    /// Calcula as parcelas e grava o resumo junto com os parâmetros.
    pub async fn create(&self, tenant_id: Uuid, input: CreateSimulacao) -> Result<Simulacao, RepositoryError> {
        let simulacao = Simulacao::new(Uuid::new_v4(), input, Utc::now())?;
        self.table.put(tenant_id, &simulacao, CRIAR).await?;
        Ok(simulacao)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateSimulacao,
    ) -> Result<Option<Simulacao>, RepositoryError> {
        let Some(mut simulacao) = self.table.get::<Simulacao>(tenant_id, id).await? else {
            return Ok(None);
        };

        simulacao.apply(changes)?;
        simulacao.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &simulacao, ATUALIZAR).await?;
        Ok(Some(simulacao))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Simulacao>(tenant_id, id).await
    }
}
