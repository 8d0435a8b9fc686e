// src/db/cliente_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_CPF_CNPJ};
use super::error::RepositoryError;
use super::keys::{normalize_cpf_cnpj, tenant_scoped};
use super::store::ItemStore;
use super::table::{TenantTable, ATUALIZAR, CRIAR};
use crate::models::cliente::{Cliente, CreateCliente, UpdateCliente};

#[derive(Clone)]
pub struct ClienteRepository {
    table: TenantTable,
}

impl ClienteRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Cliente>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Cliente>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    /// Busca pelo CPF/CNPJ, com ou sem pontuação.
    pub async fn get_by_cpf_cnpj(&self, tenant_id: Uuid, cpf_cnpj: &str) -> Result<Option<Cliente>, RepositoryError> {
        let partition = tenant_scoped(tenant_id, POR_CPF_CNPJ, normalize_cpf_cnpj(cpf_cnpj));
        let clientes: Vec<Cliente> = self.table.query_index(indices::CLIENTE_POR_CPF_CNPJ, partition).await?;
        Ok(clientes.into_iter().next())
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreateCliente) -> Result<Cliente, RepositoryError> {
        let cliente = Cliente::new(Uuid::new_v4(), input, Utc::now());
        self.table.put(tenant_id, &cliente, CRIAR).await?;

        tracing::info!(tenant_id = %tenant_id, cliente_id = %cliente.id, "Cliente criado");
        Ok(cliente)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateCliente,
    ) -> Result<Option<Cliente>, RepositoryError> {
        let Some(mut cliente) = self.table.get::<Cliente>(tenant_id, id).await? else {
            return Ok(None);
        };

        cliente.apply(changes);
        cliente.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &cliente, ATUALIZAR).await?;
        Ok(Some(cliente))
    }

    /// Não exclui propriedades, projetos nem documentos do cliente.
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Cliente>(tenant_id, id).await
    }
}
