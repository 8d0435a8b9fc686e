// src/db/table.rs

use std::sync::Arc;

use uuid::Uuid;

use super::error::RepositoryError;
use super::keys::{from_item, item_key, tenant_pk, to_item, type_prefix, StorageEntity, ORDEM_MAX};
use super::store::{Filter, IndexName, Item, ItemStore, Query, StoreError};

// Verbos usados nas mensagens de erro.
pub const LISTAR: &str = "listar";
pub const BUSCAR: &str = "buscar";
pub const CRIAR: &str = "criar";
pub const ATUALIZAR: &str = "atualizar";
pub const EXCLUIR: &str = "excluir";
pub const REORDENAR: &str = "reordenar";
pub const MOVER: &str = "mover";

/// Acesso à tabela única restrito a um tenant por chamada.
///
/// Todos os repositórios passam por aqui: a `PK` sempre vem do `tenant_id`
/// recebido e toda escrita é uma substituição completa do item, o que mantém
/// as chaves de índice coerentes com os atributos.
#[derive(Clone)]
pub struct TenantTable {
    store: Arc<dyn ItemStore>,
}

impl TenantTable {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Todas as entidades do tipo `E` do tenant, por `PK` + prefixo da `SK`.
    pub async fn list<E: StorageEntity>(&self, tenant_id: Uuid) -> Result<Vec<E>, RepositoryError> {
        let query = Query::partition(tenant_pk(tenant_id)).begins_with(type_prefix(E::TIPO));
        self.query::<E>(query, LISTAR).await
    }

    /// Como `list`, com um filtro aplicado depois da condição de chave.
    pub async fn list_filtered<E: StorageEntity>(
        &self,
        tenant_id: Uuid,
        filter: Filter,
    ) -> Result<Vec<E>, RepositoryError> {
        let query = Query::partition(tenant_pk(tenant_id))
            .begins_with(type_prefix(E::TIPO))
            .filter(filter);
        self.query::<E>(query, LISTAR).await
    }

    pub async fn get<E: StorageEntity>(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<E>, RepositoryError> {
        let key = item_key::<E>(tenant_id, id);
        let item = self
            .store
            .get_item(&key)
            .await
            .map_err(|e| store_failure::<E>(BUSCAR, Some(id), e))?;

        item.map(|item| decode::<E>(item, BUSCAR)).transpose()
    }

    /// Consulta um índice secundário. O `prefix` restringe a sort key ao tipo
    /// da entidade, já que a partição de um índice pode misturar tipos.
    pub async fn query_index<E: StorageEntity>(
        &self,
        index: IndexName,
        partition_key: String,
    ) -> Result<Vec<E>, RepositoryError> {
        let query = Query::index(index, partition_key).begins_with(type_prefix(E::TIPO));
        self.query::<E>(query, LISTAR).await
    }

    /// Grava a entidade inteira, substituindo o item anterior (inclusive
    /// pares de índice que deixaram de existir).
    pub async fn put<E: StorageEntity>(
        &self,
        tenant_id: Uuid,
        entity: &E,
        operacao: &'static str,
    ) -> Result<(), RepositoryError> {
        let item = to_item(entity, tenant_id).map_err(|source| RepositoryError::Corrupted {
            entidade: E::NOME,
            operacao,
            source,
        })?;

        self.store
            .put_item(item)
            .await
            .map_err(|e| store_failure::<E>(operacao, Some(entity.id()), e))
    }

    /// Sempre `true` quando o banco responde: excluir uma chave inexistente
    /// não é erro, então "excluído" e "não existia" não se distinguem.
    pub async fn delete<E: StorageEntity>(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.store
            .delete_item(&item_key::<E>(tenant_id, id))
            .await
            .map_err(|e| store_failure::<E>(EXCLUIR, Some(id), e))?;
        Ok(true)
    }

    async fn query<E: StorageEntity>(&self, query: Query, operacao: &'static str) -> Result<Vec<E>, RepositoryError> {
        let items = self
            .store
            .query(query)
            .await
            .map_err(|e| store_failure::<E>(operacao, None, e))?;

        items.into_iter().map(|item| decode::<E>(item, operacao)).collect()
    }
}

/// Recusa ordens que não cabem na largura fixa das sort keys.
pub fn check_ordem(ordem: u32) -> Result<u32, RepositoryError> {
    if ordem > ORDEM_MAX {
        return Err(RepositoryError::OrdemForaDoLimite(ordem));
    }
    Ok(ordem)
}

fn decode<E: StorageEntity>(item: Item, operacao: &'static str) -> Result<E, RepositoryError> {
    from_item::<E>(item).map_err(|source| {
        tracing::error!(entidade = E::NOME, operacao, error = %source, "Item corrompido na tabela");
        RepositoryError::Corrupted {
            entidade: E::NOME,
            operacao,
            source,
        }
    })
}

fn store_failure<E: StorageEntity>(operacao: &'static str, id: Option<Uuid>, source: StoreError) -> RepositoryError {
    tracing::error!(
        entidade = E::NOME,
        operacao,
        id = ?id,
        error = %source,
        "Falha no acesso à tabela"
    );
    RepositoryError::Store {
        entidade: E::NOME,
        operacao,
        source,
    }
}
