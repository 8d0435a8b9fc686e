// src/db/lista_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_QUADRO};
use super::error::RepositoryError;
use super::keys::tenant_scoped;
use super::store::ItemStore;
use super::table::{check_ordem, TenantTable, ATUALIZAR, CRIAR, REORDENAR};
use crate::models::kanban::{CreateLista, Lista, OrdemItem, UpdateLista};

#[derive(Clone)]
pub struct ListaRepository {
    table: TenantTable,
}

impl ListaRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Lista>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    /// Listas de um quadro, já na ordem (a sort key do índice embute a ordem).
    pub async fn list_by_parent(&self, tenant_id: Uuid, quadro_id: Uuid) -> Result<Vec<Lista>, RepositoryError> {
        self.table
            .query_index(indices::LISTA_POR_QUADRO, tenant_scoped(tenant_id, POR_QUADRO, quadro_id))
            .await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Lista>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    /// Sem ordem informada, a lista vai para o fim do quadro.
    pub async fn create(&self, tenant_id: Uuid, input: CreateLista) -> Result<Lista, RepositoryError> {
        let ordem = match input.ordem {
            Some(ordem) => check_ordem(ordem)?,
            None => {
                let listas = self.list_by_parent(tenant_id, input.quadro_id).await?;
                check_ordem(listas.last().map_or(0, |l| l.ordem + 1))?
            }
        };

        let lista = Lista::new(Uuid::new_v4(), input, ordem, Utc::now());
        self.table.put(tenant_id, &lista, CRIAR).await?;
        Ok(lista)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateLista,
    ) -> Result<Option<Lista>, RepositoryError> {
        if let Some(ordem) = changes.ordem {
            check_ordem(ordem)?;
        }
        let Some(mut lista) = self.table.get::<Lista>(tenant_id, id).await? else {
            return Ok(None);
        };

        lista.apply(changes);
        lista.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &lista, ATUALIZAR).await?;
        Ok(Some(lista))
    }

    /// As tarefas da lista continuam gravadas.
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Lista>(tenant_id, id).await
    }

    /// Regrava `ordem` e a sort key do índice de cada lista, uma por vez.
    ///
    /// Não é atômico: uma falha no meio deixa o quadro parcialmente
    /// reordenado. Listas inexistentes ou de outro quadro são ignoradas.
    pub async fn reorder(&self, tenant_id: Uuid, quadro_id: Uuid, itens: &[OrdemItem]) -> Result<(), RepositoryError> {
        for item in itens {
            check_ordem(item.ordem)?;
        }

        for item in itens {
            let Some(mut lista) = self.table.get::<Lista>(tenant_id, item.id).await? else {
                tracing::warn!(tenant_id = %tenant_id, lista_id = %item.id, "Lista não encontrada na reordenação");
                continue;
            };
            if lista.quadro_id != quadro_id {
                tracing::warn!(
                    tenant_id = %tenant_id,
                    lista_id = %item.id,
                    quadro_id = %quadro_id,
                    "Lista de outro quadro ignorada na reordenação"
                );
                continue;
            }

            lista.ordem = item.ordem;
            lista.data_atualizacao = Utc::now();
            self.table.put(tenant_id, &lista, REORDENAR).await?;
        }
        Ok(())
    }
}
