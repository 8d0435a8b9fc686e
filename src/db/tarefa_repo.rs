// src/db/tarefa_repo.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::entity_keys::{indices, POR_CLIENTE, POR_LISTA, POR_PROJETO, POR_PROPRIEDADE, POR_QUADRO};
use super::error::RepositoryError;
use super::keys::tenant_scoped;
use super::store::{Filter, ItemStore};
use super::table::{check_ordem, TenantTable, ATUALIZAR, CRIAR, MOVER, REORDENAR};
use crate::models::kanban::{CreateTarefa, Lista, MoverTarefa, OrdemItem, Tarefa, UpdateTarefa};

#[derive(Clone)]
pub struct TarefaRepository {
    table: TenantTable,
}

impl TarefaRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { table: TenantTable::new(store) }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Tarefa>, RepositoryError> {
        self.table.list(tenant_id).await
    }

    /// Tarefas de uma lista, na ordem.
    pub async fn list_by_parent(&self, tenant_id: Uuid, lista_id: Uuid) -> Result<Vec<Tarefa>, RepositoryError> {
        self.table
            .query_index(indices::TAREFA_POR_LISTA, tenant_scoped(tenant_id, POR_LISTA, lista_id))
            .await
    }

    /// Todas as tarefas do quadro, seguindo a ordem das listas no quadro e,
    /// dentro de cada lista, a ordem das tarefas. Tarefas cuja lista não
    /// está mais no quadro ficam no fim.
    pub async fn list_by_quadro(&self, tenant_id: Uuid, quadro_id: Uuid) -> Result<Vec<Tarefa>, RepositoryError> {
        let listas: Vec<Lista> = self
            .table
            .query_index(indices::LISTA_POR_QUADRO, tenant_scoped(tenant_id, POR_QUADRO, quadro_id))
            .await?;
        let posicao: HashMap<Uuid, usize> = listas.iter().enumerate().map(|(i, l)| (l.id, i)).collect();

        let mut tarefas: Vec<Tarefa> = self
            .table
            .list_filtered(tenant_id, Filter::equals("quadroId", quadro_id.to_string()))
            .await?;
        tarefas.sort_by_key(|t| {
            let lista = posicao.get(&t.lista_id).copied().unwrap_or(usize::MAX);
            (lista, t.lista_id, t.ordem, t.id)
        });
        Ok(tarefas)
    }

    pub async fn list_by_cliente(&self, tenant_id: Uuid, cliente_id: Uuid) -> Result<Vec<Tarefa>, RepositoryError> {
        self.table
            .query_index(indices::TAREFA_POR_CLIENTE, tenant_scoped(tenant_id, POR_CLIENTE, cliente_id))
            .await
    }

    pub async fn list_by_projeto(&self, tenant_id: Uuid, projeto_id: Uuid) -> Result<Vec<Tarefa>, RepositoryError> {
        self.table
            .query_index(indices::TAREFA_POR_PROJETO, tenant_scoped(tenant_id, POR_PROJETO, projeto_id))
            .await
    }

    pub async fn list_by_propriedade(&self, tenant_id: Uuid, propriedade_id: Uuid) -> Result<Vec<Tarefa>, RepositoryError> {
        self.table
            .query_index(
                indices::TAREFA_POR_PROPRIEDADE,
                tenant_scoped(tenant_id, POR_PROPRIEDADE, propriedade_id),
            )
            .await
    }

    pub async fn list_by_etiqueta(&self, tenant_id: Uuid, etiqueta: &str) -> Result<Vec<Tarefa>, RepositoryError> {
        self.table
            .list_filtered(tenant_id, Filter::contains("etiquetas", etiqueta))
            .await
    }

    pub async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Tarefa>, RepositoryError> {
        self.table.get(tenant_id, id).await
    }

    /// Sem ordem informada, a tarefa vai para o fim da lista. O `quadroId`
    /// vem da lista quando ela existe.
    pub async fn create(&self, tenant_id: Uuid, mut input: CreateTarefa) -> Result<Tarefa, RepositoryError> {
        if let Some(lista) = self.table.get::<Lista>(tenant_id, input.lista_id).await? {
            if lista.quadro_id != input.quadro_id {
                tracing::debug!(
                    tenant_id = %tenant_id,
                    lista_id = %lista.id,
                    quadro_id = %lista.quadro_id,
                    "quadroId da tarefa ajustado para o quadro da lista"
                );
            }
            input.quadro_id = lista.quadro_id;
        }

        let ordem = match input.ordem {
            Some(ordem) => check_ordem(ordem)?,
            None => {
                let tarefas = self.list_by_parent(tenant_id, input.lista_id).await?;
                check_ordem(tarefas.last().map_or(0, |t| t.ordem + 1))?
            }
        };

        let tarefa = Tarefa::new(Uuid::new_v4(), input, ordem, Utc::now());
        self.table.put(tenant_id, &tarefa, CRIAR).await?;
        Ok(tarefa)
    }

    /// Limpar `clienteId`, `projetoId` ou `propriedadeId` remove a entrada
    /// correspondente do índice, porque o item é regravado por inteiro.
    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateTarefa,
    ) -> Result<Option<Tarefa>, RepositoryError> {
        if let Some(ordem) = changes.ordem {
            check_ordem(ordem)?;
        }
        let Some(mut tarefa) = self.table.get::<Tarefa>(tenant_id, id).await? else {
            return Ok(None);
        };

        tarefa.apply(changes);
        tarefa.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &tarefa, ATUALIZAR).await?;
        Ok(Some(tarefa))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.table.delete::<Tarefa>(tenant_id, id).await
    }

    /// Regrava a ordem de cada tarefa da lista, uma por vez (não atômico).
    /// Tarefas inexistentes ou de outra lista são ignoradas.
    pub async fn reorder(&self, tenant_id: Uuid, lista_id: Uuid, itens: &[OrdemItem]) -> Result<(), RepositoryError> {
        for item in itens {
            check_ordem(item.ordem)?;
        }

        for item in itens {
            let Some(mut tarefa) = self.table.get::<Tarefa>(tenant_id, item.id).await? else {
                tracing::warn!(tenant_id = %tenant_id, tarefa_id = %item.id, "Tarefa não encontrada na reordenação");
                continue;
            };
            if tarefa.lista_id != lista_id {
                tracing::warn!(
                    tenant_id = %tenant_id,
                    tarefa_id = %item.id,
                    lista_id = %lista_id,
                    "Tarefa de outra lista ignorada na reordenação"
                );
                continue;
            }

            tarefa.ordem = item.ordem;
            tarefa.data_atualizacao = Utc::now();
            self.table.put(tenant_id, &tarefa, REORDENAR).await?;
        }
        Ok(())
    }

    /// Move a tarefa para outra lista (ou posição) numa única gravação:
    /// `listaId`, `ordem` e o par do índice mudam juntos. O `quadroId`
    /// acompanha o quadro da lista de destino quando ela existe.
    pub async fn move_to_lista(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        destino: MoverTarefa,
    ) -> Result<Option<Tarefa>, RepositoryError> {
        check_ordem(destino.ordem)?;
        let Some(mut tarefa) = self.table.get::<Tarefa>(tenant_id, id).await? else {
            return Ok(None);
        };

        if let Some(lista) = self.table.get::<Lista>(tenant_id, destino.lista_id).await? {
            tarefa.quadro_id = lista.quadro_id;
        }
        tarefa.lista_id = destino.lista_id;
        tarefa.ordem = destino.ordem;
        tarefa.data_atualizacao = Utc::now();
        self.table.put(tenant_id, &tarefa, MOVER).await?;

        tracing::debug!(tenant_id = %tenant_id, tarefa_id = %id, lista_id = %destino.lista_id, ordem = destino.ordem, "Tarefa movida");
        Ok(Some(tarefa))
    }
}
