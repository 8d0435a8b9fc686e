// src/models/kanban.rs
//
// Quadro → Listas (ordenadas) → Tarefas (ordenadas).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;
use crate::db::keys::ORDEM_MAX;
use crate::models::{apply, apply_nullable};

// =========================================================================
//  QUADRO
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quadro {
    pub id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub cor: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuadro {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,
    pub descricao: Option<String>,
    pub cor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuadro {
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub descricao: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cor: Option<Option<String>>,
}

impl Quadro {
    pub fn new(id: Uuid, input: CreateQuadro, agora: DateTime<Utc>) -> Self {
        Self {
            id,
            nome: input.nome,
            descricao: input.descricao,
            cor: input.cor,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdateQuadro) {
        apply(&mut self.nome, changes.nome);
        apply_nullable(&mut self.descricao, changes.descricao);
        apply_nullable(&mut self.cor, changes.cor);
    }
}

// =========================================================================
//  LISTA
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lista {
    pub id: Uuid,
    pub quadro_id: Uuid,
    pub nome: String,
    pub ordem: u32,
    pub cor: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLista {
    pub quadro_id: Uuid,
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,
    /// Sem ordem, a lista entra no fim do quadro.
    #[validate(range(max = ORDEM_MAX, message = "ordem acima do limite"))]
    pub ordem: Option<u32>,
    pub cor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLista {
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,
    #[validate(range(max = ORDEM_MAX, message = "ordem acima do limite"))]
    pub ordem: Option<u32>,
    #[serde(default, deserialize_with = "double_option")]
    pub cor: Option<Option<String>>,
}

impl Lista {
    pub fn new(id: Uuid, input: CreateLista, ordem: u32, agora: DateTime<Utc>) -> Self {
        Self {
            id,
            quadro_id: input.quadro_id,
            nome: input.nome,
            ordem,
            cor: input.cor,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdateLista) {
        apply(&mut self.nome, changes.nome);
        apply(&mut self.ordem, changes.ordem);
        apply_nullable(&mut self.cor, changes.cor);
    }
}

// =========================================================================
//  TAREFA
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Prioridade {
    Baixa,
    #[default]
    #[serde(rename = "Média")]
    Media,
    Alta,
    Urgente,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tarefa {
    pub id: Uuid,
    pub lista_id: Uuid,
    pub quadro_id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub ordem: u32,
    pub prioridade: Prioridade,
    pub data_vencimento: Option<NaiveDate>,
    pub responsavel: Option<String>,
    #[serde(default)]
    pub etiquetas: Vec<String>,
    #[serde(default)]
    pub concluida: bool,
    pub cliente_id: Option<Uuid>,
    pub projeto_id: Option<Uuid>,
    pub propriedade_id: Option<Uuid>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTarefa {
    pub lista_id: Uuid,
    pub quadro_id: Uuid,
    #[validate(length(min = 1, message = "required"))]
    pub titulo: String,
    pub descricao: Option<String>,
    /// Sem ordem, a tarefa entra no fim da lista.
    #[validate(range(max = ORDEM_MAX, message = "ordem acima do limite"))]
    pub ordem: Option<u32>,
    pub prioridade: Option<Prioridade>,
    pub data_vencimento: Option<NaiveDate>,
    pub responsavel: Option<String>,
    #[serde(default)]
    pub etiquetas: Vec<String>,
    pub cliente_id: Option<Uuid>,
    pub projeto_id: Option<Uuid>,
    pub propriedade_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTarefa {
    #[validate(length(min = 1, message = "required"))]
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub descricao: Option<Option<String>>,
    #[validate(range(max = ORDEM_MAX, message = "ordem acima do limite"))]
    pub ordem: Option<u32>,
    pub prioridade: Option<Prioridade>,
    #[serde(default, deserialize_with = "double_option")]
    pub data_vencimento: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub responsavel: Option<Option<String>>,
    pub etiquetas: Option<Vec<String>>,
    pub concluida: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub cliente_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub projeto_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub propriedade_id: Option<Option<Uuid>>,
}

impl Tarefa {
    pub fn new(id: Uuid, input: CreateTarefa, ordem: u32, agora: DateTime<Utc>) -> Self {
        Self {
            id,
            lista_id: input.lista_id,
            quadro_id: input.quadro_id,
            titulo: input.titulo,
            descricao: input.descricao,
            ordem,
            prioridade: input.prioridade.unwrap_or_default(),
            data_vencimento: input.data_vencimento,
            responsavel: input.responsavel,
            etiquetas: input.etiquetas,
            concluida: false,
            cliente_id: input.cliente_id,
            projeto_id: input.projeto_id,
            propriedade_id: input.propriedade_id,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    pub fn apply(&mut self, changes: UpdateTarefa) {
        apply(&mut self.titulo, changes.titulo);
        apply_nullable(&mut self.descricao, changes.descricao);
        apply(&mut self.ordem, changes.ordem);
        apply(&mut self.prioridade, changes.prioridade);
        apply_nullable(&mut self.data_vencimento, changes.data_vencimento);
        apply_nullable(&mut self.responsavel, changes.responsavel);
        apply(&mut self.etiquetas, changes.etiquetas);
        apply(&mut self.concluida, changes.concluida);
        apply_nullable(&mut self.cliente_id, changes.cliente_id);
        apply_nullable(&mut self.projeto_id, changes.projeto_id);
        apply_nullable(&mut self.propriedade_id, changes.propriedade_id);
    }
}

// =========================================================================
//  REORDENAÇÃO E MOVIMENTAÇÃO
// =========================================================================

/// Uma posição na reordenação de uma coleção (listas de um quadro ou
/// tarefas de uma lista).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrdemItem {
    pub id: Uuid,
    #[validate(range(max = ORDEM_MAX, message = "ordem acima do limite"))]
    pub ordem: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReordenarPayload {
    #[validate(nested)]
    pub itens: Vec<OrdemItem>,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoverTarefa {
    pub lista_id: Uuid,
    #[validate(range(max = ORDEM_MAX, message = "ordem acima do limite"))]
    pub ordem: u32,
}
