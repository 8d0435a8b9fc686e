// src/db/keys.rs
//
// Esquema de chaves da tabela única.
//
//   PK      = TENANT#<tenantId>
//   SK      = <TIPO>#<id>
//   GSInPK  = TENANT#<tenantId>#<DIMENSAO>#<valor>
//   GSInSK  = <TIPO>#<id>  ou  <TIPO>#<ordem com 6 dígitos>#<id> nas coleções ordenadas
//
// Toda partition key de índice carrega o tenant, então nenhuma consulta
// atravessa a fronteira entre tenants.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use super::store::{IndexName, Item, ItemKey, PK, SK};

/// Atributo plano com o tenant, duplicado fora da chave.
pub const TENANT_ID: &str = "tenantId";

/// Largura da ordem dentro das sort keys. Suporta ordens de 0 a 999 999.
pub const ORDEM_WIDTH: usize = 6;
pub const ORDEM_MAX: u32 = 999_999;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("não foi possível serializar o item: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("não foi possível ler o item: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("a entidade não serializa como objeto")]
    NotAnObject,
}

/// Um par de chaves de índice secundário.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexKey {
    pub index: IndexName,
    pub pk: String,
    pub sk: String,
}

impl IndexKey {
    pub fn new(index: IndexName, pk: String, sk: String) -> Self {
        Self { index, pk, sk }
    }
}

/// Uma entidade de domínio gravável na tabela única.
///
/// Cada tipo declara a sua etiqueta de `SK` e os pares de índice que
/// produz; `to_item` / `from_item` fazem o resto.
pub trait StorageEntity: Serialize + DeserializeOwned + Send + Sync {
    /// Prefixo da sort key (`CLIENTE`, `TAREFA`, ...).
    const TIPO: &'static str;
    /// Nome legível, usado nas mensagens de erro e nos logs.
    const NOME: &'static str;

    fn id(&self) -> Uuid;

    /// Pares de índice aplicáveis a esta instância. Relações opcionais
    /// ausentes não geram par.
    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey>;
}

pub fn tenant_pk(tenant_id: Uuid) -> String {
    format!("TENANT#{tenant_id}")
}

pub fn entity_sk(tipo: &str, id: Uuid) -> String {
    format!("{tipo}#{id}")
}

pub fn type_prefix(tipo: &str) -> String {
    format!("{tipo}#")
}

/// Partition key de índice, sempre prefixada pelo tenant.
pub fn tenant_scoped(tenant_id: Uuid, dimensao: &str, valor: impl std::fmt::Display) -> String {
    format!("TENANT#{tenant_id}#{dimensao}#{valor}")
}

pub fn pad_ordem(ordem: u32) -> String {
    format!("{ordem:0width$}", width = ORDEM_WIDTH)
}

/// Sort key de índice para coleções ordenadas.
pub fn ordered_sk(tipo: &str, ordem: u32, id: Uuid) -> String {
    format!("{tipo}#{}#{id}", pad_ordem(ordem))
}

/// Extrai a ordem embutida numa sort key ordenada (`LISTA#000003#<id>` → 3).
pub fn ordem_from_sk(sk: &str) -> Option<u32> {
    sk.split('#').nth(1)?.parse().ok()
}

/// CPF/CNPJ apenas com dígitos, para a chave de busca.
pub fn normalize_cpf_cnpj(documento: &str) -> String {
    documento.chars().filter(char::is_ascii_digit).collect()
}

pub fn item_key<E: StorageEntity>(tenant_id: Uuid, id: Uuid) -> ItemKey {
    ItemKey::new(tenant_pk(tenant_id), entity_sk(E::TIPO, id))
}

/// Atributos que só existem no armazenamento.
pub fn is_storage_attribute(name: &str) -> bool {
    name == PK
        || name == SK
        || name == TENANT_ID
        || IndexName::ALL
            .iter()
            .any(|index| name == index.partition_attribute() || name == index.sort_attribute())
}

/// Entidade → item: chaves primária e de índice, `tenantId` e atributos de
/// domínio planos. Valores nulos não são gravados.
pub fn to_item<E: StorageEntity>(entity: &E, tenant_id: Uuid) -> Result<Item, KeyError> {
    let Value::Object(attributes) = serde_json::to_value(entity).map_err(KeyError::Encode)? else {
        return Err(KeyError::NotAnObject);
    };

    let mut item = Item::new();
    item.insert(PK.into(), Value::String(tenant_pk(tenant_id)));
    item.insert(SK.into(), Value::String(entity_sk(E::TIPO, entity.id())));
    for key in entity.index_keys(tenant_id) {
        item.insert(key.index.partition_attribute().into(), Value::String(key.pk));
        item.insert(key.index.sort_attribute().into(), Value::String(key.sk));
    }
    item.insert(TENANT_ID.into(), Value::String(tenant_id.to_string()));

    for (name, value) in attributes {
        if !value.is_null() && !is_storage_attribute(&name) {
            item.insert(name, value);
        }
    }
    Ok(item)
}

/// Item → entidade, descartando os atributos de armazenamento.
pub fn from_item<E: StorageEntity>(mut item: Item) -> Result<E, KeyError> {
    item.retain(|name, _| !is_storage_attribute(name));
    serde_json::from_value(Value::Object(item)).map_err(KeyError::Decode)
}
