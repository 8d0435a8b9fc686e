// src/db/memory_store.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::store::{Item, ItemKey, ItemStore, Query, StoreError, PK, SK};

/// Tabela única em memória, usada nos testes e em `STORE_BACKEND=memory`.
///
/// Reproduz a semântica que os repositórios esperam do DynamoDB: `put`
/// substitui o item inteiro, `delete` de chave inexistente não falha e as
/// consultas voltam ordenadas pela sort key do índice consultado.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<(String, String), Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

fn string_attribute<'a>(item: &'a Item, name: &str) -> Option<&'a str> {
    item.get(name).and_then(Value::as_str)
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        let pk = string_attribute(&item, PK)
            .ok_or_else(|| StoreError::InvalidItem(format!("atributo {PK} ausente")))?
            .to_string();
        let sk = string_attribute(&item, SK)
            .ok_or_else(|| StoreError::InvalidItem(format!("atributo {SK} ausente")))?
            .to_string();

        self.items.write().await.insert((pk, sk), item);
        Ok(())
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, StoreError> {
        let items = self.items.read().await;
        Ok(items.get(&(key.pk.clone(), key.sk.clone())).cloned())
    }

    async fn query(&self, query: Query) -> Result<Vec<Item>, StoreError> {
        let (pk_attr, sk_attr) = query.key_attributes();
        let items = self.items.read().await;

        let mut found: Vec<(String, String, Item)> = items
            .values()
            .filter(|item| string_attribute(item, pk_attr) == Some(query.partition_key.as_str()))
            .filter_map(|item| {
                // Itens sem a sort key do índice não aparecem no índice (índice esparso).
                let sort = string_attribute(item, sk_attr)?;
                if let Some(prefix) = &query.sort_key_prefix {
                    if !sort.starts_with(prefix.as_str()) {
                        return None;
                    }
                }
                let sk = string_attribute(item, SK).unwrap_or_default();
                Some((sort.to_string(), sk.to_string(), item.clone()))
            })
            .filter(|(_, _, item)| query.filter.as_ref().is_none_or(|filter| filter.matches(item)))
            .collect();

        found.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        Ok(found.into_iter().map(|(_, _, item)| item).collect())
    }

    async fn delete_item(&self, key: &ItemKey) -> Result<(), StoreError> {
        self.items.write().await.remove(&(key.pk.clone(), key.sk.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{Filter, IndexName};
    use serde_json::json;

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for value in [
            json!({ "PK": "TENANT#a", "SK": "LISTA#2", "GSI1PK": "TENANT#a#QUADRO#q", "GSI1SK": "LISTA#000002#2" }),
            json!({ "PK": "TENANT#a", "SK": "LISTA#1", "GSI1PK": "TENANT#a#QUADRO#q", "GSI1SK": "LISTA#000010#1" }),
            json!({ "PK": "TENANT#a", "SK": "QUADRO#q", "nome": "Funil" }),
            json!({ "PK": "TENANT#b", "SK": "LISTA#3", "GSI1PK": "TENANT#b#QUADRO#q", "GSI1SK": "LISTA#000001#3" }),
        ] {
            store.put_item(item(value)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn query_by_partition_and_prefix() {
        let store = seeded().await;

        let listas = store.query(Query::partition("TENANT#a").begins_with("LISTA#")).await.unwrap();
        let sks: Vec<_> = listas.iter().map(|i| i["SK"].as_str().unwrap()).collect();
        assert_eq!(sks, ["LISTA#1", "LISTA#2"]);

        let tudo = store.query(Query::partition("TENANT#a")).await.unwrap();
        assert_eq!(tudo.len(), 3);
    }

    #[tokio::test]
    async fn index_query_is_sorted_by_index_sort_key_and_sparse() {
        let store = seeded().await;

        let listas = store
            .query(Query::index(IndexName::Gsi1, "TENANT#a#QUADRO#q"))
            .await
            .unwrap();
        let sks: Vec<_> = listas.iter().map(|i| i["SK"].as_str().unwrap()).collect();
        assert_eq!(sks, ["LISTA#2", "LISTA#1"]);

        let nada = store.query(Query::index(IndexName::Gsi2, "TENANT#a")).await.unwrap();
        assert!(nada.is_empty());
    }

    #[tokio::test]
    async fn filter_is_applied_after_key_condition() {
        let store = seeded().await;

        let funil = store
            .query(Query::partition("TENANT#a").filter(Filter::equals("nome", "Funil")))
            .await
            .unwrap();
        assert_eq!(funil.len(), 1);
        assert_eq!(funil[0]["SK"], "QUADRO#q");
    }

    #[tokio::test]
    async fn put_replaces_and_delete_is_idempotent() {
        let store = seeded().await;
        let key = ItemKey::new("TENANT#a", "QUADRO#q");

        store
            .put_item(item(json!({ "PK": "TENANT#a", "SK": "QUADRO#q", "cor": "verde" })))
            .await
            .unwrap();
        let atual = store.get_item(&key).await.unwrap().unwrap();
        assert!(atual.get("nome").is_none());
        assert_eq!(atual["cor"], "verde");

        store.delete_item(&key).await.unwrap();
        store.delete_item(&key).await.unwrap();
        assert!(store.get_item(&key).await.unwrap().is_none());
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn rejects_items_without_primary_key() {
        let store = MemoryStore::new();
        let err = store.put_item(item(json!({ "PK": "TENANT#a" }))).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidItem(_)));
        assert!(store.is_empty().await);
    }
}
