// src/db/store.rs

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Um item da tabela única: atributos planos, exatamente como gravados.
pub type Item = Map<String, Value>;

// Nomes dos atributos da chave primária da tabela.
pub const PK: &str = "PK";
pub const SK: &str = "SK";

/// Chave primária completa de um item (partition key + sort key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub pk: String,
    pub sk: String,
}

impl ItemKey {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self { pk: pk.into(), sk: sk.into() }
    }
}

/// Os quatro índices secundários globais da tabela.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexName {
    Gsi1,
    Gsi2,
    Gsi3,
    Gsi4,
}

impl IndexName {
    pub const ALL: [IndexName; 4] = [IndexName::Gsi1, IndexName::Gsi2, IndexName::Gsi3, IndexName::Gsi4];

    pub fn name(self) -> &'static str {
        match self {
            IndexName::Gsi1 => "GSI1",
            IndexName::Gsi2 => "GSI2",
            IndexName::Gsi3 => "GSI3",
            IndexName::Gsi4 => "GSI4",
        }
    }

    pub fn partition_attribute(self) -> &'static str {
        match self {
            IndexName::Gsi1 => "GSI1PK",
            IndexName::Gsi2 => "GSI2PK",
            IndexName::Gsi3 => "GSI3PK",
            IndexName::Gsi4 => "GSI4PK",
        }
    }

    pub fn sort_attribute(self) -> &'static str {
        match self {
            IndexName::Gsi1 => "GSI1SK",
            IndexName::Gsi2 => "GSI2SK",
            IndexName::Gsi3 => "GSI3SK",
            IndexName::Gsi4 => "GSI4SK",
        }
    }
}

/// Filtro aplicado depois da condição de chave (o `FilterExpression` do DynamoDB).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `#attr = :valor`
    Equals { attribute: String, value: Value },
    /// `contains(#attr, :valor)`: pertence à lista ou é substring.
    Contains { attribute: String, value: Value },
}

impl Filter {
    pub fn equals(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Equals { attribute: attribute.into(), value: value.into() }
    }

    pub fn contains(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Contains { attribute: attribute.into(), value: value.into() }
    }

    pub fn attribute(&self) -> &str {
        match self {
            Filter::Equals { attribute, .. } | Filter::Contains { attribute, .. } => attribute,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Filter::Equals { value, .. } | Filter::Contains { value, .. } => value,
        }
    }

    /// Avalia o filtro localmente, com a mesma semântica do DynamoDB.
    pub fn matches(&self, item: &Item) -> bool {
        let Some(current) = item.get(self.attribute()) else {
            return false;
        };
        match self {
            Filter::Equals { value, .. } => current == value,
            Filter::Contains { value, .. } => match (current, value) {
                (Value::Array(values), needle) => values.contains(needle),
                (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
                _ => false,
            },
        }
    }
}

/// Consulta por partição, na tabela ou num índice secundário.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub index: Option<IndexName>,
    pub partition_key: String,
    pub sort_key_prefix: Option<String>,
    pub filter: Option<Filter>,
}

impl Query {
    /// Consulta na chave primária da tabela.
    pub fn partition(partition_key: impl Into<String>) -> Self {
        Self {
            index: None,
            partition_key: partition_key.into(),
            sort_key_prefix: None,
            filter: None,
        }
    }

    /// Consulta num índice secundário.
    pub fn index(index: IndexName, partition_key: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            ..Self::partition(partition_key)
        }
    }

    pub fn begins_with(mut self, prefix: impl Into<String>) -> Self {
        self.sort_key_prefix = Some(prefix.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Atributos (partition, sort) que a condição de chave usa.
    pub fn key_attributes(&self) -> (&'static str, &'static str) {
        match self.index {
            Some(index) => (index.partition_attribute(), index.sort_attribute()),
            None => (PK, SK),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Falha na chamada ao banco: {0}")]
    Backend(String),

    #[error("Item inválido: {0}")]
    InvalidItem(String),
}

impl From<aws_sdk_dynamodb::error::BuildError> for StoreError {
    fn from(err: aws_sdk_dynamodb::error::BuildError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// As operações mínimas que as camadas de repositório consomem do banco.
///
/// A implementação é injetada em cada repositório, o que permite trocar o
/// DynamoDB por um [`MemoryStore`](super::MemoryStore) nos testes.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Grava (ou substitui por inteiro) um item.
    async fn put_item(&self, item: Item) -> Result<(), StoreError>;

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, StoreError>;

    /// Resultados em ordem crescente da sort key consultada, já paginados por completo.
    async fn query(&self, query: Query) -> Result<Vec<Item>, StoreError>;

    /// Não falha quando a chave não existe.
    async fn delete_item(&self, key: &ItemKey) -> Result<(), StoreError>;
}
