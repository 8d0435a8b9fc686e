// src/db/dynamo_store.rs

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, GlobalSecondaryIndex, KeySchemaElement,
    KeyType, Projection, ProjectionType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use serde_json::{Number, Value};

use super::store::{Filter, IndexName, Item, ItemKey, ItemStore, Query, StoreError, PK, SK};

/// [`ItemStore`] sobre o DynamoDB (ou DynamoDB Local, via endpoint).
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self { client, table: table.into() }
    }

    /// Monta o cliente a partir da cadeia padrão de credenciais da AWS.
    ///
    /// Toda operação fica limitada por `timeout`; ao estourar, a chamada
    /// falha e o erro sobe como [`StoreError::Backend`].
    pub async fn connect(table: &str, endpoint: Option<&str>, timeout: Duration) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(table, endpoint = ?endpoint, "✅ Cliente DynamoDB configurado");
        Self::new(Client::new(&sdk_config), table)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Cria a tabela (PK/SK + GSI1..GSI4, sob demanda) caso ainda não exista.
    /// Pensado para o DynamoDB Local; em produção a tabela vem da infraestrutura.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        match self.client.describe_table().table_name(&self.table).send().await {
            Ok(_) => {
                tracing::info!(table = %self.table, "Tabela já existe");
                return Ok(());
            }
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception());
                if !not_found {
                    return Err(backend_error(err));
                }
            }
        }

        let mut key_attributes = vec![PK, SK];
        for index in IndexName::ALL {
            key_attributes.push(index.partition_attribute());
            key_attributes.push(index.sort_attribute());
        }

        let mut request = self
            .client
            .create_table()
            .table_name(&self.table)
            .billing_mode(BillingMode::PayPerRequest)
            .key_schema(key_element(PK, KeyType::Hash)?)
            .key_schema(key_element(SK, KeyType::Range)?);

        for name in key_attributes {
            request = request.attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(name)
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            );
        }

        for index in IndexName::ALL {
            request = request.global_secondary_indexes(
                GlobalSecondaryIndex::builder()
                    .index_name(index.name())
                    .key_schema(key_element(index.partition_attribute(), KeyType::Hash)?)
                    .key_schema(key_element(index.sort_attribute(), KeyType::Range)?)
                    .projection(Projection::builder().projection_type(ProjectionType::All).build())
                    .build()?,
            );
        }

        request.send().await.map_err(backend_error)?;
        tracing::info!(table = %self.table, "✅ Tabela criada");
        Ok(())
    }
}

fn key_element(name: &str, key_type: KeyType) -> Result<KeySchemaElement, StoreError> {
    Ok(KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()?)
}

fn backend_error<E>(err: E) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::Backend(DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        tracing::debug!(table = %self.table, pk = ?item.get(PK), sk = ?item.get(SK), "PutItem");
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_attribute_map(item)))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, StoreError> {
        tracing::debug!(table = %self.table, pk = %key.pk, sk = %key.sk, "GetItem");
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(PK, AttributeValue::S(key.pk.clone()))
            .key(SK, AttributeValue::S(key.sk.clone()))
            .consistent_read(true)
            .send()
            .await
            .map_err(backend_error)?;

        output.item().map(from_attribute_map).transpose()
    }

    async fn query(&self, query: Query) -> Result<Vec<Item>, StoreError> {
        tracing::debug!(table = %self.table, ?query, "Query");
        let (pk_attr, sk_attr) = query.key_attributes();

        let mut key_condition = String::from("#pk = :pk");
        let mut request = self
            .client
            .query()
            .table_name(&self.table)
            .expression_attribute_names("#pk", pk_attr)
            .expression_attribute_values(":pk", AttributeValue::S(query.partition_key.clone()));

        if let Some(index) = query.index {
            request = request.index_name(index.name());
        }
        if let Some(prefix) = &query.sort_key_prefix {
            key_condition.push_str(" AND begins_with(#sk, :sk)");
            request = request
                .expression_attribute_names("#sk", sk_attr)
                .expression_attribute_values(":sk", AttributeValue::S(prefix.clone()));
        }
        if let Some(filter) = &query.filter {
            let expression = match filter {
                Filter::Equals { .. } => "#f = :f",
                Filter::Contains { .. } => "contains(#f, :f)",
            };
            request = request
                .filter_expression(expression)
                .expression_attribute_names("#f", filter.attribute())
                .expression_attribute_values(":f", to_attribute(filter.value().clone()));
        }

        let mut pages = request
            .key_condition_expression(key_condition)
            .scan_index_forward(true)
            .into_paginator()
            .send();

        let mut items = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(backend_error)?;
            for item in page.items() {
                items.push(from_attribute_map(item)?);
            }
        }
        Ok(items)
    }

    async fn delete_item(&self, key: &ItemKey) -> Result<(), StoreError> {
        tracing::debug!(table = %self.table, pk = %key.pk, sk = %key.sk, "DeleteItem");
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(PK, AttributeValue::S(key.pk.clone()))
            .key(SK, AttributeValue::S(key.sk.clone()))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

// =========================================================================
//  CONVERSÃO JSON <-> AttributeValue
// =========================================================================

pub(crate) fn to_attribute_map(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter().map(|(name, value)| (name, to_attribute(value))).collect()
}

pub(crate) fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.into_iter().map(|(name, value)| (name, to_attribute(value))).collect(),
        ),
    }
}

pub(crate) fn from_attribute_map(map: &HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    map.iter()
        .map(|(name, value)| Ok((name.clone(), from_attribute(value)?)))
        .collect()
}

pub(crate) fn from_attribute(value: &AttributeValue) -> Result<Value, StoreError> {
    Ok(match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => parse_number(n)?,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(values.iter().map(from_attribute).collect::<Result<_, _>>()?),
        AttributeValue::M(map) => Value::Object(from_attribute_map(map)?),
        AttributeValue::Ss(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(values.iter().map(|n| parse_number(n)).collect::<Result<_, _>>()?),
        other => {
            return Err(StoreError::InvalidItem(format!("tipo de atributo não suportado: {other:?}")));
        }
    })
}

fn parse_number(raw: &str) -> Result<Value, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Value::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StoreError::InvalidItem(format!("número inválido: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_nested_values_both_ways() {
        let original = json!({
            "PK": "TENANT#t",
            "ordem": 3,
            "areaHectares": "120.5",
            "concluida": false,
            "etiquetas": ["pronaf", "custeio"],
            "endereco": { "cep": "78000-000", "numero": 10 },
        });
        let item = original.as_object().cloned().unwrap();

        let attributes = to_attribute_map(item.clone());
        assert_eq!(attributes["ordem"], AttributeValue::N("3".into()));
        assert!(matches!(attributes["etiquetas"], AttributeValue::L(_)));

        let back = from_attribute_map(&attributes).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn reads_string_and_number_sets_as_arrays() {
        let value = from_attribute(&AttributeValue::Ss(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(value, json!(["a", "b"]));

        let value = from_attribute(&AttributeValue::Ns(vec!["1".into(), "2.5".into()])).unwrap();
        assert_eq!(value, json!([1, 2.5]));
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(from_attribute(&AttributeValue::N("abc".into())).is_err());
    }
}
