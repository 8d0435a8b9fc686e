// src/common/serde_utils.rs

use serde::{Deserialize, Deserializer};

/// Distingue campo ausente de `null` nos payloads parciais.
///
/// Com `#[serde(default, deserialize_with = "double_option")]` num
/// `Option<Option<T>>`: ausente → `None` (mantém), `null` → `Some(None)`
/// (limpa), valor → `Some(Some(v))` (define).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        cliente_id: Option<Option<String>>,
    }

    #[test]
    fn three_states() {
        let ausente: Patch = serde_json::from_value(json!({})).unwrap();
        let nulo: Patch = serde_json::from_value(json!({ "clienteId": null })).unwrap();
        let valor: Patch = serde_json::from_value(json!({ "clienteId": "c1" })).unwrap();

        assert_eq!(ausente.cliente_id, None);
        assert_eq!(nulo.cliente_id, Some(None));
        assert_eq!(valor.cliente_id, Some(Some("c1".to_string())));
    }
}
