//! HTTP tests driving the axum router over the in-memory table.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use crm_credito_rural::config::AppState;
use crm_credito_rural::db::MemoryStore;
use crm_credito_rural::routes;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn setup() -> Router {
    routes::app(AppState::from_store(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: &str, uri: &str, tenant: Option<Uuid>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(tenant) = tenant {
        request = request.header("x-tenant-id", tenant.to_string());
    }
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn cliente_json() -> Value {
    json!({
        "nome": "João da Silva",
        "cpfCnpj": "123.456.789-00",
        "email": "joao@example.com",
        "municipio": "Sorriso",
        "uf": "MT"
    })
}

#[tokio::test]
async fn health_needs_no_tenant() {
    let app = setup();
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn tenant_header_is_required() {
    let app = setup();

    let (status, body) = send(&app, "GET", "/api/clientes", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "O cabeçalho X-Tenant-ID é obrigatório.");

    let request = Request::builder()
        .uri("/api/clientes")
        .header("x-tenant-id", "loja-1")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn client_crud_over_http() {
    let app = setup();
    let tenant = Uuid::new_v4();

    let (status, criado) = send(&app, "POST", "/api/clientes", Some(tenant), Some(cliente_json())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(criado["tipoPessoa"], "FISICA");
    let id = criado["id"].as_str().unwrap().to_string();

    let (status, lista) = send(&app, "GET", "/api/clientes", Some(tenant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lista.as_array().unwrap().len(), 1);

    let (_, outra) = send(&app, "GET", "/api/clientes", Some(Uuid::new_v4()), None).await;
    assert_eq!(outra, json!([]));

    let (status, por_cpf) = send(&app, "GET", "/api/clientes/cpf-cnpj/12345678900", Some(tenant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(por_cpf["id"], id.as_str());

    let (status, atualizado) = send(
        &app,
        "PATCH",
        &format!("/api/clientes/{id}"),
        Some(tenant),
        Some(json!({ "telefone": "(65) 3333-0000", "email": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(atualizado["telefone"], "(65) 3333-0000");
    assert_eq!(atualizado["email"], Value::Null);
    assert_eq!(atualizado["nome"], "João da Silva");

    let (status, body) = send(&app, "DELETE", &format!("/api/clientes/{id}"), Some(tenant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": true }));

    let (status, body) = send(&app, "GET", &format!("/api/clientes/{id}"), Some(tenant), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cliente não encontrado.");
}

#[tokio::test]
async fn invalid_payload_returns_field_details() {
    let app = setup();
    let (status, body) = send(
        &app,
        "POST",
        "/api/clientes",
        Some(Uuid::new_v4()),
        Some(json!({ "nome": "J", "cpfCnpj": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Um ou mais campos são inválidos.");
    assert!(body["details"]["nome"].is_array());
}

#[tokio::test]
async fn update_of_unknown_project_is_not_found() {
    let app = setup();
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/projetos/{}", Uuid::new_v4()),
        Some(Uuid::new_v4()),
        Some(json!({ "status": "Aprovado" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn projects_filter_by_status() {
    let app = setup();
    let tenant = Uuid::new_v4();
    let cliente_id = Uuid::new_v4();

    let (status, projeto) = send(
        &app,
        "POST",
        "/api/projetos",
        Some(tenant),
        Some(json!({
            "clienteId": cliente_id,
            "titulo": "Custeio soja",
            "linhaCredito": "Pronamp",
            "valorSolicitado": "350000.00",
            "status": "Em Análise"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(projeto["documentoIds"], json!([]));

    let (_, em_analise) = send(&app, "GET", "/api/projetos?status=Em%20An%C3%A1lise", Some(tenant), None).await;
    assert_eq!(em_analise.as_array().unwrap().len(), 1);

    let (_, aprovados) = send(&app, "GET", "/api/projetos?status=Aprovado", Some(tenant), None).await;
    assert_eq!(aprovados, json!([]));

    let (_, do_cliente) = send(&app, "GET", &format!("/api/clientes/{cliente_id}/projetos"), Some(tenant), None).await;
    assert_eq!(do_cliente[0]["id"], projeto["id"]);
}

#[tokio::test]
async fn kanban_flow_over_http() {
    let app = setup();
    let tenant = Uuid::new_v4();

    let (_, quadro) = send(&app, "POST", "/api/quadros", Some(tenant), Some(json!({ "nome": "Funil" }))).await;
    let quadro_id = quadro["id"].as_str().unwrap().to_string();

    let (_, l1) = send(&app, "POST", "/api/listas", Some(tenant), Some(json!({ "quadroId": quadro_id, "nome": "A fazer" }))).await;
    let (_, l2) = send(&app, "POST", "/api/listas", Some(tenant), Some(json!({ "quadroId": quadro_id, "nome": "Feito" }))).await;
    assert_eq!(l1["ordem"], 0);
    assert_eq!(l2["ordem"], 1);

    let (status, reordenadas) = send(
        &app,
        "PUT",
        &format!("/api/quadros/{quadro_id}/listas/ordem"),
        Some(tenant),
        Some(json!({ "itens": [{ "id": l1["id"], "ordem": 1 }, { "id": l2["id"], "ordem": 0 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reordenadas[0]["id"], l2["id"]);
    assert_eq!(reordenadas[1]["id"], l1["id"]);

    let (status, tarefa) = send(
        &app,
        "POST",
        "/api/tarefas",
        Some(tenant),
        Some(json!({
            "listaId": l1["id"],
            "quadroId": quadro_id,
            "titulo": "Coletar CAR",
            "etiquetas": ["pronaf"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tarefa["prioridade"], "Média");

    let (status, movida) = send(
        &app,
        "POST",
        &format!("/api/tarefas/{}/mover", tarefa["id"].as_str().unwrap()),
        Some(tenant),
        Some(json!({ "listaId": l2["id"], "ordem": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movida["listaId"], l2["id"]);

    let (_, da_lista) = send(&app, "GET", &format!("/api/listas/{}/tarefas", l2["id"].as_str().unwrap()), Some(tenant), None).await;
    assert_eq!(da_lista.as_array().unwrap().len(), 1);

    let (_, por_etiqueta) = send(&app, "GET", "/api/tarefas?etiqueta=pronaf", Some(tenant), None).await;
    assert_eq!(por_etiqueta.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/quadros/{quadro_id}/listas/ordem"),
        Some(tenant),
        Some(json!({ "itens": [{ "id": l1["id"], "ordem": 1_000_000 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calculator_returns_the_schedule_without_storing() {
    let app = setup();
    let tenant = Uuid::new_v4();

    let (status, resultado) = send(
        &app,
        "POST",
        "/api/simulacoes/calcular",
        Some(tenant),
        Some(json!({
            "valorFinanciado": "12000",
            "taxaJurosAnual": "12",
            "prazoMeses": 12,
            "sistemaAmortizacao": "SAC"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resultado["parcelas"].as_array().unwrap().len(), 12);

    let (_, simulacoes) = send(&app, "GET", "/api/simulacoes", Some(tenant), None).await;
    assert_eq!(simulacoes, json!([]));

    let (status, _) = send(
        &app,
        "POST",
        "/api/simulacoes/calcular",
        Some(tenant),
        Some(json!({
            "valorFinanciado": "0",
            "taxaJurosAnual": "12",
            "prazoMeses": 12,
            "sistemaAmortizacao": "PRICE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/simulacoes/calcular",
        Some(tenant),
        Some(json!({
            "valorFinanciado": "79000000000000000000000000000",
            "taxaJurosAnual": "120",
            "prazoMeses": 12,
            "sistemaAmortizacao": "SAC"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("precisão"));
}
