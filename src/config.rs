// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::{bail, Context};

use crate::{
    db::{
        ClienteRepository, DocumentoRepository, DynamoStore, ItemStore, ListaRepository, MemoryStore,
        OportunidadeRepository, ProjetoRepository, PropriedadeRepository, QuadroRepository,
        SimulacaoRepository, TarefaRepository,
    },
    services::DocumentoService,
};

pub const DEFAULT_TABLE: &str = "crm-credito-rural";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Onde os itens são gravados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(StoreBackend::DynamoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND inválido: {other} (use dynamodb ou memory)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub table: String,
    pub backend: StoreBackend,
    /// Endpoint alternativo, para o DynamoDB Local.
    pub endpoint: Option<String>,
    pub request_timeout: Duration,
    pub auto_create_table: bool,
    pub bind_addr: String,
}

impl Config {
    /// Lê a configuração das variáveis de ambiente (e do `.env`, se houver).
    /// A região e as credenciais ficam com a cadeia padrão da AWS.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::DynamoDb,
        };

        let timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS inválido: {value}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let auto_create_table = env::var("AUTO_CREATE_TABLE")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            table: env::var("DYNAMODB_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
            backend,
            endpoint: env::var("DYNAMODB_ENDPOINT").ok().filter(|value| !value.trim().is_empty()),
            request_timeout: Duration::from_secs(timeout_secs),
            auto_create_table,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub clientes: ClienteRepository,
    pub propriedades: PropriedadeRepository,
    pub projetos: ProjetoRepository,
    pub documentos: DocumentoRepository,
    pub oportunidades: OportunidadeRepository,
    pub simulacoes: SimulacaoRepository,
    pub quadros: QuadroRepository,
    pub listas: ListaRepository,
    pub tarefas: TarefaRepository,
    pub documento_service: DocumentoService,
}

impl AppState {
    /// Conecta ao banco configurado e monta os repositórios.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn ItemStore> = match config.backend {
            StoreBackend::DynamoDb => {
                let dynamo =
                    DynamoStore::connect(&config.table, config.endpoint.as_deref(), config.request_timeout).await;
                if config.auto_create_table {
                    dynamo
                        .ensure_table()
                        .await
                        .with_context(|| format!("Falha ao criar a tabela {}", config.table))?;
                }
                Arc::new(dynamo)
            }
            StoreBackend::Memory => {
                tracing::warn!("⚠️ Usando armazenamento em memória; os dados se perdem ao reiniciar");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::from_store(store))
    }

    /// Monta o gráfico de dependências sobre um banco já pronto.
    pub fn from_store(store: Arc<dyn ItemStore>) -> Self {
        let documentos = DocumentoRepository::new(store.clone());
        let projetos = ProjetoRepository::new(store.clone());
        let documento_service = DocumentoService::new(documentos.clone(), projetos.clone());

        Self {
            clientes: ClienteRepository::new(store.clone()),
            propriedades: PropriedadeRepository::new(store.clone()),
            projetos,
            documentos,
            oportunidades: OportunidadeRepository::new(store.clone()),
            simulacoes: SimulacaoRepository::new(store.clone()),
            quadros: QuadroRepository::new(store.clone()),
            listas: ListaRepository::new(store.clone()),
            tarefas: TarefaRepository::new(store),
            documento_service,
        }
    }
}
