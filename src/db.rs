// src/db.rs

pub mod dynamo_store;
pub mod entity_keys;
pub mod error;
pub mod keys;
pub mod memory_store;
pub mod store;
pub mod table;

pub use dynamo_store::DynamoStore;
pub use error::RepositoryError;
pub use memory_store::MemoryStore;
pub use store::ItemStore;

pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod propriedade_repo;
pub use propriedade_repo::PropriedadeRepository;
pub mod projeto_repo;
pub use projeto_repo::ProjetoRepository;
pub mod documento_repo;
pub use documento_repo::DocumentoRepository;
pub mod oportunidade_repo;
pub use oportunidade_repo::OportunidadeRepository;
pub mod simulacao_repo;
pub use simulacao_repo::SimulacaoRepository;

pub mod quadro_repo;
pub use quadro_repo::QuadroRepository;
pub mod lista_repo;
pub use lista_repo::ListaRepository;
pub mod tarefa_repo;
pub use tarefa_repo::TarefaRepository;
