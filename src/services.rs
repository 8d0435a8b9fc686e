// src/services.rs

pub mod documento_service;
pub use documento_service::DocumentoService;
