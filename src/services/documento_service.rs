// src/services/documento_service.rs

use uuid::Uuid;

use crate::{
    db::{DocumentoRepository, ProjetoRepository, RepositoryError},
    models::documento::{CreateDocumento, Documento, UpdateDocumento},
};

/// Mantém `Projeto.documentoIds` em sincronia com o `projetoId` dos documentos.
///
/// Cada passo é uma gravação isolada. A gravação do documento é a que
/// conta: se o ajuste no projeto falhar depois dela, o erro é apenas
/// logado e o vínculo fica inconsistente até a próxima alteração.
#[derive(Clone)]
pub struct DocumentoService {
    documentos: DocumentoRepository,
    projetos: ProjetoRepository,
}

impl DocumentoService {
    pub fn new(documentos: DocumentoRepository, projetos: ProjetoRepository) -> Self {
        Self { documentos, projetos }
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreateDocumento) -> Result<Documento, RepositoryError> {
        let documento = self.documentos.create(tenant_id, input).await?;

        if let Some(projeto_id) = documento.projeto_id {
            self.vincular(tenant_id, projeto_id, documento.id).await;
        }
        Ok(documento)
    }

    /// Quando o documento troca de projeto, sai da lista do antigo e entra
    /// na do novo.
    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        changes: UpdateDocumento,
    ) -> Result<Option<Documento>, RepositoryError> {
        let Some(anterior) = self.documentos.get_by_id(tenant_id, id).await? else {
            return Ok(None);
        };
        let Some(documento) = self.documentos.update(tenant_id, id, changes).await? else {
            return Ok(None);
        };

        if anterior.projeto_id != documento.projeto_id {
            if let Some(projeto_id) = anterior.projeto_id {
                self.desvincular(tenant_id, projeto_id, id).await;
            }
            if let Some(projeto_id) = documento.projeto_id {
                self.vincular(tenant_id, projeto_id, id).await;
            }
        }
        Ok(Some(documento))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let documento = self.documentos.get_by_id(tenant_id, id).await?;
        let deleted = self.documentos.delete(tenant_id, id).await?;

        if let Some(projeto_id) = documento.and_then(|d| d.projeto_id) {
            self.desvincular(tenant_id, projeto_id, id).await;
        }
        Ok(deleted)
    }

    async fn vincular(&self, tenant_id: Uuid, projeto_id: Uuid, documento_id: Uuid) {
        match self.projetos.attach_documento(tenant_id, projeto_id, documento_id).await {
            Ok(Some(_)) => {
                tracing::debug!(%tenant_id, %projeto_id, %documento_id, "Documento vinculado ao projeto");
            }
            Ok(None) => {
                tracing::warn!(%tenant_id, %projeto_id, %documento_id, "Projeto não encontrado, vínculo ignorado");
            }
            Err(e) => {
                tracing::warn!(%tenant_id, %projeto_id, %documento_id, error = %e, "Falha ao vincular documento ao projeto");
            }
        }
    }

    async fn desvincular(&self, tenant_id: Uuid, projeto_id: Uuid, documento_id: Uuid) {
        match self.projetos.detach_documento(tenant_id, projeto_id, documento_id).await {
            Ok(Some(_)) => {
                tracing::debug!(%tenant_id, %projeto_id, %documento_id, "Documento desvinculado do projeto");
            }
            Ok(None) => {
                tracing::warn!(%tenant_id, %projeto_id, %documento_id, "Projeto não encontrado ao desvincular documento");
            }
            Err(e) => {
                tracing::warn!(%tenant_id, %projeto_id, %documento_id, error = %e, "Falha ao desvincular documento do projeto");
            }
        }
    }
}
