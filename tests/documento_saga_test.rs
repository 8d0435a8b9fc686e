//! Integration tests for the document <-> project linkage kept by
//! `DocumentoService`.

use std::sync::Arc;

use crm_credito_rural::db::{DocumentoRepository, MemoryStore, ProjetoRepository};
use crm_credito_rural::models::documento::{CreateDocumento, TipoDocumento, UpdateDocumento};
use crm_credito_rural::models::projeto::{CreateProjeto, Projeto};
use crm_credito_rural::services::DocumentoService;
use uuid::Uuid;

struct Ctx {
    documentos: DocumentoRepository,
    projetos: ProjetoRepository,
    service: DocumentoService,
}

fn setup() -> Ctx {
    let store = Arc::new(MemoryStore::new());
    let documentos = DocumentoRepository::new(store.clone());
    let projetos = ProjetoRepository::new(store);
    Ctx {
        service: DocumentoService::new(documentos.clone(), projetos.clone()),
        documentos,
        projetos,
    }
}

async fn projeto(ctx: &Ctx, tenant: Uuid, cliente_id: Uuid) -> Projeto {
    ctx.projetos
        .create(
            tenant,
            CreateProjeto {
                cliente_id,
                propriedade_id: None,
                titulo: "Investimento em armazém".into(),
                linha_credito: "Inovagro".into(),
                valor_solicitado: None,
                status: None,
                instituicao_financeira: None,
                descricao: None,
            },
        )
        .await
        .unwrap()
}

fn novo_documento(cliente_id: Uuid, projeto_id: Option<Uuid>, tipo: TipoDocumento) -> CreateDocumento {
    CreateDocumento {
        cliente_id,
        projeto_id,
        nome: "matricula-fazenda.pdf".into(),
        tipo,
        url: Some("https://arquivos.example.com/matricula-fazenda.pdf".into()),
        tamanho_bytes: Some(248_331),
        mime_type: Some("application/pdf".into()),
        data_validade: None,
        observacoes: None,
    }
}

async fn documento_ids(ctx: &Ctx, tenant: Uuid, projeto_id: Uuid) -> Vec<Uuid> {
    ctx.projetos.get_by_id(tenant, projeto_id).await.unwrap().unwrap().documento_ids
}

#[tokio::test]
async fn creating_a_document_links_it_to_the_project() {
    let ctx = setup();
    let tenant = Uuid::new_v4();
    let cliente_id = Uuid::new_v4();
    let p1 = projeto(&ctx, tenant, cliente_id).await;
    assert!(p1.documento_ids.is_empty());

    let doc = ctx
        .service
        .create(tenant, novo_documento(cliente_id, Some(p1.id), TipoDocumento::Matricula))
        .await
        .unwrap();

    assert_eq!(documento_ids(&ctx, tenant, p1.id).await, vec![doc.id]);
    assert_eq!(ctx.documentos.list_by_projeto(tenant, p1.id).await.unwrap(), vec![doc.clone()]);
    assert_eq!(ctx.documentos.list_by_parent(tenant, cliente_id).await.unwrap(), vec![doc]);
}

#[tokio::test]
async fn moving_a_document_updates_both_projects() {
    let ctx = setup();
    let tenant = Uuid::new_v4();
    let cliente_id = Uuid::new_v4();
    let p1 = projeto(&ctx, tenant, cliente_id).await;
    let p2 = projeto(&ctx, tenant, cliente_id).await;

    let doc = ctx
        .service
        .create(tenant, novo_documento(cliente_id, Some(p1.id), TipoDocumento::Car))
        .await
        .unwrap();

    let movido = ctx
        .service
        .update(
            tenant,
            doc.id,
            UpdateDocumento {
                projeto_id: Some(Some(p2.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(movido.projeto_id, Some(p2.id));
    assert!(documento_ids(&ctx, tenant, p1.id).await.is_empty());
    assert_eq!(documento_ids(&ctx, tenant, p2.id).await, vec![doc.id]);

    ctx.service
        .update(
            tenant,
            doc.id,
            UpdateDocumento {
                projeto_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(documento_ids(&ctx, tenant, p2.id).await.is_empty());
    assert!(ctx.documentos.list_by_projeto(tenant, p2.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_document_unlinks_it() {
    let ctx = setup();
    let tenant = Uuid::new_v4();
    let cliente_id = Uuid::new_v4();
    let p1 = projeto(&ctx, tenant, cliente_id).await;

    let doc = ctx
        .service
        .create(tenant, novo_documento(cliente_id, Some(p1.id), TipoDocumento::Ccir))
        .await
        .unwrap();
    let outro = ctx
        .service
        .create(tenant, novo_documento(cliente_id, Some(p1.id), TipoDocumento::Itr))
        .await
        .unwrap();

    assert!(ctx.service.delete(tenant, doc.id).await.unwrap());
    assert_eq!(documento_ids(&ctx, tenant, p1.id).await, vec![outro.id]);
    assert!(ctx.documentos.get_by_id(tenant, doc.id).await.unwrap().is_none());

    // Excluir de novo não falha nem mexe no projeto.
    assert!(ctx.service.delete(tenant, doc.id).await.unwrap());
    assert_eq!(documento_ids(&ctx, tenant, p1.id).await, vec![outro.id]);
}

#[tokio::test]
async fn missing_project_does_not_block_the_document() {
    let ctx = setup();
    let tenant = Uuid::new_v4();
    let cliente_id = Uuid::new_v4();
    let inexistente = Uuid::new_v4();

    let doc = ctx
        .service
        .create(tenant, novo_documento(cliente_id, Some(inexistente), TipoDocumento::Contrato))
        .await
        .unwrap();

    assert_eq!(ctx.documentos.get_by_id(tenant, doc.id).await.unwrap(), Some(doc));
    assert!(ctx.projetos.get_by_id(tenant, inexistente).await.unwrap().is_none());
}

#[tokio::test]
async fn documents_are_queryable_by_type() {
    let ctx = setup();
    let tenant = Uuid::new_v4();
    let cliente_id = Uuid::new_v4();

    let car = ctx.service.create(tenant, novo_documento(cliente_id, None, TipoDocumento::Car)).await.unwrap();
    ctx.service.create(tenant, novo_documento(cliente_id, None, TipoDocumento::Rg)).await.unwrap();

    assert_eq!(ctx.documentos.list_by_tipo(tenant, TipoDocumento::Car).await.unwrap(), vec![car]);
    assert!(ctx.documentos.list_by_tipo(tenant, TipoDocumento::Caf).await.unwrap().is_empty());
    assert!(ctx.documentos.list_by_tipo(Uuid::new_v4(), TipoDocumento::Car).await.unwrap().is_empty());
}
