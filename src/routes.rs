// src/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{config::AppState, handlers};

/// Router completo da API. Todas as rotas, exceto `/api/health`, exigem o
/// cabeçalho `X-Tenant-ID`.
pub fn app(app_state: AppState) -> Router {
    let cliente_routes = Router::new()
        .route("/", get(handlers::clientes::list_clientes).post(handlers::clientes::create_cliente))
        .route("/cpf-cnpj/{documento}", get(handlers::clientes::get_cliente_by_cpf_cnpj))
        .route(
            "/{id}",
            get(handlers::clientes::get_cliente)
                .patch(handlers::clientes::update_cliente)
                .delete(handlers::clientes::delete_cliente),
        )
        .route("/{id}/propriedades", get(handlers::clientes::list_propriedades_do_cliente))
        .route("/{id}/projetos", get(handlers::clientes::list_projetos_do_cliente))
        .route("/{id}/documentos", get(handlers::clientes::list_documentos_do_cliente))
        .route("/{id}/oportunidades", get(handlers::clientes::list_oportunidades_do_cliente))
        .route("/{id}/simulacoes", get(handlers::clientes::list_simulacoes_do_cliente))
        .route("/{id}/tarefas", get(handlers::clientes::list_tarefas_do_cliente));

    let propriedade_routes = Router::new()
        .route(
            "/",
            get(handlers::propriedades::list_propriedades).post(handlers::propriedades::create_propriedade),
        )
        .route(
            "/{id}",
            get(handlers::propriedades::get_propriedade)
                .patch(handlers::propriedades::update_propriedade)
                .delete(handlers::propriedades::delete_propriedade),
        )
        .route("/{id}/projetos", get(handlers::propriedades::list_projetos_da_propriedade))
        .route("/{id}/tarefas", get(handlers::propriedades::list_tarefas_da_propriedade));

    let projeto_routes = Router::new()
        .route("/", get(handlers::projetos::list_projetos).post(handlers::projetos::create_projeto))
        .route(
            "/{id}",
            get(handlers::projetos::get_projeto)
                .patch(handlers::projetos::update_projeto)
                .delete(handlers::projetos::delete_projeto),
        )
        .route("/{id}/documentos", get(handlers::projetos::list_documentos_do_projeto))
        .route("/{id}/simulacoes", get(handlers::projetos::list_simulacoes_do_projeto))
        .route("/{id}/tarefas", get(handlers::projetos::list_tarefas_do_projeto));

    let documento_routes = Router::new()
        .route("/", get(handlers::documentos::list_documentos).post(handlers::documentos::create_documento))
        .route(
            "/{id}",
            get(handlers::documentos::get_documento)
                .patch(handlers::documentos::update_documento)
                .delete(handlers::documentos::delete_documento),
        );

    let oportunidade_routes = Router::new()
        .route(
            "/",
            get(handlers::oportunidades::list_oportunidades).post(handlers::oportunidades::create_oportunidade),
        )
        .route(
            "/{id}",
            get(handlers::oportunidades::get_oportunidade)
                .patch(handlers::oportunidades::update_oportunidade)
                .delete(handlers::oportunidades::delete_oportunidade),
        );

    let simulacao_routes = Router::new()
        .route("/", get(handlers::simulacoes::list_simulacoes).post(handlers::simulacoes::create_simulacao))
        .route("/calcular", post(handlers::simulacoes::calcular_simulacao))
        .route(
            "/{id}",
            get(handlers::simulacoes::get_simulacao)
                .patch(handlers::simulacoes::update_simulacao)
                .delete(handlers::simulacoes::delete_simulacao),
        );

    let quadro_routes = Router::new()
        .route("/", get(handlers::kanban::list_quadros).post(handlers::kanban::create_quadro))
        .route(
            "/{id}",
            get(handlers::kanban::get_quadro)
                .patch(handlers::kanban::update_quadro)
                .delete(handlers::kanban::delete_quadro),
        )
        .route("/{id}/listas", get(handlers::kanban::list_listas_do_quadro))
        .route("/{id}/listas/ordem", put(handlers::kanban::reordenar_listas))
        .route("/{id}/tarefas", get(handlers::kanban::list_tarefas_do_quadro));

    let lista_routes = Router::new()
        .route("/", get(handlers::kanban::list_listas).post(handlers::kanban::create_lista))
        .route(
            "/{id}",
            get(handlers::kanban::get_lista)
                .patch(handlers::kanban::update_lista)
                .delete(handlers::kanban::delete_lista),
        )
        .route("/{id}/tarefas", get(handlers::kanban::list_tarefas_da_lista))
        .route("/{id}/tarefas/ordem", put(handlers::kanban::reordenar_tarefas));

    let tarefa_routes = Router::new()
        .route("/", get(handlers::kanban::list_tarefas).post(handlers::kanban::create_tarefa))
        .route(
            "/{id}",
            get(handlers::kanban::get_tarefa)
                .patch(handlers::kanban::update_tarefa)
                .delete(handlers::kanban::delete_tarefa),
        )
        .route("/{id}/mover", post(handlers::kanban::mover_tarefa));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/clientes", cliente_routes)
        .nest("/api/propriedades", propriedade_routes)
        .nest("/api/projetos", projeto_routes)
        .nest("/api/documentos", documento_routes)
        .nest("/api/oportunidades", oportunidade_routes)
        .nest("/api/simulacoes", simulacao_routes)
        .nest("/api/quadros", quadro_routes)
        .nest("/api/listas", lista_routes)
        .nest("/api/tarefas", tarefa_routes)
        .with_state(app_state)
}
