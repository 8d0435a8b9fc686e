// src/db/entity_keys.rs
//
// Os pares de índice de cada entidade. Uma relação opcional só gera par
// quando presente: ao limpar a relação, o próximo `put` (que substitui o
// item inteiro) remove a entrada do índice.

use uuid::Uuid;

use super::keys::{entity_sk, normalize_cpf_cnpj, ordered_sk, tenant_scoped, IndexKey, StorageEntity};
use super::store::IndexName;
use crate::models::{
    cliente::Cliente,
    documento::Documento,
    kanban::{Lista, Quadro, Tarefa},
    oportunidade::Oportunidade,
    projeto::Projeto,
    propriedade::Propriedade,
    simulacao::Simulacao,
};

// Dimensões usadas nas partition keys dos índices.
pub const POR_CPF_CNPJ: &str = "CPFCNPJ";
pub const POR_CLIENTE: &str = "CLIENTE";
pub const POR_PROPRIEDADE: &str = "PROPRIEDADE";
pub const POR_PROJETO: &str = "PROJETO";
pub const POR_QUADRO: &str = "QUADRO";
pub const POR_LISTA: &str = "LISTA";
pub const POR_STATUS_PROJETO: &str = "STATUS_PROJETO";
pub const POR_STATUS_OPORTUNIDADE: &str = "STATUS_OPORTUNIDADE";
pub const POR_TIPO_DOCUMENTO: &str = "TIPO_DOCUMENTO";
pub const POR_LINHA_CREDITO: &str = "LINHA_CREDITO";

/// Índice de cada padrão de acesso, por entidade.
pub mod indices {
    use crate::db::store::IndexName;

    pub const CLIENTE_POR_CPF_CNPJ: IndexName = IndexName::Gsi1;
    pub const PROPRIEDADE_POR_CLIENTE: IndexName = IndexName::Gsi1;
    pub const PROJETO_POR_CLIENTE: IndexName = IndexName::Gsi1;
    pub const PROJETO_POR_PROPRIEDADE: IndexName = IndexName::Gsi2;
    pub const PROJETO_POR_STATUS: IndexName = IndexName::Gsi3;
    pub const DOCUMENTO_POR_CLIENTE: IndexName = IndexName::Gsi1;
    pub const DOCUMENTO_POR_TIPO: IndexName = IndexName::Gsi2;
    pub const DOCUMENTO_POR_PROJETO: IndexName = IndexName::Gsi3;
    pub const OPORTUNIDADE_POR_CLIENTE: IndexName = IndexName::Gsi1;
    pub const OPORTUNIDADE_POR_STATUS: IndexName = IndexName::Gsi2;
    pub const SIMULACAO_POR_CLIENTE: IndexName = IndexName::Gsi1;
    pub const SIMULACAO_POR_LINHA_CREDITO: IndexName = IndexName::Gsi2;
    pub const SIMULACAO_POR_PROJETO: IndexName = IndexName::Gsi3;
    pub const LISTA_POR_QUADRO: IndexName = IndexName::Gsi1;
    pub const TAREFA_POR_LISTA: IndexName = IndexName::Gsi1;
    pub const TAREFA_POR_CLIENTE: IndexName = IndexName::Gsi2;
    pub const TAREFA_POR_PROJETO: IndexName = IndexName::Gsi3;
    pub const TAREFA_POR_PROPRIEDADE: IndexName = IndexName::Gsi4;
}

use indices::*;

/// Par "filho por pai": partition do pai, sort igual à SK do filho.
fn by_parent(index: IndexName, tenant_id: Uuid, dimensao: &str, parent_id: Uuid, tipo: &str, id: Uuid) -> IndexKey {
    IndexKey::new(index, tenant_scoped(tenant_id, dimensao, parent_id), entity_sk(tipo, id))
}

fn optional_parent(
    index: IndexName,
    tenant_id: Uuid,
    dimensao: &str,
    parent_id: Option<Uuid>,
    tipo: &str,
    id: Uuid,
) -> Option<IndexKey> {
    parent_id.map(|parent_id| by_parent(index, tenant_id, dimensao, parent_id, tipo, id))
}

impl StorageEntity for Cliente {
    const TIPO: &'static str = "CLIENTE";
    const NOME: &'static str = "cliente";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        vec![IndexKey::new(
            CLIENTE_POR_CPF_CNPJ,
            tenant_scoped(tenant_id, POR_CPF_CNPJ, normalize_cpf_cnpj(&self.cpf_cnpj)),
            entity_sk(Self::TIPO, self.id),
        )]
    }
}

impl StorageEntity for Propriedade {
    const TIPO: &'static str = "PROPRIEDADE";
    const NOME: &'static str = "propriedade";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        vec![by_parent(PROPRIEDADE_POR_CLIENTE, tenant_id, POR_CLIENTE, self.cliente_id, Self::TIPO, self.id)]
    }
}

impl StorageEntity for Projeto {
    const TIPO: &'static str = "PROJETO";
    const NOME: &'static str = "projeto";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        let mut keys = vec![
            by_parent(PROJETO_POR_CLIENTE, tenant_id, POR_CLIENTE, self.cliente_id, Self::TIPO, self.id),
            IndexKey::new(
                PROJETO_POR_STATUS,
                tenant_scoped(tenant_id, POR_STATUS_PROJETO, self.status.as_str()),
                entity_sk(Self::TIPO, self.id),
            ),
        ];
        keys.extend(optional_parent(
            PROJETO_POR_PROPRIEDADE,
            tenant_id,
            POR_PROPRIEDADE,
            self.propriedade_id,
            Self::TIPO,
            self.id,
        ));
        keys
    }
}

impl StorageEntity for Documento {
    const TIPO: &'static str = "DOCUMENTO";
    const NOME: &'static str = "documento";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        let mut keys = vec![
            by_parent(DOCUMENTO_POR_CLIENTE, tenant_id, POR_CLIENTE, self.cliente_id, Self::TIPO, self.id),
            IndexKey::new(
                DOCUMENTO_POR_TIPO,
                tenant_scoped(tenant_id, POR_TIPO_DOCUMENTO, self.tipo.as_str()),
                entity_sk(Self::TIPO, self.id),
            ),
        ];
        keys.extend(optional_parent(
            DOCUMENTO_POR_PROJETO,
            tenant_id,
            POR_PROJETO,
            self.projeto_id,
            Self::TIPO,
            self.id,
        ));
        keys
    }
}

impl StorageEntity for Oportunidade {
    const TIPO: &'static str = "OPORTUNIDADE";
    const NOME: &'static str = "oportunidade";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        vec![
            by_parent(OPORTUNIDADE_POR_CLIENTE, tenant_id, POR_CLIENTE, self.cliente_id, Self::TIPO, self.id),
            IndexKey::new(
                OPORTUNIDADE_POR_STATUS,
                tenant_scoped(tenant_id, POR_STATUS_OPORTUNIDADE, self.status.as_str()),
                entity_sk(Self::TIPO, self.id),
            ),
        ]
    }
}

impl StorageEntity for Simulacao {
    const TIPO: &'static str = "SIMULACAO";
    const NOME: &'static str = "simulação";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        let mut keys = vec![
            by_parent(SIMULACAO_POR_CLIENTE, tenant_id, POR_CLIENTE, self.cliente_id, Self::TIPO, self.id),
            IndexKey::new(
                SIMULACAO_POR_LINHA_CREDITO,
                tenant_scoped(tenant_id, POR_LINHA_CREDITO, &self.linha_credito),
                entity_sk(Self::TIPO, self.id),
            ),
        ];
        keys.extend(optional_parent(
            SIMULACAO_POR_PROJETO,
            tenant_id,
            POR_PROJETO,
            self.projeto_id,
            Self::TIPO,
            self.id,
        ));
        keys
    }
}

impl StorageEntity for Quadro {
    const TIPO: &'static str = "QUADRO";
    const NOME: &'static str = "quadro";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, _tenant_id: Uuid) -> Vec<IndexKey> {
        Vec::new()
    }
}

impl StorageEntity for Lista {
    const TIPO: &'static str = "LISTA";
    const NOME: &'static str = "lista";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        vec![IndexKey::new(
            LISTA_POR_QUADRO,
            tenant_scoped(tenant_id, POR_QUADRO, self.quadro_id),
            ordered_sk(Self::TIPO, self.ordem, self.id),
        )]
    }
}

impl StorageEntity for Tarefa {
    const TIPO: &'static str = "TAREFA";
    const NOME: &'static str = "tarefa";

    fn id(&self) -> Uuid {
        self.id
    }

    fn index_keys(&self, tenant_id: Uuid) -> Vec<IndexKey> {
        let mut keys = vec![IndexKey::new(
            TAREFA_POR_LISTA,
            tenant_scoped(tenant_id, POR_LISTA, self.lista_id),
            ordered_sk(Self::TIPO, self.ordem, self.id),
        )];
        keys.extend(optional_parent(TAREFA_POR_CLIENTE, tenant_id, POR_CLIENTE, self.cliente_id, Self::TIPO, self.id));
        keys.extend(optional_parent(TAREFA_POR_PROJETO, tenant_id, POR_PROJETO, self.projeto_id, Self::TIPO, self.id));
        keys.extend(optional_parent(
            TAREFA_POR_PROPRIEDADE,
            tenant_id,
            POR_PROPRIEDADE,
            self.propriedade_id,
            Self::TIPO,
            self.id,
        ));
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::keys::{from_item, ordem_from_sk, to_item, TENANT_ID};
    use crate::models::cliente::TipoPessoa;
    use crate::models::documento::TipoDocumento;
    use crate::models::kanban::Prioridade;
    use crate::models::projeto::StatusProjeto;
    use crate::models::simulacao::SistemaAmortizacao;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde_json::Value;

    fn tenant() -> Uuid {
        Uuid::from_u128(0xA)
    }

    fn tarefa(cliente_id: Option<Uuid>) -> Tarefa {
        let agora = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Tarefa {
            id: Uuid::from_u128(1),
            lista_id: Uuid::from_u128(2),
            quadro_id: Uuid::from_u128(3),
            titulo: "Levantar CCIR".into(),
            descricao: None,
            ordem: 7,
            prioridade: Prioridade::Alta,
            data_vencimento: None,
            responsavel: Some("Ana".into()),
            etiquetas: vec!["pronaf".into()],
            concluida: false,
            cliente_id,
            projeto_id: None,
            propriedade_id: None,
            data_criacao: agora,
            data_atualizacao: agora,
        }
    }

    #[test]
    fn task_item_carries_primary_and_ordered_list_keys() {
        let item = to_item(&tarefa(None), tenant()).unwrap();

        assert_eq!(item["PK"], format!("TENANT#{}", tenant()));
        assert_eq!(item["SK"], format!("TAREFA#{}", Uuid::from_u128(1)));
        assert_eq!(item["GSI1PK"], format!("TENANT#{}#LISTA#{}", tenant(), Uuid::from_u128(2)));
        assert_eq!(ordem_from_sk(item["GSI1SK"].as_str().unwrap()), Some(7));
        assert_eq!(item[TENANT_ID], tenant().to_string());
        assert!(!item.contains_key("descricao"), "nulos não são gravados");
    }

    #[test]
    fn optional_relations_only_index_when_present() {
        let sem_cliente = to_item(&tarefa(None), tenant()).unwrap();
        assert!(!sem_cliente.contains_key("GSI2PK"));
        assert!(!sem_cliente.contains_key("GSI2SK"));

        let cliente = Uuid::from_u128(9);
        let com_cliente = to_item(&tarefa(Some(cliente)), tenant()).unwrap();
        assert_eq!(com_cliente["GSI2PK"], format!("TENANT#{}#CLIENTE#{cliente}", tenant()));
        assert!(!com_cliente.contains_key("GSI3PK"));
        assert!(!com_cliente.contains_key("GSI4PK"));
    }

    #[test]
    fn encoding_is_deterministic() {
        let t = tarefa(Some(Uuid::from_u128(9)));
        assert_eq!(to_item(&t, tenant()).unwrap(), to_item(&t, tenant()).unwrap());
    }

    #[test]
    fn task_round_trips_without_storage_attributes() {
        let original = tarefa(Some(Uuid::from_u128(9)));
        let item = to_item(&original, tenant()).unwrap();
        let back: Tarefa = from_item(item).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn client_is_indexed_by_document_digits() {
        let agora = Utc::now();
        let cliente = Cliente {
            id: Uuid::from_u128(5),
            nome: "Sítio Boa Vista".into(),
            cpf_cnpj: "123.456.789-00".into(),
            tipo_pessoa: TipoPessoa::Fisica,
            email: None,
            telefone: None,
            endereco: None,
            municipio: Some("Sorriso".into()),
            uf: Some("MT".into()),
            observacoes: None,
            data_criacao: agora,
            data_atualizacao: agora,
        };

        let item = to_item(&cliente, tenant()).unwrap();
        assert_eq!(item["GSI1PK"], format!("TENANT#{}#CPFCNPJ#12345678900", tenant()));
        assert_eq!(from_item::<Cliente>(item).unwrap(), cliente);
    }

    #[test]
    fn project_status_index_embeds_tenant_and_status() {
        let agora = Utc::now();
        let projeto = Projeto {
            id: Uuid::from_u128(6),
            cliente_id: Uuid::from_u128(5),
            propriedade_id: None,
            titulo: "Custeio soja 26/27".into(),
            linha_credito: "Pronamp Custeio".into(),
            valor_solicitado: Some(Decimal::new(35000000, 2)),
            status: StatusProjeto::EmAnalise,
            instituicao_financeira: None,
            descricao: None,
            documento_ids: vec![Uuid::from_u128(77)],
            data_criacao: agora,
            data_atualizacao: agora,
        };

        let item = to_item(&projeto, tenant()).unwrap();
        assert_eq!(item["GSI3PK"], format!("TENANT#{}#STATUS_PROJETO#Em Análise", tenant()));
        assert!(!item.contains_key("GSI2PK"));
        assert_eq!(from_item::<Projeto>(item).unwrap(), projeto);
    }

    #[test]
    fn document_and_simulation_round_trip() {
        let agora = Utc::now();
        let documento = Documento {
            id: Uuid::from_u128(11),
            cliente_id: Uuid::from_u128(5),
            projeto_id: Some(Uuid::from_u128(6)),
            nome: "car.pdf".into(),
            tipo: TipoDocumento::Car,
            url: Some("https://arquivos.exemplo/car.pdf".into()),
            tamanho_bytes: Some(204_800),
            mime_type: Some("application/pdf".into()),
            data_validade: None,
            observacoes: None,
            data_criacao: agora,
            data_atualizacao: agora,
        };
        let item = to_item(&documento, tenant()).unwrap();
        assert_eq!(item["GSI2PK"], format!("TENANT#{}#TIPO_DOCUMENTO#CAR", tenant()));
        assert!(item.contains_key("GSI3PK"));
        assert_eq!(from_item::<Documento>(item).unwrap(), documento);

        let simulacao = Simulacao {
            id: Uuid::from_u128(12),
            cliente_id: Uuid::from_u128(5),
            projeto_id: None,
            linha_credito: "Pronaf Mais Alimentos".into(),
            valor_financiado: Decimal::new(150_000, 0),
            taxa_juros_anual: Decimal::new(85, 1),
            prazo_meses: 84,
            carencia_meses: 12,
            sistema_amortizacao: SistemaAmortizacao::Sac,
            valor_primeira_parcela: Decimal::new(106_250, 2),
            valor_total_juros: Decimal::new(4_000_000, 2),
            valor_total_pago: Decimal::new(19_000_000, 2),
            observacoes: None,
            data_criacao: agora,
            data_atualizacao: agora,
        };
        let item = to_item(&simulacao, tenant()).unwrap();
        assert!(matches!(item["valorFinanciado"], Value::String(_)));
        assert_eq!(from_item::<Simulacao>(item).unwrap(), simulacao);
    }

    #[test]
    fn board_has_no_secondary_keys() {
        let agora = Utc::now();
        let quadro = Quadro {
            id: Uuid::from_u128(20),
            nome: "Operações".into(),
            descricao: None,
            cor: None,
            data_criacao: agora,
            data_atualizacao: agora,
        };
        let item = to_item(&quadro, tenant()).unwrap();
        assert!(item.keys().all(|k| !k.starts_with("GSI")));
        assert_eq!(from_item::<Quadro>(item).unwrap(), quadro);
    }
}
