// src/models/simulacao.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;
use crate::models::{apply, apply_nullable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SistemaAmortizacao {
    /// Amortização constante, parcelas decrescentes.
    Sac,
    /// Parcelas constantes (Tabela Price).
    Price,
}

/// Simulação de financiamento gravada para um cliente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulacao {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub projeto_id: Option<Uuid>,
    pub linha_credito: String,
    pub valor_financiado: Decimal,
    /// Taxa nominal anual, em % (8.5 = 8,5% a.a.).
    pub taxa_juros_anual: Decimal,
    pub prazo_meses: u32,
    pub carencia_meses: u32,
    pub sistema_amortizacao: SistemaAmortizacao,
    pub valor_primeira_parcela: Decimal,
    pub valor_total_juros: Decimal,
    pub valor_total_pago: Decimal,
    pub observacoes: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParametrosSimulacao {
    pub valor_financiado: Decimal,
    pub taxa_juros_anual: Decimal,
    #[validate(range(min = 1, max = 600, message = "O prazo vai de 1 a 600 meses"))]
    pub prazo_meses: u32,
    #[serde(default)]
    pub carencia_meses: u32,
    pub sistema_amortizacao: SistemaAmortizacao,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSimulacao {
    pub cliente_id: Uuid,
    pub projeto_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub linha_credito: String,
    pub valor_financiado: Decimal,
    pub taxa_juros_anual: Decimal,
    #[validate(range(min = 1, max = 600, message = "O prazo vai de 1 a 600 meses"))]
    pub prazo_meses: u32,
    #[serde(default)]
    pub carencia_meses: u32,
    pub sistema_amortizacao: SistemaAmortizacao,
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSimulacao {
    pub cliente_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    pub projeto_id: Option<Option<Uuid>>,
    #[validate(length(min = 1, message = "required"))]
    pub linha_credito: Option<String>,
    pub valor_financiado: Option<Decimal>,
    pub taxa_juros_anual: Option<Decimal>,
    #[validate(range(min = 1, max = 600, message = "O prazo vai de 1 a 600 meses"))]
    pub prazo_meses: Option<u32>,
    pub carencia_meses: Option<u32>,
    pub sistema_amortizacao: Option<SistemaAmortizacao>,
    #[serde(default, deserialize_with = "double_option")]
    pub observacoes: Option<Option<String>>,
}

impl CreateSimulacao {
    pub fn parametros(&self) -> ParametrosSimulacao {
        ParametrosSimulacao {
            valor_financiado: self.valor_financiado,
            taxa_juros_anual: self.taxa_juros_anual,
            prazo_meses: self.prazo_meses,
            carencia_meses: self.carencia_meses,
            sistema_amortizacao: self.sistema_amortizacao,
        }
    }
}

impl Simulacao {
    /// Calcula o resumo e monta a simulação. Falha com parâmetros inválidos.
    pub fn new(id: Uuid, input: CreateSimulacao, agora: DateTime<Utc>) -> Result<Self, SimulacaoError> {
        let resultado = calcular(&input.parametros())?;
        Ok(Self {
            id,
            cliente_id: input.cliente_id,
            projeto_id: input.projeto_id,
            linha_credito: input.linha_credito,
            valor_financiado: input.valor_financiado,
            taxa_juros_anual: input.taxa_juros_anual,
            prazo_meses: input.prazo_meses,
            carencia_meses: input.carencia_meses,
            sistema_amortizacao: input.sistema_amortizacao,
            valor_primeira_parcela: resultado.valor_primeira_parcela,
            valor_total_juros: resultado.valor_total_juros,
            valor_total_pago: resultado.valor_total_pago,
            observacoes: input.observacoes,
            data_criacao: agora,
            data_atualizacao: agora,
        })
    }

    pub fn parametros(&self) -> ParametrosSimulacao {
        ParametrosSimulacao {
            valor_financiado: self.valor_financiado,
            taxa_juros_anual: self.taxa_juros_anual,
            prazo_meses: self.prazo_meses,
            carencia_meses: self.carencia_meses,
            sistema_amortizacao: self.sistema_amortizacao,
        }
    }

    /// Aplica as mudanças e recalcula o resumo com os parâmetros resultantes.
    pub fn apply(&mut self, changes: UpdateSimulacao) -> Result<(), SimulacaoError> {
        apply(&mut self.cliente_id, changes.cliente_id);
        apply_nullable(&mut self.projeto_id, changes.projeto_id);
        apply(&mut self.linha_credito, changes.linha_credito);
        apply(&mut self.valor_financiado, changes.valor_financiado);
        apply(&mut self.taxa_juros_anual, changes.taxa_juros_anual);
        apply(&mut self.prazo_meses, changes.prazo_meses);
        apply(&mut self.carencia_meses, changes.carencia_meses);
        apply(&mut self.sistema_amortizacao, changes.sistema_amortizacao);
        apply_nullable(&mut self.observacoes, changes.observacoes);

        let resultado = calcular(&self.parametros())?;
        self.valor_primeira_parcela = resultado.valor_primeira_parcela;
        self.valor_total_juros = resultado.valor_total_juros;
        self.valor_total_pago = resultado.valor_total_pago;
        Ok(())
    }
}

// =========================================================================
//  CÁLCULO DAS PARCELAS
// =========================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulacaoError {
    #[error("O valor financiado deve ser maior que zero")]
    ValorInvalido,

    #[error("A taxa de juros não pode ser negativa")]
    TaxaInvalida,

    #[error("O prazo deve ser maior que a carência")]
    PrazoInvalido,

    #[error("Os parâmetros da simulação estouram a precisão do cálculo")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelaSimulada {
    pub numero: u32,
    pub amortizacao: Decimal,
    pub juros: Decimal,
    pub valor: Decimal,
    /// Saldo devedor depois do pagamento desta parcela.
    pub saldo_devedor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoSimulacao {
    pub valor_primeira_parcela: Decimal,
    pub valor_total_juros: Decimal,
    pub valor_total_pago: Decimal,
    pub parcelas: Vec<ParcelaSimulada>,
}

/// Gera o cronograma mensal. Durante a carência paga-se só os juros; a
/// taxa mensal é a anual nominal dividida por 12. Valores arredondados em
/// centavos, com a última parcela absorvendo o resíduo do arredondamento.
pub fn calcular(parametros: &ParametrosSimulacao) -> Result<ResultadoSimulacao, SimulacaoError> {
    let valor = parametros.valor_financiado;
    if valor <= Decimal::ZERO {
        return Err(SimulacaoError::ValorInvalido);
    }
    if parametros.taxa_juros_anual < Decimal::ZERO {
        return Err(SimulacaoError::TaxaInvalida);
    }
    if parametros.prazo_meses <= parametros.carencia_meses {
        return Err(SimulacaoError::PrazoInvalido);
    }

    let taxa_mensal = parametros.taxa_juros_anual / Decimal::ONE_HUNDRED / Decimal::from(12);
    let meses_amortizacao = parametros.prazo_meses - parametros.carencia_meses;
    let mut saldo = valor;
    let mut parcelas = Vec::with_capacity(parametros.prazo_meses as usize);

    for numero in 1..=parametros.carencia_meses {
        let juros = juros_do_mes(saldo, taxa_mensal)?;
        parcelas.push(ParcelaSimulada {
            numero,
            amortizacao: Decimal::ZERO,
            juros,
            valor: juros,
            saldo_devedor: saldo,
        });
    }

    let prestacao_fixa = match parametros.sistema_amortizacao {
        SistemaAmortizacao::Sac => None,
        SistemaAmortizacao::Price => Some(prestacao_price(valor, taxa_mensal, meses_amortizacao)?),
    };
    let amortizacao_sac = (valor / Decimal::from(meses_amortizacao)).round_dp(2);

    for k in 1..=meses_amortizacao {
        let juros = juros_do_mes(saldo, taxa_mensal)?;
        let amortizacao = if k == meses_amortizacao {
            saldo
        } else {
            match prestacao_fixa {
                Some(prestacao) => prestacao.checked_sub(juros).ok_or(SimulacaoError::Overflow)?,
                None => amortizacao_sac,
            }
        };
        saldo = saldo.checked_sub(amortizacao).ok_or(SimulacaoError::Overflow)?;
        parcelas.push(ParcelaSimulada {
            numero: parametros.carencia_meses + k,
            amortizacao,
            juros,
            valor: amortizacao.checked_add(juros).ok_or(SimulacaoError::Overflow)?,
            saldo_devedor: saldo,
        });
    }

    let valor_total_juros = somar(parcelas.iter().map(|p| p.juros))?;
    let valor_total_pago = somar(parcelas.iter().map(|p| p.valor))?;
    let valor_primeira_parcela = parcelas.first().map(|p| p.valor).unwrap_or_default();

    Ok(ResultadoSimulacao {
        valor_primeira_parcela,
        valor_total_juros,
        valor_total_pago,
        parcelas,
    })
}

fn juros_do_mes(saldo: Decimal, taxa_mensal: Decimal) -> Result<Decimal, SimulacaoError> {
    saldo
        .checked_mul(taxa_mensal)
        .map(|juros| juros.round_dp(2))
        .ok_or(SimulacaoError::Overflow)
}

fn somar(mut valores: impl Iterator<Item = Decimal>) -> Result<Decimal, SimulacaoError> {
    valores.try_fold(Decimal::ZERO, |total, v| total.checked_add(v).ok_or(SimulacaoError::Overflow))
}

fn prestacao_price(valor: Decimal, taxa: Decimal, meses: u32) -> Result<Decimal, SimulacaoError> {
    if taxa.is_zero() {
        return Ok((valor / Decimal::from(meses)).round_dp(2));
    }
    let base = Decimal::ONE + taxa;
    let mut fator = Decimal::ONE;
    for _ in 0..meses {
        fator = fator.checked_mul(base).ok_or(SimulacaoError::Overflow)?;
    }
    let prestacao = valor
        .checked_mul(taxa)
        .and_then(|v| v.checked_mul(fator))
        .and_then(|v| v.checked_div(fator - Decimal::ONE))
        .ok_or(SimulacaoError::Overflow)?;
    Ok(prestacao.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn parametros(sistema: SistemaAmortizacao, carencia: u32) -> ParametrosSimulacao {
        ParametrosSimulacao {
            valor_financiado: dec("12000"),
            taxa_juros_anual: dec("12"),
            prazo_meses: 12,
            carencia_meses: carencia,
            sistema_amortizacao: sistema,
        }
    }

    #[test]
    fn sac_has_constant_amortization() {
        let resultado = calcular(&parametros(SistemaAmortizacao::Sac, 0)).unwrap();

        assert_eq!(resultado.parcelas.len(), 12);
        assert_eq!(resultado.valor_primeira_parcela, dec("1120"));
        assert_eq!(resultado.valor_total_juros, dec("780"));
        assert_eq!(resultado.valor_total_pago, dec("12780"));
        assert!(resultado.parcelas.iter().all(|p| p.amortizacao == dec("1000")));
        assert_eq!(resultado.parcelas.last().unwrap().saldo_devedor, Decimal::ZERO);
    }

    #[test]
    fn grace_period_pays_interest_only() {
        let resultado = calcular(&parametros(SistemaAmortizacao::Sac, 2)).unwrap();

        assert_eq!(resultado.valor_primeira_parcela, dec("120"));
        assert_eq!(resultado.parcelas[1].saldo_devedor, dec("12000"));
        assert_eq!(resultado.parcelas[2].valor, dec("1320"));
        assert_eq!(resultado.valor_total_juros, dec("900"));
    }

    #[test]
    fn price_has_constant_installments() {
        let resultado = calcular(&parametros(SistemaAmortizacao::Price, 0)).unwrap();

        assert_eq!(resultado.valor_primeira_parcela, dec("1066.19"));
        for parcela in &resultado.parcelas[..11] {
            assert_eq!(parcela.valor, dec("1066.19"));
        }
        assert_eq!(resultado.parcelas.last().unwrap().saldo_devedor, Decimal::ZERO);
        let ultima = resultado.parcelas.last().unwrap().valor;
        assert!((ultima - dec("1066.19")).abs() < dec("0.10"));
    }

    #[test]
    fn zero_rate_price_splits_evenly() {
        let mut p = parametros(SistemaAmortizacao::Price, 0);
        p.taxa_juros_anual = Decimal::ZERO;
        let resultado = calcular(&p).unwrap();
        assert_eq!(resultado.valor_primeira_parcela, dec("1000"));
        assert_eq!(resultado.valor_total_juros, Decimal::ZERO);
    }

    #[test]
    fn huge_amounts_fail_with_overflow() {
        let mut p = parametros(SistemaAmortizacao::Sac, 0);
        p.valor_financiado = dec("79000000000000000000000000000");
        p.taxa_juros_anual = dec("120");
        assert_eq!(calcular(&p), Err(SimulacaoError::Overflow));

        p.valor_financiado = dec("100000");
        p.taxa_juros_anual = dec("79000000000000000000000000000");
        assert_eq!(calcular(&p), Err(SimulacaoError::Overflow));

        p.sistema_amortizacao = SistemaAmortizacao::Price;
        assert_eq!(calcular(&p), Err(SimulacaoError::Overflow));
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut p = parametros(SistemaAmortizacao::Sac, 12);
        assert_eq!(calcular(&p), Err(SimulacaoError::PrazoInvalido));

        p.carencia_meses = 0;
        p.valor_financiado = Decimal::ZERO;
        assert_eq!(calcular(&p), Err(SimulacaoError::ValorInvalido));

        p.valor_financiado = dec("100");
        p.taxa_juros_anual = dec("-1");
        assert_eq!(calcular(&p), Err(SimulacaoError::TaxaInvalida));
    }
}
