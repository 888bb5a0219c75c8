// Wire contract of the calculation response.
//
// The dashboard and downstream storage depend on these exact field
// names (tributos.pis, tributos.icms.valor_st, difal.partilha, totais_*),
// carried over from the original upstream calculator. Every currency
// field here holds a display-rounded value produced by the formatter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// PIS/COFINS block: regime is echoed even when it zeroes the amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionValue {
    pub regime: String,
    pub aliquota: Option<Decimal>,
    pub base_calculo: Decimal,
    pub valor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpiValue {
    pub aliquota: Decimal,
    pub base_calculo: Decimal,
    pub valor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsValue {
    pub uf_origem: String,
    pub uf_destino: String,
    pub aliquota_interna_origem: Option<Decimal>,
    pub aliquota_interna_destino: Option<Decimal>,
    pub aliquota_interestadual: Option<Decimal>,
    pub base_calculo: Decimal,
    pub valor: Decimal,
    pub st_aplicavel: bool,
    pub mva: Option<Decimal>,
    pub base_calculo_st: Decimal,
    pub valor_st: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareValue {
    pub percentual: Decimal,
    pub valor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifalShares {
    pub origem: ShareValue,
    pub destino: ShareValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifalValue {
    pub aplicavel: bool,
    pub diferenca_aliquota: Decimal,
    pub base_calculo: Decimal,
    pub valor_total: Decimal,
    pub partilha: DifalShares,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcpValue {
    pub aplicavel: bool,
    pub aliquota: Decimal,
    pub base_calculo: Decimal,
    pub valor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTaxes {
    pub pis: ContributionValue,
    pub cofins: ContributionValue,
    pub ipi: IpiValue,
    pub icms: IcmsValue,
    pub difal: DifalValue,
    pub fcp: FcpValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTotalsValue {
    pub total_tributos_federais: Decimal,
    pub total_tributos_estaduais: Decimal,
    pub total_geral_tributos: Decimal,
    pub valor_total_item: Decimal,
    pub carga_tributaria_percentual: Decimal,
}

/// One fully-assessed invoice item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub numero_item: u32,
    pub codigo_produto: String,
    pub descricao: String,
    pub ncm: String,
    pub descricao_ncm: String,
    pub quantidade: Decimal,
    pub valor_unitario: Decimal,
    pub valor_base: Decimal,
    pub tributos: ItemTaxes,
    pub totais: ItemTotalsValue,
}

/// A per-item failure report; the rest of the invoice is still served
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemErrorResponse {
    pub numero_item: u32,
    pub codigo: String,
    pub erro: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceTotalsValue {
    pub quantidade_itens: usize,
    pub valor_produtos: Decimal,
    pub valor_pis: Decimal,
    pub valor_cofins: Decimal,
    pub valor_ipi: Decimal,
    pub valor_icms: Decimal,
    pub valor_icms_st: Decimal,
    pub valor_difal: Decimal,
    pub valor_fcp: Decimal,
    pub total_tributos: Decimal,
    pub total_nota_fiscal: Decimal,
    pub carga_tributaria_percentual: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub data_calculo: DateTime<Utc>,
    pub versao_calculo: String,
}

/// POST /notas/calcular response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub chave_nf: Option<String>,
    pub numero_nf: Option<String>,
    pub itens: Vec<ItemResponse>,
    pub totais_nota: InvoiceTotalsValue,
    pub erros: Vec<ItemErrorResponse>,
    pub processamento: ProcessingInfo,
}
