//! Output-boundary formatting.
//!
//! Maps unrounded assessments into the wire DTOs, rounding every
//! currency field (and the burden percentages) to 2 decimal places,
//! half-up. The unrounded values held by the calculator and aggregator
//! are never fed back from here; this is strictly a one-way boundary.

use chrono::Utc;

use crate::core::money::round_display;
use crate::modules::taxes::models::{
    CalculationResponse, ContributionValue, DifalShares, DifalValue, FcpValue, IcmsValue,
    InvoiceTotals, InvoiceTotalsValue, IpiValue, ItemAssessment, ItemError, ItemErrorResponse,
    ItemResponse, ItemTaxes, ItemTotalsValue, ProcessingInfo, ShareValue,
};

/// Rounds results into the stable wire contract
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format one assessed item for presentation/storage
    pub fn format_item(&self, assessment: &ItemAssessment) -> ItemResponse {
        let item = &assessment.item;
        let breakdown = &assessment.breakdown;
        let totals = &assessment.totals;

        ItemResponse {
            numero_item: item.item_number,
            codigo_produto: item.product_code.clone(),
            descricao: item.description.clone(),
            ncm: item.ncm.clone(),
            descricao_ncm: assessment.ncm_description.clone(),
            quantidade: item.quantity,
            valor_unitario: item.unit_price,
            valor_base: round_display(item.base_value),
            tributos: ItemTaxes {
                pis: ContributionValue {
                    regime: breakdown.pis.regime.to_string(),
                    aliquota: breakdown.pis.rate,
                    base_calculo: round_display(breakdown.pis.base),
                    valor: round_display(breakdown.pis.amount),
                },
                cofins: ContributionValue {
                    regime: breakdown.cofins.regime.to_string(),
                    aliquota: breakdown.cofins.rate,
                    base_calculo: round_display(breakdown.cofins.base),
                    valor: round_display(breakdown.cofins.amount),
                },
                ipi: IpiValue {
                    aliquota: breakdown.ipi.rate,
                    base_calculo: round_display(breakdown.ipi.base),
                    valor: round_display(breakdown.ipi.amount),
                },
                icms: IcmsValue {
                    uf_origem: breakdown.icms.origin_state.clone(),
                    uf_destino: breakdown.icms.dest_state.clone(),
                    aliquota_interna_origem: breakdown.icms.internal_rate_origin,
                    aliquota_interna_destino: breakdown.icms.internal_rate_dest,
                    aliquota_interestadual: breakdown.icms.interstate_rate,
                    base_calculo: round_display(breakdown.icms.base),
                    valor: round_display(breakdown.icms.amount),
                    st_aplicavel: breakdown.icms.substitution_applicable,
                    mva: breakdown.icms.substitution_margin,
                    base_calculo_st: round_display(breakdown.icms.substitution_base),
                    valor_st: round_display(breakdown.icms.substitution_amount),
                },
                difal: DifalValue {
                    aplicavel: breakdown.difal.applicable,
                    diferenca_aliquota: breakdown.difal.rate_diff,
                    base_calculo: round_display(breakdown.difal.base),
                    valor_total: round_display(breakdown.difal.total),
                    partilha: DifalShares {
                        origem: ShareValue {
                            percentual: breakdown.difal.origin_share_pct,
                            valor: round_display(breakdown.difal.origin_share),
                        },
                        destino: ShareValue {
                            percentual: breakdown.difal.dest_share_pct,
                            valor: round_display(breakdown.difal.dest_share),
                        },
                    },
                },
                fcp: FcpValue {
                    aplicavel: breakdown.fcp.applicable,
                    aliquota: breakdown.fcp.rate,
                    base_calculo: round_display(breakdown.fcp.base),
                    valor: round_display(breakdown.fcp.amount),
                },
            },
            totais: ItemTotalsValue {
                total_tributos_federais: round_display(totals.federal_total),
                total_tributos_estaduais: round_display(totals.state_total),
                total_geral_tributos: round_display(totals.tax_total),
                valor_total_item: round_display(totals.item_total_value),
                carga_tributaria_percentual: round_display(totals.tax_burden_pct),
            },
        }
    }

    pub fn format_item_error(&self, failure: &ItemError) -> ItemErrorResponse {
        ItemErrorResponse {
            numero_item: failure.item_number,
            codigo: failure.code.to_string(),
            erro: failure.message.clone(),
        }
    }

    pub fn format_invoice_totals(&self, totals: &InvoiceTotals) -> InvoiceTotalsValue {
        InvoiceTotalsValue {
            quantidade_itens: totals.item_count,
            valor_produtos: round_display(totals.base_total),
            valor_pis: round_display(totals.pis_total),
            valor_cofins: round_display(totals.cofins_total),
            valor_ipi: round_display(totals.ipi_total),
            valor_icms: round_display(totals.icms_total),
            valor_icms_st: round_display(totals.icms_st_total),
            valor_difal: round_display(totals.difal_total),
            valor_fcp: round_display(totals.fcp_total),
            total_tributos: round_display(totals.tax_total),
            total_nota_fiscal: round_display(totals.invoice_total),
            carga_tributaria_percentual: round_display(totals.average_tax_burden_pct),
        }
    }

    /// Assemble the full calculation response
    pub fn format_response(
        &self,
        chave_nf: Option<String>,
        numero_nf: Option<String>,
        items: Vec<ItemResponse>,
        totals: &InvoiceTotals,
        failures: &[ItemError],
    ) -> CalculationResponse {
        CalculationResponse {
            chave_nf,
            numero_nf,
            itens: items,
            totais_nota: self.format_invoice_totals(totals),
            erros: failures
                .iter()
                .map(|failure| self.format_item_error(failure))
                .collect(),
            processamento: ProcessingInfo {
                data_calculo: Utc::now(),
                versao_calculo: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}
