// Invoice-level aggregation results.

use rust_decimal::Decimal;

use crate::core::AppError;

/// A per-item failure surfaced by the aggregation instead of aborting
/// the invoice
#[derive(Debug, Clone)]
pub struct ItemError {
    pub item_number: u32,
    pub code: &'static str,
    pub message: String,
}

impl ItemError {
    pub fn new(item_number: u32, error: &AppError) -> Self {
        Self {
            item_number,
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Sums of every tax component across the successfully computed items
/// of one invoice. Accumulated without intermediate rounding.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTotals {
    /// Count of successfully computed items
    pub item_count: usize,
    pub base_total: Decimal,
    pub pis_total: Decimal,
    pub cofins_total: Decimal,
    pub ipi_total: Decimal,
    pub icms_total: Decimal,
    pub icms_st_total: Decimal,
    pub difal_total: Decimal,
    pub fcp_total: Decimal,
    pub tax_total: Decimal,
    /// Sum of per-item payable totals
    pub invoice_total: Decimal,
    /// tax_total / base_total * 100 — the ratio of sums, not the mean
    /// of per-item burdens
    pub average_tax_burden_pct: Decimal,
}
