//! Invoice-level reduction of per-item results.
//!
//! A failed item never blocks the invoice: failures are collected and
//! reported next to best-effort totals over the items that did
//! compute. The reduction is commutative and associative, so callers
//! may also merge partial aggregations; iteration here follows input
//! order for reproducible output.

use rust_decimal::Decimal;

use crate::modules::taxes::models::{InvoiceTotals, ItemAssessment, ItemError};

/// Reduces a sequence of per-item outcomes into invoice totals
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceAggregator;

impl InvoiceAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Sum every tax component across the successful items.
    ///
    /// The average tax burden is the ratio of sums
    /// (`tax_total / base_total * 100`), not the arithmetic mean of the
    /// per-item burdens; the two differ whenever base values differ.
    /// Accumulation happens without intermediate rounding.
    pub fn aggregate<I>(&self, outcomes: I) -> (InvoiceTotals, Vec<ItemError>)
    where
        I: IntoIterator<Item = Result<ItemAssessment, ItemError>>,
    {
        let mut totals = InvoiceTotals::default();
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome {
                Ok(assessment) => {
                    totals.item_count += 1;
                    totals.base_total += assessment.item.base_value;
                    totals.pis_total += assessment.breakdown.pis.amount;
                    totals.cofins_total += assessment.breakdown.cofins.amount;
                    totals.ipi_total += assessment.breakdown.ipi.amount;
                    totals.icms_total += assessment.breakdown.icms.amount;
                    totals.icms_st_total += assessment.breakdown.icms.substitution_amount;
                    totals.difal_total += assessment.breakdown.difal.total;
                    totals.fcp_total += assessment.breakdown.fcp.amount;
                    totals.tax_total += assessment.totals.tax_total;
                    totals.invoice_total += assessment.totals.item_total_value;
                }
                Err(failure) => failures.push(failure),
            }
        }

        totals.average_tax_burden_pct = if totals.base_total > Decimal::ZERO {
            totals.tax_total / totals.base_total * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        (totals, failures)
    }
}
