// Calculator output: the full per-tax breakdown for one line item.
//
// Every assessment keeps the rate and base it was computed from, not
// just the amount, so a result can be audited without re-resolving
// reference data. Amounts are unrounded; rounding is the formatter's
// job at the output boundary.

use rust_decimal::Decimal;

use crate::modules::reference::models::PisCofinsRegime;

use super::line_item::LineItem;

/// PIS or COFINS assessment. The regime and rate are recorded even when
/// the regime zeroes the amount (monophasic, zero-rated), for
/// traceability.
#[derive(Debug, Clone)]
pub struct ContributionTax {
    pub regime: PisCofinsRegime,
    pub rate: Option<Decimal>,
    pub base: Decimal,
    pub amount: Decimal,
}

/// IPI assessment, always computed regardless of the PIS/COFINS regime
#[derive(Debug, Clone)]
pub struct ExciseTax {
    pub rate: Decimal,
    pub base: Decimal,
    pub amount: Decimal,
}

/// ICMS assessment, covering both the plain and the substitution path.
///
/// The two are mutually exclusive: with substitution, `amount` is zero
/// and the tax lives in `substitution_amount`; without it, the
/// substitution fields are zero.
#[derive(Debug, Clone)]
pub struct IcmsAssessment {
    pub origin_state: String,
    pub dest_state: String,
    pub internal_rate_origin: Option<Decimal>,
    pub internal_rate_dest: Option<Decimal>,
    pub interstate_rate: Option<Decimal>,
    pub base: Decimal,
    pub amount: Decimal,
    pub substitution_applicable: bool,
    /// Presumed value-added margin used to mark up the substitution base
    pub substitution_margin: Option<Decimal>,
    pub substitution_base: Decimal,
    pub substitution_amount: Decimal,
}

/// DIFAL assessment with the origin/destination apportionment.
///
/// `rate_diff` is destination surtax rate minus interstate rate and is
/// deliberately not clamped: when the interstate rate exceeds the
/// destination rate the total goes negative, matching the observed
/// upstream behavior.
#[derive(Debug, Clone)]
pub struct DifalAssessment {
    pub applicable: bool,
    pub rate_diff: Decimal,
    pub base: Decimal,
    pub total: Decimal,
    pub origin_share_pct: Decimal,
    pub origin_share: Decimal,
    pub dest_share_pct: Decimal,
    pub dest_share: Decimal,
}

/// FCP (poverty-fund surtax) assessment
#[derive(Debug, Clone)]
pub struct FcpAssessment {
    pub applicable: bool,
    pub rate: Decimal,
    pub base: Decimal,
    pub amount: Decimal,
}

/// Complete tax breakdown for one line item
#[derive(Debug, Clone)]
pub struct TaxBreakdown {
    pub pis: ContributionTax,
    pub cofins: ContributionTax,
    pub ipi: ExciseTax,
    pub icms: IcmsAssessment,
    pub difal: DifalAssessment,
    pub fcp: FcpAssessment,
}

/// Item-level totals derived from a breakdown.
///
/// `item_total_value` is base + IPI + ICMS-ST + FCP by fiscal-document
/// convention: plain ICMS is already embedded in the price and DIFAL is
/// remitted to the states separately, so neither adds to the payable
/// line total even though both count as tax liabilities.
#[derive(Debug, Clone)]
pub struct ItemTotals {
    pub federal_total: Decimal,
    pub state_total: Decimal,
    pub tax_total: Decimal,
    pub item_total_value: Decimal,
    pub tax_burden_pct: Decimal,
}

/// Full calculator result for one line item, unrounded
#[derive(Debug, Clone)]
pub struct ItemAssessment {
    pub item: LineItem,
    pub ncm_description: String,
    pub breakdown: TaxBreakdown,
    pub totals: ItemTotals,
}
