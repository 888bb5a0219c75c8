//! Per-line-item tax computation.
//!
//! Pure and synchronous: given one line item and the two reference
//! profiles resolved for it, produce the full breakdown (PIS, COFINS,
//! IPI, ICMS or ICMS-ST, DIFAL, FCP) and the item totals. No I/O, no
//! shared state, deterministic for identical inputs. All intermediate
//! arithmetic stays unrounded.

use rust_decimal::Decimal;

use crate::core::money::apply_rate;
use crate::core::{AppError, Result};
use crate::modules::reference::models::{
    validate_ncm, validate_uf, IcmsProfile, NcmTaxProfile, PisCofinsRegime,
};
use crate::modules::taxes::models::{
    ContributionTax, DifalAssessment, ExciseTax, FcpAssessment, IcmsAssessment, ItemAssessment,
    ItemTotals, LineItem, TaxBreakdown,
};

/// Computes the full tax breakdown for one invoice line item
#[derive(Debug, Clone, Copy, Default)]
pub struct LineItemTaxCalculator;

impl LineItemTaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the breakdown and totals for one line item.
    ///
    /// # Errors
    /// * `InvalidInput` — non-positive base value or malformed NCM/UF
    ///   codes
    /// * `MissingReferenceData` — a rate required by the taxation
    ///   branch actually taken is absent from the resolved profile.
    ///   Nothing is silently defaulted here; the operation-type default
    ///   is the caller's responsibility before profile resolution.
    pub fn compute_item(
        &self,
        item: &LineItem,
        ncm: &NcmTaxProfile,
        icms: &IcmsProfile,
    ) -> Result<ItemAssessment> {
        let base = item.base_value;
        if base <= Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "Item {}: base value must be positive, got: {}",
                item.item_number, base
            )));
        }
        validate_ncm(&item.ncm)?;
        validate_uf(&icms.origin_state)?;
        validate_uf(&icms.dest_state)?;

        let (pis, cofins) = self.compute_contributions(item, ncm)?;
        let ipi = self.compute_ipi(item, ncm)?;
        let icms_assessment = self.compute_icms(item, icms)?;
        let difal = self.compute_difal(item, icms)?;
        let fcp = self.compute_fcp(item, icms);

        let federal_total = pis.amount + cofins.amount + ipi.amount;
        let state_total =
            icms_assessment.amount + icms_assessment.substitution_amount + difal.total + fcp.amount;
        let tax_total = federal_total + state_total;

        // Fiscal-document convention: plain ICMS is embedded in the
        // price and DIFAL is remitted separately, so neither adds to
        // the payable line total
        let item_total_value =
            base + ipi.amount + icms_assessment.substitution_amount + fcp.amount;

        let tax_burden_pct = tax_total / base * Decimal::ONE_HUNDRED;

        Ok(ItemAssessment {
            item: item.clone(),
            ncm_description: ncm.description.clone(),
            breakdown: TaxBreakdown {
                pis,
                cofins,
                ipi,
                icms: icms_assessment,
                difal,
                fcp,
            },
            totals: ItemTotals {
                federal_total,
                state_total,
                tax_total,
                item_total_value,
                tax_burden_pct,
            },
        })
    }

    /// PIS/COFINS, branching on the NCM's special regime.
    ///
    /// Under the monophasic regime the contributions were already
    /// collected at the industry stage; zero-rated products are simply
    /// exempt. In both cases the regime and rates are still recorded.
    fn compute_contributions(
        &self,
        item: &LineItem,
        ncm: &NcmTaxProfile,
    ) -> Result<(ContributionTax, ContributionTax)> {
        let base = item.base_value;

        let (pis_amount, cofins_amount) = match ncm.regime {
            PisCofinsRegime::Standard => {
                let pis_rate = ncm.pis_standard_rate.ok_or_else(|| {
                    AppError::missing_reference(format!(
                        "Item {}: NCM {} has no standard PIS rate",
                        item.item_number, item.ncm
                    ))
                })?;
                let cofins_rate = ncm.cofins_standard_rate.ok_or_else(|| {
                    AppError::missing_reference(format!(
                        "Item {}: NCM {} has no standard COFINS rate",
                        item.item_number, item.ncm
                    ))
                })?;
                (apply_rate(base, pis_rate), apply_rate(base, cofins_rate))
            }
            PisCofinsRegime::Monophasic | PisCofinsRegime::ZeroRate => {
                (Decimal::ZERO, Decimal::ZERO)
            }
        };

        let pis = ContributionTax {
            regime: ncm.regime,
            rate: ncm.pis_standard_rate,
            base,
            amount: pis_amount,
        };
        let cofins = ContributionTax {
            regime: ncm.regime,
            rate: ncm.cofins_standard_rate,
            base,
            amount: cofins_amount,
        };
        Ok((pis, cofins))
    }

    /// IPI is computed regardless of the PIS/COFINS regime
    fn compute_ipi(&self, item: &LineItem, ncm: &NcmTaxProfile) -> Result<ExciseTax> {
        let rate = ncm.ipi_standard_rate.ok_or_else(|| {
            AppError::missing_reference(format!(
                "Item {}: NCM {} has no IPI rate",
                item.item_number, item.ncm
            ))
        })?;
        Ok(ExciseTax {
            rate,
            base: item.base_value,
            amount: apply_rate(item.base_value, rate),
        })
    }

    /// ICMS: substitution and the plain tax are mutually exclusive.
    ///
    /// With substitution the collection happened upstream against a
    /// base marked up by the MVA, at the destination's internal rate;
    /// the plain ICMS amount is then always zero.
    fn compute_icms(&self, item: &LineItem, icms: &IcmsProfile) -> Result<IcmsAssessment> {
        let base = item.base_value;

        let (amount, substitution_base, substitution_amount) = if icms.substitution_applicable {
            let margin = icms.substitution_margin.ok_or_else(|| {
                AppError::missing_reference(format!(
                    "Item {}: substitution applies but the MVA is absent",
                    item.item_number
                ))
            })?;
            let st_rate = icms.internal_rate_dest.ok_or_else(|| {
                AppError::missing_reference(format!(
                    "Item {}: substitution applies but the destination internal rate is absent",
                    item.item_number
                ))
            })?;
            let st_base = base * (Decimal::ONE + margin / Decimal::ONE_HUNDRED);
            (Decimal::ZERO, st_base, apply_rate(st_base, st_rate))
        } else {
            let rate = icms.interstate_rate.ok_or_else(|| {
                AppError::missing_reference(format!(
                    "Item {}: no interstate ICMS rate for {} -> {}",
                    item.item_number, icms.origin_state, icms.dest_state
                ))
            })?;
            (apply_rate(base, rate), Decimal::ZERO, Decimal::ZERO)
        };

        Ok(IcmsAssessment {
            origin_state: icms.origin_state.clone(),
            dest_state: icms.dest_state.clone(),
            internal_rate_origin: icms.internal_rate_origin,
            internal_rate_dest: icms.internal_rate_dest,
            interstate_rate: icms.interstate_rate,
            base,
            amount,
            substitution_applicable: icms.substitution_applicable,
            substitution_margin: icms.substitution_margin,
            substitution_base,
            substitution_amount,
        })
    }

    /// DIFAL applies only to interstate movements with a positive
    /// destination surtax rate; everything is zero otherwise.
    ///
    /// The rate differential is not clamped: when the interstate rate
    /// exceeds the destination rate the total goes negative, matching
    /// the observed upstream behavior.
    fn compute_difal(&self, item: &LineItem, icms: &IcmsProfile) -> Result<DifalAssessment> {
        let applicable = icms.origin_state != icms.dest_state
            && icms.destination_surtax_rate > Decimal::ZERO;

        if !applicable {
            return Ok(DifalAssessment {
                applicable: false,
                rate_diff: Decimal::ZERO,
                base: Decimal::ZERO,
                total: Decimal::ZERO,
                origin_share_pct: Decimal::ZERO,
                origin_share: Decimal::ZERO,
                dest_share_pct: Decimal::ZERO,
                dest_share: Decimal::ZERO,
            });
        }

        let interstate = icms.interstate_rate.ok_or_else(|| {
            AppError::missing_reference(format!(
                "Item {}: DIFAL requires the interstate rate for {} -> {}",
                item.item_number, icms.origin_state, icms.dest_state
            ))
        })?;

        let base = item.base_value;
        let rate_diff = icms.destination_surtax_rate - interstate;
        let total = apply_rate(base, rate_diff);

        Ok(DifalAssessment {
            applicable: true,
            rate_diff,
            base,
            total,
            origin_share_pct: icms.origin_share,
            origin_share: apply_rate(total, icms.origin_share),
            dest_share_pct: icms.dest_share,
            dest_share: apply_rate(total, icms.dest_share),
        })
    }

    fn compute_fcp(&self, item: &LineItem, icms: &IcmsProfile) -> FcpAssessment {
        let applicable = icms.fcp_rate > Decimal::ZERO;
        FcpAssessment {
            applicable,
            rate: icms.fcp_rate,
            base: item.base_value,
            amount: if applicable {
                apply_rate(item.base_value, icms.fcp_rate)
            } else {
                Decimal::ZERO
            },
        }
    }
}
