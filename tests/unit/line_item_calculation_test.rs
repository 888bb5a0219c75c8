// Property-based and scenario tests for the per-line-item tax
// calculation.
//
// Properties covered:
// 1. item_total_value = base + IPI + ICMS-ST + FCP, exactly
// 2. Monophasic/zero-rate regimes zero PIS and COFINS for any rates
// 3. Substitution and plain ICMS are mutually exclusive
// 4. Same-state movements never produce DIFAL
// 5. DIFAL apportionment: origin share + destination share = total
// 6. Determinism for identical inputs
//
// Plus the two reference scenarios: a standard interstate sale with a
// negative rate differential, and a substitution sale.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use nfe_gateway::reference::{IcmsProfile, NcmTaxProfile, OperationType, PisCofinsRegime};
use nfe_gateway::taxes::models::LineItem;
use nfe_gateway::taxes::LineItemTaxCalculator;

fn line_item(base: Decimal) -> LineItem {
    LineItem::new(
        1,
        "PROD-001".to_string(),
        "Notebook 14\"".to_string(),
        "84713012".to_string(),
        Decimal::ONE,
        base,
        base,
    )
    .expect("valid line item")
}

fn ncm_profile(regime: PisCofinsRegime, pis: Decimal, cofins: Decimal, ipi: Decimal) -> NcmTaxProfile {
    NcmTaxProfile {
        ncm: "84713012".to_string(),
        description: "Produto classificado no NCM 84713012".to_string(),
        regime,
        pis_standard_rate: Some(pis),
        cofins_standard_rate: Some(cofins),
        ipi_standard_rate: Some(ipi),
    }
}

#[allow(clippy::too_many_arguments)]
fn icms_profile(
    origin: &str,
    dest: &str,
    interstate: Decimal,
    substitution: bool,
    margin: Decimal,
    surtax: Decimal,
    origin_share: Decimal,
    dest_share: Decimal,
    fcp: Decimal,
) -> IcmsProfile {
    IcmsProfile {
        origin_state: origin.to_string(),
        dest_state: dest.to_string(),
        operation_type: OperationType::SaleOfGoods,
        internal_rate_origin: Some(dec!(18)),
        internal_rate_dest: Some(dec!(18)),
        interstate_rate: Some(interstate),
        substitution_applicable: substitution,
        substitution_margin: if substitution { Some(margin) } else { None },
        destination_surtax_rate: surtax,
        origin_share,
        dest_share,
        fcp_rate: fcp,
    }
}

#[test]
fn test_standard_interstate_sale_scenario() {
    // base=1000, PIS 1.65%, COFINS 7.6%, IPI 5%, interstate ICMS 12%,
    // DIFAL destination rate 7% (negative differential), shares 40/60,
    // FCP 2%
    let calculator = LineItemTaxCalculator::new();
    let ncm = ncm_profile(PisCofinsRegime::Standard, dec!(1.65), dec!(7.6), dec!(5));
    let icms = icms_profile(
        "SP",
        "RJ",
        dec!(12),
        false,
        Decimal::ZERO,
        dec!(7),
        dec!(40),
        dec!(60),
        dec!(2),
    );

    let result = calculator
        .compute_item(&line_item(dec!(1000)), &ncm, &icms)
        .unwrap();

    assert_eq!(result.breakdown.pis.amount, dec!(16.50));
    assert_eq!(result.breakdown.cofins.amount, dec!(76.00));
    assert_eq!(result.breakdown.ipi.amount, dec!(50.00));
    assert_eq!(result.breakdown.icms.amount, dec!(120.00));
    assert_eq!(result.breakdown.icms.substitution_amount, Decimal::ZERO);
    // Destination rate below the interstate rate: the differential is
    // preserved as a signed value, not clamped at zero
    assert_eq!(result.breakdown.difal.total, dec!(-50.00));
    assert_eq!(result.breakdown.difal.origin_share, dec!(-20.00));
    assert_eq!(result.breakdown.difal.dest_share, dec!(-30.00));
    assert_eq!(result.breakdown.fcp.amount, dec!(20.00));

    assert_eq!(result.totals.tax_total, dec!(232.50));
    assert_eq!(result.totals.item_total_value, dec!(1070.00));
    assert_eq!(result.totals.tax_burden_pct, dec!(23.25));
}

#[test]
fn test_substitution_sale_scenario() {
    // base=1000, MVA 40%, destination internal rate 18%
    let calculator = LineItemTaxCalculator::new();
    let ncm = ncm_profile(PisCofinsRegime::Standard, dec!(1.65), dec!(7.6), Decimal::ZERO);
    let mut icms = icms_profile(
        "SC",
        "SP",
        dec!(12),
        true,
        dec!(40),
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
    );
    icms.internal_rate_dest = Some(dec!(18));

    let result = calculator
        .compute_item(&line_item(dec!(1000)), &ncm, &icms)
        .unwrap();

    assert_eq!(result.breakdown.icms.substitution_base, dec!(1400.00));
    assert_eq!(result.breakdown.icms.substitution_amount, dec!(252.00));
    assert_eq!(result.breakdown.icms.amount, Decimal::ZERO);
    // ICMS-ST enters the payable line total
    assert_eq!(result.totals.item_total_value, dec!(1252.00));
}

fn base_strategy() -> impl Strategy<Value = Decimal> {
    // 0.01 .. 10_000_000.00
    (1i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=100).prop_map(Decimal::from)
}

proptest! {
    #[test]
    fn test_item_total_identity(
        base in base_strategy(),
        pis in rate_strategy(),
        cofins in rate_strategy(),
        ipi in rate_strategy(),
        interstate in rate_strategy(),
        fcp in rate_strategy(),
        substitution in any::<bool>(),
        margin in rate_strategy(),
    ) {
        let calculator = LineItemTaxCalculator::new();
        let ncm = ncm_profile(PisCofinsRegime::Standard, pis, cofins, ipi);
        let icms = icms_profile(
            "SP", "BA", interstate, substitution, margin,
            Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, fcp,
        );

        let result = calculator.compute_item(&line_item(base), &ncm, &icms).unwrap();

        let expected = base
            + result.breakdown.ipi.amount
            + result.breakdown.icms.substitution_amount
            + result.breakdown.fcp.amount;
        prop_assert_eq!(
            result.totals.item_total_value,
            expected,
            "item total must be base + IPI + ICMS-ST + FCP exactly"
        );
    }

    #[test]
    fn test_non_standard_regimes_zero_contributions(
        base in base_strategy(),
        pis in rate_strategy(),
        cofins in rate_strategy(),
        monophasic in any::<bool>(),
    ) {
        let regime = if monophasic {
            PisCofinsRegime::Monophasic
        } else {
            PisCofinsRegime::ZeroRate
        };
        let calculator = LineItemTaxCalculator::new();
        let ncm = ncm_profile(regime, pis, cofins, dec!(5));
        let icms = icms_profile(
            "SP", "BA", dec!(7), false, Decimal::ZERO,
            Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO,
        );

        let result = calculator.compute_item(&line_item(base), &ncm, &icms).unwrap();

        prop_assert_eq!(result.breakdown.pis.amount, Decimal::ZERO);
        prop_assert_eq!(result.breakdown.cofins.amount, Decimal::ZERO);
    }

    #[test]
    fn test_substitution_exclusivity(
        base in base_strategy(),
        interstate in rate_strategy(),
        margin in rate_strategy(),
        substitution in any::<bool>(),
    ) {
        let calculator = LineItemTaxCalculator::new();
        let ncm = ncm_profile(PisCofinsRegime::Standard, dec!(1.65), dec!(7.6), dec!(5));
        let icms = icms_profile(
            "SP", "BA", interstate, substitution, margin,
            Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO,
        );

        let result = calculator.compute_item(&line_item(base), &ncm, &icms).unwrap();

        if substitution {
            prop_assert_eq!(result.breakdown.icms.amount, Decimal::ZERO);
        } else {
            prop_assert_eq!(result.breakdown.icms.substitution_amount, Decimal::ZERO);
        }
    }

    #[test]
    fn test_same_state_never_produces_difal(
        base in base_strategy(),
        interstate in rate_strategy(),
        surtax in rate_strategy(),
    ) {
        let calculator = LineItemTaxCalculator::new();
        let ncm = ncm_profile(PisCofinsRegime::Standard, dec!(1.65), dec!(7.6), dec!(5));
        let icms = icms_profile(
            "SP", "SP", interstate, false, Decimal::ZERO,
            surtax, dec!(40), dec!(60), Decimal::ZERO,
        );

        let result = calculator.compute_item(&line_item(base), &ncm, &icms).unwrap();

        prop_assert_eq!(result.breakdown.difal.total, Decimal::ZERO);
        prop_assert_eq!(result.breakdown.difal.origin_share, Decimal::ZERO);
        prop_assert_eq!(result.breakdown.difal.dest_share, Decimal::ZERO);
    }

    #[test]
    fn test_difal_apportionment_identity(
        base in base_strategy(),
        interstate in rate_strategy(),
        surtax in (1u32..=100).prop_map(Decimal::from),
        origin_share in (0u32..=100).prop_map(Decimal::from),
    ) {
        let dest_share = Decimal::ONE_HUNDRED - origin_share;
        let calculator = LineItemTaxCalculator::new();
        let ncm = ncm_profile(PisCofinsRegime::Standard, dec!(1.65), dec!(7.6), dec!(5));
        let icms = icms_profile(
            "SP", "BA", interstate, false, Decimal::ZERO,
            surtax, origin_share, dest_share, Decimal::ZERO,
        );

        let result = calculator.compute_item(&line_item(base), &ncm, &icms).unwrap();
        let difal = &result.breakdown.difal;

        prop_assert_eq!(
            difal.origin_share + difal.dest_share,
            difal.total,
            "apportionment shares must sum to the DIFAL total"
        );
    }

    #[test]
    fn test_calculation_is_deterministic(
        base in base_strategy(),
        interstate in rate_strategy(),
    ) {
        let calculator = LineItemTaxCalculator::new();
        let ncm = ncm_profile(PisCofinsRegime::Standard, dec!(1.65), dec!(7.6), dec!(5));
        let icms = icms_profile(
            "SP", "RJ", interstate, false, Decimal::ZERO,
            dec!(19), dec!(40), dec!(60), dec!(2),
        );

        let item = line_item(base);
        let first = calculator.compute_item(&item, &ncm, &icms).unwrap();
        let second = calculator.compute_item(&item, &ncm, &icms).unwrap();

        prop_assert_eq!(first.totals.tax_total, second.totals.tax_total);
        prop_assert_eq!(first.totals.item_total_value, second.totals.item_total_value);
    }
}
