// Error taxonomy tests for the calculation core.
//
// InvalidInput: non-positive base, malformed NCM/UF codes.
// MissingReferenceData: a rate required by the branch actually taken
// is absent; rates that the branch does not need may be absent freely.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use nfe_gateway::reference::{IcmsProfile, NcmTaxProfile, OperationType, PisCofinsRegime};
use nfe_gateway::taxes::models::LineItem;
use nfe_gateway::taxes::LineItemTaxCalculator;

fn line_item() -> LineItem {
    LineItem::new(
        1,
        "PROD-001".to_string(),
        "Produto".to_string(),
        "84713012".to_string(),
        Decimal::ONE,
        dec!(1000),
        dec!(1000),
    )
    .unwrap()
}

fn ncm_profile() -> NcmTaxProfile {
    NcmTaxProfile {
        ncm: "84713012".to_string(),
        description: "Produto classificado no NCM 84713012".to_string(),
        regime: PisCofinsRegime::Standard,
        pis_standard_rate: Some(dec!(1.65)),
        cofins_standard_rate: Some(dec!(7.6)),
        ipi_standard_rate: Some(dec!(5)),
    }
}

fn icms_profile() -> IcmsProfile {
    IcmsProfile {
        origin_state: "SP".to_string(),
        dest_state: "RJ".to_string(),
        operation_type: OperationType::SaleOfGoods,
        internal_rate_origin: Some(dec!(18)),
        internal_rate_dest: Some(dec!(20)),
        interstate_rate: Some(dec!(12)),
        substitution_applicable: false,
        substitution_margin: None,
        destination_surtax_rate: dec!(19),
        origin_share: dec!(40),
        dest_share: dec!(60),
        fcp_rate: Decimal::ZERO,
    }
}

#[test]
fn test_non_positive_base_is_invalid_input() {
    for base in [Decimal::ZERO, dec!(-10)] {
        let err = LineItem::new(
            1,
            "PROD-001".to_string(),
            "Produto".to_string(),
            "84713012".to_string(),
            Decimal::ONE,
            base,
            base,
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}

#[test]
fn test_malformed_ncm_is_invalid_input() {
    for ncm in ["1234567", "123456789", "8471301a", ""] {
        let err = LineItem::new(
            1,
            "PROD-001".to_string(),
            "Produto".to_string(),
            ncm.to_string(),
            Decimal::ONE,
            dec!(100),
            dec!(100),
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT", "NCM {:?} must be rejected", ncm);
    }
}

#[test]
fn test_malformed_uf_is_invalid_input() {
    let mut icms = icms_profile();
    icms.origin_state = "sao paulo".to_string();

    let err = LineItemTaxCalculator::new()
        .compute_item(&line_item(), &ncm_profile(), &icms)
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_INPUT");
}

#[test]
fn test_missing_cofins_rate_fails_standard_regime() {
    let mut ncm = ncm_profile();
    ncm.cofins_standard_rate = None;

    let err = LineItemTaxCalculator::new()
        .compute_item(&line_item(), &ncm, &icms_profile())
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_REFERENCE_DATA");
}

#[test]
fn test_missing_contribution_rates_allowed_under_zeroing_regimes() {
    let mut ncm = ncm_profile();
    ncm.pis_standard_rate = None;
    ncm.cofins_standard_rate = None;

    for regime in [PisCofinsRegime::Monophasic, PisCofinsRegime::ZeroRate] {
        ncm.regime = regime;
        let result = LineItemTaxCalculator::new()
            .compute_item(&line_item(), &ncm, &icms_profile())
            .unwrap();
        assert_eq!(result.breakdown.pis.amount, Decimal::ZERO);
        assert_eq!(result.breakdown.cofins.amount, Decimal::ZERO);
    }
}

#[test]
fn test_missing_ipi_rate_always_fails() {
    // IPI is computed on every branch, so its rate is always required
    let mut ncm = ncm_profile();
    ncm.ipi_standard_rate = None;
    ncm.regime = PisCofinsRegime::Monophasic;

    let err = LineItemTaxCalculator::new()
        .compute_item(&line_item(), &ncm, &icms_profile())
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_REFERENCE_DATA");
}

#[test]
fn test_missing_interstate_rate_fails_plain_icms() {
    let mut icms = icms_profile();
    icms.interstate_rate = None;

    let err = LineItemTaxCalculator::new()
        .compute_item(&line_item(), &ncm_profile(), &icms)
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_REFERENCE_DATA");
}

#[test]
fn test_missing_substitution_fields_fail_substitution_branch() {
    let mut icms = icms_profile();
    icms.substitution_applicable = true;
    icms.substitution_margin = None;

    let err = LineItemTaxCalculator::new()
        .compute_item(&line_item(), &ncm_profile(), &icms)
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_REFERENCE_DATA");

    icms.substitution_margin = Some(dec!(40));
    icms.internal_rate_dest = None;
    let err = LineItemTaxCalculator::new()
        .compute_item(&line_item(), &ncm_profile(), &icms)
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_REFERENCE_DATA");
}
