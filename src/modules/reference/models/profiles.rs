// Reference data resolved per line item before any tax computation.
//
// An NcmTaxProfile answers "how is this product classification taxed
// federally" (PIS/COFINS regime and standard rates, IPI rate). An
// IcmsProfile answers "which state rules apply to this origin ->
// destination movement" (internal/interstate rates, substitution,
// DIFAL apportionment, FCP). Both are immutable snapshots delivered by
// a ReferenceDataProvider; the tax core never performs the lookup
// itself.
//
// Wire field names follow the government registry payloads consumed by
// the dashboard, hence the Portuguese serde renames.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// PIS/COFINS special-regime classification for an NCM.
///
/// Closed set: every consumer must match exhaustively so a new regime
/// can never be silently mishandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PisCofinsRegime {
    /// No special regime, standard rates apply
    #[serde(rename = "Nenhum")]
    Standard,

    /// Single-phase collection: contributions already collected at the
    /// industry stage, zero at this point of the chain
    #[serde(rename = "Monofasico")]
    Monophasic,

    /// Zero-rated product
    #[serde(rename = "Aliquota_Zero")]
    ZeroRate,
}

impl std::fmt::Display for PisCofinsRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PisCofinsRegime::Standard => write!(f, "Nenhum"),
            PisCofinsRegime::Monophasic => write!(f, "Monofasico"),
            PisCofinsRegime::ZeroRate => write!(f, "Aliquota_Zero"),
        }
    }
}

impl std::str::FromStr for PisCofinsRegime {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Nenhum" => Ok(PisCofinsRegime::Standard),
            "Monofasico" => Ok(PisCofinsRegime::Monophasic),
            "Aliquota_Zero" => Ok(PisCofinsRegime::ZeroRate),
            _ => Err(format!("Invalid PIS/COFINS regime: {}", s)),
        }
    }
}

/// Fiscal operation type, part of the ICMS rule lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperationType {
    #[default]
    #[serde(rename = "VENDA_PRODUTO")]
    SaleOfGoods,

    #[serde(rename = "PRESTACAO_SERVICO")]
    ServiceProvision,

    #[serde(rename = "DEVOLUCAO")]
    Return,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::SaleOfGoods => write!(f, "VENDA_PRODUTO"),
            OperationType::ServiceProvision => write!(f, "PRESTACAO_SERVICO"),
            OperationType::Return => write!(f, "DEVOLUCAO"),
        }
    }
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "VENDA_PRODUTO" => Ok(OperationType::SaleOfGoods),
            "PRESTACAO_SERVICO" => Ok(OperationType::ServiceProvision),
            "DEVOLUCAO" => Ok(OperationType::Return),
            _ => Err(format!("Invalid operation type: {}", s)),
        }
    }
}

/// Federal taxation profile for one NCM classification code.
///
/// Rates are optional because upstream registries can omit them; the
/// calculator raises `MissingReferenceData` only when the taxation
/// branch actually taken needs an absent rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NcmTaxProfile {
    /// 8-digit NCM classification code this profile was resolved for
    pub ncm: String,

    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "regime_pis_cofins")]
    pub regime: PisCofinsRegime,

    /// Standard PIS rate in percent, used only under the standard regime
    #[serde(rename = "aliquota_pis_padrao")]
    pub pis_standard_rate: Option<Decimal>,

    /// Standard COFINS rate in percent, used only under the standard regime
    #[serde(rename = "aliquota_cofins_padrao")]
    pub cofins_standard_rate: Option<Decimal>,

    /// IPI rate in percent, applied regardless of the PIS/COFINS regime
    #[serde(rename = "aliquota_ipi_padrao")]
    pub ipi_standard_rate: Option<Decimal>,
}

/// State taxation rules for one (origin, destination, NCM, operation)
/// tuple.
///
/// Percentage fields where zero means "does not apply" (FCP, DIFAL
/// surtax, apportionment shares) are plain decimals, matching the
/// registry payloads which always emit them. Rates needed only on one
/// taxation branch are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsProfile {
    #[serde(rename = "uf_origem")]
    pub origin_state: String,

    #[serde(rename = "uf_destino")]
    pub dest_state: String,

    #[serde(rename = "tipo_operacao", default)]
    pub operation_type: OperationType,

    #[serde(rename = "aliquota_interna_origem")]
    pub internal_rate_origin: Option<Decimal>,

    /// Destination-state internal rate, the ICMS-ST rate when
    /// substitution applies
    #[serde(rename = "aliquota_interna_destino")]
    pub internal_rate_dest: Option<Decimal>,

    /// Interstate rate, the plain ICMS rate when substitution does not
    /// apply
    #[serde(rename = "aliquota_interestadual")]
    pub interstate_rate: Option<Decimal>,

    /// When true the ICMS is collected upstream via substitution and the
    /// plain ICMS amount is always zero
    #[serde(rename = "icms_st_aplicavel")]
    pub substitution_applicable: bool,

    /// Presumed value-added margin (MVA) in percent, marks up the
    /// substitution base
    #[serde(rename = "mva_original_icms_st")]
    pub substitution_margin: Option<Decimal>,

    /// DIFAL rate at the destination state; zero disables DIFAL
    #[serde(rename = "aliquota_difal_destino")]
    pub destination_surtax_rate: Decimal,

    /// DIFAL apportionment share kept by the origin state, in percent
    #[serde(rename = "partilha_difal_origem")]
    pub origin_share: Decimal,

    /// DIFAL apportionment share owed to the destination state, in percent
    #[serde(rename = "partilha_difal_destino")]
    pub dest_share: Decimal,

    /// Poverty-fund surtax rate at the destination; zero disables FCP
    #[serde(rename = "aliquota_fcp_destino")]
    pub fcp_rate: Decimal,
}

/// Validate a 2-letter UF (state) code
pub fn validate_uf(uf: &str) -> Result<()> {
    if uf.len() != 2 || !uf.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(AppError::invalid_input(format!(
            "UF must be 2 uppercase letters, got: {:?}",
            uf
        )));
    }
    Ok(())
}

/// Validate an 8-digit NCM classification code
pub fn validate_ncm(ncm: &str) -> Result<()> {
    if ncm.len() != 8 || !ncm.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_input(format!(
            "NCM must be exactly 8 digits, got: {:?}",
            ncm
        )));
    }
    Ok(())
}
