//! Company (CNPJ) lookup seam.
//!
//! The registry adapter that actually queries the public CNPJ APIs
//! lives upstream of this service; the gateway only depends on this
//! trait when it needs issuer/recipient company data alongside a
//! calculation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Company registration data resolved for a CNPJ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub cnpj: String,

    #[serde(rename = "razao_social")]
    pub legal_name: String,

    #[serde(rename = "nome_fantasia")]
    pub trade_name: Option<String>,

    #[serde(rename = "uf")]
    pub state: String,

    #[serde(rename = "municipio")]
    pub city: Option<String>,
}

/// Validate a 14-digit CNPJ, ignoring the usual punctuation
pub fn normalize_cnpj(cnpj: &str) -> Result<String> {
    let digits: String = cnpj.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 14 {
        return Err(AppError::invalid_input(format!(
            "CNPJ must contain 14 digits, got: {:?}",
            cnpj
        )));
    }
    Ok(digits)
}

/// External collaborator resolving company data by CNPJ.
///
/// Implementations own the HTTP fan-out and failover across public
/// registries; lookups fail with `AppError::NotFound` when no registry
/// knows the company.
#[async_trait]
pub trait CompanyLookup: Send + Sync {
    async fn company_info(&self, cnpj: &str) -> Result<CompanyInfo>;
}
