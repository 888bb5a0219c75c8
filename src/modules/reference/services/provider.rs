use async_trait::async_trait;

use crate::core::Result;
use crate::modules::reference::models::{IcmsProfile, NcmTaxProfile, OperationType};

/// Seam between the tax core and the external registries that resolve
/// tax classification data.
///
/// Implementations own all lookup I/O, caching and retry policy; the
/// calculator only ever sees fully-resolved profiles. Lookups fail with
/// `AppError::NotFound` for unknown codes and `AppError::InvalidInput`
/// for malformed ones.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    /// Resolve the federal taxation profile for an 8-digit NCM code
    async fn ncm_profile(&self, ncm: &str) -> Result<NcmTaxProfile>;

    /// Resolve the ICMS rules for an origin -> destination movement of
    /// goods classified under `ncm`
    async fn icms_profile(
        &self,
        origin_state: &str,
        dest_state: &str,
        ncm: &str,
        operation_type: OperationType,
    ) -> Result<IcmsProfile>;
}
