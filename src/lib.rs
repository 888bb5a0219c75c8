//! NFE Gateway Library
//!
//! Tax-computation core and thin API gateway for Brazilian fiscal
//! invoices (NF-e): per-line-item tax breakdowns (PIS, COFINS, IPI,
//! ICMS, ICMS-ST, DIFAL, FCP) and invoice-level aggregation, with
//! reference data delivered by pluggable providers.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used modules
pub use modules::companies;
pub use modules::reference;
pub use modules::taxes;
