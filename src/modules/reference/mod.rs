pub mod controllers;
pub mod models;
pub mod services;

pub use models::{IcmsProfile, NcmTaxProfile, OperationType, PisCofinsRegime};
pub use services::{ReferenceDataProvider, SeededReferenceProvider};
