pub mod controllers;
pub mod models;
pub mod services;

pub use models::{CalculationRequest, CalculationResponse, LineItem};
pub use services::{InvoiceAggregator, LineItemTaxCalculator, ResultFormatter, TaxService};
