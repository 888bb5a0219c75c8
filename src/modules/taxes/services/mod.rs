mod invoice_aggregator;
mod item_calculator;
mod result_formatter;
mod tax_service;

pub use invoice_aggregator::InvoiceAggregator;
pub use item_calculator::LineItemTaxCalculator;
pub use result_formatter::ResultFormatter;
pub use tax_service::TaxService;
