mod breakdown;
mod line_item;
mod request;
mod response;
mod totals;

pub use breakdown::{
    ContributionTax, DifalAssessment, ExciseTax, FcpAssessment, IcmsAssessment, ItemAssessment,
    ItemTotals, TaxBreakdown,
};
pub use line_item::LineItem;
pub use request::{CalculationRequest, LineItemRequest};
pub use response::{
    CalculationResponse, ContributionValue, DifalShares, DifalValue, FcpValue, IcmsValue,
    InvoiceTotalsValue, IpiValue, ItemErrorResponse, ItemResponse, ItemTaxes, ItemTotalsValue,
    ProcessingInfo, ShareValue,
};
pub use totals::{InvoiceTotals, ItemError};
