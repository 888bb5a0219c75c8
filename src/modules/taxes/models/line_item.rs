// A line item is the unit of tax computation: one product entry of a
// fiscal invoice, carrying the taxable base value and the NCM
// classification used to resolve reference data. Immutable after
// construction; a fresh set is built per calculation request and
// nothing is shared across requests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::reference::models::validate_ncm;

/// Single product line of a fiscal invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Position of the item inside the invoice (1-based)
    pub item_number: u32,

    /// Issuer's product code
    pub product_code: String,

    /// Free-text product description
    pub description: String,

    /// 8-digit NCM classification code
    pub ncm: String,

    pub quantity: Decimal,

    pub unit_price: Decimal,

    /// Taxable base value, must be strictly positive
    pub base_value: Decimal,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Errors
    /// `AppError::InvalidInput` when the base value is not strictly
    /// positive or the NCM code is malformed
    pub fn new(
        item_number: u32,
        product_code: String,
        description: String,
        ncm: String,
        quantity: Decimal,
        unit_price: Decimal,
        base_value: Decimal,
    ) -> Result<Self> {
        Self::validate_base_value(base_value, item_number)?;
        validate_ncm(&ncm)?;

        Ok(Self {
            item_number,
            product_code,
            description,
            ncm,
            quantity,
            unit_price,
            base_value,
        })
    }

    fn validate_base_value(base_value: Decimal, item_number: u32) -> Result<()> {
        if base_value <= Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "Item {}: base value must be positive, got: {}",
                item_number, base_value
            )));
        }
        Ok(())
    }
}
