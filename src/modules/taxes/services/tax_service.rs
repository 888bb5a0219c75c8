use std::sync::Arc;

use futures_util::future::join_all;

use crate::core::{AppError, Result};
use crate::modules::reference::models::{validate_uf, OperationType};
use crate::modules::reference::services::ReferenceDataProvider;
use crate::modules::taxes::models::{
    CalculationRequest, CalculationResponse, ItemAssessment, ItemError, LineItemRequest,
};
use crate::modules::taxes::services::invoice_aggregator::InvoiceAggregator;
use crate::modules::taxes::services::item_calculator::LineItemTaxCalculator;
use crate::modules::taxes::services::result_formatter::ResultFormatter;

/// Orchestrates a full invoice calculation: resolves reference data per
/// line item, runs the calculator, aggregates and formats.
///
/// Item-level failures (bad input, missing reference data, unknown
/// codes) become entries of the response's failure list; the request
/// itself fails only when the payload as a whole is unusable.
pub struct TaxService {
    provider: Arc<dyn ReferenceDataProvider>,
    calculator: LineItemTaxCalculator,
    aggregator: InvoiceAggregator,
    formatter: ResultFormatter,
}

impl TaxService {
    pub fn new(provider: Arc<dyn ReferenceDataProvider>) -> Self {
        Self {
            provider,
            calculator: LineItemTaxCalculator::new(),
            aggregator: InvoiceAggregator::new(),
            formatter: ResultFormatter::new(),
        }
    }

    /// Compute the tax breakdown and totals for a whole invoice
    pub async fn calculate(&self, request: CalculationRequest) -> Result<CalculationResponse> {
        let origin = request.uf_origem.to_ascii_uppercase();
        let dest = request.uf_destino.to_ascii_uppercase();
        validate_uf(&origin)?;
        validate_uf(&dest)?;

        if request.itens.is_empty() {
            return Err(AppError::invalid_input(
                "Invoice must have at least one line item",
            ));
        }

        let operation_type = request.operation_type();
        tracing::info!(
            origin = %origin,
            dest = %dest,
            items = request.itens.len(),
            operation = %operation_type,
            "Calculating invoice taxes"
        );

        // Items are independent: resolve and compute them concurrently,
        // keeping input order for reproducible output
        let outcomes: Vec<std::result::Result<ItemAssessment, ItemError>> = join_all(
            request
                .itens
                .iter()
                .cloned()
                .map(|item| self.assess_item(item, &origin, &dest, operation_type)),
        )
        .await;

        let item_responses: Vec<_> = outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().ok())
            .map(|assessment| self.formatter.format_item(assessment))
            .collect();

        let (totals, failures) = self.aggregator.aggregate(outcomes);

        if !failures.is_empty() {
            tracing::warn!(
                failed = failures.len(),
                succeeded = totals.item_count,
                "Invoice computed with item failures"
            );
        }

        Ok(self.formatter.format_response(
            request.chave_acesso,
            request.numero_nf,
            item_responses,
            &totals,
            &failures,
        ))
    }

    /// Resolve reference data and compute one item; any failure is
    /// reported against the item, never the invoice
    async fn assess_item(
        &self,
        item_request: LineItemRequest,
        origin: &str,
        dest: &str,
        operation_type: OperationType,
    ) -> std::result::Result<ItemAssessment, ItemError> {
        let item_number = item_request.numero_item;

        let assessed: Result<ItemAssessment> = async {
            let item = item_request.into_line_item()?;
            let ncm_profile = self.provider.ncm_profile(&item.ncm).await?;
            let icms_profile = self
                .provider
                .icms_profile(origin, dest, &item.ncm, operation_type)
                .await?;
            self.calculator.compute_item(&item, &ncm_profile, &icms_profile)
        }
        .await;

        assessed.map_err(|err| {
            tracing::warn!(item = item_number, error = %err, "Item assessment failed");
            ItemError::new(item_number, &err)
        })
    }
}
