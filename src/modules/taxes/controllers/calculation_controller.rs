//! Invoice calculation endpoint.

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::modules::taxes::models::CalculationRequest;
use crate::modules::taxes::services::TaxService;

/// POST /notas/calcular
///
/// Computes the full tax breakdown for every item of the invoice and
/// the invoice totals. Item-level failures are reported in `erros`
/// while the remaining items are still served.
pub async fn calculate_invoice(
    service: web::Data<TaxService>,
    request: web::Json<CalculationRequest>,
) -> Result<HttpResponse> {
    let response = service.calculate(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Configure tax calculation routes
pub fn configure_calculation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/notas").route("/calcular", web::post().to(calculate_invoice)));
}
