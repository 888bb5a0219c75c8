//! Reference data lookup endpoints.
//!
//! Thin HTTP surface over the configured `ReferenceDataProvider`:
//! single and batch lookups for NCM taxation profiles and ICMS rules.
//! Batch endpoints validate each entry independently and report bad
//! entries in `erros` while still serving the valid ones.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::reference::models::{validate_ncm, validate_uf, OperationType};
use crate::modules::reference::services::ReferenceDataProvider;

/// Provider handle shared across workers
pub type SharedProvider = Arc<dyn ReferenceDataProvider>;

#[derive(Debug, Deserialize)]
pub struct NcmQuery {
    pub ncm: String,
}

#[derive(Debug, Deserialize)]
pub struct IcmsQuery {
    pub uf_origem: String,
    pub uf_destino: String,
    pub ncm: String,
    #[serde(default)]
    pub tipo_operacao: Option<OperationType>,
}

#[derive(Debug, Deserialize)]
pub struct NcmBatchRequest {
    pub ncms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmsBatchItem {
    pub uf_origem: String,
    pub uf_destino: String,
    pub ncm: String,
    #[serde(default)]
    pub tipo_operacao: Option<OperationType>,
}

#[derive(Debug, Deserialize)]
pub struct IcmsBatchRequest {
    pub consultas: Vec<IcmsBatchItem>,
}

/// GET /ncm/consultar?ncm=84713012
pub async fn get_ncm(
    provider: web::Data<SharedProvider>,
    query: web::Query<NcmQuery>,
) -> Result<HttpResponse> {
    tracing::info!(ncm = %query.ncm, "Resolving NCM profile");
    let profile = provider.ncm_profile(&query.ncm).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /icms/consultar_aliquotas?uf_origem=SC&uf_destino=SP&ncm=84713012
pub async fn get_icms(
    provider: web::Data<SharedProvider>,
    query: web::Query<IcmsQuery>,
) -> Result<HttpResponse> {
    tracing::info!(
        origin = %query.uf_origem,
        dest = %query.uf_destino,
        ncm = %query.ncm,
        "Resolving ICMS rules"
    );
    let profile = provider
        .icms_profile(
            &query.uf_origem,
            &query.uf_destino,
            &query.ncm,
            query.tipo_operacao.unwrap_or_default(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /ncm/consultar_lote
pub async fn get_ncm_batch(
    provider: web::Data<SharedProvider>,
    request: web::Json<NcmBatchRequest>,
) -> HttpResponse {
    let total = request.ncms.len();
    tracing::info!(total, "Resolving NCM profile batch");

    let mut resultados = Vec::new();
    let mut erros = Vec::new();

    for ncm in &request.ncms {
        if let Err(err) = validate_ncm(ncm) {
            erros.push(serde_json::json!({ "ncm": ncm, "erro": err.to_string() }));
            continue;
        }
        match provider.ncm_profile(ncm).await {
            Ok(profile) => resultados.push(profile),
            Err(err) => {
                tracing::warn!(ncm = %ncm, error = %err, "NCM batch entry failed");
                erros.push(serde_json::json!({ "ncm": ncm, "erro": err.to_string() }));
            }
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "total": total,
        "sucesso": resultados.len(),
        "falhas": erros.len(),
        "resultados": resultados,
        "erros": erros,
    }))
}

/// POST /icms/consultar_lote
pub async fn get_icms_batch(
    provider: web::Data<SharedProvider>,
    request: web::Json<IcmsBatchRequest>,
) -> HttpResponse {
    let total = request.consultas.len();
    tracing::info!(total, "Resolving ICMS rule batch");

    let mut resultados = Vec::new();
    let mut erros = Vec::new();

    for item in &request.consultas {
        let origin = item.uf_origem.to_ascii_uppercase();
        let dest = item.uf_destino.to_ascii_uppercase();

        if let Err(err) = validate_uf(&origin)
            .and_then(|_| validate_uf(&dest))
            .and_then(|_| validate_ncm(&item.ncm))
        {
            erros.push(serde_json::json!({ "consulta": item, "erro": err.to_string() }));
            continue;
        }

        match provider
            .icms_profile(&origin, &dest, &item.ncm, item.tipo_operacao.unwrap_or_default())
            .await
        {
            Ok(profile) => resultados.push(profile),
            Err(err) => {
                tracing::warn!(ncm = %item.ncm, error = %err, "ICMS batch entry failed");
                erros.push(serde_json::json!({ "consulta": item, "erro": err.to_string() }));
            }
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "total": total,
        "sucesso": resultados.len(),
        "falhas": erros.len(),
        "resultados": resultados,
        "erros": erros,
    }))
}

/// Configure reference data routes
pub fn configure_reference_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ncm")
            .route("/consultar", web::get().to(get_ncm))
            .route("/consultar_lote", web::post().to(get_ncm_batch)),
    )
    .service(
        web::scope("/icms")
            .route("/consultar_aliquotas", web::get().to(get_icms))
            .route("/consultar_lote", web::post().to(get_icms_batch)),
    );
}
