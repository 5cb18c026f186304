use crate::error::ComparatorError;
use crate::models::amount;
use crate::models::{DataSource, PodiatryAllowance};
use crate::report::{export_csv, format_results};
use crate::service::ComparatorService;
use axum::{
    extract::{Json, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ComparatorError {
    fn into_response(self) -> Response {
        let status = match &self {
            ComparatorError::InsurerNotFound(_) => StatusCode::NOT_FOUND,
            ComparatorError::PlanNotFound { .. }
            | ComparatorError::InvalidAmount { .. }
            | ComparatorError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ComparatorError::Io(_) | ComparatorError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!("Request rejected ({}): {}", status, self);
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

type ApiResult<T> = Result<T, ComparatorError>;

fn required<'a>(value: &'a Option<String>, name: &str) -> ApiResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ComparatorError::MissingParameter(name.to_string())),
    }
}

fn parse_price(value: &Option<String>, name: &str) -> ApiResult<BigDecimal> {
    let raw = required(value, name)?;
    amount::parse(raw).ok_or_else(|| ComparatorError::InvalidAmount {
        field: name.to_string(),
        value: raw.to_string(),
    })
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
pub struct PlanSummary {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "pourcentageBR", with = "amount")]
    pub reimbursement_rate: BigDecimal,
    #[serde(rename = "forfaitAnnuel", with = "amount")]
    pub flat_allowance: BigDecimal,
    #[serde(rename = "forfaitPodologie")]
    pub podiatry: Option<PodiatryAllowance>,
}

#[derive(Debug, Serialize)]
pub struct InsurerSummary {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "siren")]
    pub legal_id: String,
    #[serde(rename = "codesAMC")]
    pub amc_codes: Vec<String>,
    #[serde(rename = "formules")]
    pub plans: Vec<PlanSummary>,
    #[serde(rename = "frequence")]
    pub frequency: String,
    pub conditions: String,
    #[serde(rename = "dataSource")]
    pub data_source: DataSource,
    #[serde(rename = "confidenceScore")]
    pub confidence_score: f64,
}

/// GET /api/mutuelles
pub async fn list_insurers(
    State(service): State<Arc<ComparatorService>>,
) -> Json<Vec<InsurerSummary>> {
    let summaries = service
        .insurers()
        .iter()
        .map(|m| InsurerSummary {
            name: m.name.clone(),
            legal_id: m.legal_id.clone(),
            amc_codes: m.amc_codes.clone(),
            plans: m
                .plans
                .iter()
                .map(|(name, plan)| PlanSummary {
                    name: name.clone(),
                    reimbursement_rate: plan.reimbursement_rate.clone(),
                    flat_allowance: plan.flat_allowance.clone().unwrap_or_else(BigDecimal::zero),
                    podiatry: plan.podiatry.clone(),
                })
                .collect(),
            frequency: m.frequency.clone(),
            conditions: m.conditions.clone(),
            data_source: m.data_source,
            confidence_score: m.confidence_score,
        })
        .collect();

    Json(summaries)
}

#[derive(Debug, Deserialize)]
pub struct CalculationQuery {
    pub mutuelle: Option<String>,
    pub formule: Option<String>,
    pub prix: Option<String>,
}

/// GET /api/calcul?mutuelle=X&formule=Y&prix=Z
///
/// 价格缺失或无法解析时按 0 计算, 仍返回报销上限.
pub async fn calculation(
    State(service): State<Arc<ComparatorService>>,
    Query(query): Query<CalculationQuery>,
) -> ApiResult<Response> {
    let insurer = required(&query.mutuelle, "mutuelle")?;
    let plan = required(&query.formule, "formule")?;
    let price = query
        .prix
        .as_deref()
        .and_then(amount::parse)
        .unwrap_or_else(BigDecimal::zero);

    let detail = service.calculate(insurer, plan, &price)?;
    Ok(Json(detail).into_response())
}

#[derive(Debug, Deserialize)]
pub struct SimulationQuery {
    pub mutuelle: Option<String>,
    pub formule: Option<String>,
    #[serde(rename = "prixSemelles")]
    pub insoles_price: Option<String>,
    #[serde(rename = "prixBilan")]
    pub assessment_price: Option<String>,
}

/// GET /api/simulation?mutuelle=X&formule=Y&prixSemelles=S&prixBilan=B
pub async fn simulation(
    State(service): State<Arc<ComparatorService>>,
    Query(query): Query<SimulationQuery>,
) -> ApiResult<Response> {
    let insurer = required(&query.mutuelle, "mutuelle")?;
    let plan = required(&query.formule, "formule")?;
    let insoles = parse_price(&query.insoles_price, "prixSemelles")?;
    let assessment = parse_price(&query.assessment_price, "prixBilan")?;

    let result = service.simulate(insurer, plan, &insoles, &assessment)?;
    Ok(Json(result).into_response())
}

#[derive(Debug, Deserialize)]
pub struct OptimizationQuery {
    pub mutuelle: Option<String>,
    pub formule: Option<String>,
    #[serde(rename = "prixTotal")]
    pub total_price: Option<String>,
}

/// GET /api/optimisation?mutuelle=X&formule=Y&prixTotal=T
pub async fn optimization(
    State(service): State<Arc<ComparatorService>>,
    Query(query): Query<OptimizationQuery>,
) -> ApiResult<Response> {
    let insurer = required(&query.mutuelle, "mutuelle")?;
    let plan = required(&query.formule, "formule")?;
    let total = parse_price(&query.total_price, "prixTotal")?;

    let result = service.optimize(insurer, plan, &total)?;
    Ok(Json(result).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub prix: Option<String>,
    pub formule: Option<String>,
    pub format: Option<String>,
}

/// GET /api/comparaison?prix=P[&formule=F][&format=json|csv|text]
pub async fn comparison(
    State(service): State<Arc<ComparatorService>>,
    Query(query): Query<ComparisonQuery>,
) -> ApiResult<Response> {
    let price = parse_price(&query.prix, "prix")?;
    let filter = query.formule.as_deref().filter(|f| !f.is_empty());
    let results = service.compare(&price, filter)?;

    let response = match query.format.as_deref() {
        Some("csv") => match export_csv(&results) {
            Ok(body) => ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response(),
            Err(e) => {
                tracing::error!("CSV export failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Some("text") => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format_results(&results),
        )
            .into_response(),
        _ => Json(results).into_response(),
    };
    Ok(response)
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub mutuelle: Option<String>,
    pub formule: Option<String>,
    pub prix: Option<String>,
    pub patient: Option<String>,
    pub podologue: Option<String>,
}

/// GET /api/devis?mutuelle=X&formule=Y&prix=Z&patient=N&podologue=P
pub async fn quote(
    State(service): State<Arc<ComparatorService>>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<Response> {
    let insurer = required(&query.mutuelle, "mutuelle")?;
    let plan = required(&query.formule, "formule")?;
    let price = parse_price(&query.prix, "prix")?;
    let date = chrono::Local::now().format("%d/%m/%Y").to_string();

    let html = service.quote(
        insurer,
        plan,
        &price,
        query.patient.as_deref(),
        query.podologue.as_deref(),
        date,
    )?;
    Ok(Html(html).into_response())
}
