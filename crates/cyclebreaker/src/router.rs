use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::MatchingDefaults;
use crate::debt::{
    analyze_debts, negotiation_templates, DebtAnalyzeRequest, DebtAnalyzeResponse,
    NegotiationTemplateRequest, NegotiationTemplateResponse,
};
use crate::domain::{MatchResult, Opportunity, UserProfile};
use crate::eligibility::match_opportunities;
use crate::error::AppError;
use crate::guard;
use crate::matching::{
    estimate_transport_quotes, estimate_trip, filter_jobs_by_fare, rank_jobs_for_candidate,
    Candidate, FareQuotedJob, GeoPoint, Job, MatchOptions, RankingResult, TransportParams,
    TransportQuote, TripEstimate,
};

/// Shared state for the engine routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineState {
    pub matching: MatchingDefaults,
}

/// Router exposing the decision engines over JSON.
pub fn engine_router(state: EngineState) -> Router {
    Router::new()
        .route("/api/v1/opportunities/match", post(match_handler))
        .route("/api/v1/jobs/rank", post(rank_handler))
        .route("/api/v1/transport/quotes", post(quotes_handler))
        .route("/api/v1/transport/fare-filter", post(fare_filter_handler))
        .route("/api/v1/transport/calculate", post(trip_handler))
        .route("/api/v1/debt/analyze", post(debt_analyze_handler))
        .route(
            "/api/v1/debt/negotiation-templates",
            post(negotiation_handler),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub profile: UserProfile,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub candidate: Candidate,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub options: MatchOptions,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub results: Vec<RankingResult>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub candidate: Candidate,
    pub job: Job,
    #[serde(default)]
    pub params: Option<TransportParams>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quotes: Vec<TransportQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareFilterRequest {
    pub origin: GeoPoint,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub max_cost_zar: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FareFilterResponse {
    pub count: usize,
    pub jobs: Vec<FareQuotedJob>,
}

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

pub(crate) async fn match_handler(
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    guard::validate_opportunities(&request.opportunities)?;
    let matches = match_opportunities(&request.profile, &request.opportunities);
    Ok(Json(MatchResponse { matches }))
}

pub(crate) async fn rank_handler(
    State(state): State<EngineState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let options = state.matching.apply(request.options);
    guard::validate_ranking_request(&request.candidate, &request.jobs, &options)?;
    let results = rank_jobs_for_candidate(&request.candidate, &request.jobs, &options);
    Ok(Json(RankResponse { results }))
}

pub(crate) async fn quotes_handler(
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    guard::validate_candidate(&request.candidate)?;
    guard::validate_job(&request.job)?;
    if let Some(params) = &request.params {
        guard::validate_transport_params(params)?;
    }
    let quotes = estimate_transport_quotes(&request.candidate, &request.job, request.params.as_ref());
    Ok(Json(QuoteResponse { quotes }))
}

pub(crate) async fn fare_filter_handler(
    Json(request): Json<FareFilterRequest>,
) -> Result<Json<FareFilterResponse>, AppError> {
    guard::validate_origin(&request.origin)?;
    request.jobs.iter().try_for_each(guard::validate_job)?;
    guard::validate_fare_cap(request.max_cost_zar)?;
    let jobs = filter_jobs_by_fare(request.origin, &request.jobs, request.max_cost_zar);
    Ok(Json(FareFilterResponse {
        count: jobs.len(),
        jobs,
    }))
}

pub(crate) async fn trip_handler(
    Json(request): Json<TripRequest>,
) -> Result<Json<TripEstimate>, AppError> {
    guard::validate_origin(&request.origin)?;
    guard::validate_point("destination", &request.destination)?;
    Ok(Json(estimate_trip(request.origin, request.destination)))
}

pub(crate) async fn debt_analyze_handler(
    Json(request): Json<DebtAnalyzeRequest>,
) -> Result<Json<DebtAnalyzeResponse>, AppError> {
    guard::validate_debt_request(&request)?;
    Ok(Json(analyze_debts(&request)))
}

pub(crate) async fn negotiation_handler(
    Json(request): Json<NegotiationTemplateRequest>,
) -> Json<NegotiationTemplateResponse> {
    Json(negotiation_templates(&request))
}
