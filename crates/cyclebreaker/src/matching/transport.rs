use tracing::debug;

use super::domain::{
    Candidate, FareQuotedJob, GeoPoint, Job, TransportParams, TransportQuote, TripEstimate,
};

const EARTH_RADIUS_KM: f64 = 6371.0;
const TAXI_BASE_ZAR: f64 = 10.0;
const TAXI_PER_KM_ZAR: f64 = 3.5;

/// Cap used by [`filter_jobs_by_fare`] when the caller does not set one.
pub const DEFAULT_MAX_FARE_ZAR: f64 = 30.0;
/// Label reported with every [`TripEstimate`].
pub const TRIP_MODEL: &str = "haversine_taxi_v1";

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Quotes every preferred mode for the commute to `job`.
///
/// Quotes within the candidate's budget are kept; when none fit, all quotes
/// are returned so the caller still sees the cheapest options. The result is
/// ordered by duration, then cost.
pub fn estimate_transport_quotes(
    candidate: &Candidate,
    job: &Job,
    params: Option<&TransportParams>,
) -> Vec<TransportQuote> {
    let defaults = TransportParams::default();
    let params = params.unwrap_or(&defaults);
    let distance_km = haversine_km(candidate.location, job.location);
    let stipend = job.transport_stipend_zar.unwrap_or(0.0);

    let quotes: Vec<TransportQuote> = candidate
        .modes()
        .iter()
        .map(|&mode| {
            let mode_params = params.for_mode(mode);
            let duration_min = distance_km / mode_params.speed_kmh * 60.0;
            let gross = mode_params.base_zar + mode_params.cost_per_km * distance_km;
            let cost_zar = (gross - stipend).max(0.0);
            let within_budget = candidate
                .commute_budget_zar
                .map_or(true, |budget| cost_zar <= budget);

            TransportQuote {
                mode,
                distance_km,
                duration_min,
                cost_zar,
                within_budget,
            }
        })
        .collect();

    let mut selected: Vec<TransportQuote> = quotes
        .iter()
        .copied()
        .filter(|quote| quote.within_budget)
        .collect();
    if selected.is_empty() {
        debug!(candidate = %candidate.id, job = %job.id, "no transport quote within budget");
        selected = quotes;
    }

    selected.sort_by(|a, b| {
        a.duration_min
            .total_cmp(&b.duration_min)
            .then_with(|| a.cost_zar.total_cmp(&b.cost_zar))
    });
    selected
}

/// Minibus-taxi fare heuristic rounded to cents.
pub fn taxi_fare_zar(distance_km: f64) -> f64 {
    round_cents(TAXI_BASE_ZAR + TAXI_PER_KM_ZAR * distance_km)
}

/// Distance and taxi fare for a single point-to-point trip.
pub fn estimate_trip(origin: GeoPoint, destination: GeoPoint) -> TripEstimate {
    let distance_km = haversine_km(origin, destination);
    TripEstimate {
        origin,
        destination,
        distance_km,
        taxi_cost_zar: taxi_fare_zar(distance_km),
        model: TRIP_MODEL.to_string(),
    }
}

/// Annotates each job with distance and taxi fare from `origin`, keeping the
/// ones whose fare is at most `max_cost_zar`.
pub fn filter_jobs_by_fare(
    origin: GeoPoint,
    jobs: &[Job],
    max_cost_zar: Option<f64>,
) -> Vec<FareQuotedJob> {
    let max_cost_zar = max_cost_zar.unwrap_or(DEFAULT_MAX_FARE_ZAR);

    jobs.iter()
        .map(|job| {
            let distance_km = haversine_km(origin, job.location);
            FareQuotedJob {
                job: job.clone(),
                distance_km,
                taxi_cost_zar: taxi_fare_zar(distance_km),
            }
        })
        .filter(|quoted| quoted.taxi_cost_zar <= max_cost_zar)
        .collect()
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
