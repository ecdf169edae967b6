//! Commute cost model and job ranking for a single candidate.

mod domain;
mod ranking;
mod transport;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, EligibilityCheck, FareQuotedJob, GeoPoint, Job, MatchComponentScores,
    MatchOptions, MatchWeights, ModeParams, RankingResult, TransportMode, TransportParams,
    TransportQuote, TripEstimate,
};
pub use ranking::{is_eligible, rank_jobs_for_candidate};
pub use transport::{
    estimate_transport_quotes, estimate_trip, filter_jobs_by_fare, haversine_km, taxi_fare_zar,
    DEFAULT_MAX_FARE_ZAR, TRIP_MODEL,
};
