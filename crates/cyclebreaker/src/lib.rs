//! CycleBreaker decision engine: eligibility rules and opportunity scoring,
//! commute-aware job ranking, and debt analysis, plus the configuration,
//! telemetry, validation and HTTP plumbing shared by the service binary.

pub mod collaborators;
pub mod config;
pub mod debt;
pub mod domain;
pub mod eligibility;
pub mod error;
pub mod guard;
pub mod matching;
pub mod router;
pub mod telemetry;

pub use router::{engine_router, EngineState};
