use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walk,
    MinibusTaxi,
    Bus,
    Train,
    Ridehailing,
}

impl TransportMode {
    /// Modes quoted when a candidate states no preference.
    pub const DEFAULT_PREFERRED: [TransportMode; 4] = [
        TransportMode::Walk,
        TransportMode::MinibusTaxi,
        TransportMode::Bus,
        TransportMode::Train,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walk => "walk",
            TransportMode::MinibusTaxi => "minibus_taxi",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Ridehailing => "ridehailing",
        }
    }

    pub const fn default_params(self) -> ModeParams {
        match self {
            TransportMode::Walk => ModeParams::new(4.5, 0.0, 0.0),
            TransportMode::MinibusTaxi => ModeParams::new(25.0, 2.5, 10.0),
            TransportMode::Bus => ModeParams::new(22.0, 2.0, 8.0),
            TransportMode::Train => ModeParams::new(35.0, 1.5, 10.0),
            TransportMode::Ridehailing => ModeParams::new(27.0, 8.5, 12.0),
        }
    }
}

/// Speed and fare model for one transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeParams {
    pub speed_kmh: f64,
    pub cost_per_km: f64,
    pub base_zar: f64,
}

impl ModeParams {
    pub const fn new(speed_kmh: f64, cost_per_km: f64, base_zar: f64) -> Self {
        Self {
            speed_kmh,
            cost_per_km,
            base_zar,
        }
    }
}

/// Per-mode overrides of the built-in transport model. Modes without an
/// override keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportParams {
    overrides: BTreeMap<TransportMode, ModeParams>,
}

impl TransportParams {
    pub fn with_override(mut self, mode: TransportMode, params: ModeParams) -> Self {
        self.overrides.insert(mode, params);
        self
    }

    pub fn overrides(&self) -> impl Iterator<Item = (TransportMode, ModeParams)> + '_ {
        self.overrides.iter().map(|(mode, params)| (*mode, *params))
    }

    pub fn for_mode(&self, mode: TransportMode) -> ModeParams {
        self.overrides
            .get(&mode)
            .copied()
            .unwrap_or_else(|| mode.default_params())
    }
}

/// Commute estimate for one mode between a candidate and a job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportQuote {
    pub mode: TransportMode,
    pub distance_km: f64,
    pub duration_min: f64,
    pub cost_zar: f64,
    pub within_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_salary_zar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_commute_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commute_budget_zar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_modes: Option<Vec<TransportMode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type_prefs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_prefs: Option<Vec<String>>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            location,
            skills: Vec::new(),
            expected_salary_zar: None,
            max_commute_min: None,
            commute_budget_zar: None,
            preferred_modes: None,
            job_type_prefs: None,
            shift_prefs: None,
        }
    }

    /// Preferred modes, falling back to the default set when none are given.
    pub fn modes(&self) -> &[TransportMode] {
        match self.preferred_modes.as_deref() {
            Some(modes) if !modes.is_empty() => modes,
            _ => &TransportMode::DEFAULT_PREFERRED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub location: GeoPoint,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_zar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_stipend_zar: Option<f64>,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub hybrid: bool,
}

impl Job {
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            title: None,
            location,
            skills_required: Vec::new(),
            salary_zar: None,
            job_type: None,
            shift: None,
            transport_stipend_zar: None,
            remote: false,
            hybrid: false,
        }
    }

    /// Remote and hybrid roles are ranked without a commute.
    pub fn is_off_site(&self) -> bool {
        self.remote || self.hybrid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skill: f64,
    pub transport: f64,
    pub compensation: f64,
    pub preferences: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            transport: 0.3,
            compensation: 0.2,
            preferences: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_skill_coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<MatchWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_params: Option<TransportParams>,
    #[serde(default)]
    pub explain: bool,
}

impl MatchOptions {
    pub const DEFAULT_TOP_K: usize = 20;
    pub const DEFAULT_MIN_SKILL_COVERAGE: f64 = 0.5;

    /// Fills unset limits from service-level defaults.
    pub fn or_defaults(mut self, top_k: usize, min_skill_coverage: f64) -> Self {
        self.top_k.get_or_insert(top_k);
        self.min_skill_coverage.get_or_insert(min_skill_coverage);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k.unwrap_or(Self::DEFAULT_TOP_K)
    }

    pub fn min_skill_coverage(&self) -> f64 {
        self.min_skill_coverage
            .unwrap_or(Self::DEFAULT_MIN_SKILL_COVERAGE)
    }

    pub fn weights(&self) -> MatchWeights {
        self.weights.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchComponentScores {
    pub skill: f64,
    pub transport: f64,
    pub compensation: f64,
    pub preferences: f64,
}

impl MatchComponentScores {
    pub fn weighted(&self, weights: &MatchWeights) -> f64 {
        weights.skill * self.skill
            + weights.transport * self.transport
            + weights.compensation * self.compensation
            + weights.preferences * self.preferences
    }
}

/// Soft eligibility signal for a candidate/job pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCheck {
    pub ok: bool,
    pub reasons: Vec<String>,
    pub skill_coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub job: Job,
    pub total: f64,
    pub components: MatchComponentScores,
    pub transport: Option<TransportQuote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
}

/// Job annotated with its straight-line distance and estimated taxi fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareQuotedJob {
    #[serde(flatten)]
    pub job: Job,
    pub distance_km: f64,
    pub taxi_cost_zar: f64,
}

/// Straight-line trip between two points priced with the taxi fare heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEstimate {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_km: f64,
    pub taxi_cost_zar: f64,
    pub model: String,
}
