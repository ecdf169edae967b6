use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Person seeking opportunities. Every section except consent is optional so
/// partially completed onboarding still produces a usable profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic: Option<Economic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_skills: Option<EducationSkills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goals>,
    pub consent: Consent,
}

impl UserProfile {
    /// Profile carrying only the mandatory consent section.
    pub fn with_consent(consent: Consent) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            location: None,
            demographics: None,
            economic: None,
            education_skills: None,
            constraints: None,
            goals: None,
            consent,
        }
    }

    pub fn province(&self) -> Option<Province> {
        self.location.as_ref().and_then(|location| location.province_code)
    }

    pub fn primary_goal(&self) -> Option<PrimaryGoal> {
        self.goals.as_ref().and_then(|goals| goals.primary_goal)
    }

    pub fn transport_mode(&self) -> Option<CommuteMode> {
        self.constraints
            .as_ref()
            .and_then(|constraints| constraints.transport_mode)
    }

    pub fn preferred_categories(&self) -> &[PreferredCategory] {
        self.goals
            .as_ref()
            .and_then(|goals| goals.preferred_categories.as_deref())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_code: Option<Province>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Five character geohash (~4.9km precision).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geohash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_bracket: Option<AgeBracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizenship_status: Option<CitizenshipStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disability_status: Option<DisabilityStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Economic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<EmploymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_bracket: Option<IncomeBracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependents_count: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EducationSkills {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_education_level: Option<EducationLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<CommuteMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_commute_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_access: Option<InternetAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_availability_hours_per_week: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_goal: Option<PrimaryGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_categories: Option<Vec<PreferredCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_prefs: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consent {
    pub terms_accepted_at: DateTime<Utc>,
    pub consent_data_processing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_anonymized: Option<bool>,
}

/// Declares a serde-backed enum together with its wire label so rule
/// evaluation can compare against the same strings the profile was stored with.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

labelled_enum!(
    /// South African province codes.
    Province {
        WesternCape => "WC",
        Gauteng => "GP",
        KwaZuluNatal => "KZN",
        EasternCape => "EC",
        FreeState => "FS",
        NorthWest => "NW",
        NorthernCape => "NC",
        Mpumalanga => "MP",
        Limpopo => "LP",
    }
);

labelled_enum!(AgeBracket {
    From16To17 => "16_17",
    From18To24 => "18_24",
    From25To34 => "25_34",
    From35To49 => "35_49",
    FiftyPlus => "50_plus",
});

impl AgeBracket {
    /// Representative age used by numeric eligibility comparisons.
    pub const fn midpoint(self) -> f64 {
        match self {
            AgeBracket::From16To17 => 16.5,
            AgeBracket::From18To24 => 21.0,
            AgeBracket::From25To34 => 29.5,
            AgeBracket::From35To49 => 42.0,
            AgeBracket::FiftyPlus => 55.0,
        }
    }
}

labelled_enum!(CitizenshipStatus {
    Citizen => "citizen",
    PermanentResident => "permanent_resident",
    Refugee => "refugee",
    Other => "other",
});

labelled_enum!(DisabilityStatus {
    None => "none",
    Physical => "physical",
    Visual => "visual",
    Hearing => "hearing",
    Intellectual => "intellectual",
    Multiple => "multiple",
});

labelled_enum!(EmploymentStatus {
    Unemployed => "unemployed",
    InformalEmployed => "informal_employed",
    FormalEmployed => "formal_employed",
    SelfEmployed => "self_employed",
    Student => "student",
});

labelled_enum!(IncomeBracket {
    Below1000 => "lt_1000_zar",
    From1000To3000 => "1000_3000_zar",
    From3000To5000 => "3000_5000_zar",
    Above5000 => "5000_plus_zar",
});

impl IncomeBracket {
    /// Representative monthly income in ZAR.
    pub const fn midpoint_zar(self) -> f64 {
        match self {
            IncomeBracket::Below1000 => 500.0,
            IncomeBracket::From1000To3000 => 2000.0,
            IncomeBracket::From3000To5000 => 4000.0,
            IncomeBracket::Above5000 => 7500.0,
        }
    }
}

labelled_enum!(EducationLevel {
    NoSchooling => "no_schooling",
    Primary => "primary",
    Secondary => "secondary",
    Matric => "matric",
    Tvet => "tvet",
    Diploma => "diploma",
    Degree => "degree",
});

labelled_enum!(
    /// Everyday commute method captured during onboarding.
    CommuteMode {
        Walk => "walk",
        Taxi => "taxi",
        Bus => "bus",
        Private => "private",
    }
);

labelled_enum!(InternetAccess {
    None => "none",
    Limited => "limited",
    Unlimited => "unlimited",
});

labelled_enum!(DeviceType {
    FeaturePhone => "feature_phone",
    SmartphoneLowEnd => "smartphone_lowend",
    SmartphoneMidRange => "smartphone_midrange",
});

labelled_enum!(PrimaryGoal {
    FindJob => "find_job",
    GetGrant => "get_grant",
    GetTraining => "get_training",
    ReduceCosts => "reduce_costs",
});

labelled_enum!(PreferredCategory {
    Jobs => "jobs",
    Grants => "grants",
    Training => "training",
    Savings => "savings",
    Health => "health",
    Debt => "debt",
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_minimal_profile_with_consent_only() {
        let profile: UserProfile = serde_json::from_value(json!({
            "consent": {
                "terms_accepted_at": "2025-01-01T00:00:00Z",
                "consent_data_processing": true
            }
        }))
        .expect("minimal profile parses");

        assert!(profile.location.is_none());
        assert!(profile.preferred_categories().is_empty());
        assert!(profile.consent.consent_data_processing);
    }

    #[test]
    fn rejects_profile_without_consent() {
        let result = serde_json::from_value::<UserProfile>(json!({
            "location": { "country_code": "ZA" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn bracket_labels_match_wire_format() {
        let bracket: AgeBracket = serde_json::from_value(json!("25_34")).expect("bracket parses");
        assert_eq!(bracket, AgeBracket::From25To34);
        assert_eq!(bracket.label(), "25_34");
        assert_eq!(bracket.midpoint(), 29.5);
        assert_eq!(IncomeBracket::Below1000.midpoint_zar(), 500.0);
        assert_eq!(Province::KwaZuluNatal.label(), "KZN");
    }
}
