use crate::domain::UserProfile;

use super::value::RuleValue;

/// Dotted profile path referenced by a `var` operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Known(ProfileField),
    /// Path outside the profile schema; always resolves to absent.
    Unknown(String),
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        ProfileField::ALL
            .iter()
            .copied()
            .find(|field| field.path() == path)
            .map(FieldPath::Known)
            .unwrap_or_else(|| FieldPath::Unknown(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldPath::Known(field) => field.path(),
            FieldPath::Unknown(path) => path,
        }
    }

    pub fn resolve(&self, profile: &UserProfile) -> Option<RuleValue> {
        match self {
            FieldPath::Known(field) => field.resolve(profile).filter(|value| !value.is_null()),
            FieldPath::Unknown(_) => None,
        }
    }

    /// Human-readable label used in match explanations.
    pub fn label(&self) -> String {
        match self {
            FieldPath::Known(field) => field
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| humanize(field.path())),
            FieldPath::Unknown(path) => humanize(path),
        }
    }
}

fn humanize(path: &str) -> String {
    path.replace(['_', '.'], " ")
}

/// Every profile attribute a rule may reference, including the two computed
/// numeric bracket fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    CountryCode,
    ProvinceCode,
    Municipality,
    PostalCode,
    Geohash,
    AgeBracket,
    AgeBracketNumeric,
    CitizenshipStatus,
    DisabilityStatus,
    EmploymentStatus,
    IncomeBracket,
    IncomeBracketNumeric,
    DependentsCount,
    HighestEducationLevel,
    Skills,
    Certifications,
    TransportMode,
    MaxCommuteKm,
    InternetAccess,
    DeviceType,
    HoursPerWeek,
    PrimaryGoal,
    PreferredCategories,
    LanguagePrefs,
    ConsentDataProcessing,
    ShareAnonymized,
}

impl ProfileField {
    pub const ALL: [ProfileField; 26] = [
        ProfileField::CountryCode,
        ProfileField::ProvinceCode,
        ProfileField::Municipality,
        ProfileField::PostalCode,
        ProfileField::Geohash,
        ProfileField::AgeBracket,
        ProfileField::AgeBracketNumeric,
        ProfileField::CitizenshipStatus,
        ProfileField::DisabilityStatus,
        ProfileField::EmploymentStatus,
        ProfileField::IncomeBracket,
        ProfileField::IncomeBracketNumeric,
        ProfileField::DependentsCount,
        ProfileField::HighestEducationLevel,
        ProfileField::Skills,
        ProfileField::Certifications,
        ProfileField::TransportMode,
        ProfileField::MaxCommuteKm,
        ProfileField::InternetAccess,
        ProfileField::DeviceType,
        ProfileField::HoursPerWeek,
        ProfileField::PrimaryGoal,
        ProfileField::PreferredCategories,
        ProfileField::LanguagePrefs,
        ProfileField::ConsentDataProcessing,
        ProfileField::ShareAnonymized,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            ProfileField::CountryCode => "location.country_code",
            ProfileField::ProvinceCode => "location.province_code",
            ProfileField::Municipality => "location.municipality",
            ProfileField::PostalCode => "location.postal_code",
            ProfileField::Geohash => "location.geohash",
            ProfileField::AgeBracket => "demographics.age_bracket",
            ProfileField::AgeBracketNumeric => "demographics.age_bracket_numeric",
            ProfileField::CitizenshipStatus => "demographics.citizenship_status",
            ProfileField::DisabilityStatus => "demographics.disability_status",
            ProfileField::EmploymentStatus => "economic.employment_status",
            ProfileField::IncomeBracket => "economic.income_bracket",
            ProfileField::IncomeBracketNumeric => "economic.income_bracket_numeric",
            ProfileField::DependentsCount => "economic.dependents_count",
            ProfileField::HighestEducationLevel => "education_skills.highest_education_level",
            ProfileField::Skills => "education_skills.skills",
            ProfileField::Certifications => "education_skills.certifications",
            ProfileField::TransportMode => "constraints.transport_mode",
            ProfileField::MaxCommuteKm => "constraints.max_commute_km",
            ProfileField::InternetAccess => "constraints.internet_access",
            ProfileField::DeviceType => "constraints.device_type",
            ProfileField::HoursPerWeek => "constraints.time_availability_hours_per_week",
            ProfileField::PrimaryGoal => "goals.primary_goal",
            ProfileField::PreferredCategories => "goals.preferred_categories",
            ProfileField::LanguagePrefs => "goals.language_prefs",
            ProfileField::ConsentDataProcessing => "consent.consent_data_processing",
            ProfileField::ShareAnonymized => "consent.share_anonymized",
        }
    }

    pub const fn label(self) -> Option<&'static str> {
        match self {
            ProfileField::CountryCode => Some("Country"),
            ProfileField::ProvinceCode => Some("Province"),
            ProfileField::Municipality => Some("Municipality"),
            ProfileField::AgeBracket => Some("Age group"),
            ProfileField::CitizenshipStatus => Some("Citizenship status"),
            ProfileField::DisabilityStatus => Some("Disability status"),
            ProfileField::EmploymentStatus => Some("Employment status"),
            ProfileField::IncomeBracket | ProfileField::IncomeBracketNumeric => {
                Some("Income level")
            }
            ProfileField::DependentsCount => Some("Number of dependents"),
            ProfileField::HighestEducationLevel => Some("Education level"),
            ProfileField::Skills => Some("Skills"),
            ProfileField::Certifications => Some("Certifications"),
            ProfileField::TransportMode => Some("Transport method"),
            ProfileField::MaxCommuteKm => Some("Maximum commute distance"),
            ProfileField::InternetAccess => Some("Internet access"),
            ProfileField::DeviceType => Some("Device type"),
            ProfileField::HoursPerWeek => Some("Available hours per week"),
            ProfileField::PrimaryGoal => Some("Primary goal"),
            ProfileField::PreferredCategories => Some("Preferred categories"),
            ProfileField::LanguagePrefs => Some("Language preferences"),
            ProfileField::PostalCode
            | ProfileField::Geohash
            | ProfileField::AgeBracketNumeric
            | ProfileField::ConsentDataProcessing
            | ProfileField::ShareAnonymized => None,
        }
    }

    fn resolve(self, profile: &UserProfile) -> Option<RuleValue> {
        let location = profile.location.as_ref();
        let demographics = profile.demographics.as_ref();
        let economic = profile.economic.as_ref();
        let education = profile.education_skills.as_ref();
        let constraints = profile.constraints.as_ref();
        let goals = profile.goals.as_ref();

        match self {
            ProfileField::CountryCode => location.map(|l| text(&l.country_code)),
            ProfileField::ProvinceCode => location?.province_code.map(|p| text(p.label())),
            ProfileField::Municipality => location?.municipality.as_deref().map(text),
            ProfileField::PostalCode => location?.postal_code.as_deref().map(text),
            ProfileField::Geohash => location?.geohash.as_deref().map(text),
            ProfileField::AgeBracket => demographics?.age_bracket.map(|b| text(b.label())),
            ProfileField::AgeBracketNumeric => demographics?
                .age_bracket
                .map(|b| RuleValue::Number(b.midpoint())),
            ProfileField::CitizenshipStatus => {
                demographics?.citizenship_status.map(|s| text(s.label()))
            }
            ProfileField::DisabilityStatus => {
                demographics?.disability_status.map(|s| text(s.label()))
            }
            ProfileField::EmploymentStatus => {
                economic?.employment_status.map(|s| text(s.label()))
            }
            ProfileField::IncomeBracket => economic?.income_bracket.map(|b| text(b.label())),
            ProfileField::IncomeBracketNumeric => economic?
                .income_bracket
                .map(|b| RuleValue::Number(b.midpoint_zar())),
            ProfileField::DependentsCount => economic?
                .dependents_count
                .map(|count| RuleValue::Number(f64::from(count))),
            ProfileField::HighestEducationLevel => education?
                .highest_education_level
                .map(|level| text(level.label())),
            ProfileField::Skills => education?.skills.as_deref().map(text_list),
            ProfileField::Certifications => education?.certifications.as_deref().map(text_list),
            ProfileField::TransportMode => constraints?.transport_mode.map(|m| text(m.label())),
            ProfileField::MaxCommuteKm => constraints?.max_commute_km.map(RuleValue::Number),
            ProfileField::InternetAccess => {
                constraints?.internet_access.map(|a| text(a.label()))
            }
            ProfileField::DeviceType => constraints?.device_type.map(|d| text(d.label())),
            ProfileField::HoursPerWeek => constraints?
                .time_availability_hours_per_week
                .map(RuleValue::Number),
            ProfileField::PrimaryGoal => goals?.primary_goal.map(|g| text(g.label())),
            ProfileField::PreferredCategories => goals?
                .preferred_categories
                .as_ref()
                .map(|categories| {
                    RuleValue::List(categories.iter().map(|c| text(c.label())).collect())
                }),
            ProfileField::LanguagePrefs => goals?.language_prefs.as_deref().map(text_list),
            ProfileField::ConsentDataProcessing => {
                Some(RuleValue::Bool(profile.consent.consent_data_processing))
            }
            ProfileField::ShareAnonymized => profile.consent.share_anonymized.map(RuleValue::Bool),
        }
    }
}

fn text(value: &str) -> RuleValue {
    RuleValue::Text(value.to_string())
}

fn text_list(values: &[String]) -> RuleValue {
    RuleValue::List(values.iter().map(|value| text(value)).collect())
}
