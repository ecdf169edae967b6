pub mod opportunity;
pub mod profile;

pub use opportunity::{
    ExtractionMethod, MatchResult, Opportunity, OpportunityCategory, Provenance,
};
pub use profile::{
    AgeBracket, CitizenshipStatus, CommuteMode, Consent, Constraints, Demographics,
    DeviceType, DisabilityStatus, Economic, EducationLevel, EducationSkills, EmploymentStatus,
    Goals, IncomeBracket, InternetAccess, Location, PreferredCategory, PrimaryGoal, Province,
    UserProfile,
};
