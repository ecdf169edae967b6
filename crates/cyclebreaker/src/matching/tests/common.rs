use crate::matching::{Candidate, GeoPoint, Job};

/// Johannesburg CBD.
pub(super) const JOBURG: GeoPoint = GeoPoint::new(-26.2041, 28.0473);
/// Soweto, roughly 20 km south-west of the CBD.
pub(super) const SOWETO: GeoPoint = GeoPoint::new(-26.2485, 27.8540);
/// Pretoria, roughly 55 km north.
pub(super) const PRETORIA: GeoPoint = GeoPoint::new(-25.7479, 28.2293);

pub(super) fn candidate() -> Candidate {
    let mut candidate = Candidate::new("cand-1", SOWETO);
    candidate.skills = vec!["Forklift".to_string(), "customer service".to_string()];
    candidate
}

pub(super) fn job(id: &str, location: GeoPoint, skills: &[&str]) -> Job {
    let mut job = Job::new(id, location);
    job.skills_required = skills.iter().map(|skill| skill.to_string()).collect();
    job
}
