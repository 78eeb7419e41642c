//! Projection of one stored document into the fixed row shape

use crate::provider::RawRecord;
use serde_json::Value;

/// One untyped output row.
///
/// Every field is the raw provider value passed through unchanged, or `None`
/// when the source key is absent. Coercion to column types happens at
/// finalization, not here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployerRow {
    pub company_id: Option<Value>,
    pub company_name: Option<Value>,
    pub num_ratings: Option<Value>,
    pub overall_rating: Option<Value>,
    pub recommend_pct: Option<Value>,
    pub culture_rating: Option<Value>,
    pub comp_rating: Option<Value>,
    pub opportunity_rating: Option<Value>,
    pub leader_rating: Option<Value>,
    pub work_life_rating: Option<Value>,
    pub industry: Option<Value>,
}

/// Map one stored document to one output row.
///
/// Pure and total: any missing key becomes `None`, never an error.
pub fn project(record: &RawRecord) -> EmployerRow {
    let get = |key: &str| record.get(key).cloned();
    EmployerRow {
        company_id: get("id"),
        company_name: get("name"),
        num_ratings: get("numberOfRatings"),
        overall_rating: get("overallRating"),
        recommend_pct: get("recommendToFriendRating"),
        culture_rating: get("cultureAndValuesRating"),
        comp_rating: get("compensationAndBenefitsRating"),
        opportunity_rating: get("careerOpportunitiesRating"),
        leader_rating: get("seniorLeadershipRating"),
        work_life_rating: get("workLifeBalanceRating"),
        industry: get("industryName"),
    }
}
