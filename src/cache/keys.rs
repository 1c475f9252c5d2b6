//! Query key constructors, one per cached read. Mutations reference these
//! same constructors when declaring what they invalidate, so the whole
//! read/invalidate graph lives in this file and the mutation call sites.

use uuid::Uuid;

use super::QueryKey;

pub fn organizations() -> QueryKey {
    QueryKey::bare("organizations")
}

pub fn organization(id: Uuid) -> QueryKey {
    QueryKey::new("organization", [id])
}

pub fn dashboard_stats(organization_id: Uuid) -> QueryKey {
    QueryKey::new("dashboard-stats", [organization_id])
}

pub fn plans(organization_id: Uuid) -> QueryKey {
    QueryKey::new("content-plans", [organization_id])
}

pub fn plan(plan_id: Uuid) -> QueryKey {
    QueryKey::new("content-plan", [plan_id])
}

pub fn schedule(plan_id: Uuid) -> QueryKey {
    QueryKey::new("schedule", [plan_id])
}

pub fn suggested_topics(plan_id: Uuid) -> QueryKey {
    QueryKey::new("suggested-topics", [plan_id])
}

pub fn correlation_rules(plan_id: Uuid) -> QueryKey {
    QueryKey::new("correlation-rules", [plan_id])
}

pub fn sm_distribution(plan_id: Uuid) -> QueryKey {
    QueryKey::new("sm-distribution", [plan_id])
}

pub fn generation_insights(plan_id: Uuid) -> QueryKey {
    QueryKey::new("generation-insights", [plan_id])
}

pub fn drafts(plan_id: Uuid) -> QueryKey {
    QueryKey::new("content-drafts", [plan_id])
}

pub fn variants(draft_id: Uuid) -> QueryKey {
    QueryKey::new("content-variants", [draft_id])
}
