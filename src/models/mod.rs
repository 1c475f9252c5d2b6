pub mod correlation;
pub mod draft;
pub mod organization;
pub mod plan;
pub mod schedule;
pub mod topic;
pub mod user;

pub use correlation::{CorrelationRule, CorrelationStrength, TimingStrategy};
pub use draft::{ContentDraft, ContentStatus, ContentVariant};
pub use organization::{DashboardStats, Organization, OrganizationInput, OrganizationPatch};
pub use plan::{ContentPlan, ContentPlanInput, PlanStatus};
pub use schedule::{PublishStatus, ScheduledPost};
pub use topic::{SuggestedTopic, TopicStatus};
pub use user::User;
