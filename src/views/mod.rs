//! Plan view routing. The backend owns the plan lifecycle; the client only
//! maps the status it last fetched onto one of a closed set of views.

use crate::models::{PlanStatus, ScheduledPost};

/// Which generation phase a progress view reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    BlogTopics,
    SocialTopics,
    Drafts,
}

impl GenerationStage {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationStage::BlogTopics => "generating blog topics",
            GenerationStage::SocialTopics => "generating social media topics",
            GenerationStage::Drafts => "generating drafts",
        }
    }
}

/// The view a plan's current state selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanView {
    /// Generic overview; also the forward-compatible fallback for statuses
    /// this client does not know about.
    Overview,
    GenerationProgress(GenerationStage),
    BlogTopicApproval,
    DraftApproval,
    DraftReviewBoard,
    Scheduling,
    /// Completed plan with scheduled posts to show.
    Calendar,
    /// Completed plan whose schedule came back empty.
    EmptySchedule,
    GenerationError,
}

impl PlanView {
    pub fn for_plan(status: PlanStatus, schedule: &[ScheduledPost]) -> PlanView {
        match status {
            PlanStatus::New => PlanView::Overview,
            PlanStatus::GeneratingTopics => PlanView::GenerationProgress(GenerationStage::BlogTopics),
            PlanStatus::PendingBlogTopicApproval => PlanView::BlogTopicApproval,
            PlanStatus::GeneratingSmTopics => PlanView::GenerationProgress(GenerationStage::SocialTopics),
            PlanStatus::PendingDraftApproval => PlanView::DraftApproval,
            PlanStatus::GeneratingDrafts => PlanView::GenerationProgress(GenerationStage::Drafts),
            PlanStatus::Draft | PlanStatus::Review => PlanView::DraftReviewBoard,
            PlanStatus::PendingFinalScheduling => PlanView::Scheduling,
            PlanStatus::Complete => {
                if schedule.is_empty() {
                    PlanView::EmptySchedule
                } else {
                    PlanView::Calendar
                }
            }
            PlanStatus::Error => PlanView::GenerationError,
            // Statuses added by newer backends render the overview rather
            // than failing; the client never guesses their meaning.
            PlanStatus::Unknown => PlanView::Overview,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::PublishStatus;

    fn scheduled_post() -> ScheduledPost {
        ScheduledPost {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            variant_id: Uuid::new_v4(),
            platform: "linkedin".to_string(),
            scheduled_for: Utc::now(),
            status: PublishStatus::Scheduled,
        }
    }

    #[test]
    fn complete_plan_with_schedule_renders_calendar() {
        let posts = vec![scheduled_post()];
        assert_eq!(PlanView::for_plan(PlanStatus::Complete, &posts), PlanView::Calendar);
    }

    #[test]
    fn complete_plan_with_empty_schedule_renders_empty_state() {
        assert_eq!(PlanView::for_plan(PlanStatus::Complete, &[]), PlanView::EmptySchedule);
    }

    #[test]
    fn generating_states_render_progress_with_stage() {
        assert_eq!(
            PlanView::for_plan(PlanStatus::GeneratingSmTopics, &[]),
            PlanView::GenerationProgress(GenerationStage::SocialTopics)
        );
    }

    #[test]
    fn unknown_status_falls_back_to_overview() {
        let status: PlanStatus = serde_json::from_str("\"pending_hologram_review\"").unwrap();
        assert_eq!(PlanView::for_plan(status, &[]), PlanView::Overview);
    }

    #[test]
    fn error_state_renders_error_view_regardless_of_schedule() {
        let posts = vec![scheduled_post()];
        assert_eq!(PlanView::for_plan(PlanStatus::Error, &posts), PlanView::GenerationError);
    }
}
