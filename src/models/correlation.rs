use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Loose,
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingStrategy {
    SameDay,
    NextDay,
    Spread,
}

/// Per-plan configuration describing how social posts relate to blog posts.
/// Pure configuration; the only derived value the client computes is the
/// projected post count used for the over-quota warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRule {
    pub sm_posts_per_blog: u32,
    pub brief_based_sm_posts: u32,
    pub standalone_sm_posts: u32,
    pub correlation_strength: CorrelationStrength,
    pub timing_strategy: TimingStrategy,
}

impl CorrelationRule {
    /// Total social posts this rule would produce against a blog quota.
    pub fn projected_sm_posts(&self, blog_posts_quota: u32) -> u32 {
        blog_posts_quota * self.sm_posts_per_blog + self.brief_based_sm_posts + self.standalone_sm_posts
    }

    /// True when the projection exceeds the plan's social media quota. Rendered
    /// as a warning before submission; the backend may still reject on its own.
    pub fn over_quota(&self, blog_posts_quota: u32, sm_posts_quota: u32) -> bool {
        self.projected_sm_posts(blog_posts_quota) > sm_posts_quota
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(per_blog: u32, brief: u32, standalone: u32) -> CorrelationRule {
        CorrelationRule {
            sm_posts_per_blog: per_blog,
            brief_based_sm_posts: brief,
            standalone_sm_posts: standalone,
            correlation_strength: CorrelationStrength::Moderate,
            timing_strategy: TimingStrategy::Spread,
        }
    }

    #[test]
    fn projection_counts_all_three_sources() {
        // 10 blogs * 2 posts each + 5 brief-based + 3 standalone = 28
        assert_eq!(rule(2, 5, 3).projected_sm_posts(10), 28);
    }

    #[test]
    fn over_quota_flags_when_projection_exceeds_quota() {
        let r = rule(2, 5, 3);
        assert!(r.over_quota(10, 20)); // 28 > 20
        assert!(!r.over_quota(10, 28)); // exactly at quota is allowed
    }
}
