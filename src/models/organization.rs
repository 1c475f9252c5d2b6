use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant boundary. Every plan, draft, and schedule query is scoped to one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub owner_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating an organization. Validated client-side before submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationInput {
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
}

impl OrganizationInput {
    /// Field-level validation, mirroring what the backend would reject anyway.
    /// Returns a map of field name to error message when invalid.
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();

        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Organization name is required".to_string());
        } else if self.name.len() > 200 {
            errors.insert("name".to_string(), "Organization name is too long (max 200 characters)".to_string());
        }

        if let Some(website) = &self.website {
            if url::Url::parse(website).is_err() {
                errors.insert("website".to_string(), format!("Not a valid URL: {}", website));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Partial update applied after a confirmed backend mutation. Absent fields are
/// left untouched, so applying the same patch twice is idempotent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
}

impl OrganizationPatch {
    pub fn apply(&self, org: &mut Organization) {
        if let Some(name) = &self.name {
            org.name = name.clone();
        }
        if let Some(website) = &self.website {
            org.website = Some(website.clone());
        }
        if let Some(industry) = &self.industry {
            org.industry = Some(industry.clone());
        }
        if let Some(size) = &self.size {
            org.size = Some(size.clone());
        }
    }
}

/// Aggregate counters for the organization dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub active_plans: u32,
    pub drafts_in_review: u32,
    pub scheduled_posts: u32,
    pub published_posts: u32,
}
