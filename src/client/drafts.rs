use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{ContentDraft, ContentVariant};

impl ApiClient {
    pub async fn list_drafts(&self, plan_id: Uuid) -> Result<Vec<ContentDraft>, ClientError> {
        self.send(self.get(&format!("/content-plans/{}/drafts", plan_id))).await
    }

    pub async fn draft_variants(&self, draft_id: Uuid) -> Result<Vec<ContentVariant>, ClientError> {
        self.send(self.get(&format!("/content-drafts/{}/variants", draft_id))).await
    }
}
