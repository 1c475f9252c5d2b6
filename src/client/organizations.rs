use uuid::Uuid;

use super::{ApiClient, ClientError};
use crate::models::{DashboardStats, Organization, OrganizationInput, OrganizationPatch};

impl ApiClient {
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, ClientError> {
        self.send(self.get("/organizations")).await
    }

    pub async fn get_organization(&self, id: Uuid) -> Result<Organization, ClientError> {
        self.send(self.get(&format!("/organizations/{}", id))).await
    }

    pub async fn create_organization(&self, input: &OrganizationInput) -> Result<Organization, ClientError> {
        self.send(self.post("/organizations").json(input)).await
    }

    pub async fn update_organization(
        &self,
        id: Uuid,
        patch: &OrganizationPatch,
    ) -> Result<Organization, ClientError> {
        self.send(self.put(&format!("/organizations/{}", id)).json(patch)).await
    }

    pub async fn delete_organization(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_no_content(self.delete(&format!("/organizations/{}", id))).await
    }

    /// Aggregate counters for the organization dashboard view.
    pub async fn dashboard_stats(&self, id: Uuid) -> Result<DashboardStats, ClientError> {
        self.send(self.get(&format!("/organizations/{}/dashboard", id))).await
    }
}
