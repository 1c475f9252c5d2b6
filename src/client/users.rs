use super::{ApiClient, ClientError};
use crate::models::{Organization, User};

impl ApiClient {
    /// The authenticated user, per the current bearer token.
    pub async fn me(&self) -> Result<User, ClientError> {
        self.send(self.get("/users/me")).await
    }

    /// Organizations the authenticated user belongs to.
    pub async fn my_organizations(&self) -> Result<Vec<Organization>, ClientError> {
        self.send(self.get("/users/me/organizations")).await
    }
}
