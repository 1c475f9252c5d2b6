use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ClientError};
use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl ApiClient {
    /// Exchange credentials for a bearer token. The caller stores the result
    /// in the session store; this method does not mutate the session itself.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = json!({ "email": email, "password": password });
        self.send(self.post("/auth/login").json(&body)).await
    }
}
