use serde_json::Value;

use super::{ApiClient, ClientError};

impl ApiClient {
    pub async fn health(&self) -> Result<Value, ClientError> {
        self.send(self.get("/health")).await
    }

    pub async fn health_database(&self) -> Result<Value, ClientError> {
        self.send(self.get("/health/database")).await
    }

    pub async fn health_cache(&self) -> Result<Value, ClientError> {
        self.send(self.get("/health/cache")).await
    }
}
