pub mod auth;
pub mod draft;
pub mod health;
pub mod org;
pub mod plan;
pub mod variant;
