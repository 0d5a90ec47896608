use async_trait::async_trait;

use crate::domain::entities::rule::{Rule, RuleSet};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("rule store returned an error: {0}")]
    Backend(String),
    #[error("rule store rejected the request")]
    Rejected,
    #[error("{0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}

/// Seam to the remote rule store behind the five CRUD endpoints.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn add_rules(&self, rules: &[Rule]) -> Result<(), StoreError>;
    async fn get_rules(&self) -> Result<RuleSet, StoreError>;
    async fn edit_rule(&self, rule: &Rule) -> Result<(), StoreError>;
    async fn delete_rule(&self, id: &str) -> Result<(), StoreError>;
    async fn delete_all_rules(&self) -> Result<(), StoreError>;
}
