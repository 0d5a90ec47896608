use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::rule::{Rule, RuleSet};
use crate::usecase::ports::store::{RuleStore, StoreError};

pub struct HttpRuleStore {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpRuleStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let url = Url::parse(base_url)
            .map_err(|err| StoreError::Config(format!("invalid rule store URL: {err}")))?;
        Ok(Self {
            base_url: url,
            http: reqwest::Client::new(),
        })
    }

    // The base URL may carry a path prefix, so endpoint paths are appended
    // to it rather than joined as absolute paths.
    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw)
            .map_err(|err| StoreError::Config(format!("invalid endpoint path: {err}")))
    }
}

#[async_trait]
impl RuleStore for HttpRuleStore {
    async fn add_rules(&self, rules: &[Rule]) -> Result<(), StoreError> {
        let url = self.endpoint("/add_rule")?;
        let response = self.http.post(url).json(rules).send().await?;
        let ack: Ack = parse_response(response).await?;
        ack.into_result()
    }

    async fn get_rules(&self) -> Result<RuleSet, StoreError> {
        let url = self.endpoint("/get_rules")?;
        let response = self.http.get(url).send().await?;
        parse_response(response).await
    }

    async fn edit_rule(&self, rule: &Rule) -> Result<(), StoreError> {
        let url = self.endpoint("/edit_rule")?;
        let response = self.http.post(url).json(rule).send().await?;
        let ack: Ack = parse_response(response).await?;
        ack.into_result()
    }

    async fn delete_rule(&self, id: &str) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("/delete_rule/{id}"))?;
        let response = self.http.post(url).send().await?;
        let ack: Ack = parse_response(response).await?;
        ack.into_result()
    }

    async fn delete_all_rules(&self) -> Result<(), StoreError> {
        let url = self.endpoint("/delete_all_rules")?;
        let response = self.http.post(url).send().await?;
        let ack: Ack = parse_response(response).await?;
        ack.into_result()
    }
}

#[derive(Debug, Deserialize)]
struct Ack {
    success: bool,
}

impl Ack {
    fn into_result(self) -> Result<(), StoreError> {
        if self.success {
            Ok(())
        } else {
            Err(StoreError::Rejected)
        }
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| StoreError::Http(err.to_string()))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Backend(format!("{status}: {body}")))
    }
}
