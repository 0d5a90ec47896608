use std::sync::Arc;

use crate::domain::entities::action::PendingAction;
use crate::domain::entities::rule::{Rule, RuleDraft, RuleSet};
use crate::usecase::ports::store::{RuleStore, StoreError};

pub struct RuleService {
    store: Arc<dyn RuleStore>,
}

impl RuleService {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }

    /// Submits the drafts that form complete pairs as one batch. Returns how
    /// many rules were sent; zero means no request was made.
    pub async fn submit_drafts(&self, drafts: &[RuleDraft]) -> Result<usize, StoreError> {
        let rules = collect_valid_rules(drafts);
        if rules.is_empty() {
            return Ok(0);
        }
        self.store.add_rules(&rules).await?;
        Ok(rules.len())
    }

    pub async fn fetch_rules(&self) -> Result<RuleSet, StoreError> {
        self.store.get_rules().await
    }

    pub async fn apply(&self, action: &PendingAction) -> Result<(), StoreError> {
        match action {
            PendingAction::Edit {
                rule, new_price, ..
            } => {
                let update = Rule {
                    id: rule.id.clone(),
                    price: new_price.clone(),
                };
                self.store.edit_rule(&update).await
            }
            PendingAction::Delete { rule } => self.store.delete_rule(&rule.id).await,
        }
    }

    pub async fn delete_all(&self) -> Result<(), StoreError> {
        self.store.delete_all_rules().await
    }

    /// Looks up the stored price for `id`, if such a rule already exists.
    pub async fn find_existing(&self, id: &str) -> Result<Option<String>, StoreError> {
        let rules = self.store.get_rules().await?;
        Ok(rules.price_of(id).map(|price| price.to_string()))
    }
}

/// Keeps the pairs where both fields are non-empty after trimming.
pub fn collect_valid_rules(drafts: &[RuleDraft]) -> Vec<Rule> {
    drafts
        .iter()
        .filter_map(|draft| {
            let id = draft.id.trim();
            let price = draft.price.trim();
            if id.is_empty() || price.is_empty() {
                None
            } else {
                Some(Rule {
                    id: id.to_string(),
                    price: price.to_string(),
                })
            }
        })
        .collect()
}
