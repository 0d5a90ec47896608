use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::action::PendingAction;
use crate::domain::entities::rule::{RuleDraft, RuleSet};

pub struct AppState {
    pub drafts: Signal<Vec<RuleDraft>>,
    pub rules: Signal<RuleSet>,
    pub row_prices: Signal<Vec<String>>,
    pub rules_visible: Signal<bool>,
    pub confirm_delete_all: Signal<bool>,
    pub pending_action: Signal<Option<PendingAction>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            drafts: use_signal(|| vec![RuleDraft::default()]),
            rules: use_signal(RuleSet::default),
            row_prices: use_signal(Vec::<String>::new),
            rules_visible: use_signal(|| false),
            confirm_delete_all: use_signal(|| false),
            pending_action: use_signal(|| None::<PendingAction>),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
