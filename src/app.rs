use std::sync::Arc;

use dioxus::prelude::*;

use crate::config::Config;
use crate::domain::entities::action::PendingAction;
use crate::domain::entities::rule::{Rule, RuleDraft, RuleSet};
use crate::infra::http::client::HttpRuleStore;
use crate::ui::state::app_state::AppState;
use crate::usecase::services::rule_service::RuleService;

#[component]
fn ConfirmDialog(
    title: &'static str,
    message: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1100;",
            div {
                style: "background: #fff; padding: 16px; border: 1px solid #999; min-width: 280px;",
                div { style: "margin-bottom: 8px; font-weight: 600;", "{title}" }
                div { style: "margin-bottom: 12px;", "{message}" }
                div { style: "display: flex; gap: 8px;",
                    button {
                        onclick: move |_| on_confirm.call(()),
                        "Yes"
                    }
                    button {
                        onclick: move |_| on_cancel.call(()),
                        "No"
                    }
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            return rsx! {
                div {
                    p { "Failed to load configuration: {err}" }
                }
            };
        }
    };

    let store = match HttpRuleStore::new(&config.store_url) {
        Ok(store) => store,
        Err(err) => {
            return rsx! {
                div {
                    p { "Failed to reach the rule store: {err}" }
                }
            };
        }
    };

    let AppState {
        mut drafts,
        mut rules,
        mut row_prices,
        mut rules_visible,
        mut confirm_delete_all,
        mut pending_action,
        mut busy,
        mut status,
    } = AppState::new();

    let service = Arc::new(RuleService::new(Arc::new(store)));
    let service_for_submit = service.clone();
    let service_for_view = service.clone();
    let service_for_delete_all = service.clone();
    let service_for_confirm = service.clone();
    let service_for_duplicate = service.clone();

    let drafts_snapshot = drafts();
    let first_draft = drafts_snapshot.first().cloned().unwrap_or_default();
    let rules_snapshot = rules();
    let row_prices_snapshot = row_prices();
    let pending_snapshot = pending_action();
    let rule_rows: Vec<(usize, Rule, String)> = rules_snapshot
        .entries()
        .iter()
        .cloned()
        .enumerate()
        .map(|(idx, rule)| {
            let price = row_prices_snapshot.get(idx).cloned().unwrap_or_default();
            (idx, rule, price)
        })
        .collect();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px; background: #fff; min-height: 100vh;",

            h2 { "Pricebook" }

            div { style: "margin-bottom: 12px;",
                span { "{status}" }
            }

            div { style: "margin-bottom: 12px;",
                div { style: "display: flex; gap: 8px; margin-bottom: 6px;",
                    input {
                        placeholder: "ID",
                        value: "{first_draft.id}",
                        oninput: move |event| {
                            if let Some(slot) = drafts.write().first_mut() {
                                slot.id = event.value();
                            }
                        },
                        onblur: move |_| {
                            let snapshot = drafts();
                            let Some(first) = snapshot.first() else {
                                return;
                            };
                            let new_id = first.id.trim().to_string();
                            if new_id.is_empty() {
                                return;
                            }
                            let new_price = first.price.trim().to_string();
                            let service = service_for_duplicate.clone();
                            spawn(async move {
                                match service.find_existing(&new_id).await {
                                    Ok(Some(existing_price)) => {
                                        *confirm_delete_all.write() = false;
                                        pending_action.set(Some(PendingAction::Edit {
                                            rule: Rule {
                                                id: new_id,
                                                price: existing_price,
                                            },
                                            new_price,
                                            overwrite: true,
                                        }));
                                    }
                                    Ok(None) => {}
                                    Err(err) => {
                                        tracing::error!("duplicate check failed: {err}");
                                    }
                                }
                            });
                        },
                    }
                    input {
                        placeholder: "PRICE",
                        value: "{first_draft.price}",
                        oninput: move |event| {
                            if let Some(slot) = drafts.write().first_mut() {
                                slot.price = event.value();
                            }
                        },
                    }
                }

                for (idx, draft) in drafts_snapshot.clone().into_iter().enumerate().skip(1) {
                    div { style: "display: flex; gap: 8px; margin-bottom: 6px;",
                        input {
                            placeholder: "ID",
                            value: "{draft.id}",
                            oninput: move |event| {
                                if let Some(slot) = drafts.write().get_mut(idx) {
                                    slot.id = event.value();
                                }
                            },
                        }
                        input {
                            placeholder: "PRICE",
                            value: "{draft.price}",
                            oninput: move |event| {
                                if let Some(slot) = drafts.write().get_mut(idx) {
                                    slot.price = event.value();
                                }
                            },
                        }
                    }
                }

                div { style: "display: flex; gap: 8px;",
                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            drafts.write().push(RuleDraft::default());
                        },
                        "Add more"
                    }
                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            let service = service_for_submit.clone();
                            spawn(async move {
                                *busy.write() = true;
                                let snapshot = drafts();
                                match service.submit_drafts(&snapshot).await {
                                    Ok(0) => {
                                        *status.write() = "No complete rules to submit".to_string();
                                    }
                                    Ok(count) => {
                                        for draft in drafts.write().iter_mut() {
                                            draft.clear();
                                        }
                                        *status.write() = format!("Added {count} rule(s)");
                                        if rules_visible() {
                                            refresh_rules(
                                                service.clone(),
                                                rules,
                                                row_prices,
                                                rules_visible,
                                                status,
                                            )
                                            .await;
                                        }
                                    }
                                    Err(err) => {
                                        tracing::error!("failed to add rules: {err}");
                                    }
                                }
                                *busy.write() = false;
                            });
                        },
                        "Submit rules"
                    }
                }
            }

            if !confirm_delete_all() {
                div { style: "display: flex; gap: 8px; margin-bottom: 12px;",
                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            if rules_visible() {
                                *rules_visible.write() = false;
                                return;
                            }
                            let service = service_for_view.clone();
                            spawn(async move {
                                *busy.write() = true;
                                refresh_rules(service, rules, row_prices, rules_visible, status)
                                    .await;
                                *busy.write() = false;
                            });
                        },
                        if rules_visible() { "Hide rules" } else { "View rules" }
                    }
                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            pending_action.set(None);
                            *rules_visible.write() = false;
                            *confirm_delete_all.write() = true;
                        },
                        "Delete all"
                    }
                }
            }

            if confirm_delete_all() {
                ConfirmDialog {
                    title: "Delete all rules",
                    message: "Are you sure you want to delete all rules?".to_string(),
                    on_confirm: move |_| {
                        let service = service_for_delete_all.clone();
                        spawn(async move {
                            *busy.write() = true;
                            match service.delete_all().await {
                                Ok(()) => {
                                    *rules.write() = RuleSet::default();
                                    row_prices.write().clear();
                                    *confirm_delete_all.write() = false;
                                    *status.write() = "All rules deleted".to_string();
                                }
                                Err(err) => {
                                    tracing::error!("failed to delete all rules: {err}");
                                }
                            }
                            *busy.write() = false;
                        });
                    },
                    on_cancel: move |_| {
                        *confirm_delete_all.write() = false;
                    },
                }
            }

            if rules_visible() {
                div { style: "margin-top: 4px;",
                    if rules_snapshot.is_empty() {
                        div { "No rules" }
                    }
                    for (idx, rule, price) in rule_rows {
                        div { style: "display: flex; gap: 8px; margin-bottom: 6px;",
                            input {
                                value: "{rule.id}",
                                disabled: true,
                            }
                            input {
                                value: "{price}",
                                oninput: move |event| {
                                    if let Some(slot) = row_prices.write().get_mut(idx) {
                                        *slot = event.value();
                                    }
                                },
                            }
                            button {
                                disabled: busy(),
                                onclick: {
                                    let rule = rule.clone();
                                    move |_| {
                                        let new_price = row_prices()
                                            .get(idx)
                                            .map(|price| price.trim().to_string())
                                            .unwrap_or_default();
                                        if new_price.is_empty() {
                                            return;
                                        }
                                        *confirm_delete_all.write() = false;
                                        pending_action.set(Some(PendingAction::Edit {
                                            rule: rule.clone(),
                                            new_price,
                                            overwrite: false,
                                        }));
                                    }
                                },
                                "Edit"
                            }
                            button {
                                disabled: busy(),
                                onclick: {
                                    let rule = rule.clone();
                                    move |_| {
                                        *confirm_delete_all.write() = false;
                                        pending_action
                                            .set(Some(PendingAction::Delete { rule: rule.clone() }));
                                    }
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }

            if let Some(action) = pending_snapshot {
                ConfirmDialog {
                    title: "Confirm change",
                    message: action.message(),
                    on_confirm: move |_| {
                        let Some(action) = pending_action() else {
                            return;
                        };
                        let service = service_for_confirm.clone();
                        spawn(async move {
                            *busy.write() = true;
                            match service.apply(&action).await {
                                Ok(()) => {
                                    pending_action.set(None);
                                    *status.write() = match &action {
                                        PendingAction::Edit { rule, .. } => {
                                            format!("Rule {} updated", rule.id)
                                        }
                                        PendingAction::Delete { rule } => {
                                            format!("Rule {} deleted", rule.id)
                                        }
                                    };
                                    refresh_rules(
                                        service.clone(),
                                        rules,
                                        row_prices,
                                        rules_visible,
                                        status,
                                    )
                                    .await;
                                }
                                Err(err) => {
                                    tracing::error!("failed to apply confirmed action: {err}");
                                }
                            }
                            *busy.write() = false;
                        });
                    },
                    on_cancel: move |_| {
                        pending_action.set(None);
                    },
                }
            }
        }
    }
}

/// Fetches the full rule set and renders it, leaving the list visible.
async fn refresh_rules(
    service: Arc<RuleService>,
    mut rules: Signal<RuleSet>,
    mut row_prices: Signal<Vec<String>>,
    mut rules_visible: Signal<bool>,
    mut status: Signal<String>,
) {
    match service.fetch_rules().await {
        Ok(fetched) => {
            *row_prices.write() = fetched
                .entries()
                .iter()
                .map(|rule| rule.price.clone())
                .collect();
            let count = fetched.len();
            *rules.write() = fetched;
            *rules_visible.write() = true;
            *status.write() = format!("Loaded {count} rule(s)");
        }
        Err(err) => {
            tracing::error!("failed to fetch rules: {err}");
        }
    }
}
