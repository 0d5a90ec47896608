use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::Config;
use crate::domain::entities::action::PendingAction;
use crate::domain::entities::rule::{Rule, RuleDraft, RuleSet};
use crate::infra::http::client::HttpRuleStore;
use crate::usecase::ports::store::StoreError;
use crate::usecase::services::rule_service::{collect_valid_rules, RuleService};

fn draft(id: &str, price: &str) -> RuleDraft {
    RuleDraft {
        id: id.to_string(),
        price: price.to_string(),
    }
}

fn rule(id: &str, price: &str) -> Rule {
    Rule {
        id: id.to_string(),
        price: price.to_string(),
    }
}

fn service_for(server: &MockServer) -> RuleService {
    let store = HttpRuleStore::new(&server.uri()).expect("mock server URL should parse");
    RuleService::new(Arc::new(store))
}

fn ok_ack() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true }))
}

#[test]
fn collect_valid_rules_trims_and_filters() {
    let drafts = vec![
        draft(" A1 ", " 10 "),
        draft("", "5"),
        draft("B2", "   "),
        draft("C3", "20"),
    ];

    let rules = collect_valid_rules(&drafts);

    assert_eq!(rules, vec![rule("A1", "10"), rule("C3", "20")]);
}

#[test]
fn collect_valid_rules_keeps_nothing_from_blank_drafts() {
    let drafts = vec![draft("", ""), draft("  ", "  ")];

    assert!(collect_valid_rules(&drafts).is_empty());
}

#[test]
fn rule_set_preserves_backend_order() {
    let rules: RuleSet =
        serde_json::from_str(r#"{"B2":"20","A1":"10"}"#).expect("rule set should deserialize");

    let ids: Vec<&str> = rules.entries().iter().map(|rule| rule.id.as_str()).collect();

    assert_eq!(ids, vec!["B2", "A1"], "document order should be kept");
}

#[test]
fn rule_set_price_lookup() {
    let rules = RuleSet::from(vec![rule("A1", "10"), rule("B2", "20")]);

    assert_eq!(rules.price_of("B2"), Some("20"));
    assert_eq!(rules.price_of("ZZ"), None);
}

#[test]
fn pending_action_messages_name_both_prices() {
    let edit = PendingAction::Edit {
        rule: rule("A1", "10"),
        new_price: "25".to_string(),
        overwrite: false,
    };
    let overwrite = PendingAction::Edit {
        rule: rule("A1", "10"),
        new_price: "25".to_string(),
        overwrite: true,
    };
    let delete = PendingAction::Delete {
        rule: rule("A1", "10"),
    };

    assert!(edit.message().contains("10") && edit.message().contains("25"));
    assert!(overwrite.message().contains("already exists"));
    assert!(delete.message().contains("A1") && delete.message().contains("10"));
}

#[test]
fn config_defaults_to_local_store_url() {
    let config: Config = serde_json::from_str("{}").expect("empty config should parse");

    assert_eq!(config.store_url, "http://127.0.0.1:8000");
}

#[tokio::test]
async fn submit_drafts_posts_only_complete_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add_rule"))
        .and(body_json(json!([{ "id": "A1", "price": "10" }])))
        .respond_with(ok_ack())
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let drafts = vec![draft(" A1 ", " 10 "), draft("", "5"), draft("B2", "")];

    let sent = service
        .submit_drafts(&drafts)
        .await
        .expect("submit should succeed");

    assert_eq!(sent, 1, "only the complete pair should be sent");
}

#[tokio::test]
async fn submit_drafts_sends_no_request_for_blank_drafts() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ok_ack())
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let drafts = vec![draft("", ""), draft("  ", "  ")];

    let sent = service
        .submit_drafts(&drafts)
        .await
        .expect("empty submit should be a no-op");

    assert_eq!(sent, 0);
}

#[tokio::test]
async fn fetch_rules_keeps_backend_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_rules"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"B2":"20","A1":"10"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let service = service_for(&server);

    let rules = service.fetch_rules().await.expect("fetch should succeed");

    let ids: Vec<&str> = rules.entries().iter().map(|rule| rule.id.as_str()).collect();
    assert_eq!(ids, vec!["B2", "A1"]);
    assert_eq!(rules.price_of("A1"), Some("10"));
}

#[tokio::test]
async fn fetch_rules_non_ok_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_rules"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = service_for(&server);

    let result = service.fetch_rules().await;

    assert!(
        matches!(result, Err(StoreError::Backend(_))),
        "expected backend error, got {result:?}"
    );
}

#[tokio::test]
async fn confirmed_delete_targets_the_armed_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/delete_rule/A1"))
        .respond_with(ok_ack())
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let action = PendingAction::Delete {
        rule: rule("A1", "10"),
    };

    service.apply(&action).await.expect("delete should succeed");
}

#[tokio::test]
async fn confirmed_edit_sends_id_unchanged_with_new_price() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/edit_rule"))
        .and(body_json(json!({ "id": "A1", "price": "25" })))
        .respond_with(ok_ack())
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let action = PendingAction::Edit {
        rule: rule("A1", "10"),
        new_price: "25".to_string(),
        overwrite: false,
    };

    service.apply(&action).await.expect("edit should succeed");
}

#[tokio::test]
async fn delete_all_posts_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/delete_all_rules"))
        .respond_with(ok_ack())
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);

    service
        .delete_all()
        .await
        .expect("delete all should succeed");
}

#[tokio::test]
async fn rejected_ack_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/delete_all_rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let service = service_for(&server);

    let result = service.delete_all().await;

    assert!(
        matches!(result, Err(StoreError::Rejected)),
        "expected rejection, got {result:?}"
    );
}

#[tokio::test]
async fn find_existing_returns_stored_price_only_for_known_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_rules"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "A1": "10", "B2": "20" })),
        )
        .mount(&server)
        .await;

    let service = service_for(&server);

    let known = service
        .find_existing("A1")
        .await
        .expect("lookup should succeed");
    let unknown = service
        .find_existing("ZZ")
        .await
        .expect("lookup should succeed");

    assert_eq!(known, Some("10".to_string()));
    assert_eq!(unknown, None);
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pricing/get_rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "A1": "10" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRuleStore::new(&format!("{}/pricing", server.uri()))
        .expect("prefixed URL should parse");
    let service = RuleService::new(Arc::new(store));

    let rules = service.fetch_rules().await.expect("fetch should succeed");

    assert_eq!(rules.len(), 1);
}
