//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use genelink_core::{
  association::AssociationRecord,
  query::NewQuery,
  store::QueryStore,
  summary::SummaryRecord,
};
use serde_json::json;
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn sample_query(user_id: Uuid, gene: &str, disease: &str) -> NewQuery {
  NewQuery {
    user_id,
    gene: gene.to_owned(),
    disease: disease.to_owned(),
    association: AssociationRecord::from_value(json!({
      "summary": format!("{gene}-{disease}-association"),
    })),
    summary: None,
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_user() {
  let s = store().await;

  let created = s.create_user("alice", "key123").await.unwrap();
  assert_eq!(created.username, "alice");
  assert_eq!(created.api_key, "key123");

  let found = s.find_user_by_name("alice").await.unwrap().unwrap();
  assert_eq!(found.user_id, created.user_id);
  assert_eq!(found.api_key, "key123");
}

#[tokio::test]
async fn find_unregistered_user_returns_none() {
  let s = store().await;
  let result = s.find_user_by_name("ghost").await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn duplicate_username_is_rejected_and_first_credential_retained() {
  let s = store().await;
  s.create_user("bob", "key123").await.unwrap();

  let err = s.create_user("bob", "key999").await.unwrap_err();
  assert!(matches!(err, crate::Error::UsernameTaken(ref u) if u == "bob"));

  let user = s.find_user_by_name("bob").await.unwrap().unwrap();
  assert_eq!(user.api_key, "key123");
}

#[tokio::test]
async fn user_created_at_is_set_by_the_store() {
  let s = store().await;
  let user = s.create_user("carol", "key789").await.unwrap();
  assert!(user.created_at <= Utc::now());
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_list_round_trips_the_association() {
  let s = store().await;
  let user = s.create_user("dave", "key001").await.unwrap();

  let appended = s
    .append_query(sample_query(user.user_id, "TP53", "cancer"))
    .await
    .unwrap();

  let queries = s.list_queries(user.user_id).await.unwrap();
  assert_eq!(queries.len(), 1);

  let q = &queries[0];
  assert_eq!(q.query_id, appended.query_id);
  assert_eq!(q.user_id, user.user_id);
  assert_eq!(q.gene, "TP53");
  assert_eq!(q.disease, "cancer");
  assert_eq!(q.association.raw["summary"], json!("TP53-cancer-association"));
  assert!(q.summary.is_none());
}

#[tokio::test]
async fn append_with_summary_round_trips_all_three_keys() {
  let s = store().await;
  let user = s.create_user("frank", "key002").await.unwrap();

  let mut input = sample_query(user.user_id, "TP53", "cancer");
  input.summary = Some(SummaryRecord {
    summary_text: "TP53 is associated with cancer".into(),
    key_findings: vec!["Mutation found in TP53 gene".into()],
    confidence:   Some(0.95),
  });

  s.append_query(input.clone()).await.unwrap();

  let queries = s.list_queries(user.user_id).await.unwrap();
  assert_eq!(queries.len(), 1);
  assert_eq!(queries[0].summary, input.summary);
}

#[tokio::test]
async fn query_created_at_is_set_by_the_store() {
  let s = store().await;
  let user = s.create_user("eve", "key003").await.unwrap();

  let record = s
    .append_query(sample_query(user.user_id, "BRCA1", "breast cancer"))
    .await
    .unwrap();
  assert!(record.created_at <= Utc::now());
}

#[tokio::test]
async fn list_returns_queries_in_insertion_order() {
  let s = store().await;
  let user = s.create_user("bob", "key123").await.unwrap();

  s.append_query(sample_query(user.user_id, "BRCA1", "cancer"))
    .await
    .unwrap();
  s.append_query(sample_query(user.user_id, "TP53", "leukemia"))
    .await
    .unwrap();

  let queries = s.list_queries(user.user_id).await.unwrap();
  assert_eq!(queries.len(), 2);
  assert_eq!(queries[0].gene, "BRCA1");
  assert_eq!(queries[1].gene, "TP53");
}

#[tokio::test]
async fn queries_are_scoped_to_their_user() {
  let s = store().await;
  let alice = s.create_user("alice", "k1").await.unwrap();
  let bob = s.create_user("bob", "k2").await.unwrap();

  s.append_query(sample_query(alice.user_id, "BRCA1", "cancer"))
    .await
    .unwrap();
  s.append_query(sample_query(bob.user_id, "TP53", "leukemia"))
    .await
    .unwrap();

  let for_alice = s.list_queries(alice.user_id).await.unwrap();
  assert_eq!(for_alice.len(), 1);
  assert_eq!(for_alice[0].gene, "BRCA1");

  let for_bob = s.list_queries(bob.user_id).await.unwrap();
  assert_eq!(for_bob.len(), 1);
  assert_eq!(for_bob[0].gene, "TP53");
}

#[tokio::test]
async fn list_for_user_with_no_queries_is_empty() {
  let s = store().await;
  let user = s.create_user("quiet", "k1").await.unwrap();
  let queries = s.list_queries(user.user_id).await.unwrap();
  assert!(queries.is_empty());
}
