//! End-to-end tests for the export pipeline against canned responses.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashSet;

use aclrdf_core::triples::render_groups;
use aclrdf_core::{BlankNodeSequence, Error, MockAclSource, OutputTarget, export};
use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// Builds a response payload the way Dgraph returns it: each group's rules
/// are a JSON array serialized into a string.
fn response(groups: &[(&str, Option<Vec<(&str, i64)>>)]) -> Vec<u8> {
    let me: Vec<serde_json::Value> = groups
        .iter()
        .map(|(uid, rules)| match rules {
            Some(rules) => {
                let blob: Vec<serde_json::Value> = rules
                    .iter()
                    .map(|(predicate, perm)| json!({"predicate": predicate, "perm": perm}))
                    .collect();
                json!({"uid": uid, "dgraph.group.acl": serde_json::to_string(&blob).unwrap()})
            }
            None => json!({"uid": uid}),
        })
        .collect();
    serde_json::to_vec(&json!({ "me": me })).unwrap()
}

async fn export_to_file(payload: Vec<u8>) -> (TempDir, std::result::Result<String, Error>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("acl_rules.rdf");
    let source = MockAclSource::with_payload(payload);
    let result = export(&source, &OutputTarget::file(&path))
        .await
        .map(|_| std::fs::read_to_string(&path).unwrap());
    (dir, result)
}

#[tokio::test]
async fn test_round_trip_example() {
    let payload =
        br#"{"me":[{"uid":"0x1","dgraph.group.acl":"[{\"predicate\":\"name\",\"perm\":4}]"}]}"#;
    let (_dir, result) = export_to_file(payload.to_vec()).await;

    assert_eq!(
        result.unwrap(),
        "<0x1> <dgraph.acl.rule> _:newrule1 .\n\
         _:newrule1 <dgraph.rule.predicate> \"name\" .\n\
         _:newrule1 <dgraph.rule.permission> \"4\" .\n"
    );
}

#[tokio::test]
async fn test_counter_continues_across_groups() {
    let payload = response(&[
        ("0x1", Some(vec![("name", 4)])),
        ("0x2", Some(vec![("age", 2), ("email", 6)])),
    ]);
    let (_dir, result) = export_to_file(payload).await;
    let text = result.unwrap();

    assert!(text.contains("<0x1> <dgraph.acl.rule> _:newrule1 ."));
    assert!(text.contains("<0x2> <dgraph.acl.rule> _:newrule2 ."));
    assert!(text.contains("<0x2> <dgraph.acl.rule> _:newrule3 ."));
    assert!(text.contains("_:newrule3 <dgraph.rule.permission> \"6\" ."));
}

#[tokio::test]
async fn test_groups_without_rules_contribute_nothing() {
    let payload = response(&[
        ("0x1", None),
        ("0x2", Some(vec![])),
        ("0x3", Some(vec![("name", 4)])),
    ]);
    let (_dir, result) = export_to_file(payload).await;
    let text = result.unwrap();

    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("<0x3> "));
}

#[tokio::test]
async fn test_empty_string_blob_is_skipped() {
    let payload = br#"{"me":[{"uid":"0x1","dgraph.group.acl":""}]}"#;
    let (_dir, result) = export_to_file(payload.to_vec()).await;
    assert_eq!(result.unwrap(), "");
}

#[tokio::test]
async fn test_null_blob_is_skipped_and_run_continues() {
    let payload = serde_json::to_vec(&json!({"me": [
        {"uid": "0x1", "dgraph.group.acl": "null"},
        {"uid": "0x2", "dgraph.group.acl": r#"[{"predicate":"name","perm":4}]"#},
    ]}))
    .unwrap();
    let (_dir, result) = export_to_file(payload).await;
    let text = result.unwrap();

    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("<0x2> <dgraph.acl.rule> _:newrule1 ."));
}

#[tokio::test]
async fn test_malformed_blob_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("acl_rules.rdf");
    let payload = serde_json::to_vec(&json!({"me": [
        {"uid": "0x1", "dgraph.group.acl": r#"[{"predicate":"name","perm":4}]"#},
        {"uid": "0x2", "dgraph.group.acl": "not json"},
    ]}))
    .unwrap();
    let source = MockAclSource::with_payload(payload);

    let err = export(&source, &OutputTarget::file(&path)).await.unwrap_err();

    assert_eq!(err.category(), "parse");
    assert!(err.to_string().contains("0x2"));
    assert!(!path.exists(), "no partial output may be written");
}

#[tokio::test]
async fn test_missing_top_level_key_is_parse_error() {
    let (_dir, result) = export_to_file(br#"{"other":[]}"#.to_vec()).await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[tokio::test]
async fn test_existing_output_fails_before_query() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("acl_rules.rdf");
    std::fs::write(&path, "untouched").unwrap();
    let source = MockAclSource::with_payload(response(&[("0x1", Some(vec![("name", 4)]))]));

    let err = export(&source, &OutputTarget::file(&path)).await.unwrap_err();

    assert_eq!(err.category(), "write");
    assert_eq!(source.calls(), 0);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "untouched");
}

proptest! {
    #[test]
    fn test_emits_three_lines_per_rule(
        rule_counts in prop::collection::vec(0usize..6, 0..12)
    ) {
        let groups: Vec<(String, Vec<(String, i64)>)> = rule_counts
            .iter()
            .enumerate()
            .map(|(g, &n)| {
                let rules = (0..n).map(|r| (format!("pred{r}"), (r % 8) as i64)).collect();
                (format!("0x{:x}", g + 1), rules)
            })
            .collect();
        let borrowed: Vec<(&str, Option<Vec<(&str, i64)>>)> = groups
            .iter()
            .map(|(uid, rules)| {
                (uid.as_str(), Some(rules.iter().map(|(p, n)| (p.as_str(), *n)).collect()))
            })
            .collect();
        let parsed = aclrdf_core::decode::decode_groups(&response(&borrowed)).unwrap();

        let mut seq = BlankNodeSequence::new();
        let (batch, stats) = render_groups(&parsed, &mut seq).unwrap();
        let total: usize = rule_counts.iter().sum();

        prop_assert_eq!(stats.rules, total);
        prop_assert_eq!(batch.as_str().lines().count(), 3 * total);

        let labels: HashSet<&str> = batch
            .as_str()
            .lines()
            .filter(|line| line.starts_with('<'))
            .filter_map(|line| line.split_whitespace().nth(2))
            .collect();
        prop_assert_eq!(labels.len(), total);
    }
}
