//! Loading the schema tables from a data directory.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use wh_core::{DeduplicatedParam, StripChildrenRule};
use wh_store::{SchemaStore, StoreError};

const WEBHOOKS: &str = r#"{
  "workflow_dispatch": {
    "default": {
      "descriptionHtml": "<p>Manual run.</p>",
      "summaryHtml": "",
      "bodyParameters": [
        0,
        {"type": "string", "name": "ref", "in": "body", "isRequired": true, "description": "The ref."}
      ]
    }
  },
  "push": {
    "default": {
      "descriptionHtml": "",
      "summaryHtml": "",
      "bodyParameters": [0]
    }
  }
}"#;

const OBJECTS: &str = r#"[
  {
    "type": "object or null",
    "name": "inputs",
    "in": "body",
    "isRequired": true,
    "description": "",
    "childParamsGroups": [
      {"type": "string", "name": "environment", "description": ""}
    ]
  }
]"#;

fn write_tables(dir: &Path) {
    fs::write(dir.join("webhooks.json"), WEBHOOKS).unwrap();
    fs::write(dir.join("objects.json"), OBJECTS).unwrap();
    fs::create_dir(dir.join("custom")).unwrap();
    fs::write(
        dir.join("custom").join("schedule.json"),
        r#"{"schedule": "0 0 * * *"}"#,
    )
    .unwrap();
    fs::write(dir.join("custom").join("README.md"), "not a table").unwrap();
}

#[test]
fn reads_tables_and_custom_events() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());

    let store = SchemaStore::from_dir(dir.path()).expect("tables load");

    assert_eq!(store.objects().len(), 1);
    assert_eq!(store.webhook_actions("push"), Some(vec!["default"]));
    assert_eq!(
        store.custom_event("schedule"),
        Some(&serde_json::json!({"schedule": "0 0 * * *"}))
    );
    assert_eq!(store.events(), vec!["push", "schedule", "workflow_dispatch"]);
}

#[test]
fn custom_directory_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("webhooks.json"), WEBHOOKS).unwrap();
    fs::write(dir.path().join("objects.json"), OBJECTS).unwrap();

    let store = SchemaStore::from_dir(dir.path()).expect("tables load");

    assert!(store.custom_event("schedule").is_none());
}

#[test]
fn missing_table_is_an_io_error_naming_the_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("webhooks.json"), WEBHOOKS).unwrap();

    let Err(StoreError::Io { path, .. }) = SchemaStore::from_dir(dir.path()) else {
        panic!("expected Io error");
    };
    assert_eq!(path, dir.path().join("objects.json"));
}

#[test]
fn malformed_custom_event_names_the_event() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    fs::write(dir.path().join("custom").join("workflow_call.json"), "{").unwrap();

    let Err(StoreError::Json { what, .. }) = SchemaStore::from_dir(dir.path()) else {
        panic!("expected Json error");
    };
    assert_eq!(what, "custom event 'workflow_call'");
}

#[test]
fn normalization_copies_shared_reference() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());

    let store = SchemaStore::open(Some(dir.path()))
        .expect("tables load")
        .normalized(&[StripChildrenRule::workflow_dispatch_inputs()]);

    let dispatch = store
        .deduplicated_payload("workflow_dispatch", "default")
        .unwrap();
    let DeduplicatedParam::Full(inputs) = &dispatch.body_parameters[0] else {
        panic!("inputs should be materialized");
    };
    assert!(inputs.child_params_groups.is_none());

    // `push` still shares the untouched objects table entry.
    let push = store.deduplicated_payload("push", "default").unwrap();
    assert_eq!(push.body_parameters[0], DeduplicatedParam::Reference(0));
    assert!(store.objects()[0].is_composite());
}
