// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;

fn names(items: &[Value]) -> Vec<&str> {
    items.iter().filter_map(|v| v["name"].as_str()).collect()
}

#[test]
fn bare_array_is_accepted() -> anyhow::Result<()> {
    let items: Vec<Value> = normalize_list(json!([{"name": "a"}, {"name": "b"}]))?;
    assert_eq!(names(&items), vec!["a", "b"]);
    Ok(())
}

#[test]
fn keyed_shapes_are_unwrapped() -> anyhow::Result<()> {
    for key in ["roles", "data", "catalogs", "principals", "grants"] {
        let items: Vec<Value> = normalize_list(json!({ key: [{"name": "x"}] }))?;
        assert_eq!(names(&items), vec!["x"], "key {key}");
    }
    Ok(())
}

#[test]
fn extra_fields_next_to_list_are_ignored() -> anyhow::Result<()> {
    let items: Vec<Value> = normalize_list(json!({"roles": [], "nextPageToken": "abc"}))?;
    assert!(items.is_empty());
    Ok(())
}

#[test]
fn unknown_shape_is_an_error() {
    assert!(normalize_list::<Value>(json!({"items": []})).is_err());
    assert!(normalize_list::<Value>(json!("catalogs")).is_err());
    assert!(normalize_list::<Value>(Value::Null).is_err());
}

#[test]
fn items_can_be_typed() -> anyhow::Result<()> {
    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Named {
        name: String,
    }
    let items: Vec<Named> = normalize_list(json!({"catalogs": [{"name": "sales", "type": "INTERNAL"}]}))?;
    assert_eq!(items, vec![Named { name: "sales".to_owned() }]);
    Ok(())
}
