//! Property-based tests for the diff engine.
//!
//! Pins the algebraic guarantees of the engine - identity, order
//! independence, antisymmetry, case-insensitive matching - over generated
//! data graphs with unique primary keys.

use proptest::prelude::*;
use schema_delta::{DiffEngine, TypeDescriptor};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

fn item_descriptor() -> Arc<TypeDescriptor> {
    TypeDescriptor::builder("Item")
        .string("id")
        .number("count")
        .boolean("active")
        .primary_key(["id"])
        .build()
        .expect("valid descriptor")
}

fn root_descriptor() -> Arc<TypeDescriptor> {
    TypeDescriptor::builder("Inventory")
        .string("title")
        .complex("items", item_descriptor())
        .build()
        .expect("valid descriptor")
}

#[derive(Debug, Clone)]
struct Item {
    id: String,
    count: i64,
    active: bool,
}

fn to_graph(title: &str, items: &[Item]) -> Value {
    json!({
        "title": title,
        "items": items
            .iter()
            .map(|item| json!({"id": item.id, "count": item.count, "active": item.active}))
            .collect::<Vec<Value>>(),
    })
}

/// Items with primary keys that are unique case-insensitively.
fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    proptest::collection::hash_set("[a-z]{1,6}", 0..8).prop_flat_map(|ids| {
        let ids: Vec<String> = ids.into_iter().collect();
        let len = ids.len();
        (
            Just(ids),
            proptest::collection::vec((any::<i64>(), any::<bool>()), len),
        )
            .prop_map(|(ids, attrs)| {
                ids.into_iter()
                    .zip(attrs)
                    .map(|(id, (count, active))| Item { id, count, active })
                    .collect()
            })
    })
}

proptest! {
    #[test]
    fn identity_yields_empty_record(items in items_strategy(), title in "[a-z]{0,6}") {
        let graph = to_graph(&title, &items);
        let record = DiffEngine::new()
            .diff(&graph, &graph, &root_descriptor())
            .expect("diff succeeds");
        prop_assert!(record.is_empty());
    }

    #[test]
    fn element_order_is_irrelevant(
        items in items_strategy().prop_flat_map(|items| {
            let original = items.clone();
            Just(items).prop_shuffle().prop_map(move |shuffled| (original.clone(), shuffled))
        }),
    ) {
        let (original, shuffled) = items;
        let record = DiffEngine::new()
            .diff(
                &to_graph("t", &original),
                &to_graph("t", &shuffled),
                &root_descriptor(),
            )
            .expect("diff succeeds");
        prop_assert!(record.is_empty());
    }

    #[test]
    fn antisymmetry_swaps_sides(
        old_items in items_strategy(),
        new_items in items_strategy(),
    ) {
        let old = to_graph("old", &old_items);
        let new = to_graph("new", &new_items);
        let engine = DiffEngine::new();

        let forward = engine.diff(&old, &new, &root_descriptor()).expect("diff succeeds");
        let reverse = engine.diff(&new, &old, &root_descriptor()).expect("diff succeeds");

        let fs = forward.summarize();
        let rs = reverse.summarize();
        prop_assert_eq!(fs.elements_added, rs.elements_removed);
        prop_assert_eq!(fs.elements_removed, rs.elements_added);
        prop_assert_eq!(fs.elements_modified, rs.elements_modified);
        prop_assert_eq!(fs.scalars_changed, rs.scalars_changed);

        let forward_props: HashSet<String> =
            forward.iter().map(|(name, _)| name.to_string()).collect();
        let reverse_props: HashSet<String> =
            reverse.iter().map(|(name, _)| name.to_string()).collect();
        prop_assert_eq!(forward_props, reverse_props);
    }

    #[test]
    fn uppercased_keys_match_the_same_identity(items in items_strategy()) {
        let old = to_graph("t", &items);
        let shouting: Vec<Item> = items
            .iter()
            .map(|item| Item {
                id: item.id.to_uppercase(),
                count: item.count,
                active: item.active,
            })
            .collect();
        let new = to_graph("t", &shouting);

        let record = DiffEngine::new()
            .diff(&old, &new, &root_descriptor())
            .expect("diff succeeds");
        let summary = record.summarize();
        prop_assert_eq!(summary.elements_added, 0);
        prop_assert_eq!(summary.elements_removed, 0);
    }
}
