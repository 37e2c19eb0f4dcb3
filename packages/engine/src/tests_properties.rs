/// Whole-engine properties: invariants, idempotence and rekey guarantees
use crate::normalizer::normalize;
use crate::rekey::rekey;
use crate::validator::validate;
use pagetree_ast::{Document, Node};
use pagetree_common::ComponentRegistry;
use serde_json::{json, Value};
use std::collections::HashSet;

fn fixtures() -> Vec<Value> {
    vec![
        Value::Null,
        json!({}),
        json!({ "content": null, "root": null, "zones": null }),
        json!({ "content": [{ "type": "Bogus" }] }),
        json!({
            "content": [
                { "type": "Hero", "props": { "title": "Hi" }, "id": "hero" },
                { "type": "Flex", "props": { "items": [
                    { "type": "Text", "props": { "text": "a" } },
                    { "type": "Grid", "props": { "items": [{ "type": "Button", "key": 9 }] } },
                    { "type": "Bogus", "props": {} }
                ] } },
                { "type": "Gallery", "props": { "images": [{ "src": "x.png" }] } }
            ],
            "root": { "props": { "title": "Home" }, "readOnly": true },
            "zones": {
                "hero-zone": [{ "type": "Image" }, { "type": 1 }],
                "broken": 5
            }
        }),
        json!({ "content": [{ "type": "Spacer", "id": 1.0 }, { "type": "Spacer", "id": 1 }] }),
        json!({
            "content": [{ "type": "Card", "props": {
                "social": [{ "type": "external", "href": "https://x.test" }],
                "items": []
            } }]
        }),
    ]
}

fn assert_structural_invariants(doc: &Document, registry: &ComponentRegistry) {
    // Duplicate ids in input are allowed through; only structural errors count
    let errors: Vec<_> = validate(doc, registry).into_iter().filter(|w| w.is_error()).collect();
    assert!(errors.is_empty(), "invariants violated: {:?}", errors);
}

#[test]
fn test_normalize_output_satisfies_invariants() {
    let registry = ComponentRegistry::with_builtins();
    for input in fixtures() {
        let doc = normalize(&input, &registry);
        assert_structural_invariants(&doc, &registry);
    }
}

#[test]
fn test_normalize_is_idempotent() {
    let registry = ComponentRegistry::with_builtins();
    for input in fixtures() {
        let once = normalize(&input, &registry);
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize(&serialized, &registry);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_normalized_document_round_trips_through_json() {
    let registry = ComponentRegistry::with_builtins();
    let doc = normalize(&fixtures()[4], &registry);

    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["root"]["props"]["title"], "Home");
    assert_eq!(value["root"]["readOnly"], true);
    assert_eq!(value["content"][0]["id"], "hero");
    assert_eq!(value["content"][1]["props"]["items"][1]["props"]["items"][0]["key"], "9");
    assert!(value["zones"].get("broken").is_none());
}

fn collect(nodes: &[Node], out: &mut Vec<(String, String)>) {
    for node in nodes {
        out.push((node.id.clone(), node.key.clone()));
        for (_, children) in node.slots() {
            collect(children, out);
        }
    }
}

#[test]
fn test_rekey_after_normalize() {
    let registry = ComponentRegistry::with_builtins();
    let doc = normalize(&fixtures()[4], &registry);

    let mut before = Vec::new();
    collect(&doc.content, &mut before);

    let rekeyed = rekey(doc.content.clone());
    let mut after = Vec::new();
    collect(&rekeyed, &mut after);

    assert_eq!(before.len(), after.len());
    for ((old_id, old_key), (new_id, new_key)) in before.iter().zip(after.iter()) {
        assert_eq!(old_id, new_id);
        assert_ne!(old_key, new_key);
        assert!(!new_key.is_empty());
    }

    let keys: HashSet<_> = after.iter().map(|(_, key)| key).collect();
    assert_eq!(keys.len(), after.len());
}
