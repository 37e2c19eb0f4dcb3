/// Normalizer behaviour on malformed and partial input
use crate::normalizer::normalize;
use pagetree_ast::{BlockKind, PropValue};
use pagetree_common::ComponentRegistry;
use serde_json::{json, Value};

fn registry() -> ComponentRegistry {
    ComponentRegistry::with_builtins()
}

#[test]
fn test_non_object_input_gives_empty_document() {
    for input in [Value::Null, json!(42), json!("page"), json!([1, 2]), json!(true)] {
        let doc = normalize(&input, &registry());
        assert!(doc.content.is_empty());
        assert!(doc.zones.is_empty());
        assert_eq!(doc.root.id, "root");
        assert_eq!(doc.root.title(), Some("New Page"));
    }
}

#[test]
fn test_all_invalid_content_gets_fallback() {
    let doc = normalize(&json!({ "content": [{ "type": "BogusType", "props": {} }] }), &registry());

    assert_eq!(doc.content.len(), 1);
    let fallback = &doc.content[0];
    assert_eq!(fallback.kind, BlockKind::Alert);
    assert_eq!(fallback.props["variant"], PropValue::from("info"));
    assert!(!fallback.id.is_empty());
    assert!(!fallback.key.is_empty());
}

#[test]
fn test_empty_content_stays_empty() {
    let doc = normalize(&json!({ "content": [] }), &registry());
    assert!(doc.content.is_empty());
}

#[test]
fn test_non_array_content_is_empty_without_fallback() {
    let doc = normalize(&json!({ "content": { "type": "Text" } }), &registry());
    assert!(doc.content.is_empty());
}

#[test]
fn test_invalid_entries_are_dropped() {
    let input = json!({
        "content": [
            null,
            "Heading",
            42,
            { "props": { "text": "no type" } },
            { "type": 3 },
            { "type": "Nope" },
            { "type": "Heading", "props": { "text": "Kept" } },
        ]
    });

    let doc = normalize(&input, &registry());

    assert_eq!(doc.content.len(), 1);
    assert_eq!(doc.content[0].kind, BlockKind::Heading);
    assert_eq!(doc.content[0].text(), Some("Kept"));
}

#[test]
fn test_mixed_content_has_no_fallback() {
    let input = json!({ "content": [{ "type": "Nope" }, { "type": "Divider" }] });
    let doc = normalize(&input, &registry());

    assert_eq!(doc.content.len(), 1);
    assert_eq!(doc.content[0].kind, BlockKind::Divider);
}

#[test]
fn test_node_fields_are_coerced() {
    let input = json!({
        "content": [
            { "type": "Text", "props": "not-an-object", "id": 7, "key": "", "readOnly": "yes" },
            { "type": "Text", "props": [1, 2], "id": "", "readOnly": 0 },
        ]
    });

    let doc = normalize(&input, &registry());
    let first = &doc.content[0];
    let second = &doc.content[1];

    assert!(first.props.is_empty());
    assert_eq!(first.id, "7");
    assert!(first.key.starts_with("Text-0-"));
    assert!(first.read_only);

    assert!(second.props.is_empty());
    assert!(second.id.starts_with("Text-1-"));
    assert_eq!(second.id, second.key);
    assert!(!second.read_only);
}

#[test]
fn test_existing_identity_is_preserved() {
    let input = json!({
        "content": [{ "type": "Hero", "id": "hero-main", "key": "hero-key", "readOnly": true }]
    });

    let doc = normalize(&input, &registry());
    assert_eq!(doc.content[0].id, "hero-main");
    assert_eq!(doc.content[0].key, "hero-key");
    assert!(doc.content[0].read_only);
}

#[test]
fn test_root_is_repaired() {
    let doc = normalize(&json!({ "root": { "props": "bad", "id": "", "readOnly": 1 } }), &registry());
    assert_eq!(doc.root.title(), Some("New Page"));
    assert_eq!(doc.root.id, "root");
    assert!(doc.root.read_only);

    let doc = normalize(&json!({ "root": { "props": { "title": "Pricing" }, "id": 12 } }), &registry());
    assert_eq!(doc.root.title(), Some("Pricing"));
    assert_eq!(doc.root.id, "12");
    assert!(!doc.root.read_only);
}

#[test]
fn test_root_props_keep_other_values() {
    let doc = normalize(&json!({ "root": { "props": { "description": "About us" } } }), &registry());
    assert_eq!(doc.root.title(), None);
    assert_eq!(doc.root.props["description"], PropValue::from("About us"));
}

#[test]
fn test_non_array_zone_is_dropped() {
    let doc = normalize(&json!({ "zones": { "sidebar": "not-an-array" } }), &registry());
    assert!(doc.zones.is_empty());
}

#[test]
fn test_zones_are_filtered_without_fallback() {
    let input = json!({
        "zones": {
            "sidebar": [{ "type": "Button" }, { "type": "Bogus" }],
            "footer": [{ "type": "Bogus" }],
            "header": null,
        }
    });

    let doc = normalize(&input, &registry());

    assert_eq!(doc.zones.len(), 2);
    assert_eq!(doc.zones["sidebar"].len(), 1);
    assert_eq!(doc.zones["sidebar"][0].kind, BlockKind::Button);
    assert!(doc.zones["footer"].is_empty());
}

#[test]
fn test_zones_must_be_an_object() {
    let doc = normalize(&json!({ "zones": [[{ "type": "Text" }]] }), &registry());
    assert!(doc.zones.is_empty());
}

#[test]
fn test_slots_are_normalized_recursively() {
    let input = json!({
        "content": [{
            "type": "Grid",
            "props": {
                "columns": 2,
                "items": [
                    { "type": "Card", "props": { "title": "One" } },
                    { "type": "Bogus", "props": {} },
                    { "type": "Flex", "props": { "items": [{ "type": "Button", "id": 5 }] } }
                ]
            }
        }]
    });

    let doc = normalize(&input, &registry());
    let grid = &doc.content[0];

    assert_eq!(grid.props["columns"], PropValue::Value(json!(2)));
    let items = grid.slot("items").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, BlockKind::Card);
    assert!(!items[0].key.is_empty());

    let button = &items[1].slot("items").unwrap()[0];
    assert_eq!(button.id, "5");
}

#[test]
fn test_plain_arrays_are_not_slots() {
    let input = json!({
        "content": [{
            "type": "Gallery",
            "props": { "images": [{ "src": "a.png" }, { "src": "b.png" }], "tags": ["x", "y"] }
        }]
    });

    let doc = normalize(&input, &registry());
    let gallery = &doc.content[0];

    assert!(!gallery.has_slots());
    assert_eq!(
        gallery.props["images"],
        PropValue::Value(json!([{ "src": "a.png" }, { "src": "b.png" }]))
    );
}

#[test]
fn test_typed_data_arrays_are_kept() {
    let input = json!({
        "content": [{
            "type": "Button",
            "id": "cta",
            "key": "cta",
            "props": {
                "links": [{ "type": "external", "href": "https://x.test" }],
                "fields": [{ "type": "email", "name": "work" }, { "type": "text", "name": "who" }],
                "mixed": [{ "type": "Text", "props": {} }, "caption"]
            },
            "readOnly": false
        }],
        "root": { "props": { "title": "Contact" }, "id": "root", "readOnly": false },
        "zones": {}
    });

    let doc = normalize(&input, &registry());
    let button = &doc.content[0];

    assert!(!button.has_slots());
    assert_eq!(
        button.props["links"],
        PropValue::Value(json!([{ "type": "external", "href": "https://x.test" }]))
    );
    assert_eq!(button.props["mixed"].as_value().map(|v| v[1].clone()), Some(json!("caption")));
    assert_eq!(serde_json::to_value(&doc).unwrap(), input);
}

#[test]
fn test_slot_with_only_invalid_children_is_emptied() {
    let input = json!({
        "content": [{ "type": "Flex", "props": { "items": [{ "type": "Bogus", "id": "b1" }] } }]
    });

    let doc = normalize(&input, &registry());
    assert_eq!(doc.content[0].slot("items").map(Vec::len), Some(0));
}

#[test]
fn test_late_registered_type_survives() {
    let mut registry = registry();
    registry.register("PricingTable");

    let doc = normalize(&json!({ "content": [{ "type": "PricingTable", "props": { "tiers": 3 } }] }), &registry);

    assert_eq!(doc.content[0].kind, BlockKind::Custom("PricingTable".to_string()));
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["content"][0]["type"], "PricingTable");
}
