//! Store behavior matrix over mixed kinds, tombstones and growth.

use serde_json::{json, Value};
use spillover_json::JsonEncoder;
use spillover_store::{PropertyStore, PropertyValue, StoreError, ValueKind};

fn doc(store: &PropertyStore) -> Value {
    let mut enc = JsonEncoder::new();
    store.write_document(&mut enc);
    serde_json::from_slice(&enc.flush()).unwrap()
}

#[test]
fn mixed_kind_document_matrix() {
    let mut store = PropertyStore::new();
    store.set("int", PropertyValue::Int32(-7)).unwrap();
    store.set("str", PropertyValue::Str("héllo \"q\"")).unwrap();
    store.set("yes", PropertyValue::Bool(true)).unwrap();
    store.set("no", PropertyValue::Bool(false)).unwrap();
    store.set_null("nil").unwrap();
    store
        .set("blob", PropertyValue::Json(br#"{"deep":[1,{"k":"v"}]}"#))
        .unwrap();

    assert_eq!(
        doc(&store),
        json!({
            "int": -7,
            "str": "héllo \"q\"",
            "yes": true,
            "no": false,
            "nil": null,
            "blob": {"deep": [1, {"k": "v"}]}
        })
    );
}

#[test]
fn tombstone_lifecycle_matrix() {
    let mut store = PropertyStore::new();
    store.set("a", PropertyValue::Int32(1)).unwrap();
    store.set("b", PropertyValue::Int32(2)).unwrap();
    store.set("c", PropertyValue::Int32(3)).unwrap();

    store.remove("b").unwrap();
    assert!(store.contains("b"));
    assert_eq!(store.try_get("b").unwrap().0, ValueKind::Removed);
    assert!(matches!(
        store.get_i32("b"),
        Err(StoreError::PropertyNotFound(_))
    ));
    assert_eq!(doc(&store), json!({"a": 1, "c": 3}));

    // resurrect: the slot keeps its original position
    store.set("b", PropertyValue::Str("back")).unwrap();
    let mut enc = JsonEncoder::new();
    store.write_document(&mut enc);
    let text = String::from_utf8(enc.flush()).unwrap();
    assert_eq!(text, r#"{"a":1,"b":"back","c":3}"#);

    // removing a never-present name records a tombstone
    store.remove("ghost").unwrap();
    assert!(store.contains("ghost"));
    assert!(store.get_i32("ghost").is_err());
}

#[test]
fn growth_matrix_across_index_threshold() {
    // cross the linear-scan/hash-index boundary and a few Vec regrowths
    let mut store = PropertyStore::new();
    let n = 200;
    for i in 0..n {
        let name = format!("k{i:03}");
        match i % 4 {
            0 => store.set(&name, PropertyValue::Int32(i)).unwrap(),
            1 => store.set(&name, PropertyValue::Str(&name)).unwrap(),
            2 => store.set(&name, PropertyValue::Bool(i % 8 == 2)).unwrap(),
            _ => store.set_null(&name).unwrap(),
        }
    }
    assert_eq!(store.len(), n as usize);
    for i in 0..n {
        let name = format!("k{i:03}");
        match i % 4 {
            0 => assert_eq!(store.get_i32(&name).unwrap(), i),
            1 => assert_eq!(store.get_str(&name).unwrap(), name),
            2 => assert_eq!(store.get_bool(&name).unwrap(), i % 8 == 2),
            _ => assert_eq!(store.try_get(&name).unwrap().0, ValueKind::Null),
        }
    }
}

#[test]
fn pointer_qualified_reads_and_updates() {
    let mut store = PropertyStore::new();
    store
        .set(
            "payload",
            PropertyValue::Json(br#"{"items":[{"qty":2},{"qty":5}],"total":7}"#),
        )
        .unwrap();

    assert_eq!(store.get_i32("payload/items/1/qty").unwrap(), 5);
    assert_eq!(store.get_i32("payload/total").unwrap(), 7);
    assert_eq!(store.get_json("payload/items").unwrap(), br#"[{"qty":2},{"qty":5}]"#);

    store.set("nums", PropertyValue::Json(b"[1.0,2.0,3.0]")).unwrap();
    store.set_array_element("nums", 1, b"99.9").unwrap();
    assert_eq!(
        doc(&store)["nums"],
        json!([1.0, 99.9, 3.0])
    );
    assert!(matches!(
        store.set_array_element("nums", 9, b"0"),
        Err(StoreError::IndexOutOfRange { index: 9, len: 3 })
    ));
}

#[test]
fn accessors_surface_errors_with_names() {
    let mut store = PropertyStore::new();
    store.set("s", PropertyValue::Str("text")).unwrap();

    match store.get_i32("s") {
        Err(StoreError::TypeMismatch { name, .. }) => assert_eq!(name, "s"),
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
    match store.get_str("missing") {
        Err(StoreError::PropertyNotFound(name)) => assert_eq!(name, "missing"),
        other => panic!("expected PropertyNotFound, got {other:?}"),
    }
}

#[test]
fn overwrite_any_kind_to_any_kind_keeps_position() {
    let mut store = PropertyStore::new();
    store.set("a", PropertyValue::Int32(1)).unwrap();
    store.set("x", PropertyValue::Json(b"[1]")).unwrap();
    store.set("z", PropertyValue::Bool(false)).unwrap();

    // cycle x through every kind; its position must not move
    store.set("x", PropertyValue::Str("s")).unwrap();
    store.set("x", PropertyValue::Null).unwrap();
    store.set("x", PropertyValue::Removed).unwrap();
    store.set("x", PropertyValue::Int32(9)).unwrap();

    let mut enc = JsonEncoder::new();
    store.write_document(&mut enc);
    assert_eq!(
        String::from_utf8(enc.flush()).unwrap(),
        r#"{"a":1,"x":9,"z":false}"#
    );
    assert_eq!(store.len(), 3);
}
