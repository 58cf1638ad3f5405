//! Lossless round-trip through a model with known and spillover fields.

use serde_json::{json, Value};
use spillover_json::JsonEncoder;
use spillover_store::{ExtensibleModel, FieldDescriptor, PropertyStore, PropertyValue};

/// A hand-registered stand-in for a schema-generated model.
#[derive(Default)]
struct Invoice {
    id: i32,
    customer: String,
    paid: bool,
    spillover: PropertyStore,
}

fn write_id(m: &Invoice, enc: &mut JsonEncoder) {
    enc.write_i32(m.id);
}

fn set_id(m: &mut Invoice, v: PropertyValue<'_>) -> bool {
    match v {
        PropertyValue::Int32(val) => {
            m.id = val;
            true
        }
        _ => false,
    }
}

fn write_customer(m: &Invoice, enc: &mut JsonEncoder) {
    enc.write_str(&m.customer);
}

fn set_customer(m: &mut Invoice, v: PropertyValue<'_>) -> bool {
    match v {
        PropertyValue::Str(val) => {
            m.customer = val.to_owned();
            true
        }
        _ => false,
    }
}

fn write_paid(m: &Invoice, enc: &mut JsonEncoder) {
    enc.write_bool(m.paid);
}

fn set_paid(m: &mut Invoice, v: PropertyValue<'_>) -> bool {
    match v {
        PropertyValue::Bool(val) => {
            m.paid = val;
            true
        }
        _ => false,
    }
}

const FIELDS: &[FieldDescriptor<Invoice>] = &[
    FieldDescriptor {
        name: "id",
        write: write_id,
        set: set_id,
    },
    FieldDescriptor {
        name: "customer",
        write: write_customer,
        set: set_customer,
    },
    FieldDescriptor {
        name: "paid",
        write: write_paid,
        set: set_paid,
    },
];

impl ExtensibleModel for Invoice {
    fn fields() -> &'static [FieldDescriptor<Self>] {
        FIELDS
    }

    fn store(&self) -> &PropertyStore {
        &self.spillover
    }

    fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.spillover
    }
}

fn serialize(model: &Invoice) -> Vec<u8> {
    let mut enc = JsonEncoder::new();
    model.write_json(&mut enc);
    enc.flush()
}

#[test]
fn roundtrip_preserves_known_and_spillover_fields() {
    let input = json!({
        "id": 17,
        "customer": "ACME",
        "paid": true,
        "notes": "call back",
        "attachments": [{"name": "a.pdf", "size": 120}],
        "priority": null,
        "score": 4.75
    });
    let bytes = serde_json::to_vec(&input).unwrap();

    let mut model = Invoice::default();
    model.read_json(&bytes).unwrap();

    assert_eq!(model.id, 17);
    assert_eq!(model.customer, "ACME");
    assert!(model.paid);
    assert_eq!(model.spillover.get_str("notes").unwrap(), "call back");
    assert_eq!(
        model.spillover.get_i32("attachments/0/size").unwrap(),
        120
    );

    let out: Value = serde_json::from_slice(&serialize(&model)).unwrap();
    assert_eq!(out, input);

    // second pass through a fresh model is byte-stable
    let first = serialize(&model);
    let mut again = Invoice::default();
    again.read_json(&first).unwrap();
    assert_eq!(serialize(&again), first);
}

#[test]
fn type_mismatched_known_field_spills_over() {
    // "id" arrives as a string: the typed field declines, the store keeps it
    let bytes = br#"{"id":"not-a-number","customer":"X","paid":false}"#;
    let mut model = Invoice::default();
    model.read_json(bytes).unwrap();

    assert_eq!(model.id, 0);
    assert_eq!(model.spillover.get_str("id").unwrap(), "not-a-number");

    let out: Value = serde_json::from_slice(&serialize(&model)).unwrap();
    // the typed default and the spilled original are both present;
    // serde_json keeps the last duplicate, which is the spillover member
    assert_eq!(out["customer"], json!("X"));
    assert_eq!(out["id"], json!("not-a-number"));
}

#[test]
fn removed_spillover_is_omitted_from_output() {
    let bytes = br#"{"id":1,"customer":"Y","paid":false,"extra":5,"keep":"v"}"#;
    let mut model = Invoice::default();
    model.read_json(bytes).unwrap();
    model.store_mut().remove("extra").unwrap();

    let out: Value = serde_json::from_slice(&serialize(&model)).unwrap();
    assert!(out.get("extra").is_none());
    assert_eq!(out["keep"], json!("v"));
}

#[test]
fn spillover_member_order_is_stable() {
    let bytes = br#"{"z_last":1,"a_first":2,"id":3,"m_mid":4,"customer":"c","paid":true}"#;
    let mut model = Invoice::default();
    model.read_json(bytes).unwrap();

    let text = String::from_utf8(serialize(&model)).unwrap();
    let z = text.find("z_last").unwrap();
    let a = text.find("a_first").unwrap();
    let m = text.find("m_mid").unwrap();
    // spillover keys keep their arrival order, not alphabetical order
    assert!(z < a && a < m);
}

#[test]
fn non_integral_numbers_survive_byte_for_byte() {
    let bytes = br#"{"id":1,"customer":"c","paid":false,"ratio":0.300}"#;
    let mut model = Invoice::default();
    model.read_json(bytes).unwrap();
    let text = String::from_utf8(serialize(&model)).unwrap();
    // raw blob pass-through keeps the original number formatting
    assert!(text.contains(r#""ratio":0.300"#));
}
