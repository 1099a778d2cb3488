//! A single document exercising every recognized scalar tag

use chrono::{TimeZone, Utc};
use docshape::{analyze_documents, Document, TypeTag, Value};
use uuid::Uuid;

fn doc(entries: Vec<(&str, Value)>) -> Document {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn all_types_document() -> Document {
    let binaries = doc(vec![
        ("generic", Value::Binary { subtype: 0, bytes: vec![1, 2, 3] }),
        ("function_data", Value::Binary { subtype: 1, bytes: vec![0xff, 0xf8] }),
        ("binary_old", Value::Binary { subtype: 2, bytes: vec![0xff, 0xf8] }),
        ("uuid_old", Value::Binary { subtype: 3, bytes: vec![0; 16] }),
        (
            "uuid",
            Value::Uuid(Uuid::parse_str("aaaaaaaa-aaaa-4aaa-aaaa-aaaaaaaaaaaa").unwrap()),
        ),
        ("md5", Value::Binary { subtype: 5, bytes: vec![0; 16] }),
        ("encrypted", Value::Binary { subtype: 6, bytes: vec![0; 16] }),
        ("custom", Value::Binary { subtype: 128, bytes: vec![0xff] }),
    ]);

    doc(vec![
        ("_id", Value::ObjectId("642d766b7300158b1f22e972".to_string())),
        ("double", Value::Double(1.2)),
        ("string", Value::String("Hello, world!".to_string())),
        (
            "object",
            Value::Document(doc(vec![("key", Value::String("value".to_string()))])),
        ),
        (
            "array",
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]),
        ),
        ("bin_data", Value::binary(vec![1, 2, 3])),
        ("object_id", Value::ObjectId("642d766c7300158b1f22e975".to_string())),
        ("boolean", Value::Boolean(true)),
        (
            "date",
            Value::Date(Utc.with_ymd_and_hms(2023, 4, 5, 13, 25, 8).unwrap()),
        ),
        ("null", Value::Null),
        (
            "regex",
            Value::RegExp {
                pattern: "pattern".to_string(),
                options: "i".to_string(),
            },
        ),
        (
            "javascript",
            Value::Code {
                code: "function() {}".to_string(),
                scope: None,
            },
        ),
        ("symbol", Value::Symbol("symbol".to_string())),
        (
            "javascript_with_scope",
            Value::Code {
                code: "function() {}".to_string(),
                scope: Some(doc(vec![
                    ("foo", Value::Number(1.0)),
                    ("bar", Value::String("a".to_string())),
                ])),
            },
        ),
        ("int", Value::Int32(12345)),
        ("timestamp", Value::Timestamp { time: 1_680_700_000, increment: 1 }),
        ("long", Value::Long(123_456_789_123_456_789)),
        ("decimal", Value::Decimal128("5.477284286264328586719275128128332".to_string())),
        ("min_key", Value::MinKey),
        ("max_key", Value::MaxKey),
        ("binaries", Value::Document(binaries)),
        (
            "db_ref",
            Value::Document(doc(vec![
                ("$ref", Value::String("namespace".to_string())),
                ("$id", Value::ObjectId("642d76b4b7ebfab15d3c4a78".to_string())),
            ])),
        ),
    ])
}

#[test]
fn contains_all_of_the_types() {
    let document = all_types_document();
    let expected_fields = document.len();
    let schema = analyze_documents([&document]);

    assert_eq!(schema.count, 1);
    assert_eq!(schema.fields.len(), expected_fields);

    let expected_tags = [
        TypeTag::Array,
        TypeTag::Binary,
        TypeTag::Boolean,
        TypeTag::Code,
        TypeTag::Date,
        TypeTag::Decimal128,
        TypeTag::Double,
        TypeTag::Int32,
        TypeTag::Long,
        TypeTag::MaxKey,
        TypeTag::MinKey,
        TypeTag::Null,
        TypeTag::Document,
        TypeTag::ObjectId,
        TypeTag::RegExp,
        TypeTag::String,
        TypeTag::Symbol,
        TypeTag::Timestamp,
    ];

    for tag in expected_tags {
        assert!(
            schema.fields.iter().any(|field| field.has_type(tag)),
            "cannot find type {tag} in any schema field"
        );
    }
}

#[test]
fn binary_subtypes_share_one_tag() {
    let document = all_types_document();
    let schema = analyze_documents([&document]);

    let binaries = schema
        .field("binaries")
        .unwrap()
        .type_named(TypeTag::Document)
        .unwrap();

    // Every nested binary field classifies as Binary, whatever its subtype.
    for field in binaries.fields() {
        assert_eq!(field.types.len(), 1, "field '{}' forked", field.name);
        assert_eq!(field.types[0].name, TypeTag::Binary);
    }

    // The UUID wrapper is a binary value with the reserved subtype 4.
    let uuid = binaries.field("uuid").unwrap();
    let subtypes = uuid.types[0].binary_subtypes.as_ref().unwrap();
    assert_eq!(subtypes.get(&4), Some(&1));
}

#[test]
fn db_ref_is_analyzed_structurally() {
    let document = all_types_document();
    let schema = analyze_documents([&document]);

    let db_ref = schema
        .field("db_ref")
        .unwrap()
        .type_named(TypeTag::Document)
        .unwrap();
    assert!(db_ref.field("$ref").unwrap().has_type(TypeTag::String));
    assert!(db_ref.field("$id").unwrap().has_type(TypeTag::ObjectId));
}
