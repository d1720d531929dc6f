//! Unit tests for the schema document model.

use baserow_erd::schema::{
    load_schema, save_schema, Field, FieldType, LinkTarget, Relationship, Schema, Table,
};
use tempfile::TempDir;

fn sample_schema() -> Schema {
    let mut customer = Field::new(21, "customer", "link_row");
    customer.link = Some(LinkTarget {
        target_table_id: 99,
        target_table_name: "Table_99".to_string(),
    });

    Schema {
        database_id: 7,
        tables: vec![
            Table {
                id: 3,
                name: "zeta".to_string(),
                fields: vec![
                    Field::new(30, "total", "number"),
                    Field::new(31, "computed", "formula"),
                    Field::new(32, "when", "datetime"),
                ],
            },
            Table {
                id: 1,
                name: "alpha".to_string(),
                fields: vec![customer],
            },
        ],
        relationships: vec![Relationship {
            from_table: "alpha".to_string(),
            from_field: "customer".to_string(),
            to_table: "Table_99".to_string(),
        }],
    }
}

#[test]
fn test_json_round_trip() {
    let schema = sample_schema();
    let json = serde_json::to_string(&schema).unwrap();
    let parsed: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, schema);
}

#[test]
fn test_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested.json");
    let schema = sample_schema();

    save_schema(&schema, &path).unwrap();
    assert_eq!(load_schema(&path).unwrap(), schema);
}

#[test]
fn test_insertion_order_preserved() {
    let json = serde_json::to_string(&sample_schema()).unwrap();
    let zeta = json.find("\"zeta\"").unwrap();
    let alpha = json.find("\"alpha\"").unwrap();
    assert!(zeta < alpha);

    let total = json.find("\"total\"").unwrap();
    let computed = json.find("\"computed\"").unwrap();
    assert!(total < computed);
}

#[test]
fn test_document_shape() {
    let value = serde_json::to_value(sample_schema()).unwrap();
    assert_eq!(value["database_id"], 7);
    assert_eq!(value["tables"][0]["fields"][1]["type"], "formula");
    assert!(value["tables"][0]["fields"][0].get("link").is_none());
    assert_eq!(
        value["tables"][1]["fields"][0]["link"]["target_table_name"],
        "Table_99"
    );
    assert_eq!(value["relationships"][0]["to_table"], "Table_99");
}

#[test]
fn test_unknown_field_type_preserved() {
    let field: Field =
        serde_json::from_str(r#"{"id": 1, "name": "rating", "type": "rating"}"#).unwrap();
    assert_eq!(field.field_type, FieldType::Other("rating".to_string()));
    assert_eq!(
        serde_json::to_value(&field).unwrap()["type"],
        "rating"
    );
}

#[test]
fn test_extracted_schema_has_no_dangling_relationships() {
    assert!(sample_schema().dangling_relationships().is_empty());
}
