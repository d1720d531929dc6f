//! Integration tests for the render command (ERD generation).

use pretty_assertions::assert_eq;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn baserow_erd_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_baserow-erd"));
    cmd.env_remove("SCHEMA_FILE")
        .env_remove("DIAGRAM_FILE")
        .env_remove("BASEROW_ERD_LOG");
    cmd
}

fn create_test_schema(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("schema.json");
    fs::write(
        &path,
        r#"{
  "database_id": 42,
  "tables": [
    {
      "id": 1,
      "name": "customers",
      "fields": [
        {"id": 10, "name": "full name", "type": "text"},
        {"id": 11, "name": "is_vip", "type": "boolean"}
      ]
    },
    {
      "id": 2,
      "name": "customer_orders",
      "fields": [
        {"id": 20, "name": "id", "type": "number"},
        {"id": 21, "name": "placed_by", "type": "link_row",
         "link": {"target_table_id": 1, "target_table_name": "customers"}},
        {"id": 22, "name": "archived_in", "type": "link_row",
         "link": {"target_table_id": 99, "target_table_name": "Table_99"}},
        {"id": 23, "name": "margin", "type": "formula"}
      ]
    }
  ],
  "relationships": [
    {"from_table": "customer_orders", "from_field": "placed_by", "to_table": "customers"},
    {"from_table": "customer_orders", "from_field": "archived_in", "to_table": "Table_99"}
  ]
}
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_render_mermaid_file() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let output = dir.path().join("schema.mmd");

    let status = baserow_erd_bin()
        .args([
            "render",
            "-i",
            schema.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "erDiagram
    Customers {
        string fullName
        bool isVip
    }
    CustomerOrders {
        int id
        int placedBy
        int archivedIn
        string margin
    }

    CustomerOrders }o--|| Customers : placedBy
    CustomerOrders }o--|| Table_99 : archivedIn
"
    );
}

#[test]
fn test_render_replaces_existing_diagram() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let output = dir.path().join("schema.mmd");
    fs::write(&output, "erDiagram\n".repeat(500)).unwrap();

    let status = baserow_erd_bin()
        .args([
            "render",
            "-i",
            schema.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("erDiagram\n    Customers {\n"));
    assert!(content.ends_with("CustomerOrders }o--|| Table_99 : archivedIn\n"));
    assert_eq!(content.matches("erDiagram").count(), 1);

    let mut entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["schema.json", "schema.mmd"]);
}

#[test]
fn test_render_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let output_path = dir.path().join("missing").join("schema.mmd");

    let output = baserow_erd_bin()
        .args([
            "render",
            "-i",
            schema.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("IOError"));
    assert!(!output_path.exists());
}

#[test]
fn test_render_to_stdout() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = baserow_erd_bin()
        .args(["render", "-i", schema.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.starts_with("erDiagram\n"));
    assert!(stderr.contains("ERD: 2 tables, 6 fields, 2 relationships"));
}

#[test]
fn test_render_dbml_from_extension() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let output = dir.path().join("schema.dbml");

    let status = baserow_erd_bin()
        .args([
            "render",
            "-i",
            schema.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("Table customer_orders {\n  id int [pk]\n"));
    assert!(content.contains("  \"full name\" varchar\n"));
    assert!(content.contains("Ref: customer_orders.placed_by > customers.id\n"));
}

#[test]
fn test_render_reads_schema_file_env() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = baserow_erd_bin()
        .env("SCHEMA_FILE", &schema)
        .args(["render", "--format", "mermaid"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Customers {"));
}

#[test]
fn test_render_missing_input() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("schema.mmd");

    let output = baserow_erd_bin()
        .args([
            "render",
            "-i",
            dir.path().join("missing.json").to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("IOError"));
    assert!(!output_path.exists());
}

#[test]
fn test_render_unknown_format() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = baserow_erd_bin()
        .args(["render", "-i", schema.to_str().unwrap(), "--format", "dot"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown format: dot"));
}

#[test]
fn test_render_reports_collisions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(
        &path,
        r#"{"database_id": 1, "tables": [
            {"id": 1, "name": "line_items", "fields": []},
            {"id": 2, "name": "Line Items", "fields": []}
        ], "relationships": []}"#,
    )
    .unwrap();

    let output = baserow_erd_bin()
        .args(["render", "-i", path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: tables 'line_items' and 'Line Items' both render as LineItems"));
    assert!(stderr.contains("table names collide after renaming"));
}
