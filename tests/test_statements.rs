use litedb::{Database, DatabaseConfig, QueryResult, Row, Value};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Database {
    let config = DatabaseConfig::new()
        .checkpoint_path(dir.path().join("db_meta.json"))
        .sync(false);
    Database::open(config).unwrap()
}

fn exec(db: &mut Database, sql: &str) -> QueryResult {
    db.execute(sql).unwrap()
}

fn select(db: &mut Database, sql: &str) -> Vec<Row> {
    match exec(db, sql) {
        QueryResult::Rows(rows) => rows,
        other => panic!("Expected rows for {:?}, got {:?}", sql, other),
    }
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn setup_company(db: &mut Database) {
    for sql in [
        "CREATE TABLE employees (id int, name str, dept str) PRIMARY KEY id",
        "CREATE TABLE departments (name str, location str) PRIMARY KEY name",
        "INSERT INTO departments VALUES ('Engineering', 'Building A')",
        "INSERT INTO departments VALUES ('HR', 'Building B')",
        "INSERT INTO employees VALUES (1, 'Alice', 'Engineering')",
        "INSERT INTO employees VALUES (2, 'Bob', 'HR')",
        "INSERT INTO employees VALUES (3, 'Cara', 'Engineering')",
    ] {
        assert!(exec(db, sql).is_success(), "setup failed: {}", sql);
    }
}

#[test]
fn test_concrete_scenario() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);

    assert_eq!(
        exec(&mut db, "CREATE TABLE t (id int, name text) PRIMARY KEY id"),
        QueryResult::with_message("Table 't' created.")
    );
    assert_eq!(
        exec(&mut db, "INSERT INTO t VALUES (1, 'a')"),
        QueryResult::with_message("1 row inserted.")
    );
    exec(&mut db, "INSERT INTO t VALUES (2, 'b')");

    let rows = select(&mut db, "SELECT * FROM t WHERE id=1");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], Value::Integer(1));
    assert_eq!(rows[0]["name"], text("a"));

    assert_eq!(
        exec(&mut db, "INSERT INTO t VALUES (1, 'c')"),
        QueryResult::failure("Error: Duplicate entry for Primary Key '1'")
    );
    assert_eq!(select(&mut db, "SELECT * FROM t").len(), 2);

    assert_eq!(
        exec(&mut db, "DELETE FROM t WHERE id=2"),
        QueryResult::with_message("1 rows deleted.")
    );

    let rows = select(&mut db, "SELECT * FROM t");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], text("a"));
}

#[test]
fn test_idempotent_create() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);

    exec(&mut db, "CREATE TABLE t (id int) PRIMARY KEY id");
    exec(&mut db, "INSERT INTO t VALUES (1)");

    let result = exec(&mut db, "CREATE TABLE t (id int, other text)");
    assert_eq!(
        result,
        QueryResult::with_message("Table 't' already exists. Skipping creation.")
    );

    let table = db.table("t").unwrap();
    assert_eq!(table.schema().column_count(), 1);
    assert_eq!(table.row_count(), 1);
}

#[test]
fn test_insert_errors() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);
    exec(&mut db, "CREATE TABLE t (id int, name text) PRIMARY KEY id");

    let result = exec(&mut db, "INSERT INTO t VALUES (1)");
    assert!(!result.is_success());
    assert!(result.message().unwrap().starts_with("Error: Column count mismatch"));

    let result = exec(&mut db, "INSERT INTO nope VALUES (1)");
    assert_eq!(result, QueryResult::failure("Error: Table nope not found."));

    assert_eq!(db.table("t").unwrap().row_count(), 0);
}

#[test]
fn test_literal_coercion() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);
    exec(&mut db, "CREATE TABLE t (a text, b text, c text, d text)");
    exec(&mut db, "INSERT INTO t VALUES ('12', 12, 'x y', -3)");

    let rows = select(&mut db, "SELECT * FROM t");
    assert_eq!(rows[0]["a"], Value::Integer(12));
    assert_eq!(rows[0]["b"], Value::Integer(12));
    assert_eq!(rows[0]["c"], text("x y"));
    assert_eq!(rows[0]["d"], text("-3"));
}

#[test]
fn test_index_scan_equivalence() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);
    exec(&mut db, "CREATE TABLE t (id int, name text) PRIMARY KEY id");
    for id in [5, 3, 9, 1] {
        exec(&mut db, &format!("INSERT INTO t VALUES ({}, 'n{}')", id, id));
    }
    exec(&mut db, "DELETE FROM t WHERE name='n9'");

    let all = select(&mut db, "SELECT * FROM t");
    for probe in 0..=10 {
        let via_index = select(&mut db, &format!("SELECT * FROM t WHERE id={}", probe));
        let via_scan: Vec<Row> = all
            .iter()
            .filter(|r| r["id"].matches_text(&probe.to_string()))
            .cloned()
            .collect();
        assert_eq!(via_index, via_scan, "probe {}", probe);
    }
}

#[test]
fn test_stale_index_probe() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);
    setup_company(&mut db);

    assert_eq!(
        exec(&mut db, "DELETE FROM employees WHERE dept='Engineering'"),
        QueryResult::with_message("2 rows deleted.")
    );

    assert!(select(&mut db, "SELECT * FROM employees WHERE id=1").is_empty());
    assert!(select(&mut db, "SELECT * FROM employees WHERE id=3").is_empty());
    let bob = select(&mut db, "SELECT * FROM employees WHERE id=2");
    assert_eq!(bob.len(), 1);
    assert_eq!(bob[0]["name"], text("Bob"));

    // Freed keys can be reused
    assert!(exec(&mut db, "INSERT INTO employees VALUES (1, 'Ann', 'HR')").is_success());
}

#[test]
fn test_delete_counts() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);
    setup_company(&mut db);

    let before = db.table("employees").unwrap().row_count();
    let result = exec(&mut db, "DELETE FROM employees WHERE name='Nobody'");
    assert_eq!(result, QueryResult::with_message("0 rows deleted."));

    let result = exec(&mut db, "DELETE FROM employees WHERE dept=HR");
    assert_eq!(result, QueryResult::with_message("1 rows deleted."));
    assert_eq!(db.table("employees").unwrap().row_count(), before - 1);

    let result = exec(&mut db, "DELETE FROM ghosts WHERE id=1");
    assert_eq!(result, QueryResult::failure("Error: Table ghosts not found."));
}

#[test]
fn test_join() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);
    setup_company(&mut db);

    let rows = select(
        &mut db,
        "SELECT * FROM employees JOIN departments ON employees.dept=departments.name",
    );
    assert_eq!(rows.len(), 3);

    let first = &rows[0];
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["id", "name", "dept", "departments_name", "departments_location"]
    );
    assert_eq!(first["departments_location"], text("Building A"));
    assert_eq!(rows[1]["departments_location"], text("Building B"));

    let rows = select(
        &mut db,
        "SELECT * FROM employees JOIN departments ON employees.dept=departments.name WHERE departments_location='Building A'",
    );
    let names: Vec<String> = rows.iter().map(|r| r["name"].to_string()).collect();
    assert_eq!(names, vec!["Alice", "Cara"]);
}

#[test]
fn test_join_missing_table() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);
    setup_company(&mut db);

    let result = exec(
        &mut db,
        "SELECT * FROM employees JOIN offices ON employees.dept=offices.name",
    );
    assert_eq!(result, QueryResult::failure("Error: Table offices not found."));

    let result = exec(
        &mut db,
        "SELECT * FROM staff JOIN departments ON staff.dept=departments.name",
    );
    assert_eq!(result, QueryResult::failure("Error: Table staff not found."));
}

#[test]
fn test_unrecognized_statements() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);

    for sql in [
        "UPDATE t SET id=1",
        "SELECT id FROM t",
        "DELETE FROM t",
        "CREATE TABLE t (id float)",
        "",
    ] {
        assert_eq!(
            exec(&mut db, sql),
            QueryResult::failure("Syntax Error or Unknown Command"),
            "statement {:?}",
            sql
        );
    }
    assert!(db.table_names().is_empty());
}

#[test]
fn test_keywords_usable_as_names() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir);

    assert_eq!(
        exec(&mut db, "CREATE TABLE kv (key text, value text) PRIMARY KEY key"),
        QueryResult::with_message("Table 'kv' created.")
    );
    assert!(exec(&mut db, "INSERT INTO kv VALUES ('alpha', on)").is_success());
    assert!(exec(&mut db, "INSERT INTO kv VALUES ('beta', 'off')").is_success());
    assert_eq!(db.table("kv").unwrap().schema().primary_key(), Some("key"));

    let rows = select(&mut db, "SELECT * FROM kv WHERE key='alpha'");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["value"], text("on"));

    let rows = select(&mut db, "SELECT * FROM kv WHERE value=on");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["key"], text("alpha"));

    assert_eq!(
        exec(&mut db, "DELETE FROM kv WHERE key=beta"),
        QueryResult::with_message("1 rows deleted.")
    );
    assert_eq!(select(&mut db, "SELECT * FROM kv").len(), 1);

    assert!(exec(&mut db, "CREATE TABLE orders (id int, on text)").is_success());
}
