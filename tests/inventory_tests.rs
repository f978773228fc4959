// Inventory loading and validation tests

use std::io::Write;

use netman::inventory::Inventory;

const INVENTORY: &str = r#"{
  "routers": {
    "R1": {"device_type": "cisco_ios", "host": "198.51.100.1", "username": "admin", "password": "lab"},
    "R4": {"device_type": "cisco_ios", "host": "198.51.100.4", "username": "ops", "password": "lab4"}
  }
}"#;

#[test]
fn test_inventory_loads_from_str() {
    let inventory = Inventory::load_from_str(INVENTORY).unwrap();
    assert_eq!(inventory.routers.len(), 2);
    let r4 = inventory.get("R4").unwrap();
    assert_eq!(r4.host, "198.51.100.4");
    assert_eq!(r4.username, "ops");
    assert!(inventory.get("R9").is_none());
}

#[test]
fn test_inventory_rejects_missing_field() {
    let bad = INVENTORY.replace(r#""username": "ops", "#, "");
    let err = Inventory::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("router R4 is missing the username field"));
}

#[test]
fn test_inventory_rejects_empty_field() {
    let bad = INVENTORY.replace(r#""password": "lab4""#, r#""password": """#);
    let err = Inventory::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("password must be a non-empty string"));
}

#[test]
fn test_inventory_rejects_non_string_field() {
    let bad = INVENTORY.replace(r#""host": "198.51.100.1""#, r#""host": 7"#);
    let err = Inventory::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("router R1's field host"));
}

#[test]
fn test_inventory_rejects_missing_or_empty_routers() {
    for doc in [r#"{}"#, r#"{"routers": {}}"#, r#"{"routers": []}"#] {
        let err = Inventory::load_from_str(doc).unwrap_err();
        assert!(err.to_string().contains("routers"), "{}", doc);
    }
}

#[test]
fn test_inventory_rejects_invalid_json() {
    let err = Inventory::load_from_str("{not json").unwrap_err();
    assert!(err.to_string().contains("unable to parse"));
}

#[test]
fn test_inventory_load_requires_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Inventory::load(dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("cannot locate inventory file"));
}

#[test]
fn test_inventory_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(INVENTORY.as_bytes()).unwrap();
    let inventory = Inventory::load(file.path()).unwrap();
    assert_eq!(inventory.get("R1").unwrap().password, "lab");
}
