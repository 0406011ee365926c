// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use postdb_node::config::{ConfigError, NodeConfig};
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let cfg = NodeConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.bind_addr, "127.0.0.1:3000".parse().unwrap());
    assert_eq!(cfg.db_path, PathBuf::from("db.json"));
    assert_eq!(cfg.public_dir, PathBuf::from("public"));
    assert!(!cfg.serialize_writes);
}

#[test]
fn test_overrides() {
    let cfg = NodeConfig::from_lookup(lookup(&[
        ("POSTDB_BIND_ADDR", "0.0.0.0:8080"),
        ("POSTDB_DB_PATH", "/var/lib/postdb/db.json"),
        ("POSTDB_PUBLIC_DIR", "/srv/www"),
        ("POSTDB_SERIALIZE_WRITES", "TRUE"),
    ]))
    .unwrap();
    assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
    assert_eq!(cfg.db_path, PathBuf::from("/var/lib/postdb/db.json"));
    assert_eq!(cfg.public_dir, PathBuf::from("/srv/www"));
    assert!(cfg.serialize_writes);
}

#[test]
fn test_bad_values() {
    let err = NodeConfig::from_lookup(lookup(&[("POSTDB_BIND_ADDR", "localhost")]));
    assert!(matches!(err, Err(ConfigError::BindAddr { .. })));

    let err = NodeConfig::from_lookup(lookup(&[("POSTDB_SERIALIZE_WRITES", "maybe")]));
    assert!(matches!(err, Err(ConfigError::Flag { .. })));
}
