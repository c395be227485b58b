#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lizardclick_server::config::{self, StoreKind};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:3000"
counter:
  flush_treshold: 10 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    assert_eq!(cfg.counter.key, "global");
    assert_eq!(cfg.counter.flush_threshold, 1000);
    assert_eq!(cfg.store.kind, StoreKind::File);
}

#[test]
fn memory_store_and_custom_threshold() {
    let ok = r#"
version: 1
counter:
  key: "lizard"
  flush_threshold: 50
store:
  kind: memory
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.counter.key, "lizard");
    assert_eq!(cfg.counter.flush_threshold, 50);
    assert_eq!(cfg.store.kind, StoreKind::Memory);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 1\ncounter: { flush_threshold: 0 }\n",
        "version: 1\ncounter: { key: \"  \" }\n",
        "version: 1\nserver: { listen: \"localhost\" }\n",
        "version: 1\nstore: { kind: file, path: \"\" }\n",
        "version: 1\nstore: { kind: mongo }\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "{bad}");
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let cfg = config::load_or_default(path.to_str().unwrap()).expect("defaults");
    assert_eq!(cfg.counter.flush_threshold, 1000);

    let err = config::load_from_file(path.to_str().unwrap()).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lizardclick.yaml");
    std::fs::write(&path, "version: 1\nserver:\n  listen: \"127.0.0.1:4000\"\n").unwrap();

    let cfg = config::load_or_default(path.to_str().unwrap()).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 4000);
}
