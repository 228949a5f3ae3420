//! # Configuration Tests
//!
//! Defaults, partial documents, and loading from a file.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rv32tb_core::config::{CoreConfig, MemoryConfig};
use rv32tb_core::{Config, HarnessError};

#[test]
fn defaults_match_the_reference_geometry() {
    let config = Config::default();
    assert!(config.general.trace);
    assert!(config.general.color);
    assert!(config.general.final_settle);
    assert_eq!(config.general.trace_path, PathBuf::from("simx.vcd"));
    assert_eq!(
        config.core,
        CoreConfig {
            reset_pc: 0,
            addr_bits: 15
        }
    );
    assert_eq!(config.memory, MemoryConfig { words: 32768 });
}

#[test]
fn partial_sections_keep_the_other_defaults() {
    let config = Config::from_json(r#"{ "general": { "color": false }, "core": { "reset_pc": 256 } }"#)
        .unwrap();
    assert!(!config.general.color);
    assert!(config.general.trace);
    assert_eq!(config.core.reset_pc, 0x100);
    assert_eq!(config.core.addr_bits, 15);
}

#[test]
fn loads_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tb.json");
    std::fs::write(&path, r#"{ "general": { "trace_path": "out/wave.vcd" }, "memory": { "words": 64 } }"#)
        .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.general.trace_path, PathBuf::from("out/wave.vcd"));
    assert_eq!(config.memory.words, 64);
}

#[test]
fn missing_file_and_bad_json_are_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Config::load(dir.path().join("none.json")).unwrap_err();
    assert!(matches!(missing, HarnessError::Io(_)));

    let bad = Config::from_json("[1, 2]").unwrap_err();
    assert!(matches!(bad, HarnessError::Config(_)));
}
