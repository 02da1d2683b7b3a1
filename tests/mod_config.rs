use bsonquery::config::{CompositeMode, RangeOperatorMode, TranslatorConfig};
use bsonquery::{QueryTranslator, SelectParameter, TranslateError};
use std::io::Write;

#[test]
fn config_file_drives_translator() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "default_sort_field = \"createdAt\"").unwrap();
    writeln!(f, "composite_mode = \"nested\"").unwrap();
    writeln!(f, "range_operators = \"native\"").unwrap();
    let cfg = TranslatorConfig::from_file(f.path()).unwrap();
    assert_eq!(cfg.composite_mode, CompositeMode::Nested);
    assert_eq!(cfg.range_operators, RangeOperatorMode::Native);

    let t = QueryTranslator::with_config(cfg);
    assert_eq!(t.default_field_for_sort(), "createdAt");
    assert_eq!(t.build_sort(&SelectParameter::default()).to_json().unwrap(), r#"{"createdAt":1}"#);
}

#[test]
fn missing_explicit_config_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TranslatorConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, TranslateError::Io(_)));
}

#[test]
fn invalid_toml_is_toml_error() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "default_sort_field = ").unwrap();
    let err = TranslatorConfig::from_file(f.path()).unwrap_err();
    assert!(matches!(err, TranslateError::Toml(_)));
}

#[test]
fn explicit_path_comes_first() {
    let p = std::path::Path::new("custom.toml");
    let paths = TranslatorConfig::candidate_paths(Some(p));
    assert_eq!(paths[0], p);
    assert!(paths.iter().any(|c| c.ends_with("bsonquery.toml")));
}

#[test]
fn mode_names_parse_case_insensitively() {
    assert_eq!("NESTED".parse::<CompositeMode>().unwrap(), CompositeMode::Nested);
    assert_eq!(" flatten ".parse::<CompositeMode>().unwrap(), CompositeMode::Flatten);
    assert_eq!("Native".parse::<RangeOperatorMode>().unwrap(), RangeOperatorMode::Native);
    assert!(matches!("x".parse::<RangeOperatorMode>(), Err(TranslateError::Config(_))));
}
