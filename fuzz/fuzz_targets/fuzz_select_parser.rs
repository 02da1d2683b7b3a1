#![no_main]
use bsonquery::config::{CompositeMode, RangeOperatorMode};
use bsonquery::{QueryTranslator, TranslatorConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(param) = bsonquery::query::parse_select_json(s) {
        // Translation may reject operands but must never panic
        let _ = QueryTranslator::new("createdAt").build(&param);
        let cfg = TranslatorConfig {
            composite_mode: CompositeMode::Nested,
            range_operators: RangeOperatorMode::Native,
            ..TranslatorConfig::default()
        };
        let _ = QueryTranslator::with_config(cfg).build(&param);
    }
});
