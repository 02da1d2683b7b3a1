#![no_main]
use bsonquery::{QueryTranslator, SelectParameter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        let param = SelectParameter {
            sort_descriptors: bsonquery::query::parse_sort_spec(s),
            ..SelectParameter::default()
        };
        let sort = QueryTranslator::new("_id").build_sort(&param);
        assert!(!sort.is_empty());
    }
});
