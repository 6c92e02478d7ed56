#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
            if let Ok(offers) = inventory_resolver::adapters::upstream::parser::parse_offers(&json) {
                assert!(
                    offers
                        .values()
                        .all(|o| o.total.as_ref().and_then(|t| t.value()).is_some_and(|v| v > 0.0))
                );
            }
        }
    }
});
