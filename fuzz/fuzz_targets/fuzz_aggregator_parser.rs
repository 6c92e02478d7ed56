#![no_main]
use inventory_resolver::domain::normalizer::normalize;
use inventory_resolver::domain::outcome::ProviderOutcome;
use inventory_resolver::domain::raw::RawStay;
use inventory_resolver::domain::record::SourceKind;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
            if let Ok(hotels) =
                inventory_resolver::adapters::aggregator::parser::parse_search_response(&json)
            {
                let count = hotels.len();
                let stays = hotels.into_iter().map(RawStay::Aggregator).collect();
                let mut rng = StdRng::seed_from_u64(0);
                let records = normalize(
                    ProviderOutcome::Success(stays),
                    SourceKind::Primary,
                    "New York",
                    &mut rng,
                );
                assert_eq!(records.len(), count);
            }
        }
    }
});
