/// City codes the storefront searches most, mapped to display names.
const CITY_NAMES: &[(&str, &str)] = &[
    ("AMS", "Amsterdam"),
    ("ATL", "Atlanta"),
    ("BCN", "Barcelona"),
    ("BER", "Berlin"),
    ("BKK", "Bangkok"),
    ("BOS", "Boston"),
    ("CHI", "Chicago"),
    ("DEL", "Delhi"),
    ("DXB", "Dubai"),
    ("HKG", "Hong Kong"),
    ("IST", "Istanbul"),
    ("LAS", "Las Vegas"),
    ("LAX", "Los Angeles"),
    ("LIS", "Lisbon"),
    ("LON", "London"),
    ("MAD", "Madrid"),
    ("MEX", "Mexico City"),
    ("MIA", "Miami"),
    ("MIL", "Milan"),
    ("NYC", "New York"),
    ("ORL", "Orlando"),
    ("PAR", "Paris"),
    ("ROM", "Rome"),
    ("SEA", "Seattle"),
    ("SFO", "San Francisco"),
    ("SIN", "Singapore"),
    ("SYD", "Sydney"),
    ("TYO", "Tokyo"),
    ("VIE", "Vienna"),
    ("YTO", "Toronto"),
];

/// Human-readable name for a location code; unknown codes come back trimmed as-is.
pub fn location_name(code: &str) -> String {
    let trimmed = code.trim();
    CITY_NAMES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| trimmed.to_string(), |(_, name)| (*name).to_string())
}
