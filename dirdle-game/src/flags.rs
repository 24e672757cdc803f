//! Flag keys known to the bundled catalog and their emoji rendering.

/// Flag key paired with its ISO 3166-1 alpha-2 code.
pub const KNOWN_FLAGS: [(&str, &str); 12] = [
    ("China", "CN"),
    ("USA", "US"),
    ("Bangladesh", "BD"),
    ("India", "IN"),
    ("Sri Lanka", "LK"),
    ("Mexico", "MX"),
    ("Nigeria", "NG"),
    ("Korea", "KR"),
    ("Philippines", "PH"),
    ("Netherlands", "NL"),
    ("Vietnam", "VN"),
    ("Spain", "ES"),
];

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// ISO code for a flag key, if the key is known.
#[must_use]
pub fn iso_code(flag: &str) -> Option<&'static str> {
    KNOWN_FLAGS
        .iter()
        .find(|(key, _)| *key == flag)
        .map(|(_, iso)| *iso)
}

/// Regional-indicator emoji for a flag key, e.g. `"Spain"` -> 🇪🇸.
#[must_use]
pub fn flag_emoji(flag: &str) -> Option<String> {
    iso_code(flag)?
        .bytes()
        .map(|b| char::from_u32(REGIONAL_INDICATOR_A + u32::from(b - b'A')))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_flags_render_as_regional_indicators() {
        assert_eq!(flag_emoji("Spain").as_deref(), Some("\u{1F1EA}\u{1F1F8}"));
        assert_eq!(flag_emoji("USA").as_deref(), Some("\u{1F1FA}\u{1F1F8}"));
        assert_eq!(flag_emoji("Sri Lanka").as_deref(), Some("\u{1F1F1}\u{1F1F0}"));
    }

    #[test]
    fn unknown_flag_has_no_emoji() {
        assert_eq!(iso_code("Atlantis"), None);
        assert_eq!(flag_emoji("atlantis"), None);
    }

    #[test]
    fn bundled_catalog_only_uses_known_flags() {
        let catalog = crate::Catalog::load_from_static().unwrap();
        for director in &catalog {
            assert!(
                iso_code(&director.flag).is_some(),
                "unknown flag {}",
                director.flag
            );
        }
    }
}
