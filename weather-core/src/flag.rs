//! ISO 3166-1 alpha-2 country code to flag emoji.

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Convert a two-letter country code into its regional indicator pair.
///
/// Anything that is not exactly two ASCII letters is returned unchanged.
pub fn country_code_to_flag(code: &str) -> String {
    let bytes = code.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_alphabetic) {
        return code.to_string();
    }

    bytes
        .iter()
        .filter_map(|b| {
            let offset = u32::from(b.to_ascii_uppercase() - b'A');
            char::from_u32(REGIONAL_INDICATOR_A + offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        assert_eq!(country_code_to_flag("DE"), "🇩🇪");
        assert_eq!(country_code_to_flag("us"), "🇺🇸");
        assert_eq!(country_code_to_flag("Jp"), "🇯🇵");
    }

    #[test]
    fn invalid_input_is_returned_unchanged() {
        for input in ["", "D", "DEU", "1A", "é!", "🇩🇪", " D"] {
            assert_eq!(country_code_to_flag(input), input);
        }
    }
}
