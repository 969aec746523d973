/// Normalize a raw color into `#RRGGBB` uppercase form.
///
/// Accepts `#RGB` and `#RRGGBB` in any case, surrounded by whitespace.
/// Returns `None` for anything else.
pub fn normalize_color(value: &str) -> Option<String> {
    let normalized = value.trim().to_ascii_uppercase();
    let digits = normalized.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
            Some(format!("#{expanded}"))
        }
        6 => Some(normalized),
        _ => None,
    }
}

/// Order-sensitive palette comparison on normalized colors.
///
/// Entries that both fail normalization compare equal at that position.
pub fn palettes_equal<A, B>(left: &[A], right: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| normalize_color(a.as_ref()) == normalize_color(b.as_ref()))
}

/// Normalize every color and drop the ones that fail.
pub fn normalize_palette<S: AsRef<str>>(colors: &[S]) -> Vec<String> {
    colors
        .iter()
        .filter_map(|color| normalize_color(color.as_ref()))
        .collect()
}

/// Split a `#RRGGBB` color into its channels.
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let normalized = normalize_color(value)?;
    let hex = &normalized[1..];
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_short_form() {
        assert_eq!(normalize_color("#abc").as_deref(), Some("#AABBCC"));
    }

    #[test]
    fn keeps_long_form() {
        assert_eq!(normalize_color("#AABBCC").as_deref(), Some("#AABBCC"));
        assert_eq!(normalize_color("  #a1b2c3\n").as_deref(), Some("#A1B2C3"));
    }

    #[test]
    fn rejects_invalid() {
        assert_eq!(normalize_color("zzz"), None);
        assert_eq!(normalize_color(""), None);
        assert_eq!(normalize_color("#"), None);
        assert_eq!(normalize_color("AABBCC"), None);
        assert_eq!(normalize_color("#GGG"), None);
        assert_eq!(normalize_color("#ABCD"), None);
        assert_eq!(normalize_color("#AABBCCDD"), None);
    }

    #[test]
    fn palettes_compare_normalized() {
        assert!(palettes_equal(&["#fff", "#000"], &["#FFFFFF", "#000000"]));
        assert!(!palettes_equal(&["#fff"], &["#fff", "#fff"]));
    }

    #[test]
    fn palettes_compare_in_order() {
        assert!(!palettes_equal(&["#fff", "#000"], &["#000", "#fff"]));
    }

    #[test]
    fn invalid_entries_match_each_other() {
        assert!(palettes_equal(&["bad", "#fff"], &["", "#FFFFFF"]));
        assert!(!palettes_equal(&["bad"], &["#fff"]));
    }

    #[test]
    fn normalize_palette_drops_invalid() {
        let colors = normalize_palette(&["#abc", "", "nope", "#123456"]);
        assert_eq!(colors, vec!["#AABBCC".to_string(), "#123456".to_string()]);
    }

    #[test]
    fn rgb_channels() {
        assert_eq!(hex_to_rgb("#ff8000"), Some((255, 128, 0)));
        assert_eq!(hex_to_rgb("#0f0"), Some((0, 255, 0)));
        assert_eq!(hex_to_rgb("red"), None);
    }
}
