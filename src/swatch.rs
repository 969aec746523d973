/// Terminal rendering of palettes as colored swatches.
use chrono::{DateTime, Local};
use crossterm::style::{Color, Stylize};

use crate::color::hex_to_rgb;
use crate::types::PaletteItem;

const SWATCH: &str = "  ";

pub fn hex_to_color(value: &str) -> Option<Color> {
    hex_to_rgb(value).map(|(r, g, b)| Color::Rgb { r, g, b })
}

/// One swatch block followed by the hex code for each color.
pub fn palette_line<S: AsRef<str>>(colors: &[S]) -> String {
    colors
        .iter()
        .map(|color| {
            let color = color.as_ref();
            match hex_to_color(color) {
                Some(fill) => format!("{} {color}", SWATCH.on(fill)),
                None => color.dim().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// A numbered listing row: index, favorite marker, swatches and timestamp.
pub fn item_line(index: usize, item: &PaletteItem) -> String {
    let marker = if item.is_favorite { "★" } else { " " };
    format!(
        "{index:>3} {marker} {}  {}",
        palette_line(&item.colors),
        format_timestamp(item.timestamp).dim()
    )
}

pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_hex_to_terminal_color() {
        assert_eq!(
            hex_to_color("#f80"),
            Some(Color::Rgb {
                r: 255,
                g: 136,
                b: 0
            })
        );
        assert_eq!(hex_to_color("orange"), None);
    }

    #[test]
    fn palette_line_lists_codes() {
        let line = palette_line(&["#FFFFFF", "bad"]);
        assert!(line.contains("#FFFFFF"));
        assert!(line.contains("bad"));
    }

    #[test]
    fn item_line_marks_favorites() {
        let item = PaletteItem {
            colors: vec!["#000000".into()],
            timestamp: 0,
            is_favorite: true,
        };
        let line = item_line(2, &item);
        assert!(line.starts_with("  2 ★"));
        assert!(line.contains("#000000"));
    }
}
