//! Colour palette used by the shop colour filter.
//!
//! The palette is the fixed list of colour names the storefront knows how to
//! render as swatches. Product option values are matched against it by name,
//! ignoring case.

use serde::Serialize;

/// A named colour with its swatch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Canonical display name (e.g., "Navy Blue").
    pub name: &'static str,
    /// CSS colour used to paint the swatch.
    pub value: &'static str,
}

/// A swatch is either a single colour or a bi-colour pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Swatch {
    Single(Color),
    Pair(Color, Color),
}

impl Swatch {
    /// Name stored in the URL when this swatch is selected.
    ///
    /// Pairs are named `"First/Second"`.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Single(color) => color.name.to_string(),
            Self::Pair(first, second) => format!("{}/{}", first.name, second.name),
        }
    }
}

impl From<Color> for Swatch {
    fn from(color: Color) -> Self {
        Self::Single(color)
    }
}

const fn color(name: &'static str, value: &'static str) -> Color {
    Color { name, value }
}

/// Master palette, in display order. Names are unique.
pub const PALETTE: &[Color] = &[
    color("Olive", "#708238"),
    color("Beige", "#f5f5dc"),
    color("White", "#ffffff"),
    color("Blue", "#2563eb"),
    color("Brown", "#8b5a2b"),
    color("Sand", "#c2b280"),
    color("Green", "#16a34a"),
    color("Black", "#000000"),
    color("Orange", "#f97316"),
    color("Dark Brown", "#5c4033"),
    color("Pink", "#f9a8d4"),
    color("Red", "#dc2626"),
    color("Yellow", "#facc15"),
    color("Purple", "#9333ea"),
    color("Gray", "#9ca3af"),
    color("Gold", "#d4af37"),
    color("Silver", "#c0c0c0"),
    color("Army Green", "#4b5320"),
    color("Navy Blue", "#1e3a8a"),
    color("Navy", "#000080"),
    color("Coral", "#ff7f50"),
    color("Salmon", "#fa8072"),
    color("Khaki", "#c3b091"),
    color("Plum", "#8e4585"),
    color("Tan", "#d2b48c"),
    color("Crimson", "#dc143c"),
    color("Turquoise", "#40e0d0"),
    color("Lavender", "#e6e6fa"),
    color("Ivory", "#fffff0"),
    color("Mint", "#98ff98"),
    color("Peach", "#ffdab9"),
    color("Pistachio", "#93c572"),
    color("Cream", "#fffdd0"),
    color("Wood", "#a0522d"),
];

/// Look up a palette colour by name, ignoring case and surrounding whitespace.
#[must_use]
pub fn find_in_palette(name: &str) -> Option<&'static Color> {
    let name = name.trim();
    PALETTE.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_palette_names_are_unique() {
        let names: HashSet<String> = PALETTE.iter().map(|c| c.name.to_lowercase()).collect();
        assert_eq!(names.len(), PALETTE.len());
    }

    #[test]
    fn test_find_in_palette_ignores_case() {
        assert_eq!(find_in_palette("navy blue").map(|c| c.name), Some("Navy Blue"));
        assert_eq!(find_in_palette(" RED ").map(|c| c.name), Some("Red"));
        assert!(find_in_palette("Dark Red").is_none());
    }

    #[test]
    fn test_swatch_names() {
        let red = *find_in_palette("red").unwrap();
        let white = *find_in_palette("white").unwrap();
        assert_eq!(Swatch::from(red).name(), "Red");
        assert_eq!(Swatch::Pair(red, white).name(), "Red/White");
    }

    #[test]
    fn test_swatch_serializes_as_color() {
        let red = *find_in_palette("red").unwrap();
        let json = serde_json::to_value(Swatch::from(red)).unwrap();
        assert_eq!(json["name"], "Red");
        assert_eq!(json["value"], "#dc2626");
    }
}
