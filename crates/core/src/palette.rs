//! Concrete colors for 3D scene targets.
//!
//! 2D views emit [`ThemeToken`]s and let the renderer resolve them; scene
//! nodes are interpolated channel by channel, so they carry real colors.

use folio_protocol::{Color, ThemeToken};

/// Block accents (Tailwind 600 shades), cycled by experience index.
pub const ACCENTS: [Color; 5] = [
    Color::rgb8(0x4f, 0x46, 0xe5),
    Color::rgb8(0x02, 0x84, 0xc7),
    Color::rgb8(0xd9, 0x77, 0x06),
    Color::rgb8(0x05, 0x96, 0x69),
    Color::rgb8(0xdb, 0x27, 0x77),
];

pub const BLOCK_INACTIVE: Color = Color::rgb8(0xcb, 0xd5, 0xe1);
pub const CONNECTOR_MUTED: Color = Color::rgb8(0xe2, 0xe8, 0xf0);
pub const HOVER: Color = Color::rgb8(0xf4, 0x3f, 0x5e);

pub fn accent(index: usize) -> Color {
    ACCENTS[index % ACCENTS.len()]
}

/// Theme token for a skill category name.
pub fn category_token(category: &str) -> ThemeToken {
    match category {
        "Programming" => ThemeToken::CategoryProgramming,
        "Data & Analytics" => ThemeToken::CategoryData,
        "DevOps" => ThemeToken::CategoryDevOps,
        "Tools & Hardware" => ThemeToken::CategoryTools,
        "Languages" => ThemeToken::CategoryLanguages,
        _ => ThemeToken::CategoryOther,
    }
}

/// Scene color for a skill category.
pub fn category_color(category: &str) -> Color {
    match category_token(category) {
        ThemeToken::CategoryProgramming => Color::rgb8(0x4f, 0x46, 0xe5),
        ThemeToken::CategoryData => Color::rgb8(0x0e, 0xa5, 0xe9),
        ThemeToken::CategoryDevOps => Color::rgb8(0xf5, 0x9e, 0x0b),
        ThemeToken::CategoryTools => Color::rgb8(0x64, 0x74, 0x8b),
        ThemeToken::CategoryLanguages => Color::rgb8(0xec, 0x48, 0x99),
        _ => BLOCK_INACTIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_cycle() {
        assert_eq!(accent(0), accent(5));
        assert_eq!(accent(1).to_hex(), "#0284c7");
    }

    #[test]
    fn unknown_category_falls_back() {
        assert_eq!(category_token("Cooking"), ThemeToken::CategoryOther);
        assert_eq!(category_color("Cooking"), BLOCK_INACTIVE);
        assert_eq!(category_color("DevOps").to_hex(), "#f59e0b");
    }
}
