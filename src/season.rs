//! Seasonal accent colors.
//!
//! The site's accent color follows the calendar: each month belongs to one
//! season, and each season carries a light/dark color pair. The build picks
//! the current season for derived images and the initial CSS, and publishes
//! the whole table so the browser can switch seasons without a rebuild.
//!
//! The index → color pair mapping is a contract shared by the page script
//! and the OG image generator, so it lives here as a pure function,
//! [`apply_season`].

use serde::{Deserialize, Serialize};

/// One season: the months it covers and its accent pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Season {
    pub name: String,
    pub months: Vec<u32>,
    /// Accent for light mode (`#rrggbb`).
    pub light: String,
    /// Accent for dark mode (`#rrggbb`).
    pub dark: String,
}

/// Light and dark accent colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccentPair {
    pub light: String,
    pub dark: String,
}

/// Result of selecting a season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonState {
    pub colors: AccentPair,
    pub active_index: usize,
}

pub fn default_seasons() -> Vec<Season> {
    let season = |name: &str, months: [u32; 3], light: &str, dark: &str| Season {
        name: name.to_string(),
        months: months.to_vec(),
        light: light.to_string(),
        dark: dark.to_string(),
    };
    vec![
        season("winter", [12, 1, 2], "#3b6ea5", "#8ab4f8"),
        season("spring", [3, 4, 5], "#2f855a", "#68d391"),
        season("summer", [6, 7, 8], "#c05621", "#f6ad55"),
        season("autumn", [9, 10, 11], "#9b2c2c", "#fc8181"),
    ]
}

/// Index of the season covering `month` (1-12).
pub fn season_for_month(seasons: &[Season], month: u32) -> Option<usize> {
    seasons.iter().position(|s| s.months.contains(&month))
}

/// Select the season at `index`, wrapping around the table.
///
/// Returns `None` only for an empty table.
pub fn apply_season(seasons: &[Season], index: usize) -> Option<SeasonState> {
    if seasons.is_empty() {
        return None;
    }
    let active_index = index % seasons.len();
    let season = &seasons[active_index];
    Some(SeasonState {
        colors: AccentPair {
            light: season.light.clone(),
            dark: season.dark.clone(),
        },
        active_index,
    })
}

/// Parse `#rrggbb` into RGB components.
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// CSS custom properties for the active accent.
///
/// Content never hardcodes a color: accent spans reference `var(--accent)`,
/// which the page script may later repoint at another season.
pub fn accent_css(colors: &AccentPair) -> String {
    format!(
        r#":root {{
    --accent-light: {light};
    --accent-dark: {dark};
    --accent: var(--accent-light);
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --accent: var(--accent-dark);
    }}
}}"#,
        light = colors.light,
        dark = colors.dark,
    )
}

#[derive(Serialize)]
struct SeasonEntry<'a> {
    name: &'a str,
    light: &'a str,
    dark: &'a str,
}

/// The season table as a JSON array, in index order.
pub fn season_data_json(seasons: &[Season]) -> Result<String, serde_json::Error> {
    let entries: Vec<SeasonEntry<'_>> = seasons
        .iter()
        .map(|s| SeasonEntry {
            name: &s.name,
            light: &s.light,
            dark: &s.dark,
        })
        .collect();
    serde_json::to_string(&entries)
}
