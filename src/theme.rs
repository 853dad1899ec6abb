//! Dot color resolution
//!
//! The field never reads page styles itself. Hosts hand over the raw value of
//! a themeable color and the field resolves it here.

/// Default palette
pub mod colors {
    /// CSS custom property the web host reads the dot color from
    pub const DOT_COLOR_VAR: &str = "--text-faint";

    /// Used when the host supplies nothing usable
    pub const FALLBACK_DOT: &str = "#bbb"; // light grey
}

/// Name of the window event a page fires after switching themes
pub const THEME_CHANGE_EVENT: &str = "themechange";

/// Trimmed host color, or the fallback when missing or blank.
pub fn resolve_dot_color(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(color) if !color.is_empty() => color.to_string(),
        _ => colors::FALLBACK_DOT.to_string(),
    }
}
