//! Theme detection and chart colour tokens.

/// Attribute on `<html>` toggled by the host page's theme switcher.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Colour scheme of the host page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light surfaces.
    #[default]
    Light,
    /// Dark surfaces.
    Dark,
}

impl ThemeMode {
    /// Interpret the raw `data-bs-theme` attribute value.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Chart colours for this mode.
    #[must_use]
    pub const fn chart_palette(self) -> ChartPalette {
        match self {
            Self::Light => ChartPalette {
                text: "#495057",
                grid: "#dee2e6",
                background: None,
            },
            Self::Dark => ChartPalette {
                text: "#dee2e6",
                grid: "#495057",
                background: Some("rgba(108, 117, 125, 0.1)"),
            },
        }
    }
}

/// Text and grid colours applied to every live chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartPalette {
    /// Legend and tick colour.
    pub text: &'static str,
    /// Grid line and border colour.
    pub grid: &'static str,
    /// Default fill, only overridden for dark pages.
    pub background: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_dark_attribute_selects_dark() {
        assert_eq!(ThemeMode::from_attribute(Some("dark")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_attribute(Some(" DARK ")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_attribute(Some("light")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_attribute(Some("auto")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_attribute(None), ThemeMode::Light);
    }

    #[test]
    fn palettes_swap_text_and_grid() {
        let dark = ThemeMode::Dark.chart_palette();
        let light = ThemeMode::Light.chart_palette();
        assert_eq!(dark.text, light.grid);
        assert_eq!(dark.grid, light.text);
        assert!(dark.background.is_some());
        assert!(light.background.is_none());
    }
}
