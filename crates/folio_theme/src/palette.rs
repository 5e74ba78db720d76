//! Per-scheme color palettes

use crate::color::Color;
use crate::scheme::ColorScheme;
use std::collections::BTreeMap;

/// Brand colors shared by both palettes
pub mod brand {
    use crate::color::Color;

    pub const DARK: Color = Color::rgb(13.0 / 255.0, 13.0 / 255.0, 13.0 / 255.0);
    pub const DARK_LIGHTER: Color = Color::rgb(26.0 / 255.0, 26.0 / 255.0, 46.0 / 255.0);

    pub const NAVY: Color = Color::rgb(47.0 / 255.0, 65.0 / 255.0, 86.0 / 255.0);
    pub const TEAL: Color = Color::rgb(86.0 / 255.0, 124.0 / 255.0, 141.0 / 255.0);
    pub const SKY: Color = Color::rgb(200.0 / 255.0, 217.0 / 255.0, 230.0 / 255.0);
    pub const BEIGE: Color = Color::rgb(245.0 / 255.0, 239.0 / 255.0, 235.0 / 255.0);
    pub const WHITE: Color = Color::WHITE;

    pub const BLUE_600: Color = Color::rgb(37.0 / 255.0, 99.0 / 255.0, 235.0 / 255.0);
    pub const CYAN_400: Color = Color::rgb(34.0 / 255.0, 211.0 / 255.0, 238.0 / 255.0);
    pub const GRAY_400: Color = Color::rgb(156.0 / 255.0, 163.0 / 255.0, 175.0 / 255.0);
    pub const GREEN_400: Color = Color::rgb(74.0 / 255.0, 222.0 / 255.0, 128.0 / 255.0);
    pub const GREEN_500: Color = Color::rgb(34.0 / 255.0, 197.0 / 255.0, 94.0 / 255.0);
}

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum ColorToken {
    Background,
    Surface,
    SurfaceElevated,
    TextPrimary,
    TextSecondary,
    Accent,
    Border,
    Success,
    /// Navigation bar background once the page is scrolled
    NavScrolled,
}

impl ColorToken {
    pub const ALL: [ColorToken; 9] = [
        ColorToken::Background,
        ColorToken::Surface,
        ColorToken::SurfaceElevated,
        ColorToken::TextPrimary,
        ColorToken::TextSecondary,
        ColorToken::Accent,
        ColorToken::Border,
        ColorToken::Success,
        ColorToken::NavScrolled,
    ];

    /// CSS variable name (without the `--` prefix)
    pub fn css_name(self) -> &'static str {
        match self {
            ColorToken::Background => "background",
            ColorToken::Surface => "surface",
            ColorToken::SurfaceElevated => "surface-elevated",
            ColorToken::TextPrimary => "text-primary",
            ColorToken::TextSecondary => "text-secondary",
            ColorToken::Accent => "accent",
            ColorToken::Border => "border",
            ColorToken::Success => "success",
            ColorToken::NavScrolled => "nav-scrolled",
        }
    }
}

/// Complete set of semantic colors for one scheme
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub scheme: ColorScheme,
    pub background: Color,
    pub surface: Color,
    pub surface_elevated: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub nav_scrolled: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            scheme: ColorScheme::Dark,
            background: brand::DARK,
            surface: brand::DARK_LIGHTER,
            surface_elevated: Color::WHITE.with_alpha(0.05),
            text_primary: Color::WHITE,
            text_secondary: brand::GRAY_400,
            accent: brand::CYAN_400,
            border: Color::WHITE.with_alpha(0.1),
            success: brand::GREEN_400,
            nav_scrolled: brand::DARK.with_alpha(0.8),
        }
    }

    pub fn light() -> Self {
        Self {
            scheme: ColorScheme::Light,
            background: brand::WHITE,
            surface: brand::SKY.with_alpha(0.2),
            surface_elevated: brand::BEIGE,
            text_primary: Color::BLACK,
            text_secondary: brand::NAVY,
            accent: brand::BLUE_600,
            border: brand::NAVY.with_alpha(0.1),
            success: brand::GREEN_500,
            nav_scrolled: Color::WHITE.with_alpha(0.8),
        }
    }

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark => Self::dark(),
        }
    }

    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Background => self.background,
            ColorToken::Surface => self.surface,
            ColorToken::SurfaceElevated => self.surface_elevated,
            ColorToken::TextPrimary => self.text_primary,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::Accent => self.accent,
            ColorToken::Border => self.border,
            ColorToken::Success => self.success,
            ColorToken::NavScrolled => self.nav_scrolled,
        }
    }

    /// Generate a CSS variable map from all color tokens.
    ///
    /// Keys are variable names without the `--` prefix, values are CSS colors.
    pub fn css_variables(&self) -> BTreeMap<String, String> {
        ColorToken::ALL
            .iter()
            .map(|token| (token.css_name().to_string(), self.get(*token).to_css()))
            .collect()
    }

    /// `:root { --name: value; ... }` declaration block
    pub fn to_css_block(&self, selector: &str) -> String {
        let body: Vec<String> = self
            .css_variables()
            .into_iter()
            .map(|(name, value)| format!("--{name}: {value};"))
            .collect();
        format!("{selector} {{ {} }}", body.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backgrounds_match_brand() {
        assert_eq!(Palette::dark().get(ColorToken::Background).to_css(), "#0d0d0d");
        assert_eq!(Palette::light().get(ColorToken::Background).to_css(), "#ffffff");
        assert_eq!(Palette::dark().surface.to_css(), "#1a1a2e");
    }

    #[test]
    fn test_css_variables_cover_every_token() {
        let vars = Palette::light().css_variables();
        assert_eq!(vars.len(), ColorToken::ALL.len());
        assert_eq!(vars["accent"], "#2563eb");
        assert_eq!(Palette::dark().css_variables()["accent"], "#22d3ee");
    }

    #[test]
    fn test_schemes_differ() {
        let light = Palette::for_scheme(ColorScheme::Light);
        let dark = Palette::for_scheme(ColorScheme::Dark);
        for token in [ColorToken::Background, ColorToken::TextPrimary, ColorToken::Accent] {
            assert_ne!(light.get(token), dark.get(token), "{token:?}");
        }
    }

    #[test]
    fn test_css_block() {
        let block = Palette::dark().to_css_block(":root");
        assert!(block.starts_with(":root { "));
        assert!(block.contains("--background: #0d0d0d;"));
    }
}
