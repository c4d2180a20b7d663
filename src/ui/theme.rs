//! UI theme definitions.

use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

/// Theme preference, persisted in the application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Get the egui Visuals for this theme.
    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => dark_visuals(),
            Theme::Light => light_visuals(),
        }
    }

    /// Color for validation and failure messages.
    pub fn error_color(&self) -> Color32 {
        match self {
            Theme::Dark => DarkTheme::ERROR,
            Theme::Light => LightTheme::ERROR,
        }
    }

    /// Color for confirmation messages.
    pub fn success_color(&self) -> Color32 {
        match self {
            Theme::Dark => DarkTheme::SUCCESS,
            Theme::Light => LightTheme::SUCCESS,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

/// Dark theme colors.
pub struct DarkTheme;

impl DarkTheme {
    /// Background color
    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 21, 26);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(30, 31, 38);
    /// Card background
    pub const CARD_BG: Color32 = Color32::from_rgb(41, 42, 51);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 238, 242);
    /// Secondary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(156, 160, 170);
    /// Accent color (amber)
    pub const ACCENT: Color32 = Color32::from_rgb(235, 160, 40);
    /// Success color (green)
    pub const SUCCESS: Color32 = Color32::from_rgb(72, 170, 96);
    /// Error color (red)
    pub const ERROR: Color32 = Color32::from_rgb(226, 80, 65);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(62, 64, 74);
}

/// Light theme colors.
pub struct LightTheme;

impl LightTheme {
    /// Background color
    pub const BACKGROUND: Color32 = Color32::from_rgb(248, 248, 250);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(255, 255, 255);
    /// Card background
    pub const CARD_BG: Color32 = Color32::from_rgb(242, 242, 246);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(34, 36, 42);
    /// Secondary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(98, 100, 108);
    /// Accent color (amber)
    pub const ACCENT: Color32 = Color32::from_rgb(196, 124, 16);
    /// Success color (green)
    pub const SUCCESS: Color32 = Color32::from_rgb(30, 132, 62);
    /// Error color (red)
    pub const ERROR: Color32 = Color32::from_rgb(190, 54, 44);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(216, 217, 223);
}

/// Create dark theme visuals.
fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_fill = DarkTheme::PANEL_BG;
    visuals.panel_fill = DarkTheme::PANEL_BG;
    visuals.faint_bg_color = DarkTheme::CARD_BG;
    visuals.extreme_bg_color = DarkTheme::BACKGROUND;

    visuals.widgets.noninteractive.bg_fill = DarkTheme::CARD_BG;
    visuals.widgets.inactive.bg_fill = DarkTheme::CARD_BG;
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(54, 56, 66);
    visuals.widgets.active.bg_fill = DarkTheme::ACCENT;

    visuals.selection.bg_fill = DarkTheme::ACCENT.linear_multiply(0.4);
    visuals.selection.stroke.color = DarkTheme::ACCENT;

    visuals.widgets.noninteractive.fg_stroke.color = DarkTheme::TEXT_PRIMARY;
    visuals.widgets.inactive.fg_stroke.color = DarkTheme::TEXT_SECONDARY;
    visuals.widgets.hovered.fg_stroke.color = DarkTheme::TEXT_PRIMARY;
    visuals.widgets.active.fg_stroke.color = DarkTheme::TEXT_PRIMARY;

    visuals.widgets.noninteractive.bg_stroke.color = DarkTheme::BORDER;
    visuals.widgets.inactive.bg_stroke.color = DarkTheme::BORDER;

    visuals
}

/// Create light theme visuals.
fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    visuals.window_fill = LightTheme::PANEL_BG;
    visuals.panel_fill = LightTheme::PANEL_BG;
    visuals.faint_bg_color = LightTheme::CARD_BG;
    visuals.extreme_bg_color = LightTheme::BACKGROUND;

    visuals.widgets.noninteractive.bg_fill = LightTheme::CARD_BG;
    visuals.widgets.inactive.bg_fill = LightTheme::CARD_BG;
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(232, 232, 238);
    visuals.widgets.active.bg_fill = LightTheme::ACCENT;

    visuals.selection.bg_fill = LightTheme::ACCENT.linear_multiply(0.2);
    visuals.selection.stroke.color = LightTheme::ACCENT;

    visuals.widgets.noninteractive.fg_stroke.color = LightTheme::TEXT_PRIMARY;
    visuals.widgets.inactive.fg_stroke.color = LightTheme::TEXT_SECONDARY;
    visuals.widgets.hovered.fg_stroke.color = LightTheme::TEXT_PRIMARY;
    visuals.widgets.active.fg_stroke.color = Color32::WHITE;

    visuals.widgets.noninteractive.bg_stroke.color = LightTheme::BORDER;
    visuals.widgets.inactive.bg_stroke.color = LightTheme::BORDER;

    visuals
}
