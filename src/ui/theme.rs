use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_edit: ColorSpec,
    pub footer_submit: ColorSpec,

    // Confirmation confetti
    pub confetti: Vec<ColorSpec>,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Blue
            accent: ColorSpec {
                r: 255,
                g: 159,
                b: 196,
            }, // Magenta
            banner: ColorSpec {
                r: 255,
                g: 159,
                b: 196,
            }, // Magenta
            text: ColorSpec {
                r: 169,
                g: 177,
                b: 214,
            }, // Foreground
            text_muted: ColorSpec {
                r: 117,
                g: 121,
                b: 148,
            }, // Comment
            success: ColorSpec {
                r: 158,
                g: 206,
                b: 106,
            }, // Green
            warning: ColorSpec {
                r: 255,
                g: 202,
                b: 40,
            }, // Yellow
            error: ColorSpec {
                r: 247,
                g: 118,
                b: 142,
            }, // Red
            border_active: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Blue
            border_normal: ColorSpec {
                r: 117,
                g: 121,
                b: 148,
            }, // Comment
            highlight_bg: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Blue
            highlight_fg: ColorSpec {
                r: 26,
                g: 27,
                b: 38,
            }, // Background
            footer_edit: ColorSpec {
                r: 255,
                g: 202,
                b: 40,
            }, // Yellow
            footer_submit: ColorSpec {
                r: 158,
                g: 206,
                b: 106,
            }, // Green
            confetti: vec![
                ColorSpec { r: 247, g: 118, b: 142 },
                ColorSpec { r: 255, g: 202, b: 40 },
                ColorSpec { r: 158, g: 206, b: 106 },
                ColorSpec { r: 125, g: 207, b: 255 },
                ColorSpec { r: 187, g: 154, b: 247 },
            ],
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec {
                r: 189,
                g: 147,
                b: 249,
            }, // Purple
            accent: ColorSpec {
                r: 255,
                g: 121,
                b: 198,
            }, // Pink
            banner: ColorSpec {
                r: 255,
                g: 121,
                b: 198,
            }, // Pink
            text: ColorSpec {
                r: 248,
                g: 248,
                b: 242,
            }, // Foreground
            text_muted: ColorSpec {
                r: 98,
                g: 114,
                b: 164,
            }, // Comment
            success: ColorSpec {
                r: 80,
                g: 250,
                b: 123,
            }, // Green
            warning: ColorSpec {
                r: 241,
                g: 250,
                b: 140,
            }, // Yellow
            error: ColorSpec {
                r: 255,
                g: 85,
                b: 85,
            }, // Red
            border_active: ColorSpec {
                r: 189,
                g: 147,
                b: 249,
            }, // Purple
            border_normal: ColorSpec {
                r: 98,
                g: 114,
                b: 164,
            }, // Comment
            highlight_bg: ColorSpec {
                r: 189,
                g: 147,
                b: 249,
            }, // Purple
            highlight_fg: ColorSpec {
                r: 40,
                g: 42,
                b: 54,
            }, // Background
            footer_edit: ColorSpec {
                r: 241,
                g: 250,
                b: 140,
            }, // Yellow
            footer_submit: ColorSpec {
                r: 80,
                g: 250,
                b: 123,
            }, // Green
            confetti: vec![
                ColorSpec { r: 255, g: 121, b: 198 },
                ColorSpec { r: 241, g: 250, b: 140 },
                ColorSpec { r: 80, g: 250, b: 123 },
                ColorSpec { r: 139, g: 233, b: 253 },
                ColorSpec { r: 255, g: 184, b: 108 },
            ],
        }
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        Theme {
            name: "catppuccin-mocha".to_string(),
            primary: ColorSpec {
                r: 137,
                g: 180,
                b: 250,
            }, // Blue
            accent: ColorSpec {
                r: 245,
                g: 194,
                b: 231,
            }, // Pink
            banner: ColorSpec {
                r: 203,
                g: 166,
                b: 247,
            }, // Mauve
            text: ColorSpec {
                r: 205,
                g: 214,
                b: 244,
            }, // Text
            text_muted: ColorSpec {
                r: 127,
                g: 132,
                b: 156,
            }, // Overlay1
            success: ColorSpec {
                r: 166,
                g: 227,
                b: 161,
            }, // Green
            warning: ColorSpec {
                r: 249,
                g: 226,
                b: 175,
            }, // Yellow
            error: ColorSpec {
                r: 243,
                g: 139,
                b: 168,
            }, // Red
            border_active: ColorSpec {
                r: 137,
                g: 180,
                b: 250,
            }, // Blue
            border_normal: ColorSpec {
                r: 108,
                g: 112,
                b: 134,
            }, // Overlay0
            highlight_bg: ColorSpec {
                r: 137,
                g: 180,
                b: 250,
            }, // Blue
            highlight_fg: ColorSpec {
                r: 30,
                g: 30,
                b: 46,
            }, // Base
            footer_edit: ColorSpec {
                r: 249,
                g: 226,
                b: 175,
            }, // Yellow
            footer_submit: ColorSpec {
                r: 166,
                g: 227,
                b: 161,
            }, // Green
            confetti: vec![
                ColorSpec { r: 243, g: 139, b: 168 },
                ColorSpec { r: 250, g: 179, b: 135 },
                ColorSpec { r: 249, g: 226, b: 175 },
                ColorSpec { r: 166, g: 227, b: 161 },
                ColorSpec { r: 137, g: 180, b: 250 },
            ],
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "dracula" => Some(Self::dracula()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "dracula".to_string(),
            "catppuccin-mocha".to_string(),
        ]
    }

    /// Return the confetti color for a particle's palette index.
    ///
    pub fn confetti_color(&self, index: usize) -> Color {
        if self.confetti.is_empty() {
            return self.accent.to_color();
        }
        self.confetti[index % self.confetti.len()].to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_available_theme_resolves() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(&name).unwrap();
            assert_eq!(theme.name, name);
            assert!(!theme.confetti.is_empty());
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_confetti_color_wraps() {
        let theme = Theme::default();
        assert_eq!(
            theme.confetti_color(0),
            theme.confetti_color(theme.confetti.len())
        );

        let mut plain = Theme::default();
        plain.confetti.clear();
        assert_eq!(plain.confetti_color(3), plain.accent.to_color());
    }
}
