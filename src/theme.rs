//! Light and dark themes

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The single theme flag of the application
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT_PALETTE,
            Theme::Dark => &DARK_PALETTE,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}


/// CSS colours of a theme
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub pending_foreground: &'static str,
    pub pending_background: &'static str,
    pub completed_foreground: &'static str,
    pub completed_background: &'static str,
}

static LIGHT_PALETTE: Palette = Palette {
    background: "#EAF6FF",
    foreground: "#072F5F",
    pending_foreground: "#0A3D62",
    pending_background: "#A7C7E7",
    completed_foreground: "#ffffff",
    completed_background: "#0A3D62",
};

static DARK_PALETTE: Palette = Palette {
    background: "#0B1A2A",
    foreground: "#D6E6F5",
    pending_foreground: "#A7C7E7",
    pending_background: "#1E4174",
    completed_foreground: "#7A8FA6",
    completed_background: "#102437",
};


/// An 8-bit RGB triplet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse any CSS colour (`#0A3D62`, `rgb(10, 61, 98)`, `navy`...). Alpha is ignored
    pub fn parse(css: &str) -> Result<Self, Box<dyn Error>> {
        let color = csscolorparser::parse(css)
            .map_err(|err| format!("Invalid colour {:?}: {}", css, err))?;
        let [r, g, b, _a] = color.to_rgba8();
        Ok(Self(r, g, b))
    }

    /// ANSI escape selecting this colour as the 24-bit foreground
    pub fn ansi_foreground(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.0, self.1, self.2)
    }

    /// ANSI escape selecting this colour as the 24-bit background
    pub fn ansi_background(&self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.0, self.1, self.2)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_back_and_forth() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::from_str::<Theme>("\"light\"").unwrap(), Theme::Light);
        assert!(serde_json::from_str::<Theme>("\"sepia\"").is_err());
    }

    #[test]
    fn palettes_are_valid_css() {
        for theme in &[Theme::Light, Theme::Dark] {
            let p = theme.palette();
            for css in &[p.background, p.foreground, p.pending_foreground, p.pending_background, p.completed_foreground, p.completed_background] {
                assert!(Rgb::parse(css).is_ok(), "{} in the {} theme", css, theme);
            }
        }
    }

    #[test]
    fn parse_colours() {
        assert_eq!(Rgb::parse("#0A3D62").unwrap(), Rgb(10, 61, 98));
        assert_eq!(Rgb::parse("white").unwrap(), Rgb(255, 255, 255));
        assert_eq!(Rgb(1, 2, 3).ansi_foreground(), "\x1b[38;2;1;2;3m");
        assert!(Rgb::parse("not a colour").is_err());
    }
}
