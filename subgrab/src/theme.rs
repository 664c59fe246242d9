//! Color themes for subgrab.
//!
//! Three built-ins:
//!
//! - `dark`: ANSI 16 colors, works on any terminal.
//! - `light`: ANSI 16 colors tuned for light backgrounds.
//! - `catppuccin-mocha`: RGB palette, needs truecolor.
//!
//! The dark/light switch in the UI flips between a dark theme and `light`.

use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    /// `true` for themes meant for light terminal backgrounds.
    pub is_light: bool,

    // Panel borders
    pub border_active: Color,
    pub border_inactive: Color,

    // Controls
    pub text: Color,
    pub muted: Color,
    pub input_bg: Color,
    /// Background of the focused button / field.
    pub focus_bg: Color,
    pub focus_fg: Color,
    pub accent: Color,

    // Results
    pub selection: Color,

    // Dialog levels
    pub info: Color,
    pub warning: Color,
    pub error: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_logged_out: Color,
    pub status_logged_in: Color,

    pub background: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            is_light: false,

            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            text: Color::Reset,
            muted: Color::DarkGray,
            input_bg: Color::Black,
            focus_bg: Color::Blue,
            focus_fg: Color::White,
            accent: Color::Cyan,

            selection: Color::Cyan,

            info: Color::Cyan,
            // Closest ANSI match to the orange login hint.
            warning: Color::Yellow,
            error: Color::Red,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_logged_out: Color::Yellow,
            status_logged_in: Color::Green,

            background: Color::Reset,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            is_light: true,

            border_active: Color::Blue,
            border_inactive: Color::Gray,

            text: Color::Black,
            muted: Color::DarkGray,
            input_bg: Color::Gray,
            focus_bg: Color::Blue,
            focus_fg: Color::White,
            accent: Color::Blue,

            selection: Color::Blue,

            info: Color::Blue,
            warning: Color::Rgb(204, 102, 0),
            error: Color::Red,

            status_bar_bg: Color::Gray,
            status_bar_fg: Color::Black,
            status_logged_out: Color::Rgb(204, 102, 0),
            status_logged_in: Color::Green,

            background: Color::White,
        }
    }

    /// Catppuccin Mocha palette in RGB truecolor.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68);    // #313244
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            name: "catppuccin-mocha",
            is_light: false,

            border_active: lavender,
            border_inactive: overlay1,

            text,
            muted: overlay1,
            input_bg: surface0,
            focus_bg: blue,
            focus_fg: base,
            accent: lavender,

            selection: blue,

            info: blue,
            warning: peach,
            error: red,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_logged_out: peach,
            status_logged_in: green,

            background: base,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`
    /// so a typo never prevents startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                eprintln!("subgrab: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }

    /// The dark-mode switch: light themes go to `dark`, dark ones to `light`.
    pub fn toggled(&self) -> Self {
        if self.is_light {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
