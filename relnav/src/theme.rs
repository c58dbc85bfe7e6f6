//! Color theme system for relnav.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface relnav renders. It is constructed once at startup from config and
//! passed into the render functions — there is no ambient style state.
//!
//! Two built-in themes:
//!
//! - `dark` — ANSI 16 colors only, works on any terminal including
//!   256-color SSH sessions without truecolor.
//! - `catppuccin-mocha` — Catppuccin Mocha palette in RGB; wants truecolor.

use ratatui::style::Color;

/// All color values used across relnav's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Chrome
    /// The `owner/repo releases` title line.
    pub title: Color,
    /// Horizontal rules and the `┤ label ├` frames in header and footer.
    pub chrome: Color,
    /// The focused tag shown inside the header frame.
    pub focused_tag: Color,
    /// Key-hint line on the loading screen.
    pub hint: Color,
    /// Loading spinner.
    pub spinner: Color,
    /// Non-fatal notices (e.g. the focus-fallback message).
    pub notice: Color,

    // Timeline
    /// Glyph of the focused release.
    pub timeline_focus: Color,
    /// Glyphs of every other release.
    pub timeline_muted: Color,

    // Markdown body
    /// Level-1 headings.
    pub heading_primary: Color,
    /// Level-2 headings.
    pub heading_secondary: Color,
    /// Level-3+ headings.
    pub heading_tertiary: Color,
    /// Inline and fenced code.
    pub code: Color,
    /// Block-quote prefix and text.
    pub quote: Color,
    /// List bullets, task markers, and thematic rules.
    pub punctuation: Color,
    /// Link text.
    pub link: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Suitable as the default when no config is present or color
    /// capability is unknown.
    pub fn dark() -> Self {
        Self {
            title: Color::Cyan,
            chrome: Color::DarkGray,
            focused_tag: Color::White,
            hint: Color::DarkGray,
            spinner: Color::LightMagenta,
            notice: Color::Yellow,

            timeline_focus: Color::Green,
            timeline_muted: Color::DarkGray,

            heading_primary: Color::Yellow,
            heading_secondary: Color::LightMagenta,
            heading_tertiary: Color::LightCyan,
            code: Color::LightYellow,
            quote: Color::DarkGray,
            punctuation: Color::DarkGray,
            link: Color::Cyan,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Colors degrade to the nearest ANSI 256-color approximation on
    /// non-truecolor terminals. Palette source:
    /// <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387
        let pink = Color::Rgb(245, 194, 231);     // #f5c2e7

        Self {
            title: lavender,
            chrome: overlay1,
            focused_tag: text,
            hint: overlay1,
            spinner: pink,
            notice: yellow,

            timeline_focus: green,
            timeline_muted: overlay1,

            heading_primary: peach,
            heading_secondary: pink,
            heading_tertiary: teal,
            code: yellow,
            quote: overlay1,
            punctuation: overlay1,
            link: blue,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never
    /// prevents startup; the fallback is noted on stderr.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("relnav: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}
