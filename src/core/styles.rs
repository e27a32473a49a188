//! Style roles mapping logical names to `colored::Color`.
//!
//! Coloring is applied only when the `enabled` flag passed to `paint()` is
//! true, so callers decide once (TTY detection, `--color`) and pass it down.
//!
//! ```
//! use raffle_admin::core::styles::StyleRole;
//! assert_eq!(StyleRole::Header.paint("Title", false), "Title");
//! assert!(StyleRole::Header.paint("Title", true).starts_with("\x1b["));
//! ```

use clap::builder::styling::AnsiColor as ClapAnsi;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }

            pub fn ansi_code(self) -> Option<String> {
                map_color_code(self.color()?)
            }

            pub fn paint(self, text: &str, enabled: bool) -> String {
                if !enabled { return text.to_string(); }
                if let Some(code) = self.ansi_code() { return format!("\x1b[{}m{}\x1b[0m", code, text); }
                text.to_string()
            }

            /// prettytable style spec (`Fy`, `Fg`, ...) for this role
            pub fn to_prettytable_spec(self) -> Option<String> {
                let spec_char = match self.color()? {
                    Color::Black => "k",
                    Color::Red => "r",
                    Color::Green => "g",
                    Color::Yellow => "y",
                    Color::Blue => "b",
                    Color::Magenta => "m",
                    Color::Cyan => "c",
                    Color::White => "w",
                    Color::BrightBlack => "K",
                    Color::BrightRed => "R",
                    Color::BrightGreen => "G",
                    Color::BrightYellow => "Y",
                    Color::BrightBlue => "B",
                    Color::BrightMagenta => "M",
                    Color::BrightCyan => "C",
                    Color::BrightWhite => "W",
                    _ => return None,
                };
                Some(format!("F{}", spec_char))
            }
        }
    };
}

// Value => None (uncoloured)
style! {
    Header      => Some(Color::Yellow),
    Literal     => Some(Color::Cyan),
    Placeholder => Some(Color::Green),
    Valid       => Some(Color::Green),
    Invalid     => Some(Color::Red),
    Error       => Some(Color::BrightRed),
    Value       => None,
    Accent      => Some(Color::Blue),
    Dim         => Some(Color::BrightBlack),
    Present     => Some(Color::BrightGreen),
    Pending     => Some(Color::BrightYellow),
}

fn map_color_code(c: Color) -> Option<String> {
    let code = match c {
        Color::Black => "30",
        Color::Red => "31",
        Color::Green => "32",
        Color::Yellow => "33",
        Color::Blue => "34",
        Color::Magenta => "35",
        Color::Cyan => "36",
        Color::White => "37",
        Color::BrightBlack => "90",
        Color::BrightRed => "91",
        Color::BrightGreen => "92",
        Color::BrightYellow => "93",
        Color::BrightBlue => "94",
        Color::BrightMagenta => "95",
        Color::BrightCyan => "96",
        Color::BrightWhite => "97",
        Color::TrueColor { r, g, b } => return Some(format!("38;2;{};{};{}", r, g, b)),
        // Palette-indexed colors (added in later `colored` 3.x) have no role
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    Some(code.to_string())
}

fn color_to_ansi(c: Color) -> Option<ClapAnsi> {
    Some(match c {
        Color::Black => ClapAnsi::Black,
        Color::Red => ClapAnsi::Red,
        Color::Green => ClapAnsi::Green,
        Color::Yellow => ClapAnsi::Yellow,
        Color::Blue => ClapAnsi::Blue,
        Color::Magenta => ClapAnsi::Magenta,
        Color::Cyan => ClapAnsi::Cyan,
        Color::White => ClapAnsi::White,
        Color::BrightBlack => ClapAnsi::BrightBlack,
        Color::BrightRed => ClapAnsi::BrightRed,
        Color::BrightGreen => ClapAnsi::BrightGreen,
        Color::BrightYellow => ClapAnsi::BrightYellow,
        Color::BrightBlue => ClapAnsi::BrightBlue,
        Color::BrightMagenta => ClapAnsi::BrightMagenta,
        Color::BrightCyan => ClapAnsi::BrightCyan,
        Color::BrightWhite => ClapAnsi::BrightWhite,
        _ => return None,
    })
}

/// Build clap Styles for help output from the same roles
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole, bold: bool| {
        let mut s = Style::new();
        if let Some(col) = role.color().and_then(color_to_ansi) {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if bold {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header, true))
        .literal(style(StyleRole::Literal, false))
        .placeholder(style(StyleRole::Placeholder, false))
        .valid(style(StyleRole::Valid, false))
        .invalid(style(StyleRole::Invalid, false))
        .error(style(StyleRole::Error, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_code_header() {
        assert_eq!(StyleRole::Header.ansi_code(), Some("33".to_string()));
    }

    #[test]
    fn paint_enabled_disabled() {
        let colored = StyleRole::Present.paint("Jane", true);
        assert!(colored.starts_with("\x1b[92m") && colored.ends_with("\x1b[0m"));
        assert_eq!(StyleRole::Present.paint("Jane", false), "Jane");
    }

    #[test]
    fn uncoloured_role_is_plain() {
        assert_eq!(StyleRole::Value.paint("x", true), "x");
        assert_eq!(StyleRole::Value.to_prettytable_spec(), None);
    }

    #[test]
    fn prettytable_spec_for_header() {
        assert_eq!(StyleRole::Header.to_prettytable_spec(), Some("Fy".to_string()));
    }

    #[test]
    fn color_codes_cover_bright_and_true_colors() {
        assert_eq!(map_color_code(Color::BrightGreen), Some("92".to_string()));
        assert_eq!(
            map_color_code(Color::TrueColor { r: 1, g: 2, b: 3 }),
            Some("38;2;1;2;3".to_string())
        );
    }

    #[test]
    fn clap_palette_uses_named_colors_only() {
        assert_eq!(color_to_ansi(Color::BrightYellow), Some(ClapAnsi::BrightYellow));
        assert_eq!(color_to_ansi(Color::TrueColor { r: 1, g: 2, b: 3 }), None);
    }
}
