//! Named color styles resolved to ANSI escape sequences.
//!
//! Styles are written `name[+attributes]`, e.g. `"red"`, `"magenta+b"` or
//! `"black+h"`. Attributes: `b` bold, `B` blink, `u` underline, `i` inverse,
//! `s` strikethrough, `h` high intensity. `name` may also be a 256-color
//! index. The color table comes from `colored`.

use colored::Color;
use std::str::FromStr;

/// Default foreground followed by a full attribute reset
pub const RESET_FG: &str = "\x1b[39m\x1b[m";

/// Resolve a style name to its escape sequence.
///
/// Empty or unrecognized names resolve to an empty string so they print
/// nothing.
pub fn color_code(style: &str) -> String {
    if style.is_empty() {
        return String::new();
    }
    if style == "reset" {
        return "\x1b[0m".to_string();
    }

    let (name, attrs) = style.split_once('+').unwrap_or((style, ""));
    let high = attrs.contains('h');

    let fg = if name == "default" {
        "39".to_string()
    } else if let Ok(index) = name.parse::<u8>() {
        format!("38;5;{}", index)
    } else {
        match Color::from_str(name) {
            Ok(color) if high => brighten(color).to_fg_str().into_owned(),
            Ok(color) => color.to_fg_str().into_owned(),
            Err(()) => return String::new(),
        }
    };

    let mut code = String::from("\x1b[");
    for (flag, sgr) in [('b', "1;"), ('B', "5;"), ('u', "4;"), ('i', "7;"), ('s', "9;")] {
        if attrs.contains(flag) {
            code.push_str(sgr);
        }
    }
    code.push_str(&fg);
    code.push('m');
    code
}

fn brighten(color: Color) -> Color {
    match color {
        Color::Black => Color::BrightBlack,
        Color::Red => Color::BrightRed,
        Color::Green => Color::BrightGreen,
        Color::Yellow => Color::BrightYellow,
        Color::Blue => Color::BrightBlue,
        Color::Magenta => Color::BrightMagenta,
        Color::Cyan => Color::BrightCyan,
        Color::White => Color::BrightWhite,
        other => other,
    }
}
