//! Color palette and call-site classification.

use super::ansi::{color_code, RESET_FG};
use crate::snapshot::{Call, Location};
use std::sync::OnceLock;

/// Escape sequences used for every part of the output.
///
/// Each field is an opaque string concatenated into the output, so any
/// field may be left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub eol_reset: String,

    // Routine header.
    /// The first routine printed, when there is more than one
    pub routine_first: String,
    pub routine: String,
    pub created_by: String,
    pub race: String,

    // Call line.
    pub package: String,
    pub src_file: String,
    pub func_main: String,
    pub func_location_unknown: String,
    pub func_location_unknown_exported: String,
    pub func_go_mod: String,
    pub func_go_mod_exported: String,
    pub func_gopath: String,
    pub func_gopath_exported: String,
    pub func_go_pkg: String,
    pub func_go_pkg_exported: String,
    pub func_stdlib: String,
    pub func_stdlib_exported: String,
    pub arguments: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            eol_reset: RESET_FG.to_string(),
            routine_first: color_code("magenta+b"),
            routine: String::new(),
            created_by: color_code("black+h"),
            race: color_code("red+h"),
            package: color_code("default+b"),
            src_file: RESET_FG.to_string(),
            func_main: color_code("yellow+b"),
            func_location_unknown: color_code("white"),
            func_location_unknown_exported: color_code("white+b"),
            func_go_mod: color_code("red"),
            func_go_mod_exported: color_code("red+b"),
            func_gopath: color_code("cyan"),
            func_gopath_exported: color_code("cyan+b"),
            func_go_pkg: color_code("blue"),
            func_go_pkg_exported: color_code("blue+b"),
            func_stdlib: color_code("green"),
            func_stdlib_exported: color_code("green+b"),
            arguments: RESET_FG.to_string(),
        }
    }
}

static DEFAULT_PALETTE: OnceLock<Palette> = OnceLock::new();

/// Process-wide default palette, built on first use and never mutated
pub fn default_palette() -> &'static Palette {
    DEFAULT_PALETTE.get_or_init(Palette::default)
}

impl Palette {
    /// A palette that emits no escape sequences at all
    pub fn plain() -> Self {
        Self {
            eol_reset: String::new(),
            routine_first: String::new(),
            routine: String::new(),
            created_by: String::new(),
            race: String::new(),
            package: String::new(),
            src_file: String::new(),
            func_main: String::new(),
            func_location_unknown: String::new(),
            func_location_unknown_exported: String::new(),
            func_go_mod: String::new(),
            func_go_mod_exported: String::new(),
            func_gopath: String::new(),
            func_gopath_exported: String::new(),
            func_go_pkg: String::new(),
            func_go_pkg_exported: String::new(),
            func_stdlib: String::new(),
            func_stdlib_exported: String::new(),
            arguments: String::new(),
        }
    }

    /// Color for the function name of `call`
    pub fn function_color(&self, call: &Call) -> &str {
        self.func_color(call.location, call.func.pkg_main, call.func.exported)
    }

    /// Color for a function given where it lives.
    ///
    /// Functions of package main always get `func_main`.
    pub fn func_color(&self, location: Location, main: bool, exported: bool) -> &str {
        if main {
            return &self.func_main;
        }
        let (plain, exp) = match location {
            Location::Unknown => (
                &self.func_location_unknown,
                &self.func_location_unknown_exported,
            ),
            Location::GoMod => (&self.func_go_mod, &self.func_go_mod_exported),
            Location::GoPath => (&self.func_gopath, &self.func_gopath_exported),
            Location::GoPkg => (&self.func_go_pkg, &self.func_go_pkg_exported),
            Location::Stdlib => (&self.func_stdlib, &self.func_stdlib_exported),
        };
        if exported {
            exp
        } else {
            plain
        }
    }

    /// Header color. Highlighting the first entry only makes sense when
    /// there is something else to compare it with.
    pub fn routine_color(&self, first: bool, multiple: bool) -> &str {
        if first && multiple {
            &self.routine_first
        } else {
            &self.routine
        }
    }
}
