//! Structured snapshot types produced by a snapshot engine.
//!
//! The renderer only reads these. They are `serde`-friendly so that a
//! snapshot parsed elsewhere can be stored and fed back as a JSON document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point-in-time capture of goroutine stacks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Goroutines in the order the runtime printed them
    #[serde(default)]
    pub goroutines: Vec<Goroutine>,

    /// Set when the dump came from the race detector
    #[serde(default)]
    pub race: bool,
}

impl Snapshot {
    pub fn is_race(&self) -> bool {
        self.race
    }
}

/// One execution stack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goroutine {
    pub id: u64,

    /// First goroutine in display order
    #[serde(default)]
    pub first: bool,

    /// The goroutine that requested the dump
    #[serde(default)]
    pub current: bool,

    /// Address involved in a data race, 0 when none
    #[serde(default)]
    pub race_addr: u64,

    #[serde(default)]
    pub race_write: bool,

    pub signature: Signature,
}

/// Goroutines sharing an equivalent signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub ids: Vec<u64>,
    #[serde(default)]
    pub first: bool,
    pub signature: Signature,
}

/// What identifies a goroutine for grouping purposes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Execution state, e.g. "running" or "chan receive"
    pub state: String,

    /// Sleep duration range in minutes
    #[serde(default)]
    pub sleep_min: u32,
    #[serde(default)]
    pub sleep_max: u32,

    /// Locked to an OS thread
    #[serde(default)]
    pub locked: bool,

    pub stack: Stack,

    /// Call chain that spawned the goroutine, empty for the main goroutine
    #[serde(default)]
    pub created_by: Stack,
}

impl Signature {
    /// Human readable sleep range, empty when the goroutine never slept
    pub fn sleep_string(&self) -> String {
        if self.sleep_max == 0 {
            return String::new();
        }
        if self.sleep_min != self.sleep_max {
            return format!("{}~{} minutes", self.sleep_min, self.sleep_max);
        }
        format!("{} minutes", self.sleep_max)
    }
}

/// Frames of one stack, nearest caller first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    #[serde(default)]
    pub calls: Vec<Call>,

    /// The runtime truncated the stack
    #[serde(default)]
    pub elided: bool,
}

/// One stack frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub func: Func,

    #[serde(default)]
    pub location: Location,

    pub line: u32,

    /// Path relative to the project root, when known
    #[serde(default)]
    pub rel_src_path: String,

    /// Path on the local file system, when the source exists locally
    #[serde(default)]
    pub local_src_path: String,

    /// Path as printed by the runtime. Always populated.
    pub remote_src_path: String,

    #[serde(default)]
    pub args: Args,
}

impl Call {
    /// Bare file name of the source file
    pub fn src_name(&self) -> &str {
        self.remote_src_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.remote_src_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Func {
    /// Function name without the package, e.g. "(*Server).Serve"
    pub name: String,

    /// Name of the directory containing the package
    #[serde(default)]
    pub dir_name: String,

    #[serde(default)]
    pub exported: bool,

    /// Lives in package main
    #[serde(default)]
    pub pkg_main: bool,
}

/// Where a call site's code comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Dependency resolved through Go modules
    GoMod,
    /// Dependency found under GOPATH
    GoPath,
    /// Vendored or other non-module package
    GoPkg,
    Stdlib,
    /// Anything not recognized above. Must stay the last variant.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Arguments of a call as printed by the runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Args {
    #[serde(default)]
    pub values: Vec<Arg>,

    /// More arguments were present than printed
    #[serde(default)]
    pub elided: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    pub value: u64,

    /// The engine believes the value is a pointer
    #[serde(default)]
    pub is_ptr: bool,

    /// Placeholder name assigned by the engine, e.g. "#1"
    #[serde(default)]
    pub name: String,
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            return f.write_str(&self.name);
        }
        if self.value == 0 {
            return f.write_str("0");
        }
        write!(f, "{:#x}", self.value)
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        if self.elided {
            if !self.values.is_empty() {
                f.write_str(", ")?;
            }
            f.write_str("...")?;
        }
        Ok(())
    }
}
