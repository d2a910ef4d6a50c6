//! Choosing which source path to display for a call.

use crate::snapshot::{Call, Signature};
use std::fmt;
use std::str::FromStr;

/// Which of a call's paths is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PathFormat {
    /// Local path if the file exists locally, else the path as printed
    Full,
    /// Project-relative path, falling back to `Full`
    #[default]
    Relative,
    /// File name only
    Base,
}

impl PathFormat {
    /// `"<path>:<line>"` for `call`
    pub fn format_call(self, call: &Call) -> String {
        let path: &str = match self {
            PathFormat::Relative if !call.rel_src_path.is_empty() => &call.rel_src_path,
            PathFormat::Relative | PathFormat::Full => {
                if call.local_src_path.is_empty() {
                    &call.remote_src_path
                } else {
                    &call.local_src_path
                }
            }
            PathFormat::Base => call.src_name(),
        };
        format!("{}:{}", path, call.line)
    }

    /// Description of the call that spawned the goroutine, if any
    pub fn created_by(self, signature: &Signature) -> Option<String> {
        let call = signature.created_by.calls.first()?;
        Some(format!(
            "{}.{} @ {}",
            call.func.dir_name,
            call.func.name,
            self.format_call(call)
        ))
    }
}

impl FromStr for PathFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(PathFormat::Full),
            "relative" | "rel" => Ok(PathFormat::Relative),
            "base" => Ok(PathFormat::Base),
            other => Err(format!(
                "unknown path format '{}' (expected full, relative or base)",
                other
            )),
        }
    }
}

impl fmt::Display for PathFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathFormat::Full => "full",
            PathFormat::Relative => "relative",
            PathFormat::Base => "base",
        };
        f.write_str(name)
    }
}
