//! Configuration and constants for rendering.

use crate::render::PathFormat;
use crate::snapshot::Similarity;

/// Initial size of the buffer handed to the dump source.
/// Doubled every time the dump fills it completely.
pub const INITIAL_DUMP_BUFFER: usize = 2048;

/// Path display used when the caller does not pick one
pub const DEFAULT_PATH_FORMAT: PathFormat = PathFormat::Relative;

/// Similarity policy requested from the engine in bucketed mode
pub const DEFAULT_SIMILARITY: Similarity = Similarity::AnyPointer;

/// Indentation of every call line
pub const STACK_INDENT: &str = "    ";

/// Line printed in place of frames dropped by the capture mechanism
pub const ELIDED_LINE: &str = "    (...)";

/// Environment variable mirroring `--path-format`
pub const PATH_FORMAT_ENV: &str = "PPSTACK_PATH_FORMAT";
