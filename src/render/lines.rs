//! Formatting of headers and call lines.

use super::layout::Layout;
use super::palette::Palette;
use super::path::PathFormat;
use crate::snapshot::{Bucket, Call, Goroutine, Signature};
use crate::utils::config::{ELIDED_LINE, STACK_INDENT};

impl Palette {
    /// One stack frame, padded to the render's column widths
    pub fn call_line(&self, call: &Call, layout: &Layout, pf: PathFormat) -> String {
        format!(
            "{indent}{}{:<pkg$} {}{:<src$} {}{}{}({}){}",
            self.package,
            call.func.dir_name,
            self.src_file,
            pf.format_call(call),
            self.function_color(call),
            call.func.name,
            self.arguments,
            call.args,
            self.eol_reset,
            indent = STACK_INDENT,
            pkg = layout.pkg_width,
            src = layout.src_width,
        )
    }

    /// Every frame of the signature's stack, newline terminated
    pub fn stack_lines(&self, signature: &Signature, layout: &Layout, pf: PathFormat) -> String {
        let mut out: Vec<String> = signature
            .stack
            .calls
            .iter()
            .map(|call| self.call_line(call, layout, pf))
            .collect();
        if signature.stack.elided {
            out.push(ELIDED_LINE.to_string());
        }
        out.join("\n") + "\n"
    }

    /// Header of a group of goroutines: member count, then state
    pub fn bucket_header(&self, bucket: &Bucket, pf: PathFormat, multiple: bool) -> String {
        let extra = self.header_extra(&bucket.signature, pf);
        format!(
            "{}{}: {}{}{}\n",
            self.routine_color(bucket.first, multiple),
            bucket.ids.len(),
            bucket.signature.state,
            extra,
            self.eol_reset
        )
    }

    /// Header of a single goroutine, including any race annotation
    pub fn goroutine_header(&self, g: &Goroutine, pf: PathFormat, multiple: bool) -> String {
        let mut extra = self.header_extra(&g.signature, pf);
        if g.race_addr != 0 {
            let access = if g.race_write { "write" } else { "read" };
            extra.push_str(&format!(
                "{}{} Race {} @ 0x{:08x}",
                self.eol_reset, self.race, access, g.race_addr
            ));
        }
        format!(
            "{}{}: {}{}{}\n",
            self.routine_color(g.first, multiple),
            g.id,
            g.signature.state,
            extra,
            self.eol_reset
        )
    }

    /// Sleep, lock and creator annotations shared by both header kinds
    fn header_extra(&self, signature: &Signature, pf: PathFormat) -> String {
        let mut extra = String::new();
        let sleep = signature.sleep_string();
        if !sleep.is_empty() {
            extra.push_str(&format!(" [{}]", sleep));
        }
        if signature.locked {
            extra.push_str(" [locked]");
        }
        if let Some(creator) = pf.created_by(signature) {
            extra.push_str(&format!("{} [Created by {}]", self.created_by, creator));
        }
        extra
    }
}
