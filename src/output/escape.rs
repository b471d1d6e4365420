// src/output/escape.rs
// =============================================================================
// Escapes app names before they go into the CSV.
//
// App names are full of emoji and non-Latin scripts. The output file keeps
// them as printable ASCII escapes instead of raw characters:
//   '\\'          -> \\
//   tab/LF/CR     -> \t \n \r
//   other control -> \xNN
//   U+0080..U+00FF -> \xNN
//   U+0100..U+FFFF -> \uNNNN
//   above         -> \UNNNNNNNN
// Printable ASCII is written as-is.
// =============================================================================

use std::fmt::Write;

pub fn escape_unicode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        let code = c as u32;
        // write! into a String cannot fail
        let _ = match c {
            '\\' => write!(out, "\\\\"),
            '\t' => write!(out, "\\t"),
            '\n' => write!(out, "\\n"),
            '\r' => write!(out, "\\r"),
            ' '..='~' => write!(out, "{c}"),
            _ if code <= 0xff => write!(out, "\\x{code:02x}"),
            _ if code <= 0xffff => write!(out, "\\u{code:04x}"),
            _ => write!(out, "\\U{code:08x}"),
        };
    }

    out
}
