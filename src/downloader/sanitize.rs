// Filename sanitizer - titles become file- and header-safe names

use regex::Regex;

/// Used when nothing printable survives sanitizing
pub const DEFAULT_FILENAME: &str = "download";

/// Maximum length of a sanitized name, in characters
pub const MAX_FILENAME_LEN: usize = 200;

lazy_static::lazy_static! {
    static ref ILLEGAL_RE: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Common typographic characters and their ASCII stand-ins
fn ascii_equivalent(c: char) -> Option<&'static str> {
    let replacement = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
        | '\u{2212}' => "-",
        '\u{2026}' => "...",
        '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{202F}' | '\u{3000}' => " ",
        '\u{2022}' | '\u{00B7}' => "-",
        '\u{FF5C}' => "|",
        '\u{FF1A}' => ":",
        _ => return None,
    };
    Some(replacement)
}

/// Turn an arbitrary title into a name safe for filesystems and for a
/// quoted `Content-Disposition` filename.
///
/// The result is ASCII only, has no `<>:"/\|?*` or control characters,
/// is at most 200 characters long and is never empty.
pub fn sanitize_filename(name: &str) -> String {
    let normalized: String = name
        .chars()
        .map(|c| match ascii_equivalent(c) {
            Some(s) => s.to_string(),
            None => c.to_string(),
        })
        .collect();

    let without_illegal = ILLEGAL_RE.replace_all(&normalized, "");

    let ascii: String = without_illegal
        .chars()
        .map(|c| if c.is_ascii_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect();

    let collapsed = WHITESPACE_RE.replace_all(&ascii, " ");
    let trimmed = collapsed.trim();

    // ASCII only at this point, so byte and char counts agree
    let truncated = &trimmed[..trimmed.len().min(MAX_FILENAME_LEN)];
    let result = truncated.trim_end();

    if result.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        result.to_string()
    }
}
