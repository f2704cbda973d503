//! Low-level text helpers shared by the column and record decoders.

use encoding_rs::{Encoding, WINDOWS_1252};

/// Strips a raw name field down to printable ASCII.
///
/// The field is truncated at the first NUL, every byte outside `0x20..=0x7E`
/// is dropped and surrounding whitespace is trimmed.
pub fn normalize_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let printable: String = raw[..end]
        .iter()
        .filter(|b| (0x20..=0x7E).contains(*b))
        .map(|&b| b as char)
        .collect();
    printable.trim().to_string()
}

/// Converts a column name into its lower snake case alias.
///
/// `"LastName"` and `"LAST_NAME"` both become `"last_name"`, and an acronym
/// run keeps its last capital for the next word (`"HTTPServer"` becomes
/// `"http_server"`).
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        match c {
            '-' | ' ' => out.push('_'),
            _ => out.push(c.to_ascii_lowercase()),
        }
    }
    out
}

/// Reads a single-character flag: `y`/`t` prefixes (any case) are true.
///
/// Surrounding whitespace is ignored; anything else, including an empty
/// field, is false.
pub fn decode_boolean(text: &str) -> bool {
    matches!(
        text.trim().chars().next().map(|c| c.to_ascii_lowercase()),
        Some('y') | Some('t')
    )
}

/// Decodes a fixed-width text field, dropping trailing space and NUL padding.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |pos| pos + 1);
    let (text, _) = encoding.decode_without_bom_handling(&bytes[..end]);
    text.into_owned()
}

/// Resolves an encoding label, falling back to Windows-1252.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or(WINDOWS_1252)
}
