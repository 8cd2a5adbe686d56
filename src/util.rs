//! Text decoding helpers for document markup.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Decode markup bytes to a string.
///
/// UTF-8 is tried first (a BOM is stripped). If the bytes are not valid UTF-8,
/// the encoding named in the `<?xml ... encoding="..."?>` declaration is used,
/// and failing that Windows-1252, which accepts any byte sequence.
///
/// Also returns the encoding the markup must be written back in to agree with
/// its own declaration. Markup without a usable declaration is written back as
/// UTF-8, the XML default.
pub fn decode_markup(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
    let (result, encoding, malformed) = UTF_8.decode(bytes);
    if !malformed {
        return (result, encoding.output_encoding());
    }

    if let Some(label) = declared_encoding(bytes)
        && let Some(encoding) = Encoding::for_label(label.as_bytes())
    {
        let (result, used, _) = encoding.decode(bytes);
        return (result, used.output_encoding());
    }

    let (result, _, _) = WINDOWS_1252.decode(bytes);
    (result, UTF_8)
}

/// Encoding label from the XML declaration, if one is present near the start.
pub fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(128)];

    let decl_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let decl = &prefix[decl_start..];
    let decl = &decl[..decl.windows(2).position(|w| w == b"?>").unwrap_or(decl.len())];

    let enc_pos = decl
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let value = &decl[enc_pos + 9..];

    let quote = *value.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = value[1..].iter().position(|&b| b == quote)? + 1;

    std::str::from_utf8(&value[1..end]).ok()
}
