use std::borrow::Cow;

/// Single-byte encoding tried when a line is not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[default]
    Latin1,
    /// No fallback: lines that are not UTF-8 are dropped.
    None,
}

/// Decodes one raw line, UTF-8 first and then the fallback.
///
/// Returns `None` when no supported encoding accepts the bytes.
pub fn decode_line(bytes: &[u8], fallback: FallbackEncoding) -> Option<Cow<'_, str>> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(Cow::Borrowed(text)),
        Err(_) => match fallback {
            FallbackEncoding::Latin1 => Some(Cow::Owned(
                bytes.iter().copied().map(char::from).collect(),
            )),
            FallbackEncoding::None => None,
        },
    }
}
