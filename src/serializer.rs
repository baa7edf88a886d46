//! Persisted text format for [`Gurl`].
//!
//! ```text
//! <len> \0 <version> \0 <is_valid> \0 <parsed table> \0 <spec>
//! ```
//!
//! `<len>` counts the UTF-16 code units of everything after the first
//! delimiter, so blobs written by other producers of this format stay
//! readable. For ASCII specs it equals the byte length.

use crate::error::{CorruptKind, DeserializeError, Result};
use crate::gurl::Gurl;
use crate::parsed::{Parsed, bool_token};

/// Current version of the serialized format
pub const SERIALIZER_VERSION: i32 = 1;

/// Token separator of the serialized format
pub const SERIALIZER_DELIMITER: char = '\0';

/// Cursor over NUL-separated tokens.
///
/// The last token needs no trailing delimiter; once it is consumed the
/// cursor is exhausted.
pub(crate) struct Tokens<'a> {
    rest: Option<&'a str>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { rest: Some(input) }
    }

    fn next_token(&mut self) -> Result<&'a str> {
        let rest = self.rest.ok_or(CorruptKind::MissingToken)?;
        match memchr::memchr(SERIALIZER_DELIMITER as u8, rest.as_bytes()) {
            Some(pos) => {
                self.rest = Some(&rest[pos + 1..]);
                Ok(&rest[..pos])
            }
            None => {
                self.rest = None;
                Ok(rest)
            }
        }
    }

    pub(crate) fn next_int(&mut self) -> Result<i32> {
        self.next_token()?
            .parse()
            .map_err(|_| CorruptKind::BadInteger.into())
    }

    pub(crate) fn next_bool(&mut self) -> Result<bool> {
        match self.next_token()? {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CorruptKind::BadBoolean.into()),
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.rest.is_none()
    }

    /// Everything after the last consumed delimiter
    fn remainder(self) -> Option<&'a str> {
        self.rest
    }
}

/// Length of `s` in UTF-16 code units
fn utf16_len(s: &str) -> usize {
    if s.is_ascii() {
        s.len()
    } else {
        s.chars().map(char::len_utf16).sum()
    }
}

pub(crate) fn serialize(url: &Gurl) -> String {
    let spec = url.possibly_invalid_spec();
    let mut payload = String::with_capacity(spec.len() + 96);
    payload.push_str(&SERIALIZER_VERSION.to_string());
    payload.push(SERIALIZER_DELIMITER);
    payload.push_str(bool_token(url.is_valid()));
    payload.push(SERIALIZER_DELIMITER);
    url.parsed().write_to(&mut payload);
    payload.push(SERIALIZER_DELIMITER);
    payload.push_str(spec);

    let mut out = utf16_len(&payload).to_string();
    out.reserve(payload.len() + 1);
    out.push(SERIALIZER_DELIMITER);
    out.push_str(&payload);
    out
}

pub(crate) fn deserialize_latest_version_only(text: &str) -> Result<Gurl> {
    if text.is_empty() {
        return Ok(Gurl::empty());
    }

    let (length_token, payload) = text
        .split_once(SERIALIZER_DELIMITER)
        .ok_or(CorruptKind::MissingLength)?;
    let expected: usize = length_token
        .parse()
        .map_err(|_| CorruptKind::MissingLength)?;
    let actual = utf16_len(payload);
    if expected != actual {
        return Err(CorruptKind::LengthMismatch { expected, actual }.into());
    }

    let mut tokens = Tokens::new(payload);
    let version = tokens.next_int()?;
    if version != SERIALIZER_VERSION {
        return Err(DeserializeError::BadVersion { found: version });
    }
    let is_valid = tokens.next_bool()?;
    let parsed = Parsed::read_from(&mut tokens)?;
    let spec = tokens.remainder().ok_or(CorruptKind::MissingToken)?;
    if !parsed.fits(spec) {
        return Err(CorruptKind::ComponentOutOfRange.into());
    }

    Ok(Gurl::from_parts(spec.to_owned(), is_valid, parsed))
}

/// Decode `text`, re-parsing the trailing spec with `reparse` when the blob
/// comes from another serializer version. Corrupt input yields the empty URL.
pub(crate) fn deserialize_or_reparse(text: &str, reparse: impl FnOnce(&str) -> Gurl) -> Gurl {
    match deserialize_latest_version_only(text) {
        Ok(url) => url,
        Err(DeserializeError::BadVersion { found }) => {
            tracing::debug!(
                found,
                expected = SERIALIZER_VERSION,
                "re-parsing URL serialized by another version"
            );
            reparse(trailing_token(text))
        }
        Err(error) => {
            tracing::warn!(%error, len = text.len(), "discarding corrupt serialized URL");
            Gurl::empty()
        }
    }
}

/// Last delimiter-separated token; empty when `text` ends with the delimiter
fn trailing_token(text: &str) -> &str {
    memchr::memrchr(SERIALIZER_DELIMITER as u8, text.as_bytes())
        .map_or(text, |pos| &text[pos + 1..])
}
