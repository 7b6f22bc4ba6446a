//! Module: db::cursor
//! Responsibility: the opaque continuation token and its derivation from
//! the last row of a page.
//! Does not own: typing the decoded parts (see the predicate builder).
//!
//! Token layout: URL-safe base64 (no padding) over the UTF-8 bytes of
//! `key`, or of `key NUL target` when a sorted-field value is carried.


use crate::{
    db::Keyset,
    error::Error,
    model::FieldModel,
    obs::MetricsEvent,
    traits::EntityKind,
};
use base64::{
    Engine, alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE_NO_PAD,
    },
};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Separates key and target inside the payload.
pub(crate) const DELIMITER: char = '\0';

// Same alphabet as the encoder; trailing padding is tolerated on input.
const DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

///
/// CursorDecodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorDecodeError {
    #[error("cursor token exceeds max length: {len} (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not url-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cursor payload is not valid utf-8 (valid up to byte {valid_up_to})")]
    Utf8 { valid_up_to: usize },
}

///
/// Cursor
///
/// Decoded continuation position: the stringified key of the last row and,
/// when the page was sorted by another field, that field's stringified value.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Cursor {
    pub key: String,
    pub target: Option<String>,
}

impl Cursor {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(key: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: Some(target.into()),
        }
    }

    /// Encode into the opaque token.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_cursor_with_target(&self.key, self.target.as_deref())
    }

    // Split a decoded payload at the first delimiter.
    fn from_payload(mut payload: String) -> Self {
        match payload.find(DELIMITER) {
            Some(at) => {
                let target = payload[at + DELIMITER.len_utf8()..].to_string();
                payload.truncate(at);

                Self {
                    key: payload,
                    target: Some(target),
                }
            }
            None => Self {
                key: payload,
                target: None,
            },
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Cursor {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(decode_token(token)?)
    }
}

/// Encode a key-only cursor.
#[must_use]
pub fn encode_cursor(key: &str) -> String {
    URL_SAFE_NO_PAD.encode(key.as_bytes())
}

/// Encode a cursor carrying the sorted-field value; `None` is the key-only form.
#[must_use]
pub fn encode_cursor_with_target(key: &str, target: Option<&str>) -> String {
    let Some(target) = target else {
        return encode_cursor(key);
    };

    let mut payload = String::with_capacity(key.len() + DELIMITER.len_utf8() + target.len());
    payload.push_str(key);
    payload.push(DELIMITER);
    payload.push_str(target);

    URL_SAFE_NO_PAD.encode(payload.as_bytes())
}

/// Key-only cursor for the last element of a scalar sequence.
#[must_use]
pub fn encode_last_cursor<T: fmt::Display>(items: &[T]) -> Option<String> {
    items.last().map(|item| encode_cursor(&item.to_string()))
}

/// Decode a token. `None` (no token) means the first page and is not an error.
pub fn decode_cursor(token: Option<&str>) -> Result<Option<Cursor>, Error> {
    let Some(token) = token else {
        return Ok(None);
    };

    Ok(Some(decode_token(token)?))
}

pub(crate) fn decode_token(token: &str) -> Result<Cursor, CursorDecodeError> {
    let bytes = DECODER.decode(token)?;
    let payload = String::from_utf8(bytes).map_err(|err| CursorDecodeError::Utf8 {
        valid_up_to: err.utf8_error().valid_up_to(),
    })?;

    Ok(Cursor::from_payload(payload))
}

// Cursor positioned on `row`. A null target (or a target that is the key
// itself) yields the key-only form.
pub(crate) fn cursor_for_row<E: EntityKind>(
    row: &E,
    key: &FieldModel<E>,
    target: Option<&FieldModel<E>>,
) -> Result<Cursor, Error> {
    if !key.kind().is_supported() {
        return Err(Error::UnsupportedFieldType {
            type_name: key.kind().name(),
        });
    }

    let key_value = key
        .value(row)
        .to_cursor_string()
        .ok_or(Error::InvalidKeyValue { field: key.name })?;

    let target = match target {
        Some(field) if field.name != key.name => {
            if !field.kind().is_supported() {
                return Err(Error::UnsupportedFieldType {
                    type_name: field.kind().name(),
                });
            }

            field.value(row).to_cursor_string()
        }
        _ => None,
    };

    Ok(Cursor {
        key: key_value,
        target,
    })
}

impl Keyset {
    /// Decode a client token, enforcing `cursor.max_token_len` when set.
    pub fn decode_cursor(&self, token: Option<&str>) -> Result<Option<Cursor>, Error> {
        let Some(token) = token else {
            return Ok(None);
        };

        let decoded = match self.config().cursor.max_token_len {
            Some(max) if token.len() > max => Err(CursorDecodeError::TooLong {
                len: token.len(),
                max,
            }),
            _ => decode_token(token),
        };

        match decoded {
            Ok(cursor) => {
                self.record(MetricsEvent::CursorDecode { accepted: true });

                Ok(Some(cursor))
            }
            Err(err) => {
                self.record(MetricsEvent::CursorDecode { accepted: false });
                tracing::debug!(error = %err, "cursor rejected");

                Err(err.into())
            }
        }
    }

    /// Cursor token for the page after `page`, read from its last row.
    ///
    /// Returns `Ok(None)` for an empty page.
    pub fn derive_cursor<E: EntityKind>(
        &self,
        page: &[E],
        key_field: &str,
        target_field: Option<&str>,
    ) -> Result<Option<String>, Error> {
        let Some(last) = page.last() else {
            return Ok(None);
        };

        let key = self.resolve_field::<E>(key_field)?;
        let target = target_field
            .map(|name| self.resolve_field::<E>(name))
            .transpose()?;

        let cursor = cursor_for_row(last, key, target)?;

        Ok(Some(cursor.encode()))
    }
}
