//! CBOR row codec.
//!
//! Rows are decoded from untrusted bytes: input is length-checked against
//! [`MAX_ROW_BYTES`] first, and a panic inside the decoder is reported as
//! an error instead of unwinding into the store.

use crate::{
    db::store::MAX_ROW_BYTES,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use serde::{Serialize, de::DeserializeOwned};
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error as ThisError;

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("encode failed: {0}")]
    Encode(#[source] serde_cbor::Error),

    #[error("decode failed: {0}")]
    Decode(#[source] serde_cbor::Error),

    #[error("payload of {len} bytes exceeds {limit}")]
    TooLarge { len: usize, limit: u32 },

    #[error("decoder panicked")]
    Panicked,
}

impl From<SerializeError> for InternalError {
    fn from(err: SerializeError) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Serialize, err.to_string())
    }
}

/// Encode a value as a store row.
pub fn serialize<T>(value: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    serde_cbor::to_vec(value).map_err(SerializeError::Encode)
}

/// Decode a row produced by [`serialize`].
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > MAX_ROW_BYTES as usize {
        return Err(SerializeError::TooLarge {
            len: bytes.len(),
            limit: MAX_ROW_BYTES,
        });
    }

    match catch_unwind(AssertUnwindSafe(|| serde_cbor::from_slice(bytes))) {
        Ok(decoded) => decoded.map_err(SerializeError::Decode),
        Err(_) => Err(SerializeError::Panicked),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_rejects_truncated_payload() {
        let bytes = serialize(&("Test Widget", 50.0_f64)).unwrap();
        let err = deserialize::<(String, f64)>(&bytes[..bytes.len() - 3]).unwrap_err();

        assert!(matches!(err, SerializeError::Decode(_)));
    }

    #[test]
    fn deserialize_rejects_wrong_shape() {
        let bytes = serialize(&"just text").unwrap();
        let err = deserialize::<(String, f64)>(&bytes).unwrap_err();

        assert!(matches!(err, SerializeError::Decode(_)));
    }

    #[test]
    fn deserialize_bounds_input_before_decoding() {
        let bytes = vec![0; MAX_ROW_BYTES as usize + 1];
        let err = deserialize::<String>(&bytes).unwrap_err();

        assert!(matches!(err, SerializeError::TooLarge { limit: MAX_ROW_BYTES, .. }));
    }

    #[test]
    fn errors_surface_as_internal_serialize_failures() {
        let err = InternalError::from(deserialize::<u8>(&[]).unwrap_err());

        assert_eq!(err.class, ErrorClass::Internal);
        assert_eq!(err.origin, ErrorOrigin::Serialize);
    }
}
