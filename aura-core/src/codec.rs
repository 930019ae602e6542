//! Encrypted-value codec
//!
//! The reference codec stands in for a real homomorphic scheme: tokens are
//! reversibly encoded, so the privacy invariant is structural, not
//! cryptographic. The contract that must survive any reimplementation is
//! that `transform` maps encrypted input to encrypted output without
//! surfacing plaintext to the caller.

use crate::{
    error::{Error, Result},
    types::EncryptedScalar,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Token prefix marking a codec-produced value
pub const TOKEN_PREFIX: &str = "FHE-";

/// Homomorphic-style operation applied to an encrypted scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Multiply by 1.10
    Increase10Pct,
    /// Multiply by 0.90
    Decrease10Pct,
    /// Multiply by 2
    Double,
    /// Leave unchanged
    Identity,
}

impl Operation {
    /// Parse an operation tag
    ///
    /// Unrecognized tags map to `Identity`; an unknown operation must never
    /// fail, only pass the value through.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "increase10pct" | "increase10%" => Operation::Increase10Pct,
            "decrease10pct" | "decrease10%" => Operation::Decrease10Pct,
            "double" => Operation::Double,
            _ => Operation::Identity,
        }
    }

    /// Apply the pure numeric function this operation selects
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Operation::Increase10Pct => value * 1.10,
            Operation::Decrease10Pct => value * 0.90,
            Operation::Double => value * 2.0,
            Operation::Identity => value,
        }
    }
}

/// Codec contract for opaque scalars
///
/// The registry and the match engine depend only on this trait; swapping in
/// a production scheme (external secure-computation service) must not touch
/// either.
pub trait ScalarCodec: Send + Sync {
    /// Encode a finite non-negative value into an opaque token
    fn encode(&self, value: f64) -> EncryptedScalar;

    /// Recover the value from a token
    fn decode(&self, token: &EncryptedScalar) -> Result<f64>;

    /// Apply an operation to an encrypted value, producing an encrypted value
    ///
    /// The default implementation decodes, applies, and re-encodes. A real
    /// scheme overrides this to operate on ciphertext directly.
    fn transform(&self, token: &EncryptedScalar, op: Operation) -> Result<EncryptedScalar> {
        let value = self.decode(token)?;
        Ok(self.encode(op.apply(value)))
    }
}

/// Reference codec: reversible base64 encoding behind the token prefix
///
/// Accepts bare numeric strings on decode for compatibility with records
/// written before the prefix form existed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceCodec;

impl ScalarCodec for ReferenceCodec {
    fn encode(&self, value: f64) -> EncryptedScalar {
        let encoded = STANDARD.encode(value.to_string());
        EncryptedScalar::from_token(format!("{}{}", TOKEN_PREFIX, encoded))
    }

    fn decode(&self, token: &EncryptedScalar) -> Result<f64> {
        let raw = token.as_str();

        if let Some(body) = raw.strip_prefix(TOKEN_PREFIX) {
            let bytes = STANDARD
                .decode(body)
                .map_err(|e| Error::Decode(format!("invalid base64 body: {}", e)))?;
            let text = String::from_utf8(bytes)
                .map_err(|e| Error::Decode(format!("token body not UTF-8: {}", e)))?;
            return text
                .parse::<f64>()
                .map_err(|e| Error::Decode(format!("token body not numeric: {}", e)));
        }

        // Bare numbers predate the prefixed form
        raw.parse::<f64>()
            .map_err(|_| Error::Decode(format!("unrecognized token shape: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(token: &EncryptedScalar) -> f64 {
        ReferenceCodec.decode(token).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let codec = ReferenceCodec;
        for value in [0.0, 1.0, 42.0, 99.5, 1234.25] {
            let token = codec.encode(value);
            assert!(token.as_str().starts_with(TOKEN_PREFIX));
            assert_eq!(decode(&token), value);
        }
    }

    #[test]
    fn test_decode_bare_number() {
        let token = EncryptedScalar::from_token("87.5");
        assert_eq!(decode(&token), 87.5);
    }

    #[test]
    fn test_decode_malformed() {
        let codec = ReferenceCodec;
        for raw in ["FHE-!!!not-base64!!!", "not a number", ""] {
            let result = codec.decode(&EncryptedScalar::from_token(raw));
            assert!(matches!(result, Err(Error::Decode(_))), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_decode_non_numeric_body() {
        let token = EncryptedScalar::from_token(format!("FHE-{}", STANDARD.encode("hello")));
        let result = ReferenceCodec.decode(&token);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_transform_double() {
        let codec = ReferenceCodec;
        let token = codec.encode(50.0);
        let doubled = codec.transform(&token, Operation::Double).unwrap();
        assert_eq!(decode(&doubled), 100.0);
    }

    #[test]
    fn test_transform_increase() {
        let codec = ReferenceCodec;
        let token = codec.encode(50.0);
        let bumped = codec.transform(&token, Operation::Increase10Pct).unwrap();
        assert!((decode(&bumped) - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_decrease() {
        let codec = ReferenceCodec;
        let token = codec.encode(100.0);
        let reduced = codec.transform(&token, Operation::Decrease10Pct).unwrap();
        assert!((decode(&reduced) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_tag_is_identity() {
        assert_eq!(Operation::parse("sqrt"), Operation::Identity);
        assert_eq!(Operation::parse(""), Operation::Identity);

        let codec = ReferenceCodec;
        let token = codec.encode(73.0);
        let unchanged = codec
            .transform(&token, Operation::parse("definitely-unknown"))
            .unwrap();
        assert_eq!(decode(&unchanged), 73.0);
    }

    #[test]
    fn test_transform_output_stays_opaque() {
        let codec = ReferenceCodec;
        let token = codec.encode(50.0);
        let out = codec.transform(&token, Operation::Double).unwrap();
        assert!(out.as_str().starts_with(TOKEN_PREFIX));
    }
}
