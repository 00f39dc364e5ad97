//! Domain value types handed to the recorder by the retrieval pipeline.
//!
//! Identifiers are opaque: the recorder only ever needs their canonical
//! string form, so they are thin newtypes rather than parsed structures.

use std::fmt;
use std::sync::Arc;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(canonical: impl Into<String>) -> Self {
                Self(canonical.into())
            }

            /// Canonical string representation.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

opaque_id!(
    /// Content identifier of a block or DAG root.
    Cid
);

opaque_id!(
    /// Identity of a remote peer (storage provider or retrieval client).
    PeerId
);

opaque_id!(
    /// Wallet address used to pay for retrievals.
    WalletAddress
);

/// attoFIL per FIL.
const ATTO_PER_FIL: u128 = 1_000_000_000_000_000_000;
const FRACTION_DIGITS: usize = 18;

/// Monetary amount in attoFIL.
///
/// Displays as a decimal FIL value with trailing zeros trimmed, e.g. `0.001`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    pub fn from_atto(atto: u128) -> Self {
        Self(atto)
    }

    pub fn from_whole(fil: u64) -> Self {
        Self(u128::from(fil) * ATTO_PER_FIL)
    }

    pub fn atto(&self) -> u128 {
        self.0
    }

    /// Lossy FIL value, used for distribution observations.
    pub fn as_fil_f64(&self) -> f64 {
        let whole = (self.0 / ATTO_PER_FIL) as f64;
        let frac = (self.0 % ATTO_PER_FIL) as f64 / ATTO_PER_FIL as f64;
        whole + frac
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / ATTO_PER_FIL;
        let frac = self.0 % ATTO_PER_FIL;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:0width$}", frac, width = FRACTION_DIGITS);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

/// An error reported *to* the recorder by the retrieval pipeline.
///
/// Cheap to clone; displays as the wrapped error.
#[derive(Clone)]
pub struct ReportedError(Arc<dyn std::error::Error + Send + Sync + 'static>);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

impl ReportedError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(err))
    }

    /// Wrap a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }
}

impl From<Box<dyn std::error::Error + Send + Sync + 'static>> for ReportedError {
    fn from(err: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self(Arc::from(err))
    }
}

impl fmt::Debug for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl std::error::Error for ReportedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_amount_display() {
        assert_eq!(TokenAmount::ZERO.to_string(), "0");
        assert_eq!(TokenAmount::from_whole(3).to_string(), "3");
        assert_eq!(TokenAmount::from_atto(1_000_000_000_000_000).to_string(), "0.001");
        assert_eq!(TokenAmount::from_atto(1_500_000_000_000_000_000).to_string(), "1.5");
        assert_eq!(TokenAmount::from_atto(1).to_string(), "0.000000000000000001");
    }

    #[test]
    fn test_token_amount_as_fil() {
        let amount = TokenAmount::from_atto(2_250_000_000_000_000_000);
        assert!((amount.as_fil_f64() - 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_reported_error_displays_inner() {
        let err = ReportedError::msg("timeout");
        assert_eq!(err.to_string(), "timeout");

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = ReportedError::new(io);
        assert_eq!(err.to_string(), "reset by peer");
        assert_eq!(err.clone().to_string(), "reset by peer");
    }

    #[test]
    fn test_ids_compare_by_canonical_string() {
        assert_eq!(Cid::from("QmA"), Cid::new("QmA".to_string()));
        assert_ne!(Cid::from("QmA"), Cid::from("QmB"));
        assert_eq!(PeerId::from("P").to_string(), "P");
    }
}
