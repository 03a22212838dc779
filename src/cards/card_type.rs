//! Card type descriptors.
//!
//! A [`CardType`] is the brand metadata handed to the model and, stripped down,
//! to merchants: display name, security code name and size, digit grouping and
//! accepted number lengths. `supported` is filled in per request.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Security code metadata (`CVV`, `CID`, `CVC`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityCode {
    /// Name printed on the card.
    pub name: String,
    /// Number of digits.
    pub size: usize,
}

impl SecurityCode {
    /// Create a new security code description.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl Default for SecurityCode {
    fn default() -> Self {
        Self::new("CVV", 3)
    }
}

/// A card brand descriptor.
///
/// ## Example
///
/// ```
/// use card_fields::cards::CardType;
///
/// let amex = CardType::new("american-express", "American Express")
///     .with_code("CID", 4)
///     .with_gaps([4, 10])
///     .with_lengths([15]);
///
/// assert_eq!(amex.code.size, 4);
/// assert_eq!(amex.max_length(), Some(15));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardType {
    /// Canonical key (`"visa"`, `"american-express"`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Display name.
    pub nice_type: String,

    /// Positions after which a formatter inserts a space.
    pub gaps: SmallVec<[usize; 4]>,

    /// Accepted number lengths, ascending.
    pub lengths: SmallVec<[usize; 4]>,

    /// Security code.
    pub code: SecurityCode,

    /// Whether the merchant accepts this brand.
    pub supported: bool,
}

impl CardType {
    /// Create a descriptor with a 3-digit `CVV`, no gaps and no lengths.
    pub fn new(kind: impl Into<String>, nice_type: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            nice_type: nice_type.into(),
            gaps: SmallVec::new(),
            lengths: SmallVec::new(),
            code: SecurityCode::default(),
            supported: true,
        }
    }

    /// Set the security code (builder pattern).
    #[must_use]
    pub fn with_code(mut self, name: impl Into<String>, size: usize) -> Self {
        self.code = SecurityCode::new(name, size);
        self
    }

    /// Set the digit grouping (builder pattern).
    #[must_use]
    pub fn with_gaps(mut self, gaps: impl IntoIterator<Item = usize>) -> Self {
        self.gaps = gaps.into_iter().collect();
        self
    }

    /// Set the accepted lengths (builder pattern).
    #[must_use]
    pub fn with_lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
        self.lengths = lengths.into_iter().collect();
        self
    }

    /// Set the supported flag (builder pattern).
    #[must_use]
    pub fn with_supported(mut self, supported: bool) -> Self {
        self.supported = supported;
        self
    }

    /// Longest accepted number length.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.lengths.iter().copied().max()
    }
}
