//! Card brands: descriptors, catalog and the merchant allow-list.
//!
//! ## Key Types
//!
//! - `CardType`: Brand descriptor handed to the model and to merchants
//! - `CardCatalog`: Ordered brand registry with prefix lookup
//! - `SupportedCardTypes`: Normalized allow-list of accepted brands

pub mod card_type;
pub mod catalog;
pub mod supported;

pub use card_type::{CardType, SecurityCode};
pub use catalog::{CardBrand, CardCatalog, Pattern};
pub use supported::{normalize_card_type, SupportedCardTypes};
