//! The credit card form model and what can be read out of it.
//!
//! ## Key Types
//!
//! - [`CreditCardForm`]: Reactive field state, validation and notifications
//! - [`FormSnapshot`]: Initial state a form is built from and reset to
//! - [`CardData`]: Submittable values

pub mod card_data;
pub mod model;

pub use card_data::{split_expiration_date, CardData};
pub use model::{CreditCardForm, FormSnapshot};
