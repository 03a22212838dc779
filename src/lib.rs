//! # card-fields
//!
//! Reactive field state for hosted payment-card inputs.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: The host declares which fields exist
//!    (`FormConfig`); only configured fields are modeled, validated and
//!    reported.
//!
//! 2. **Derived, Never Stored Twice**: Emptiness, validity and possible card
//!    types are recomputed from values on every change, so they cannot drift.
//!
//! 3. **Values Stay Inside**: Notifications describe field flags and candidate
//!    brands, never what the user typed.
//!
//! ## Architecture
//!
//! - **Explicit Dispatch Table**: Dotted paths map to ordered reactions in a
//!   `ChangeRegistry`; reactions receive the form as `&mut` and may write
//!   further paths.
//!
//! - **Coalesced Notifications**: Transitions are queued during an operation
//!   and published once it completes, so each payload shows the final state.
//!
//! - **Persistent Data Structures**: Candidate brand lists are `im-rs` vectors,
//!   cheap to snapshot into payloads.
//!
//! ## Modules
//!
//! - `core`: Field keys and state, model paths, configuration, errors
//! - `cards`: Card type descriptors, brand catalog, supported-brand lists
//! - `validation`: Number, CVV, expiration and postal code rules
//! - `events`: Change registry, notification payloads and sinks
//! - `form`: The credit card form model and card data extraction

pub mod core;
pub mod cards;
pub mod validation;
pub mod events;
pub mod form;

// Re-export commonly used types
pub use crate::core::{
    FieldAttribute, FieldKey, FieldState,
    FieldOptions, FormConfig,
    ModelPath, ModelValue,
    ConfigError, ModelError,
};

pub use crate::cards::{CardType, SecurityCode, CardBrand, CardCatalog, Pattern, SupportedCardTypes};

pub use crate::validation::{
    CardValidator, StandardValidator, Verification,
    NumberOptions, PostalCodeOptions,
};

pub use crate::events::{
    ChangeRegistry, Subscription, SubscriptionId,
    ExternalEvent, INPUT_EVENT,
    InputEvent, MerchantPayload, CardSummary, FieldSummary,
    Notifier, RecordingNotifier, TracingNotifier,
};

pub use crate::form::{CreditCardForm, FormSnapshot, CardData};
