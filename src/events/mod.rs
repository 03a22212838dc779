//! Change dispatch and outbound notifications.
//!
//! ## Key Types
//!
//! - [`ChangeRegistry`]: Reactions indexed by the model path they watch
//! - [`ExternalEvent`]: Transition vocabulary reported to the host
//! - [`InputEvent`]: Notification payload
//! - [`Notifier`]: Outbound sink

pub mod event;
pub mod notifier;
pub mod payload;
pub mod registry;

pub use event::{ExternalEvent, INPUT_EVENT};
pub use notifier::{Notifier, RecordingNotifier, TracingNotifier};
pub use payload::{CardSummary, FieldSummary, InputEvent, MerchantPayload};
pub use registry::{ChangeRegistry, Reaction, Subscription, SubscriptionId};
