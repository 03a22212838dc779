//! Notification payloads.
//!
//! Payloads describe the form as merchants may see it: per-field flags and
//! the candidate brands, never raw field values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::event::ExternalEvent;
use crate::cards::{CardType, SecurityCode};
use crate::core::{FieldKey, FieldState};

/// Public view of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub is_empty: bool,
    pub is_valid: bool,
    pub is_potentially_valid: bool,
    pub is_focused: bool,
}

impl From<&FieldState> for FieldSummary {
    fn from(state: &FieldState) -> Self {
        Self {
            is_empty: state.is_empty,
            is_valid: state.is_valid,
            is_potentially_valid: state.is_potentially_valid,
            is_focused: state.is_focused,
        }
    }
}

/// Public view of a candidate brand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub nice_type: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: SecurityCode,
    pub supported: bool,
}

impl From<&CardType> for CardSummary {
    fn from(card: &CardType) -> Self {
        Self {
            nice_type: card.nice_type.clone(),
            kind: card.kind.clone(),
            code: card.code.clone(),
            supported: card.supported,
        }
    }
}

/// What the merchant page receives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPayload {
    /// Candidate brands, in resolution order.
    pub cards: Vec<CardSummary>,

    /// The field the event originated from.
    pub emitted_by: FieldKey,

    /// Configured fields, in declared order.
    pub fields: IndexMap<FieldKey, FieldSummary>,
}

/// A notification published on the input-event topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEvent {
    pub merchant_payload: MerchantPayload,
    #[serde(rename = "type")]
    pub event_type: ExternalEvent,
}

impl InputEvent {
    /// The field this event was emitted by.
    #[must_use]
    pub fn emitted_by(&self) -> FieldKey {
        self.merchant_payload.emitted_by
    }

    /// Summary of one field, if it is configured.
    #[must_use]
    pub fn field(&self, key: FieldKey) -> Option<&FieldSummary> {
        self.merchant_payload.fields.get(&key)
    }

    /// Candidate brand keys, in order.
    pub fn card_kinds(&self) -> impl Iterator<Item = &str> {
        self.merchant_payload.cards.iter().map(|c| c.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InputEvent {
        let mut fields = IndexMap::new();
        fields.insert(FieldKey::Number, FieldSummary::from(&FieldState::default()));
        fields.insert(FieldKey::Cvv, FieldSummary::from(&FieldState::prefilled("123")));

        InputEvent {
            merchant_payload: MerchantPayload {
                cards: vec![CardSummary::from(
                    &CardType::new("visa", "Visa").with_code("CVV", 3),
                )],
                emitted_by: FieldKey::Number,
                fields,
            },
            event_type: ExternalEvent::CardTypeChange,
        }
    }

    #[test]
    fn test_payload_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["type"], "cardTypeChange");
        assert_eq!(json["merchantPayload"]["emittedBy"], "number");
        assert_eq!(json["merchantPayload"]["cards"][0]["type"], "visa");
        assert_eq!(json["merchantPayload"]["cards"][0]["niceType"], "Visa");
        assert_eq!(json["merchantPayload"]["cards"][0]["code"]["size"], 3);
        assert_eq!(json["merchantPayload"]["cards"][0]["supported"], true);
        assert_eq!(json["merchantPayload"]["fields"]["cvv"]["isValid"], true);
        assert_eq!(json["merchantPayload"]["fields"]["number"]["isEmpty"], true);
    }

    #[test]
    fn test_payload_carries_no_values() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("\"value\""));
        assert!(!json.contains("123"));
    }

    #[test]
    fn test_fields_keep_declared_order() {
        let event = sample();
        let keys: Vec<_> = event.merchant_payload.fields.keys().copied().collect();
        assert_eq!(keys, [FieldKey::Number, FieldKey::Cvv]);
        assert_eq!(event.card_kinds().collect::<Vec<_>>(), ["visa"]);
        assert_eq!(event.emitted_by(), FieldKey::Number);
        assert!(event.field(FieldKey::PostalCode).is_none());
    }
}
