//! The reactive credit card form model.
//!
//! [`CreditCardForm`] owns one [`FieldState`] per configured field plus the
//! derived list of possible card types. Every write goes through
//! [`CreditCardForm::set`]: a write that changes the stored value dispatches
//! the reactions registered for its path, which may write further paths.
//! The whole chain runs before `set` returns.
//!
//! Outbound notifications are queued while the chain runs and flushed once
//! the outermost operation completes, first occurrence first, with repeats of
//! the same `(field, event)` pair dropped. Every flushed payload therefore
//! reflects the final state.

use chrono::Datelike;
use im::Vector;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use super::card_data::CardData;
use crate::cards::{CardCatalog, CardType, SupportedCardTypes};
use crate::core::{FieldAttribute, FieldKey, FieldState, FormConfig, ModelError, ModelPath, ModelValue};
use crate::events::{
    CardSummary, ChangeRegistry, ExternalEvent, FieldSummary, InputEvent, MerchantPayload,
    Notifier, Subscription, INPUT_EVENT,
};
use crate::validation::{
    strip_number_separators, CardValidator, NumberOptions, PostalCodeOptions, StandardValidator,
    Verification,
};

/// Brand key whose numbers skip the Luhn check unless asked otherwise.
const UNIONPAY: &str = "unionpay";

/// Initial state of a form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    /// One state per configured field, in declared order.
    pub fields: IndexMap<FieldKey, FieldState>,

    /// Possible card types for an empty number.
    pub possible_card_types: Vector<CardType>,
}

/// Reactive state of a hosted card form.
///
/// Only `value` and `isFocused` can be written from outside; `isEmpty`,
/// `isValid` and `isPotentiallyValid` follow the value.
///
/// Notifications from one `set` are deduplicated per field and event type.
/// When a single write flips both `isValid` and `isPotentiallyValid`, the
/// field emits one `VALIDITY_CHANGE`, not two.
///
/// ## Example
///
/// ```
/// use card_fields::core::{FieldKey, FieldOptions, FormConfig};
/// use card_fields::events::{ExternalEvent, RecordingNotifier};
/// use card_fields::form::CreditCardForm;
///
/// let config = FormConfig::new()
///     .with_field(FieldKey::Number, FieldOptions::new())
///     .with_field(FieldKey::Cvv, FieldOptions::new());
///
/// let recorder = RecordingNotifier::new();
/// let mut form = CreditCardForm::new(config, recorder.clone());
///
/// form.set("number.value", "4111111111111111").unwrap();
///
/// assert!(form.field(FieldKey::Number).unwrap().is_valid);
/// assert_eq!(form.possible_card_types()[0].kind, "visa");
/// assert_eq!(recorder.count(ExternalEvent::CardTypeChange), 1);
/// ```
pub struct CreditCardForm {
    configuration: FormConfig,

    /// Configured keys, in declared order.
    field_keys: Vec<FieldKey>,

    /// Configured fields first; unconfigured fields appear once written.
    fields: IndexMap<FieldKey, FieldState>,

    possible_card_types: Vector<CardType>,
    supported_card_types: Option<SupportedCardTypes>,

    catalog: CardCatalog,
    validator: Box<dyn CardValidator>,
    notifier: Box<dyn Notifier>,

    registry: ChangeRegistry<CreditCardForm>,

    /// Notifications waiting for the current operation to finish.
    pending: Vec<(FieldKey, ExternalEvent)>,
}

impl std::fmt::Debug for CreditCardForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCardForm")
            .field("field_keys", &self.field_keys)
            .field("fields", &self.fields)
            .field("possible_card_types", &self.possible_card_types)
            .field("supported_card_types", &self.supported_card_types)
            .field("subscriptions", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl CreditCardForm {
    /// Create a form with the standard catalog and validation rules.
    pub fn new(configuration: FormConfig, notifier: impl Notifier + 'static) -> Self {
        Self::with_services(
            configuration,
            notifier,
            CardCatalog::standard(),
            StandardValidator::default(),
        )
    }

    /// Create a form with a custom catalog and validator.
    ///
    /// `catalog` drives card type detection and is handed to the validator
    /// through [`CardValidator::bind_catalog`], so registered brands validate
    /// the same way they are detected. The validator is consulted for every
    /// field rule.
    pub fn with_services(
        configuration: FormConfig,
        notifier: impl Notifier + 'static,
        catalog: CardCatalog,
        mut validator: impl CardValidator + 'static,
    ) -> Self {
        validator.bind_catalog(&catalog);

        let field_keys = configuration.field_keys();
        for name in configuration.fields.keys() {
            if name.parse::<FieldKey>().is_err() {
                debug!(field = %name, "ignoring unknown configured field");
            }
        }

        let supported_card_types = configuration
            .supported_card_types
            .as_ref()
            .map(SupportedCardTypes::new);

        let mut form = Self {
            configuration,
            field_keys,
            fields: IndexMap::new(),
            possible_card_types: Vector::new(),
            supported_card_types,
            catalog,
            validator: Box::new(validator),
            notifier: Box::new(notifier),
            registry: ChangeRegistry::new(),
            pending: Vec::new(),
        };

        let snapshot = form.reset_attributes();
        form.fields = snapshot.fields;
        form.possible_card_types = snapshot.possible_card_types;
        form.wire();

        debug!(
            fields = ?form.field_keys,
            subscriptions = form.registry.len(),
            "credit card form ready"
        );
        form
    }

    fn wire(&mut self) {
        for key in self.field_keys.clone() {
            for attribute in FieldAttribute::ALL {
                let path = ModelPath::Attribute(key, attribute);
                self.registry.register(path, path.to_string(), move |form: &mut Self, _| {
                    form.on_attribute_change(key, attribute)
                });
            }
        }

        self.registry.register(
            ModelPath::Attribute(FieldKey::Number, FieldAttribute::Value),
            "number.value: detect card types",
            |form: &mut Self, _| form.detect_card_types(),
        );
        self.registry.register(
            ModelPath::PossibleCardTypes,
            "possibleCardTypes: revalidate cvv",
            |form: &mut Self, _| form.validate_field(FieldKey::Cvv),
        );
        self.registry.register(
            ModelPath::PossibleCardTypes,
            "possibleCardTypes: card type change",
            |form: &mut Self, _| form.queue_event(FieldKey::Number, ExternalEvent::CardTypeChange),
        );
    }

    // === Path access ===

    /// Write a value at a dotted path and run the derivation chain.
    ///
    /// Writing a value equal to the stored one does nothing.
    ///
    /// ## Errors
    ///
    /// Fails when the path does not address the model, names a whole field or
    /// a derived flag (`isEmpty`, `isValid`, `isPotentiallyValid`), or the
    /// value is of the wrong kind for the path.
    pub fn set(&mut self, path: &str, value: impl Into<ModelValue>) -> Result<(), ModelError> {
        let path: ModelPath = path.parse()?;
        self.set_path(path, value.into())
    }

    /// Write a value at a parsed path. See [`set`](Self::set).
    pub fn set_path(&mut self, path: ModelPath, value: ModelValue) -> Result<(), ModelError> {
        match (path, value) {
            (ModelPath::Attribute(key, FieldAttribute::Value), ModelValue::Text(text)) => {
                self.operation(|form| form.assign_value(key, &text));
                Ok(())
            }
            (ModelPath::Attribute(_, attribute), _) if attribute.is_derived() => {
                Err(ModelError::NotAssignable(path.to_string()))
            }
            (ModelPath::Attribute(key, attribute), ModelValue::Flag(flag)) if attribute.is_flag() => {
                self.operation(|form| form.assign_flag(key, attribute, flag));
                Ok(())
            }
            (ModelPath::PossibleCardTypes, ModelValue::CardTypes(types)) => {
                self.operation(|form| form.assign_card_types(types));
                Ok(())
            }
            (ModelPath::Field(_), _) => Err(ModelError::NotAssignable(path.to_string())),
            (ModelPath::Attribute(_, FieldAttribute::Value), _) => Err(ModelError::TypeMismatch {
                path: path.to_string(),
                expected: "text",
            }),
            (ModelPath::Attribute(..), _) => Err(ModelError::TypeMismatch {
                path: path.to_string(),
                expected: "a flag",
            }),
            (ModelPath::PossibleCardTypes, _) => Err(ModelError::TypeMismatch {
                path: path.to_string(),
                expected: "card types",
            }),
        }
    }

    /// Read the value at a dotted path.
    ///
    /// Returns `Ok(None)` for a known field that is neither configured nor
    /// written.
    ///
    /// ## Errors
    ///
    /// Fails when the path does not address the model.
    pub fn get(&self, path: &str) -> Result<Option<ModelValue>, ModelError> {
        let path: ModelPath = path.parse()?;
        Ok(self.get_path(path))
    }

    /// Read the value at a parsed path.
    #[must_use]
    pub fn get_path(&self, path: ModelPath) -> Option<ModelValue> {
        match path {
            ModelPath::Field(key) => self.fields.get(&key).cloned().map(ModelValue::Field),
            ModelPath::Attribute(key, FieldAttribute::Value) => self
                .fields
                .get(&key)
                .map(|state| ModelValue::Text(state.value.clone())),
            ModelPath::Attribute(key, attribute) => self
                .fields
                .get(&key)
                .and_then(|state| state.flag(attribute))
                .map(ModelValue::Flag),
            ModelPath::PossibleCardTypes => {
                Some(ModelValue::CardTypes(self.possible_card_types.clone()))
            }
        }
    }

    /// State of a field, if configured or written.
    #[must_use]
    pub fn field(&self, key: FieldKey) -> Option<&FieldState> {
        self.fields.get(&key)
    }

    /// The current candidate brands.
    #[must_use]
    pub fn possible_card_types(&self) -> &Vector<CardType> {
        &self.possible_card_types
    }

    // === Derived queries ===

    /// Build the initial state for every configured field.
    ///
    /// `select` month and year fields without a placeholder start on the
    /// current month (no zero padding) and year, already valid.
    #[must_use]
    pub fn reset_attributes(&self) -> FormSnapshot {
        let today = self.validator.today();

        let fields = self
            .field_keys
            .iter()
            .map(|&key| {
                let prefill = self
                    .configuration
                    .field(key)
                    .is_some_and(|options| options.select && options.placeholder.is_none());

                let state = match key {
                    FieldKey::ExpirationMonth if prefill => FieldState::prefilled(today.month().to_string()),
                    FieldKey::ExpirationYear if prefill => FieldState::prefilled(today.year().to_string()),
                    _ => FieldState::default(),
                };
                (key, state)
            })
            .collect();

        FormSnapshot {
            fields,
            possible_card_types: self.get_card_types("").into_iter().collect(),
        }
    }

    /// Return every configured field to its initial state.
    ///
    /// Unlike construction, the reset goes through the normal write path, so
    /// real transitions are notified.
    pub fn reset(&mut self) {
        let snapshot = self.reset_attributes();
        debug!("resetting form");

        self.operation(|form| {
            let configured = form.field_keys.clone();
            form.fields.retain(|key, _| configured.contains(key));

            for (key, state) in snapshot.fields {
                form.assign_value(key, &state.value);
                form.assign_flag(key, FieldAttribute::IsFocused, state.is_focused);
                form.assign_flag(key, FieldAttribute::IsValid, state.is_valid);
                form.assign_flag(key, FieldAttribute::IsPotentiallyValid, state.is_potentially_valid);
            }
            form.assign_card_types(snapshot.possible_card_types);
        });
    }

    /// Values ready for tokenization.
    #[must_use]
    pub fn get_card_data(&self) -> CardData {
        CardData::collect(&self.field_keys, |key| self.value_of(key))
    }

    /// Are all configured fields empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_keys.iter().all(|key| self.value_of(*key).is_empty())
    }

    /// Configured fields that are not valid, in declared order.
    #[must_use]
    pub fn invalid_field_keys(&self) -> Vec<FieldKey> {
        self.field_keys
            .iter()
            .copied()
            .filter(|key| !self.fields.get(key).is_some_and(|state| state.is_valid))
            .collect()
    }

    /// Replace the supported brand allow-list.
    ///
    /// Names are normalized. Possible card types and the number field are
    /// re-evaluated against the new list.
    pub fn set_supported_card_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let supported = SupportedCardTypes::new(types);
        debug!(supported = ?supported.as_slice(), "supported card types updated");
        self.supported_card_types = Some(supported);

        self.operation(|form| {
            form.detect_card_types();
            form.validate_field(FieldKey::Number);
        });
    }

    /// The active allow-list, if any.
    #[must_use]
    pub fn supported_card_types(&self) -> Option<&SupportedCardTypes> {
        self.supported_card_types.as_ref()
    }

    /// Candidate brands for a number prefix, flagged against the allow-list.
    ///
    /// Every brand counts as supported when no list (or an empty one) is
    /// active.
    #[must_use]
    pub fn get_card_types(&self, prefix: &str) -> Vec<CardType> {
        let supported = self.supported_card_types.as_ref().filter(|s| !s.is_empty());

        let mut types = self.catalog.lookup(prefix);
        for card_type in &mut types {
            card_type.supported = supported.map_or(true, |s| s.contains(&card_type.kind));
        }
        types
    }

    /// Configured keys, in declared order.
    #[must_use]
    pub fn field_keys(&self) -> &[FieldKey] {
        &self.field_keys
    }

    /// The configuration this form was built from.
    #[must_use]
    pub fn configuration(&self) -> &FormConfig {
        &self.configuration
    }

    /// Registered reactions, in wiring order.
    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription<Self>] {
        self.registry.subscriptions()
    }

    // === Notifications ===

    /// Build the notification for an event emitted by a field.
    #[must_use]
    pub fn build_input_event(&self, emitted_by: FieldKey, event_type: ExternalEvent) -> InputEvent {
        let fields = self
            .field_keys
            .iter()
            .filter_map(|key| self.fields.get(key).map(|state| (*key, FieldSummary::from(state))))
            .collect();

        InputEvent {
            merchant_payload: MerchantPayload {
                cards: self.possible_card_types.iter().map(CardSummary::from).collect(),
                emitted_by,
                fields,
            },
            event_type,
        }
    }

    /// Publish an event immediately.
    pub fn emit_event(&mut self, emitted_by: FieldKey, event_type: ExternalEvent) {
        let event = self.build_input_event(emitted_by, event_type);
        debug!(event = %event_type, emitted_by = %emitted_by, "emitting input event");
        self.notifier.notify(INPUT_EVENT, &event);
    }

    fn queue_event(&mut self, emitted_by: FieldKey, event_type: ExternalEvent) {
        let entry = (emitted_by, event_type);
        if !self.pending.contains(&entry) {
            self.pending.push(entry);
        }
    }

    fn flush(&mut self) {
        for (emitted_by, event_type) in std::mem::take(&mut self.pending) {
            self.emit_event(emitted_by, event_type);
        }
    }

    /// Run a top-level operation, then publish what it queued.
    fn operation(&mut self, op: impl FnOnce(&mut Self)) {
        op(self);
        self.flush();
    }

    // === Writes ===

    fn assign_value(&mut self, key: FieldKey, value: &str) {
        if !self.fields.entry(key).or_default().set_value(value) {
            return;
        }
        trace!(field = %key, len = value.chars().count(), "value changed");
        self.dispatch(ModelPath::Attribute(key, FieldAttribute::Value));
    }

    fn assign_flag(&mut self, key: FieldKey, attribute: FieldAttribute, flag: bool) {
        if !self.fields.entry(key).or_default().set_flag(attribute, flag) {
            return;
        }
        trace!(field = %key, %attribute, flag, "flag changed");
        self.dispatch(ModelPath::Attribute(key, attribute));
    }

    fn assign_card_types(&mut self, types: Vector<CardType>) {
        if self.possible_card_types == types {
            return;
        }
        debug!(
            types = ?types.iter().map(|t| t.kind.as_str()).collect::<Vec<_>>(),
            "possible card types changed"
        );
        self.possible_card_types = types;
        self.dispatch(ModelPath::PossibleCardTypes);
    }

    fn dispatch(&mut self, path: ModelPath) {
        let reactions = self.registry.reactions_for(path);
        trace!(%path, reactions = reactions.len(), "dispatching change");
        for reaction in reactions {
            reaction(&mut *self, path);
        }
    }

    // === Reactions ===

    fn on_attribute_change(&mut self, key: FieldKey, attribute: FieldAttribute) {
        let Some(state) = self.fields.get(&key) else {
            return;
        };

        match attribute {
            FieldAttribute::Value => {
                let is_empty = state.value.is_empty();
                self.assign_flag(key, FieldAttribute::IsEmpty, is_empty);
                self.validate_field(key);
            }
            FieldAttribute::IsFocused => {
                let event = ExternalEvent::for_focus(state.is_focused);
                self.queue_event(key, event);
            }
            FieldAttribute::IsEmpty => {
                let event = ExternalEvent::for_emptiness(state.is_empty);
                self.queue_event(key, event);
            }
            FieldAttribute::IsValid | FieldAttribute::IsPotentiallyValid => {
                self.queue_event(key, ExternalEvent::ValidityChange);
            }
        }
    }

    fn detect_card_types(&mut self) {
        let number = strip_number_separators(self.value_of(FieldKey::Number));
        let types = self.get_card_types(&number).into_iter().collect();
        self.assign_card_types(types);
    }

    // === Validation ===

    fn validate_field(&mut self, key: FieldKey) {
        if !self.field_keys.contains(&key) {
            return;
        }

        let value = self.value_of(key).to_string();
        let verification = match key {
            FieldKey::Number => self.verify_number(&value),
            FieldKey::Cvv => self.verify_cvv(&value),
            FieldKey::ExpirationDate => self.validator.expiration_date(&value),
            FieldKey::ExpirationMonth | FieldKey::ExpirationYear => {
                self.validate_split_expiration();
                return;
            }
            FieldKey::PostalCode => {
                let options = PostalCodeOptions {
                    min_length: self.minlength(FieldKey::PostalCode),
                };
                self.validator.postal_code(&value, options)
            }
        };

        self.apply_verification(key, verification);
    }

    fn apply_verification(&mut self, key: FieldKey, verification: Verification) {
        self.assign_flag(key, FieldAttribute::IsValid, verification.is_valid);
        self.assign_flag(key, FieldAttribute::IsPotentiallyValid, verification.is_potentially_valid);
    }

    fn verify_number(&self, value: &str) -> Verification {
        let digits = strip_number_separators(value);
        let candidates = self.get_card_types(&digits);
        let options = NumberOptions {
            luhn_validate_union_pay: candidates.iter().any(|c| c.kind == UNIONPAY),
        };

        let mut verification = self.validator.number(value, options);

        let allow_list_active = self.supported_card_types.as_ref().is_some_and(|s| !s.is_empty());
        if !allow_list_active || digits.is_empty() {
            return verification;
        }

        if verification.is_valid && !(candidates.len() == 1 && candidates[0].supported) {
            verification.is_valid = false;
        }
        if !candidates.is_empty() && candidates.iter().all(|c| !c.supported) {
            verification = Verification::INVALID;
        }
        verification
    }

    fn verify_cvv(&self, value: &str) -> Verification {
        let cvv_only = self.field_keys == [FieldKey::Cvv];

        let sizes: SmallVec<[usize; 4]> = match self.minlength(FieldKey::Cvv).filter(|_| cvv_only) {
            Some(min_length) => smallvec![min_length],
            None => {
                let mut sizes = SmallVec::new();
                for card_type in &self.possible_card_types {
                    if !sizes.contains(&card_type.code.size) {
                        sizes.push(card_type.code.size);
                    }
                }
                sizes
            }
        };

        self.validator.cvv(value, &sizes)
    }

    /// Month and year are judged together once each is valid on its own.
    fn validate_split_expiration(&mut self) {
        let month = self.value_of(FieldKey::ExpirationMonth).to_string();
        let year = self.value_of(FieldKey::ExpirationYear).to_string();

        let month_result = self.validator.expiration_month(&month);
        let year_result = self.validator.expiration_year(&year);

        let (month_result, year_result) = if month_result.is_valid && year_result.is_valid {
            let combined = self.validator.expiration_parts(&month, &year);
            (combined, combined)
        } else {
            (month_result, year_result)
        };

        if self.field_keys.contains(&FieldKey::ExpirationMonth) {
            self.apply_verification(FieldKey::ExpirationMonth, month_result);
        }
        if self.field_keys.contains(&FieldKey::ExpirationYear) {
            self.apply_verification(FieldKey::ExpirationYear, year_result);
        }
    }

    // === Helpers ===

    fn value_of(&self, key: FieldKey) -> &str {
        self.fields.get(&key).map_or("", |state| state.value.as_str())
    }

    fn minlength(&self, key: FieldKey) -> Option<usize> {
        self.configuration.field(key).and_then(|options| options.minlength)
    }
}
