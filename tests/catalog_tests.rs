//! Card type resolution integration tests.

use card_fields::cards::{normalize_card_type, CardBrand, CardCatalog, CardType, Pattern, SupportedCardTypes};
use card_fields::core::{FieldKey, FieldOptions, FormConfig};
use card_fields::events::RecordingNotifier;
use card_fields::form::CreditCardForm;
use card_fields::validation::StandardValidator;

fn kinds(types: &[CardType]) -> Vec<&str> {
    types.iter().map(|t| t.kind.as_str()).collect()
}

// =============================================================================
// Standard Catalog
// =============================================================================

#[test]
fn test_standard_catalog_order() {
    let catalog = CardCatalog::standard();
    let order: Vec<&str> = catalog.iter().map(|b| b.card_type.kind.as_str()).collect();

    assert_eq!(
        order,
        [
            "visa",
            "mastercard",
            "american-express",
            "diners-club",
            "discover",
            "jcb",
            "unionpay",
            "maestro",
            "mir",
        ]
    );
}

#[test]
fn test_descriptor_metadata() {
    let catalog = CardCatalog::standard();

    let amex = &catalog.lookup("34")[0];
    assert_eq!(amex.nice_type, "American Express");
    assert_eq!(amex.code.name, "CID");
    assert_eq!(amex.code.size, 4);
    assert_eq!(amex.gaps.as_slice(), [4, 10]);
    assert_eq!(amex.lengths.as_slice(), [15]);
    assert!(amex.supported);
}

#[test]
fn test_narrowing_as_digits_arrive() {
    let catalog = CardCatalog::standard();

    assert_eq!(kinds(&catalog.lookup("2")), ["mastercard", "jcb", "mir"]);
    assert_eq!(kinds(&catalog.lookup("22")), ["mastercard", "mir"]);
    assert_eq!(kinds(&catalog.lookup("2200")), ["mir"]);
    assert_eq!(kinds(&catalog.lookup("2221")), ["mastercard"]);
}

#[test]
fn test_descriptor_wire_shape() {
    let visa = CardCatalog::standard().lookup("4111")[0].clone();
    let json = serde_json::to_value(&visa).unwrap();

    assert_eq!(json["type"], "visa");
    assert_eq!(json["niceType"], "Visa");
    assert_eq!(json["code"]["name"], "CVV");
    assert_eq!(json["lengths"], serde_json::json!([16, 18, 19]));
}

// =============================================================================
// Custom Catalogs
// =============================================================================

#[test]
fn test_host_registered_brand_participates() {
    let mut catalog = CardCatalog::standard();
    catalog.register(CardBrand::new(
        CardType::new("elo", "Elo")
            .with_gaps([4, 8, 12])
            .with_lengths([16])
            .with_code("CVE", 3),
        [Pattern::Prefix(636368), Pattern::Prefix(509066)],
    ));

    assert_eq!(kinds(&catalog.lookup("6363680000000000")), ["elo"]);

    let mut form = CreditCardForm::with_services(
        FormConfig::new()
            .with_field(FieldKey::Number, FieldOptions::new())
            .with_field(FieldKey::Cvv, FieldOptions::new()),
        RecordingNotifier::new(),
        catalog.clone(),
        StandardValidator::new(catalog),
    );

    form.set("number.value", "636368").unwrap();
    assert_eq!(form.possible_card_types()[0].kind, "elo");
    assert_eq!(form.possible_card_types()[0].code.name, "CVE");
}

// =============================================================================
// Supported Lists
// =============================================================================

#[test]
fn test_normalization() {
    assert_eq!(normalize_card_type("Master-Card"), "mastercard");
    assert_eq!(normalize_card_type("american-express"), "americanexpress");
    assert_eq!(normalize_card_type("Diners Club"), "dinersclub");
    assert_eq!(normalize_card_type("VISA"), "visa");
}

#[test]
fn test_supported_list_matches_catalog_keys() {
    let supported = SupportedCardTypes::new(["American Express", "Diners-Club", "Bogus"]);

    assert!(supported.contains("american-express"));
    assert!(supported.contains("diners-club"));
    assert!(!supported.contains("visa"));
    assert_eq!(supported.len(), 3);
}

#[test]
fn test_unknown_supported_names_never_match() {
    let config = FormConfig::new()
        .with_field(FieldKey::Number, FieldOptions::new())
        .with_supported_card_types(["NotACard"]);
    let form = CreditCardForm::new(config, RecordingNotifier::new());

    assert!(form.possible_card_types().iter().all(|t| !t.supported));
}
