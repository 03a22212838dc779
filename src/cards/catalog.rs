//! Card brand catalog and prefix lookup.
//!
//! The `CardCatalog` stores brand definitions in priority order and resolves
//! a (possibly partial) card number to the brands it could belong to.
//!
//! ## Matching
//!
//! Each brand has a list of [`Pattern`]s. Only the first pattern that matches
//! counts. When the input is at least as long as that pattern the match has a
//! *strength* equal to the pattern width. If every candidate has a strength,
//! the strongest one wins outright (first one on ties); otherwise every
//! candidate is returned, in catalog order.

use super::card_type::CardType;

/// A number prefix rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// A literal leading-digit sequence, e.g. `6011`.
    Prefix(u32),
    /// An inclusive range of leading-digit sequences of equal width,
    /// e.g. `51..=55`.
    Range(u32, u32),
}

impl Pattern {
    /// Number of digits the pattern covers.
    #[must_use]
    pub fn width(self) -> usize {
        match self {
            Pattern::Prefix(p) | Pattern::Range(p, _) => digit_count(p),
        }
    }

    /// Does `number` agree with this pattern on their common prefix?
    #[must_use]
    pub fn matches(self, number: &str) -> bool {
        match self {
            Pattern::Prefix(prefix) => {
                let prefix = prefix.to_string();
                prefix.starts_with(number) || number.starts_with(&prefix)
            }
            Pattern::Range(min, max) => {
                let width = digit_count(min).min(number.len());
                let (Some(head), Some(min), Some(max)) = (
                    number.get(..width).and_then(|s| s.parse::<u32>().ok()),
                    truncate(min, width),
                    truncate(max, width),
                ) else {
                    return false;
                };
                (min..=max).contains(&head)
            }
        }
    }
}

fn digit_count(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

fn truncate(n: u32, width: usize) -> Option<u32> {
    n.to_string().get(..width)?.parse().ok()
}

/// A catalog entry: descriptor plus prefix patterns.
#[derive(Clone, Debug)]
pub struct CardBrand {
    pub card_type: CardType,
    pub patterns: Vec<Pattern>,
}

impl CardBrand {
    /// Create a brand entry.
    pub fn new(card_type: CardType, patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self {
            card_type,
            patterns: patterns.into_iter().collect(),
        }
    }

    /// The first pattern matching `number` and its strength, if any.
    fn match_strength(&self, number: &str) -> Option<Option<usize>> {
        let pattern = self.patterns.iter().find(|p| p.matches(number))?;
        let width = pattern.width();
        Some((number.len() >= width).then_some(width))
    }
}

/// Ordered registry of card brands.
///
/// ## Example
///
/// ```
/// use card_fields::cards::CardCatalog;
///
/// let catalog = CardCatalog::standard();
///
/// let types: Vec<_> = catalog.lookup("60").into_iter().map(|t| t.kind).collect();
/// assert_eq!(types, ["discover", "maestro"]);
///
/// let types: Vec<_> = catalog.lookup("6011").into_iter().map(|t| t.kind).collect();
/// assert_eq!(types, ["discover"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    brands: Vec<CardBrand>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard brand catalog.
    ///
    /// Order: visa, mastercard, american-express, diners-club, discover, jcb,
    /// unionpay, maestro, mir.
    #[must_use]
    pub fn standard() -> Self {
        use Pattern::{Prefix, Range};

        let mut catalog = Self::new();

        catalog.register(CardBrand::new(
            CardType::new("visa", "Visa")
                .with_gaps([4, 8, 12])
                .with_lengths([16, 18, 19])
                .with_code("CVV", 3),
            [Prefix(4)],
        ));
        catalog.register(CardBrand::new(
            CardType::new("mastercard", "Mastercard")
                .with_gaps([4, 8, 12])
                .with_lengths([16])
                .with_code("CVC", 3),
            [
                Range(51, 55),
                Range(2221, 2229),
                Range(223, 229),
                Range(23, 26),
                Range(270, 271),
                Prefix(2720),
            ],
        ));
        catalog.register(CardBrand::new(
            CardType::new("american-express", "American Express")
                .with_gaps([4, 10])
                .with_lengths([15])
                .with_code("CID", 4),
            [Prefix(34), Prefix(37)],
        ));
        catalog.register(CardBrand::new(
            CardType::new("diners-club", "Diners Club")
                .with_gaps([4, 10])
                .with_lengths([14, 16, 19])
                .with_code("CVV", 3),
            [Range(300, 305), Prefix(36), Prefix(38), Prefix(39)],
        ));
        catalog.register(CardBrand::new(
            CardType::new("discover", "Discover")
                .with_gaps([4, 8, 12])
                .with_lengths([16, 19])
                .with_code("CID", 3),
            [Prefix(6011), Range(644, 649), Prefix(65)],
        ));
        catalog.register(CardBrand::new(
            CardType::new("jcb", "JCB")
                .with_gaps([4, 8, 12])
                .with_lengths([16, 17, 18, 19])
                .with_code("CVV", 3),
            [Prefix(2131), Prefix(1800), Range(3528, 3589)],
        ));
        catalog.register(CardBrand::new(
            CardType::new("unionpay", "UnionPay")
                .with_gaps([4, 8, 12])
                .with_lengths([14, 15, 16, 17, 18, 19])
                .with_code("CVN", 3),
            [
                Prefix(620),
                Range(624, 626),
                Range(62100, 62182),
                Range(62184, 62187),
                Range(62185, 62197),
                Range(62200, 62205),
                Range(622010, 622999),
                Prefix(622018),
                Range(62207, 62209),
                Range(623, 626),
                Prefix(6270),
                Prefix(6272),
                Prefix(6276),
                Range(627700, 627779),
                Range(627781, 627799),
                Prefix(6282),
                Prefix(6291),
                Prefix(6292),
                Prefix(810),
                Range(8110, 8131),
                Range(8132, 8151),
                Range(8152, 8163),
                Range(8164, 8171),
            ],
        ));
        catalog.register(CardBrand::new(
            CardType::new("maestro", "Maestro")
                .with_gaps([4, 8, 12])
                .with_lengths([12, 13, 14, 15, 16, 17, 18, 19])
                .with_code("CVC", 3),
            [
                Prefix(493698),
                Range(500000, 504174),
                Range(504176, 506698),
                Range(506779, 508999),
                Range(56, 59),
                Prefix(63),
                Prefix(67),
                Prefix(6),
            ],
        ));
        catalog.register(CardBrand::new(
            CardType::new("mir", "Mir")
                .with_gaps([4, 8, 12])
                .with_lengths([16, 17, 18, 19])
                .with_code("CVP2", 3),
            [Range(2200, 2204)],
        ));

        catalog
    }

    /// Append a brand. Later brands have lower priority.
    pub fn register(&mut self, brand: CardBrand) {
        self.brands.push(brand);
    }

    /// Number of brands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Iterate brands in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &CardBrand> {
        self.brands.iter()
    }

    /// Resolve a number prefix to its candidate brands.
    ///
    /// An empty prefix returns every brand. The returned descriptors are
    /// clones with `supported` left as registered.
    #[must_use]
    pub fn lookup(&self, number: &str) -> Vec<CardType> {
        if number.is_empty() {
            return self.iter().map(|b| b.card_type.clone()).collect();
        }

        let candidates: Vec<(Option<usize>, &CardBrand)> = self
            .iter()
            .filter_map(|brand| brand.match_strength(number).map(|s| (s, brand)))
            .collect();

        if !candidates.is_empty() && candidates.iter().all(|(strength, _)| strength.is_some()) {
            let mut best = &candidates[0];
            for candidate in &candidates[1..] {
                if candidate.0 > best.0 {
                    best = candidate;
                }
            }
            return vec![best.1.card_type.clone()];
        }

        candidates
            .into_iter()
            .map(|(_, brand)| brand.card_type.clone())
            .collect()
    }
}
