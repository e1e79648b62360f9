//! Crossfade length estimation from an alias's phonetic shape.
//!
//! An alias is flattened into phones: fused tokens such as `kae` are
//! segmented by longest match, `-`/`R` tokens and `-` connectors become
//! rest marks. Categories are checked in a fixed priority and the first
//! match scales the base transition length.

use crate::alias::{AliasToken, Lead, ParsedAlias};
use crate::config::ResolverConfig;
use crate::phonetics::{Inventory, PhoneClass, LIQUIDS, PLOSIVES};
use std::time::Duration;

/// Transition categories in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionCategory {
    /// Long fricative or affricate cluster after the start
    LongConsonant,
    /// Tap or flap anywhere
    Tap,
    /// Affricate after the start
    Affricate,
    /// Extended vowel into a connecting glide
    GlideLink,
    /// Core vowel into `r`
    RhoticCoreVowel,
    /// Extended vowel into a plosive
    PlosiveLink,
    /// Semilong consonant mid-alias
    Semilong,
    /// Semivowel mid-alias
    SemivowelMedial,
    /// Semivowel closing the alias without a linking vowel
    SemivowelFinal,
    /// Plosive mid-alias
    Plosive,
    /// Liquid mid-alias
    Liquid,
    /// Alias released into a rest
    RestRelease,
    /// Anything else
    Plain,
}

impl TransitionCategory {
    /// Multiplier applied to the base transition length
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::LongConsonant => 2.5,
            Self::Tap => 0.5,
            Self::Affricate => 1.5,
            Self::GlideLink => 2.3,
            Self::RhoticCoreVowel | Self::PlosiveLink => 2.0,
            Self::Semilong | Self::SemivowelMedial => 1.5,
            Self::SemivowelFinal => 0.7,
            Self::Plosive => 1.3,
            Self::Liquid => 1.7,
            Self::RestRelease => 0.5,
            Self::Plain => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Phone<'a> {
    symbol: &'a str,
    token: usize,
    glide_linked: bool,
    rest: bool,
}

/// Flattened phone sequence of one alias
#[derive(Debug)]
struct Shape<'a> {
    phones: Vec<Phone<'a>>,
}

impl<'a> Shape<'a> {
    fn of(tokens: &'a [AliasToken], inventory: &Inventory) -> Self {
        let mut phones = Vec::new();
        let rest = |token| Phone {
            symbol: "-",
            token,
            glide_linked: false,
            rest: true,
        };

        for (index, token) in tokens.iter().enumerate() {
            if token.lead == Some(Lead::Hyphen) {
                phones.push(rest(index));
            }
            if token.is_rest() || token.is_rest_r() {
                phones.push(rest(index));
                continue;
            }
            for (k, symbol) in inventory.segment(&token.body).into_iter().enumerate() {
                phones.push(Phone {
                    symbol,
                    token: index,
                    glide_linked: k == 0 && token.lead == Some(Lead::Underscore),
                    rest: false,
                });
            }
            if token.trailing_rest {
                phones.push(rest(index));
            }
        }
        Self { phones }
    }

    fn followed_by_rest(&self, i: usize) -> bool {
        self.phones.get(i + 1).is_some_and(|p| p.rest)
    }

    /// Phone `i` ends its token and phone `i + 1` starts the next one
    fn crosses_space(&self, i: usize) -> bool {
        match (self.phones.get(i), self.phones.get(i + 1)) {
            (Some(a), Some(b)) => !a.rest && !b.rest && a.token != b.token,
            _ => false,
        }
    }

    fn any(&self, pred: impl Fn(usize, &Phone<'a>) -> bool) -> bool {
        self.phones.iter().enumerate().any(|(i, p)| !p.rest && pred(i, p))
    }

    fn contains(&self, symbol: &str) -> bool {
        self.any(|_, p| p.symbol == symbol)
    }
}

/// Maps an alias to its crossfade length
#[derive(Debug, Clone, Copy)]
pub struct DurationEstimator<'i> {
    inventory: &'i Inventory,
    base_ms: f64,
}

impl DurationEstimator<'static> {
    /// Estimator over the English inventory with the configured base length
    #[must_use]
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            inventory: Inventory::english(),
            base_ms: config.base_transition_ms,
        }
    }
}

impl DurationEstimator<'_> {
    /// Category an alias falls into
    #[must_use]
    pub fn classify(&self, alias: &str) -> TransitionCategory {
        let parsed = ParsedAlias::parse(alias);
        let shape = Shape::of(parsed.tokens(), self.inventory);
        let inv = self.inventory;
        let phones = &shape.phones;
        let has = |symbol: &str, class| inv.has_class(symbol, class);
        let is_extended_vowel = |s: &str| inv.is_vowel(s) && !inv.is_core_vowel(s);
        let nasal_rest = (0..phones.len()).any(|i| phones[i].symbol == "ng" && shape.followed_by_rest(i));
        let glottal_after_rest = phones.windows(2).any(|w| w[0].rest && w[1].symbol == "q");
        let has_tap_dx = shape.contains("dx");
        let has_rest = phones.iter().any(|p| p.rest);

        if !nasal_rest && shape.any(|i, p| i > 0 && has(p.symbol, PhoneClass::LongConsonant)) {
            return TransitionCategory::LongConsonant;
        }
        if shape.any(|_, p| has(p.symbol, PhoneClass::Tap)) {
            return TransitionCategory::Tap;
        }
        if shape.any(|i, p| i > 0 && has(p.symbol, PhoneClass::Affricate)) {
            return TransitionCategory::Affricate;
        }
        if shape.any(|i, p| {
            is_extended_vowel(p.symbol)
                && shape.crosses_space(i)
                && has(phones[i + 1].symbol, PhoneClass::ConnectingGlide)
                && !shape.followed_by_rest(i + 1)
        }) {
            return TransitionCategory::GlideLink;
        }
        if shape.any(|i, p| {
            inv.is_core_vowel(p.symbol) && shape.crosses_space(i) && phones[i + 1].symbol == "r"
        }) {
            return TransitionCategory::RhoticCoreVowel;
        }
        if !has_rest
            && !has_tap_dx
            && shape.any(|i, p| {
                is_extended_vowel(p.symbol)
                    && shape.crosses_space(i)
                    && PLOSIVES.contains(&phones[i + 1].symbol)
            })
        {
            return TransitionCategory::PlosiveLink;
        }
        if !glottal_after_rest
            && shape.any(|i, p| {
                i > 0 && has(p.symbol, PhoneClass::Semilong) && !shape.followed_by_rest(i)
            })
        {
            return TransitionCategory::Semilong;
        }
        let last = phones.len().saturating_sub(1);
        if shape.any(|i, p| {
            i > 0 && i < last && has(p.symbol, PhoneClass::Semivowel) && !shape.followed_by_rest(i)
        }) {
            return TransitionCategory::SemivowelMedial;
        }
        if let Some(final_phone) = phones.last() {
            let linked_by_vowel = last > 0
                && shape.crosses_space(last - 1)
                && inv.is_vowel(phones[last - 1].symbol);
            if !final_phone.rest
                && has(final_phone.symbol, PhoneClass::Semivowel)
                && !linked_by_vowel
                && !final_phone.glide_linked
            {
                return TransitionCategory::SemivowelFinal;
            }
        }
        if !has_tap_dx {
            let medial = |set: &[&str]| {
                shape.any(|i, p| i > 0 && set.contains(&p.symbol) && !shape.followed_by_rest(i))
            };
            if medial(PLOSIVES) {
                return TransitionCategory::Plosive;
            }
            if medial(LIQUIDS) {
                return TransitionCategory::Liquid;
            }
        }
        if phones.windows(2).any(|w| !w[0].rest && w[1].rest) {
            return TransitionCategory::RestRelease;
        }
        TransitionCategory::Plain
    }

    /// Crossfade length in milliseconds
    #[must_use]
    pub fn transition_length_ms(&self, alias: &str) -> f64 {
        self.base_ms * self.classify(alias).multiplier()
    }

    /// Crossfade length
    #[must_use]
    pub fn transition_length(&self, alias: &str) -> Duration {
        Duration::from_secs_f64(self.transition_length_ms(alias) / 1000.0)
    }
}
