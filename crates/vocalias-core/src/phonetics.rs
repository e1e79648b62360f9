//! Phone inventory for the English + Japanese alias profile.
//!
//! Every symbol the resolver reasons about is declared here once: the vowel
//! allophones (including rhotic, lateral and nasal colourings), the
//! consonants, and the articulation classes the duration estimator keys on.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Vowel or consonant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneKind {
    /// Syllable nucleus
    Vowel,
    /// Onset or coda consonant
    Consonant,
}

/// Articulation classes a phone can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneClass {
    /// ch, jh, j
    Affricate,
    /// Flaps: dx, nx, lx
    Tap,
    /// Nasals and voiced continuants held slightly longer
    Semilong,
    /// y, w
    Semivowel,
    /// Liquids linking a vowel into the next sample
    ConnectingGlide,
    /// Fricatives and affricate clusters held longest
    LongConsonant,
    /// Plosives and liquids
    NormalConsonant,
}

impl PhoneClass {
    const fn bit(self) -> u8 {
        match self {
            Self::Affricate => 1,
            Self::Tap => 1 << 1,
            Self::Semilong => 1 << 2,
            Self::Semivowel => 1 << 3,
            Self::ConnectingGlide => 1 << 4,
            Self::LongConsonant => 1 << 5,
            Self::NormalConsonant => 1 << 6,
        }
    }
}

/// Compact set of [`PhoneClass`] tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClassSet(u8);

impl ClassSet {
    /// Check whether the set holds `class`
    #[must_use]
    pub const fn contains(self, class: PhoneClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Check whether no class is set
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    const fn with(self, class: PhoneClass) -> Self {
        Self(self.0 | class.bit())
    }
}

/// An atomic phoneme symbol with its kind and class tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhoneticUnit {
    /// The symbol as spelled in aliases
    pub symbol: &'static str,
    /// Vowel or consonant
    pub kind: PhoneKind,
    /// Articulation classes
    pub classes: ClassSet,
}

impl PhoneticUnit {
    /// Check whether this unit is a vowel
    #[must_use]
    pub fn is_vowel(&self) -> bool {
        self.kind == PhoneKind::Vowel
    }

    /// Check whether this unit carries `class`
    #[must_use]
    pub const fn has_class(&self, class: PhoneClass) -> bool {
        self.classes.contains(class)
    }
}

const VOWELS: &[&str] = &[
    "aa", "ax", "ae", "ah", "ao", "aw", "ay", "eh", "er", "ey", "ih", "iy", "ow", "oy", "uh", "uw",
    "a", "e", "i", "o", "u", "ai", "ei", "oi", "au", "ou", "ix", "ux",
    "aar", "ar", "axr", "aer", "ahr", "aor", "or", "awr", "aur", "ayr", "air", "ehr", "eyr", "eir",
    "ihr", "iyr", "ir", "owr", "our", "oyr", "oir", "uhr", "uwr", "ur",
    "aal", "al", "axl", "ael", "ahl", "aol", "ol", "awl", "aul", "ayl", "ail", "ehl", "el", "eyl",
    "eil", "ihl", "iyl", "il", "owl", "oul", "oyl", "oil", "uhl", "uwl", "ul",
    "aan", "an", "axn", "aen", "ahn", "aon", "on", "awn", "aun", "ayn", "ain", "ehn", "en", "eyn",
    "ein", "ihn", "iyn", "in", "own", "oun", "oyn", "oin", "uhn", "uwn", "un",
    "aang", "ang", "axng", "aeng", "ahng", "aong", "ong", "awng", "aung", "ayng", "aing", "ehng",
    "eng", "eyng", "eing", "ihng", "iyng", "ing", "owng", "oung", "oyng", "oing", "uhng", "uwng",
    "ung",
    "aam", "am", "axm", "aem", "ahm", "aom", "om", "awm", "aum", "aym", "aim", "ehm", "em", "eym",
    "eim", "ihm", "iym", "im", "owm", "oum", "oym", "oim", "uhm", "uwm", "um", "oh",
    "eu", "oe", "yw", "yx", "wx", "ox", "ex", "ea", "ia", "oa", "ua", "ean", "eam", "eang", "nn",
    "mm", "ll",
];

const CONSONANTS: &[&str] = &[
    "b", "ch", "d", "dh", "dr", "dx", "f", "g", "hh", "jh", "k", "l", "m", "n", "nx", "ng", "p",
    "q", "r", "s", "sh", "t", "th", "tr", "v", "w", "y", "z", "zh", "N",
];

/// Vowels shared by both inventories; everything else is an extended vowel
const CORE_VOWELS: &[&str] = &["a", "e", "i", "o", "u"];

const AFFRICATES: &[&str] = &["ch", "jh", "j"];
const TAPS: &[&str] = &["dx", "nx", "lx"];
const SEMILONG: &[&str] = &["ng", "n", "m", "v", "z", "q", "hh", "N", "ん"];
const SEMIVOWELS: &[&str] = &["y", "w"];
const CONNECTING_GLIDES: &[&str] = &["l", "r", "ll"];
const LONG_CONSONANTS: &[&str] = &["f", "s", "sh", "th", "zh", "dr", "tr", "ts", "c", "vf"];
const NORMAL_CONSONANTS: &[&str] = &["b", "d", "dh", "g", "k", "p", "t", "l", "r"];

/// Plosives among the normal consonants
pub const PLOSIVES: &[&str] = &["b", "d", "g", "k", "p", "t"];

/// Liquids among the normal consonants
pub const LIQUIDS: &[&str] = &["l", "r"];

static ENGLISH: Lazy<Inventory> = Lazy::new(Inventory::build_english);

/// A language profile's fixed phone alphabet
#[derive(Debug)]
pub struct Inventory {
    vowels: HashSet<&'static str>,
    consonants: HashSet<&'static str>,
    classes: HashMap<&'static str, ClassSet>,
    /// Every known symbol, longest first, for greedy segmentation
    symbols_by_length: Vec<&'static str>,
}

impl Inventory {
    /// The English profile with its Japanese cross-inventory vowels
    #[must_use]
    pub fn english() -> &'static Self {
        &ENGLISH
    }

    fn build_english() -> Self {
        let mut classes: HashMap<&'static str, ClassSet> = HashMap::new();
        let tagged = [
            (AFFRICATES, PhoneClass::Affricate),
            (TAPS, PhoneClass::Tap),
            (SEMILONG, PhoneClass::Semilong),
            (SEMIVOWELS, PhoneClass::Semivowel),
            (CONNECTING_GLIDES, PhoneClass::ConnectingGlide),
            (LONG_CONSONANTS, PhoneClass::LongConsonant),
            (NORMAL_CONSONANTS, PhoneClass::NormalConsonant),
        ];
        for (symbols, class) in tagged {
            for symbol in symbols {
                let entry = classes.entry(symbol).or_default();
                *entry = entry.with(class);
            }
        }

        let mut symbols: Vec<&'static str> = VOWELS
            .iter()
            .chain(CONSONANTS)
            .copied()
            .chain(classes.keys().copied())
            .collect();
        symbols.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        symbols.dedup();

        Self {
            vowels: VOWELS.iter().copied().collect(),
            consonants: CONSONANTS.iter().copied().collect(),
            classes,
            symbols_by_length: symbols,
        }
    }

    /// All declared vowels in declaration order
    #[must_use]
    pub fn vowels(&self) -> &'static [&'static str] {
        VOWELS
    }

    /// All declared consonants in declaration order
    #[must_use]
    pub fn consonants(&self) -> &'static [&'static str] {
        CONSONANTS
    }

    /// Check whether `symbol` is a declared vowel
    #[must_use]
    pub fn is_vowel(&self, symbol: &str) -> bool {
        self.vowels.contains(symbol)
    }

    /// Check whether `symbol` is a declared consonant
    #[must_use]
    pub fn is_consonant(&self, symbol: &str) -> bool {
        self.consonants.contains(symbol)
    }

    /// Check whether `symbol` is one of the five shared core vowels
    #[must_use]
    pub fn is_core_vowel(&self, symbol: &str) -> bool {
        CORE_VOWELS.contains(&symbol)
    }

    /// Class tags of `symbol` (empty for untagged symbols)
    #[must_use]
    pub fn classes(&self, symbol: &str) -> ClassSet {
        self.classes.get(symbol).copied().unwrap_or_default()
    }

    /// Check whether `symbol` carries `class`
    #[must_use]
    pub fn has_class(&self, symbol: &str, class: PhoneClass) -> bool {
        self.classes(symbol).contains(class)
    }

    /// Look up the unit for a declared vowel or consonant
    #[must_use]
    pub fn unit(&self, symbol: &str) -> Option<PhoneticUnit> {
        let (symbol, kind) = if let Some(v) = self.vowels.get(symbol) {
            (*v, PhoneKind::Vowel)
        } else if let Some(c) = self.consonants.get(symbol) {
            (*c, PhoneKind::Consonant)
        } else {
            return None;
        };
        Some(PhoneticUnit {
            symbol,
            kind,
            classes: self.classes(symbol),
        })
    }

    /// Split fused text such as `kae` into known symbols by greedy longest
    /// match. Characters no symbol covers come back as single-char pieces.
    #[must_use]
    pub fn segment<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut pieces = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let matched = self
                .symbols_by_length
                .iter()
                .find(|symbol| rest.starts_with(**symbol))
                .map(|symbol| symbol.len());
            let len = matched.unwrap_or_else(|| rest.chars().next().map_or(1, char::len_utf8));
            let (piece, tail) = rest.split_at(len);
            pieces.push(piece);
            rest = tail;
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_kinds() {
        let inv = Inventory::english();
        assert!(inv.is_vowel("aa"));
        assert!(inv.is_vowel("ayr"));
        assert!(inv.is_consonant("k"));
        assert!(!inv.is_consonant("ah"));
        assert!(!inv.is_vowel("k"));
    }

    #[test]
    fn test_unit_lookup() {
        let inv = Inventory::english();
        let unit = inv.unit("ch").expect("ch is declared");
        assert_eq!(unit.kind, PhoneKind::Consonant);
        assert!(unit.has_class(PhoneClass::Affricate));
        assert!(!unit.has_class(PhoneClass::Tap));
        assert!(inv.unit("ts").is_none());
    }

    #[test]
    fn test_multi_class_symbols() {
        let inv = Inventory::english();
        assert!(inv.has_class("l", PhoneClass::ConnectingGlide));
        assert!(inv.has_class("l", PhoneClass::NormalConsonant));
        assert!(inv.has_class("ts", PhoneClass::LongConsonant));
        assert!(inv.classes("ah").is_empty());
    }

    #[test]
    fn test_segment_prefers_longest() {
        let inv = Inventory::english();
        assert_eq!(inv.segment("kae"), vec!["k", "ae"]);
        assert_eq!(inv.segment("shiy"), vec!["sh", "iy"]);
        assert_eq!(inv.segment("kあ"), vec!["k", "あ"]);
    }

    #[test]
    fn test_core_vowels() {
        let inv = Inventory::english();
        assert!(inv.is_core_vowel("a"));
        assert!(!inv.is_core_vowel("aa"));
    }
}
