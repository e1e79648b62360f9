//! Static rewrite tables shared by the resolver and the alias normalizer.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Substitutions for voice banks missing extended vowels
pub const MISSING_VOWELS: &[(&str, &str)] = &[
    ("aa", "ah"),
    ("ae", "ah"),
    ("iy", "ih"),
    ("uh", "uw"),
    ("ix", "ih"),
    ("ux", "uh"),
    ("oh", "ao"),
    ("eu", "uh"),
    ("oe", "ax"),
    ("uy", "uw"),
    ("yw", "uw"),
    ("yx", "iy"),
    ("wx", "uw"),
    ("ea", "eh"),
    ("ia", "iy"),
    ("oa", "ao"),
    ("ua", "uw"),
    ("R", "-"),
    ("N", "n"),
    ("mm", "m"),
    ("ll", "l"),
];

/// Substitutions for voice banks missing custom consonants
pub const MISSING_CONSONANTS: &[(&str, &str)] = &[
    ("nx", "n"),
    ("tx", "t"),
    ("dx", "d"),
    ("ty", "t"),
    ("ky", "k"),
    ("ry", "r"),
    ("ly", "l"),
    ("ng", "n"),
    ("cl", "q"),
    ("vf", "q"),
    ("dd", "d"),
    ("lx", "l"),
    ("ts", "t"),
    ("th", "s"),
    ("v", "f"),
    ("j", "jh"),
    ("dh", "d"),
];

/// TIMIT closure and variant symbols mapped to plain ARPABET
pub const TIMIT_SYMBOLS: &[(&str, &str)] = &[
    ("axh", "ax"),
    ("bcl", "b"),
    ("dcl", "d"),
    ("eng", "ng"),
    ("gcl", "g"),
    ("hv", "hh"),
    ("kcl", "k"),
    ("pcl", "p"),
    ("tcl", "t"),
];

/// Consonant-vowel pairs respelled into the kana inventory before any probe
static ALT_CV: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("dxa", "ra"),
        ("dxax", "ra"),
        ("dxi", "ri"),
        ("dxu", "ru"),
        ("dxe", "re"),
        ("dxo", "ro"),
        ("ta", "tsa"),
        ("tax", "tsa"),
        ("ti", "tsi"),
        ("tu", "tsu"),
        ("te", "tse"),
        ("to", "tso"),
        ("hha", "ha"),
        ("hhi", "hi"),
        ("hhu", "fu"),
        ("hhe", "he"),
        ("hho", "ho"),
        ("tha", "tsa"),
        ("thi", "suli"),
        ("thu", "su"),
        ("the", "tse"),
        ("tho", "so"),
        ("dha", "za"),
        ("dhi", "zuli"),
        ("dhu", "du"),
        ("dhe", "ze"),
        ("dho", "zo"),
        ("si", "suli"),
        ("zi", "zuli"),
        ("di", "deli"),
        ("du", "dolu"),
        ("yi", "i"),
        ("wu", "u"),
        ("wo", "ulo"),
        ("rra", "wa"),
        ("rri", "wi"),
        ("rru", "ru"),
        ("rre", "we"),
        ("rro", "ulo"),
    ]
    .into_iter()
    .collect()
});

/// Bridging consonant implied after a vowel in hiatus
pub const HIATUS_BRIDGES: &[(&str, &str)] = &[
    ("aw", "w"),
    ("ow", "w"),
    ("uw", "w"),
    ("uh", "w"),
    ("ay", "y"),
    ("ey", "y"),
    ("iy", "y"),
    ("oy", "y"),
    ("ih", "y"),
    ("er", "r"),
    ("aar", "r"),
    ("aen", "n"),
    ("aeng", "ng"),
    ("aor", "r"),
    ("ehr", "r"),
    ("ihng", "ng"),
    ("ihr", "r"),
    ("uwr", "r"),
    ("awn", "n"),
    ("awng", "ng"),
    ("ean", "n"),
    ("eam", "m"),
    ("eang", "ng"),
    ("ar", "r"),
    ("or", "r"),
    ("air", "r"),
    ("ir", "r"),
    ("ur", "r"),
    ("al", "l"),
    ("ol", "l"),
    ("il", "l"),
    ("el", "l"),
    ("ul", "l"),
];

/// Vowel prefix used for `vowel + kana` probes of sonorant onsets
pub const VCV_EXCEPTIONS: &[(&str, &str)] = &[
    ("w", "u"),
    ("y", "i"),
    ("r", "u"),
    ("l", "u"),
    ("m", "n"),
    ("n", "n"),
    ("ng", "n"),
];

/// Digraphs never fused into a combined cluster spelling
pub const CLUSTER_EXCEPTIONS: &[&str] = &[
    "ch", "dh", "dx", "fh", "gh", "hh", "jh", "kh", "ph", "ng", "sh", "th", "vh", "wh", "zh",
];

/// Bare romaji vowels, never treated as ending consonants
pub const ROMAJI_VOWELS: &[&str] = &["a", "e", "i", "o", "u"];

/// Vowel quality fallback after a consonant (`k ey` -> `k eh`)
pub const CV_VOWEL_FALLBACKS: &[(&str, &str)] = &[
    ("oy", "ao"),
    ("ow", "ao"),
    ("aw", "ah"),
    ("ay", "ah"),
    ("eh", "ae"),
    ("ey", "eh"),
    ("uh", "uw"),
];

/// Vowel quality fallback before a consonant (`ow t` -> `u t`)
pub const VC_VOWEL_FALLBACKS: &[(&str, &str)] = &[
    ("aw", "u"),
    ("ow", "u"),
    ("uh", "u"),
    ("ay", "i"),
    ("ey", "i"),
    ("oy", "i"),
    ("ae", "h"),
    ("ao", "aa"),
    ("a", "aa"),
    ("e", "eh"),
    ("o", "ao"),
];

/// Doubled diphthong aliases collapsed into a glide transition
pub const DIPHTHONG_PAIRS: &[(&str, &str)] = &[
    ("ay ay", "y ah"),
    ("ey ey", "iy ey"),
    ("oy oy", "y ow"),
    ("er er", "er"),
    ("aw aw", "w ae"),
    ("ow ow", "w ao"),
    ("uw uw", "w uw"),
];

/// Irregular whole-alias corrections applied before anything else
pub const IRREGULAR_ALIASES: &[(&str, &str)] = &[
    ("la", "l aa"),
    ("li", "l iy"),
    ("lu", "l uw"),
    ("le", "l eh"),
    ("lo", "l ow"),
    ("h er", "hh er"),
    ("h u", "hh uw"),
    ("- h", "- hh"),
    ("ch r", "ch er"),
    ("j er", "jh er"),
    ("jh r", "jh er"),
    ("- j", "- jh"),
];

/// Core vowel quality before `r`
pub const RHOTIC_VOWELS: &[(&str, &str)] = &[
    ("a", "aa"),
    ("e", "eh"),
    ("i", "iy"),
    ("o", "ao"),
    ("u", "uh"),
];

/// Core vowel quality before `l`
pub const LATERAL_VOWELS: &[(&str, &str)] = &[
    ("a", "aa"),
    ("e", "eh"),
    ("i", "iy"),
    ("o", "ao"),
    ("u", "uw"),
];

/// Look up `key` in a small pair table
#[must_use]
pub fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Apply the cross-inventory respelling to a fused consonant-vowel string
#[must_use]
pub fn alt_cv(cv: &str) -> String {
    ALT_CV.get(cv).map_or_else(|| cv.to_string(), |alt| (*alt).to_string())
}

/// Bridging consonant for a vowel in hiatus, if it has one
#[must_use]
pub fn hiatus_bridge(vowel: &str) -> Option<&'static str> {
    lookup(HIATUS_BRIDGES, vowel)
}

/// Vowel prefix for a sonorant onset, if it has one
#[must_use]
pub fn vcv_exception(consonant: &str) -> Option<&'static str> {
    lookup(VCV_EXCEPTIONS, consonant)
}

/// Check whether `consonant` must stay out of fused cluster spellings
#[must_use]
pub fn is_cluster_exception(consonant: &str) -> bool {
    CLUSTER_EXCEPTIONS.contains(&consonant)
}

/// Check whether `symbol` is a bare romaji vowel
#[must_use]
pub fn is_romaji_vowel(symbol: &str) -> bool {
    ROMAJI_VOWELS.contains(&symbol)
}
