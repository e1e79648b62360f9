//! Alias normalization.
//!
//! [`AliasNormalizer::validate`] rewrites a candidate alias toward a
//! spelling a voice is more likely to carry. Rules run over the parsed
//! token list, so a rule keyed on `w` only ever touches a token whose whole
//! body is `w`, never the `w` inside `aw`.
//!
//! Several passes substitute unconditionally, so running `validate` on its
//! own output can change it again (`k ey` becomes `k eh`, then `k ae`).
//! [`AliasNormalizer::idempotence_violations`] reports such inputs.

use crate::alias::{AliasToken, ParsedAlias};
use crate::kana;
use crate::phonetics::Inventory;
use crate::session::MissingTiers;
use crate::tables::{
    lookup, CV_VOWEL_FALLBACKS, DIPHTHONG_PAIRS, IRREGULAR_ALIASES, LATERAL_VOWELS,
    MISSING_CONSONANTS, MISSING_VOWELS, RHOTIC_VOWELS, TIMIT_SYMBOLS, VC_VOWEL_FALLBACKS,
};
use serde::Serialize;

const ROUNDED_BEFORE: &[&str] = &["aw", "ew", "ow", "uw"];
const W_GLIDE_BEFORE: &[&str] = &["aw", "ew", "iw", "ow", "uw"];
const Y_GLIDE_BEFORE: &[&str] = &["ay", "ey", "iy", "oy"];

/// An input whose normalized form changes on a second pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdempotenceViolation {
    /// Original alias
    pub input: String,
    /// Result of one pass
    pub once: String,
    /// Result of two passes
    pub twice: String,
}

/// Rewrites aliases for one voice's detected tiers
#[derive(Debug, Clone, Copy)]
pub struct AliasNormalizer<'i> {
    inventory: &'i Inventory,
    tiers: MissingTiers,
}

impl AliasNormalizer<'static> {
    /// Normalizer over the English inventory
    #[must_use]
    pub fn new(tiers: MissingTiers) -> Self {
        Self {
            inventory: Inventory::english(),
            tiers,
        }
    }
}

impl<'i> AliasNormalizer<'i> {
    /// Tiers this normalizer substitutes for
    #[must_use]
    pub const fn tiers(&self) -> MissingTiers {
        self.tiers
    }

    /// Normalize one alias
    #[must_use]
    pub fn validate(&self, alias: &str) -> String {
        if let Some(fixed) = lookup(IRREGULAR_ALIASES, alias) {
            return fixed.to_string();
        }

        let mut parsed = ParsedAlias::parse(alias);
        if self.tiers.any() {
            self.narrow_inventory(&mut parsed);
        }
        self.vowel_after_consonant(&mut parsed);
        collapse_diphthong_pairs(&mut parsed);

        if let Some(exact) = self.exact_pair(&parsed) {
            return exact;
        }

        if let Some(exact) = self.simplify_clusters(&mut parsed) {
            return exact;
        }
        self.vowel_before_consonant(&mut parsed);
        self.glottal_stops(&mut parsed);

        parsed.to_string()
    }

    /// Every `(input, once, twice)` where a second pass changes the result
    pub fn idempotence_violations<I, S>(&self, corpus: I) -> Vec<IdempotenceViolation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        corpus
            .into_iter()
            .filter_map(|input| {
                let input = input.as_ref();
                let once = self.validate(input);
                let twice = self.validate(&once);
                (once != twice).then(|| IdempotenceViolation {
                    input: input.to_string(),
                    once,
                    twice,
                })
            })
            .collect()
    }

    fn narrow_inventory(&self, parsed: &mut ParsedAlias) {
        let tiers = [
            (self.tiers.vowels, MISSING_VOWELS),
            (self.tiers.consonants, MISSING_CONSONANTS),
            (self.tiers.timit, TIMIT_SYMBOLS),
        ];
        for token in parsed.tokens_mut() {
            let substitute = tiers
                .iter()
                .filter(|(active, _)| *active)
                .find_map(|(_, table)| lookup(table, &token.body));
            if let Some(substitute) = substitute {
                token.body = substitute.to_string();
            }
        }
    }

    fn vowel_after_consonant(&self, parsed: &mut ParsedAlias) {
        for i in 0..parsed.len().saturating_sub(1) {
            let fallback = parsed.joined_pair(i).and_then(|(c, v)| {
                self.inventory
                    .is_consonant(c)
                    .then(|| lookup(CV_VOWEL_FALLBACKS, v))
                    .flatten()
            });
            if let Some(fallback) = fallback {
                parsed.tokens_mut()[i + 1].body = fallback.to_string();
            }
        }
    }

    /// Exact two-token corrections that end normalization
    fn exact_pair(&self, parsed: &ParsedAlias) -> Option<String> {
        let [left, right] = parsed.tokens() else {
            return None;
        };
        if !left.is_plain() || !right.is_plain() {
            return None;
        }
        let (l, r) = (left.body.as_str(), right.body.as_str());

        let rewritten = match (l, r) {
            (v, "r") if self.inventory.is_core_vowel(v) => {
                format!("{} r", lookup(RHOTIC_VOWELS, v)?)
            }
            (v, "l") if self.inventory.is_core_vowel(v) => {
                format!("{} l", lookup(LATERAL_VOWELS, v)?)
            }
            (v, "dx") if self.inventory.is_core_vowel(v) => format!("{v} r"),
            ("n", v) if self.inventory.is_core_vowel(v) => format!("n {}", kana::to_hiragana(v)),
            ("-" | "q", v) if self.inventory.is_core_vowel(v) => {
                format!("- {}", kana::to_hiragana(v))
            }
            _ => return None,
        };
        Some(rewritten)
    }

    /// Nasal and glide cluster rules. Returns early for the exact
    /// `w -` and `y -` aliases.
    fn simplify_clusters(&self, parsed: &mut ParsedAlias) -> Option<String> {
        let inv = self.inventory;

        rewrite_pairs(parsed, |_, l, r| {
            (l == "ng" && inv.is_consonant(r)).then(|| ("n".to_string(), r.to_string()))
        });
        rewrite_pairs(parsed, |p, l, r| {
            (l == "r" && inv.is_consonant(r) && !p.has_pair(ROUNDED_BEFORE, r))
                .then(|| ("er".to_string(), r.to_string()))
        });
        rewrite_pairs(parsed, |p, l, r| {
            (r == "r" && inv.is_consonant(l) && !p.has_pair(ROUNDED_BEFORE, l))
                .then(|| (l.to_string(), "er".to_string()))
        });
        rewrite_pairs(parsed, |p, l, r| {
            (l == "w" && inv.is_consonant(r) && !p.has_pair(W_GLIDE_BEFORE, r))
                .then(|| ("u".to_string(), r.to_string()))
        });
        rewrite_pairs(parsed, |p, l, r| {
            (r == "w" && inv.is_consonant(l) && !p.has_pair(W_GLIDE_BEFORE, l))
                .then(|| (l.to_string(), "uw".to_string()))
        });
        if is_glide_rest(parsed, "w") {
            return Some("uw -".to_string());
        }

        rewrite_pairs(parsed, |p, l, r| {
            (l == "y" && inv.is_consonant(r) && !p.has_pair(Y_GLIDE_BEFORE, r))
                .then(|| ("i".to_string(), r.to_string()))
        });
        if is_glide_rest(parsed, "y") {
            return Some("iy -".to_string());
        }

        rewrite_pairs(parsed, |p, l, r| {
            (r == "R" && inv.is_consonant(l) && !p.has_pair(Y_GLIDE_BEFORE, l))
                .then(|| (l.to_string(), "-".to_string()))
        });
        rewrite_pairs(parsed, |_, l, r| {
            (r == "-" && inv.is_vowel(l)).then(|| (l.to_string(), "R".to_string()))
        });

        None
    }

    fn vowel_before_consonant(&self, parsed: &mut ParsedAlias) {
        let inv = self.inventory;
        rewrite_pairs(parsed, |_, l, r| {
            inv.is_consonant(r)
                .then(|| lookup(VC_VOWEL_FALLBACKS, l))
                .flatten()
                .map(|fallback| (fallback.to_string(), r.to_string()))
        });
    }

    /// A glottal `q` becomes a rest marker unless a `cl` spelling sits at
    /// the same junction
    fn glottal_stops(&self, parsed: &mut ParsedAlias) {
        let inv = self.inventory;
        rewrite_pairs(parsed, |p, l, r| {
            (l == "q" && inv.is_vowel(r) && !p.has_pair(&["cl"], r))
                .then(|| ("-".to_string(), r.to_string()))
        });
        rewrite_pairs(parsed, |p, l, r| {
            (r == "q" && inv.is_consonant(l) && !has_pair_after(p, l, "cl"))
                .then(|| (l.to_string(), "-".to_string()))
        });
        rewrite_pairs(parsed, |p, l, r| {
            (l == "q" && inv.is_consonant(r) && !p.has_pair(&["cl"], r))
                .then(|| ("-".to_string(), r.to_string()))
        });
    }
}

/// Apply `rule` to every joined pair left to right. The rule sees the
/// alias as it stands before the pass and returns replacement bodies.
fn rewrite_pairs<F>(parsed: &mut ParsedAlias, rule: F)
where
    F: Fn(&ParsedAlias, &str, &str) -> Option<(String, String)>,
{
    let snapshot = parsed.clone();
    for i in 0..parsed.len().saturating_sub(1) {
        let replacement = parsed
            .joined_pair(i)
            .and_then(|(l, r)| rule(&snapshot, l, r));
        if let Some((left, right)) = replacement {
            let tokens = parsed.tokens_mut();
            tokens[i].body = left;
            tokens[i + 1].body = right;
        }
    }
}

fn has_pair_after(parsed: &ParsedAlias, left: &str, right: &str) -> bool {
    (0..parsed.len().saturating_sub(1))
        .filter_map(|i| parsed.joined_pair(i))
        .any(|(l, r)| l == left && r == right)
}

fn is_glide_rest(parsed: &ParsedAlias, glide: &str) -> bool {
    matches!(parsed.tokens(), [g, rest] if g.is_plain() && g.body == glide && rest.is_rest())
}

fn collapse_diphthong_pairs(parsed: &mut ParsedAlias) {
    let mut i = 0;
    while i + 1 < parsed.len() {
        let replacement = parsed
            .joined_pair(i)
            .and_then(|(l, r)| lookup(DIPHTHONG_PAIRS, &format!("{l} {r}")));
        let Some(replacement) = replacement else {
            i += 1;
            continue;
        };

        let tokens = parsed.tokens_mut();
        let lead = tokens[i].lead;
        let trailing_rest = tokens[i + 1].trailing_rest;
        let mut spliced: Vec<AliasToken> = replacement.split(' ').map(AliasToken::bare).collect();
        if let Some(first) = spliced.first_mut() {
            first.lead = lead;
        }
        if let Some(last) = spliced.last_mut() {
            last.trailing_rest = trailing_rest;
        }
        let width = spliced.len();
        tokens.splice(i..i + 2, spliced);
        i += width;
    }
}
