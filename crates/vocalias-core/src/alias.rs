//! Alias spellings: token structure and candidate formats.
//!
//! An alias is a space-separated list of tokens. Each token is a phoneme
//! body with an optional leading `-`/`_` connector and an optional trailing
//! `-` rest marker, e.g. `-k`, `ae-`, `_t`. A lone `-` or `R` token is a
//! rest boundary.

use std::fmt;

/// Connector glyph in front of a token body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lead {
    /// `-`: word or phrase edge
    Hyphen,
    /// `_`: glide link
    Underscore,
}

impl Lead {
    const fn glyph(self) -> char {
        match self {
            Self::Hyphen => '-',
            Self::Underscore => '_',
        }
    }
}

/// One space-separated piece of an alias
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasToken {
    /// Leading connector
    pub lead: Option<Lead>,
    /// Phoneme body
    pub body: String,
    /// Trailing `-` rest marker
    pub trailing_rest: bool,
}

impl AliasToken {
    /// Token with no connectors
    #[must_use]
    pub fn bare<S: Into<String>>(body: S) -> Self {
        Self {
            lead: None,
            body: body.into(),
            trailing_rest: false,
        }
    }

    /// Parse one token; connectors are only split off when a body remains
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.chars().count() <= 1 || raw.chars().all(|c| c == '-') {
            return Self::bare(raw);
        }

        let (lead, rest) = if let Some(rest) = raw.strip_prefix('-') {
            (Some(Lead::Hyphen), rest)
        } else if let Some(rest) = raw.strip_prefix('_') {
            (Some(Lead::Underscore), rest)
        } else {
            (None, raw)
        };

        match rest.strip_suffix('-') {
            Some(body) if !body.is_empty() => Self {
                lead,
                body: body.to_string(),
                trailing_rest: true,
            },
            _ => Self {
                lead,
                body: rest.to_string(),
                trailing_rest: false,
            },
        }
    }

    /// Check whether the token carries no connector
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.lead.is_none() && !self.trailing_rest
    }

    /// Check whether this is a lone `-` rest token
    #[must_use]
    pub fn is_rest(&self) -> bool {
        self.is_plain() && self.body == "-"
    }

    /// Check whether this is a lone `R` rest token
    #[must_use]
    pub fn is_rest_r(&self) -> bool {
        self.is_plain() && self.body == "R"
    }
}

impl fmt::Display for AliasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(lead) = self.lead {
            write!(f, "{}", lead.glyph())?;
        }
        f.write_str(&self.body)?;
        if self.trailing_rest {
            f.write_str("-")?;
        }
        Ok(())
    }
}

/// An alias parsed into tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedAlias {
    tokens: Vec<AliasToken>,
}

impl ParsedAlias {
    /// Parse an alias; runs of spaces separate tokens
    #[must_use]
    pub fn parse(alias: &str) -> Self {
        Self {
            tokens: alias.split(' ').filter(|t| !t.is_empty()).map(AliasToken::parse).collect(),
        }
    }

    /// Tokens in order
    #[must_use]
    pub fn tokens(&self) -> &[AliasToken] {
        &self.tokens
    }

    /// Mutable tokens in order
    pub fn tokens_mut(&mut self) -> &mut Vec<AliasToken> {
        &mut self.tokens
    }

    /// Number of tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether the alias has no tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Bodies of the tokens at `i` and `i + 1` when nothing separates them:
    /// the left token has no trailing rest and the right token no lead
    #[must_use]
    pub fn joined_pair(&self, i: usize) -> Option<(&str, &str)> {
        let left = self.tokens.get(i)?;
        let right = self.tokens.get(i + 1)?;
        (!left.trailing_rest && right.lead.is_none()).then(|| (left.body.as_str(), right.body.as_str()))
    }

    /// Check whether any joined pair has `left` in `lefts` followed by `right`
    #[must_use]
    pub fn has_pair(&self, lefts: &[&str], right: &str) -> bool {
        (0..self.tokens.len().saturating_sub(1))
            .filter_map(|i| self.joined_pair(i))
            .any(|(l, r)| r == right && lefts.contains(&l))
    }
}

impl fmt::Display for ParsedAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Candidate spellings for one phonetic unit, tried in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasFormat<'p> {
    /// Phrase-initial vowel
    StartingVowel,
    /// Hiatus bridge consonant attached to the previous vowel
    VowelBridge {
        /// Vowel the bridge leaves from
        previous_vowel: &'p str,
    },
    /// Consonant lead-in at a phrase start
    ConsonantStart,
    /// Consonant released into the next sample
    ConsonantTail,
    /// Consonant released into silence
    ConsonantRest,
    /// Vowel or consonant followed by a rest
    RestEnding,
    /// Phrase-initial `c v` pair
    DynamicStart,
    /// Medial `c v` pair
    DynamicMid,
    /// Medial vowel-vowel pair, split spelling first
    DynamicMidHiatus,
    /// Phrase-final `v c` pair
    DynamicEnd,
}

impl AliasFormat<'_> {
    /// Ordered templates. `{x}` is the whole unit, `{c}`/`{v}` its
    /// consonant and vowel halves and `{p}` the previous vowel.
    #[must_use]
    pub const fn templates(&self) -> &'static [&'static str] {
        match self {
            Self::StartingVowel => &["-{x}", "- {x}", "_{x}", "{x}"],
            Self::VowelBridge { .. } => &["{p} {x}", "{p}{x}"],
            Self::ConsonantStart => &["- {x}", "-{x}"],
            Self::ConsonantTail => &["{x}_", "{x}"],
            Self::ConsonantRest => &["{x} -", "{x}-", "{x}"],
            Self::RestEnding => &["{x} R", "{x}-", "{x} -"],
            Self::DynamicStart => &["- {c}{v}", "- {c} {v}", "-{c} {v}", "-{c}{v}", "-{c}_{v}", "- {c}_{v}"],
            Self::DynamicMid => &["{c}{v}", "{c} {v}", "{c}_{v}"],
            Self::DynamicMidHiatus => &["{c} {v}", "{c}{v}", "{c}_{v}"],
            Self::DynamicEnd => &["{v}{c} -", "{v} {c}-", "{v}{c}-", "{v} {c} -"],
        }
    }

    /// Fill the templates for `alias`. Pair formats split `alias` at its
    /// first space; `DynamicEnd` reads it as `vowel consonant`.
    #[must_use]
    pub fn candidates(&self, alias: &str) -> Vec<String> {
        let (first, second) = alias.split_once(' ').unwrap_or((alias, ""));
        let (c, v) = match self {
            Self::DynamicEnd => (second, first),
            _ => (first, second),
        };
        let previous = match self {
            Self::VowelBridge { previous_vowel } => *previous_vowel,
            _ => "",
        };
        self.templates()
            .iter()
            .map(|template| {
                template
                    .replace("{x}", alias)
                    .replace("{c}", c)
                    .replace("{v}", v)
                    .replace("{p}", previous)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-", None, "-", false)]
    #[case("R", None, "R", false)]
    #[case("-k", Some(Lead::Hyphen), "k", false)]
    #[case("_t", Some(Lead::Underscore), "t", false)]
    #[case("ae-", None, "ae", true)]
    #[case("-ae-", Some(Lead::Hyphen), "ae", true)]
    #[case("--", None, "--", false)]
    fn test_token_parse(
        #[case] raw: &str,
        #[case] lead: Option<Lead>,
        #[case] body: &str,
        #[case] trailing: bool,
    ) {
        let token = AliasToken::parse(raw);
        assert_eq!(token.lead, lead);
        assert_eq!(token.body, body);
        assert_eq!(token.trailing_rest, trailing);
        assert_eq!(token.to_string(), raw);
    }

    #[test]
    fn test_parsed_alias_round_trip() {
        for alias in ["- k ae", "k ae", "a R", "kae", "v c-", "", "_b b"] {
            assert_eq!(ParsedAlias::parse(alias).to_string(), alias);
        }
    }

    #[test]
    fn test_joined_pair() {
        let parsed = ParsedAlias::parse("aw k- -t");
        assert_eq!(parsed.joined_pair(0), Some(("aw", "k")));
        assert_eq!(parsed.joined_pair(1), None);
        assert!(parsed.has_pair(&["aw", "ow"], "k"));
        assert!(!parsed.has_pair(&["ow"], "k"));
    }

    #[test]
    fn test_starting_vowel_candidates() {
        assert_eq!(
            AliasFormat::StartingVowel.candidates("ah"),
            vec!["-ah", "- ah", "_ah", "ah"]
        );
    }

    #[test]
    fn test_dynamic_candidates() {
        assert_eq!(AliasFormat::DynamicMid.candidates("k ae"), vec!["kae", "k ae", "k_ae"]);
        assert_eq!(
            AliasFormat::DynamicStart.candidates("k ae")[..2],
            ["- kae".to_string(), "- k ae".to_string()]
        );
        assert_eq!(
            AliasFormat::DynamicEnd.candidates("ae k"),
            vec!["aek -", "ae k-", "aek-", "ae k -"]
        );
    }

    #[test]
    fn test_bridge_candidates() {
        let format = AliasFormat::VowelBridge { previous_vowel: "ay" };
        assert_eq!(format.candidates("y"), vec!["ay y", "ayy"]);
    }
}
