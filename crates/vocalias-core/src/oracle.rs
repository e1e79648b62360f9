//! Alias existence oracles.
//!
//! The resolver only ever asks one question of a voice: is this alias
//! registered at this pitch? [`AliasOracle`] is that seam. [`AliasSet`] is
//! the in-memory form used by tests and small hosts, [`CachedOracle`]
//! memoises an expensive oracle, and [`crate::voicebank::VoiceBank`] reads
//! a voice directory.

use crate::syllable::Tone;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Query capability over a voice's registered samples
pub trait AliasOracle {
    /// Check whether `alias` is registered for `tone`
    fn exists(&self, alias: &str, tone: Tone) -> bool;
}

impl<O: AliasOracle + ?Sized> AliasOracle for &O {
    fn exists(&self, alias: &str, tone: Tone) -> bool {
        (**self).exists(alias, tone)
    }
}

impl<O: AliasOracle + ?Sized> AliasOracle for Box<O> {
    fn exists(&self, alias: &str, tone: Tone) -> bool {
        (**self).exists(alias, tone)
    }
}

impl<O: AliasOracle + ?Sized> AliasOracle for Arc<O> {
    fn exists(&self, alias: &str, tone: Tone) -> bool {
        (**self).exists(alias, tone)
    }
}

/// Oracle backed by a closure
#[derive(Debug, Clone, Copy)]
pub struct FnOracle<F>(F);

/// Wrap a closure as an oracle
pub fn from_fn<F>(f: F) -> FnOracle<F>
where
    F: Fn(&str, Tone) -> bool,
{
    FnOracle(f)
}

impl<F> AliasOracle for FnOracle<F>
where
    F: Fn(&str, Tone) -> bool,
{
    fn exists(&self, alias: &str, tone: Tone) -> bool {
        (self.0)(alias, tone)
    }
}

/// Tone-independent in-memory alias set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasSet {
    aliases: HashSet<String>,
}

impl AliasSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias
    pub fn insert<S: Into<String>>(&mut self, alias: S) -> bool {
        self.aliases.insert(alias.into())
    }

    /// Number of registered aliases
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterate registered aliases in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for AliasSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            aliases: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl AliasOracle for AliasSet {
    fn exists(&self, alias: &str, _tone: Tone) -> bool {
        self.aliases.contains(alias)
    }
}

/// Memoising wrapper around another oracle
#[derive(Debug)]
pub struct CachedOracle<O> {
    inner: O,
    answers: Mutex<HashMap<(String, Tone), bool>>,
}

impl<O: AliasOracle> CachedOracle<O> {
    /// Wrap `inner`
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            answers: Mutex::new(HashMap::new()),
        }
    }

    /// Number of memoised answers
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.answers.lock().len()
    }

    /// Forget every memoised answer
    pub fn clear(&self) {
        self.answers.lock().clear();
    }

    /// The wrapped oracle
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: AliasOracle> AliasOracle for CachedOracle<O> {
    fn exists(&self, alias: &str, tone: Tone) -> bool {
        let key = (alias.to_string(), tone);
        if let Some(answer) = self.answers.lock().get(&key) {
            return *answer;
        }
        // Lock released while the inner oracle runs
        let answer = self.inner.exists(alias, tone);
        self.answers.lock().insert(key, answer);
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_alias_set() {
        let set: AliasSet = ["ah", "k ae"].into_iter().collect();
        assert!(set.exists("ah", 60));
        assert!(set.exists("k ae", 72));
        assert!(!set.exists("kae", 60));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_closure_oracle() {
        let oracle = from_fn(|alias: &str, tone| alias == "ah" && tone >= 60);
        assert!(oracle.exists("ah", 60));
        assert!(!oracle.exists("ah", 59));
    }

    #[test]
    fn test_cached_oracle_queries_inner_once() {
        let calls = Cell::new(0);
        let inner = from_fn(|alias: &str, _| {
            calls.set(calls.get() + 1);
            alias == "ah"
        });
        let cached = CachedOracle::new(inner);
        assert!(cached.exists("ah", 60));
        assert!(cached.exists("ah", 60));
        assert!(!cached.exists("ah ", 60));
        assert_eq!(calls.get(), 2);
        assert_eq!(cached.cached_len(), 2);

        cached.clear();
        assert_eq!(cached.cached_len(), 0);
    }

    #[test]
    fn test_reference_and_box_oracles() {
        let set: AliasSet = ["ah"].into_iter().collect();
        let by_ref: &dyn AliasOracle = &set;
        assert!(by_ref.exists("ah", 0));
        let boxed: Box<dyn AliasOracle> = Box::new(set);
        assert!(boxed.exists("ah", 0));
    }
}
