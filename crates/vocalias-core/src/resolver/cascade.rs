//! Ordered fallback rules evaluated until the first hit.

use tracing::debug;

type Rule<'c, T> = Box<dyn FnOnce() -> Option<T> + 'c>;

/// Named rules tried in insertion order
pub(crate) struct Cascade<'c, T> {
    state: &'static str,
    rules: Vec<(&'static str, Rule<'c, T>)>,
}

impl<'c, T> Cascade<'c, T> {
    pub(crate) fn new(state: &'static str) -> Self {
        Self {
            state,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn rule<F>(mut self, label: &'static str, rule: F) -> Self
    where
        F: FnOnce() -> Option<T> + 'c,
    {
        self.rules.push((label, Box::new(rule)));
        self
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> Vec<&'static str> {
        self.rules.iter().map(|(label, _)| *label).collect()
    }

    /// Result of the first rule that produces one
    pub(crate) fn run(self) -> Option<T> {
        for (label, rule) in self.rules {
            if let Some(hit) = rule() {
                debug!(state = self.state, rule = label, "Cascade matched");
                return Some(hit);
            }
        }
        None
    }

    pub(crate) fn run_or_else<F: FnOnce() -> T>(self, fallback: F) -> T {
        let state = self.state;
        self.run().unwrap_or_else(|| {
            debug!(state, "Cascade fell through to literal");
            fallback()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_first_hit_wins_and_stops() {
        let calls = Cell::new(0);
        let cascade = Cascade::new("test")
            .rule("miss", || {
                calls.set(calls.get() + 1);
                None
            })
            .rule("hit", || {
                calls.set(calls.get() + 1);
                Some(1)
            })
            .rule("unreached", || {
                calls.set(calls.get() + 1);
                Some(2)
            });
        assert_eq!(cascade.labels(), vec!["miss", "hit", "unreached"]);
        assert_eq!(cascade.run(), Some(1));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_fallback() {
        let cascade: Cascade<'_, &str> = Cascade::new("test").rule("miss", || None);
        assert_eq!(cascade.run_or_else(|| "literal"), "literal");
    }
}
