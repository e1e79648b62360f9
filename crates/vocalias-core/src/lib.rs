//! # Vocalias Core
//!
//! Sample-alias resolution for UTAU-style singing voice banks.
//!
//! Given a syllable (previous vowel, onset consonants, vowel, pitch) the
//! resolver picks the concatenative samples a voice bank should play,
//! probing the bank through an [`AliasOracle`] and falling back step by
//! step to simpler spellings when a sample is missing.
//!
//! ## Features
//!
//! - Ordered resolution cascades for every onset shape and phrase ending
//! - Per-session substitution of phoneme tiers the voice never recorded
//! - Romaji to hiragana spelling for Japanese-named samples
//! - Crossfade length estimates by consonant class
//! - `oto.ini`/`prefix.map` voice banks and TOML pronunciation dictionaries
//!
//! ## Example
//!
//! ```rust
//! use vocalias_core::{AliasSet, Resolver, Syllable};
//!
//! let voice: AliasSet = ["k", "k ae"].into_iter().collect();
//! let mut resolver = Resolver::new(voice);
//!
//! let resolution = resolver.resolve_syllable(&Syllable::new(&["k"], "ae", 60));
//! assert_eq!(resolution.aliases(), vec!["k", "k ae"]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod alias;
pub mod config;
pub mod dictionary;
pub mod duration;
pub mod error;
pub mod kana;
pub mod normalizer;
pub mod oracle;
pub mod phonetics;
pub mod resolver;
pub mod session;
pub mod syllable;
pub mod tables;
pub mod tokens;
pub mod voicebank;

// Re-export main types for convenience
pub use alias::{AliasFormat, AliasToken, Lead, ParsedAlias};
pub use config::ResolverConfig;
pub use dictionary::{BuiltinG2p, DictionaryG2p, DictionaryLoader, G2p, G2pFallbacks};
pub use duration::{DurationEstimator, TransitionCategory};
pub use error::{VocaliasError, VocaliasResult};
pub use normalizer::{AliasNormalizer, IdempotenceViolation};
pub use oracle::{AliasOracle, AliasSet, CachedOracle, FnOracle};
pub use phonetics::{Inventory, PhoneClass};
pub use resolver::{Resolver, SyllableState};
pub use session::{MissingTiers, Session};
pub use syllable::{Ending, Resolution, ResolvedPhoneme, Syllable, Tone};
pub use tokens::TokenNormalizer;
pub use voicebank::{Decoration, VoiceBank};

/// Version information for the vocalias-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
