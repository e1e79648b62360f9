//! Word to phoneme lookup.
//!
//! Pronunciations come from a chain of sources where the first source that
//! knows a word wins: the voice bank's own dictionary, then the plugin
//! dictionary, then builtin letter-to-sound rules. The plugin dictionary is
//! created from a bundled template the first time it is needed.

use crate::config::ResolverConfig;
use crate::error::{VocaliasError, VocaliasResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

/// Bundled dictionary written to the plugin directory on first use
pub const DICTIONARY_TEMPLATE: &str = include_str!("../resources/dictionary_template.toml");

/// A grapheme to phoneme source
pub trait G2p {
    /// Phonemes for `word`, if this source knows it
    fn query(&self, word: &str) -> Option<Vec<String>>;
}

impl<G: G2p + ?Sized> G2p for Box<G> {
    fn query(&self, word: &str) -> Option<Vec<String>> {
        (**self).query(word)
    }
}

fn normalize_key(word: &str) -> String {
    word.trim().nfc().collect::<String>().to_lowercase()
}

/// Dictionary entry as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Spelling of the word
    pub grapheme: String,
    /// Pronunciation in order
    pub phonemes: Vec<String>,
}

/// Symbol declaration as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Phoneme symbol
    pub symbol: String,
    /// Free-form class such as `vowel` or `stop`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Default, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    symbols: Vec<SymbolEntry>,
    #[serde(default)]
    entries: Vec<DictionaryEntry>,
}

/// Dictionary read from a TOML file
#[derive(Debug, Clone, Default)]
pub struct DictionaryG2p {
    entries: HashMap<String, Vec<String>>,
    symbols: HashMap<String, String>,
}

impl DictionaryG2p {
    /// Parse dictionary text
    ///
    /// # Errors
    ///
    /// Returns a dictionary error for malformed TOML or an entry with an
    /// empty grapheme or pronunciation
    pub fn from_toml_str(text: &str) -> VocaliasResult<Self> {
        let file: DictionaryFile =
            toml::from_str(text).map_err(|e| VocaliasError::dictionary(format!("Malformed dictionary: {e}")))?;

        let mut entries = HashMap::with_capacity(file.entries.len());
        for entry in file.entries {
            let key = normalize_key(&entry.grapheme);
            if key.is_empty() || entry.phonemes.is_empty() {
                return Err(VocaliasError::dictionary(format!(
                    "Entry {:?} needs a grapheme and at least one phoneme",
                    entry.grapheme
                )));
            }
            entries.insert(key, entry.phonemes);
        }

        let symbols = file.symbols.into_iter().map(|s| (s.symbol, s.kind)).collect();
        Ok(Self { entries, symbols })
    }

    /// Load a dictionary file
    ///
    /// # Errors
    ///
    /// Returns a file error if the file cannot be read, otherwise see
    /// [`DictionaryG2p::from_toml_str`]
    pub fn load(path: &Path) -> VocaliasResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| VocaliasError::file(format!("Failed to read {}: {e}", path.display())))?;
        let dictionary = Self::from_toml_str(&text)?;
        debug!("Read {} entries from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// Number of words
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the dictionary has no words
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared class of a symbol
    #[must_use]
    pub fn symbol_kind(&self, symbol: &str) -> Option<&str> {
        self.symbols.get(symbol).map(String::as_str)
    }
}

impl G2p for DictionaryG2p {
    fn query(&self, word: &str) -> Option<Vec<String>> {
        self.entries.get(&normalize_key(word)).cloned()
    }
}

/// Ordered sources; the first that knows a word wins
#[derive(Default)]
pub struct G2pFallbacks {
    sources: Vec<Box<dyn G2p + Send + Sync>>,
}

impl G2pFallbacks {
    /// Empty chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority source
    #[must_use]
    pub fn with<G: G2p + Send + Sync + 'static>(mut self, source: G) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check whether the chain has no sources
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl G2p for G2pFallbacks {
    fn query(&self, word: &str) -> Option<Vec<String>> {
        self.sources.iter().find_map(|source| source.query(word))
    }
}

impl std::fmt::Debug for G2pFallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("G2pFallbacks").field("sources", &self.sources.len()).finish()
    }
}

/// Letter-to-sound rules for words no dictionary knows
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinG2p;

/// Grapheme spellings, longest first within each leading letter
const LETTER_RULES: &[(&str, &[&str])] = &[
    ("tch", &["ch"]),
    ("igh", &["ay"]),
    ("ch", &["ch"]),
    ("sh", &["sh"]),
    ("th", &["th"]),
    ("ph", &["f"]),
    ("ng", &["ng"]),
    ("ck", &["k"]),
    ("qu", &["k", "w"]),
    ("wh", &["w"]),
    ("ee", &["iy"]),
    ("ea", &["iy"]),
    ("oo", &["uw"]),
    ("ou", &["aw"]),
    ("ow", &["ow"]),
    ("ai", &["ey"]),
    ("ay", &["ey"]),
    ("oi", &["oy"]),
    ("oy", &["oy"]),
    ("au", &["ao"]),
    ("aw", &["ao"]),
    ("er", &["er"]),
    ("ir", &["er"]),
    ("ur", &["er"]),
    ("ar", &["aa", "r"]),
    ("or", &["ao", "r"]),
    ("a", &["ae"]),
    ("b", &["b"]),
    ("c", &["k"]),
    ("d", &["d"]),
    ("e", &["eh"]),
    ("f", &["f"]),
    ("g", &["g"]),
    ("h", &["hh"]),
    ("i", &["ih"]),
    ("j", &["jh"]),
    ("k", &["k"]),
    ("l", &["l"]),
    ("m", &["m"]),
    ("n", &["n"]),
    ("o", &["aa"]),
    ("p", &["p"]),
    ("q", &["k"]),
    ("r", &["r"]),
    ("s", &["s"]),
    ("t", &["t"]),
    ("u", &["ah"]),
    ("v", &["v"]),
    ("w", &["w"]),
    ("x", &["k", "s"]),
    ("y", &["y"]),
    ("z", &["z"]),
];

const SPELLING_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

impl G2p for BuiltinG2p {
    fn query(&self, word: &str) -> Option<Vec<String>> {
        let word = normalize_key(word);
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }

        // silent final e after a consonant
        let spelled = match word.strip_suffix('e') {
            Some(stem) if stem.len() >= 2 && !stem.ends_with(SPELLING_VOWELS) => stem,
            _ => word.as_str(),
        };

        let mut phonemes: Vec<String> = Vec::new();
        let mut rest = spelled;
        while !rest.is_empty() {
            if rest == "y" && !phonemes.is_empty() {
                phonemes.push("iy".to_string());
                break;
            }
            let (grapheme, sounds) = LETTER_RULES.iter().find(|(g, _)| rest.starts_with(g))?;
            rest = &rest[grapheme.len()..];
            for sound in *sounds {
                if phonemes.last().is_some_and(|last| last == sound) && grapheme.len() == 1 {
                    continue;
                }
                phonemes.push((*sound).to_string());
            }
        }
        Some(phonemes)
    }
}

/// Builds the dictionary chain for a voice
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    config: ResolverConfig,
}

impl DictionaryLoader {
    /// Loader for the configured plugin directory and file name
    #[must_use]
    pub const fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Write the bundled template to the plugin dictionary path if absent
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no plugin directory is known, or a
    /// file error if the template cannot be written
    pub fn ensure_base(&self) -> VocaliasResult<std::path::PathBuf> {
        let path = self.config.dictionary_path()?;
        if path.exists() {
            return Ok(path);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| VocaliasError::file(format!("Failed to create {}: {e}", parent.display())))?;
        }
        fs::write(&path, DICTIONARY_TEMPLATE)
            .map_err(|e| VocaliasError::file(format!("Failed to write {}: {e}", path.display())))?;
        info!("Created dictionary from template at {}", path.display());
        Ok(path)
    }

    /// Chain of the voice bank dictionary (if any), the plugin dictionary
    /// and the builtin rules. A voice bank dictionary that fails to load is
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin dictionary cannot be created or read
    pub fn load(&self, voice_dir: Option<&Path>) -> VocaliasResult<G2pFallbacks> {
        let base_path = self.ensure_base()?;
        let mut chain = G2pFallbacks::new();

        if let Some(dir) = voice_dir {
            let path = dir.join(&self.config.dictionary_file_name);
            if path.is_file() {
                match DictionaryG2p::load(&path) {
                    Ok(dictionary) => {
                        info!("Using voice dictionary {} ({} entries)", path.display(), dictionary.len());
                        chain = chain.with(dictionary);
                    }
                    Err(e) => warn!("Failed to load {}: {e}", path.display()),
                }
            }
        }

        chain = chain.with(DictionaryG2p::load(&base_path)?).with(BuiltinG2p);
        Ok(chain)
    }
}
