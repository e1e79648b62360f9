//! Voice bank directories as alias oracles.
//!
//! Every `oto.ini` below the bank root contributes one alias per line
//! (`file.wav=alias,offset,...`, the file stem when the alias is blank).
//! An optional `prefix.map` at the root decorates aliases per pitch, e.g.
//! `C4<TAB><TAB>_C4` registers `ka_C4` for `ka` at `C4`.

use crate::error::{VocaliasError, VocaliasResult};
use crate::oracle::AliasOracle;
use crate::syllable::Tone;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const OTO_FILE: &str = "oto.ini";
const PREFIX_MAP_FILE: &str = "prefix.map";

/// Prefix and suffix added to aliases at one pitch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    /// Text before the alias
    pub prefix: String,
    /// Text after the alias
    pub suffix: String,
}

impl Decoration {
    fn apply(&self, alias: &str) -> String {
        format!("{}{alias}{}", self.prefix, self.suffix)
    }

    fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}

/// Registered aliases of one voice bank
#[derive(Debug, Clone, Default)]
pub struct VoiceBank {
    root: PathBuf,
    aliases: HashSet<String>,
    prefix_map: HashMap<Tone, Decoration>,
}

impl VoiceBank {
    /// Scan a voice bank directory
    ///
    /// # Errors
    ///
    /// Returns a voice bank error if `root` is not a directory, or a file
    /// error if the prefix map cannot be read. Unreadable `oto.ini` files
    /// are skipped with a warning.
    pub fn load(root: &Path) -> VocaliasResult<Self> {
        if !root.is_dir() {
            return Err(VocaliasError::voice_bank(format!(
                "Voice bank directory not found: {}",
                root.display()
            )));
        }

        let pattern = root.join("**").join(OTO_FILE);
        let mut aliases = HashSet::new();
        let mut files = 0usize;
        for entry in glob::glob(&pattern.to_string_lossy())? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable voice bank entry: {e}");
                    continue;
                }
            };
            match fs::read(&path) {
                Ok(bytes) => {
                    let before = aliases.len();
                    aliases.extend(parse_oto(&String::from_utf8_lossy(&bytes)));
                    debug!("Read {} aliases from {}", aliases.len() - before, path.display());
                    files += 1;
                }
                Err(e) => warn!("Failed to read {}: {e}", path.display()),
            }
        }

        let map_path = root.join(PREFIX_MAP_FILE);
        let prefix_map = if map_path.is_file() {
            let text = fs::read_to_string(&map_path).map_err(|e| {
                VocaliasError::file(format!("Failed to read {}: {e}", map_path.display()))
            })?;
            parse_prefix_map(&text)
        } else {
            HashMap::new()
        };

        info!(
            "Loaded voice bank {} ({} aliases from {} oto files, {} mapped pitches)",
            root.display(),
            aliases.len(),
            files,
            prefix_map.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            aliases,
            prefix_map,
        })
    }

    /// Bank with the given aliases and no prefix map
    #[must_use]
    pub fn from_aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Attach a decoration for one pitch
    #[must_use]
    pub fn with_decoration(mut self, tone: Tone, decoration: Decoration) -> Self {
        self.prefix_map.insert(tone, decoration);
        self
    }

    /// Bank root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of distinct registered aliases
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check whether the bank registers nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Decoration used at `tone`
    #[must_use]
    pub fn decoration(&self, tone: Tone) -> Option<&Decoration> {
        self.prefix_map.get(&tone)
    }
}

impl AliasOracle for VoiceBank {
    fn exists(&self, alias: &str, tone: Tone) -> bool {
        if let Some(decoration) = self.prefix_map.get(&tone).filter(|d| !d.is_empty()) {
            if self.aliases.contains(&decoration.apply(alias)) {
                return true;
            }
        }
        self.aliases.contains(alias)
    }
}

/// Aliases declared in `oto.ini` text
#[must_use]
pub fn parse_oto(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let (file, params) = line.trim().split_once('=')?;
            let alias = params.split(',').next().unwrap_or_default().trim();
            if !alias.is_empty() {
                return Some(alias.to_string());
            }
            Path::new(file.trim())
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .filter(|stem| !stem.is_empty())
        })
        .collect()
}

/// Per-pitch decorations declared in `prefix.map` text. Lines with an
/// unknown note name are skipped.
#[must_use]
pub fn parse_prefix_map(text: &str) -> HashMap<Tone, Decoration> {
    let mut map = HashMap::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split('\t');
        let note = fields.next().unwrap_or_default().trim();
        let Some(tone) = parse_note_name(note) else {
            warn!("Skipping prefix map line with unknown note {note:?}");
            continue;
        };
        let decoration = Decoration {
            prefix: fields.next().unwrap_or_default().to_string(),
            suffix: fields.next().unwrap_or_default().trim_end().to_string(),
        };
        map.insert(tone, decoration);
    }
    map
}

/// MIDI number of a scientific pitch name such as `C4` (60) or `A#3`
#[must_use]
pub fn parse_note_name(name: &str) -> Option<Tone> {
    let mut chars = name.chars();
    let semitone = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let rest = chars.as_str();
    let (sharp, octave) = match rest.strip_prefix('#') {
        Some(octave) => (1, octave),
        None => (0, rest),
    };
    let octave: Tone = octave.parse().ok()?;
    Some((octave + 1) * 12 + semitone + sharp)
}
