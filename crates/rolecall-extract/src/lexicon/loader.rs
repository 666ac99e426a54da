//! TOML lexicon definitions: parsing and structural validation.
//!
//! Any problem here is fatal for the caller. A scan never runs against a
//! half-loaded lexicon.

use std::path::Path;

use serde::{Deserialize, Serialize};

use rolecall_core::constants::{ACRONYM_MAX_LEN, ACRONYM_MIN_LEN};
use rolecall_core::errors::LexiconError;
use rolecall_core::types::{is_acronym, normalize_role_text};
use rolecall_core::types::collections::FxHashSet;

/// The lexicon shipped with the crate.
const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.toml");

/// A known role title with its alternate surface forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDef {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub acronyms: Vec<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub deliverable: bool,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// A role suffix word ("Manager", "Board").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixDef {
    pub word: String,
    pub category: Option<String>,
}

/// An institutional common noun that validates early in responsibility contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextualDef {
    pub term: String,
    pub category: Option<String>,
}

/// Raw contents of a lexicon TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconDefinition {
    pub version: u64,
    #[serde(default)]
    pub suffixes: Vec<SuffixDef>,
    #[serde(default)]
    pub contextual: Vec<ContextualDef>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub roles: Vec<RoleDef>,
}

/// Loader for lexicon definitions.
pub struct LexiconLoader;

impl LexiconLoader {
    /// The built-in lexicon.
    pub fn builtin() -> Result<LexiconDefinition, LexiconError> {
        Self::load_from_str(BUILTIN_LEXICON, "<builtin>")
    }

    /// Parse and validate a lexicon from a TOML string.
    pub fn load_from_str(toml_str: &str, source: &str) -> Result<LexiconDefinition, LexiconError> {
        let def: LexiconDefinition = toml::from_str(toml_str).map_err(|e| LexiconError::Parse {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&def)?;
        Ok(def)
    }

    /// Parse and validate a lexicon file.
    pub fn load_from_file(path: &Path) -> Result<LexiconDefinition, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::load_from_str(&content, &path.display().to_string())
    }

    /// Structural checks. Every failure is reported as corruption.
    pub fn validate(def: &LexiconDefinition) -> Result<(), LexiconError> {
        if def.version == 0 {
            return Err(LexiconError::corrupt("version must be at least 1"));
        }
        if def.suffixes.is_empty() {
            return Err(LexiconError::corrupt("no role suffixes defined"));
        }

        for suffix in &def.suffixes {
            let word = suffix.word.trim();
            if word.is_empty() || word.contains(char::is_whitespace) {
                return Err(LexiconError::corrupt(format!(
                    "role suffix '{}' must be a single word",
                    suffix.word
                )));
            }
        }
        for entry in &def.contextual {
            if normalize_role_text(&entry.term).is_empty() {
                return Err(LexiconError::corrupt("empty contextual term"));
            }
        }
        for term in &def.exclusions {
            if normalize_role_text(term).is_empty() {
                return Err(LexiconError::corrupt("empty exclusion term"));
            }
        }

        let mut seen: FxHashSet<String> = FxHashSet::default();
        for role in &def.roles {
            let key = normalize_role_text(&role.canonical);
            if key.is_empty() {
                return Err(LexiconError::corrupt("role with empty canonical title"));
            }
            if !seen.insert(key) {
                return Err(LexiconError::corrupt(format!(
                    "duplicate role '{}'",
                    role.canonical
                )));
            }
            if !(role.weight > 0.0 && role.weight <= 1.0) {
                return Err(LexiconError::corrupt(format!(
                    "role '{}' has weight {} outside (0, 1]",
                    role.canonical, role.weight
                )));
            }
            for alias in &role.aliases {
                if normalize_role_text(alias).is_empty() {
                    return Err(LexiconError::corrupt(format!(
                        "role '{}' has an empty alias",
                        role.canonical
                    )));
                }
            }
            for acronym in &role.acronyms {
                if !is_acronym(acronym, ACRONYM_MIN_LEN, ACRONYM_MAX_LEN) {
                    return Err(LexiconError::corrupt(format!(
                        "role '{}' has malformed acronym '{acronym}'",
                        role.canonical
                    )));
                }
            }
        }
        Ok(())
    }
}
