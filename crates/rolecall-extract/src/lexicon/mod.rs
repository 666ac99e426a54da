//! Technical lexicon: known roles, aliases, acronyms, role suffixes,
//! contextual categories and exclusions.
//!
//! A `TechnicalLexicon` is an immutable, versioned snapshot. Scans pin one
//! snapshot for their whole duration; the learner publishes replacements
//! through a `LexiconHandle`.

pub mod gazetteer;
pub mod handle;
pub mod loader;

pub use gazetteer::{Gazetteer, GazetteerHit, TermKind};
pub use handle::LexiconHandle;
pub use loader::{LexiconDefinition, LexiconLoader};

use rolecall_core::constants::{ACRONYM_MAX_LEN, ACRONYM_MIN_LEN};
use rolecall_core::errors::LexiconError;
use rolecall_core::types::collections::{FxHashMap, FxHashSet, SmallVec2};
use rolecall_core::types::{is_acronym, normalize_role_text, AdditionKind, LexiconAddition};

/// One known role title.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownRole {
    pub canonical: String,
    pub aliases: Vec<String>,
    pub acronyms: Vec<String>,
    pub category: Option<String>,
    pub is_deliverable: bool,
    /// Multiplier on the known-role base confidence, in (0, 1].
    pub weight: f64,
}

impl KnownRole {
    /// Normalized canonical title.
    pub fn key(&self) -> String {
        normalize_role_text(&self.canonical)
    }
}

/// How a lookup matched a known role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    Canonical,
    Alias,
    Acronym,
}

/// Result of resolving a surface form against the known-role dictionaries.
/// More than one role means the term is ambiguous.
#[derive(Debug, Clone)]
pub struct RoleLookup<'a> {
    pub roles: SmallVec2<&'a KnownRole>,
    pub matched_by: MatchedBy,
}

impl<'a> RoleLookup<'a> {
    /// The single role this lookup resolves to, if unambiguous.
    pub fn unique(&self) -> Option<&'a KnownRole> {
        if self.roles.len() == 1 {
            Some(self.roles[0])
        } else {
            None
        }
    }

    /// Category shared by every matched role, if they agree.
    pub fn shared_category(&self) -> Option<&'a str> {
        let first = self.roles.first()?.category.as_deref()?;
        self.roles
            .iter()
            .all(|r| r.category.as_deref() == Some(first))
            .then_some(first)
    }

    /// Lowest weight among matched roles.
    pub fn weight(&self) -> f64 {
        self.roles
            .iter()
            .map(|r| r.weight)
            .fold(1.0_f64, f64::min)
    }
}

/// Immutable lexicon snapshot.
#[derive(Debug, Clone)]
pub struct TechnicalLexicon {
    version: u64,
    roles: Vec<KnownRole>,
    /// Normalized canonical title or alias to role indexes.
    names: FxHashMap<String, SmallVec2<usize>>,
    /// Exact acronym to role indexes.
    acronyms: FxHashMap<String, SmallVec2<usize>>,
    /// Lowercased suffix word to category.
    suffixes: FxHashMap<String, Option<String>>,
    /// Normalized contextual term to category.
    contextual: FxHashMap<String, Option<String>>,
    exclusions: FxHashSet<String>,
    gazetteer: Gazetteer,
}

impl TechnicalLexicon {
    /// The built-in lexicon with no additions.
    pub fn builtin() -> Result<Self, LexiconError> {
        let def = LexiconLoader::builtin()?;
        Self::build(&def, &[], def.version)
    }

    /// Build a snapshot from a base definition plus learned additions.
    pub fn build(
        def: &LexiconDefinition,
        additions: &[LexiconAddition],
        version: u64,
    ) -> Result<Self, LexiconError> {
        LexiconLoader::validate(def)?;

        let mut roles: Vec<KnownRole> = def
            .roles
            .iter()
            .map(|r| KnownRole {
                canonical: r.canonical.trim().to_string(),
                aliases: r.aliases.iter().map(|a| a.trim().to_string()).collect(),
                acronyms: r.acronyms.clone(),
                category: r.category.clone(),
                is_deliverable: r.deliverable,
                weight: r.weight,
            })
            .collect();

        let mut exclusions: FxHashSet<String> = def
            .exclusions
            .iter()
            .map(|e| normalize_role_text(e))
            .collect();

        for addition in additions {
            match addition.kind {
                AdditionKind::Exclusion => {
                    let key = normalize_role_text(&addition.term);
                    if key.is_empty() {
                        return Err(LexiconError::corrupt("empty exclusion addition"));
                    }
                    exclusions.insert(key);
                }
                AdditionKind::KnownRole => Self::merge_known_addition(&mut roles, addition)?,
            }
        }

        let suffixes = def
            .suffixes
            .iter()
            .map(|s| (s.word.trim().to_lowercase(), s.category.clone()))
            .collect();
        let contextual = def
            .contextual
            .iter()
            .map(|c| (normalize_role_text(&c.term), c.category.clone()))
            .collect();

        let mut names: FxHashMap<String, SmallVec2<usize>> = FxHashMap::default();
        let mut acronyms: FxHashMap<String, SmallVec2<usize>> = FxHashMap::default();
        let mut terms = Vec::new();
        for (idx, role) in roles.iter().enumerate() {
            push_unique(names.entry(role.key()).or_default(), idx);
            terms.push((role.canonical.clone(), TermKind::Canonical));
            for alias in &role.aliases {
                push_unique(names.entry(normalize_role_text(alias)).or_default(), idx);
                terms.push((alias.clone(), TermKind::Alias));
            }
            for acronym in &role.acronyms {
                push_unique(acronyms.entry(acronym.clone()).or_default(), idx);
                terms.push((acronym.clone(), TermKind::Acronym));
            }
        }

        let gazetteer = Gazetteer::build(terms)?;

        Ok(Self {
            version,
            roles,
            names,
            acronyms,
            suffixes,
            contextual,
            exclusions,
            gazetteer,
        })
    }

    /// Fold one known-role addition into the role list. A term naming an
    /// existing title extends that title; otherwise a new role is created.
    fn merge_known_addition(
        roles: &mut Vec<KnownRole>,
        addition: &LexiconAddition,
    ) -> Result<(), LexiconError> {
        let canonical_key = normalize_role_text(&addition.canonical_name);
        if canonical_key.is_empty() {
            return Err(LexiconError::corrupt("known-role addition without a title"));
        }
        let term = addition.term.trim();
        let term_key = normalize_role_text(term);
        if term_key.is_empty() {
            return Err(LexiconError::corrupt(format!(
                "empty term for learned role '{}'",
                addition.canonical_name
            )));
        }

        let position = match roles.iter().position(|r| r.key() == canonical_key) {
            Some(pos) => pos,
            None => {
                roles.push(KnownRole {
                    canonical: addition.canonical_name.trim().to_string(),
                    aliases: Vec::new(),
                    acronyms: Vec::new(),
                    category: addition.category.clone(),
                    is_deliverable: addition.is_deliverable,
                    weight: addition.weight.clamp(f64::MIN_POSITIVE, 1.0),
                });
                roles.len() - 1
            }
        };

        let role = &mut roles[position];
        role.is_deliverable |= addition.is_deliverable;
        if role.category.is_none() {
            role.category = addition.category.clone();
        }
        if term_key == canonical_key {
            return Ok(());
        }
        if is_acronym(term, ACRONYM_MIN_LEN, ACRONYM_MAX_LEN) {
            if !role.acronyms.iter().any(|a| a == term) {
                role.acronyms.push(term.to_string());
            }
        } else if !role
            .aliases
            .iter()
            .any(|a| normalize_role_text(a) == term_key)
        {
            role.aliases.push(term.to_string());
        }
        Ok(())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn roles(&self) -> &[KnownRole] {
        &self.roles
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn is_excluded(&self, normalized: &str) -> bool {
        self.exclusions.contains(normalized)
    }

    /// Category for a contextual term. Outer `None` means not contextual.
    pub fn contextual_category(&self, normalized: &str) -> Option<Option<&str>> {
        self.contextual.get(normalized).map(|c| c.as_deref())
    }

    /// Category for a role suffix word. Outer `None` means not a suffix.
    pub fn suffix_category(&self, word: &str) -> Option<Option<&str>> {
        self.suffixes
            .get(&word.to_lowercase())
            .map(|c| c.as_deref())
    }

    pub fn is_suffix(&self, word: &str) -> bool {
        self.suffixes.contains_key(&word.to_lowercase())
    }

    /// Resolve a surface form. Acronym-shaped text is looked up exactly in
    /// the acronym dictionary first; everything else by normalized text.
    pub fn resolve(&self, surface: &str) -> Option<RoleLookup<'_>> {
        let surface = surface.trim();
        if is_acronym(surface, ACRONYM_MIN_LEN, ACRONYM_MAX_LEN) {
            if let Some(indexes) = self.acronyms.get(surface) {
                return Some(self.lookup(indexes, MatchedBy::Acronym));
            }
        }
        let key = normalize_role_text(surface);
        let indexes = self.names.get(&key)?;
        let matched_by = if indexes.iter().any(|&i| self.roles[i].key() == key) {
            MatchedBy::Canonical
        } else {
            MatchedBy::Alias
        };
        Some(self.lookup(indexes, matched_by))
    }

    /// Roles an acronym expands to. Empty when unknown.
    pub fn expansions(&self, acronym: &str) -> SmallVec2<&KnownRole> {
        self.acronyms
            .get(acronym)
            .map(|idx| idx.iter().map(|&i| &self.roles[i]).collect())
            .unwrap_or_default()
    }

    fn lookup(&self, indexes: &SmallVec2<usize>, matched_by: MatchedBy) -> RoleLookup<'_> {
        RoleLookup {
            roles: indexes.iter().map(|&i| &self.roles[i]).collect(),
            matched_by,
        }
    }
}

fn push_unique(slot: &mut SmallVec2<usize>, idx: usize) {
    if !slot.contains(&idx) {
        slot.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_alias_and_acronym() {
        let lexicon = TechnicalLexicon::builtin().unwrap();
        let pm = lexicon.resolve("PM").unwrap();
        assert_eq!(pm.matched_by, MatchedBy::Acronym);
        assert_eq!(pm.unique().unwrap().canonical, "Project Manager");

        let alias = lexicon.resolve("tech lead").unwrap();
        assert_eq!(alias.matched_by, MatchedBy::Alias);
        assert_eq!(alias.unique().unwrap().canonical, "Technical Lead");

        assert!(lexicon.resolve("pm").is_none());
    }

    #[test]
    fn additions_extend_existing_roles() {
        let def = LexiconLoader::builtin().unwrap();
        let additions = vec![
            LexiconAddition::known_role("Proj Mgr", "Project Manager", None, false, 1.0),
            LexiconAddition::known_role("Flight Director", "Flight Director", Some("Operations".into()), true, 1.0),
            LexiconAddition::known_role("FD", "Flight Director", None, false, 1.0),
            LexiconAddition::exclusion("Mission Control"),
        ];
        let lexicon = TechnicalLexicon::build(&def, &additions, def.version + 1).unwrap();
        assert_eq!(lexicon.version(), def.version + 1);
        assert_eq!(
            lexicon.resolve("proj mgr").unwrap().unique().unwrap().canonical,
            "Project Manager"
        );
        let fd = lexicon.resolve("FD").unwrap();
        assert!(fd.unique().unwrap().is_deliverable);
        assert!(lexicon.is_excluded("mission control"));
    }

    #[test]
    fn ambiguous_acronyms_report_every_expansion() {
        let def = LexiconLoader::builtin().unwrap();
        let additions = vec![LexiconAddition::known_role(
            "PM",
            "Program Manager",
            None,
            false,
            1.0,
        )];
        let lexicon = TechnicalLexicon::build(&def, &additions, 2).unwrap();
        let lookup = lexicon.resolve("PM").unwrap();
        assert_eq!(lookup.roles.len(), 2);
        assert!(lookup.unique().is_none());
        assert_eq!(lookup.shared_category(), Some("Management"));
        assert_eq!(lexicon.expansions("PM").len(), 2);
    }
}
