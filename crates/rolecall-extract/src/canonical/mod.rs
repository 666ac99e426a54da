//! Canonicalizer: merges valid verdicts from one scan into `CanonicalRole`s.
//!
//! Every verdict gets an anchor key and verdicts sharing an anchor form one
//! role. The anchor is the normalized lexicon title when the lexicon knows
//! the term. Otherwise it is the normalized phrase an acronym was paired
//! with in the same document, or the normalized text itself. Verdicts are
//! sorted before anything else, so output never depends on input order.

pub mod sites;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rolecall_core::constants::{ACRONYM_MAX_LEN, ACRONYM_MIN_LEN, DEFAULT_SAMPLE_CONTEXT_CAP};
use rolecall_core::types::{
    is_acronym, normalize_role_text, CanonicalRole, Confidence, ReasonCode, RoleCandidateVerdict,
    Span,
};

use crate::lexicon::TechnicalLexicon;

pub struct Canonicalizer<'a> {
    lexicon: &'a TechnicalLexicon,
    sample_cap: usize,
}

impl<'a> Canonicalizer<'a> {
    pub fn new(lexicon: &'a TechnicalLexicon, sample_cap: usize) -> Self {
        Self {
            lexicon,
            sample_cap: sample_cap.max(1),
        }
    }

    pub fn with_defaults(lexicon: &'a TechnicalLexicon) -> Self {
        Self::new(lexicon, DEFAULT_SAMPLE_CONTEXT_CAP)
    }

    /// Merge the valid verdicts. Invalid ones are ignored. Output is sorted
    /// by canonical name.
    pub fn canonicalize(&self, verdicts: &[RoleCandidateVerdict]) -> Vec<CanonicalRole> {
        let mut valid: Vec<&RoleCandidateVerdict> = verdicts.iter().filter(|v| v.valid).collect();
        valid.sort_by(|a, b| compare_verdicts(a, b));

        let anchors = AnchorIndex::build(&valid);
        let mut clusters: BTreeMap<String, Vec<&RoleCandidateVerdict>> = BTreeMap::new();
        for verdict in &valid {
            let anchor = self.anchor_for(verdict, &anchors);
            clusters.entry(anchor).or_default().push(verdict);
        }

        let mut roles: Vec<CanonicalRole> = clusters
            .into_iter()
            .map(|(key, members)| self.merge_cluster(key, &members))
            .collect();
        roles.sort_by(|a, b| {
            a.canonical_name
                .cmp(&b.canonical_name)
                .then_with(|| a.key.cmp(&b.key))
        });
        roles
    }

    fn anchor_for(&self, verdict: &RoleCandidateVerdict, anchors: &AnchorIndex) -> String {
        let surface = verdict.candidate.surface_text.as_str();
        let document_id = verdict.candidate.document_id.as_str();
        let bare_acronym = verdict.candidate.origin.paired_acronym().is_none()
            && is_acronym(surface, ACRONYM_MIN_LEN, ACRONYM_MAX_LEN);
        if !bare_acronym {
            return base_anchor(verdict);
        }

        // A pair declared in this document outranks the lexicon.
        if let Some(phrases) = anchors.declared(document_id, surface) {
            if phrases.len() == 1 {
                if let Some(phrase) = phrases.iter().next() {
                    return phrase.clone();
                }
            }
        }
        if let Some(canonical) = &verdict.lexicon_canonical {
            return normalize_role_text(canonical);
        }

        // Ambiguous acronym: join the only expansion mentioned in this document.
        let expansions = self.lexicon.expansions(surface);
        if expansions.len() > 1 {
            let mentioned: Vec<String> = expansions
                .iter()
                .map(|r| r.key())
                .filter(|k| anchors.mentioned(document_id, k))
                .collect();
            if let [only] = mentioned.as_slice() {
                return only.clone();
            }
        }
        verdict.candidate.normalized_text.clone()
    }

    fn merge_cluster(&self, key: String, members: &[&RoleCandidateVerdict]) -> CanonicalRole {
        let lexicon_role = self
            .lexicon
            .resolve(&key)
            .and_then(|l| l.unique())
            .filter(|r| r.key() == key);

        let mut names: BTreeSet<&str> = members
            .iter()
            .map(|v| v.candidate.surface_text.as_str())
            .collect();
        names.extend(members.iter().filter_map(|v| v.lexicon_canonical.as_deref()));
        if let Some(role) = lexicon_role {
            names.insert(role.canonical.as_str());
        }
        let canonical_name = pick_name(&names, &key);
        let canonical_norm = normalize_role_text(&canonical_name);
        let aliases: BTreeSet<String> = members
            .iter()
            .flat_map(|v| {
                std::iter::once(v.candidate.surface_text.as_str())
                    .chain(v.candidate.origin.paired_acronym())
            })
            .filter(|s| normalize_role_text(s) != canonical_norm)
            .map(str::to_string)
            .collect();

        let mut by_paragraph: BTreeMap<(&str, usize), Vec<Span>> = BTreeMap::new();
        for v in members {
            by_paragraph
                .entry((v.candidate.document_id.as_str(), v.candidate.paragraph_index))
                .or_default()
                .push(v.candidate.char_span);
        }
        let mut document_mentions: BTreeMap<String, usize> = BTreeMap::new();
        for ((document_id, _), spans) in by_paragraph.iter_mut() {
            *document_mentions.entry(document_id.to_string()).or_default() +=
                sites::count_sites(spans);
        }
        let mention_count = document_mentions.values().sum();
        let document_ids = document_mentions.keys().cloned().collect();

        let mut sample_contexts: Vec<String> = Vec::new();
        for v in members {
            if sample_contexts.len() >= self.sample_cap {
                break;
            }
            let context = v.candidate.context_sentence.trim();
            if !context.is_empty() && !sample_contexts.iter().any(|c| c == context) {
                sample_contexts.push(context.to_string());
            }
        }

        let confidence = members
            .iter()
            .fold(Confidence::ZERO, |acc, v| acc.max(v.confidence));

        let category = lexicon_role
            .and_then(|r| r.category.clone())
            .or_else(|| pick_category(members, true))
            .or_else(|| pick_category(members, false));

        let is_deliverable =
            lexicon_role.is_some_and(|r| r.is_deliverable) || members.iter().any(|v| v.is_deliverable);

        CanonicalRole {
            key,
            canonical_name,
            aliases,
            category,
            is_deliverable,
            mention_count,
            document_ids,
            document_mentions,
            sample_contexts,
            confidence,
        }
    }
}

/// Per-document pair declarations and mentioned anchors.
struct AnchorIndex {
    declared: BTreeMap<(String, String), BTreeSet<String>>,
    mentioned: BTreeSet<(String, String)>,
}

impl AnchorIndex {
    fn build(verdicts: &[&RoleCandidateVerdict]) -> Self {
        let mut declared: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();
        let mut mentioned = BTreeSet::new();
        for v in verdicts {
            let document_id = v.candidate.document_id.clone();
            if let Some(acronym) = v.candidate.origin.paired_acronym() {
                declared
                    .entry((document_id.clone(), acronym.to_string()))
                    .or_default()
                    .insert(base_anchor(v));
            }
            if !is_acronym(&v.candidate.surface_text, ACRONYM_MIN_LEN, ACRONYM_MAX_LEN) {
                mentioned.insert((document_id, base_anchor(v)));
            }
        }
        Self {
            declared,
            mentioned,
        }
    }

    fn declared(&self, document_id: &str, acronym: &str) -> Option<&BTreeSet<String>> {
        self.declared
            .get(&(document_id.to_string(), acronym.to_string()))
    }

    fn mentioned(&self, document_id: &str, anchor: &str) -> bool {
        self.mentioned
            .contains(&(document_id.to_string(), anchor.to_string()))
    }
}

fn base_anchor(verdict: &RoleCandidateVerdict) -> String {
    verdict
        .lexicon_canonical
        .as_deref()
        .map(normalize_role_text)
        .unwrap_or_else(|| verdict.candidate.normalized_text.clone())
}

/// Longest name that normalizes to `key`, so the stored name always finds
/// its row again. Longer variants (a registered alias such as "Programme
/// Manager" for "Program Manager") stay aliases. BTreeSet order makes the
/// first of equal length the lexicographically smallest.
fn pick_name(names: &BTreeSet<&str>, key: &str) -> String {
    longest(names.iter().copied().filter(|n| normalize_role_text(n) == key))
        .or_else(|| longest(names.iter().copied()))
        .unwrap_or(key)
        .to_string()
}

fn longest<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    names.fold(None, |best, name| match best {
        Some(b) if b.chars().count() >= name.chars().count() => Some(b),
        _ => Some(name),
    })
}

/// Smallest category among known-role verdicts (or among all verdicts).
fn pick_category(members: &[&RoleCandidateVerdict], known_only: bool) -> Option<String> {
    members
        .iter()
        .filter(|v| !known_only || v.reason_code == ReasonCode::KnownRole)
        .filter_map(|v| v.category.clone())
        .min()
}

/// Total order over verdicts: position first, then every field that could
/// still differ.
fn compare_verdicts(a: &RoleCandidateVerdict, b: &RoleCandidateVerdict) -> Ordering {
    let (ca, cb) = (&a.candidate, &b.candidate);
    ca.document_id
        .cmp(&cb.document_id)
        .then(ca.paragraph_index.cmp(&cb.paragraph_index))
        .then(ca.char_span.cmp(&cb.char_span))
        .then_with(|| ca.normalized_text.cmp(&cb.normalized_text))
        .then_with(|| ca.surface_text.cmp(&cb.surface_text))
        .then_with(|| ca.origin.rule_id().cmp(cb.origin.rule_id()))
        .then_with(|| ca.origin.paired_acronym().cmp(&cb.origin.paired_acronym()))
        .then_with(|| ca.context_sentence.cmp(&cb.context_sentence))
        .then_with(|| a.confidence.value().total_cmp(&b.confidence.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolecall_core::types::{CandidateOrigin, NlpSource, PatternRule, RoleCandidate};

    fn verdict(doc: &str, surface: &str, span: (usize, usize), origin: CandidateOrigin, lexicon: Option<&str>) -> RoleCandidateVerdict {
        RoleCandidateVerdict {
            candidate: RoleCandidate {
                surface_text: surface.into(),
                normalized_text: normalize_role_text(surface),
                document_id: doc.into(),
                paragraph_index: 0,
                char_span: Span::new(span.0, span.1),
                origin,
                context_sentence: format!("{surface} context"),
                in_table: false,
                in_responsibility_matrix: false,
            },
            valid: true,
            confidence: Confidence::new(0.9),
            reason_code: ReasonCode::RoleSuffix,
            category: None,
            lexicon_canonical: lexicon.map(str::to_string),
            is_deliverable: false,
        }
    }

    fn gazetteer(span: (usize, usize)) -> CandidateOrigin {
        CandidateOrigin::Nlp {
            source: NlpSource::Gazetteer,
            label: "acronym".into(),
            parse_head: None,
            span: Span::new(span.0, span.1),
        }
    }

    fn pair(span: (usize, usize), acronym: &str) -> CandidateOrigin {
        CandidateOrigin::Pattern {
            rule: PatternRule::AcronymPair,
            span: Span::new(span.0, span.1),
            paired_acronym: Some(acronym.into()),
        }
    }

    #[test]
    fn declared_pair_links_unknown_acronym() {
        let lexicon = TechnicalLexicon::builtin().unwrap();
        let verdicts = vec![
            verdict("d", "Flight Readiness Lead", (0, 27), pair((0, 27), "FRL"), None),
            verdict("d", "FRL", (40, 43), gazetteer((40, 43)), None),
        ];
        let roles = Canonicalizer::with_defaults(&lexicon).canonicalize(&verdicts);
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].canonical_name, "Flight Readiness Lead");
        assert!(roles[0].aliases.contains("FRL"));
        assert_eq!(roles[0].mention_count, 2);
    }

    #[test]
    fn lexicon_title_participates_in_name() {
        let lexicon = TechnicalLexicon::builtin().unwrap();
        let verdicts = vec![verdict("d", "PM", (0, 2), gazetteer((0, 2)), Some("Project Manager"))];
        let roles = Canonicalizer::with_defaults(&lexicon).canonicalize(&verdicts);
        assert_eq!(roles[0].canonical_name, "Project Manager");
        assert_eq!(roles[0].key, "project manager");
        assert_eq!(roles[0].category.as_deref(), Some("Management"));
    }

    #[test]
    fn contexts_are_capped_and_distinct() {
        let lexicon = TechnicalLexicon::builtin().unwrap();
        let verdicts: Vec<_> = (0..8)
            .map(|i| {
                let mut v = verdict("d", "Thermal Analyst", (i * 20, i * 20 + 15), gazetteer((i * 20, i * 20 + 15)), None);
                v.candidate.context_sentence = format!("sentence {}", i % 6);
                v
            })
            .collect();
        let roles = Canonicalizer::new(&lexicon, 5).canonicalize(&verdicts);
        assert_eq!(roles[0].sample_contexts.len(), 5);
        assert_eq!(roles[0].sample_contexts[0], "sentence 0");
        assert_eq!(roles[0].mention_count, 8);
    }

    #[test]
    fn longer_alias_does_not_replace_the_title() {
        let lexicon = TechnicalLexicon::builtin().unwrap();
        let verdicts = vec![verdict(
            "d",
            "Programme Manager",
            (4, 21),
            gazetteer((4, 21)),
            Some("Program Manager"),
        )];
        let roles = Canonicalizer::with_defaults(&lexicon).canonicalize(&verdicts);
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].canonical_name, "Program Manager");
        assert_eq!(roles[0].key, normalize_role_text(&roles[0].canonical_name));
        assert!(roles[0].aliases.contains("Programme Manager"));
    }
}
