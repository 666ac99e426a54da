//! Multi-pattern lookup of every lexicon title, alias and acronym.
//!
//! Titles and aliases match ASCII case-insensitively; acronyms match
//! case-sensitively so "pm" in "3 pm" never reads as "PM". Only whole-word
//! matches are reported.

use aho_corasick::{AhoCorasick, MatchKind};

use rolecall_core::errors::LexiconError;
use rolecall_core::types::Span;

/// What kind of lexicon term produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Canonical,
    Alias,
    Acronym,
}

impl TermKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Canonical => "known_role",
            Self::Alias => "alias",
            Self::Acronym => "acronym",
        }
    }
}

/// One whole-word match in a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GazetteerHit {
    pub span: Span,
    pub kind: TermKind,
}

#[derive(Debug, Clone)]
struct Automaton {
    matcher: AhoCorasick,
    kinds: Vec<TermKind>,
}

impl Automaton {
    fn build(terms: Vec<(String, TermKind)>, case_insensitive: bool) -> Result<Option<Self>, LexiconError> {
        if terms.is_empty() {
            return Ok(None);
        }
        let (patterns, kinds): (Vec<String>, Vec<TermKind>) = terms.into_iter().unzip();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(case_insensitive)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| LexiconError::InvalidPattern(format!("gazetteer: {e}")))?;
        Ok(Some(Self { matcher, kinds }))
    }

    fn find_into(&self, text: &str, hits: &mut Vec<GazetteerHit>) {
        for m in self.matcher.find_iter(text) {
            if is_whole_word(text, m.start(), m.end()) {
                hits.push(GazetteerHit {
                    span: Span::new(m.start(), m.end()),
                    kind: self.kinds[m.pattern().as_usize()],
                });
            }
        }
    }
}

/// Compiled gazetteer for one lexicon snapshot.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    words: Option<Automaton>,
    acronyms: Option<Automaton>,
}

impl Gazetteer {
    /// Build from `(term, kind)` pairs. Acronym terms go to the
    /// case-sensitive automaton, everything else to the folded one.
    pub fn build<I>(terms: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (String, TermKind)>,
    {
        let mut words = Vec::new();
        let mut acronyms = Vec::new();
        for (term, kind) in terms {
            let term = term.trim().to_string();
            if term.is_empty() {
                continue;
            }
            match kind {
                TermKind::Acronym => acronyms.push((term, kind)),
                _ => words.push((term, kind)),
            }
        }
        // Identical terms from different entries only need one pattern.
        words.sort_by(|a, b| a.0.to_ascii_lowercase().cmp(&b.0.to_ascii_lowercase()));
        words.dedup_by(|a, b| a.0.eq_ignore_ascii_case(&b.0));
        acronyms.sort_by(|a, b| a.0.cmp(&b.0));
        acronyms.dedup_by(|a, b| a.0 == b.0);

        Ok(Self {
            words: Automaton::build(words, true)?,
            acronyms: Automaton::build(acronyms, false)?,
        })
    }

    /// All whole-word hits in `text`, ordered by position.
    pub fn find(&self, text: &str) -> Vec<GazetteerHit> {
        let mut hits = Vec::new();
        if let Some(words) = &self.words {
            words.find_into(text, &mut hits);
        }
        if let Some(acronyms) = &self.acronyms {
            acronyms.find_into(text, &mut hits);
        }
        hits.sort_by_key(|h| (h.span.start, h.span.end));
        hits
    }
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}
