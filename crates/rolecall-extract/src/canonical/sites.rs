//! Mention-site counting: overlapping spans in one paragraph are one site.

use rolecall_core::types::Span;

/// Number of disjoint sites after merging overlapping spans.
pub fn count_sites(spans: &mut [Span]) -> usize {
    spans.sort();
    let mut count = 0;
    let mut current_end: Option<usize> = None;
    for span in spans.iter() {
        match current_end {
            Some(end) if span.start < end => {
                current_end = Some(end.max(span.end));
            }
            _ => {
                count += 1;
                current_end = Some(span.end);
            }
        }
    }
    count
}
