//! Trait seams: the NLP annotation collaborator, the automated write
//! surface, and cooperative cancellation.

pub mod annotator;
pub mod cancellation;
pub mod sink;

pub use annotator::{
    AnnotationError, EntityAnnotation, SentenceAnnotation, SentenceAnnotator, SubjectAnnotation,
};
pub use cancellation::{Cancellable, CancellationToken};
pub use sink::SightingSink;
