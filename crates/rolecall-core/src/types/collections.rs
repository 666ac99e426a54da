//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for alias lists (usually one or two entries).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
