//! `tombola`: an insertion-ordered keyed collection with uniform random sampling.
//!
//! The centerpiece is [`Collection`], a thin layer over an insertion-ordered
//! map that adds:
//!
//! - `random_*`: uniform draws of values, keys, or whole entries, with or
//!   without replacement. Unique draws switch between a shuffle-based and a
//!   rejection-based index selection depending on how dense the request is
//!   relative to the collection (see [`sample`]).
//! - query operations (`filter`, `find`, `any`, `all`, `map`, `fold`,
//!   `reduce`) over the insertion-order iteration contract.
//! - structural operations (`equal`, `equal_deep`, `concat`, `into_chunks`)
//!   and positional accessors (`first*`, `last*`).
//!
//! Exposed modules:
//! - `collection`: the container type and its operations.
//! - `sample`: the index-selection algorithms, usable standalone.

#![forbid(unsafe_code)]

pub mod collection;
mod error;
pub mod sample;

pub use collection::{Collection, DeepEqualFn, DEFAULT_CHUNK_LEN};
pub use error::CollectionError;
pub use sample::{pick_indices, pick_indices_with_rng};
