//! Classification tags for errors.
//!
//! A [`Tag`] is an opaque identity. Errors wrapped with a tag (see [`Tag::wrap`],
//! [`with_tags`]) can later be tested with [`has_tag`], no matter how many other layers were
//! added around them. Tags compose into unions whose identity depends only on the set of
//! atomic tags they contain.

//===========================
// region:      --- modules

mod box_error;
mod chain;
pub mod common;
mod ext;
mod members;
mod tag;
mod tag_id;
mod tagged;
mod trivial;

// endregion:   --- modules

//===========================
// region:      --- flattened

pub use box_error::*;
pub use chain::*;
pub use ext::*;
pub use members::*;
pub use tag::*;
pub use tag_id::*;
pub use tagged::*;
pub use trivial::*;

// endregion:   --- flattened
