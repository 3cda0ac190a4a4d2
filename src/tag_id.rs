use serde::Serialize;
use std::{
    fmt::{Debug, Display},
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_TAG_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide identity of an atomic [`crate::Tag`].
///
/// Ids are handed out in creation order and are never reused, so ordering by id gives a total
/// order that is stable for the lifetime of the process.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TagId(u64);

impl TagId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TAG_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Debug for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("TagId({})", self.0))
    }
}

impl Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}
