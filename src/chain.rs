use crate::{Tag, TagSet, TaggedError};
use std::error::Error as StdError;

//===========================
// region:      --- chain walking

struct It<'a> {
    curr_source: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for It<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let err = self.curr_source?;
        self.curr_source = err.source();
        Some(err)
    }
}

/// Iterates over `err` followed by its chain of sources. Tag layers are traversed like any
/// other error.
pub fn error_chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    It {
        curr_source: Some(err),
    }
}

/// Last error in the chain of `err`, i.e. the original error below all wrapping layers.
pub fn root_cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    error_chain(err).last().unwrap_or(err)
}

/// Renders `err` and its sources as `msg, source_msg=[msg, source_msg=[...]]`.
///
/// A [`TaggedError`] layer contributes only its own message, since its `Display` already
/// includes the cause; layers with an empty message are left out.
pub fn error_recursive_msg(err: &(dyn StdError + 'static)) -> String {
    let mut buf = String::new();
    let mut closing_buf = String::new();
    let mut first = true;

    for item in error_chain(err) {
        let msg = match item.downcast_ref::<TaggedError>() {
            Some(tagged) => tagged.message().into_owned(),
            None => item.to_string(),
        };
        if msg.is_empty() && item.is::<TaggedError>() {
            continue;
        }
        if !first {
            buf.push_str(", source_msg=[");
            closing_buf.push(']');
        }
        first = false;
        buf.push_str(&msg);
    }

    buf.push_str(&closing_buf);
    buf
}

// endregion:   --- chain walking

//===========================
// region:      --- matching

/// True if any layer in the chain of `err` is classified as `pattern`.
///
/// Tagged errors and bare [`Tag`]s in the chain are tested with [`TagSet::matches`]; any other
/// error never matches. Context layers added by other libraries are skipped over as long as
/// they expose their cause through `source`.
///
/// Each layer is tested on its own; member sets of different layers are not merged. An error
/// tagged with `red` and then wrapped with `blue` matches `red` and `blue`, but not
/// `Tag::union([&red, &blue])`. Tag with the union in a single layer to match it.
pub fn has_tag<P: TagSet + ?Sized>(err: &(dyn StdError + 'static), pattern: &P) -> bool {
    error_chain(err).any(|layer| {
        if let Some(tagged) = layer.downcast_ref::<TaggedError>() {
            tagged.matches(pattern)
        } else if let Some(tag) = layer.downcast_ref::<Tag>() {
            tag.matches(pattern)
        } else {
            false
        }
    })
}

/// Method form of [`has_tag`].
pub trait HasTag {
    fn has_tag<P: TagSet + ?Sized>(&self, pattern: &P) -> bool;
}

impl<T: StdError + 'static> HasTag for T {
    fn has_tag<P: TagSet + ?Sized>(&self, pattern: &P) -> bool {
        has_tag(self, pattern)
    }
}

impl HasTag for dyn StdError + 'static {
    fn has_tag<P: TagSet + ?Sized>(&self, pattern: &P) -> bool {
        has_tag(self, pattern)
    }
}

impl HasTag for dyn StdError + Send + Sync + 'static {
    fn has_tag<P: TagSet + ?Sized>(&self, pattern: &P) -> bool {
        has_tag(self, pattern)
    }
}

// endregion:   --- matching
