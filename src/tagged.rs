use crate::{tag::TagMessage, BoxError, Members, StdBoxError, Tag, TagSet};
use serde::{ser::SerializeStruct, Serialize};
use std::{
    borrow::Cow,
    error::Error as StdError,
    fmt::{Debug, Display},
    sync::Arc,
};

//===========================
// region:      --- TaggedError

/// An error classified by a tag.
///
/// Carries the member set and message of the tag it was created with, and owns the wrapped
/// cause. `Display` prefixes the cause's message with the tag's message, `Debug` prefixes the
/// cause's debug output, and `source` returns the cause. A tag without a message is
/// therefore invisible in both outputs.
///
/// Because `Display` already contains the cause, printers that append every `source` in the
/// chain (anyhow's `{:#}`, for instance) repeat the cause's text once per tag layer. Use
/// [`crate::error_recursive_msg`] for a chain rendering where each layer appears once.
pub struct TaggedError {
    message: TagMessage,
    members: Members,
    cause: StdBoxError,
}

impl TaggedError {
    pub(crate) fn new(message: TagMessage, members: Members, cause: BoxError) -> Self {
        Self {
            message,
            members,
            cause: StdBoxError(cause),
        }
    }

    /// Text this layer contributes in front of the cause's message.
    pub fn message(&self) -> Cow<'_, str> {
        self.message.render(&self.members)
    }

    pub fn has_explicit_message(&self) -> bool {
        matches!(self.message, TagMessage::Explicit(_))
    }

    /// Replaces this layer's message, keeping members and cause.
    pub fn with_message(self, message: impl Into<Arc<str>>) -> Self {
        Self {
            message: TagMessage::Explicit(message.into()),
            ..self
        }
    }

    /// Tag carrying the same member set, usable as a pattern or to tag further errors.
    pub fn to_tag(&self) -> Tag {
        Tag::from_members(self.members.clone())
    }

    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_dyn_std_error()
    }

    pub fn downcast_cause_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.cause.0.downcast_ref::<T>()
    }

    pub fn into_cause(self) -> BoxError {
        self.cause.into_inner()
    }
}

impl TagSet for TaggedError {
    fn members(&self) -> &Members {
        &self.members
    }
}

impl Display for TaggedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let own = self.message();
        if !own.is_empty() {
            f.write_str(&own)?;
            f.write_str(": ")?;
        }
        Display::fmt(&self.cause, f)
    }
}

impl Debug for TaggedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let own = self.message();
        if !own.is_empty() {
            f.write_str(&own)?;
            f.write_str(": ")?;
        }
        Debug::fmt(&self.cause, f)
    }
}

impl StdError for TaggedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_dyn_std_error())
    }
}

impl Serialize for TaggedError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("TaggedError", 3)?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("members", &self.members)?;
        state.serialize_field("source", &self.cause)?;
        state.end()
    }
}

// endregion:   --- TaggedError

//===========================
// region:      --- functions

/// Tags `err` with the union of `tags`. Tagging nothing yields nothing.
///
/// The order of `tags` does not matter: any permutation produces an equivalent tagged error
/// with the same message.
pub fn with_tags<'a, E: Into<BoxError>>(
    err: Option<E>,
    tags: impl IntoIterator<Item = &'a Tag>,
) -> Option<TaggedError> {
    let err = err?;
    Some(Tag::union(tags).wrap(err))
}

/// Like [`with_tags`], with `message` in place of the message derived from `tags`.
pub fn with_tags_and_message<'a, E: Into<BoxError>>(
    err: Option<E>,
    message: impl Into<Arc<str>>,
    tags: impl IntoIterator<Item = &'a Tag>,
) -> Option<TaggedError> {
    with_tags(err, tags).map(|tagged| tagged.with_message(message))
}

// endregion:   --- functions

#[cfg(test)]
mod test {
    use super::{with_tags, with_tags_and_message};
    use crate::{Tag, TagSet, TrivialError};
    use std::{backtrace::Backtrace, error::Error as StdError, fmt::Debug};

    struct TracedError {
        msg: &'static str,
        backtrace: Backtrace,
    }

    impl TracedError {
        fn new(msg: &'static str) -> Self {
            Self {
                msg,
                backtrace: Backtrace::force_capture(),
            }
        }
    }

    impl Debug for TracedError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.msg)?;
            f.write_str("\n")?;
            std::fmt::Display::fmt(&self.backtrace, f)
        }
    }

    impl std::fmt::Display for TracedError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl StdError for TracedError {}

    #[test]
    fn test_message() {
        let class = Tag::new("class message");
        let tagged = class.wrap(TrivialError("some message"));

        assert_eq!(tagged.to_string(), "class message: some message");
    }

    #[test]
    fn test_message_no_class() {
        let class = Tag::anonymous();
        let base = TracedError::new("some message");
        let base_display = base.to_string();
        let base_debug = format!("{base:?}");

        let tagged = class.wrap(base);

        assert_eq!(tagged.to_string(), base_display);
        assert_eq!(format!("{tagged:?}"), base_debug);
    }

    #[test]
    fn test_debug_keeps_trace() {
        let class = Tag::new("class message");
        let base = TracedError::new("some message");
        let base_debug = format!("{base:?}");

        let tagged = class.wrap(base);

        assert_eq!(format!("{tagged:?}"), format!("class message: {base_debug}"));
    }

    #[test]
    fn test_with_message() {
        let class = Tag::new("class message");
        let tagged = class.wrap_with_message(TrivialError("some message"), "new message");

        assert_eq!(tagged.to_string(), "new message: some message");
        assert!(tagged.matches(&class));

        let anon = Tag::anonymous();
        let tagged = anon.wrap_with_message(TrivialError("some message"), "new message");

        assert_eq!(tagged.to_string(), "new message: some message");
        assert!(tagged.matches(&anon));
    }

    #[test]
    fn test_wrapping_none() {
        let class = Tag::new("class message");

        assert!(class.tag(None::<TrivialError>).is_none());
        assert!(class
            .tag_with_message(None::<TrivialError>, "new message")
            .is_none());
        assert!(with_tags(None::<TrivialError>, [&class]).is_none());
        assert!(with_tags_and_message(None::<TrivialError>, "m", [&class]).is_none());
    }

    #[test]
    fn test_cause() {
        let class = Tag::new("class message");
        let base = TrivialError("some message");
        let tagged = class.tag(Some(base.clone())).unwrap();

        assert_eq!(tagged.downcast_cause_ref::<TrivialError>(), Some(&base));
        assert_eq!(
            tagged
                .source()
                .and_then(|e| e.downcast_ref::<TrivialError>()),
            Some(&base)
        );
        assert_eq!(tagged.cause().to_string(), "some message");

        let inner = tagged.into_cause().downcast::<TrivialError>().unwrap();
        assert_eq!(*inner, base);
    }

    #[test]
    fn test_members_are_shared() {
        let union = Tag::union([&Tag::new("a"), &Tag::new("b")]);
        let tagged = union.wrap(TrivialError("some error"));

        assert!(tagged.members().ptr_eq(union.members()));
    }

    #[test]
    fn test_with_tags() {
        let red = Tag::new("red tag");
        let blue = Tag::new("blue tag");

        let rb = with_tags(Some(TrivialError("some error")), [&red, &blue]).unwrap();
        let br = with_tags(Some(TrivialError("some error")), [&blue, &red]).unwrap();

        assert_eq!(
            rb.member_ids().collect::<Vec<_>>(),
            vec![red.id().unwrap(), blue.id().unwrap()]
        );
        assert!(rb.is_equivalent(&br));
        assert!(rb.matches(&red));
        assert!(rb.matches(&blue));
        assert_eq!(rb.to_string(), "red tag: blue tag: some error");
        assert_eq!(br.to_string(), rb.to_string());
    }

    #[test]
    fn test_with_tags_and_message() {
        let red = Tag::new("red tag");
        let blue = Tag::new("blue tag");

        let tagged =
            with_tags_and_message(Some(TrivialError("some error")), "message", [&red, &blue])
                .unwrap();

        assert!(tagged.has_explicit_message());
        assert!(tagged.matches(&Tag::union([&blue, &red])));
        assert_eq!(tagged.to_string(), "message: some error");
    }

    #[test]
    fn test_to_tag() {
        let red = Tag::new("red tag");
        let blue = Tag::new("blue tag");
        let tagged = with_tags(Some(TrivialError("some error")), [&red, &blue]).unwrap();

        let pattern = tagged.to_tag();
        assert_eq!(pattern, Tag::union([&red, &blue]));

        let again = pattern.wrap(TrivialError("other error"));
        assert!(again.is_equivalent(&tagged));
    }

    #[test]
    fn test_serialize() {
        let red = Tag::new("red tag");
        let id = red.id().unwrap().value();
        let tagged = red.wrap(TrivialError("some error"));

        assert_eq!(
            serde_json::to_value(&tagged).unwrap(),
            serde_json::json!({
                "message": "red tag",
                "members": [id],
                "source": "some error",
            })
        );
    }

    #[test]
    fn test_serialize_nested_layers() {
        let red = Tag::new("red tag");
        let blue = Tag::new("blue tag");
        let tagged = blue.wrap(red.wrap(TrivialError("disk full")));

        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(json["message"], "blue tag");
        assert_eq!(json["source"], "red tag, source_msg=[disk full]");
    }
}
