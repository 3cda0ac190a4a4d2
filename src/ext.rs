use crate::{BoxError, Tag, TaggedError};
use std::sync::Arc;

/// Tags the error side of a `Result`.
///
/// ```
/// use errtag::{has_tag, Tag, TagResultExt, TrivialError};
///
/// let retryable = Tag::anonymous();
/// let res: Result<(), TrivialError> = Err(TrivialError("connection reset"));
/// let err = res.tag_err(&retryable).unwrap_err();
///
/// assert!(has_tag(&err, &retryable));
/// assert_eq!(err.to_string(), "connection reset");
/// ```
pub trait TagResultExt<T> {
    fn tag_err(self, tag: &Tag) -> Result<T, TaggedError>;

    fn tag_err_with_message(
        self,
        tag: &Tag,
        message: impl Into<Arc<str>>,
    ) -> Result<T, TaggedError>;

    fn with_tags_err<'a>(self, tags: impl IntoIterator<Item = &'a Tag>)
        -> Result<T, TaggedError>;
}

impl<T, E> TagResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn tag_err(self, tag: &Tag) -> Result<T, TaggedError> {
        self.map_err(|err| tag.wrap(err))
    }

    fn tag_err_with_message(
        self,
        tag: &Tag,
        message: impl Into<Arc<str>>,
    ) -> Result<T, TaggedError> {
        self.map_err(|err| tag.wrap_with_message(err, message))
    }

    fn with_tags_err<'a>(
        self,
        tags: impl IntoIterator<Item = &'a Tag>,
    ) -> Result<T, TaggedError> {
        self.map_err(|err| Tag::union(tags).wrap(err))
    }
}
