use crate::{Atom, BoxError, Members, TagId, TaggedError};
use serde::{ser::SerializeStruct, Serialize};
use std::{
    borrow::Cow,
    error::Error as StdError,
    fmt::{Debug, Display},
    sync::Arc,
};

//===========================
// region:      --- TagMessage

/// Text a tag contributes to a rendered error message.
#[derive(Clone, PartialEq, Eq)]
pub(crate) enum TagMessage {
    /// Set directly, rendered verbatim.
    Explicit(Arc<str>),
    /// Computed from the member set at render time.
    Derived,
}

impl TagMessage {
    pub(crate) fn render<'a>(&'a self, members: &Members) -> Cow<'a, str> {
        match self {
            Self::Explicit(msg) => Cow::Borrowed(&**msg),
            Self::Derived => Cow::Owned(members.message()),
        }
    }
}

// endregion:   --- TagMessage

//===========================
// region:      --- TagSet

/// Anything that carries a canonical member set and can therefore be matched against a tag.
pub trait TagSet {
    fn members(&self) -> &Members;

    /// True if `self` is classified as `pattern`, i.e. every member of `pattern` is a
    /// member of `self`.
    ///
    /// Matching is directional: a union matches each of its components but a component does
    /// not match a larger union.
    fn matches<P: TagSet + ?Sized>(&self, pattern: &P) -> bool {
        self.members().contains_all(pattern.members())
    }

    /// Mutual containment of member sets.
    fn is_equivalent<P: TagSet + ?Sized>(&self, other: &P) -> bool {
        self.matches(other) && other.matches(self)
    }

    fn member_ids(&self) -> impl Iterator<Item = TagId> + '_ {
        self.members().ids()
    }
}

// endregion:   --- TagSet

//===========================
// region:      --- Tag

/// Classification marker for errors.
///
/// An atomic tag is created with [`Tag::new`] or [`Tag::anonymous`] and has a process-wide
/// unique identity. Tags combine into unions with [`Tag::union`]. Errors are classified by
/// wrapping them with [`Tag::wrap`] and friends, and tested with [`crate::has_tag`].
///
/// ```
/// use errtag::{has_tag, Tag, TrivialError};
///
/// let not_found = Tag::new("not found");
/// let err = not_found.wrap(TrivialError("no such user"));
///
/// assert!(has_tag(&err, &not_found));
/// assert_eq!(err.to_string(), "not found: no such user");
/// ```
#[derive(Clone)]
pub struct Tag {
    id: Option<TagId>,
    message: TagMessage,
    members: Members,
}

impl Tag {
    /// Creates an atomic tag with the given message.
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        let id = TagId::next();
        let message: Arc<str> = message.into();
        Self {
            id: Some(id),
            members: Members::single(Atom::new(id, message.clone())),
            message: TagMessage::Explicit(message),
        }
    }

    /// Creates an atomic tag without a message. Wrapping an error with it leaves the error's
    /// message and debug output unchanged.
    pub fn anonymous() -> Self {
        Self::new("")
    }

    /// Creates an atomic tag whose message is `parts` joined with `": "`.
    pub fn from_parts(parts: &[&str]) -> Self {
        Self::new(parts.join(": "))
    }

    /// Creates a tag whose members are the union of the members of `tags`.
    ///
    /// The result does not depend on the order or nesting of `tags`. Its message is derived
    /// from the members' messages.
    pub fn union<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Self {
        Self::from_members(Members::canonicalize(tags.into_iter().map(|t| &t.members)))
    }

    pub(crate) fn from_members(members: Members) -> Self {
        Self {
            id: None,
            message: TagMessage::Derived,
            members,
        }
    }

    /// Extends this tag's members with those of `tags`, keeping its identity and message.
    ///
    /// Only this value changes. Clones taken earlier, and unions or tagged errors that were
    /// built from it, keep the members they captured.
    pub fn include<'a>(&mut self, tags: impl IntoIterator<Item = &'a Tag>) -> &mut Self {
        let members = Members::canonicalize(
            std::iter::once(&self.members).chain(tags.into_iter().map(|t| &t.members)),
        );
        log::trace!(
            "tag {:?} extended from {} to {} members",
            self.id,
            self.members.len(),
            members.len()
        );
        self.members = members;
        self
    }

    /// Consuming form of [`Self::include`], convenient for initializing statics.
    pub fn including<'a>(mut self, tags: impl IntoIterator<Item = &'a Tag>) -> Self {
        self.include(tags);
        self
    }

    /// Identity of an atomic tag, `None` for unions.
    pub fn id(&self) -> Option<TagId> {
        self.id
    }

    pub fn is_atomic(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_explicit_message(&self) -> bool {
        matches!(self.message, TagMessage::Explicit(_))
    }

    /// Text this tag contributes to rendered error messages.
    pub fn message(&self) -> Cow<'_, str> {
        self.message.render(&self.members)
    }

    /// Wraps `err`, sharing this tag's members and message.
    pub fn wrap(&self, err: impl Into<BoxError>) -> TaggedError {
        TaggedError::new(self.message.clone(), self.members.clone(), err.into())
    }

    /// Wraps `err` with `message` in place of this tag's own message.
    pub fn wrap_with_message(
        &self,
        err: impl Into<BoxError>,
        message: impl Into<Arc<str>>,
    ) -> TaggedError {
        TaggedError::new(
            TagMessage::Explicit(message.into()),
            self.members.clone(),
            err.into(),
        )
    }

    /// Optional form of [`Self::wrap`]: tagging nothing yields nothing.
    pub fn tag<E: Into<BoxError>>(&self, err: Option<E>) -> Option<TaggedError> {
        err.map(|err| self.wrap(err))
    }

    /// Optional form of [`Self::wrap_with_message`].
    pub fn tag_with_message<E: Into<BoxError>>(
        &self,
        err: Option<E>,
        message: impl Into<Arc<str>>,
    ) -> Option<TaggedError> {
        err.map(|err| self.wrap_with_message(err, message))
    }
}

impl TagSet for Tag {
    fn members(&self) -> &Members {
        &self.members
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.message == other.message
            && (self.members.ptr_eq(&other.members) || self.members == other.members)
    }
}

impl Eq for Tag {}

impl Debug for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if cfg!(debug_assertions) {
            f.debug_struct("Tag")
                .field("id", &self.id)
                .field("message", &self.message())
                .field("members", &self.members)
                .finish()
        } else {
            f.debug_tuple("Tag").field(&self.message()).finish()
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl StdError for Tag {}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Tag", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("members", &self.members)?;
        state.end()
    }
}

// endregion:   --- Tag
