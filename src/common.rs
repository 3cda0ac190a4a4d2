//! [`Tag`] instances that are commonly used.
//!
//! These tags carry no message, so tagging an error with them changes its classification
//! without changing how it is displayed.

use crate::Tag;
use once_cell::sync::Lazy;

pub static INTERNAL_TAG: Lazy<Tag> = Lazy::new(Tag::anonymous);

pub static RUNTIME_TAG: Lazy<Tag> = Lazy::new(Tag::anonymous);

pub static VALIDATION_TAG: Lazy<Tag> = Lazy::new(Tag::anonymous);

pub static UNEXPECTED_TAG: Lazy<Tag> = Lazy::new(Tag::anonymous);
