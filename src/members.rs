use crate::TagId;
use serde::{ser::SerializeSeq, Serialize};
use std::{
    cmp::Ordering,
    collections::HashSet,
    fmt::Debug,
    hash::{Hash, Hasher},
    sync::Arc,
};

//===========================
// region:      --- Atom

/// Entry of a member set: the identity of an atomic tag together with its message.
///
/// Comparisons only look at the identity. Two atomic tags created with the same message are
/// distinct atoms.
#[derive(Clone)]
pub struct Atom {
    id: TagId,
    message: Arc<str>,
}

impl Atom {
    pub(crate) fn new(id: TagId, message: Arc<str>) -> Self {
        Self { id, message }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Atom {}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Atom({}, {:?})", self.id, self.message))
    }
}

// endregion:   --- Atom

//===========================
// region:      --- Members

/// Canonical member set of a tag: atoms without duplicates, sorted by [`TagId`].
///
/// The backing slice is shared, so tagging an error with a tag does not copy its members.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Members(Arc<[Atom]>);

impl Members {
    pub(crate) fn single(atom: Atom) -> Self {
        Self(Arc::from(vec![atom]))
    }

    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Reduces a collection of member sets to canonical form.
    ///
    /// Member sets only ever hold atoms, so flattening a nested union amounts to visiting its
    /// atoms. The seen-set keeps the first occurrence of every identity; the survivors are
    /// then sorted by identity, which makes the result independent of argument order and
    /// nesting.
    pub fn canonicalize<'a>(sets: impl IntoIterator<Item = &'a Members>) -> Members {
        let mut sets = sets.into_iter().peekable();
        let Some(first) = sets.next() else {
            return Self::empty();
        };
        if sets.peek().is_none() {
            // a member set is canonical by construction
            return first.clone();
        }

        let mut seen = HashSet::new();
        let mut atoms = Vec::new();
        let mut visited = 0;
        for set in std::iter::once(first).chain(sets) {
            for atom in set.iter() {
                visited += 1;
                if seen.insert(atom.id) {
                    atoms.push(atom.clone());
                }
            }
        }
        atoms.sort_unstable();

        log::trace!("canonicalized {} atoms into {} members", visited, atoms.len());

        Self(atoms.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.0.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = TagId> + '_ {
        self.0.iter().map(Atom::id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: TagId) -> bool {
        self.0.binary_search_by_key(&id, Atom::id).is_ok()
    }

    /// True iff every member of `other` is also a member of `self`.
    ///
    /// Both sides are sorted by identity, so a single merge pass suffices. The members of
    /// `other` need not form a contiguous run inside `self`.
    pub fn contains_all(&self, other: &Members) -> bool {
        if other.len() > self.len() {
            return false;
        }

        let mut mine = self.0.iter();
        'outer: for wanted in other.0.iter() {
            for atom in mine.by_ref() {
                match atom.id.cmp(&wanted.id) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// Non-empty member messages joined with `": "`, in canonical order.
    pub fn message(&self) -> String {
        let mut buf = String::new();
        for atom in self.0.iter().filter(|a| !a.message.is_empty()) {
            if !buf.is_empty() {
                buf.push_str(": ");
            }
            buf.push_str(&atom.message);
        }
        buf
    }

    pub(crate) fn ptr_eq(&self, other: &Members) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for Members {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl Serialize for Members {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for id in self.ids() {
            seq.serialize_element(&id)?;
        }
        seq.end()
    }
}

// endregion:   --- Members
