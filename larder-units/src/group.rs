//! Alternative and combined quantity groups

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::{PlainQuantity, Quantity};

/// Alternative expressions of one physical amount ("1 cup | 236 ml")
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AndGroup<T>")]
pub struct OrGroup<T> {
    entries: Vec<T>,
}

impl<T> OrGroup<T> {
    /// `None` when `entries` is empty
    pub fn new(entries: Vec<T>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(OrGroup { entries })
        }
    }

    pub fn single(entry: T) -> Self {
        OrGroup { entries: vec![entry] }
    }

    /// `first` followed by `rest`
    pub fn with_rest(first: T, rest: impl IntoIterator<Item = T>) -> Self {
        let mut entries = vec![first];
        entries.extend(rest);
        OrGroup { entries }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn first(&self) -> &T {
        &self.entries[0]
    }
}

impl<T> TryFrom<AndGroup<T>> for OrGroup<T> {
    type Error = &'static str;

    fn try_from(group: AndGroup<T>) -> Result<Self, Self::Error> {
        OrGroup::new(group.entries).ok_or("an alternative group needs at least one entry")
    }
}

/// Distinct amounts reported separately
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndGroup<T> {
    pub entries: Vec<T>,
}

impl<T> AndGroup<T> {
    pub fn new(entries: Vec<T>) -> Self {
        AndGroup { entries }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Group<T> {
    Or(OrGroup<T>),
    And(AndGroup<T>),
}

impl<T> Group<T> {
    pub fn entries(&self) -> &[T] {
        match self {
            Group::Or(g) => g.entries(),
            Group::And(g) => &g.entries,
        }
    }
}

/// One ingredient mention as handed over by the markup parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mention {
    Quantity(Quantity),
    Or(OrGroup<Quantity>),
}

impl Mention {
    /// The mention's quantities; a bare quantity is a one-entry slice
    pub fn entries(&self) -> &[Quantity] {
        match self {
            Mention::Quantity(q) => std::slice::from_ref(q),
            Mention::Or(g) => g.entries(),
        }
    }
}

impl From<Quantity> for Mention {
    fn from(q: Quantity) -> Self {
        Mention::Quantity(q)
    }
}

impl From<OrGroup<Quantity>> for Mention {
    fn from(g: OrGroup<Quantity>) -> Self {
        Mention::Or(g)
    }
}

/// Result of simplification: a plain quantity or a nested group of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Simplified {
    Quantity(PlainQuantity),
    Group(Group<Simplified>),
}

impl Simplified {
    pub fn as_quantity(&self) -> Option<&PlainQuantity> {
        match self {
            Simplified::Quantity(q) => Some(q),
            Simplified::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group<Simplified>> {
        match self {
            Simplified::Quantity(_) => None,
            Simplified::Group(g) => Some(g),
        }
    }

    /// Every plain quantity, depth first
    pub fn quantities(&self) -> Vec<&PlainQuantity> {
        match self {
            Simplified::Quantity(q) => vec![q],
            Simplified::Group(g) => g.entries().iter().flat_map(|s| s.quantities()).collect(),
        }
    }

    /// Back to parser input, for feeding a total into another computation
    ///
    /// `None` for an `AndGroup`, which has no single-mention form.
    pub fn to_mention(&self) -> Option<Mention> {
        match self {
            Simplified::Quantity(q) => Some(Mention::Quantity(q.clone().into())),
            Simplified::Group(Group::Or(g)) => {
                let entries = g
                    .entries()
                    .iter()
                    .map(|s| s.as_quantity().map(|q| Quantity::from(q.clone())))
                    .collect::<Option<Vec<_>>>()?;
                OrGroup::new(entries).map(Mention::Or)
            }
            Simplified::Group(Group::And(_)) => None,
        }
    }
}

impl From<PlainQuantity> for Simplified {
    fn from(q: PlainQuantity) -> Self {
        Simplified::Quantity(q)
    }
}

impl fmt::Display for Simplified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Simplified::Quantity(q) => write!(f, "{}", q),
            Simplified::Group(group) => {
                let sep = match group {
                    Group::Or(_) => " | ",
                    Group::And(_) => " + ",
                };
                let nested = |s: &Simplified| matches!(s, Simplified::Group(_));
                for (i, entry) in group.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", sep)?;
                    }
                    if nested(entry) {
                        write!(f, "({})", entry)?;
                    } else {
                        write!(f, "{}", entry)?;
                    }
                }
                Ok(())
            }
        }
    }
}
