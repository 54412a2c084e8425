//! Exactly-one selection accumulator
//!
//! A bubble group is well-formed when precisely one of its bubbles is
//! filled. [`Selector`] enforces that while a group is traversed: every set
//! bit is recorded, and the single pending value is consumed at the end.
//! Recording twice signals two filled bubbles; consuming with nothing
//! recorded signals an empty group. The two failures are distinct so callers
//! can apply different policies to each (an unanswered question is valid, an
//! unmarked roll digit is not).

/// Validation failure raised by a [`Selector`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// A value was recorded while another was already pending
    #[error("more than one box is checked in {group}")]
    Conflict { group: String },

    /// Consume was called with no value pending
    #[error("no box is checked in {group}")]
    Empty { group: String },
}

/// Accumulator holding at most one pending value for a single group traversal.
///
/// Each instance is scoped to exactly one field-group and is not reused
/// across groups. The group label only improves diagnostics; it has no
/// behavioral effect.
#[derive(Debug)]
pub struct Selector<T> {
    group: String,
    pending: Option<T>,
}

impl<T> Selector<T> {
    /// Create a selector for one group traversal
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            pending: None,
        }
    }

    /// Store `value` as the pending selection.
    ///
    /// Fails with [`SelectorError::Conflict`] if a value is already pending,
    /// i.e. two bubbles are filled in the same group.
    pub fn record(&mut self, value: T) -> Result<(), SelectorError> {
        if self.pending.is_some() {
            return Err(SelectorError::Conflict {
                group: self.group.clone(),
            });
        }

        self.pending = Some(value);
        Ok(())
    }

    /// Return and clear the pending selection.
    ///
    /// Fails with [`SelectorError::Empty`] if nothing was recorded, i.e. no
    /// bubble is filled in the group.
    pub fn consume(&mut self) -> Result<T, SelectorError> {
        self.pending.take().ok_or_else(|| SelectorError::Empty {
            group: self.group.clone(),
        })
    }
}
