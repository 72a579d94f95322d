//! Fixed-arity correlation tuples built from bind-once slots.
//!
//! A tuple is allocated with its arity and filled by binding values
//! into slots. Binding is single-assignment: a slot accepts its first
//! value, accepts an equal rebind silently, and refuses a differing
//! rebind with [`BindError::Conflict`]. This is the restricted case of
//! unification the synchronization boundary needs — two unbound slots
//! are never unified with each other.

use std::fmt;

use smallvec::SmallVec;

use crate::error::BindError;
use crate::value::Value;

/// A bind-once cell: unbound, or bound to exactly one value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Slot {
    /// No value bound yet.
    #[default]
    Unbound,
    /// Bound to a value for the rest of the tuple's life.
    Bound(Value),
}

impl Slot {
    /// Bind `value` into this cell.
    ///
    /// Succeeds if the cell is unbound or already holds an equal value.
    /// On conflict the cell is left unchanged and both values are
    /// reported; the index is filled in by [`Tuple::bind`].
    fn bind(&mut self, value: Value) -> Result<(), (Value, Value)> {
        match self {
            Self::Unbound => {
                *self = Self::Bound(value);
                Ok(())
            }
            Self::Bound(bound) if *bound == value => Ok(()),
            Self::Bound(bound) => Err((bound.clone(), value)),
        }
    }

    /// The bound value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Unbound => None,
            Self::Bound(v) => Some(v),
        }
    }

    /// Whether a value has been bound.
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

/// An ordered, fixed-arity sequence of bind-once slots.
///
/// Arity is fixed at creation and must equal the argument count of the
/// operation the tuple is offered to. A tuple is owned exclusively by
/// the delivering call from creation until the engine consumes it;
/// consumption transfers ownership and the tuple is never reused.
///
/// # Examples
///
/// ```
/// use weir_core::{Tuple, Value};
///
/// let mut tuple = Tuple::new(2);
/// tuple.bind(0, Value::from("lisbon")).unwrap();
/// tuple.bind(1, Value::from(17.5)).unwrap();
/// assert!(tuple.is_fully_bound());
///
/// // Equal rebind is silently accepted.
/// tuple.bind(0, Value::from("lisbon")).unwrap();
///
/// // Differing rebind is a conflict.
/// assert!(tuple.bind(0, Value::from("porto")).is_err());
/// assert_eq!(tuple.get(0), Some(&Value::from("lisbon")));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tuple {
    slots: SmallVec<[Slot; 4]>,
}

impl Tuple {
    /// Allocate a tuple with `arity` unbound slots.
    pub fn new(arity: usize) -> Self {
        Self {
            slots: (0..arity).map(|_| Slot::Unbound).collect(),
        }
    }

    /// Build a fully bound tuple from `values`, in order.
    ///
    /// Used for response tuples, which are born bound.
    pub fn bound(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            slots: values.into_iter().map(Slot::Bound).collect(),
        }
    }

    /// The fixed arity chosen at creation.
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// Bind `value` into the slot at `index`.
    ///
    /// Succeeds silently if the slot is unbound or already bound to an
    /// equal value; fails with [`BindError::Conflict`] otherwise. The
    /// tuple is unchanged on failure.
    pub fn bind(&mut self, index: usize, value: Value) -> Result<(), BindError> {
        let arity = self.arity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(BindError::OutOfRange { index, arity })?;
        slot.bind(value)
            .map_err(|(bound, offered)| BindError::Conflict {
                index,
                bound,
                offered,
            })
    }

    /// The value bound at `index`, or `None` if unbound or out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(Slot::value)
    }

    /// The slot at `index`, if within arity.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Whether every slot holds a value.
    pub fn is_fully_bound(&self) -> bool {
        self.slots.iter().all(Slot::is_bound)
    }

    /// Index of the first unbound slot, if any.
    pub fn first_unbound(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_bound())
    }

    /// Iterate over the slots in order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot.value() {
                Some(v) => write!(f, "{v}")?,
                None => write!(f, "_")?,
            }
        }
        write!(f, ")")
    }
}
