//! Child enumeration protocol.
//!
//! Every container-shaped visualizer exposes its children through a
//! [`ChildCursor`]: a lazy, forward-only, single-pass sequence of labeled
//! child values. The host pulls one entry at a time, so enumerating a huge
//! container costs only as many debuggee reads as the host actually
//! requests.
//!
//! Cursors are *not* restartable. Re-expanding a node means calling
//! [`Visualizer::children`](crate::visualizer::Visualizer::children) again,
//! which derives a fresh cursor from the same source value; cursor state is
//! never shared across calls.

use tracing::debug;

use crate::error::LensResult;
use crate::host::{TypeDescriptor, ValueHandle};

/// One labeled child of a visualized value
///
/// The label is positional (`[n]`) for sequence elements or semantic
/// (`value`, `key`) for decomposed wrappers and pairs.
pub struct ChildEntry
{
    /// Label the host displays next to the child
    pub label: String,
    /// Handle to the child value; may recursively re-enter dispatch
    pub value: Box<dyn ValueHandle>,
}

impl ChildEntry
{
    /// Create a child entry with a positional `[n]` label.
    #[must_use]
    pub fn indexed(index: u64, value: Box<dyn ValueHandle>) -> Self
    {
        Self {
            label: format!("[{index}]"),
            value,
        }
    }

    /// Create a child entry with a semantic label.
    #[must_use]
    pub fn labeled(label: impl Into<String>, value: Box<dyn ValueHandle>) -> Self
    {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Lazy, forward-only cursor over a value's children
///
/// `advance` materializes exactly one child per call and returns `None` once
/// the sequence is exhausted. Introspection failures during a pull end the
/// sequence early rather than propagating; the host simply sees fewer
/// children.
pub trait ChildCursor
{
    /// Produce the next child, or `None` when exhausted.
    fn advance(&mut self) -> Option<ChildEntry>;

    /// Element type captured from the first child, if this cursor captures one.
    ///
    /// Indexed/iterable container cursors record the concrete type of their
    /// first element under the assumption that the container is homogeneous;
    /// hosts can query this after the first pull to improve rendering of the
    /// remaining elements. The default captures nothing.
    fn element_type(&self) -> Option<&dyn TypeDescriptor>
    {
        None
    }
}

/// Cursor over no children at all
///
/// The degradation target for every introspection failure during child
/// setup: a null pointer, an unresolvable element type, a failed cast.
pub struct EmptyCursor;

impl ChildCursor for EmptyCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        None
    }
}

/// Cursor yielding a single `value` child, resolved on first pull
///
/// Used by the pointer-wrapper and optional strategies. The resolver runs
/// only when the host actually pulls — dereferencing a possibly dangling
/// pointer never happens eagerly. A resolver failure yields an empty
/// sequence.
pub struct SingleValueCursor
{
    resolve: Option<Box<dyn FnOnce() -> LensResult<Box<dyn ValueHandle>>>>,
}

impl SingleValueCursor
{
    /// Create a cursor whose one child comes from `resolve` at pull time.
    #[must_use]
    pub fn new(resolve: impl FnOnce() -> LensResult<Box<dyn ValueHandle>> + 'static) -> Self
    {
        Self {
            resolve: Some(Box::new(resolve)),
        }
    }
}

impl ChildCursor for SingleValueCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        let resolve = self.resolve.take()?;
        match resolve() {
            Ok(value) => Some(ChildEntry::labeled("value", value)),
            Err(err) => {
                debug!(error = %err, "failed to resolve wrapped value; yielding no children");
                None
            }
        }
    }
}

/// Cursor over the elements of an index-accessible value
///
/// Yields `([i], element)` for `i` in `0..len` via `ValueHandle::index`.
/// An unreadable element ends the sequence.
pub struct IndexedCursor
{
    value: Box<dyn ValueHandle>,
    len: u64,
    next: u64,
}

impl IndexedCursor
{
    /// Create a cursor over `value[0..len]`.
    #[must_use]
    pub fn new(value: Box<dyn ValueHandle>, len: u64) -> Self
    {
        Self { value, len, next: 0 }
    }
}

impl ChildCursor for IndexedCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        if self.next == self.len {
            return None;
        }

        let index = self.next;
        self.next += 1;
        match self.value.index(index) {
            Ok(element) => Some(ChildEntry::indexed(index, element)),
            Err(err) => {
                debug!(index, error = %err, "element unreadable; ending child sequence");
                None
            }
        }
    }
}
