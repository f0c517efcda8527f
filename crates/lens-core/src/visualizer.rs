//! # Visualizer Interface
//!
//! A visualizer strategy turns an opaque debuggee value into a one-line
//! summary, an optional set of children, and a display hint. One
//! implementation exists per recognized shape (pointer wrapper, optional,
//! tagged union, range, char buffer, managed container, ...).
//!
//! Descriptors pair a name predicate with a factory; the
//! [`Registry`](crate::registry::Registry) scans them in registration order
//! and binds the first match to the inspected value.

use crate::children::ChildCursor;
use crate::host::{TypeDescriptor, ValueHandle};
use crate::types::DisplayHint;

/// Shape-specific visualization of one bound value
///
/// An instance is bound to exactly one `(type name, value handle)` pair at
/// construction and is never reused across different values. It carries no
/// state beyond what it captured there; `children` derives a fresh cursor on
/// every call.
pub trait Visualizer
{
    /// One-line human-readable summary of the value.
    ///
    /// Always produces *something*: introspection failures degrade to a
    /// null-style or raw rendering rather than erroring (see
    /// [`error`](crate::error)).
    fn summary(&self) -> String;

    /// Fresh cursor over the value's children, or `None` if this shape has
    /// no child decomposition at all.
    ///
    /// `None` ("not applicable") is different from a cursor that yields no
    /// entries: a null pointer wrapper *has* a child protocol, it just
    /// enumerates zero children right now.
    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        None
    }

    /// Rendering hint for the host.
    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::Scalar
    }
}

/// Predicate over a canonical type name (plus its descriptor, for shapes
/// that cannot be recognized by name alone, such as char buffers)
pub type MatchFn = Box<dyn Fn(&str, &dyn TypeDescriptor) -> bool>;

/// Factory binding a matched type name and value handle to a strategy instance
pub type FactoryFn = Box<dyn Fn(&str, &dyn ValueHandle) -> Box<dyn Visualizer>>;

/// A registered (predicate, factory) pair
///
/// Registration order is load-bearing: the registry returns the first
/// descriptor whose predicate matches, so more specific patterns must be
/// registered before general ones.
pub struct VisualizerDescriptor
{
    /// Strategy name, used only for logging
    pub name: &'static str,
    matches: MatchFn,
    create: FactoryFn,
}

impl VisualizerDescriptor
{
    /// Create a descriptor from a predicate and a factory.
    #[must_use]
    pub fn new(name: &'static str, matches: MatchFn, create: FactoryFn) -> Self
    {
        Self { name, matches, create }
    }

    /// Test whether this descriptor's strategy supports the type.
    #[must_use]
    pub fn supports(&self, type_name: &str, ty: &dyn TypeDescriptor) -> bool
    {
        (self.matches)(type_name, ty)
    }

    /// Construct a strategy instance bound to the given value.
    #[must_use]
    pub fn create(&self, type_name: &str, value: &dyn ValueHandle) -> Box<dyn Visualizer>
    {
        (self.create)(type_name, value)
    }
}

impl std::fmt::Debug for VisualizerDescriptor
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct("VisualizerDescriptor").field("name", &self.name).finish()
    }
}
