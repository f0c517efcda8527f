//! # Visualizer Registry & Dispatch
//!
//! The ordered collection of registered visualizer descriptors, plus the
//! dispatch entry point that binds a value to the first matching strategy.
//!
//! ## Lifecycle
//!
//! One registry exists per debugger session: created at session start,
//! populated by the registration functions in [`strategies`], extended by
//! the entry-type learner while the session runs, and dropped at session
//! teardown. Nothing persists across sessions.
//!
//! ## Thread Safety
//!
//! The registry is **not** thread-safe. All engine operations run
//! synchronously on the host's single inspection thread, so interior
//! mutability is plain `RefCell`; a host that runs inspection requests in
//! parallel must add its own synchronization around registry mutation.
//!
//! ## Registration order
//!
//! `find` scans descriptors in registration order and the first match wins,
//! so more specific patterns must be registered before general ones. The
//! registration functions in [`strategies`] uphold this; it is an invariant
//! of registration, not an enforced postcondition.
//!
//! [`strategies`]: crate::strategies

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::{info, trace};

use crate::host::ValueHandle;
use crate::typename;
use crate::visualizer::{Visualizer, VisualizerDescriptor};

/// Session-wide, append-only visualizer registry
///
/// Owns the ordered descriptor list and the entry-type learning state
/// machine for associative containers on managed runtimes.
#[derive(Default)]
pub struct Registry
{
    descriptors: RefCell<Vec<VisualizerDescriptor>>,
    /// declared associative type name -> learned concrete entry type name.
    /// One-way: a declared type transitions unlearned -> learned at most once.
    learned_entry_types: RefCell<HashMap<String, String>>,
}

impl Registry
{
    /// Create an empty registry for a new session.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Append a descriptor to the registry.
    ///
    /// Descriptors are scanned in insertion order by [`Registry::find`];
    /// register specific patterns before general ones.
    pub fn register(&self, descriptor: VisualizerDescriptor)
    {
        trace!(strategy = descriptor.name, "registering visualizer");
        self.descriptors.borrow_mut().push(descriptor);
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.descriptors.borrow().len()
    }

    /// Whether the registry has no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.descriptors.borrow().is_empty()
    }

    /// Dispatch entry point: find a visualizer for a value.
    ///
    /// Canonicalizes the value's type (one reference level followed,
    /// typedefs and qualifiers stripped), then scans descriptors in
    /// registration order and binds the first whose predicate matches.
    ///
    /// `None` is not an error: it covers anonymous types (no canonical name
    /// to match) and unrecognized shapes alike, and tells the host to use
    /// its own default rendering. Child values produced by the returned
    /// visualizer may recursively re-enter this method.
    #[must_use]
    pub fn find(&self, value: &dyn ValueHandle) -> Option<Box<dyn Visualizer>>
    {
        let declared = value.value_type();
        let canonical = typename::canonicalize(declared.as_ref());
        let Some(type_name) = canonical.name() else {
            trace!("type has no retrievable name; falling back to host default");
            return None;
        };

        let descriptors = self.descriptors.borrow();
        for descriptor in descriptors.iter() {
            if descriptor.supports(&type_name, canonical.as_ref()) {
                trace!(strategy = descriptor.name, type_name, "visualizer matched");
                return Some(descriptor.create(&type_name, value));
            }
        }

        trace!(type_name, "no visualizer matched; falling back to host default");
        None
    }

    /// Whether the entry type of a declared associative type has been learned.
    #[must_use]
    pub fn entry_type_learned(&self, declared_type: &str) -> bool
    {
        self.learned_entry_types.borrow().contains_key(declared_type)
    }

    /// Learn the concrete entry type of an associative container type.
    ///
    /// Transitions `declared_type` from `unlearned` to `learned` and appends
    /// `descriptor` (an exact-name match for `entry_type` bound to the
    /// entry-decomposition strategy) to the registry, permanently extending
    /// it for the remainder of the session. Subsequent values of
    /// `entry_type` then dispatch to that strategy.
    ///
    /// ## Panics
    ///
    /// Panics if `declared_type` was already learned. The transition is
    /// one-way; callers must check [`Registry::entry_type_learned`] first,
    /// and a second learn indicates a bug in the engine's state machine,
    /// not bad debuggee data.
    pub fn learn_entry_type(&self, declared_type: &str, entry_type: &str, descriptor: VisualizerDescriptor)
    {
        let mut learned = self.learned_entry_types.borrow_mut();
        assert!(
            !learned.contains_key(declared_type),
            "entry type for '{declared_type}' learned twice"
        );
        learned.insert(declared_type.to_string(), entry_type.to_string());
        drop(learned);

        info!(declared_type, entry_type, "learned associative entry type");
        self.register(descriptor);
    }
}
