//! Built-in visualizer strategies and their registration.
//!
//! Split by host flavor: the native modules recognize C++ library wrappers
//! by template-name patterns and read fields out of debuggee memory, while
//! [`managed`] recognizes runtime library containers by exact name and
//! introspects through remote method invocation. A session registers one
//! set or the other (or both, for a host that debugs mixed processes).

pub mod managed;
pub mod optional;
pub mod pointers;
pub mod ranges;
pub mod simple;
pub mod variant;

use std::rc::Rc;

use crate::registry::Registry;

/// Register the native-host strategies.
///
/// Order is load-bearing: dispatch takes the first match, and the
/// char-buffer predicate (a kind-based check, not a name pattern) goes last
/// so that named wrapper types always win over the structural fallback.
pub fn register_native_visualizers(registry: &Registry)
{
    registry.register(ranges::iterator_range_descriptor());
    registry.register(optional::optional_descriptor());
    registry.register(simple::reference_wrapper_descriptor());
    registry.register(simple::tribool_descriptor());
    registry.register(pointers::scoped_pointer_descriptor());
    registry.register(pointers::shared_pointer_descriptor());
    registry.register(ranges::fixed_array_descriptor());
    registry.register(variant::variant_descriptor());
    registry.register(simple::path_descriptor());
    registry.register(ranges::char_buffer_descriptor());
}

/// Register the managed-runtime strategies.
///
/// Takes the shared registry handle because the associative-container
/// strategy must be able to extend the registry when it learns a concrete
/// entry type mid-session.
pub fn register_managed_visualizers(registry: &Rc<Registry>)
{
    registry.register(managed::string_convertible_descriptor());
    registry.register(managed::file_descriptor());
    registry.register(managed::throwable_descriptor());
    registry.register(managed::indexed_container_descriptor());
    registry.register(managed::iterable_container_descriptor());
    registry.register(managed::associative_container_descriptor(registry));
}
