//! Managed-runtime strategies: method-invocation summaries, indexed,
//! iterable, and associative containers, and the entry-type learner.
//!
//! Managed types are matched by exact name against fixed sets of known
//! runtime library types; there is nothing template-shaped to pattern-match.
//! All introspection goes through [`ValueHandle::invoke`], so these
//! strategies only ever bind to hosts that support remote invocation.
//!
//! Associative containers are the one place the registry grows at runtime:
//! the concrete entry type produced by `entrySet().iterator().next()` is
//! implementation-defined and unknowable up front, so the first enumeration
//! of each declared map type captures it and registers an exact-name
//! descriptor for the entry-decomposition strategy. See
//! [`Registry::learn_entry_type`].

use std::rc::{Rc, Weak};

use tracing::debug;

use crate::children::{ChildCursor, ChildEntry, EmptyCursor};
use crate::host::{InvokeArg, TypeDescriptor, ValueHandle};
use crate::registry::Registry;
use crate::types::DisplayHint;
use crate::visualizer::{Visualizer, VisualizerDescriptor};

/// Types rendered by invoking `toString`.
pub const STRING_CONVERTIBLE_TYPES: &[&str] = &["java.lang.StringBuilder", "java.lang.StringBuffer"];

/// Types rendered by invoking `getPath`.
pub const FILE_TYPES: &[&str] = &["java.io.File"];

/// Types rendered by invoking `getMessage`.
pub const THROWABLE_TYPES: &[&str] = &["java.lang.Throwable"];

/// Containers enumerated by `get(i)` over `0..size()`.
pub const INDEXED_CONTAINER_TYPES: &[&str] = &[
    "java.util.List",
    "java.util.AbstractList",
    "java.util.AbstractSequentialList",
    "java.util.ArrayList",
    "java.util.Vector",
    "java.util.LinkedList",
    "java.util.Stack",
];

/// Containers enumerated by `iterator()` / `next()`.
pub const ITERABLE_CONTAINER_TYPES: &[&str] = &[
    "java.util.BlockingDeque",
    "java.util.BlockingQueue",
    "java.util.Deque",
    "java.util.List",
    "java.util.NavigableSet",
    "java.util.Queue",
    "java.util.Set",
    "java.util.SortedSet",
    "java.util.AbstractCollection",
    "java.util.AbstractQueue",
    "java.util.concurrent.ArrayBlockingQueue",
    "java.util.concurrent.ConcurrentLinkedQueue",
    "java.util.concurrent.DelayQueue",
    "java.util.concurrent.LinkedBlockingDeque",
    "java.util.concurrent.LinkedBlockingQueue",
    "java.util.concurrent.PriorityBlockingQueue",
    "java.util.concurrent.PriorityQueue",
    "java.util.concurrent.SynchronousQueue",
    "java.util.AbstractSet",
    "java.util.concurrent.ConcurrentSkipListSet",
    "java.util.concurrent.CopyOnWriteArraySet",
    "java.util.EnumSet",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.TreeSet",
    "java.util.ArrayDeque",
];

/// Containers enumerated through `entrySet()`; their entries feed the
/// entry-type learner.
pub const ASSOCIATIVE_CONTAINER_TYPES: &[&str] = &[
    "java.util.Map",
    "javax.script.Bindings",
    "java.util.ConcurrentMap",
    "java.util.concurrent.ConcurrentNavigableMap",
    "javax.xml.ws.handler.LogicalMessageContext",
    "javax.xml.ws.handler.MessageContext",
    "java.util.NavigableMap",
    "javax.xml.ws.handler.soap.SOAPMessageContext",
    "java.util.SortedMap",
    "java.util.AbstractMap",
    "java.util.jar.Attributes",
    "java.security.AuthProvider",
    "java.util.concurrent.ConcurrentHashMap",
    "java.util.concurrent.ConcurrentSkipListMap",
    "java.util.EnumMap",
    "java.util.HashMap",
    "java.util.Hashtable",
    "java.util.IdentityHashMap",
    "java.util.LinkedHashMap",
    "javax.print.attribute.standard.PrinterStateReasons",
    "java.util.Properties",
    "java.security.Provider",
    "java.awt.RenderingHints",
    "javax.script.SimpleBindings",
    "javax.management.openmbean.TabularDataSupport",
    "java.util.TreeMap",
    "javax.swing.UIDefaults",
    "java.util.WeakHashMap",
];

fn name_set_match(names: &'static [&'static str]) -> impl Fn(&str, &dyn TypeDescriptor) -> bool
{
    move |type_name, _| names.contains(&type_name)
}

/// Descriptor for builder-style string types summarized via `toString`.
#[must_use]
pub fn string_convertible_descriptor() -> VisualizerDescriptor
{
    invoke_summary_descriptor("string-convertible", STRING_CONVERTIBLE_TYPES, "toString")
}

/// Descriptor for file handles summarized via `getPath`.
#[must_use]
pub fn file_descriptor() -> VisualizerDescriptor
{
    invoke_summary_descriptor("file", FILE_TYPES, "getPath")
}

/// Descriptor for throwables summarized via `getMessage`.
#[must_use]
pub fn throwable_descriptor() -> VisualizerDescriptor
{
    invoke_summary_descriptor("throwable", THROWABLE_TYPES, "getMessage")
}

fn invoke_summary_descriptor(
    name: &'static str,
    types: &'static [&'static str],
    method: &'static str,
) -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        name,
        Box::new(name_set_match(types)),
        Box::new(move |_, value| {
            Box::new(InvokeSummaryVisualizer {
                value: value.clone_box(),
                method,
            })
        }),
    )
}

/// Descriptor for random-access list containers.
#[must_use]
pub fn indexed_container_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "indexed-container",
        Box::new(name_set_match(INDEXED_CONTAINER_TYPES)),
        Box::new(|_, value| {
            Box::new(IndexedContainerVisualizer {
                value: value.clone_box(),
            })
        }),
    )
}

/// Descriptor for iterator-only collection containers.
#[must_use]
pub fn iterable_container_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "iterable-container",
        Box::new(name_set_match(ITERABLE_CONTAINER_TYPES)),
        Box::new(|_, value| {
            Box::new(IterableContainerVisualizer {
                value: value.clone_box(),
            })
        }),
    )
}

/// Descriptor for map containers.
///
/// Holds the registry weakly so the entry-type learner can extend it from
/// inside a child enumeration without keeping the registry alive through
/// its own descriptor list.
#[must_use]
pub fn associative_container_descriptor(registry: &Rc<Registry>) -> VisualizerDescriptor
{
    let registry = Rc::downgrade(registry);
    VisualizerDescriptor::new(
        "associative-container",
        Box::new(name_set_match(ASSOCIATIVE_CONTAINER_TYPES)),
        Box::new(move |name, value| {
            Box::new(AssociativeContainerVisualizer {
                type_name: name.to_string(),
                value: value.clone_box(),
                registry: registry.clone(),
            })
        }),
    )
}

/// Exact-name descriptor for a learned concrete entry type.
///
/// Registered by [`Registry::learn_entry_type`] the first time a map of the
/// corresponding declared type is enumerated; from then on, values of the
/// entry type dispatch to the entry-decomposition strategy wherever they
/// appear, not only inside that map.
#[must_use]
pub fn entry_descriptor(entry_type: &str) -> VisualizerDescriptor
{
    let entry_type = entry_type.to_string();
    VisualizerDescriptor::new(
        "entry-decomposition",
        Box::new(move |name, _| name == entry_type),
        Box::new(|_, value| {
            Box::new(EntryVisualizer {
                value: value.clone_box(),
            })
        }),
    )
}

/// Element count via the container's `size()` method.
///
/// `None` on any invocation failure; the caller degrades to an empty child
/// sequence.
fn container_size(value: &dyn ValueHandle) -> Option<u64>
{
    match value.invoke("size", &[]).and_then(|size| size.as_i64()) {
        Ok(size) => u64::try_from(size).ok(),
        Err(err) => {
            debug!(error = %err, "container size() invocation failed");
            None
        }
    }
}

/// Summary produced by invoking a single no-argument method.
///
/// Covers builder-style strings (`toString`), files (`getPath`), and
/// throwables (`getMessage`).
struct InvokeSummaryVisualizer
{
    value: Box<dyn ValueHandle>,
    method: &'static str,
}

impl Visualizer for InvokeSummaryVisualizer
{
    fn summary(&self) -> String
    {
        let rendered = self
            .value
            .invoke(self.method, &[])
            .and_then(|result| result.display_string());
        match rendered {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!(method = self.method, error = %err, "summary invocation failed");
                self.value.display_string().unwrap_or_else(|_| "<unreadable>".to_string())
            }
        }
    }
}

/// Container summary shared by all three container shapes: the runtime's
/// own rendering of the container value.
fn container_summary(value: &dyn ValueHandle) -> String
{
    match value.display_string() {
        Ok(rendered) => rendered,
        Err(err) => {
            debug!(error = %err, "container rendering failed");
            "<unreadable>".to_string()
        }
    }
}

/// Visualizer for random-access list containers.
struct IndexedContainerVisualizer
{
    value: Box<dyn ValueHandle>,
}

impl Visualizer for IndexedContainerVisualizer
{
    fn summary(&self) -> String
    {
        container_summary(self.value.as_ref())
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        let Some(len) = container_size(self.value.as_ref()) else {
            return Some(Box::new(EmptyCursor));
        };
        Some(Box::new(GetCursor {
            value: self.value.clone_box(),
            len,
            next: 0,
            element_type: None,
        }))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::Array
    }
}

/// Pulls elements with `get(i)` for `i` in `0..len`.
struct GetCursor
{
    value: Box<dyn ValueHandle>,
    len: u64,
    next: u64,
    element_type: Option<Box<dyn TypeDescriptor>>,
}

impl ChildCursor for GetCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        if self.next == self.len {
            return None;
        }

        let index = self.next;
        let arg = i64::try_from(index).ok()?;
        let element = match self.value.invoke("get", &[InvokeArg::Int(arg)]) {
            Ok(element) => element,
            Err(err) => {
                debug!(index, error = %err, "get() invocation failed; ending child sequence");
                return None;
            }
        };
        self.next += 1;

        if index == 0 {
            self.element_type = element.concrete_type().ok();
        }
        Some(ChildEntry::indexed(index, element))
    }

    fn element_type(&self) -> Option<&dyn TypeDescriptor>
    {
        self.element_type.as_deref()
    }
}

/// Visualizer for iterator-only collection containers.
struct IterableContainerVisualizer
{
    value: Box<dyn ValueHandle>,
}

impl Visualizer for IterableContainerVisualizer
{
    fn summary(&self) -> String
    {
        container_summary(self.value.as_ref())
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        let Some(len) = container_size(self.value.as_ref()) else {
            return Some(Box::new(EmptyCursor));
        };
        let iterator = match self.value.invoke("iterator", &[]) {
            Ok(iterator) => iterator,
            Err(err) => {
                debug!(error = %err, "iterator() invocation failed; yielding no children");
                return Some(Box::new(EmptyCursor));
            }
        };
        Some(Box::new(IteratorCursor {
            iterator,
            len,
            next: 0,
            element_type: None,
        }))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::Array
    }
}

/// Pulls `len` elements off a runtime iterator with `next()`.
///
/// Bounded by the size captured at cursor creation, not by `hasNext`; a
/// container mutated mid-enumeration ends the sequence early instead of
/// looping.
struct IteratorCursor
{
    iterator: Box<dyn ValueHandle>,
    len: u64,
    next: u64,
    element_type: Option<Box<dyn TypeDescriptor>>,
}

impl ChildCursor for IteratorCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        if self.next == self.len {
            return None;
        }

        let element = match self.iterator.invoke("next", &[]) {
            Ok(element) => element,
            Err(err) => {
                debug!(error = %err, "next() invocation failed; ending child sequence");
                return None;
            }
        };

        let index = self.next;
        self.next += 1;
        if index == 0 {
            self.element_type = element.concrete_type().ok();
        }
        Some(ChildEntry::indexed(index, element))
    }

    fn element_type(&self) -> Option<&dyn TypeDescriptor>
    {
        self.element_type.as_deref()
    }
}

/// Visualizer for map containers enumerated through their entry set.
struct AssociativeContainerVisualizer
{
    type_name: String,
    value: Box<dyn ValueHandle>,
    registry: Weak<Registry>,
}

impl Visualizer for AssociativeContainerVisualizer
{
    fn summary(&self) -> String
    {
        container_summary(self.value.as_ref())
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        let Some(len) = container_size(self.value.as_ref()) else {
            return Some(Box::new(EmptyCursor));
        };
        let iterator = self
            .value
            .invoke("entrySet", &[])
            .and_then(|entry_set| entry_set.invoke("iterator", &[]));
        let iterator = match iterator {
            Ok(iterator) => iterator,
            Err(err) => {
                debug!(error = %err, "entry set enumeration failed; yielding no children");
                return Some(Box::new(EmptyCursor));
            }
        };
        Some(Box::new(EntryCursor {
            iterator,
            len,
            next: 0,
            declared_type: self.type_name.clone(),
            registry: self.registry.clone(),
            element_type: None,
        }))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::MapLike
    }
}

/// Pulls map entries off an entry-set iterator and feeds the first one to
/// the entry-type learner.
struct EntryCursor
{
    iterator: Box<dyn ValueHandle>,
    len: u64,
    next: u64,
    declared_type: String,
    registry: Weak<Registry>,
    element_type: Option<Box<dyn TypeDescriptor>>,
}

impl EntryCursor
{
    fn learn_from(&mut self, entry: &dyn ValueHandle)
    {
        let entry_type = match entry.concrete_type() {
            Ok(entry_type) => entry_type,
            Err(err) => {
                debug!(error = %err, "entry concrete type unavailable; skipping entry-type learning");
                return;
            }
        };
        let Some(entry_name) = entry_type.name() else {
            debug!("entry type has no name; skipping entry-type learning");
            return;
        };
        self.element_type = Some(entry_type);

        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if !registry.entry_type_learned(&self.declared_type) {
            registry.learn_entry_type(&self.declared_type, &entry_name, entry_descriptor(&entry_name));
        }
    }
}

impl ChildCursor for EntryCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        if self.next == self.len {
            return None;
        }

        let entry = match self.iterator.invoke("next", &[]) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "next() invocation failed; ending child sequence");
                return None;
            }
        };

        let index = self.next;
        self.next += 1;
        if index == 0 {
            self.learn_from(entry.as_ref());
        }
        Some(ChildEntry::indexed(index, entry))
    }

    fn element_type(&self) -> Option<&dyn TypeDescriptor>
    {
        self.element_type.as_deref()
    }
}

/// Visualizer for a single learned map entry: `key -> value`.
struct EntryVisualizer
{
    value: Box<dyn ValueHandle>,
}

impl Visualizer for EntryVisualizer
{
    fn summary(&self) -> String
    {
        let key = self
            .value
            .invoke("getKey", &[])
            .and_then(|key| key.display_string());
        let mut rendered = match key {
            Ok(key) => key,
            Err(err) => {
                debug!(error = %err, "getKey() invocation failed");
                return "<unreadable>".to_string();
            }
        };

        match self.value.invoke("getValue", &[]).and_then(|v| v.display_string()) {
            Ok(value) => {
                rendered.push_str(" -> ");
                rendered.push_str(&value);
            }
            Err(err) => {
                // A missing mapped value still leaves the key worth showing.
                debug!(error = %err, "getValue() invocation failed");
            }
        }

        // Nested quotes from the runtime's string rendering would clash with
        // the host's own quoting of the summary.
        rendered.replace('"', "'")
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        Some(Box::new(PairCursor {
            value: self.value.clone_box(),
            stage: 0,
        }))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::MapLike
    }
}

/// Yields exactly `key` then `value` for a decomposed map entry.
struct PairCursor
{
    value: Box<dyn ValueHandle>,
    stage: u8,
}

impl ChildCursor for PairCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        let (label, method) = match self.stage {
            0 => ("key", "getKey"),
            1 => ("value", "getValue"),
            _ => return None,
        };

        match self.value.invoke(method, &[]) {
            Ok(side) => {
                self.stage += 1;
                Some(ChildEntry::labeled(label, side))
            }
            Err(err) => {
                // Exhaustion is terminal: a failed key must not leave the
                // value side dangling behind an apparent end of sequence.
                self.stage = 2;
                debug!(method, error = %err, "entry side invocation failed; ending child sequence");
                None
            }
        }
    }
}
