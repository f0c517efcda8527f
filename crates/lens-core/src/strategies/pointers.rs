//! Pointer/ownership-wrapper strategies.
//!
//! Covers the scoped/intrusive (plain owning) and shared/weak
//! (reference-counted) smart pointer shapes. Both render the raw pointee
//! address and expose a single lazy `value` child; the shared/weak variant
//! additionally reads the strong and weak counts out of the wrapper's
//! control block.
//!
//! Dereferencing is always deferred to the first cursor pull: a dangling
//! pointer must never be touched unless the host actually expands the node.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::children::{ChildCursor, EmptyCursor, SingleValueCursor};
use crate::host::ValueHandle;
use crate::types::{Address, DisplayHint};
use crate::visualizer::{Visualizer, VisualizerDescriptor};

static SCOPED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^boost::(intrusive|scoped)_(ptr|array)<(.*)>$").expect("scoped pointer pattern"));

static SHARED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^boost::(weak|shared)_(ptr|array)<(.*)>$").expect("shared pointer pattern"));

/// Descriptor for scoped/intrusive pointer wrappers.
#[must_use]
pub fn scoped_pointer_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "scoped-pointer",
        Box::new(|name, _| SCOPED_PATTERN.is_match(name)),
        Box::new(|name, value| {
            Box::new(ScopedPointerVisualizer {
                element: element_name(&SCOPED_PATTERN, name),
                value: value.clone_box(),
            })
        }),
    )
}

/// Descriptor for shared/weak pointer wrappers.
#[must_use]
pub fn shared_pointer_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "shared-pointer",
        Box::new(|name, _| SHARED_PATTERN.is_match(name)),
        Box::new(|name, value| {
            Box::new(SharedPointerVisualizer {
                element: element_name(&SHARED_PATTERN, name),
                value: value.clone_box(),
            })
        }),
    )
}

/// Captured element-type name from the wrapper's template parameter.
fn element_name(pattern: &Regex, type_name: &str) -> Option<String>
{
    let captured = pattern.captures(type_name)?.get(3)?.as_str().trim().to_string();
    if captured.is_empty() {
        None
    } else {
        Some(captured)
    }
}

/// Raw pointee address held by the wrapper's `px` field.
///
/// Degrades to the null sentinel when the field cannot be read; the summary
/// then shows the null representation and the child sequence is empty.
fn raw_address(value: &dyn ValueHandle) -> Address
{
    match value.field("px").and_then(|px| px.as_address()) {
        Ok(address) => address,
        Err(err) => {
            debug!(error = %err, "failed to read wrapper pointer field");
            Address::ZERO
        }
    }
}

/// One lazy `value` child for the wrapper's pointee.
///
/// Null pointers, unresolvable element types, and failed casts all degrade
/// to an empty sequence.
fn pointee_cursor(value: &dyn ValueHandle, element: Option<&str>) -> Box<dyn ChildCursor>
{
    if raw_address(value).is_null() {
        return Box::new(EmptyCursor);
    }

    let Some(element) = element else {
        debug!("wrapper element type not captured; yielding no children");
        return Box::new(EmptyCursor);
    };

    let value = value.clone_box();
    let pointer_name = format!("{element}*");
    Box::new(SingleValueCursor::new(move || {
        let pointer_ty = value.lookup_type(&pointer_name)?;
        value.field("px")?.cast(pointer_ty.as_ref())?.deref()
    }))
}

/// Visualizer for scoped/intrusive pointer and array wrappers.
struct ScopedPointerVisualizer
{
    element: Option<String>,
    value: Box<dyn ValueHandle>,
}

impl Visualizer for ScopedPointerVisualizer
{
    fn summary(&self) -> String
    {
        raw_address(self.value.as_ref()).to_string()
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        Some(pointee_cursor(self.value.as_ref(), self.element.as_deref()))
    }

    fn display_hint(&self) -> DisplayHint
    {
        // One synthetic `value` key: the host renders an expandable node.
        DisplayHint::MapLike
    }
}

/// Visualizer for shared/weak pointer and array wrappers.
struct SharedPointerVisualizer
{
    element: Option<String>,
    value: Box<dyn ValueHandle>,
}

impl SharedPointerVisualizer
{
    /// Strong and weak counts read from the shared control block.
    ///
    /// `None` when the control block is null or unreadable; the summary then
    /// omits counts and shows only the address.
    fn reference_counts(&self) -> Option<(i64, i64)>
    {
        let control = match self.value.field("pn").and_then(|pn| pn.field("pi_")) {
            Ok(control) => control,
            Err(err) => {
                debug!(error = %err, "failed to read control block field");
                return None;
            }
        };

        if control.is_null().unwrap_or(true) {
            return None;
        }

        let block = match control.deref() {
            Ok(block) => block,
            Err(err) => {
                debug!(error = %err, "control block unreadable");
                return None;
            }
        };

        let strong = block.field("use_count_").and_then(|f| f.as_i64()).ok()?;
        let weak = block.field("weak_count_").and_then(|f| f.as_i64()).ok()?;
        Some((strong, weak))
    }
}

impl Visualizer for SharedPointerVisualizer
{
    fn summary(&self) -> String
    {
        let address = raw_address(self.value.as_ref());
        if address.is_null() {
            return address.to_string();
        }

        match self.reference_counts() {
            Some((strong, weak)) => format!("(count {strong}, weak count {weak}) {address}"),
            None => address.to_string(),
        }
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        Some(pointee_cursor(self.value.as_ref(), self.element.as_deref()))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::MapLike
    }
}
