//! Optional-value strategy.
//!
//! An optional is either empty or engaged. The summary is one of two fixed
//! labels driven by the wrapper's engaged flag; an engaged optional exposes
//! a single `value` child obtained by reinterpreting the internal storage as
//! the element type. Every introspection failure along the way is treated as
//! "empty" rather than surfacing an error to the host.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::children::{ChildCursor, EmptyCursor, SingleValueCursor};
use crate::host::ValueHandle;
use crate::types::DisplayHint;
use crate::visualizer::{Visualizer, VisualizerDescriptor};

/// Summary for an engaged optional.
pub const INITIALIZED_LABEL: &str = "<initialized optional>";
/// Summary for an empty optional.
pub const UNINITIALIZED_LABEL: &str = "<uninitialized optional>";

static OPTIONAL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^boost::optional<(.*)>$").expect("optional pattern"));

/// Descriptor for optional-value wrappers.
#[must_use]
pub fn optional_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "optional",
        Box::new(|name, _| OPTIONAL_PATTERN.is_match(name)),
        Box::new(|name, value| {
            let element = OPTIONAL_PATTERN
                .captures(name)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().trim().to_string());
            Box::new(OptionalVisualizer {
                element,
                value: value.clone_box(),
            })
        }),
    )
}

struct OptionalVisualizer
{
    element: Option<String>,
    value: Box<dyn ValueHandle>,
}

impl OptionalVisualizer
{
    /// Whether the optional currently holds a value.
    ///
    /// An unreadable flag counts as "empty": the safe degradation, since an
    /// empty optional has no child to dereference.
    fn engaged(&self) -> bool
    {
        match self.value.field("m_initialized").and_then(|flag| flag.as_i64()) {
            Ok(flag) => flag != 0,
            Err(err) => {
                debug!(error = %err, "failed to read optional engaged flag; treating as empty");
                false
            }
        }
    }
}

impl Visualizer for OptionalVisualizer
{
    fn summary(&self) -> String
    {
        if self.engaged() {
            INITIALIZED_LABEL.to_string()
        } else {
            UNINITIALIZED_LABEL.to_string()
        }
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        if !self.engaged() {
            return Some(Box::new(EmptyCursor));
        }

        let Some(element) = self.element.clone() else {
            debug!("optional element type not captured; yielding no children");
            return Some(Box::new(EmptyCursor));
        };

        let value = self.value.clone_box();
        Some(Box::new(SingleValueCursor::new(move || {
            let storage = value.field("m_storage")?.field("dummy_")?.field("data")?;
            let element_ty = value.lookup_type(&element)?;
            storage.cast(element_ty.as_ref())
        })))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::MapLike
    }
}
