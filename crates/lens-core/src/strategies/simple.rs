//! Simple wrapper strategies: tri-state boolean, reference wrapper, and
//! filesystem path.
//!
//! Single-field reads with no child decomposition; all three render as
//! plain scalars.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::host::ValueHandle;
use crate::visualizer::{Visualizer, VisualizerDescriptor};

static TRIBOOL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^boost::logic::tribool$").expect("tribool pattern"));

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^boost::reference_wrapper<(.*)>$").expect("reference wrapper pattern"));

static PATH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^boost::filesystem::basic_path<(.*)>$").expect("path pattern"));

/// Descriptor for tri-state booleans.
#[must_use]
pub fn tribool_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "tribool",
        Box::new(|name, _| TRIBOOL_PATTERN.is_match(name)),
        Box::new(|_, value| {
            Box::new(TriboolVisualizer {
                value: value.clone_box(),
            })
        }),
    )
}

/// Descriptor for reference wrappers.
#[must_use]
pub fn reference_wrapper_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "reference-wrapper",
        Box::new(|name, _| REFERENCE_PATTERN.is_match(name)),
        Box::new(|name, value| {
            Box::new(ReferenceWrapperVisualizer {
                type_name: name.to_string(),
                value: value.clone_box(),
            })
        }),
    )
}

/// Descriptor for filesystem paths.
#[must_use]
pub fn path_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "path",
        Box::new(|name, _| PATH_PATTERN.is_match(name)),
        Box::new(|_, value| {
            Box::new(PathVisualizer {
                value: value.clone_box(),
            })
        }),
    )
}

/// Tri-state boolean: integer code 0/1/other maps to false/true/indeterminate.
struct TriboolVisualizer
{
    value: Box<dyn ValueHandle>,
}

impl Visualizer for TriboolVisualizer
{
    fn summary(&self) -> String
    {
        let state = match self.value.field("value").and_then(|field| field.as_i64()) {
            Ok(state) => state,
            Err(err) => {
                debug!(error = %err, "tribool state unreadable; rendering as indeterminate");
                return "indeterminate".to_string();
            }
        };

        match state {
            0 => "false".to_string(),
            1 => "true".to_string(),
            _ => "indeterminate".to_string(),
        }
    }
}

/// Reference wrapper: dereferences its target and renders `(typeName) value`.
struct ReferenceWrapperVisualizer
{
    type_name: String,
    value: Box<dyn ValueHandle>,
}

impl Visualizer for ReferenceWrapperVisualizer
{
    fn summary(&self) -> String
    {
        let target = self
            .value
            .field("t_")
            .and_then(|target| target.deref())
            .and_then(|target| target.display_string());
        match target {
            Ok(rendered) => format!("({}) {rendered}", self.type_name),
            Err(err) => {
                debug!(error = %err, "reference target unreadable");
                format!("({})", self.type_name)
            }
        }
    }
}

/// Filesystem path: renders the stored path field verbatim.
struct PathVisualizer
{
    value: Box<dyn ValueHandle>,
}

impl Visualizer for PathVisualizer
{
    fn summary(&self) -> String
    {
        match self.value.field("m_path").and_then(|path| path.display_string()) {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!(error = %err, "stored path unreadable");
                "<unreadable>".to_string()
            }
        }
    }
}
