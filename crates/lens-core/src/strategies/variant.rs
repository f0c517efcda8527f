//! Tagged-union (variant) strategy.
//!
//! A variant stores a discriminant index and a raw byte buffer. The summary
//! reads the discriminant, looks up the alternative type name at that index
//! in the template parameter list, and tries to reinterpret the buffer as
//! that type; if reinterpretation fails the raw buffer is shown instead.
//!
//! Alternative names are parsed with the bracket-aware splitter in
//! [`typename`](crate::typename), so alternatives that are themselves
//! templated (`variant<map<int, string>, bar>`) index correctly.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::host::ValueHandle;
use crate::typename;
use crate::visualizer::{Visualizer, VisualizerDescriptor};

static VARIANT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^boost::variant<(.*)>$").expect("variant pattern"));

/// Descriptor for tagged-union wrappers.
#[must_use]
pub fn variant_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "variant",
        Box::new(|name, _| VARIANT_PATTERN.is_match(name)),
        Box::new(|name, value| {
            Box::new(VariantVisualizer {
                type_name: name.to_string(),
                value: value.clone_box(),
            })
        }),
    )
}

struct VariantVisualizer
{
    type_name: String,
    value: Box<dyn ValueHandle>,
}

impl VariantVisualizer
{
    /// Render the stored alternative, falling back to the raw buffer.
    fn stored_value(&self, alternative: Option<&str>) -> String
    {
        let buffer = match self
            .value
            .field("storage_")
            .and_then(|storage| storage.field("data_"))
            .and_then(|data| data.field("buf"))
        {
            Ok(buffer) => buffer,
            Err(err) => {
                debug!(error = %err, "variant storage unreadable");
                return "<unreadable>".to_string();
            }
        };

        if let Some(alternative) = alternative {
            let reinterpreted = self
                .value
                .lookup_type(alternative)
                .and_then(|ty| buffer.cast(ty.as_ref()))
                .and_then(|cast| cast.display_string());
            match reinterpreted {
                Ok(rendered) => return rendered,
                Err(err) => {
                    debug!(alternative, error = %err, "failed to reinterpret variant storage; showing raw buffer");
                }
            }
        }

        buffer.display_string().unwrap_or_else(|_| "<unreadable>".to_string())
    }
}

impl Visualizer for VariantVisualizer
{
    fn summary(&self) -> String
    {
        let which = match self.value.field("which_").and_then(|field| field.as_i64()) {
            Ok(which) => which,
            Err(err) => {
                debug!(error = %err, "variant discriminant unreadable");
                return "(union) <unreadable discriminant>".to_string();
            }
        };

        let alternatives = typename::template_args(&self.type_name).unwrap_or_default();
        let alternative = usize::try_from(which).ok().and_then(|index| alternatives.get(index));
        let rendered = self.stored_value(alternative.map(String::as_str));
        let type_label = alternative.map_or("?", String::as_str);

        format!("(union) discriminant = {which}, type = {type_label}, value = {rendered}")
    }
}
