//! Bounded-sequence strategies: iterator ranges, fixed-size arrays, and
//! char buffers rendered as short strings.
//!
//! All three enumerate positional `[i]` children through single-pass
//! cursors. The char-buffer strategy additionally decodes a prefix of the
//! buffer as text for its summary; the buffer's declared size, not the
//! first NUL, defines its extent, so embedded NULs render as a visible
//! escape instead of terminating the string.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::children::{ChildCursor, ChildEntry, EmptyCursor, IndexedCursor};
use crate::host::{TypeDescriptor, TypeKind, ValueHandle};
use crate::types::{Address, DisplayHint};
use crate::visualizer::{Visualizer, VisualizerDescriptor};

/// Longest text prefix a char-buffer summary will decode.
pub const CHAR_BUFFER_SUMMARY_CAP: usize = 64;

/// Marker appended to a truncated char-buffer summary.
const TRUNCATION_MARKER: &str = " ... \"";

static RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^boost::iterator_range<.*>$").expect("range pattern"));

static ARRAY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^boost::array<(.*)>$").expect("array pattern"));

/// Descriptor for begin/end iterator ranges.
#[must_use]
pub fn iterator_range_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "iterator-range",
        Box::new(|name, _| RANGE_PATTERN.is_match(name)),
        Box::new(|name, value| {
            Box::new(IteratorRangeVisualizer {
                type_name: name.to_string(),
                value: value.clone_box(),
            })
        }),
    )
}

/// Descriptor for fixed-size array wrappers.
#[must_use]
pub fn fixed_array_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "fixed-array",
        Box::new(|name, _| ARRAY_PATTERN.is_match(name)),
        Box::new(|name, value| {
            Box::new(FixedArrayVisualizer {
                type_name: name.to_string(),
                value: value.clone_box(),
            })
        }),
    )
}

/// Descriptor for fixed-size byte/char buffers.
///
/// These cannot be recognized by name; the predicate inspects the type
/// descriptor: an array whose stripped element type is a one-byte char or
/// integer.
#[must_use]
pub fn char_buffer_descriptor() -> VisualizerDescriptor
{
    VisualizerDescriptor::new(
        "char-buffer",
        Box::new(|_, ty| is_char_buffer(ty)),
        Box::new(|_, value| {
            Box::new(CharBufferVisualizer {
                value: value.clone_box(),
            })
        }),
    )
}

fn is_char_buffer(ty: &dyn TypeDescriptor) -> bool
{
    if !ty.is_array() {
        return false;
    }
    let Some(element) = ty.target_type() else {
        return false;
    };
    let element = element.strip_typedefs_and_qualifiers();
    matches!(element.kind(), TypeKind::Char | TypeKind::Int) && element.byte_size() == Some(1)
}

/// Visualizer for begin/end cursor ranges.
struct IteratorRangeVisualizer
{
    type_name: String,
    value: Box<dyn ValueHandle>,
}

impl IteratorRangeVisualizer
{
    /// Element count, `end - begin` in elements.
    fn length(&self) -> Option<u64>
    {
        let begin = self.value.field("m_Begin").ok()?;
        let end = self.value.field("m_End").ok()?;
        let begin_addr = begin.as_address().ok()?.value();
        let end_addr = end.as_address().ok()?.value();
        let element_size = begin.value_type().target_type().and_then(|ty| ty.byte_size()).filter(|size| *size > 0)?;
        Some(end_addr.saturating_sub(begin_addr) / element_size)
    }
}

impl Visualizer for IteratorRangeVisualizer
{
    fn summary(&self) -> String
    {
        match self.length() {
            Some(length) => format!("{} of length {length}", self.type_name),
            None => {
                debug!("range endpoints unreadable; summary omits length");
                self.type_name.clone()
            }
        }
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        let cursor = self.value.field("m_Begin").and_then(|begin| {
            let end = self.value.field("m_End")?.as_address()?;
            Ok(RangeCursor {
                item: begin,
                end,
                count: 0,
            })
        });

        match cursor {
            Ok(cursor) => Some(Box::new(cursor)),
            Err(err) => {
                debug!(error = %err, "range endpoints unreadable; yielding no children");
                Some(Box::new(EmptyCursor))
            }
        }
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::Array
    }
}

/// Walks a begin cursor toward the end sentinel one element per pull.
struct RangeCursor
{
    item: Box<dyn ValueHandle>,
    end: Address,
    count: u64,
}

impl ChildCursor for RangeCursor
{
    fn advance(&mut self) -> Option<ChildEntry>
    {
        let here = match self.item.as_address() {
            Ok(here) => here,
            Err(err) => {
                debug!(error = %err, "range cursor unreadable; ending child sequence");
                return None;
            }
        };
        if here == self.end {
            return None;
        }

        let element = match self.item.deref() {
            Ok(element) => element,
            Err(err) => {
                debug!(error = %err, "range element unreadable; ending child sequence");
                return None;
            }
        };
        match self.item.pointer_add(1) {
            Ok(next) => self.item = next,
            Err(err) => {
                debug!(error = %err, "range cursor cannot advance; ending child sequence");
                return None;
            }
        }

        let index = self.count;
        self.count += 1;
        Some(ChildEntry::indexed(index, element))
    }
}

/// Visualizer for fixed-size array wrappers.
struct FixedArrayVisualizer
{
    type_name: String,
    value: Box<dyn ValueHandle>,
}

impl FixedArrayVisualizer
{
    /// Element count from the inner array type, falling back to the second
    /// template parameter of the wrapper name.
    fn length(&self) -> Option<u64>
    {
        if let Ok(elems) = self.value.field("elems") {
            if let Some(length) = elems.value_type().array_length() {
                return Some(length);
            }
        }

        crate::typename::template_args(&self.type_name)?.get(1)?.parse().ok()
    }
}

impl Visualizer for FixedArrayVisualizer
{
    fn summary(&self) -> String
    {
        match self.value.field("elems").and_then(|elems| elems.display_string()) {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!(error = %err, "array storage unreadable");
                self.type_name.clone()
            }
        }
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        let elems = match self.value.field("elems") {
            Ok(elems) => elems,
            Err(err) => {
                debug!(error = %err, "array storage unreadable; yielding no children");
                return Some(Box::new(EmptyCursor));
            }
        };
        let Some(length) = self.length() else {
            debug!("array length not recoverable; yielding no children");
            return Some(Box::new(EmptyCursor));
        };

        Some(Box::new(IndexedCursor::new(elems, length)))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::Array
    }
}

/// Visualizer for fixed-size char buffers shown as short strings.
struct CharBufferVisualizer
{
    value: Box<dyn ValueHandle>,
}

impl CharBufferVisualizer
{
    fn buffer_len(&self) -> u64
    {
        // One-byte elements, so the byte size is the element count.
        self.value.value_type().byte_size().unwrap_or(0)
    }
}

impl Visualizer for CharBufferVisualizer
{
    fn summary(&self) -> String
    {
        let total = usize::try_from(self.buffer_len()).unwrap_or(0);
        let take = total.min(CHAR_BUFFER_SUMMARY_CAP);
        let bytes = match self.value.read_bytes(take) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(error = %err, "char buffer unreadable");
                return "\"\"".to_string();
            }
        };

        let mut text = String::new();
        for byte in bytes.iter().take(take) {
            if *byte == 0 {
                // The declared size, not the first NUL, bounds the buffer.
                text.push_str("\\000");
            } else if byte.is_ascii() {
                text.push(char::from(*byte));
            }
            // Non-ASCII bytes are skipped, not fatal.
        }

        let suffix = if total > CHAR_BUFFER_SUMMARY_CAP {
            TRUNCATION_MARKER
        } else {
            "\""
        };
        format!("\"{text}{suffix}")
    }

    fn children(&self) -> Option<Box<dyn ChildCursor>>
    {
        // Every raw element stays reachable for per-byte inspection.
        Some(Box::new(IndexedCursor::new(self.value.clone_box(), self.buffer_len())))
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::StringLike
    }
}
