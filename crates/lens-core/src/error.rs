//! # Error Types
//!
//! General error handling for the visualization engine.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.
//!
//! ## Error Taxonomy
//!
//! The engine distinguishes three failure classes:
//!
//! 1. **No visualizer applies** — not an error at all. [`Registry::find`]
//!    returns `None` and the host falls back to its default raw display.
//! 2. **Introspection failure** — the variants below. These are raised by
//!    host handle operations (a bad cast, an unreadable address, a failed
//!    remote invocation) and are always caught locally by the strategy that
//!    triggered them, degrading to an empty child sequence or a null-style
//!    summary. They never escape to the host.
//! 3. **Programming-logic violation** — e.g. learning an entry type twice.
//!    These are asserts, not `LensError` variants, because they indicate a
//!    bug in the engine itself rather than bad debuggee data.
//!
//! [`Registry::find`]: crate::registry::Registry::find

use thiserror::Error;

use crate::types::Address;

/// Main error type for introspection operations against the debuggee
///
/// Every fallible operation on a [`ValueHandle`](crate::host::ValueHandle) or
/// [`TypeDescriptor`](crate::host::TypeDescriptor) returns one of these.
/// Strategies catch them at the point of failure and convert them into a
/// degraded-but-valid result; see the module docs for the full taxonomy.
#[derive(Error, Debug)]
pub enum LensError
{
    /// The value's type has no field with the given name
    ///
    /// Raised by `ValueHandle::field` when the debuggee layout does not match
    /// the shape the strategy expected (e.g. a different library version).
    #[error("Value has no field named '{0}'")]
    MissingField(String),

    /// Index access outside the value's bounds
    #[error("Index {0} is out of bounds")]
    IndexOutOfBounds(u64),

    /// The value could not be reinterpreted as the requested type
    ///
    /// Raised by `ValueHandle::cast`. Strategies treat this as "element type
    /// not recoverable" and degrade to an empty child sequence.
    #[error("Cannot cast value to type '{0}'")]
    BadCast(String),

    /// The operation requires a pointer-typed value
    ///
    /// Raised by `ValueHandle::deref` and `ValueHandle::pointer_add` when the
    /// handle does not refer to a pointer.
    #[error("Value is not a pointer")]
    NotAPointer,

    /// Memory at the given address could not be read from the debuggee
    ///
    /// The debuggee can change state between inspections, so a pointer that
    /// was valid a moment ago may now dangle. The child-enumeration protocol
    /// is lazy precisely so this failure stays contained to the one node the
    /// host expanded.
    #[error("Unreadable memory at {0}")]
    UnreadableMemory(Address),

    /// No type with the given name exists in the debuggee's metadata
    ///
    /// Raised by `ValueHandle::lookup_type`, typically when a template
    /// parameter name parsed out of a canonical type name does not resolve.
    #[error("Unknown type '{0}'")]
    UnknownType(String),

    /// A remote method invocation against a managed runtime failed
    ///
    /// Only managed-runtime hosts raise this; the method may have thrown, the
    /// remote VM may be wedged, or the object may have been collected.
    #[error("Failed to invoke '{method}': {details}")]
    InvokeFailed
    {
        /// Name of the remote method that was invoked
        method: String,
        /// Host-provided details about the failure
        details: String,
    },

    /// A canonical type name could not be parsed into its template parts
    #[error("Failed to parse type name '{0}'")]
    TypeNameParse(String),

    /// The host does not support this operation on this handle
    ///
    /// Native (memory-based) hosts keep the default implementations of the
    /// managed-runtime surface (`invoke`, `concrete_type`), which return this.
    #[error("Operation not supported by this host: {0}")]
    Unsupported(&'static str),
}

/// Convenience type alias for `Result<T, LensError>`
///
/// ```rust
/// use lens_core::error::LensResult;
/// fn foo() -> LensResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type LensResult<T> = std::result::Result<T, LensError>;
