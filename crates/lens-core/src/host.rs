//! # Host Contract
//!
//! The interface the debugger host implements so the engine can introspect
//! debuggee values.
//!
//! The engine never reads debuggee memory or talks to a remote VM itself;
//! everything goes through these two traits. A native host backs them with
//! memory reads against a live or core-dumped process; a managed-runtime
//! host backs them with remote object references and method invocations.
//!
//! ## Why use traits?
//!
//! Traits allow us to:
//! - Keep the engine host-agnostic (GDB-style native hosts, JDI-style VM hosts)
//! - Swap implementations easily (the test suite runs against a mock host)
//! - Hide wire-protocol details behind a clean interface
//!
//! ## Handle Semantics
//!
//! Handles are *borrowed views* into debuggee state, never owning caches of
//! it. The debuggee can change state between inspections, so a handle must
//! never be stored beyond the lifetime of the visualizer it was bound to.
//! `clone_box` duplicates the handle (an address + type, or a remote object
//! reference), not the underlying value.
//!
//! ## Blocking
//!
//! All operations are blocking and synchronous. A hang in the debuggee
//! manifests as a hang in visualization; the engine imposes no timeout of
//! its own (see the crate docs on the resource model).

use crate::error::{LensError, LensResult};
use crate::types::Address;

/// Coarse classification of a debuggee type
///
/// Most dispatch happens on canonical type *names*; the kind exists for the
/// few shapes that cannot be recognized by name, such as anonymous fixed-size
/// char buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind
{
    /// Boolean type
    Bool,
    /// Character type
    Char,
    /// Integer type (any width or signedness)
    Int,
    /// Floating-point type
    Float,
    /// Pointer type
    Pointer,
    /// Fixed-size array type
    Array,
    /// Struct/class/object type
    Struct,
    /// Anything else (unions, functions, unknown)
    Other,
}

/// Opaque handle into the debuggee's type metadata
///
/// Borrowed from the host for the duration of one dispatch call. The engine
/// uses it to canonicalize names, look up field and element types, and
/// recognize char buffers.
pub trait TypeDescriptor
{
    /// Duplicate this descriptor handle
    fn clone_box(&self) -> Box<dyn TypeDescriptor>;

    /// Name of the type, or `None` for anonymous/stripped types
    ///
    /// A `None` here means no visualizer can apply; dispatch falls back to
    /// the host's default rendering.
    fn name(&self) -> Option<String>;

    /// Coarse classification of this type
    fn kind(&self) -> TypeKind;

    /// Whether this type is a reference
    ///
    /// Canonicalization follows exactly one level of reference before
    /// pattern matching.
    fn is_reference(&self) -> bool;

    /// Whether this type is a fixed-size array
    fn is_array(&self) -> bool
    {
        matches!(self.kind(), TypeKind::Array)
    }

    /// Pointee type for pointers/references, element type for arrays
    fn target_type(&self) -> Option<Box<dyn TypeDescriptor>>;

    /// Type of the named field, if this is a struct-like type with that field
    fn field_type(&self, name: &str) -> Option<Box<dyn TypeDescriptor>>;

    /// Size of a value of this type in bytes, if known
    fn byte_size(&self) -> Option<u64>;

    /// Number of elements, if this is a fixed-size array type
    fn array_length(&self) -> Option<u64>;

    /// Resolve typedef aliases and strip cv-qualifiers
    ///
    /// Returns the canonical underlying type used for name pattern matching.
    fn strip_typedefs_and_qualifiers(&self) -> Box<dyn TypeDescriptor>;
}

/// Argument to a remote method invocation on a managed runtime
///
/// Integers are mirrored into the remote VM by the host; values are passed
/// through as-is.
pub enum InvokeArg<'a>
{
    /// An integer mirrored into the debuggee VM
    Int(i64),
    /// An existing debuggee value
    Value(&'a dyn ValueHandle),
}

/// Opaque handle to a location/value in the debuggee
///
/// Either a memory address plus type (native host) or a remote object
/// reference (managed-runtime host). All accessors return fresh handles;
/// nothing is cached, because the debuggee can change state between
/// inspections.
///
/// ## Cast semantics
///
/// `cast` reinterprets the value's storage as the given type at the same
/// location, like a C-style reinterpret: casting a pointer changes its
/// pointee type while keeping the raw address, and casting an aggregate
/// reinterprets its bytes in place. This is what the optional and
/// tagged-union strategies rely on to view raw storage as the element type.
pub trait ValueHandle
{
    /// Duplicate this handle (the handle, not the debuggee value)
    fn clone_box(&self) -> Box<dyn ValueHandle>;

    /// The declared type of this value
    fn value_type(&self) -> Box<dyn TypeDescriptor>;

    /// Access a named field of a struct-like value
    ///
    /// ## Errors
    ///
    /// - `MissingField`: the value's layout has no such field
    /// - `UnreadableMemory`: the field location could not be read
    fn field(&self, name: &str) -> LensResult<Box<dyn ValueHandle>>;

    /// Access an array element by index
    ///
    /// ## Errors
    ///
    /// - `IndexOutOfBounds`: the index is outside the array bounds
    /// - `UnreadableMemory`: the element location could not be read
    fn index(&self, index: u64) -> LensResult<Box<dyn ValueHandle>>;

    /// Dereference a pointer-typed value
    ///
    /// ## Errors
    ///
    /// - `NotAPointer`: the value is not pointer-typed
    /// - `UnreadableMemory`: the pointee address could not be read
    fn deref(&self) -> LensResult<Box<dyn ValueHandle>>;

    /// Reinterpret this value as the given type (see the trait docs)
    ///
    /// ## Errors
    ///
    /// - `BadCast`: the host cannot reinterpret this storage as `ty`
    fn cast(&self, ty: &dyn TypeDescriptor) -> LensResult<Box<dyn ValueHandle>>;

    /// Test this value against the null/zero sentinel
    fn is_null(&self) -> LensResult<bool>;

    /// Numeric value of a pointer-typed handle
    fn as_address(&self) -> LensResult<Address>;

    /// Read this value as a signed integer (flags, counts, discriminants)
    fn as_i64(&self) -> LensResult<i64>;

    /// Read up to `max_len` raw bytes of this value's storage
    fn read_bytes(&self, max_len: usize) -> LensResult<Vec<u8>>;

    /// The host's default rendering of this value
    ///
    /// Used where a strategy embeds a nested value in its own summary (the
    /// managed runtime's `toString`, or the native host's raw formatter).
    fn display_string(&self) -> LensResult<String>;

    /// Advance a pointer-typed handle by `count` elements
    ///
    /// The host scales by the pointee size, like C pointer arithmetic.
    fn pointer_add(&self, count: i64) -> LensResult<Box<dyn ValueHandle>>;

    /// Resolve a type by name in the debuggee's context
    ///
    /// Pointer spellings (`Foo*`) must resolve for native hosts, since
    /// pointer-wrapper strategies cast through them.
    ///
    /// ## Errors
    ///
    /// - `UnknownType`: no type with that name exists in the debuggee
    fn lookup_type(&self, name: &str) -> LensResult<Box<dyn TypeDescriptor>>;

    /// Invoke a method on this value in a managed runtime
    ///
    /// Native hosts keep this default, which reports the operation as
    /// unsupported; strategies that need it only match managed types.
    fn invoke(&self, method: &str, args: &[InvokeArg<'_>]) -> LensResult<Box<dyn ValueHandle>>
    {
        let _ = (method, args);
        Err(LensError::Unsupported("invoke"))
    }

    /// Concrete runtime type of this value
    ///
    /// Managed runtimes report the dynamic type here, which may be more
    /// specific than the declared type; the entry-type learner depends on
    /// that. The default falls back to the declared type.
    fn concrete_type(&self) -> LensResult<Box<dyn TypeDescriptor>>
    {
        Ok(self.value_type())
    }
}
