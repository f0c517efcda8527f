//! # Types
//!
//! Host-agnostic types used throughout the visualization engine.
//!
//! These types abstract away host-specific details, allowing the engine to
//! work with concepts like "memory address" and "display hint" without
//! knowing whether the debuggee is a native process, a core dump, or a
//! remote managed-runtime VM.

use std::fmt;

/// Strongly typed memory address
///
/// This wrapper around `u64` provides type safety when working with memory
/// addresses. It prevents accidentally mixing addresses with other `u64`
/// values (like sizes, counts, or discriminant indices).
///
/// ## Why use a newtype?
///
/// - **Type safety**: Prevents accidentally passing a size where an address is expected
/// - **Self-documenting**: Makes it clear that a value represents a memory address
/// - **Future extensibility**: Can add address validation or methods later
///
/// ## Example
///
/// ```rust
/// use lens_core::types::Address;
///
/// let addr = Address::from(0x1000);
/// assert_eq!(addr.value(), 0x1000);
/// assert_eq!(addr.to_string(), "0x0000000000001000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address
{
    /// The null address (0x0)
    ///
    /// This is the null sentinel for pointer-like wrappers: a wrapper whose
    /// raw address equals `ZERO` has no pointee and enumerates no children.
    pub const ZERO: Self = Address(0);

    /// Create a new address from a `u64` value
    ///
    /// This is equivalent to `Address::from(value)` but can be used in const contexts.
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Get the raw `u64` value of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Check whether this is the null sentinel
    ///
    /// ## Example
    ///
    /// ```rust
    /// use lens_core::types::Address;
    ///
    /// assert!(Address::ZERO.is_null());
    /// assert!(!Address::from(0x1000).is_null());
    /// ```
    pub const fn is_null(self) -> bool
    {
        self.0 == 0
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Tag telling the host how to render a visualized node
///
/// A visualizer returns one of these alongside its summary so the host can
/// pick an appropriate presentation. The engine never renders anything
/// itself; the hint is advice, and a host is free to ignore it.
///
/// ## Variants
///
/// - `Array`: children are an ordered sequence; render with indices
/// - `StringLike`: the summary is short text; render like a string value
/// - `MapLike`: children are keyed; pointer-like wrappers also use this so
///   their single synthetic `value` child renders as an expandable node
///   rather than a plain scalar
/// - `Scalar`: no special treatment; render the summary inline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayHint
{
    /// Ordered sequence of children
    Array,
    /// Short text value
    StringLike,
    /// Keyed children (or a single synthetic key)
    MapLike,
    /// Plain scalar, no special rendering
    #[default]
    Scalar,
}

impl DisplayHint
{
    /// Wire-friendly name of the hint, as debugger protocols spell it
    ///
    /// ## Example
    ///
    /// ```rust
    /// use lens_core::types::DisplayHint;
    ///
    /// assert_eq!(DisplayHint::Array.as_str(), "array");
    /// assert_eq!(DisplayHint::Scalar.as_str(), "none");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self {
            DisplayHint::Array => "array",
            DisplayHint::StringLike => "string",
            DisplayHint::MapLike => "map",
            DisplayHint::Scalar => "none",
        }
    }
}

impl fmt::Display for DisplayHint
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}
