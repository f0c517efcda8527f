//! # lens-core
//!
//! Host-agnostic engine for rendering runtime values inside a debugger.
//!
//! Given an opaque handle to a debuggee value, the engine picks a
//! shape-specific strategy and produces:
//! - A one-line **summary** of the value
//! - A lazy, single-pass cursor over its labeled **children**
//! - A **display hint** telling the host how to render the node
//!
//! ## Architecture
//!
//! - [`host`] — the two traits a debugger host implements ([`TypeDescriptor`]
//!   and [`ValueHandle`]); the engine never touches debuggee state directly
//! - [`typename`] — canonicalization and template-name parsing
//! - [`registry`] — the ordered strategy registry and dispatch entry point
//! - [`strategies`] — the built-in native and managed-runtime strategies
//!
//! ## Resource Model
//!
//! Everything is synchronous, blocking, and single-threaded: the engine runs
//! on the host's inspection thread and performs no caching, no timeouts, and
//! no background work. Child enumeration is lazy, so inspecting a huge
//! container costs only the reads the host actually pulls.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::rc::Rc;
//!
//! use lens_core::{register_native_visualizers, Registry, ValueHandle};
//!
//! fn inspect(registry: &Registry, value: &dyn ValueHandle)
//! {
//!     if let Some(visualizer) = registry.find(value) {
//!         println!("{}", visualizer.summary());
//!     }
//! }
//!
//! let registry = Rc::new(Registry::new());
//! register_native_visualizers(&registry);
//! ```

pub mod children;
pub mod error;
pub mod host;
pub mod registry;
pub mod strategies;
pub mod typename;
pub mod types;
pub mod visualizer;

pub use children::{ChildCursor, ChildEntry, EmptyCursor, IndexedCursor, SingleValueCursor};
// Re-export commonly used types
pub use error::{LensError, LensResult};
pub use host::{InvokeArg, TypeDescriptor, TypeKind, ValueHandle};
pub use registry::Registry;
pub use strategies::{register_managed_visualizers, register_native_visualizers};
pub use types::{Address, DisplayHint};
pub use visualizer::{Visualizer, VisualizerDescriptor};
