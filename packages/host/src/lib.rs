//! # Twig Host
//!
//! The host-tree interface the renderer materializes into, plus an in-memory
//! implementation.
//!
//! ## Contents
//!
//! - [`HostTree`]: node creation, class/style/attribute primitives, event
//!   listeners and range operations. A browser binding would implement it on
//!   top of the DOM.
//! - [`HostRange`]: a `(container, start, end)` triple of child offsets. Ranges
//!   are values, not live objects.
//! - [`MemoryDocument`]: a reference-counted document used by tests and the CLI.
//!   [`to_html`] and [`NodeSnapshot`] turn its subtrees into output.

pub mod error;
pub mod event;
pub mod html;
pub mod memory;
pub mod range;
pub mod snapshot;
pub mod tree;

pub use error::{HostError, HostResult};
pub use event::{Event, EventHandler, ListenerId};
pub use html::{inner_html, to_html, HtmlOptions};
pub use memory::{MemoryDocument, MemoryNode, WeakMemoryNode};
pub use range::HostRange;
pub use snapshot::NodeSnapshot;
pub use tree::HostTree;
