//! A headless recycling scroll view.
//!
//! This crate keeps a potentially huge ordered list of logical items, but only instantiates visual
//! nodes for the items intersecting the viewport. Nodes are recycled through a per-identifier
//! pool, so memory and creation cost scale with the viewport, not the list.
//!
//! The pieces, leaves first:
//! - [`EntityPool`]: identifier-keyed node pool with a [`ReturnPolicy`] for idle nodes.
//! - [`VirtualList`]: items with identifiers, optional size overrides and derived positions.
//! - [`Windower`]: incremental computation of the visible [`ViewportRange`].
//! - [`ScrollView`]: drives the above from list mutations and viewport changes, and keeps the
//!   attached nodes consistent with the visible range.
//!
//! It is UI-agnostic. A rendering host is expected to provide:
//! - node creation and the [`PooledNode`] operations (activate, move, resize, reparent)
//! - the viewport extent and scroll offset along the scroll axis
//! - an [`ItemSource`] that names each item's identifier and fills nodes with content
//!
//! Everything runs synchronously on the caller's thread.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod key;
mod list;
mod options;
mod pool;
mod scroll_view;
mod types;
mod windower;


pub use error::{PoolError, Rejected, ScrollError};
pub use key::Identifier;
pub use list::{BatchReport, Item, VirtualList};
pub use options::{KeyOf, ScrollViewOptions, Template};
pub use pool::{CreateNode, EntityPool, NodeHook, PooledNode, Recipe, ReturnPolicy};
pub use scroll_view::{ItemSource, ScrollView};
pub use types::{Align, Axis, ListLayout, Position, Size, Viewport, ViewportRange};
pub use windower::{AxisExtents, Windower, cold_scan};

#[doc(hidden)]
pub use key::KeyBound;
