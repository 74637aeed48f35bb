//! A headless engine for virtualized, sectioned lists.
//!
//! For a controller that tracks scroll state and helpers for rendering and sticky headers,
//! see the `fastlist-adapter` crate.
//!
//! A list is described by a row count per section and a height for each kind of item
//! (header, section header, row, section footer, footer), either constant or computed per
//! item. From that, this crate:
//! - lays out only the items that intersect a window and folds the rest into spacers
//!   ([`LayoutComputer::compute`]),
//! - keeps item keys stable across recomputations so a renderer can diff instead of
//!   remounting ([`Recycler`]),
//! - maps `(section, row)` back to a scroll offset ([`LayoutComputer::compute_scroll_offset`]),
//! - quantizes scroll positions so the layout is only recomputed when the scroll position
//!   crosses a block boundary ([`Block`]).
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - container height and scroll offset
//! - rendering for each item kind
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod height;
mod layout;
mod options;
mod recycler;
mod types;
mod window;


pub use height::Height;
pub use layout::LayoutComputer;
pub use options::{
    FooterHeight, HeaderHeight, ListOptions, RowHeight, SectionFooterHeight, SectionHeight,
};
pub use recycler::{Recycler, Slot};
pub use types::{Item, ItemKey, ItemKind, Layout, ScrollPosition};
pub use window::{Block, is_offset_visible};
