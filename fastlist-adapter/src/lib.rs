//! Adapter utilities for the `fastlist` crate.
//!
//! The `fastlist` crate is UI-agnostic and focuses on layout math and key recycling. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A scroll-driven controller that recomputes the layout once per block of scroll distance
//!   and reports scroll direction and end-of-content
//! - Dispatch of laid-out items to a renderer
//! - Sticky section header geometry
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod render;
mod sticky;

#[cfg(test)]
mod tests;

pub use controller::{
    DEFAULT_END_REACHED_THROTTLE_MS, EndReached, ListController, OnChangeCallback,
    OnEndReachedCallback, ScrollDirection, ScrollView,
};
pub use render::{ItemRenderer, Rendered, RenderedItem, render_items};
pub use sticky::StickyHeader;
