use std::fmt;
use std::sync::Arc;

use fastlist::{Block, Item, Layout, LayoutComputer, ListOptions, is_offset_visible};

use crate::{ItemRenderer, Rendered, render_items};

/// A callback fired after the controller recomputed its layout.
pub type OnChangeCallback = Arc<dyn Fn(&ListController) + Send + Sync>;

/// A callback fired when scrolling down gets within two batches of the end of the content.
pub type OnEndReachedCallback = Arc<dyn Fn(EndReached) + Send + Sync>;

pub const DEFAULT_END_REACHED_THROTTLE_MS: u64 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Neutral,
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndReached {
    /// Scroll position that triggered the event (the drag target for end-of-drag events).
    pub scroll_top: f64,
    pub direction: ScrollDirection,
}

/// The scroll container the list lives in.
pub trait ScrollView {
    fn scroll_to(&mut self, offset: f64, animated: bool);
}

/// A framework-neutral controller that owns a [`LayoutComputer`] and keeps its layout in sync
/// with the scroll container.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_layout` when the container is resized
/// - `on_scroll` for every scroll event
/// - `on_scroll_end` / `on_scroll_end_drag` when scrolling settles or a drag is released
///
/// The layout is only recomputed when the scroll position crosses a [`Block`] boundary, so most
/// scroll events are cheap. `on_change` fires after each recomputation.
#[derive(Clone)]
pub struct ListController {
    computer: LayoutComputer,
    container_height: f64,
    scroll_top: f64,
    content_offset: f64,
    block: Block,
    layout: Layout,
    direction: ScrollDirection,
    end_reached_throttle_ms: u64,
    last_end_reached_ms: Option<u64>,
    on_change: Option<OnChangeCallback>,
    on_end_reached: Option<OnEndReachedCallback>,
}

impl ListController {
    /// Creates an unmeasured controller: the layout stays empty until `on_layout` (or a scroll
    /// event carrying a viewport height) reports a container height.
    pub fn new(options: ListOptions) -> Self {
        let mut controller = Self {
            computer: LayoutComputer::new(options),
            container_height: 0.0,
            scroll_top: 0.0,
            content_offset: 0.0,
            block: Block::UNMEASURED,
            layout: Layout::default(),
            direction: ScrollDirection::Neutral,
            end_reached_throttle_ms: DEFAULT_END_REACHED_THROTTLE_MS,
            last_end_reached_ms: None,
            on_change: None,
            on_end_reached: None,
        };
        controller.recompute();
        controller
    }

    pub fn with_container_height(mut self, container_height: f64) -> Self {
        self.container_height = container_height;
        self.block = Block::compute(self.container_height, self.scroll_top);
        self.recompute();
        self
    }

    /// Starts scrolled to `-inset`, as a scroll container with a top content inset does.
    pub fn with_content_inset(mut self, inset: f64) -> Self {
        self.scroll_top = -inset;
        self.block = Block::compute(self.container_height, self.scroll_top);
        self.recompute();
        self
    }

    /// Scroll position `scroll_to_top` returns to.
    pub fn with_content_offset(mut self, content_offset: f64) -> Self {
        self.content_offset = content_offset;
        self
    }

    pub fn with_end_reached_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.end_reached_throttle_ms = throttle_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: impl Fn(&ListController) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: impl Fn(EndReached) + Send + Sync + 'static,
    ) -> Self {
        self.on_end_reached = Some(Arc::new(on_end_reached));
        self
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&ListController) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_end_reached(
        &mut self,
        on_end_reached: Option<impl Fn(EndReached) + Send + Sync + 'static>,
    ) {
        self.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
    }

    pub fn options(&self) -> &ListOptions {
        self.computer.options()
    }

    /// Replaces the configuration and recomputes the layout.
    pub fn set_options(&mut self, options: ListOptions) {
        vdebug!(
            sections = options.sections.len(),
            "ListController::set_options"
        );
        self.computer.set_options(options);
        self.recompute();
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        let mut next = self.computer.options().clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn computer(&self) -> &LayoutComputer {
        &self.computer
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn items(&self) -> &[Item] {
        &self.layout.items
    }

    pub fn total_height(&self) -> f64 {
        self.layout.total_height
    }

    pub fn block(&self) -> Block {
        self.block
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Whether the list has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.computer.is_empty()
    }

    /// Call this when the scroll container is resized.
    ///
    /// Returns whether the layout was recomputed.
    pub fn on_layout(&mut self, container_height: f64) -> bool {
        vtrace!(container_height, "ListController::on_layout");
        if !(container_height.is_finite() && container_height >= 0.0) {
            vwarn!(
                container_height,
                "ListController::on_layout: invalid container height, treating as unmeasured"
            );
        }
        self.container_height = container_height;
        self.update_block()
    }

    /// Call this for every scroll event.
    ///
    /// A positive `viewport_height` also updates the container height; pass `0.0` when the
    /// event does not carry one. Returns whether the layout was recomputed.
    pub fn on_scroll(&mut self, scroll_top: f64, viewport_height: f64, now_ms: u64) -> bool {
        if scroll_top > self.scroll_top {
            self.direction = ScrollDirection::Down;
        } else if scroll_top < self.scroll_top {
            self.direction = ScrollDirection::Up;
        }
        if viewport_height > 0.0 {
            self.container_height = viewport_height;
        }
        self.scroll_top = scroll_top;
        vtrace!(
            scroll_top,
            container_height = self.container_height,
            direction = ?self.direction,
            "ListController::on_scroll"
        );

        let changed = self.update_block();
        self.check_end_reached(scroll_top, now_ms);
        changed
    }

    /// Call this when scrolling momentum has ended.
    pub fn on_scroll_end(&mut self) {
        self.direction = ScrollDirection::Neutral;
    }

    /// Call this when a drag is released. `target_y` is where the scroll will settle.
    pub fn on_scroll_end_drag(&mut self, y: f64, target_y: f64, now_ms: u64) {
        self.direction = if y > target_y {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        self.check_end_reached(target_y, now_ms);
    }

    /// Whether `offset` is inside the current viewport.
    pub fn is_item_visible(&self, offset: f64) -> bool {
        is_offset_visible(offset, self.scroll_top, self.container_height)
    }

    /// Scroll position that brings `(section, row)` into view with its section header above it.
    ///
    /// Returns `None` for a target that does not exist.
    pub fn scroll_to_item_offset(&self, section: usize, row: usize) -> Option<f64> {
        let position = self.computer.compute_scroll_offset(section, row)?;
        Some((position.offset - position.section_height).max(0.0))
    }

    /// Scrolls `view` to `(section, row)` and returns the requested offset.
    pub fn scroll_to_item(
        &self,
        view: &mut impl ScrollView,
        section: usize,
        row: usize,
        animated: bool,
    ) -> Option<f64> {
        let offset = self.scroll_to_item_offset(section, row)?;
        vtrace!(section, row, offset, animated, "ListController::scroll_to_item");
        view.scroll_to(offset, animated);
        Some(offset)
    }

    pub fn scroll_to_top(&self, view: &mut impl ScrollView, animated: bool) {
        view.scroll_to(self.content_offset, animated);
    }

    /// Renders the current items, or only the empty state when the list has no rows and the
    /// renderer provides one.
    pub fn render<R: ItemRenderer>(
        &self,
        renderer: &mut R,
        sticky_headers: bool,
    ) -> Rendered<R::Output> {
        if self.is_empty() {
            if let Some(empty) = renderer.render_empty() {
                return Rendered {
                    empty: Some(empty),
                    ..Rendered::default()
                };
            }
        }
        render_items(&self.layout.items, renderer, sticky_headers)
    }

    fn update_block(&mut self) -> bool {
        let block = Block::compute(self.container_height, self.scroll_top);
        if block == self.block {
            return false;
        }
        self.block = block;
        self.recompute();
        self.notify();
        true
    }

    fn recompute(&mut self) {
        if !self.block.is_measured() {
            let options = self.computer.options();
            self.layout = Layout {
                total_height: options.inset_top + options.inset_bottom,
                items: Vec::new(),
            };
            return;
        }

        let (top, bottom) = self.block.window();
        let previous = std::mem::take(&mut self.layout.items);
        self.layout = self.computer.compute(top, bottom, &previous);
        vtrace!(
            block_start = self.block.block_start,
            block_end = self.block.block_end,
            items = self.layout.items.len(),
            "ListController::recompute"
        );
    }

    fn check_end_reached(&mut self, scroll_top: f64, now_ms: u64) {
        if self.direction != ScrollDirection::Down
            || scroll_top + self.block.batch_size * 2.0 < self.layout.total_height
        {
            return;
        }
        let Some(cb) = &self.on_end_reached else {
            return;
        };
        if let Some(last) = self.last_end_reached_ms {
            if now_ms.saturating_sub(last) < self.end_reached_throttle_ms {
                return;
            }
        }
        self.last_end_reached_ms = Some(now_ms);
        cb(EndReached {
            scroll_top,
            direction: self.direction,
        });
    }

    fn notify(&self) {
        if let Some(cb) = &self.on_change {
            cb(self);
        }
    }
}

impl fmt::Debug for ListController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("computer", &self.computer)
            .field("container_height", &self.container_height)
            .field("scroll_top", &self.scroll_top)
            .field("content_offset", &self.content_offset)
            .field("block", &self.block)
            .field("direction", &self.direction)
            .field("items", &self.layout.items.len())
            .field("total_height", &self.layout.total_height)
            .finish_non_exhaustive()
    }
}
