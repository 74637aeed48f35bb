/// A quantized scroll position.
///
/// The scroll axis is cut into batches of half the container height. The block is the batch
/// the scroll position falls in, and the layout window is the block padded by one batch on
/// each side. As long as scrolling stays inside the block, the window (and so the layout) does
/// not change; recomputation happens once per batch of scroll distance instead of once per
/// scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub batch_size: f64,
    pub block_start: f64,
    pub block_end: f64,
}

impl Block {
    /// The block of a container that has not been measured yet.
    pub const UNMEASURED: Self = Self {
        batch_size: 0.0,
        block_start: 0.0,
        block_end: 0.0,
    };

    pub fn compute(container_height: f64, scroll_top: f64) -> Self {
        if !(container_height.is_finite() && container_height > 0.0) {
            return Self::UNMEASURED;
        }
        let scroll_top = if scroll_top.is_finite() {
            scroll_top
        } else {
            vwarn!(scroll_top, "Block::compute: non-finite scroll_top");
            0.0
        };

        let batch_size = (container_height / 2.0).ceil();
        let block_number = (scroll_top / batch_size).ceil();
        let block_start = batch_size * block_number;
        let block_end = block_start + batch_size;

        Self {
            batch_size,
            block_start,
            block_end,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.batch_size > 0.0
    }

    /// The `(top, bottom)` window to lay out for this block.
    pub fn window(&self) -> (f64, f64) {
        (
            self.block_start - self.batch_size,
            self.block_end + self.batch_size,
        )
    }
}

/// Whether `offset` lies inside the viewport `[scroll_top, scroll_top + container_height]`.
pub fn is_offset_visible(offset: f64, scroll_top: f64, container_height: f64) -> bool {
    offset >= scroll_top && offset <= scroll_top + container_height
}
