/// Geometry of a mounted section header, for pinning it to the top of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyHeader {
    pub offset: f64,
    pub height: f64,
    /// Offset of the next section header in the same item list, if one is mounted.
    pub next_section_offset: Option<f64>,
}

impl StickyHeader {
    /// Vertical translation to apply to the header at `scroll_top`.
    ///
    /// The header follows the viewport top once scrolled past, and is pushed off by the next
    /// section header: the translation stops growing when its bottom edge meets the next
    /// header's top.
    pub fn translation(&self, scroll_top: f64) -> f64 {
        let translation = (scroll_top - self.offset).max(0.0);
        match self.collision_point() {
            Some(collision) => translation.min(collision - self.offset),
            None => translation,
        }
    }

    /// Scroll position at which the next header starts pushing this one.
    fn collision_point(&self) -> Option<f64> {
        let collision = self.next_section_offset? - self.height;
        (collision >= self.offset).then_some(collision)
    }
}
