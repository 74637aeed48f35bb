/// Identity of a rendered item. Stable for the same `(kind, section, row)` across
/// recomputations of one [`crate::LayoutComputer`].
pub type ItemKey = u64;

/// What an [`Item`] stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// A coalesced run of content that is outside the computed window.
    Spacer,
    Header,
    Footer,
    SectionHeader,
    Row,
    SectionFooter,
}

impl ItemKind {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Spacer,
        Self::Header,
        Self::Footer,
        Self::SectionHeader,
        Self::Row,
        Self::SectionFooter,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Spacer => 0,
            Self::Header => 1,
            Self::Footer => 2,
            Self::SectionHeader => 3,
            Self::Row => 4,
            Self::SectionFooter => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    pub key: ItemKey,
    /// Distance from the top of the list content (includes `inset_top`).
    pub offset: f64,
    pub height: f64,
    pub section: usize,
    /// Row within `section`; `0` for every kind except [`ItemKind::Row`].
    pub row: usize,
}

impl Item {
    /// Key carried by an item the recycler has not bound yet. Never part of a finished layout.
    pub const UNASSIGNED_KEY: ItemKey = 0;

    pub fn end(&self) -> f64 {
        self.offset + self.height
    }

    pub fn is_spacer(&self) -> bool {
        self.kind == ItemKind::Spacer
    }
}

/// Result of [`crate::LayoutComputer::compute`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Full content height, insets included.
    pub total_height: f64,
    /// Items ordered by offset; together they tile `[0, total_height)`.
    pub items: Vec<Item>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rendered (non-spacer) items.
    pub fn content_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|it| !it.is_spacer())
    }

    pub fn find(&self, kind: ItemKind, section: usize, row: usize) -> Option<&Item> {
        self.items
            .iter()
            .find(|it| it.kind == kind && it.section == section && it.row == row)
    }
}

/// Result of [`crate::LayoutComputer::compute_scroll_offset`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    /// Offset of the target row from the top of the content.
    pub offset: f64,
    /// Height of the target's section header, so callers can keep the row clear of it.
    pub section_height: f64,
}
