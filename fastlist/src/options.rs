use crate::Height;

pub type HeaderHeight = Height<()>;
pub type FooterHeight = Height<()>;
pub type SectionHeight = Height<usize>;
pub type RowHeight = Height<(usize, usize)>;
pub type SectionFooterHeight = Height<usize>;

/// Configuration for [`crate::LayoutComputer`].
///
/// Height callbacks are stored in `Arc`s, so cloning is cheap and adapters can update a few
/// fields and hand the result back via `LayoutComputer::set_options`.
#[derive(Clone, Default)]
pub struct ListOptions {
    pub header_height: HeaderHeight,
    pub footer_height: FooterHeight,
    pub section_height: SectionHeight,
    pub row_height: RowHeight,
    pub section_footer_height: SectionFooterHeight,
    /// Row count per section. Sections with zero rows are skipped entirely.
    pub sections: Vec<usize>,
    /// Space before the header.
    pub inset_top: f64,
    /// Space after the footer.
    pub inset_bottom: f64,
}

impl ListOptions {
    /// Creates options for `sections` (row count per section) with a row height.
    ///
    /// Every other height defaults to `0.0`, which means "not present".
    pub fn new(sections: impl Into<Vec<usize>>, row_height: impl Into<RowHeight>) -> Self {
        Self {
            sections: sections.into(),
            row_height: row_height.into(),
            ..Self::default()
        }
    }

    pub fn with_header_height(mut self, height: impl Into<HeaderHeight>) -> Self {
        self.header_height = height.into();
        self
    }

    pub fn with_footer_height(mut self, height: impl Into<FooterHeight>) -> Self {
        self.footer_height = height.into();
        self
    }

    pub fn with_section_height(mut self, height: impl Into<SectionHeight>) -> Self {
        self.section_height = height.into();
        self
    }

    pub fn with_row_height(mut self, height: impl Into<RowHeight>) -> Self {
        self.row_height = height.into();
        self
    }

    pub fn with_section_footer_height(mut self, height: impl Into<SectionFooterHeight>) -> Self {
        self.section_footer_height = height.into();
        self
    }

    pub fn with_sections(mut self, sections: impl Into<Vec<usize>>) -> Self {
        self.sections = sections.into();
        self
    }

    pub fn with_insets(mut self, inset_top: f64, inset_bottom: f64) -> Self {
        self.inset_top = inset_top;
        self.inset_bottom = inset_bottom;
        self
    }

    pub fn header_height(&self) -> f64 {
        self.header_height.resolve(())
    }

    pub fn footer_height(&self) -> f64 {
        self.footer_height.resolve(())
    }

    pub fn section_height(&self, section: usize) -> f64 {
        self.section_height.resolve(section)
    }

    pub fn row_height(&self, section: usize, row: usize) -> f64 {
        self.row_height.resolve((section, row))
    }

    pub fn section_footer_height(&self, section: usize) -> f64 {
        self.section_footer_height.resolve(section)
    }

    /// The shared row height when rows are [`Height::Fixed`] ("uniform" mode).
    pub fn uniform_row_height(&self) -> Option<f64> {
        self.row_height.fixed_value()
    }

    pub fn is_uniform(&self) -> bool {
        self.uniform_row_height().is_some()
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().sum()
    }

    /// `true` when no section has any rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("header_height", &self.header_height)
            .field("footer_height", &self.footer_height)
            .field("section_height", &self.section_height)
            .field("row_height", &self.row_height)
            .field("section_footer_height", &self.section_footer_height)
            .field("sections", &self.sections.len())
            .field("inset_top", &self.inset_top)
            .field("inset_bottom", &self.inset_bottom)
            .finish()
    }
}
