use crate::recycler::{Recycler, Slot};
use crate::{Item, ItemKind, Layout, ListOptions, ScrollPosition};

/// Computes the windowed item list of a sectioned list.
///
/// The list is laid out as: `inset_top`, header, then for every section with at least one row
/// its section header, rows and section footer, then the footer and `inset_bottom`. Items
/// outside the requested window are folded into spacers.
///
/// A `LayoutComputer` owns the [`Recycler`] that keeps item keys stable, so one instance should
/// live as long as the list it lays out.
#[derive(Clone, Debug)]
pub struct LayoutComputer {
    options: ListOptions,
    recycler: Recycler,
}

impl LayoutComputer {
    pub fn new(options: ListOptions) -> Self {
        vdebug!(
            sections = options.sections.len(),
            uniform = options.is_uniform(),
            "LayoutComputer::new"
        );
        Self {
            options,
            recycler: Recycler::new(),
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the configuration. Keys minted so far stay reserved.
    pub fn set_options(&mut self, options: ListOptions) {
        vdebug!(
            sections = options.sections.len(),
            uniform = options.is_uniform(),
            "LayoutComputer::set_options"
        );
        self.options = options;
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn recycler(&self) -> &Recycler {
        &self.recycler
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Full content height, insets included, without building any items.
    pub fn total_height(&self) -> f64 {
        let options = &self.options;
        let uniform = options.uniform_row_height();
        let mut height = options.inset_top + options.header_height();
        for (section, &rows) in options.sections.iter().enumerate() {
            if rows == 0 {
                continue;
            }
            height += options.section_height(section);
            height += match uniform {
                Some(row_height) => row_height * rows as f64,
                None => (0..rows).map(|row| options.row_height(section, row)).sum(),
            };
            height += options.section_footer_height(section);
        }
        height + options.footer_height() + options.inset_bottom
    }

    /// Lays out the list for the window `[top, bottom]`.
    ///
    /// `previous` is the item list of the last computation (empty on the first one); items
    /// with the same `(kind, section, row)` keep their keys.
    pub fn compute(&mut self, top: f64, bottom: f64, previous: &[Item]) -> Layout {
        vtrace!(
            top,
            bottom,
            previous = previous.len(),
            "LayoutComputer::compute"
        );
        let options = &self.options;
        self.recycler.begin(previous);
        let mut pass = Pass::new(&mut self.recycler, top, bottom, options.inset_top);

        let header_height = options.header_height();
        if header_height > 0.0 {
            pass.place(ItemKind::Header, header_height, 0, 0);
        }

        let uniform = options.uniform_row_height();
        for (section, &rows) in options.sections.iter().enumerate() {
            if rows == 0 {
                continue;
            }

            pass.place_section_header(options.section_height(section), section);

            match uniform {
                Some(row_height) => pass.place_uniform_rows(row_height, section, rows),
                None => {
                    for row in 0..rows {
                        pass.place(ItemKind::Row, options.row_height(section, row), section, row);
                    }
                }
            }

            let section_footer_height = options.section_footer_height(section);
            if section_footer_height > 0.0 {
                pass.place(ItemKind::SectionFooter, section_footer_height, section, 0);
            }
        }

        let footer_height = options.footer_height();
        if footer_height > 0.0 {
            pass.place(ItemKind::Footer, footer_height, 0, 0);
        }

        let (total_height, slots) = pass.finish(options.inset_bottom, options.sections.len());
        let items = self.recycler.finish(&slots);
        vtrace!(
            total_height,
            items = items.len(),
            last_key = self.recycler.last_key(),
            "LayoutComputer::compute done"
        );
        Layout {
            total_height,
            items,
        }
    }

    /// Offset of `(section, row)` from the top of the content, plus the height of that
    /// section's header.
    ///
    /// Returns `None` when `section` does not exist or `row` is not below its row count
    /// (which includes every row of an empty section). `None` is the contract for such targets
    /// in every build, so callers can probe whether an item exists; only a `vwarn!` is logged.
    pub fn compute_scroll_offset(&self, section: usize, row: usize) -> Option<ScrollPosition> {
        let options = &self.options;
        let Some(&target_rows) = options.sections.get(section) else {
            vwarn!(
                section,
                sections = options.sections.len(),
                "compute_scroll_offset: section out of range"
            );
            return None;
        };
        if row >= target_rows {
            vwarn!(
                section,
                row,
                rows = target_rows,
                "compute_scroll_offset: row out of range"
            );
            return None;
        }

        let uniform = options.uniform_row_height();
        let mut offset = options.inset_top + options.header_height();
        let mut section_height = 0.0;
        for (s, &rows) in options.sections.iter().enumerate().take(section + 1) {
            if rows == 0 {
                continue;
            }
            let header = options.section_height(s);
            offset += header;

            if s == section {
                section_height = header;
                offset += match uniform {
                    Some(row_height) => row_height * row as f64,
                    None => (0..row).map(|r| options.row_height(s, r)).sum(),
                };
            } else {
                offset += match uniform {
                    Some(row_height) => row_height * rows as f64,
                    None => (0..rows).map(|r| options.row_height(s, r)).sum(),
                };
                offset += options.section_footer_height(s);
            }
        }

        Some(ScrollPosition {
            offset,
            section_height,
        })
    }
}

/// State of one forward pass of [`LayoutComputer::compute`].
struct Pass<'a> {
    recycler: &'a mut Recycler,
    top: f64,
    bottom: f64,
    /// Running content height.
    height: f64,
    /// Height of the open run of folded items.
    spacer: f64,
    out: Vec<Slot>,
}

impl<'a> Pass<'a> {
    fn new(recycler: &'a mut Recycler, top: f64, bottom: f64, inset_top: f64) -> Self {
        Self {
            recycler,
            top,
            bottom,
            height: inset_top,
            spacer: inset_top.max(0.0),
            out: Vec::new(),
        }
    }

    /// Advances past an item of `height`; folds it into the spacer unless it intersects
    /// the window.
    fn fits(&mut self, height: f64) -> bool {
        let prev = self.height;
        self.height += height;
        if self.height < self.top || prev > self.bottom {
            self.spacer += height;
            false
        } else {
            true
        }
    }

    fn emit(&mut self, kind: ItemKind, offset: f64, height: f64, section: usize, row: usize) {
        if self.spacer > 0.0 {
            let spacer = self.recycler.get(
                ItemKind::Spacer,
                offset - self.spacer,
                self.spacer,
                section,
                row,
            );
            self.out.push(spacer);
            self.spacer = 0.0;
        }
        let slot = self.recycler.get(kind, offset, height, section, row);
        self.out.push(slot);
    }

    fn place(&mut self, kind: ItemKind, height: f64, section: usize, row: usize) {
        let offset = self.height;
        if self.fits(height) {
            self.emit(kind, offset, height, section, row);
        }
    }

    /// Section headers are kept while anything of their section can still be scrolled into
    /// from above, so only the lower edge of the window applies.
    fn place_section_header(&mut self, height: f64, section: usize) {
        let offset = self.height;
        self.height += height;

        if section > 1 {
            self.collapse_to_last_section_header();
        }

        if self.height > self.bottom {
            self.spacer += height;
        } else {
            self.emit(ItemKind::SectionHeader, offset, height, section, 0);
        }
    }

    /// When the previous section produced nothing after its header, everything before that
    /// header becomes a single spacer. Only the current and previous section headers ever
    /// need to stay mounted for the sticky handoff.
    fn collapse_to_last_section_header(&mut self) {
        let Some(&last) = self.out.last() else {
            return;
        };
        let prev = *self.recycler.item(last);
        if prev.kind != ItemKind::SectionHeader {
            return;
        }

        let kept = self.out.len() - 1;
        let mut covered = 0.0;
        for &slot in &self.out[..kept] {
            covered += self.recycler.item(slot).height;
        }
        for &slot in self.out[..kept].iter().rev() {
            self.recycler.release(slot);
        }
        vtrace!(
            section = prev.section,
            released = kept,
            covered,
            "collapse_to_last_section_header"
        );

        self.out.clear();
        if covered > 0.0 {
            let spacer = self
                .recycler
                .get(ItemKind::Spacer, 0.0, covered, prev.section, 0);
            self.out.push(spacer);
        }
        self.out.push(last);
    }

    /// Rows of one height: only the visible run is walked, the rest is folded in bulk.
    ///
    /// Row offsets are `base + row_height * row` rather than a running sum, so with fractional
    /// heights the result can differ from the per-row path by floating-point rounding at the
    /// window edges. The output still tiles and every emitted row intersects the window.
    fn place_uniform_rows(&mut self, row_height: f64, section: usize, rows: usize) {
        let base = self.height;
        let span = row_height * rows as f64;

        let Some((first, last)) = visible_row_span(base, row_height, rows, self.top, self.bottom)
        else {
            self.height = base + span;
            self.spacer += span;
            return;
        };

        self.spacer += row_height * first as f64;
        for row in first..=last {
            let offset = base + row_height * row as f64;
            self.height = offset + row_height;
            self.emit(ItemKind::Row, offset, row_height, section, row);
        }
        self.spacer += row_height * (rows - 1 - last) as f64;
        self.height = base + span;
    }

    fn finish(mut self, inset_bottom: f64, trailing_section: usize) -> (f64, Vec<Slot>) {
        self.height += inset_bottom;
        self.spacer += inset_bottom;

        if self.spacer > 0.0 {
            let spacer = self.recycler.get(
                ItemKind::Spacer,
                self.height - self.spacer,
                self.spacer,
                trailing_section,
                0,
            );
            self.out.push(spacer);
        }

        (self.height, self.out)
    }
}

/// First and last (inclusive) rows of a uniform run starting at `base` that intersect
/// `[top, bottom]`, using the same test as [`Pass::fits`].
fn visible_row_span(
    base: f64,
    row_height: f64,
    rows: usize,
    top: f64,
    bottom: f64,
) -> Option<(usize, usize)> {
    if rows == 0 || base > bottom || base + row_height * (rows as f64) < top {
        return None;
    }

    let visible = |row: usize| {
        let start = base + row_height * row as f64;
        !(start + row_height < top || start > bottom)
    };

    // Estimates may be off by one row from floating point rounding; the loops settle them.
    let mut first = if row_height > 0.0 {
        (((top - base) / row_height).ceil() - 1.0).max(0.0) as usize
    } else {
        0
    };
    first = first.min(rows - 1);
    while first > 0 && visible(first - 1) {
        first -= 1;
    }
    while first < rows && !visible(first) {
        first += 1;
    }
    if first == rows {
        return None;
    }

    let mut last = if row_height > 0.0 {
        ((bottom - base) / row_height).floor().max(0.0) as usize
    } else {
        rows - 1
    };
    last = last.clamp(first, rows - 1);
    while last + 1 < rows && visible(last + 1) {
        last += 1;
    }
    while last > first && !visible(last) {
        last -= 1;
    }

    Some((first, last))
}
