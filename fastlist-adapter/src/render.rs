use fastlist::{Item, ItemKey, ItemKind};

use crate::StickyHeader;

/// Produces content for list items.
///
/// Returning `None` means "nothing to draw" and the item is left out of the rendered output.
/// Only rows are mandatory; the other kinds default to `None`.
pub trait ItemRenderer {
    type Output;

    fn render_row(&mut self, section: usize, row: usize) -> Option<Self::Output>;

    fn render_header(&mut self) -> Option<Self::Output> {
        None
    }

    fn render_footer(&mut self) -> Option<Self::Output> {
        None
    }

    fn render_section(&mut self, _section: usize) -> Option<Self::Output> {
        None
    }

    fn render_section_footer(&mut self, _section: usize) -> Option<Self::Output> {
        None
    }

    /// Replaces the whole list when it has no rows.
    fn render_empty(&mut self) -> Option<Self::Output> {
        None
    }
}

/// One child of a rendered list. Spacers have no content.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem<T> {
    pub key: ItemKey,
    pub kind: ItemKind,
    pub offset: f64,
    pub height: f64,
    pub section: usize,
    pub row: usize,
    pub content: Option<T>,
    /// Set on section headers when sticky headers are enabled.
    pub sticky: Option<StickyHeader>,
}

impl<T> RenderedItem<T> {
    fn new(item: &Item, content: Option<T>) -> Self {
        Self {
            key: item.key,
            kind: item.kind,
            offset: item.offset,
            height: item.height,
            section: item.section,
            row: item.row,
            content,
            sticky: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rendered<T> {
    pub children: Vec<RenderedItem<T>>,
    /// `(section, row)` of every row that produced content, in list order.
    pub visible_rows: Vec<(usize, usize)>,
    /// Output of [`ItemRenderer::render_empty`]; when set, `children` is empty.
    pub empty: Option<T>,
}

impl<T> Default for Rendered<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            visible_rows: Vec::new(),
            empty: None,
        }
    }
}

/// Dispatches `items` to `renderer`.
///
/// Spacers are always emitted so the children still tile the content height. With
/// `sticky_headers`, each section header carries the geometry needed to pin it, using the next
/// section header in `items` as its push-off point.
pub fn render_items<R: ItemRenderer>(
    items: &[Item],
    renderer: &mut R,
    sticky_headers: bool,
) -> Rendered<R::Output> {
    let mut section_offsets = items
        .iter()
        .filter(|it| it.kind == ItemKind::SectionHeader)
        .map(|it| it.offset)
        .skip(1);

    let mut out = Rendered {
        children: Vec::with_capacity(items.len()),
        ..Rendered::default()
    };
    for item in items {
        let content = match item.kind {
            ItemKind::Spacer => {
                out.children.push(RenderedItem::new(item, None));
                continue;
            }
            ItemKind::Header => renderer.render_header(),
            ItemKind::Footer => renderer.render_footer(),
            ItemKind::SectionHeader => {
                let next_section_offset = section_offsets.next();
                if let Some(content) = renderer.render_section(item.section) {
                    let mut rendered = RenderedItem::new(item, Some(content));
                    if sticky_headers {
                        rendered.sticky = Some(StickyHeader {
                            offset: item.offset,
                            height: item.height,
                            next_section_offset,
                        });
                    }
                    out.children.push(rendered);
                }
                continue;
            }
            ItemKind::Row => {
                let content = renderer.render_row(item.section, item.row);
                if content.is_some() {
                    out.visible_rows.push((item.section, item.row));
                }
                content
            }
            ItemKind::SectionFooter => renderer.render_section_footer(item.section),
        };
        if let Some(content) = content {
            out.children.push(RenderedItem::new(item, Some(content)));
        }
    }

    vtrace!(
        items = items.len(),
        children = out.children.len(),
        visible_rows = out.visible_rows.len(),
        "render_items"
    );
    out
}
