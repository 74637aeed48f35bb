// Example: only the section headers needed for the sticky handoff stay mounted.
use fastlist::{Block, Height, ItemKind, LayoutComputer, ListOptions};

fn main() {
    let mut c = LayoutComputer::new(
        ListOptions::new([5, 0, 5, 5, 5], 20.0)
            .with_section_height(Height::computed(|s: usize| 10.0 + s as f64))
            .with_section_footer_height(4.0),
    );
    let total = c.total_height();

    let mut previous = Vec::new();
    let mut scroll = 0.0;
    while scroll < total {
        let (top, bottom) = Block::compute(60.0, scroll).window();
        let layout = c.compute(top, bottom, &previous);
        let headers: Vec<_> = layout
            .content_items()
            .filter(|it| it.kind == ItemKind::SectionHeader)
            .map(|it| it.section)
            .collect();
        println!("scroll={scroll:>5} headers={headers:?}");
        previous = layout.items;
        scroll += 7.0;
    }
}
