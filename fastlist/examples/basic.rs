// Example: windowed layout of a long sectioned list and the scroll-to helper.
use fastlist::{Block, ItemKind, LayoutComputer, ListOptions};

fn main() {
    let sections: Vec<usize> = (0..200).map(|i| 50 + i % 3).collect();
    let mut c = LayoutComputer::new(
        ListOptions::new(sections, 44.0)
            .with_header_height(120.0)
            .with_section_height(28.0),
    );

    let block = Block::compute(800.0, 12_345.0);
    let (top, bottom) = block.window();
    let layout = c.compute(top, bottom, &[]);
    println!("total_height={}", layout.total_height);
    println!("window=({top}, {bottom}) items={}", layout.items.len());
    println!("first={:?}", layout.items.first());

    let pos = c
        .compute_scroll_offset(150, 10)
        .expect("section 150 has at least 11 rows");
    let (top, bottom) = Block::compute(800.0, pos.offset).window();
    let moved = c.compute(top, bottom, &layout.items);
    println!(
        "after scroll_to (150, 10): offset={} row={:?}",
        pos.offset,
        moved.find(ItemKind::Row, 150, 10)
    );
    println!("keys minted so far={}", c.recycler().last_key());
}
