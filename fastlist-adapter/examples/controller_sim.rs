// Example: drive a ListController from simulated scroll events.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fastlist::ListOptions;
use fastlist_adapter::{ItemRenderer, ListController, ScrollView};

struct PrintView;

impl ScrollView for PrintView {
    fn scroll_to(&mut self, offset: f64, animated: bool) {
        println!("scroll_to offset={offset} animated={animated}");
    }
}

struct Labels;

impl ItemRenderer for Labels {
    type Output = String;

    fn render_row(&mut self, section: usize, row: usize) -> Option<String> {
        Some(format!("row {section}.{row}"))
    }

    fn render_section(&mut self, section: usize) -> Option<String> {
        Some(format!("section {section}"))
    }
}

fn main() {
    let recomputes = Arc::new(AtomicUsize::new(0));
    let mut c = ListController::new(
        ListOptions::new(vec![20; 30], 40.0)
            .with_header_height(80.0)
            .with_section_height(24.0)
            .with_section_footer_height(8.0),
    )
    .with_on_change({
        let recomputes = Arc::clone(&recomputes);
        move |_| {
            recomputes.fetch_add(1, Ordering::Relaxed);
        }
    })
    .with_on_end_reached(|e| println!("end reached: {e:?}"));
    c.on_layout(600.0);

    let target = c
        .scroll_to_item(&mut PrintView, 25, 5, true)
        .expect("row 5 of section 25 exists");

    // Pretend the scroll container animates there in 16ms frames.
    let mut now_ms = 0;
    let mut y = 0.0;
    while y < target {
        y = (y + 37.0_f64).min(target);
        now_ms += 16;
        c.on_scroll(y, 0.0, now_ms);
    }
    c.on_scroll_end();

    let rendered = c.render(&mut Labels, true);
    println!("recomputes={}", recomputes.load(Ordering::Relaxed));
    println!("children={}", rendered.children.len());
    println!("visible_rows={:?}", rendered.visible_rows);
    for child in rendered.children.iter().filter(|child| child.sticky.is_some()) {
        let translation = child.sticky.map(|s| s.translation(y)).unwrap_or_default();
        println!(
            "{:?} translate_y={translation}",
            child.content.as_deref().unwrap_or_default()
        );
    }
}
