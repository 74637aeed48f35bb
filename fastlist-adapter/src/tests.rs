use crate::*;

use fastlist::{Block, ItemKind, LayoutComputer, ListOptions};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingView {
    calls: Vec<(f64, bool)>,
}

impl ScrollView for RecordingView {
    fn scroll_to(&mut self, offset: f64, animated: bool) {
        self.calls.push((offset, animated));
    }
}

#[derive(Default)]
struct Labels {
    skip_row: Option<(usize, usize)>,
    empty: Option<&'static str>,
}

impl ItemRenderer for Labels {
    type Output = String;

    fn render_row(&mut self, section: usize, row: usize) -> Option<String> {
        if self.skip_row == Some((section, row)) {
            return None;
        }
        Some(format!("row {section}.{row}"))
    }

    fn render_section(&mut self, section: usize) -> Option<String> {
        Some(format!("section {section}"))
    }

    fn render_empty(&mut self) -> Option<String> {
        self.empty.map(str::to_owned)
    }
}

fn golden_options() -> ListOptions {
    ListOptions::new([3, 0, 2], 10.0).with_section_height(5.0)
}

fn counter() -> (Arc<AtomicUsize>, impl Fn(&ListController) + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let cb = {
        let count = Arc::clone(&count);
        move |_: &ListController| {
            count.fetch_add(1, Ordering::Relaxed);
        }
    };
    (count, cb)
}

#[test]
fn unmeasured_controller_has_an_empty_layout() {
    let c = ListController::new(ListOptions::new([3], 10.0).with_insets(4.0, 6.0));
    assert_eq!(c.block(), Block::UNMEASURED);
    assert!(c.items().is_empty());
    assert_eq!(c.total_height(), 10.0);
    assert!(!c.is_empty());
}

#[test]
fn controller_recomputes_only_on_block_change() {
    let (count, cb) = counter();
    let mut c = ListController::new(ListOptions::new([100], 10.0)).with_on_change(cb);

    assert!(c.on_layout(100.0));
    assert_eq!(c.total_height(), 1_000.0);
    assert!(!c.items().is_empty());

    assert!(!c.on_scroll(0.0, 0.0, 0));
    assert!(c.on_scroll(30.0, 0.0, 16));
    assert!(!c.on_scroll(40.0, 0.0, 32));
    assert!(!c.on_scroll(50.0, 0.0, 48));
    assert!(c.on_scroll(51.0, 0.0, 64));
    assert_eq!(count.load(Ordering::Relaxed), 3);

    let (top, bottom) = c.block().window();
    for item in c.items().iter().filter(|it| it.kind == ItemKind::Row) {
        assert!(item.end() >= top && item.offset <= bottom);
    }
}

#[test]
fn controller_keeps_keys_while_scrolling() {
    let mut c = ListController::new(ListOptions::new([200], 10.0)).with_container_height(100.0);
    let mut previous = c.layout().clone();
    for step in 1..300u64 {
        let y = if step < 150 { step * 11 } else { (300 - step) * 11 };
        c.on_scroll(y as f64, 0.0, step * 16);

        // Rows that stay mounted keep their key across the recomputation.
        let mut keys = HashMap::new();
        for item in c.items().iter().filter(|it| it.kind == ItemKind::Row) {
            if let Some(prev) = previous.find(ItemKind::Row, 0, item.row) {
                assert_eq!(prev.key, item.key, "row {} changed key", item.row);
            }
            assert!(keys.insert(item.key, item.row).is_none());
        }
        previous = c.layout().clone();
    }
}

#[test]
fn scroll_events_track_direction_and_container_height() {
    let mut c = ListController::new(ListOptions::new([100], 10.0));
    assert_eq!(c.scroll_direction(), ScrollDirection::Neutral);

    c.on_scroll(0.0, 300.0, 0);
    assert_eq!(c.container_height(), 300.0);
    assert_eq!(c.scroll_direction(), ScrollDirection::Neutral);
    assert!(c.block().is_measured());

    c.on_scroll(20.0, 0.0, 16);
    assert_eq!(c.scroll_direction(), ScrollDirection::Down);
    assert_eq!(c.container_height(), 300.0);

    c.on_scroll(20.0, 0.0, 32);
    assert_eq!(c.scroll_direction(), ScrollDirection::Down);

    c.on_scroll(10.0, 0.0, 48);
    assert_eq!(c.scroll_direction(), ScrollDirection::Up);

    c.on_scroll_end();
    assert_eq!(c.scroll_direction(), ScrollDirection::Neutral);

    c.on_scroll_end_drag(100.0, 50.0, 64);
    assert_eq!(c.scroll_direction(), ScrollDirection::Up);
    c.on_scroll_end_drag(50.0, 100.0, 80);
    assert_eq!(c.scroll_direction(), ScrollDirection::Down);
}

#[test]
fn end_reached_fires_near_the_end_and_is_throttled() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut c = ListController::new(ListOptions::new([10], 10.0)).with_on_end_reached({
        let events = Arc::clone(&events);
        move |e: EndReached| events.lock().unwrap().push(e)
    });
    c.on_layout(100.0);
    assert_eq!(c.total_height(), 100.0);

    c.on_scroll(1.0, 0.0, 0);
    c.on_scroll(2.0, 0.0, 10);
    c.on_scroll(3.0, 0.0, 25);
    c.on_scroll(2.0, 0.0, 50);

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            EndReached {
                scroll_top: 1.0,
                direction: ScrollDirection::Down
            },
            EndReached {
                scroll_top: 3.0,
                direction: ScrollDirection::Down
            },
        ]
    );
}

#[test]
fn end_reached_uses_the_drag_target() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut c = ListController::new(ListOptions::new([100], 10.0))
        .with_container_height(100.0)
        .with_end_reached_throttle_ms(0)
        .with_on_end_reached({
            let count = Arc::clone(&count);
            move |_| {
                count.fetch_add(1, Ordering::Relaxed);
            }
        });

    c.on_scroll(10.0, 0.0, 0);
    assert_eq!(count.load(Ordering::Relaxed), 0);

    c.on_scroll_end_drag(10.0, 950.0, 16);
    assert_eq!(count.load(Ordering::Relaxed), 1);

    // Dragging back up never reports the end.
    c.on_scroll_end_drag(950.0, 940.0, 32);
    assert_eq!(count.load(Ordering::Relaxed), 1);
}

#[test]
fn scroll_to_item_leaves_room_for_the_section_header() {
    let c = ListController::new(golden_options()).with_container_height(20.0);
    let mut view = RecordingView::default();

    assert_eq!(c.scroll_to_item(&mut view, 2, 1, true), Some(45.0));
    assert_eq!(c.scroll_to_item(&mut view, 0, 0, false), Some(0.0));
    assert_eq!(c.scroll_to_item(&mut view, 1, 0, true), None);
    assert_eq!(view.calls, vec![(45.0, true), (0.0, false)]);

    assert_eq!(c.scroll_to_item_offset(0, 2), Some(20.0));
    assert_eq!(c.scroll_to_item_offset(3, 0), None);
}

#[test]
fn scroll_to_top_uses_the_content_offset() {
    let c = ListController::new(golden_options()).with_content_offset(-20.0);
    let mut view = RecordingView::default();
    c.scroll_to_top(&mut view, false);
    assert_eq!(view.calls, vec![(-20.0, false)]);
}

#[test]
fn content_inset_sets_the_initial_scroll_position() {
    let c = ListController::new(golden_options())
        .with_content_inset(64.0)
        .with_container_height(200.0);
    assert_eq!(c.scroll_top(), -64.0);
    assert_eq!(c.block(), Block::compute(200.0, -64.0));
    assert_eq!(c.items().len(), 7);
}

#[test]
fn item_visibility_follows_the_viewport() {
    let mut c = ListController::new(ListOptions::new([100], 10.0));
    c.on_scroll(100.0, 50.0, 0);
    assert!(c.is_item_visible(100.0));
    assert!(c.is_item_visible(150.0));
    assert!(!c.is_item_visible(90.0));
    assert!(!c.is_item_visible(160.0));
}

#[test]
fn set_options_recomputes_and_notifies() {
    let (count, cb) = counter();
    let mut c = ListController::new(ListOptions::new([2], 10.0))
        .with_container_height(100.0)
        .with_on_change(cb);
    assert_eq!(c.total_height(), 20.0);

    c.update_options(|o| o.sections = vec![2, 3]);
    assert_eq!(count.load(Ordering::Relaxed), 1);
    assert_eq!(c.total_height(), 50.0);
    assert!(c.layout().find(ItemKind::Row, 1, 2).is_some());

    c.set_options(ListOptions::new([0], 10.0));
    assert_eq!(count.load(Ordering::Relaxed), 2);
    assert!(c.is_empty());
}

#[test]
fn render_items_dispatches_by_kind() {
    let c = ListController::new(golden_options()).with_container_height(200.0);
    let mut renderer = Labels {
        skip_row: Some((0, 1)),
        ..Labels::default()
    };
    let rendered = c.render(&mut renderer, true);

    assert!(rendered.empty.is_none());
    assert_eq!(rendered.visible_rows, vec![(0, 0), (0, 2), (2, 0), (2, 1)]);
    let contents: Vec<_> = rendered
        .children
        .iter()
        .map(|child| child.content.as_deref())
        .collect();
    assert_eq!(
        contents,
        vec![
            Some("section 0"),
            Some("row 0.0"),
            Some("row 0.2"),
            Some("section 2"),
            Some("row 2.0"),
            Some("row 2.1"),
        ]
    );

    let sticky: Vec<_> = rendered
        .children
        .iter()
        .filter_map(|child| child.sticky)
        .collect();
    assert_eq!(
        sticky,
        vec![
            StickyHeader {
                offset: 0.0,
                height: 5.0,
                next_section_offset: Some(35.0),
            },
            StickyHeader {
                offset: 35.0,
                height: 5.0,
                next_section_offset: None,
            },
        ]
    );

    let flat = c.render(&mut renderer, false);
    assert!(flat.children.iter().all(|child| child.sticky.is_none()));
}

#[test]
fn render_items_always_keeps_spacers() {
    let mut computer = LayoutComputer::new(golden_options());
    let layout = computer.compute(40.0, 50.0, &[]);

    struct RowsOnly;
    impl ItemRenderer for RowsOnly {
        type Output = (usize, usize);
        fn render_row(&mut self, section: usize, row: usize) -> Option<(usize, usize)> {
            Some((section, row))
        }
    }

    let rendered = render_items(&layout.items, &mut RowsOnly, true);
    let kinds: Vec<_> = rendered.children.iter().map(|child| child.kind).collect();
    assert_eq!(kinds, vec![ItemKind::Spacer, ItemKind::Row, ItemKind::Row]);
    assert_eq!(rendered.children[0].content, None);
    assert_eq!(rendered.children[0].height, 30.0);
    assert_eq!(rendered.children[0].key, layout.items[1].key);
}

#[test]
fn empty_list_renders_the_empty_state() {
    let c = ListController::new(ListOptions::new([0, 0], 10.0).with_insets(5.0, 0.0))
        .with_container_height(100.0);
    assert!(c.is_empty());

    let rendered = c.render(
        &mut Labels {
            empty: Some("nothing here"),
            ..Labels::default()
        },
        true,
    );
    assert_eq!(rendered.empty.as_deref(), Some("nothing here"));
    assert!(rendered.children.is_empty());

    // Without an empty state the inset spacer is still rendered.
    let rendered = c.render(&mut Labels::default(), true);
    assert!(rendered.empty.is_none());
    assert_eq!(rendered.children.len(), 1);
    assert_eq!(rendered.children[0].kind, ItemKind::Spacer);
}

#[test]
fn sticky_header_is_pushed_off_by_the_next_one() {
    let header = StickyHeader {
        offset: 100.0,
        height: 20.0,
        next_section_offset: Some(300.0),
    };
    assert_eq!(header.translation(50.0), 0.0);
    assert_eq!(header.translation(100.0), 0.0);
    assert_eq!(header.translation(150.0), 50.0);
    assert_eq!(header.translation(280.0), 180.0);
    assert_eq!(header.translation(400.0), 180.0);

    let last = StickyHeader {
        next_section_offset: None,
        ..header
    };
    assert_eq!(last.translation(400.0), 300.0);

    // Overlapping headers never collide.
    let tight = StickyHeader {
        next_section_offset: Some(110.0),
        ..header
    };
    assert_eq!(tight.translation(150.0), 50.0);
}

#[test]
fn example_controller_sim_smoke() {
    let options = ListOptions::new(vec![20; 30], 40.0)
        .with_header_height(80.0)
        .with_section_height(24.0)
        .with_section_footer_height(8.0);
    let (recomputes, cb) = counter();
    let mut c = ListController::new(options)
        .with_content_inset(0.0)
        .with_on_change(cb);
    c.on_layout(600.0);

    let mut view = RecordingView::default();
    let target = c.scroll_to_item(&mut view, 25, 5, true).unwrap();

    let mut now_ms = 0;
    let mut y = 0.0;
    while y < target {
        y = (y + 37.0_f64).min(target);
        now_ms += 16;
        c.on_scroll(y, 0.0, now_ms);
    }
    c.on_scroll_end();

    assert!(c.layout().find(ItemKind::Row, 25, 5).is_some());
    // One recomputation per 300px batch plus the initial measurement.
    let expected = 1 + (target / 300.0).ceil() as usize;
    assert_eq!(recomputes.load(Ordering::Relaxed), expected);

    let rendered = c.render(&mut Labels::default(), true);
    assert!(rendered.visible_rows.contains(&(25, 5)));
}
