//! End-to-end render pipeline scenarios: mount, drive, patch in place.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use flipclock::{
    ANIMATE_CLASS, ClockError, Counter, Document, ElapsedTime, FlipClock, HookPoint, NodeId,
    OutputSurface,
};

/// Read the digits a card tree currently shows: the top half of every
/// card's active face, plus divider characters, in document order.
fn shown(clock: &FlipClock, root: NodeId) -> String {
    let mut out = String::new();
    shown_into(clock.document(), root, &mut out);
    out
}

fn shown_into(doc: &Document, id: NodeId, out: &mut String) {
    if doc.has_class(id, "flip-clock-card") {
        let active = doc.children(id)[0];
        let inner = doc.children(active)[0];
        let top = doc.children(inner)[0];
        out.push_str(&doc.text_of(top));
        return;
    }
    if doc.has_class(id, "flip-clock-divider") {
        out.push_str(&doc.text_of(id));
        return;
    }
    for child in doc.children(id) {
        shown_into(doc, child, out);
    }
}

fn counter_clock(interval_ms: u64) -> FlipClock {
    FlipClock::builder()
        .face(Counter::new(0))
        .interval(Duration::from_millis(interval_ms))
        .animation_rate(Duration::from_millis(50))
        .auto_start(true)
        .build()
        .expect("face supplied")
}

#[test]
fn mount_tick_patches_digits_inside_preserved_wrapper() {
    let now = Instant::now();
    let mut clock = counter_clock(100);

    let target = clock.document_mut().create_element("div");
    clock.mount(target, now);
    clock.flush(now);

    // First reconcile realized the tree under the target and started the
    // driver.
    let root = clock.root().expect("realized");
    assert_eq!(clock.document().parent(root), Some(target));
    assert_eq!(shown(&clock, root), "00");
    assert!(clock.is_running());

    // Count how many reconciles the next interval causes.
    let reconciles = Rc::new(Cell::new(0u32));
    let reconciles_in = reconciles.clone();
    clock.on(HookPoint::AfterRender, move |_| {
        reconciles_in.set(reconciles_in.get() + 1);
    });

    let later = now + Duration::from_millis(100);
    clock.tick(later);
    clock.flush(later);

    assert_eq!(reconciles.get(), 1, "exactly one reconcile per interval");
    assert_eq!(clock.root(), Some(root), "wrapper survives the patch");
    assert_eq!(shown(&clock, root), "01");
}

#[test]
fn changed_card_animates_and_the_class_clears_next_cycle() {
    let now = Instant::now();
    let mut clock = counter_clock(100);
    let target = clock.document_mut().create_element("div");
    clock.mount(target, now);
    clock.flush(now);
    let root = clock.root().expect("realized");

    let animating = |clock: &FlipClock, root| {
        clock
            .document()
            .descendants(root)
            .into_iter()
            .filter(|&id| clock.document().has_class(id, ANIMATE_CLASS))
            .count()
    };
    // Nothing changed yet, so nothing animates.
    assert_eq!(animating(&clock, root), 0);

    // 00 -> 01: exactly one card turns.
    let later = now + Duration::from_millis(100);
    clock.tick(later);
    clock.flush(later);
    assert_eq!(animating(&clock, root), 1);

    // The next cycle strips the stale class before patching; 01 -> 02
    // again animates only the ones card.
    let again = later + Duration::from_millis(100);
    clock.tick(again);
    clock.flush(again);
    assert_eq!(animating(&clock, root), 1);
}

#[test]
fn lifecycle_listeners_see_every_point_in_order() {
    let now = Instant::now();
    let mut clock = counter_clock(100);
    let log = Rc::new(RefCell::new(Vec::new()));

    for point in [
        HookPoint::BeforeMount,
        HookPoint::Mounted,
        HookPoint::BeforeCreate,
        HookPoint::AfterCreate,
        HookPoint::BeforeAnimation,
        HookPoint::AfterRender,
        HookPoint::AfterAnimation,
        HookPoint::Started,
        HookPoint::Interval,
    ] {
        let log_in = log.clone();
        clock.on(point, move |event| {
            log_in.borrow_mut().push(event.point.to_string());
        });
    }

    let target = clock.document_mut().create_element("div");
    clock.mount(target, now);
    clock.flush(now);
    clock.flush(now + Duration::from_millis(50));

    assert_eq!(
        *log.borrow(),
        vec![
            "beforeMount",
            "beforeCreate",
            "afterCreate",
            "beforeAnimation",
            "mounted",
            "started",
            "afterRender",
            "afterAnimation",
        ]
    );

    log.borrow_mut().clear();
    let later = now + Duration::from_millis(100);
    clock.tick(later);
    assert_eq!(log.borrow()[0], "interval");
}

#[test]
fn unmount_stops_everything() {
    let now = Instant::now();
    let mut clock = counter_clock(100);
    let target = clock.document_mut().create_element("div");
    clock.mount(target, now);
    clock.flush(now);
    let root = clock.root().expect("realized");

    clock.unmount(now);
    assert!(!clock.is_mounted());
    assert!(!clock.is_running());
    assert_eq!(clock.document().parent(root), None);

    // A late interval instant causes no further render.
    let cycle = clock.cycle();
    clock.tick(now + Duration::from_secs(10));
    assert_eq!(clock.cycle(), cycle);
}

#[test]
fn elapsed_face_counts_up_through_the_pipeline() {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time");
    let face = ElapsedTime::with_format(start, "mm:ss").expect("valid pattern");

    let now = Instant::now();
    let mut clock = FlipClock::builder()
        .face(face)
        .interval(Duration::from_secs(1))
        .auto_start(true)
        .build()
        .expect("face supplied");

    let target = clock.document_mut().create_element("div");
    clock.mount(target, now);
    clock.flush(now);
    let root = clock.root().expect("realized");
    assert_eq!(shown(&clock, root), "00:00");

    let later = now + Duration::from_secs(1);
    clock.tick(later);
    clock.flush(later);
    assert_eq!(shown(&clock, root), "00:01");
}

#[test]
fn invalid_elapsed_pattern_fails_fast() {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time");
    assert_eq!(
        ElapsedTime::with_format(start, "hh:zz").unwrap_err(),
        ClockError::InvalidFormatToken("zz".to_string())
    );
}
