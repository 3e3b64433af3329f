//! Minimal counter demo: drive a counter face for a few seconds and print
//! the markup the reconciler maintains.
//!
//! Run with `cargo run --example counter`.

use std::time::{Duration, Instant};

use flipclock::{Counter, FlipClock, HookPoint, OutputSurface};

fn main() {
    tracing_subscriber::fmt::init();

    let mut clock = FlipClock::builder()
        .face(Counter::new(0))
        .interval(Duration::from_millis(500))
        .auto_start(true)
        .build()
        .expect("a face is configured");

    clock.on(HookPoint::Interval, |event| {
        println!("interval fired (cycle {})", event.cycle);
    });

    let now = Instant::now();
    let target = clock.document_mut().create_element("div");
    clock.mount(target, now);
    clock.flush(now);

    for step in 1..=6u64 {
        let at = now + Duration::from_millis(500 * step);
        clock.tick(at);
        clock.flush(at);
        if let Some(root) = clock.root() {
            println!("{}", clock.document().to_html(root));
        }
    }

    clock.unmount(now + Duration::from_secs(4));
}
