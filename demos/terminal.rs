//! Terminal wall clock: paints the live output tree into an alternate
//! screen, one frame per tick, until `q` or Esc is pressed.
//!
//! Run with `cargo run --example terminal`.

use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{Event, KeyCode, poll, read},
    execute,
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use flipclock::{ClockFace, Document, FlipClock, NodeId, OutputSurface};

/// The digits a card tree currently shows: active card faces plus divider
/// characters, in document order.
fn shown(document: &Document, id: NodeId, out: &mut String) {
    if document.has_class(id, "flip-clock-card") {
        let active = document.children(id)[0];
        let inner = document.children(active)[0];
        let top = document.children(inner)[0];
        out.push_str(&document.text_of(top));
        return;
    }
    if document.has_class(id, "flip-clock-divider") {
        out.push_str(&document.text_of(id));
        return;
    }
    for child in document.children(id) {
        shown(document, child, out);
    }
}

fn main() -> std::io::Result<()> {
    let mut clock = FlipClock::builder()
        .face(ClockFace::new())
        .interval(Duration::from_secs(1))
        .auto_start(true)
        .build()
        .expect("a face is configured");

    let now = Instant::now();
    let target = clock.document_mut().create_element("div");
    clock.mount(target, now);
    clock.flush(now);

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, Hide)?;

    let result = run(&mut clock, &mut out);

    execute!(out, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run(clock: &mut FlipClock, out: &mut impl Write) -> std::io::Result<()> {
    loop {
        let now = Instant::now();
        clock.tick(now);

        if let Some(root) = clock.root() {
            let mut face = String::new();
            shown(clock.document(), root, &mut face);
            execute!(
                out,
                Clear(ClearType::All),
                MoveTo(2, 1),
                Print(&face),
                MoveTo(2, 3),
                Print("press q to quit"),
            )?;
        }

        if poll(Duration::from_millis(50))? {
            if let Event::Key(key) = read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
        }
    }
    Ok(())
}
