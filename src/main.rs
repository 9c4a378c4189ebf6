//! Terminal runner (default binary).
//!
//! Drives the engine at its 100 Hz logic tick, collects crossterm key events
//! between ticks and draws one frame per tick through the diff renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use oled_tetris::core::{ClockRng, Engine, RenderSnapshot};
use oled_tetris::input::{is_pause_key, should_quit, InputTracker};
use oled_tetris::term::{GameView, TerminalRenderer, Viewport};
use oled_tetris::types::{GameState, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut engine = Engine::new(Box::new(ClockRng::new()));
    let view = GameView::default();
    let mut tracker = InputTracker::new();
    let mut snapshot = RenderSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();
    let mut last_size = crossterm::terminal::size().unwrap_or((80, 24));

    loop {
        engine.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            term.invalidate();
            last_size = (w, h);
        }
        let mut fb = view.render(&snapshot, Viewport::new(w, h));
        term.draw_swap(&mut fb)?;

        // Drain input until the next tick is due.
        loop {
            let timeout = tick_duration
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if is_pause_key(key.code) {
                            let pause = engine.game_state() != GameState::Paused;
                            engine.set_paused(pause);
                            continue;
                        }
                        tracker.key_press(key.code);
                    }
                    KeyEventKind::Release => tracker.key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let input = tracker.snapshot();
            engine.tick(&input);
        }
    }
}
