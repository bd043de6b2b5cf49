// artichat — A terminal chat demo with inline artifacts
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

pub mod autocomplete;
pub mod commands;
mod events;
pub mod input;
mod keys;
pub mod overlay;
mod sessions;
mod state;
mod submit;

pub use autocomplete::{AutocompleteMode, AutocompleteState, Completion, MentionToken};
pub use events::{
    AppEvent, handle_app_event, handle_terminal_event, input_edited, sync_query, tick,
};
pub use input::InputState;
pub use overlay::Overlay;
pub use state::{
    ActiveReply, App, AppOptions, AppStatus, ChatViewport, Focus, Notice, NoticeKind,
};

use crossterm::event::{
    EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use futures::{FutureExt as _, StreamExt};
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::try_init().map_err(|err| {
        tracing::error!("terminal init failed: {err}");
        anyhow::Error::new(crate::error::AppError::TerminalInit)
    })?;

    // Ignore errors on terminals without bracketed paste or the enhanced protocol
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        // Enhanced keyboard protocol for reliable modifier detection (e.g. Shift+Enter)
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
        )
    );

    let result = event_loop(&mut terminal, app).await;

    // --- Graceful shutdown ---
    app.cancel_reply();
    app.persist_messages();
    app.queries.clear();

    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        PopKeyboardEnhancementFlags
    );
    ratatui::restore();

    result
}

async fn event_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                events::handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                events::handle_app_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            // Terminal events first so typing stays responsive
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                events::handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => events::handle_app_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            return Ok(());
        }

        // Phase 3: timers, then render once
        events::tick(app, Instant::now());
        if app.is_streaming() {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
        }
        terminal.draw(|f| crate::ui::render(f, app))?;
        last_render = Instant::now();
    }
}
