//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and runs the
//! Effects that `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a fetch or AI call in flight): draws every ~80ms so the
//!   spinners move.
//! - **Idle**: sleeps up to 500ms and only redraws on events, resize or a
//!   background result.
//!
//! ## Background work
//!
//! Every fetch runs in its own tokio task and reports back by sending an
//! `Action` over a std channel, drained once per loop iteration. The reducer
//! drops results whose generation is stale, so in-flight tasks are never
//! cancelled here.

mod component;
mod components;
mod event;
mod keymap;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::widgets::ListState;

use crate::api::{HadithClient, QuranClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{EngineError, InsightEngine, build_engine};
use crate::tui::components::{CardListState, SegmentPickerState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Upper bound on a single AI call.
const AI_TIMEOUT: Duration = Duration::from_secs(90);

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    pub home: ListState,
    pub chapters: ListState,
    pub verses: CardListState,
    pub collections: ListState,
    pub narrations: CardListState,
    pub resources: ListState,
    /// Fragment picker overlay (None = hidden)
    pub segment_picker: Option<SegmentPickerState>,
    pub overlay_scroll: u16,
    // Generations last seen, to reset cursors when a list is replaced
    seen_verses: u64,
    seen_narrations: u64,
    seen_overlay: u64,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            home: ListState::default(),
            chapters: ListState::default(),
            verses: CardListState::new(),
            collections: ListState::default(),
            narrations: CardListState::new(),
            resources: ListState::default(),
            segment_picker: None,
            overlay_scroll: 0,
            seen_verses: 0,
            seen_narrations: 0,
            seen_overlay: 0,
        }
    }

    /// Resets presentation state tied to a list or overlay that core has
    /// replaced since the last frame.
    pub fn sync(&mut self, app: &App) {
        if app.generations.verses != self.seen_verses {
            self.seen_verses = app.generations.verses;
            self.verses.reset();
        }
        if app.generations.narrations != self.seen_narrations {
            self.seen_narrations = app.generations.narrations;
            self.narrations.reset();
        }
        if app.generations.overlay != self.seen_overlay {
            self.seen_overlay = app.generations.overlay;
            self.overlay_scroll = 0;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Remote clients and the active AI engine. Turns Effects into tasks.
pub struct Services {
    config: ResolvedConfig,
    quran: Arc<QuranClient>,
    hadith: Arc<HadithClient>,
    engine: Arc<dyn InsightEngine>,
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver background result: receiver dropped");
    }
}

impl Services {
    pub fn new(config: ResolvedConfig) -> Self {
        let engine = build_engine(config.engine, &config);
        Self {
            quran: Arc::new(QuranClient::new(Some(config.quran_base_url.clone()))),
            hadith: Arc::new(HadithClient::new(Some(config.hadith_base_url.clone()))),
            engine,
            config,
        }
    }

    /// Runs an effect. Returns true when the app should exit.
    pub fn dispatch(&mut self, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::FetchChapters { generation } => {
                let quran = self.quran.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = quran.fetch_chapters().await;
                    send(&tx, Action::ChaptersLoaded { generation, result });
                });
            }
            Effect::FetchVerses {
                generation,
                chapter,
                language,
            } => {
                let quran = self.quran.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = quran.fetch_verses(chapter, language).await;
                    send(&tx, Action::VersesLoaded { generation, result });
                });
            }
            Effect::FetchNarrations {
                generation,
                collection,
            } => {
                let hadith = self.hadith.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let narrations = hadith.fetch_narrations(collection).await;
                    send(
                        &tx,
                        Action::NarrationsLoaded {
                            generation,
                            narrations,
                        },
                    );
                });
            }
            Effect::FetchInsight {
                generation,
                request,
            } => {
                info!("Requesting insight from {}", self.engine.name());
                let engine = self.engine.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = tokio::time::timeout(AI_TIMEOUT, engine.generate_insight(&request))
                        .await
                        .unwrap_or_else(|_| Err(timed_out()));
                    send(&tx, Action::InsightReady { generation, result });
                });
            }
            Effect::FetchIsnad {
                generation,
                chain,
                text,
            } => {
                info!("Requesting isnad analysis from {}", self.engine.name());
                let engine = self.engine.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = tokio::time::timeout(AI_TIMEOUT, engine.analyze_chain(&chain, &text))
                        .await
                        .unwrap_or_else(|_| Err(timed_out()));
                    send(&tx, Action::IsnadReady { generation, result });
                });
            }
            Effect::EngineChanged(engine) => {
                self.engine = build_engine(engine, &self.config);
                info!("Switched AI engine to {}", self.engine.name());
            }
        }
        false
    }
}

fn timed_out() -> EngineError {
    warn!("AI call timed out after {}s", AI_TIMEOUT.as_secs());
    EngineError::Network(format!("no answer after {}s", AI_TIMEOUT.as_secs()))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::new(config.language, config.engine);
    let mut services = Services::new(config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Chapter index loads in the background from the start
    let effect = update(&mut app, Action::LoadChapters);
    services.dispatch(effect, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        tui.sync(&app);
        let animating = app.loading.any() || app.overlay.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let Some(action) = keymap::handle_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Key action: {:?}", action);
            let effect = update(&mut app, action);
            if services.dispatch(effect, &tx) {
                break 'main;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            if services.dispatch(effect, &tx) {
                break 'main;
            }
        }
    }

    info!("Nur shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::update;
    use crate::test_support::{chapter, narration, test_app};

    #[test]
    fn test_sync_resets_verse_cursor_on_new_chapter() {
        let mut app = test_app();
        app.chapters = vec![chapter(1, "Al-Faatiha")];
        let mut tui = TuiState::new();
        tui.verses.selected = 4;

        update(&mut app, Action::OpenChapter(0));
        tui.sync(&app);

        assert_eq!(tui.verses.selected, 0);
    }

    #[test]
    fn test_sync_keeps_cursor_when_nothing_changed() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.narrations.selected = 2;
        tui.sync(&app);
        assert_eq!(tui.narrations.selected, 2);
    }

    #[test]
    fn test_sync_resets_overlay_scroll() {
        let mut app = test_app();
        app.narrations = vec![narration(0)];
        let mut tui = TuiState::new();
        tui.overlay_scroll = 7;

        update(&mut app, Action::ExplainNarration(0));
        tui.sync(&app);

        assert_eq!(tui.overlay_scroll, 0);
    }

    #[tokio::test]
    async fn test_dispatch_engine_change_and_quit() {
        let mut services = Services::new(crate::core::config::resolve(
            &Default::default(),
            Default::default(),
        ));
        let (tx, _rx) = mpsc::channel();

        assert!(!services.dispatch(Effect::EngineChanged(crate::Engine::Ollama), &tx));
        assert_eq!(services.engine.name(), "ollama");
        assert!(services.dispatch(Effect::Quit, &tx));
    }
}
