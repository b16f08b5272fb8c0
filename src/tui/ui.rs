use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::{App, Screen};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ChapterList, CollectionHub, DocumentViewer, Home, InsightOverlay, NarrationList, NoticePopup,
    ResourceList, SegmentPicker, TitleBar, VerseList,
};

/// Key hints for the bottom line.
fn help_text(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => " ↑↓ Move  Enter Open  l Language  e Engine  q Quit ",
        Screen::ChapterList => " ↑↓ Move  Enter Read  r Reload  Esc Back ",
        Screen::ChapterDetail => {
            " ↑↓ Verse  a Explain  s Fragments  l Language  r Reload  Esc Back "
        }
        Screen::CollectionHub => " ↑↓ Move  Enter Open  Esc Back ",
        Screen::NarrationList => " ↑↓ Narration  a Explain  i Isnad  s Fragments  Esc Back ",
        Screen::ResourceList => " ↑↓ Move  Enter Open  Esc Back ",
        Screen::DocumentViewer => " Esc Back ",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let busy = app.loading.any() || app.overlay.is_busy();
    TitleBar {
        screen_title: app.screen.title(),
        status_message: &app.status_message,
        engine: app.engine,
        language: app.language,
        busy_frame: busy.then_some(spinner_frame),
    }
    .render(frame, title_area);

    draw_screen(frame, main_area, app, tui, spinner_frame);

    frame.render_widget(
        Span::styled(help_text(app.screen), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlays, bottom to top
    if let Some(picker) = tui.segment_picker.as_mut() {
        SegmentPicker::new(picker).render(frame, main_area);
    }
    if app.overlay.is_open() {
        InsightOverlay {
            overlay: &app.overlay,
            narrations: &app.narrations,
            scroll: tui.overlay_scroll,
            spinner_frame,
        }
        .render(frame, main_area);
    }
    if let Some(message) = &app.notice {
        NoticePopup { message }.render(frame, main_area);
    }
}

fn draw_screen(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    match app.screen {
        Screen::Home => Home {
            state: &mut tui.home,
        }
        .render(frame, area),
        Screen::ChapterList => ChapterList {
            chapters: &app.chapters,
            state: &mut tui.chapters,
            loading: app.loading.chapters,
            spinner_frame,
        }
        .render(frame, area),
        Screen::ChapterDetail => VerseList {
            chapter: app.selected_chapter.as_ref(),
            verses: &app.verses,
            state: &mut tui.verses,
            loading: app.loading.verses,
            spinner_frame,
        }
        .render(frame, area),
        Screen::CollectionHub => CollectionHub {
            state: &mut tui.collections,
        }
        .render(frame, area),
        Screen::NarrationList => NarrationList {
            collection: app.active_collection,
            narrations: &app.narrations,
            state: &mut tui.narrations,
            loading: app.loading.narrations,
            spinner_frame,
        }
        .render(frame, area),
        Screen::ResourceList => ResourceList {
            state: &mut tui.resources,
        }
        .render(frame, area),
        Screen::DocumentViewer => DocumentViewer {
            document: app.document,
        }
        .render(frame, area),
    }
}
