//! # TUI Components
//!
//! One file per screen or overlay, plus the shared card building blocks.
//!
//! ### Stateless components (props only)
//!
//! - `TitleBar`, `Home`, `ChapterList`, `CollectionHub`, `ResourceList`,
//!   `DocumentViewer`, `InsightOverlay`, `NoticePopup`, `Loading`
//!
//! ### Stateful components
//!
//! - `CardList` over `CardListState`: verse and narration reading lists
//! - `SegmentPicker` over `SegmentPickerState`: sentence groups for a
//!   fragment insight
//!
//! List screens take a `&mut ListState` that lives in `TuiState`, so the
//! cursor survives leaving and re-entering a screen.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── home.rs
//! ├── chapter_list.rs
//! ├── verse_list.rs        (CardList of verses)
//! ├── collection_hub.rs
//! ├── narration_list.rs    (CardList of narrations)
//! ├── resource_list.rs
//! ├── document_viewer.rs
//! ├── card.rs / card_list.rs
//! ├── insight_overlay.rs
//! ├── segment_picker.rs
//! ├── notice.rs
//! └── loading.rs
//! ```

pub mod card;
pub mod card_list;
pub mod chapter_list;
pub mod collection_hub;
pub mod document_viewer;
pub mod home;
pub mod insight_overlay;
pub mod loading;
pub mod narration_list;
pub mod notice;
pub mod resource_list;
pub mod segment_picker;
mod title_bar;
pub mod verse_list;

pub use card_list::CardListState;
pub use chapter_list::ChapterList;
pub use collection_hub::CollectionHub;
pub use document_viewer::DocumentViewer;
pub use home::Home;
pub use insight_overlay::InsightOverlay;
pub use loading::Loading;
pub use narration_list::NarrationList;
pub use notice::NoticePopup;
pub use resource_list::ResourceList;
pub use segment_picker::{SegmentPicker, SegmentPickerEvent, SegmentPickerState};
pub use title_bar::TitleBar;
pub use verse_list::VerseList;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Color;
use ratatui::widgets::ListState;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::model::ColorTheme;
use crate::tui::event::TuiEvent;

/// Rows skipped by PageUp/PageDown in plain lists.
const LIST_PAGE_STEP: usize = 10;

pub fn theme_color(theme: ColorTheme) -> Color {
    match theme {
        ColorTheme::Amber => Color::Yellow,
        ColorTheme::Cyan => Color::Cyan,
        ColorTheme::Indigo => Color::Blue,
        ColorTheme::Rose => Color::LightRed,
        ColorTheme::Violet => Color::Magenta,
        ColorTheme::Emerald => Color::Green,
    }
}

/// Moves a list cursor for navigation keys. Returns true if the key was a
/// navigation key.
pub fn navigate_list(state: &mut ListState, len: usize, event: &TuiEvent) -> bool {
    if len == 0 {
        state.select(None);
        return matches!(
            event,
            TuiEvent::CursorUp
                | TuiEvent::CursorDown
                | TuiEvent::PageUp
                | TuiEvent::PageDown
                | TuiEvent::Home
                | TuiEvent::End
        );
    }
    let current = state.selected().unwrap_or(0).min(len - 1);
    let next = match event {
        TuiEvent::CursorUp | TuiEvent::ScrollUp => current.saturating_sub(1),
        TuiEvent::CursorDown | TuiEvent::ScrollDown => (current + 1).min(len - 1),
        TuiEvent::PageUp => current.saturating_sub(LIST_PAGE_STEP),
        TuiEvent::PageDown => (current + LIST_PAGE_STEP).min(len - 1),
        TuiEvent::Home => 0,
        TuiEvent::End => len - 1,
        _ => return false,
    };
    state.select(Some(next));
    true
}

/// The selected row, clamped to `len`.
pub fn selected_index(state: &ListState, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(state.selected().unwrap_or(0).min(len - 1))
}

/// Truncate to `max_width` display columns, adding "..." if cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// A `percent_x` by `percent_y` rectangle centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
