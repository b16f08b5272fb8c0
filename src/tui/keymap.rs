//! Key routing: turns a `TuiEvent` into a core `Action` given what's on
//! screen. Layers are checked top-down (notice, AI overlay, fragment picker,
//! then the screen itself), so a modal swallows every key it doesn't use.

use crate::core::action::Action;
use crate::core::catalog::hub_order;
use crate::core::state::{App, InsightOrigin, Screen};
use crate::tui::TuiState;
use crate::tui::component::EventHandler;
use crate::tui::components::home::HOME_ENTRIES;
use crate::tui::components::{
    SegmentPickerEvent, SegmentPickerState, navigate_list, selected_index,
};
use crate::tui::event::TuiEvent;

/// Lines moved by PageUp/PageDown in the AI overlay.
const OVERLAY_PAGE: u16 = 10;

pub fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if app.notice.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::Back => Some(Action::DismissNotice),
            _ => None,
        };
    }

    if app.overlay.is_open() {
        return overlay_keys(tui, event);
    }

    if let Some(picker) = tui.segment_picker.as_mut() {
        return match picker.handle_event(event)? {
            SegmentPickerEvent::Select { text, context } => {
                tui.segment_picker = None;
                Some(Action::RequestInsight {
                    text,
                    context,
                    origin: InsightOrigin::Fragment,
                })
            }
            SegmentPickerEvent::Dismiss => {
                tui.segment_picker = None;
                None
            }
        };
    }

    match event {
        TuiEvent::Char('q') => return Some(Action::Quit),
        TuiEvent::Char('l') => return Some(Action::ToggleLanguage),
        TuiEvent::Char('e') => return Some(Action::ToggleEngine),
        TuiEvent::Back => return Some(Action::Back),
        _ => {}
    }

    match app.screen {
        Screen::Home => home_keys(tui, event),
        Screen::ChapterList => chapter_list_keys(app, tui, event),
        Screen::ChapterDetail => chapter_detail_keys(app, tui, event),
        Screen::CollectionHub => collection_hub_keys(tui, event),
        Screen::NarrationList => narration_keys(app, tui, event),
        Screen::ResourceList => {
            let len = crate::core::catalog::RESOURCES.len();
            if navigate_list(&mut tui.resources, len, event) {
                return None;
            }
            match event {
                TuiEvent::Submit => selected_index(&tui.resources, len).map(Action::OpenResource),
                _ => None,
            }
        }
        Screen::DocumentViewer => None,
    }
}

fn overlay_keys(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Back | TuiEvent::Submit => return Some(Action::DismissOverlay),
        TuiEvent::Char('q') => return Some(Action::Quit),
        TuiEvent::CursorUp | TuiEvent::ScrollUp => {
            tui.overlay_scroll = tui.overlay_scroll.saturating_sub(1)
        }
        TuiEvent::CursorDown | TuiEvent::ScrollDown => {
            tui.overlay_scroll = tui.overlay_scroll.saturating_add(1)
        }
        TuiEvent::PageUp => tui.overlay_scroll = tui.overlay_scroll.saturating_sub(OVERLAY_PAGE),
        TuiEvent::PageDown => tui.overlay_scroll = tui.overlay_scroll.saturating_add(OVERLAY_PAGE),
        TuiEvent::Home => tui.overlay_scroll = 0,
        _ => {}
    }
    None
}

fn home_keys(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if navigate_list(&mut tui.home, HOME_ENTRIES.len(), event) {
        return None;
    }
    let index = match event {
        TuiEvent::Submit => selected_index(&tui.home, HOME_ENTRIES.len())?,
        TuiEvent::Char(c @ '1'..='9') => (*c as usize) - ('1' as usize),
        _ => return None,
    };
    HOME_ENTRIES
        .get(index)
        .map(|entry| Action::Navigate(entry.screen))
}

fn chapter_list_keys(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if navigate_list(&mut tui.chapters, app.chapters.len(), event) {
        return None;
    }
    match event {
        TuiEvent::Submit => selected_index(&tui.chapters, app.chapters.len()).map(Action::OpenChapter),
        TuiEvent::Char('r') if !app.loading.chapters => Some(Action::LoadChapters),
        _ => None,
    }
}

fn chapter_detail_keys(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Char('r') => return Some(Action::ReloadTranslation),
        TuiEvent::Submit | TuiEvent::Char('a') | TuiEvent::Char('s') => {}
        _ => {
            tui.verses.handle_event(event);
            return None;
        }
    }

    let index = tui.verses.selected;
    let verse = app.verses.get(index)?;
    if matches!(event, TuiEvent::Char('s')) {
        let chapter_name = app
            .selected_chapter
            .as_ref()
            .map(|c| c.english_name.as_str())
            .unwrap_or("the Quran");
        let text = verse.translated_text.as_deref().unwrap_or(&verse.text);
        tui.segment_picker = Some(SegmentPickerState::new(
            format!("Verse {} of {}", verse.number_in_chapter, chapter_name),
            text,
        ));
        return None;
    }
    Some(Action::ExplainVerse(index))
}

fn collection_hub_keys(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    let order = hub_order();
    if navigate_list(&mut tui.collections, order.len(), event) {
        return None;
    }
    match event {
        TuiEvent::Submit => {
            let index = selected_index(&tui.collections, order.len())?;
            Some(Action::OpenCollection(order[index].id.to_string()))
        }
        _ => None,
    }
}

fn narration_keys(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Submit | TuiEvent::Char('a') | TuiEvent::Char('i') | TuiEvent::Char('s') => {}
        _ => {
            tui.narrations.handle_event(event);
            return None;
        }
    }

    let index = tui.narrations.selected;
    let narration = app.narrations.get(index)?;
    match event {
        TuiEvent::Char('i') => Some(Action::AnalyzeIsnad(index)),
        TuiEvent::Char('s') => {
            tui.segment_picker = Some(SegmentPickerState::new(
                format!("{} {}", narration.collection, narration.hadith_number),
                &narration.english_text,
            ));
            None
        }
        _ => Some(Action::ExplainNarration(index)),
    }
}
