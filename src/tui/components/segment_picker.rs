//! # Segment Picker Component
//!
//! Overlay listing a passage split into two-sentence groups. Picking one
//! asks the AI engine about just that fragment. Opened with `s` on a verse
//! or narration.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SegmentPickerState` lives in `TuiState` while the picker is open
//! - `SegmentPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::segment::{SentenceGroup, group_sentences};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;

/// Persistent state for the segment picker overlay.
pub struct SegmentPickerState {
    /// Where the passage came from, e.g. "Verse 3 of Al-Baqara".
    pub context: String,
    pub groups: Vec<SentenceGroup>,
    pub selected: usize,
    pub list_state: ListState,
}

impl SegmentPickerState {
    pub fn new(context: String, text: &str) -> Self {
        let groups = group_sentences(text);
        let mut list_state = ListState::default();
        if !groups.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            context,
            groups,
            selected: 0,
            list_state,
        }
    }
}

/// Events emitted by the segment picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPickerEvent {
    Select { text: String, context: String },
    Dismiss,
}

impl EventHandler for SegmentPickerState {
    type Event = SegmentPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SegmentPickerEvent> {
        match event {
            TuiEvent::Back => Some(SegmentPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.groups.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.groups.is_empty() {
                    self.selected = (self.selected + 1).min(self.groups.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self.groups.get(self.selected).map(|group| {
                SegmentPickerEvent::Select {
                    text: group.text(),
                    context: format!("Part {} of {}", self.selected + 1, self.context),
                }
            }),
            _ => None,
        }
    }
}

/// Transient render wrapper for the segment picker overlay.
pub struct SegmentPicker<'a> {
    state: &'a mut SegmentPickerState,
}

impl<'a> SegmentPicker<'a> {
    pub fn new(state: &'a mut SegmentPickerState) -> Self {
        Self { state }
    }
}

impl Component for SegmentPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Fragments · {} ", self.state.context))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Explain  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.groups.is_empty() {
            let empty = Paragraph::new("Nothing to split here.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let label = format!("{:>2}. ", i + 1);
                let body = truncate_str(&group.text(), inner_width.saturating_sub(label.len()));
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(label, Style::default().fg(Color::DarkGray)),
                    Span::styled(body, style),
                ]))
            })
            .collect();

        frame.render_stateful_widget(
            List::new(items).block(block),
            overlay,
            &mut self.state.list_state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSAGE: &str = "First. Second! Third? Fourth.";

    #[test]
    fn test_groups_passage() {
        let state = SegmentPickerState::new("Verse 1".to_string(), PASSAGE);
        assert_eq!(state.groups.len(), 2);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_select_emits_group_text() {
        let mut state = SegmentPickerState::new("Verse 1".to_string(), PASSAGE);
        state.handle_event(&TuiEvent::CursorDown);
        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(SegmentPickerEvent::Select {
                text: "Third? Fourth.".to_string(),
                context: "Part 2 of Verse 1".to_string(),
            })
        );
    }

    #[test]
    fn test_cursor_clamps() {
        let mut state = SegmentPickerState::new("Verse 1".to_string(), PASSAGE);
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::CursorUp);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_empty_passage() {
        let mut state = SegmentPickerState::new("Verse 1".to_string(), "   ");
        assert!(state.groups.is_empty());
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(
            state.handle_event(&TuiEvent::Back),
            Some(SegmentPickerEvent::Dismiss)
        );
    }
}
