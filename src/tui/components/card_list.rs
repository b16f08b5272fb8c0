//! # CardList Component
//!
//! Scrollable column of reading cards with one selected card. Used for the
//! verses of a chapter and the narrations of a collection.
//!
//! `CardList` is created each frame and wraps `&'a mut CardListState`, which
//! lives in `TuiState`. Heights are measured before drawing so the scroll
//! view canvas is exact and the selection can be kept in view.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::Card;
use crate::tui::event::TuiEvent;

/// Cards skipped by PageUp/PageDown.
const PAGE_STEP: usize = 5;

/// Selection and scroll state, persisted across frames.
#[derive(Default)]
pub struct CardListState {
    pub scroll_state: ScrollViewState,
    pub selected: usize,
    /// Card heights from the last render.
    pub heights: Vec<u16>,
    /// Running sum of `heights`; `prefix_heights[i]` is the bottom of card `i`.
    pub prefix_heights: Vec<u16>,
    pub viewport_height: u16,
    /// Number of cards at last render, for clamping between frames.
    len: usize,
}

impl CardListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first card, scrolled to the top.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn select_next(&mut self, step: usize) {
        if self.len > 0 {
            self.selected = self.selected.saturating_add(step).min(self.len - 1);
        }
    }

    pub fn select_previous(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn rebuild_prefix_heights(&mut self) {
        let mut total = 0u16;
        self.prefix_heights = self
            .heights
            .iter()
            .map(|h| {
                total = total.saturating_add(*h);
                total
            })
            .collect();
    }

    /// Scroll the viewport so the selected card is visible.
    /// Cards taller than the viewport are aligned by their top edge.
    pub fn scroll_to_selected(&mut self) {
        let idx = self.selected;
        let Some(&item_bottom) = self.prefix_heights.get(idx) else {
            return;
        };
        let item_top = if idx == 0 {
            0
        } else {
            self.prefix_heights[idx - 1]
        };
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let height = item_bottom - item_top;
            let new_y = if height > self.viewport_height {
                item_top
            } else {
                item_bottom.saturating_sub(self.viewport_height)
            };
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

impl EventHandler for CardListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => self.select_previous(1),
            TuiEvent::CursorDown => self.select_next(1),
            TuiEvent::PageUp => self.select_previous(PAGE_STEP),
            TuiEvent::PageDown => self.select_next(PAGE_STEP),
            TuiEvent::Home => self.selected = 0,
            TuiEvent::End => self.select_next(usize::MAX),
            // Wheel scrolls the view without moving the selection
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                return None;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                return None;
            }
            _ => return None,
        }
        self.scroll_to_selected();
        None
    }
}

/// Transient render wrapper. Marks the selected card before drawing.
pub struct CardList<'a> {
    pub state: &'a mut CardListState,
    pub cards: Vec<Card>,
}

impl<'a> CardList<'a> {
    pub fn new(state: &'a mut CardListState, cards: Vec<Card>) -> Self {
        Self { state, cards }
    }
}

impl Component for CardList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column

        self.state.set_len(self.cards.len());
        self.state.heights = self
            .cards
            .iter()
            .map(|c| c.calculate_height(content_width))
            .collect();
        self.state.rebuild_prefix_heights();
        self.state.viewport_height = area.height;
        self.state.scroll_to_selected();

        let total_height = self.state.prefix_heights.last().copied().unwrap_or(0);
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = 0u16;
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.is_selected = i == self.state.selected;
            let height = self.state.heights[i];
            scroll_view.render_widget(&*card, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
