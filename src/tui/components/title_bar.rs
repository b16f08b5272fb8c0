//! # TitleBar Component
//!
//! One-line bar across the top: app name, current screen, the transient
//! status message and the active preferences.
//!
//! Stateless. All props come from the core `App`:
//!
//! ```text
//! Nur · Noble Quran | Translation: Tamil            Gemini · Tamil
//! ```
//!
//! The preferences are right-aligned so they stay put while the status
//! message changes length.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::Engine;
use crate::core::model::TranslationLang;
use crate::tui::component::Component;
use crate::tui::components::loading::spinner_glyph;

pub struct TitleBar<'a> {
    pub screen_title: &'a str,
    pub status_message: &'a str,
    pub engine: Engine,
    pub language: TranslationLang,
    /// Spinner frame while anything is in flight.
    pub busy_frame: Option<usize>,
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let prefs = format!(" {} · {} ", self.engine.label(), self.language.name());
        let [left_area, right_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(prefs.chars().count() as u16),
        ])
        .areas(area);

        let mut spans = vec![
            Span::styled(
                "Nur",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" · "),
            Span::raw(self.screen_title),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(self.status_message));
        }
        if let Some(frame_index) = self.busy_frame {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                spinner_glyph(frame_index),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Line::from(spans), left_area);
        frame.render_widget(
            Span::styled(prefs, Style::default().fg(Color::DarkGray)),
            right_area,
        );
    }
}
