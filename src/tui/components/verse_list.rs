//! Chapter reader: a header with the chapter's names, then one card per verse
//! with the Arabic text above its translation.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::model::{Chapter, Verse};
use crate::tui::component::Component;
use crate::tui::components::card::{Card, CardSection};
use crate::tui::components::card_list::{CardList, CardListState};
use crate::tui::components::Loading;

pub fn verse_card(chapter_number: u32, verse: &Verse) -> Card {
    let mut sections = vec![CardSection::new(
        verse.text.as_str(),
        Style::default().fg(Color::Yellow),
    )];
    if let Some(translation) = &verse.translated_text {
        sections.push(CardSection::new(translation.as_str(), Style::default()));
    }
    Card {
        title: format!(" {}:{} · Juz {} ", chapter_number, verse.number_in_chapter, verse.juz),
        sections,
        accent: Color::Green,
        is_selected: false,
    }
}

pub struct VerseList<'a> {
    pub chapter: Option<&'a Chapter>,
    pub verses: &'a [Verse],
    pub state: &'a mut CardListState,
    pub loading: bool,
    pub spinner_frame: usize,
}

impl VerseList<'_> {
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let Some(chapter) = self.chapter else {
            return;
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{}. {}", chapter.number, chapter.english_name),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(chapter.name.as_str(), Style::default().fg(Color::Yellow)),
            ]),
            Line::styled(
                format!(
                    "{} · {} · {} verses",
                    chapter.english_name_translation,
                    chapter.revelation_type,
                    chapter.number_of_ayahs
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::BOTTOM)),
            area,
        );
    }
}

impl Component for VerseList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        self.render_header(frame, header_area);

        if self.verses.is_empty() {
            if self.loading {
                Loading {
                    label: "Loading verses...",
                    frame_index: self.spinner_frame,
                }
                .render(frame, list_area);
            } else {
                frame.render_widget(
                    Paragraph::new("No verses loaded. Press r to retry.")
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center),
                    list_area,
                );
            }
            return;
        }

        let number = self.chapter.map(|c| c.number).unwrap_or(0);
        let cards = self.verses.iter().map(|v| verse_card(number, v)).collect();
        CardList::new(self.state, cards).render(frame, list_area);
    }
}
