//! Narrations of the open collection, one card each with grading, both
//! texts, any cached AI translation and the chain of narrators.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::model::{Collection, Grading, Narration};
use crate::tui::component::Component;
use crate::tui::components::card::{Card, CardSection};
use crate::tui::components::card_list::{CardList, CardListState};
use crate::tui::components::loading::Loading;
use crate::tui::components::theme_color;

pub fn grading_color(grading: Grading) -> Color {
    match grading {
        Grading::Sahih => Color::Green,
        Grading::Hasan => Color::Cyan,
        Grading::Daif => Color::Yellow,
        Grading::Mawdu => Color::Red,
        Grading::Unknown => Color::Gray,
    }
}

pub fn narration_card(narration: &Narration) -> Card {
    let mut sections = vec![
        CardSection::new(narration.arabic_text.as_str(), Style::default().fg(Color::Yellow)),
        CardSection::new(narration.english_text.as_str(), Style::default()),
    ];
    if let Some(translated) = &narration.secondary_translation {
        sections.push(CardSection::new(
            format!("Tamil: {translated}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(chain) = &narration.isnad {
        sections.push(CardSection::new(
            format!("Chain: {chain}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    sections.push(CardSection::new(
        format!("{} · graded by {}", narration.chapter_title, narration.graded_by),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ));

    Card {
        title: format!(
            " {} {} · {} ({}) ",
            narration.collection,
            narration.hadith_number,
            narration.grading.label(),
            narration.grading.term()
        ),
        sections,
        accent: grading_color(narration.grading),
        is_selected: false,
    }
}

pub struct NarrationList<'a> {
    pub collection: Option<&'a Collection>,
    pub narrations: &'a [Narration],
    pub state: &'a mut CardListState,
    pub loading: bool,
    pub spinner_frame: usize,
}

impl Component for NarrationList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        if let Some(collection) = self.collection {
            let accent = theme_color(collection.theme);
            let byline = match collection.author {
                Some(author) => format!("{} · {}", author, collection.size.describe()),
                None => collection.size.describe(),
            };
            let lines = vec![
                Line::styled(
                    collection.name,
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
                Line::styled(byline, Style::default().fg(Color::DarkGray)),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::BOTTOM)),
                header_area,
            );
        }

        if self.narrations.is_empty() {
            if self.loading {
                Loading {
                    label: "Gathering narrations...",
                    frame_index: self.spinner_frame,
                }
                .render(frame, list_area);
            } else {
                frame.render_widget(
                    Paragraph::new("No narrations available for this collection.")
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    list_area,
                );
            }
            return;
        }

        let cards = self.narrations.iter().map(narration_card).collect();
        CardList::new(self.state, cards).render(frame, list_area);
    }
}
