use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::model::Chapter;
use crate::tui::component::Component;
use crate::tui::components::Loading;
use crate::tui::components::truncate_str;

/// Index of all chapters: number, transliterated and translated names,
/// verse count and the Arabic name.
pub struct ChapterList<'a> {
    pub chapters: &'a [Chapter],
    pub state: &'a mut ListState,
    pub loading: bool,
    pub spinner_frame: usize,
}

fn chapter_row(chapter: &Chapter, width: usize) -> Line<'_> {
    let number = format!("{:>3}  ", chapter.number);
    let details = format!(
        "  {} verses · {}  ",
        chapter.number_of_ayahs, chapter.revelation_type
    );
    let name_width = width
        .saturating_sub(number.len() + details.len() + 12)
        .max(8);
    let name = truncate_str(
        &format!("{} ({})", chapter.english_name, chapter.english_name_translation),
        name_width,
    );

    Line::from(vec![
        Span::styled(number, Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{name:<name_width$}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(details, Style::default().fg(Color::DarkGray)),
        Span::styled(chapter.name.as_str(), Style::default().fg(Color::Yellow)),
    ])
}

impl Component for ChapterList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Chapters ")
            .title_bottom(Line::from(" Enter Read  r Reload  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.chapters.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            if self.loading {
                Loading {
                    label: "Loading chapters...",
                    frame_index: self.spinner_frame,
                }
                .render(frame, inner);
            } else {
                frame.render_widget(
                    Paragraph::new("Chapter list unavailable. Press r to retry.")
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center),
                    inner,
                );
            }
            return;
        }

        let width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .chapters
            .iter()
            .map(|c| ListItem::new(chapter_row(c, width)))
            .collect();

        if self.state.selected().is_none() {
            self.state.select(Some(0));
        }
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_stateful_widget(list, area, self.state);
    }
}
