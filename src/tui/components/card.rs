use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// One styled block of text inside a card.
#[derive(Debug, Clone)]
pub struct CardSection {
    pub text: String,
    pub style: Style,
}

impl CardSection {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A bordered reading card: a verse, a narration.
///
/// Transient like every list item: built each frame by the list that owns
/// the selection state. Sections are separated by a blank line.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub sections: Vec<CardSection>,
    pub accent: Color,
    pub is_selected: bool,
}

impl Card {
    fn visible_sections(&self) -> impl Iterator<Item = &CardSection> {
        self.sections.iter().filter(|s| !s.text.trim().is_empty())
    }

    /// Predicts the rendered height at `width` without rendering.
    ///
    /// Wrapping options mirror ratatui's `Paragraph` so the scroll view
    /// canvas matches what gets drawn.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let mut lines = 0usize;
        let mut sections = 0usize;
        for section in self.visible_sections() {
            sections += 1;
            for line in section.text.trim().lines() {
                lines += textwrap::wrap(line, &options).len().max(1);
            }
        }
        let separators = sections.saturating_sub(1);

        (lines + separators).max(1) as u16 + VERTICAL_OVERHEAD
    }

    fn text(&self) -> Text<'_> {
        let mut lines = Vec::new();
        for (i, section) in self.visible_sections().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            for line in section.text.trim().lines() {
                lines.push(Line::styled(line, section.style));
            }
        }
        Text::from(lines)
    }
}

impl Widget for &Card {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.accent).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.title.as_str())
            .border_type(if self.is_selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.text())
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for Card {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&*self, area);
    }
}
