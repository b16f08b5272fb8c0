//! Collection hub: the catalog grouped under category headings.
//!
//! The cursor indexes `catalog::hub_order()`; headings are drawn in between
//! but can't be selected, so the ListState's row index is translated.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::catalog::collections_by_category;
use crate::core::model::Collection;
use crate::tui::component::Component;
use crate::tui::components::{selected_index, theme_color, truncate_str};

pub struct CollectionHub<'a> {
    /// Cursor over the flattened hub order.
    pub state: &'a mut ListState,
}

fn collection_row(collection: &Collection, width: usize) -> ListItem<'static> {
    let accent = theme_color(collection.theme);
    let marker = if collection.document_url.is_some() {
        " [document]"
    } else {
        ""
    };
    let size = collection.size.describe();
    let name_width = width.saturating_sub(size.len() + marker.len() + 6);
    ListItem::new(Line::from(vec![
        Span::styled("  ● ", Style::default().fg(accent)),
        Span::styled(
            format!("{:<name_width$}", truncate_str(collection.name, name_width)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {size}"), Style::default().fg(Color::DarkGray)),
        Span::styled(marker, Style::default().fg(Color::Magenta)),
    ]))
}

impl Component for CollectionHub<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [list_area, detail_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(5)]).areas(area);
        let width = list_area.width.saturating_sub(4) as usize;

        let buckets = collections_by_category();
        let total: usize = buckets.iter().map(|(_, books)| books.len()).sum();
        let selected = selected_index(self.state, total).unwrap_or(0);
        self.state.select(Some(selected));

        let mut items = Vec::new();
        let mut row_of_selected = 0;
        let mut flat = 0;
        let mut selected_collection = None;
        for (category, books) in &buckets {
            items.push(ListItem::new(Line::styled(
                category.label().to_uppercase(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            )));
            for book in books {
                if flat == selected {
                    row_of_selected = items.len();
                    selected_collection = Some(*book);
                }
                items.push(collection_row(book, width));
                flat += 1;
            }
        }

        // Rendered with a throwaway state so headings don't shift the cursor
        let mut row_state = ListState::default()
            .with_offset(self.state.offset())
            .with_selected(Some(row_of_selected));
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Hadith Collections ")
                    .title_bottom(Line::from(" Enter Open  Esc Back ").centered())
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, list_area, &mut row_state);
        *self.state.offset_mut() = row_state.offset();

        if let Some(collection) = selected_collection {
            let mut lines = vec![Line::from(collection.description)];
            if let Some(author) = collection.author {
                lines.push(Line::styled(
                    format!("Compiled by {author}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if let Some(url) = collection.document_url {
                lines.push(Line::styled(
                    url,
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                ));
            }
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme_color(collection.theme)))
                            .padding(Padding::horizontal(1)),
                    ),
                detail_area,
            );
        }
    }
}
