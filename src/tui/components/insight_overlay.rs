//! # Insight Overlay
//!
//! Modal over the current screen for both AI results: a translation with
//! explanation, or an isnad study. Driven entirely by `core::state::Overlay`;
//! the only TUI-side state is the scroll offset.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::model::Narration;
use crate::core::state::Overlay;
use crate::inference::{AiInsight, IsnadAnalysis};
use crate::tui::component::Component;
use crate::tui::components::centered_rect;
use crate::tui::components::loading::spinner_glyph;

pub struct InsightOverlay<'a> {
    pub overlay: &'a Overlay,
    pub narrations: &'a [Narration],
    pub scroll: u16,
    pub spinner_frame: usize,
}

fn heading(text: &str) -> Line<'_> {
    Line::styled(
        text,
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )
}

fn busy_lines(label: String, spinner_frame: usize) -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::styled(
            format!("{} {}", spinner_glyph(spinner_frame), label),
            Style::default().fg(Color::Yellow),
        ),
    ]
}

fn insight_lines(insight: &AiInsight) -> Vec<Line<'_>> {
    let mut lines = vec![heading("Translation")];
    lines.extend(insight.translation.lines().map(Line::from));
    lines.push(Line::default());
    lines.push(heading("Explanation"));
    lines.extend(insight.explanation.lines().map(Line::from));
    if !insight.key_themes.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Key themes"));
        lines.push(Line::styled(
            insight.key_themes.join(" · "),
            Style::default().fg(Color::Cyan),
        ));
    }
    lines
}

fn isnad_lines(analysis: &IsnadAnalysis) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Chain verdict: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(analysis.reliability.as_str(), Style::default().fg(Color::Yellow)),
    ])];
    lines.push(Line::default());
    lines.push(heading("Narrators"));
    for (i, narrator) in analysis.narrators.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(narrator.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  [{}]", narrator.reliability),
                Style::default().fg(Color::Cyan),
            ),
        ]));
        if !narrator.bio.is_empty() {
            lines.push(Line::styled(
                format!("   {}", narrator.bio),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    if !analysis.scholarly_notes.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Scholarly notes"));
        lines.extend(analysis.scholarly_notes.lines().map(Line::from));
    }
    lines
}

impl InsightOverlay<'_> {
    fn narration_label(&self, index: usize) -> String {
        match self.narrations.get(index) {
            Some(n) => format!("{} {}", n.collection, n.hadith_number),
            None => "narration".to_string(),
        }
    }
}

impl Component for InsightOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, lines) = match self.overlay {
            Overlay::None => return,
            Overlay::Translating { context } => (
                format!(" AI Insight · {context} "),
                busy_lines("Seeking understanding...".to_string(), self.spinner_frame),
            ),
            Overlay::Insight { context, insight } => {
                (format!(" AI Insight · {context} "), insight_lines(insight))
            }
            Overlay::AnalyzingIsnad { narration } => (
                format!(" Isnad · {} ", self.narration_label(*narration)),
                busy_lines(
                    "Tracing the chain of narrators...".to_string(),
                    self.spinner_frame,
                ),
            ),
            Overlay::IsnadResult {
                narration,
                analysis,
            } => (
                format!(" Isnad · {} ", self.narration_label(*narration)),
                isnad_lines(analysis),
            ),
        };

        let popup = centered_rect(80, 80, area);
        frame.render_widget(Clear, popup);

        let alignment = if self.overlay.is_busy() {
            Alignment::Center
        } else {
            Alignment::Left
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(title)
            .title_bottom(Line::from(" ↑↓ Scroll  Esc Close ").centered())
            .padding(Padding::uniform(1));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(alignment)
                .wrap(Wrap { trim: true })
                .scroll((self.scroll, 0))
                .block(block),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::NarratorRecord;
    use crate::test_support::narration;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(overlay: &Overlay) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let narrations = vec![narration(0)];
        terminal
            .draw(|f| {
                InsightOverlay {
                    overlay,
                    narrations: &narrations,
                    scroll: 0,
                    spinner_frame: 0,
                }
                .render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_translating_shows_spinner() {
        let text = draw(&Overlay::Translating {
            context: "Verse 1 of Al-Faatiha".to_string(),
        });
        assert!(text.contains("Verse 1 of Al-Faatiha"));
        assert!(text.contains("Seeking understanding"));
    }

    #[test]
    fn test_insight_sections() {
        let text = draw(&Overlay::Insight {
            context: "Hadith from Bukhari".to_string(),
            insight: AiInsight {
                translation: "Deeds are by intentions".to_string(),
                explanation: "Sincerity matters".to_string(),
                key_themes: vec!["intention".to_string(), "sincerity".to_string()],
            },
        });
        assert!(text.contains("Deeds are by intentions"));
        assert!(text.contains("Explanation"));
        assert!(text.contains("intention · sincerity"));
    }

    #[test]
    fn test_isnad_result_lists_narrators() {
        let text = draw(&Overlay::IsnadResult {
            narration: 0,
            analysis: IsnadAnalysis {
                reliability: "Sahih".to_string(),
                narrators: vec![NarratorRecord {
                    name: "Sufyan ibn Uyaynah".to_string(),
                    reliability: "Thiqah".to_string(),
                    bio: "Meccan jurist".to_string(),
                }],
                scholarly_notes: "Connected throughout".to_string(),
            },
        });
        assert!(text.contains("Bukhari 1"));
        assert!(text.contains("Sufyan ibn Uyaynah"));
        assert!(text.contains("[Thiqah]"));
        assert!(text.contains("Connected throughout"));
    }

    #[test]
    fn test_analyzing_out_of_range_narration() {
        let text = draw(&Overlay::AnalyzingIsnad { narration: 7 });
        assert!(text.contains("Tracing the chain"));
    }
}
