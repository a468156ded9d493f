//! Study guide screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, ClientState, GuideStatus};
use crate::generation::GuideLine;

use super::results::grade_color;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::StudyGuide {
        score,
        status,
        scroll,
        ..
    } = &app.state
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(6),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let summary = Paragraph::new(Line::from(vec![
        Span::styled("STUDY GUIDE  ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("{}% · {}", score.percent, score.grade().label()),
            Style::default().fg(grade_color(score.grade())),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(summary, chunks[0]);

    let (lines, title) = match status {
        GuideStatus::Loading => (
            vec![Line::from(
                "Writing your study guide. This can take up to a minute...".fg(Color::Yellow),
            )],
            " Study Guide ".to_string(),
        ),
        GuideStatus::Failed(message) => (
            vec![Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            ))],
            " Study Guide ".to_string(),
        ),
        GuideStatus::Ready {
            lines,
            questions_processed,
            total_wrong_questions,
        } => {
            let title = if questions_processed < total_wrong_questions {
                format!(
                    " Study Guide (covers {} of {} missed questions) ",
                    questions_processed, total_wrong_questions
                )
            } else {
                " Study Guide ".to_string()
            };
            (lines.iter().map(styled_line).collect(), title)
        }
    };

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((*scroll as u16, 0));
    frame.render_widget(widget, chunks[1]);

    let controls = Paragraph::new("j/k scroll  ·  b back to results  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[2]);
}

fn styled_line(line: &GuideLine) -> Line<'_> {
    match line {
        GuideLine::Heading(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        GuideLine::Emphasis(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        GuideLine::Numbered(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::White),
        )),
        GuideLine::Bullet(text) => Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Green)),
            Span::styled(text.as_str(), Style::default().fg(Color::Gray)),
        ]),
        GuideLine::Paragraph(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Gray),
        )),
        GuideLine::Blank => Line::from(""),
    }
}
