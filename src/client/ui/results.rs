//! Results screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::client::state::{ClientApp, ClientState};
use crate::models::QuizSession;
use crate::scoring::{CategoryScore, Grade, Score};

const QUESTION_PREVIEW_LENGTH: usize = 60;

/// Render the results screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Results {
        session,
        score,
        scroll,
    } = &app.state
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(6), // Score summary
        Constraint::Length(score.categories.len() as u16 + 2),
        Constraint::Min(6), // Answers breakdown
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], session, score);
    render_categories(frame, chunks[1], &score.categories);
    render_answers(frame, chunks[2], session, *scroll);
    render_controls(frame, chunks[3], score.wrong() > 0);
}

pub(super) fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Excellent => Color::Green,
        Grade::VeryGood => Color::LightGreen,
        Grade::Good => Color::Cyan,
        Grade::Satisfactory => Color::Yellow,
        Grade::NeedsImprovement => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, session: &QuizSession, score: &Score) {
    let grade = score.grade();

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("RESULTS", Style::default().fg(Color::Cyan).bold()),
            Span::styled(
                format!("  #{}", session.short_id()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)  ·  {}",
                score.correct,
                score.total,
                score.percent,
                grade.label()
            ),
            Style::default().fg(grade_color(grade)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, area);
}

fn render_categories(frame: &mut Frame, area: Rect, categories: &[CategoryScore]) {
    let lines: Vec<Line> = categories
        .iter()
        .map(|c| {
            let color = grade_color(Grade::from_percent(c.percent));
            Line::from(vec![
                Span::styled(format!("{:<28}", c.category), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:>3}/{:<3}", c.correct, c.total),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:>4}%", c.percent), Style::default().fg(color).bold()),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" By Category ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_answers(frame: &mut Frame, area: Rect, session: &QuizSession, scroll: usize) {
    let lines: Vec<Line> = session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let (symbol, color) = if session.is_correct(question) {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            let mut spans = vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:3}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate_question(&question.text), Style::default().fg(Color::Gray)),
            ];
            if !session.is_correct(question) {
                spans.push(Span::styled(
                    format!("  → {}", question.correct_answer),
                    Style::default().fg(Color::Green),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Your Answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, has_misses: bool) {
    let text = if has_misses {
        "j/k scroll  ·  g study guide  ·  r new quiz  ·  q quit"
    } else {
        "j/k scroll  ·  r new quiz  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(80);
        let preview = truncate_question(&long);
        assert_eq!(preview.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(preview.ends_with("..."));
    }
}
