//! Quiz setup screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::client::state::{ClientApp, ClientState, STATE_CHOICES};
use crate::protocol::QUESTION_COUNT_CHOICES;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Setup {
        count_index,
        state_index,
    } = &app.state
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(15),
        Constraint::Fill(1),
    ])
    .split(area);

    let count = QUESTION_COUNT_CHOICES[*count_index];
    let state = match STATE_CHOICES[*state_index] {
        Some(state) => format!("{} + general", state.code()),
        None => "General only".to_string(),
    };
    let available = app
        .total_available
        .map(|n| format!("{} questions in the bank", n))
        .unwrap_or_default();

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "INSURANCE EXAM PRACTICE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(available, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Questions  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("< {:>3} >", count),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("State      ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("< {} >", state),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
        Line::from(""),
    ];

    if app.total_available.is_some_and(|n| count > n) {
        content.push(Line::from(
            "Fewer questions available; the quiz will be shorter.".fg(Color::DarkGray),
        ));
    } else {
        content.push(Line::from(""));
    }

    content.extend([
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
        Line::from(""),
        Line::from("j/k size  ·  h/l state  ·  q quit".fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
