//! Quiz screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, ClientState, Explanation};
use crate::models::{Question, QuizSession};

/// Render the quiz screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Quiz {
        session,
        current_index,
        selected_option,
        show_answers,
        explanation,
        notice,
    } = &app.state
    else {
        return;
    };

    let Some(question) = session.questions().get(*current_index) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Progress
        Constraint::Length(6), // Question text
        Constraint::Length(question.options.len() as u16 + 2),
        Constraint::Min(5),    // Explanation
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], session, *current_index);
    render_question_text(frame, chunks[1], question);
    render_options(
        frame,
        chunks[2],
        question,
        session.answer_for(&question.id),
        *selected_option,
        *show_answers,
    );
    render_explanation(frame, chunks[3], explanation.as_ref());
    render_controls(frame, chunks[4], notice.as_deref(), *show_answers);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &QuizSession, current: usize) {
    let label = format!(
        "Question {} of {}  ·  {} answered",
        current + 1,
        session.total_questions(),
        session.answered_count()
    );

    let widget = Gauge::default()
        .block(Block::default().borders(Borders::BOTTOM).border_style(Color::DarkGray))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(session.progress_percent().min(100) as u16)
        .label(Span::styled(label, Style::default().fg(Color::White).bold()));

    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let title = format!(" {} · {} ", question.category, question.jurisdiction.code());

    let widget = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    chosen: Option<&str>,
    selected: usize,
    show_answers: bool,
) {
    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let is_selected = i == selected;
            let is_chosen = chosen == Some(opt.as_str());
            let prefix = if is_selected { "> " } else { "  " };
            let marker = if is_chosen { "● " } else { "  " };
            let label = option_label(i);

            let style = match (show_answers && chosen.is_some(), is_chosen) {
                (true, _) if question.is_correct(opt) => Style::default().fg(Color::Green).bold(),
                (true, true) => Style::default().fg(Color::Red).bold(),
                _ if is_selected => Style::default().fg(Color::Yellow).bold(),
                _ if is_chosen => Style::default().fg(Color::Cyan),
                _ => Style::default().fg(Color::White),
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(marker, style),
                Span::styled(format!("{}) ", label), style),
                Span::styled(opt.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_explanation(frame: &mut Frame, area: Rect, explanation: Option<&Explanation>) {
    let (text, color) = match explanation {
        None => ("Press [e] for an AI explanation of this question.".to_string(), Color::DarkGray),
        Some(Explanation::Loading) => ("Asking the tutor...".to_string(), Color::Yellow),
        Some(Explanation::Ready(text)) => (text.clone(), Color::White),
        Some(Explanation::Failed(message)) => {
            (format!("{}  [e] to retry", message), Color::Red)
        }
    };

    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Explanation ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, notice: Option<&str>, show_answers: bool) {
    let widget = match notice {
        Some(notice) => Paragraph::new(notice).fg(Color::Red),
        None => {
            let reveal = if show_answers { "hide" } else { "show" };
            Paragraph::new(format!(
                "j/k select  ·  Enter answer  ·  n/p move  ·  e explain  ·  a {} answers  ·  s submit  ·  q quit",
                reveal
            ))
            .fg(Color::DarkGray)
        }
    };

    frame.render_widget(widget.alignment(Alignment::Center), area);
}

fn option_label(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}
