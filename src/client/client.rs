//! Terminal client event loop.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::models::{Jurisdiction, Question, WrongAnswer};
use crate::terminal::TerminalSession;

use super::api::{ClientError, QuizApiClient};
use super::state::{ClientApp, ClientState};
use super::ui;

/// Shared client app state.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Run the quiz client against the API at `server_url`.
pub async fn run(server_url: String) -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(QuizApiClient::new(server_url.clone())?);
    let app = Arc::new(Mutex::new(ClientApp::new(server_url)));

    {
        let handle = spawn_connect(&app, &api);
        app.lock().await.set_pending(handle);
    }

    let mut terminal = TerminalSession::enter()?;

    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(&app, &api, key.code).await {
                    break;
                }
            }
        }
    }

    app.lock().await.cancel_pending();
    Ok(())
}

/// Handle keyboard input. Returns true when the client should exit.
async fn handle_input(app: &SharedApp, api: &Arc<QuizApiClient>, key: KeyCode) -> bool {
    let mut guard = app.lock().await;

    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        guard.should_quit = true;
        return true;
    }

    match &guard.state {
        ClientState::Connecting | ClientState::Loading => {
            if key == KeyCode::Esc {
                guard.should_quit = true;
                return true;
            }
        }
        ClientState::Setup { .. } => match key {
            KeyCode::Up | KeyCode::Char('k') => guard.next_count(),
            KeyCode::Down | KeyCode::Char('j') => guard.previous_count(),
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => guard.next_state_filter(),
            KeyCode::Enter => {
                if let Some((count, state)) = guard.setup_selection() {
                    guard.enter_loading();
                    let handle = spawn_quiz(app, api, count, state);
                    guard.set_pending(handle);
                }
            }
            KeyCode::Esc => {
                guard.should_quit = true;
                return true;
            }
            _ => {}
        },
        ClientState::Quiz { .. } => match key {
            KeyCode::Up | KeyCode::Char('k') => guard.select_previous_option(),
            KeyCode::Down | KeyCode::Char('j') => guard.select_next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Err(e) = guard.choose_selected() {
                    guard.show_error(e.to_string());
                }
            }
            KeyCode::Right | KeyCode::Char('n') => guard.next_question(),
            KeyCode::Left | KeyCode::Char('p') => guard.previous_question(),
            KeyCode::Char('a') => guard.toggle_show_answers(),
            KeyCode::Char('e') => {
                if let Some(question) = guard.request_explanation() {
                    let handle = spawn_explanation(app, api, question);
                    guard.set_pending(handle);
                }
            }
            KeyCode::Char('s') => guard.submit(),
            KeyCode::Esc => guard.restart(),
            _ => {}
        },
        ClientState::Results { .. } => match key {
            KeyCode::Down | KeyCode::Char('j') => guard.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => guard.scroll_up(),
            KeyCode::Char('g') => {
                if let Some((wrong, score, total)) = guard.request_study_guide() {
                    let handle = spawn_study_guide(app, api, wrong, score, total);
                    guard.set_pending(handle);
                }
            }
            KeyCode::Char('r') | KeyCode::Enter => guard.restart(),
            KeyCode::Esc => {
                guard.should_quit = true;
                return true;
            }
            _ => {}
        },
        ClientState::StudyGuide { .. } => match key {
            KeyCode::Down | KeyCode::Char('j') => guard.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => guard.scroll_up(),
            KeyCode::Esc | KeyCode::Char('b') => guard.back_to_results(),
            _ => {}
        },
        ClientState::Error { .. } => match key {
            KeyCode::Char('r') | KeyCode::Enter => {
                if guard.total_available.is_some() {
                    guard.restart();
                } else {
                    guard.reconnect();
                    let handle = spawn_connect(app, api);
                    guard.set_pending(handle);
                }
            }
            KeyCode::Esc => {
                guard.should_quit = true;
                return true;
            }
            _ => {}
        },
    }

    false
}

fn spawn_connect(app: &SharedApp, api: &Arc<QuizApiClient>) -> JoinHandle<()> {
    let (app, api) = (Arc::clone(app), Arc::clone(api));
    tokio::spawn(async move {
        let result = api.total_count().await;
        let mut app = app.lock().await;
        if !matches!(app.state, ClientState::Connecting) {
            return;
        }
        match result {
            Ok(total) => app.enter_setup(total),
            Err(e) => app.show_error(describe(&e)),
        }
    })
}

fn spawn_quiz(
    app: &SharedApp,
    api: &Arc<QuizApiClient>,
    count: usize,
    state: Option<Jurisdiction>,
) -> JoinHandle<()> {
    let (app, api) = (Arc::clone(app), Arc::clone(api));
    tokio::spawn(async move {
        let result = api.questions(count, state).await;
        let mut app = app.lock().await;
        match result {
            Ok(questions) => app.start_quiz(questions),
            Err(e) => {
                if matches!(app.state, ClientState::Loading) {
                    app.show_error(describe(&e));
                }
            }
        }
    })
}

fn spawn_explanation(
    app: &SharedApp,
    api: &Arc<QuizApiClient>,
    question: Question,
) -> JoinHandle<()> {
    let (app, api) = (Arc::clone(app), Arc::clone(api));
    tokio::spawn(async move {
        let result = api.explain(&question).await.map_err(|e| describe(&e));
        app.lock().await.set_explanation(&question.id, result);
    })
}

fn spawn_study_guide(
    app: &SharedApp,
    api: &Arc<QuizApiClient>,
    wrong: Vec<WrongAnswer>,
    score: u32,
    total: usize,
) -> JoinHandle<()> {
    let (app, api) = (Arc::clone(app), Arc::clone(api));
    tokio::spawn(async move {
        let result = api
            .study_guide(wrong, score, total)
            .await
            .map_err(|e| describe(&e));
        app.lock().await.set_study_guide(result);
    })
}

/// User-facing text for a failed request.
fn describe(err: &ClientError) -> String {
    match err {
        ClientError::Timeout(message) => message.clone(),
        ClientError::Server { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
