//! Client state management.

use std::mem;

use tokio::task::JoinHandle;

use crate::generation::{GuideLine, format_study_guide};
use crate::models::{Jurisdiction, Question, QuizSession, SessionError, WrongAnswer};
use crate::protocol::{QUESTION_COUNT_CHOICES, StudyGuideResponse};
use crate::scoring::{Score, score_session};

/// Default quiz size offered on the setup screen (index into the choices).
const DEFAULT_COUNT_INDEX: usize = 2;

/// State filters offered on the setup screen.
pub const STATE_CHOICES: [Option<Jurisdiction>; 3] = [
    None,
    Some(Jurisdiction::California),
    Some(Jurisdiction::Missouri),
];

/// AI explanation for the question on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    Loading,
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideStatus {
    Loading,
    Ready {
        lines: Vec<GuideLine>,
        questions_processed: usize,
        total_wrong_questions: usize,
    },
    Failed(String),
}

/// Current state of the client.
#[derive(Debug, Clone, Default)]
pub enum ClientState {
    /// Asking the server how many questions it has.
    #[default]
    Connecting,

    /// Choosing quiz size and state.
    Setup {
        count_index: usize,
        state_index: usize,
    },

    /// Waiting for the sampled quiz.
    Loading,

    /// Answering quiz questions.
    Quiz {
        session: QuizSession,
        current_index: usize,
        selected_option: usize,
        /// Reveal right/wrong as soon as an option is chosen.
        show_answers: bool,
        /// Explanation for `current_index`, if one was requested.
        explanation: Option<Explanation>,
        notice: Option<String>,
    },

    /// Viewing the score after submission.
    Results {
        session: QuizSession,
        score: Score,
        scroll: usize,
    },

    /// Viewing the generated study guide.
    StudyGuide {
        session: QuizSession,
        score: Score,
        status: GuideStatus,
        scroll: usize,
    },

    /// A request failed; the user can retry or quit.
    Error { message: String },
}

impl ClientState {
    pub fn setup() -> Self {
        Self::Setup {
            count_index: DEFAULT_COUNT_INDEX,
            state_index: 0,
        }
    }

    pub fn quiz(session: QuizSession) -> Self {
        Self::Quiz {
            session,
            current_index: 0,
            selected_option: 0,
            show_answers: false,
            explanation: None,
            notice: None,
        }
    }
}

/// Client application state.
pub struct ClientApp {
    pub state: ClientState,
    /// Base URL of the quiz API.
    pub server_url: String,
    /// Questions in the server's bank, once known.
    pub total_available: Option<usize>,
    pub should_quit: bool,
    /// In-flight request for the current screen.
    pending: Option<JoinHandle<()>>,
}

impl ClientApp {
    pub fn new(server_url: String) -> Self {
        Self {
            state: ClientState::default(),
            server_url,
            total_available: None,
            should_quit: false,
            pending: None,
        }
    }

    /// Track the request for the current screen, aborting any previous one.
    pub fn set_pending(&mut self, handle: JoinHandle<()>) {
        self.cancel_pending();
        self.pending = Some(handle);
    }

    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn reconnect(&mut self) {
        self.cancel_pending();
        self.state = ClientState::Connecting;
    }

    pub fn enter_setup(&mut self, total_available: usize) {
        self.total_available = Some(total_available);
        self.state = ClientState::setup();
    }

    pub fn show_error(&mut self, message: String) {
        self.state = ClientState::Error { message };
    }

    /// Back to the setup screen, dropping any quiz in progress.
    pub fn restart(&mut self) {
        self.cancel_pending();
        self.state = ClientState::setup();
    }

    // ==================
    // Setup
    // ==================

    pub fn next_count(&mut self) {
        if let ClientState::Setup { count_index, .. } = &mut self.state {
            *count_index = (*count_index + 1) % QUESTION_COUNT_CHOICES.len();
        }
    }

    pub fn previous_count(&mut self) {
        if let ClientState::Setup { count_index, .. } = &mut self.state {
            let len = QUESTION_COUNT_CHOICES.len();
            *count_index = (*count_index + len - 1) % len;
        }
    }

    pub fn next_state_filter(&mut self) {
        if let ClientState::Setup { state_index, .. } = &mut self.state {
            *state_index = (*state_index + 1) % STATE_CHOICES.len();
        }
    }

    /// Quiz size and state filter chosen on the setup screen.
    pub fn setup_selection(&self) -> Option<(usize, Option<Jurisdiction>)> {
        match &self.state {
            ClientState::Setup {
                count_index,
                state_index,
            } => Some((
                QUESTION_COUNT_CHOICES[*count_index],
                STATE_CHOICES[*state_index],
            )),
            _ => None,
        }
    }

    pub fn enter_loading(&mut self) {
        self.state = ClientState::Loading;
    }

    /// Start answering a freshly sampled quiz.
    pub fn start_quiz(&mut self, questions: Vec<Question>) {
        if !matches!(self.state, ClientState::Loading) {
            return;
        }
        if questions.is_empty() {
            self.show_error("The server returned no questions.".to_string());
            return;
        }
        self.state = ClientState::quiz(QuizSession::new(questions));
    }

    // ==================
    // Quiz
    // ==================

    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            ClientState::Quiz {
                session,
                current_index,
                ..
            } => session.questions().get(*current_index),
            _ => None,
        }
    }

    pub fn select_next_option(&mut self) {
        let options = self.current_question().map_or(0, |q| q.options.len());
        if let ClientState::Quiz {
            selected_option, ..
        } = &mut self.state
        {
            if options > 0 {
                *selected_option = (*selected_option + 1) % options;
            }
        }
    }

    pub fn select_previous_option(&mut self) {
        let options = self.current_question().map_or(0, |q| q.options.len());
        if let ClientState::Quiz {
            selected_option, ..
        } = &mut self.state
        {
            if options > 0 {
                *selected_option = (*selected_option + options - 1) % options;
            }
        }
    }

    /// Record the highlighted option as the answer to the current question.
    pub fn choose_selected(&mut self) -> Result<(), SessionError> {
        if let ClientState::Quiz {
            session,
            current_index,
            selected_option,
            notice,
            ..
        } = &mut self.state
        {
            let Some(question) = session.questions().get(*current_index) else {
                return Ok(());
            };
            let Some(option) = question.options.get(*selected_option) else {
                return Ok(());
            };
            let (id, option) = (question.id.clone(), option.clone());
            session.select_answer(&id, &option)?;
            *notice = None;
        }
        Ok(())
    }

    pub fn next_question(&mut self) {
        let total = self.question_total();
        self.move_to(|index| (index + 1).min(total.saturating_sub(1)));
    }

    pub fn previous_question(&mut self) {
        self.move_to(|index| index.saturating_sub(1));
    }

    fn question_total(&self) -> usize {
        match &self.state {
            ClientState::Quiz { session, .. } => session.total_questions(),
            _ => 0,
        }
    }

    fn move_to(&mut self, target: impl FnOnce(usize) -> usize) {
        let ClientState::Quiz {
            session,
            current_index,
            selected_option,
            explanation,
            notice,
            ..
        } = &mut self.state
        else {
            return;
        };

        let next = target(*current_index);
        if next == *current_index {
            return;
        }
        *current_index = next;
        *explanation = None;
        *notice = None;

        // Land on the recorded answer when revisiting a question.
        *selected_option = session
            .questions()
            .get(next)
            .and_then(|q| {
                let answer = session.answer_for(&q.id)?;
                q.options.iter().position(|o| o == answer)
            })
            .unwrap_or(0);

        self.cancel_pending();
    }

    pub fn toggle_show_answers(&mut self) {
        if let ClientState::Quiz { show_answers, .. } = &mut self.state {
            *show_answers = !*show_answers;
        }
    }

    /// Mark the current question's explanation as loading and return the
    /// question to explain. `None` while one is already loaded or loading.
    pub fn request_explanation(&mut self) -> Option<Question> {
        let question = self.current_question()?.clone();
        if let ClientState::Quiz { explanation, .. } = &mut self.state {
            if matches!(explanation, Some(Explanation::Loading | Explanation::Ready(_))) {
                return None;
            }
            *explanation = Some(Explanation::Loading);
            return Some(question);
        }
        None
    }

    /// Store an explanation if the user is still on `question_id`.
    pub fn set_explanation(&mut self, question_id: &str, result: Result<String, String>) {
        let on_question = self.current_question().is_some_and(|q| q.id == question_id);
        if let ClientState::Quiz { explanation, .. } = &mut self.state {
            if on_question && matches!(explanation, Some(Explanation::Loading)) {
                *explanation = Some(match result {
                    Ok(text) => Explanation::Ready(text),
                    Err(message) => Explanation::Failed(message),
                });
            }
        }
    }

    /// Submit the quiz. An incomplete quiz stays on screen with a notice.
    pub fn submit(&mut self) {
        let state = mem::take(&mut self.state);
        self.state = match state {
            ClientState::Quiz {
                mut session,
                current_index,
                selected_option,
                show_answers,
                explanation,
                ..
            } => match session.submit() {
                Ok(()) => {
                    self.cancel_pending();
                    let score = score_session(&session);
                    ClientState::Results {
                        session,
                        score,
                        scroll: 0,
                    }
                }
                Err(err) => ClientState::Quiz {
                    session,
                    current_index,
                    selected_option,
                    show_answers,
                    explanation,
                    notice: Some(format!("Cannot submit yet: {}", err)),
                },
            },
            other => other,
        };
    }

    // ==================
    // Results & study guide
    // ==================

    /// Switch to the study guide and return what to send for it.
    /// `None` when nothing was missed.
    pub fn request_study_guide(&mut self) -> Option<(Vec<WrongAnswer>, u32, usize)> {
        let ClientState::Results { session, score, .. } = &self.state else {
            return None;
        };
        let wrong = session.wrong_answers();
        if wrong.is_empty() {
            return None;
        }
        let request = (wrong, score.percent, score.total);

        let state = mem::take(&mut self.state);
        if let ClientState::Results { session, score, .. } = state {
            self.state = ClientState::StudyGuide {
                session,
                score,
                status: GuideStatus::Loading,
                scroll: 0,
            };
        }
        Some(request)
    }

    pub fn set_study_guide(&mut self, result: Result<StudyGuideResponse, String>) {
        if let ClientState::StudyGuide { status, .. } = &mut self.state {
            if *status != GuideStatus::Loading {
                return;
            }
            *status = match result {
                Ok(guide) => GuideStatus::Ready {
                    lines: format_study_guide(&guide.study_guide),
                    questions_processed: guide.questions_processed,
                    total_wrong_questions: guide.total_wrong_questions,
                },
                Err(message) => GuideStatus::Failed(message),
            };
        }
    }

    pub fn back_to_results(&mut self) {
        let state = mem::take(&mut self.state);
        self.state = match state {
            ClientState::StudyGuide { session, score, .. } => {
                self.cancel_pending();
                ClientState::Results {
                    session,
                    score,
                    scroll: 0,
                }
            }
            other => other,
        };
    }

    pub fn scroll_down(&mut self) {
        match &mut self.state {
            ClientState::Results { scroll, session, .. } => {
                let max_scroll = session.total_questions().saturating_sub(1);
                *scroll = (*scroll + 1).min(max_scroll);
            }
            ClientState::StudyGuide { scroll, status, .. } => {
                let max_scroll = match status {
                    GuideStatus::Ready { lines, .. } => lines.len().saturating_sub(1),
                    _ => 0,
                };
                *scroll = (*scroll + 1).min(max_scroll);
            }
            _ => {}
        }
    }

    pub fn scroll_up(&mut self) {
        match &mut self.state {
            ClientState::Results { scroll, .. } | ClientState::StudyGuide { scroll, .. } => {
                *scroll = scroll.saturating_sub(1);
            }
            _ => {}
        }
    }
}
