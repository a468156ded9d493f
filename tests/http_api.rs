//! End-to-end checks of the quiz API router with a stubbed text generator.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use insurance_quiz::generation::{Tutor, TutorTimeouts};
use insurance_quiz::server::{AppState, HttpServer, ServerConfig};
use insurance_quiz::{GenerationError, Jurisdiction, Question, QuestionStore, TextGenerator};

struct StubGenerator {
    reply: Result<String, GenerationError>,
    delay: Duration,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: Err(GenerationError::Failed("upstream returned 401".to_string())),
            ..Self::replying("")
        }
    }

    fn slow() -> Self {
        Self {
            delay: Duration::from_secs(5),
            ..Self::replying("too late")
        }
    }

    fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _system_prompt: &str,
        _max_tokens: u32,
    ) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

fn question(id: usize, jurisdiction: Jurisdiction, category: &str) -> Question {
    Question {
        id: format!("q{}", id),
        text: format!("Question {} about {}", id, category),
        options: vec![
            "Alpha".to_string(),
            "Bravo".to_string(),
            "Charlie".to_string(),
            "Delta".to_string(),
        ],
        correct_answer: "Charlie".to_string(),
        jurisdiction,
        category: category.to_string(),
    }
}

/// 20 general questions over four categories plus 10 each for CA and MO.
fn store() -> QuestionStore {
    let categories = ["Life", "Health", "Annuities", "Provisions"];
    let mut questions = Vec::new();
    for i in 0..20 {
        questions.push(question(i, Jurisdiction::General, categories[i % 4]));
    }
    for i in 20..30 {
        questions.push(question(i, Jurisdiction::California, categories[i % 2]));
    }
    for i in 30..40 {
        questions.push(question(i, Jurisdiction::Missouri, categories[i % 2]));
    }
    QuestionStore::new(questions).unwrap()
}

fn app_with(generator: Arc<StubGenerator>) -> Router {
    let timeouts = TutorTimeouts {
        explanation: Duration::from_millis(100),
        study_guide: Duration::from_millis(100),
    };
    let state = AppState::new(store(), Tutor::new(generator, timeouts));
    HttpServer::new(ServerConfig::default(), state).router()
}

fn app() -> Router {
    app_with(Arc::new(StubGenerator::replying("Because the policy says so.")))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn wrong_answers(n: usize) -> Value {
    let wrong: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "question": {
                    "id": format!("w{}", i),
                    "text": format!("Missed question {}", i),
                    "options": ["Alpha", "Bravo"],
                    "correctAnswer": "Alpha",
                    "state": "Gen",
                    "category": "Life"
                },
                "userAnswer": "Bravo"
            })
        })
        .collect();
    Value::Array(wrong)
}

#[tokio::test]
async fn test_questions_default_count() {
    let (status, body) = get(app(), "/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_questions_wire_format() {
    let (status, body) = get(app(), "/questions?count=5").await;
    assert_eq!(status, StatusCode::OK);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    for q in questions {
        let options: Vec<&str> = q["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_str().unwrap())
            .collect();
        assert!(options.contains(&q["correctAnswer"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn test_questions_state_quota() {
    let (status, body) = get(app(), "/questions?count=20&state=CA").await;
    assert_eq!(status, StatusCode::OK);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 20);
    let ca = questions.iter().filter(|q| q["state"] == "CA").count();
    let general = questions.iter().filter(|q| q["state"] == "Gen").count();
    assert_eq!(ca, 6);
    assert_eq!(general, 14);
    assert!(questions.iter().all(|q| q["state"] != "MO"));
}

#[tokio::test]
async fn test_questions_capped_by_pool() {
    let (status, body) = get(app(), "/questions?count=150").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 40);
}

#[tokio::test]
async fn test_questions_huge_count() {
    let (status, body) = get(app(), "/questions?count=1000000000000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 40);

    let (status, body) = get(app(), "/questions?count=9223372036854775807&state=MO").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 40);
}

#[tokio::test]
async fn test_questions_non_positive_count() {
    let (status, body) = get(app(), "/questions?count=-4").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_questions_bad_parameters() {
    let (status, body) = get(app(), "/questions?state=TX").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = get(app(), "/questions?count=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_total_count() {
    let (status, body) = get(app(), "/questions?totalCount=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "totalCount": 40 }));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "questions": 40 }));
}

#[tokio::test]
async fn test_explain() {
    let generator = Arc::new(StubGenerator::replying("Because the policy says so."));
    let request = json!({
        "question": "What is a rider?",
        "options": ["An amendment", "A beneficiary"],
        "correctAnswer": "An amendment"
    });

    let (status, body) = post(app_with(generator.clone()), "/explain", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["explanation"], "Because the policy says so.");
    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("What is a rider?"));
    assert!(prompt.contains("Correct Answer: An amendment"));
}

#[tokio::test]
async fn test_explain_rejects_empty_input() {
    let request = json!({ "question": "", "options": [], "correctAnswer": "" });
    let (status, body) = post(app(), "/explain", request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_explain_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/explain")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_explain_timeout() {
    let request = json!({
        "question": "What is a rider?",
        "options": ["An amendment", "A beneficiary"],
        "correctAnswer": "An amendment"
    });
    let (status, body) = post(app_with(Arc::new(StubGenerator::slow())), "/explain", request).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        body["error"],
        "The explanation is taking longer than expected. Please try again."
    );
}

#[tokio::test]
async fn test_explain_failure() {
    let request = json!({
        "question": "What is a rider?",
        "options": ["An amendment", "A beneficiary"],
        "correctAnswer": "An amendment"
    });
    let (status, body) =
        post(app_with(Arc::new(StubGenerator::failing())), "/explain", request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate explanation");
}

#[tokio::test]
async fn test_study_guide_truncates() {
    let generator = Arc::new(StubGenerator::replying("## Key Learning Areas"));
    let request = json!({
        "wrongQuestions": wrong_answers(20),
        "score": 20,
        "totalQuestions": 25
    });

    let (status, body) = post(app_with(generator.clone()), "/study-guide", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["studyGuide"], "## Key Learning Areas");
    assert_eq!(body["questionsProcessed"], 15);
    assert_eq!(body["totalWrongQuestions"], 20);

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("scored 20% (5/25 correct)"));
    assert!(prompt.contains("(showing 15 of 20)"));
    assert!(prompt.contains("Missed question 14"));
    assert!(!prompt.contains("Missed question 15"));
}

#[tokio::test]
async fn test_study_guide_rejects_empty_input() {
    let request = json!({ "wrongQuestions": [], "score": 100, "totalQuestions": 10 });
    let (status, body) = post(app(), "/study-guide", request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No wrong questions provided");
}

#[tokio::test]
async fn test_study_guide_timeout_and_failure() {
    let request = json!({
        "wrongQuestions": wrong_answers(2),
        "score": 50,
        "totalQuestions": 4
    });

    let (status, body) = post(
        app_with(Arc::new(StubGenerator::slow())),
        "/study-guide",
        request.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert!(body["error"].as_str().unwrap().contains("fewer questions"));

    let (status, body) = post(
        app_with(Arc::new(StubGenerator::failing())),
        "/study-guide",
        request,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Failed to generate study guide. Please try again later."
    );
}
