use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use insurance_quiz::generation::{
    DEFAULT_API_BASE, DEFAULT_MODEL, DisabledGenerator, OpenAiGenerator, Tutor,
};
use insurance_quiz::server::{AppState, HttpServer, ServerConfig};
use insurance_quiz::{DEFAULT_QUESTIONS_PATH, QuestionStore, QuizError, TextGenerator};

#[derive(Parser, Debug)]
#[command(version, about = "Insurance exam practice quizzes", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the quiz HTTP API
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "QUIZ_PORT", default_value_t = insurance_quiz::protocol::DEFAULT_PORT)]
        port: u16,

        /// JSON file to load the questions from
        #[arg(short, long, env = "QUIZ_QUESTIONS", default_value = DEFAULT_QUESTIONS_PATH)]
        questions: PathBuf,

        /// API key for the text-generation service
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Chat model used for explanations and study guides
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Base URL of the chat-completions API
        #[arg(long, default_value = DEFAULT_API_BASE)]
        api_base: String,

        #[arg(long, default_value_t = 25)]
        explain_timeout_secs: u64,

        #[arg(long, default_value_t = 45)]
        study_guide_timeout_secs: u64,

        /// Allowed CORS origin (repeatable; none allows any)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },

    /// Take a quiz in the terminal against a running server
    Play {
        /// Base URL of the quiz API
        #[arg(short, long, default_value = "http://127.0.0.1:8712")]
        server: String,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Serve {
            host,
            port,
            questions,
            api_key,
            model,
            api_base,
            explain_timeout_secs,
            study_guide_timeout_secs,
            cors_origins,
        } => {
            let config = ServerConfig {
                host,
                port,
                questions_path: questions,
                cors_origins,
                explain_timeout_secs,
                study_guide_timeout_secs,
            };
            serve(config, api_key, &api_base, &model)
                .await
                .map_err(|e| e.to_string())
        }
        Command::Play { server } => insurance_quiz::client::run(server)
            .await
            .map_err(|e| e.to_string()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(
    config: ServerConfig,
    api_key: Option<String>,
    api_base: &str,
    model: &str,
) -> Result<(), QuizError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = QuestionStore::from_json(&config.questions_path)?;
    tracing::info!(
        path = %config.questions_path.display(),
        questions = store.len(),
        "loaded question bank"
    );

    let generator: Arc<dyn TextGenerator> = match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => {
            let generator = OpenAiGenerator::new(key, api_base, model)?;
            tracing::info!(model = generator.model(), "text generation enabled");
            Arc::new(generator)
        }
        None => {
            tracing::warn!("no API key configured; explanations and study guides will fail");
            Arc::new(DisabledGenerator)
        }
    };

    let tutor = Tutor::new(generator, config.tutor_timeouts());
    HttpServer::new(config, AppState::new(store, tutor))
        .start()
        .await?;

    Ok(())
}
