use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use smartmarket::api::{ApiError, ApiService, DEFAULT_LIST_LIMIT, DEFAULT_REVIEW_LIMIT};
use smartmarket::config::{ClientConfig, DEFAULT_API_URL};
use smartmarket::session::{Session, SessionError};
use smartmarket::types::{AnalysisRequest, ProductRequest};
use smartmarket::views::summary::{
    render_analysis_receipt, render_analysis_report, render_products, render_reviews, render_search_results,
};
use smartmarket::views::{Confirm, DeleteOutcome, HistoryView};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("{0}")]
    DeleteFailed(String),
    #[error("could not render JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "smartmarket", about = "Product research client: search, analyze reviews, compare prices")]
struct Cli {
    #[arg(long, global = true, env = "API_URL", default_value = DEFAULT_API_URL)]
    base_url: String,

    #[arg(long, global = true, env = "SMARTMARKET_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Print raw JSON payloads instead of rendered views.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is up.
    Health,
    /// Search products by name across platforms.
    Search {
        product_name: String,
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },
    /// Start a sentiment analysis for a product URL.
    Analyze {
        product_url: String,
        #[arg(long)]
        platform: Option<String>,
    },
    Analysis(AnalysisCommand),
    Product(ProductCommand),
    /// List reviews stored for a product.
    Reviews {
        product_id: i64,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = DEFAULT_REVIEW_LIMIT)]
        limit: u32,
    },
    Token(TokenCommand),
}

#[derive(Args, Debug)]
struct AnalysisCommand {
    #[command(subcommand)]
    command: AnalysisSubcommand,
}

#[derive(Subcommand, Debug)]
enum AnalysisSubcommand {
    /// Latest analysis of a product.
    Get { product_id: i64 },
    /// Recent analyses, newest first.
    List {
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: u32,
        #[arg(long)]
        skip: Option<u32>,
    },
    /// Delete one analysis by its analysis id.
    Delete {
        analysis_id: i64,
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Delete the whole analysis history.
    Clear {
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductSubcommand {
    Get {
        product_id: i64,
    },
    List {
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: u32,
        #[arg(long)]
        skip: Option<u32>,
    },
    Create {
        url: String,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    Delete {
        product_id: i64,
    },
}

#[derive(Args, Debug)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
enum TokenSubcommand {
    /// Store a bearer token for later requests.
    Set { token: String },
    /// Forget the stored token.
    Clear,
    /// Report whether a token is stored.
    Status,
}

/// Asks on stderr, reads the answer from stdin. Anything but `y`/`yes` is
/// a no.
struct PromptConfirm {
    assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let token_file = cli.token_file.unwrap_or_else(|| ClientConfig::default().token_file);
    let config = ClientConfig::new(cli.base_url, token_file);
    let session = Session::from_file(&config.token_file);
    let api = ApiService::new(&config, session)?;
    tracing::debug!(base_url = api.base_url(), "client ready");
    let json = cli.json;

    match cli.command {
        Command::Health => {
            let health = api.health_check().await?;
            output(json, &health, || format!("backend {}: {}\n", api.base_url(), health.status))
        }
        Command::Search { product_name, platforms } => {
            let results = api.search_products(&product_name, &platforms).await?;
            output(json, &results, || render_search_results(&results))
        }
        Command::Analyze { product_url, platform } => {
            let receipt = api.analyze_product(&AnalysisRequest { product_url, platform }).await?;
            output(json, &receipt, || render_analysis_receipt(&receipt))
        }
        Command::Analysis(analysis) => run_analysis(&api, json, analysis.command).await,
        Command::Product(product) => run_product(&api, json, product.command).await,
        Command::Reviews { product_id, skip, limit } => {
            let reviews = api.get_reviews(product_id, skip, limit).await?;
            output(json, &reviews, || render_reviews(&reviews))
        }
        Command::Token(token) => run_token(api.session(), token.command),
    }
}

async fn run_analysis(api: &ApiService, json: bool, command: AnalysisSubcommand) -> Result<(), CliError> {
    match command {
        AnalysisSubcommand::Get { product_id } => {
            let analysis = api.get_analysis(product_id).await?;
            output(json, &analysis, || render_analysis_report(&analysis))
        }
        AnalysisSubcommand::List { limit, skip } => {
            let mut view = HistoryView::new(limit);
            view.analyses = match skip {
                Some(skip) => api.list_analyses_page(skip, limit).await?,
                None => api.list_analyses(limit).await?,
            };
            output(json, &view.analyses, || view.render())
        }
        AnalysisSubcommand::Delete { analysis_id, yes } => {
            let mut view = HistoryView::default();
            let outcome = view.delete_one(api, &mut PromptConfirm { assume_yes: yes }, analysis_id).await;
            finish_delete(&view, outcome)
        }
        AnalysisSubcommand::Clear { yes } => {
            let mut view = HistoryView::default();
            let outcome = view.delete_all(api, &mut PromptConfirm { assume_yes: yes }).await;
            finish_delete(&view, outcome)
        }
    }
}

fn finish_delete(view: &HistoryView, outcome: DeleteOutcome) -> Result<(), CliError> {
    match outcome {
        DeleteOutcome::Done => {
            print!("{}", view.render());
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            println!("Cancelled.");
            Ok(())
        }
        DeleteOutcome::InProgress => {
            println!("A delete is already in progress.");
            Ok(())
        }
        DeleteOutcome::Failed(e) => {
            tracing::debug!(error = %e, "delete failed");
            Err(CliError::DeleteFailed(view.alert.clone().unwrap_or_else(|| e.to_string())))
        }
    }
}

async fn run_product(api: &ApiService, json: bool, command: ProductSubcommand) -> Result<(), CliError> {
    match command {
        ProductSubcommand::Get { product_id } => {
            let product = api.get_product(product_id).await?;
            output(json, &product, || render_products(std::slice::from_ref(&product)))
        }
        ProductSubcommand::List { limit, skip } => {
            let products = match skip {
                Some(skip) => api.list_products_page(skip, limit).await?,
                None => api.list_products(limit).await?,
            };
            output(json, &products, || render_products(&products))
        }
        ProductSubcommand::Create { url, platform, name } => {
            let product = api.create_product(&ProductRequest { url, platform, name }).await?;
            output(json, &product, || render_products(std::slice::from_ref(&product)))
        }
        ProductSubcommand::Delete { product_id } => {
            let ack = api.delete_product(product_id).await?;
            output(json, &ack, || {
                format!("{}\n", ack.message.as_deref().unwrap_or("Product deleted"))
            })
        }
    }
}

fn run_token(session: &Session, command: TokenSubcommand) -> Result<(), CliError> {
    match command {
        TokenSubcommand::Set { token } => {
            session.set_token(token.trim())?;
            println!("Token stored.");
        }
        TokenSubcommand::Clear => {
            session.clear_token()?;
            println!("Token cleared.");
        }
        TokenSubcommand::Status => {
            if session.bearer_token().is_some() {
                println!("A bearer token is stored.");
            } else {
                println!("No bearer token stored.");
            }
        }
    }
    Ok(())
}

fn output<T, F>(json: bool, value: &T, render: F) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render());
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
