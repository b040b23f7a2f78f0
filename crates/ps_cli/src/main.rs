use clap::Parser;
use ps_core::{ArticleRanker, ArticleSource, ArticleStore, Result};
use ps_ranking::create_ranker;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Storage backend for saved articles. Available backends: fs (default), memory
    #[arg(long, default_value = "fs")]
    storage: String,
    /// Data directory for the fs backend
    #[arg(long, default_value = "saved_articles")]
    data_dir: String,
    /// Also download article PDFs on save
    #[arg(long)]
    download_pdfs: bool,
    /// Chat model used for ranking (reads the API key from OPENAI_API_KEY)
    #[arg(long)]
    model: Option<String>,
    /// Override the OpenAI-compatible API base URL
    #[arg(long)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP backend
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// One-shot search from the terminal
    Search {
        query: String,
        /// Free-text research profile to rank against
        #[arg(long, default_value = "")]
        profile: String,
        #[arg(long, default_value_t = 50)]
        max_results: usize,
        #[arg(long, default_value_t = 10)]
        display_results: usize,
    },
}

fn create_store(cli: &Cli) -> Result<Arc<dyn ArticleStore>> {
    match cli.storage.as_str() {
        "memory" => Ok(Arc::new(ps_storage::MemoryStore::new())),
        "fs" => Ok(Arc::new(
            ps_storage::FsStore::new(&cli.data_dir).with_pdf_download(cli.download_pdfs),
        )),
        other => Err(ps_core::Error::Storage(format!(
            "unknown storage backend: {}",
            other
        ))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = create_store(&cli)?;
    info!("🏦 Storage backend ready (using {})", store.name());

    let ranker = create_ranker(ps_ranking::Config {
        api_key: std::env::var("OPENAI_API_KEY").ok(),
        model_name: cli.model.clone(),
        base_url: cli.api_base_url.clone(),
    });
    info!("🧠 Ranking model ready (using {})", ranker.name());

    let source: Arc<dyn ArticleSource> = Arc::new(ps_arxiv::ArxivClient::new());

    match cli.command {
        Commands::Serve { host, port } => {
            let app = ps_web::create_app(ps_web::AppState {
                source,
                ranker,
                store,
            })
            .await;
            let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
            info!("🚀 Listening on {}", listener.local_addr()?);
            axum::serve(listener, app).await?;
        }
        Commands::Search {
            query,
            profile,
            max_results,
            display_results,
        } => {
            let candidates = source.search(&query, max_results).await?;
            info!("Found {} candidate articles", candidates.len());
            let response = ranker.rank(candidates, &profile, display_results).await?;

            for article in &response.articles {
                println!("[{:>5.1}] {}", article.score, article.article.title);
                println!("        {}", article.article.link);
                println!("        {}", article.reasoning);
            }
            if !response.llm_reasoning.is_empty() {
                println!("\n{}", response.llm_reasoning);
            }
        }
    }

    Ok(())
}
