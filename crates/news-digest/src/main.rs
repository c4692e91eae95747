use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use shared::{
    AllowAll, Authenticator, Config, Credentials, DigestError, DigestPipeline, Exporter,
    GroqGenerator, NewsApiClient, PipelineSettings, SessionContext, StaticCredentials,
    SummaryResult,
};
use std::io::{self as stdio, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SAMPLE_QUERIES: [&str; 4] = [
    "Indian Economy",
    "AI in Healthcare",
    "Stock Market Crash",
    "POK Issues",
];

const LOGIN_ATTEMPTS: usize = 3;
const PREVIEW_CHARS: usize = 200;

type Pipeline = DigestPipeline<NewsApiClient, GroqGenerator>;

#[derive(Parser)]
#[command(name = "news-digest")]
#[command(about = "Summarize recent news on any topic as factual bullet points")]
struct Args {
    /// Topic to summarize; starts an interactive session when omitted
    query: Option<String>,

    /// Directory for saved summaries (defaults to ~/Documents)
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Maximum number of source articles to cite
    #[arg(short, long)]
    citations: Option<usize>,

    /// Column width for the paginated document export
    #[arg(short, long)]
    wrap: Option<usize>,

    /// Save the summary after a one-shot query
    #[arg(short, long)]
    save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(stdio::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let mut settings = PipelineSettings::default();
    if let Some(citations) = args.citations {
        settings.citation_cap = citations;
    }
    if let Some(wrap) = args.wrap {
        settings.wrap_width = wrap;
    }

    let export_dir = args
        .export_dir
        .or_else(dirs::document_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut session = SessionContext::new(settings.history_cap);
    let authenticator: Box<dyn Authenticator> = match &config.login {
        Some((username, password)) => Box::new(StaticCredentials::new(username, password)),
        None => Box::new(AllowAll),
    };
    session.authenticated = if config.login.is_some() {
        login(authenticator.as_ref())?
    } else {
        authenticator.authenticate(&Credentials::new("", ""))
    };
    if !session.authenticated {
        anyhow::bail!("Login failed after {} attempts.", LOGIN_ATTEMPTS);
    }

    let pipeline =
        DigestPipeline::from_config(&config, settings).context("Failed to set up pipeline")?;
    let exporter = Exporter::new(pipeline.settings());

    if let Some(query) = args.query {
        if let Some(result) = summarize(&pipeline, &mut session, &query, true).await? {
            if args.save {
                save_exports(&exporter, &result, &export_dir)?;
            }
        }
        return Ok(());
    }

    interactive(&pipeline, &exporter, &mut session, &export_dir).await
}

fn login(authenticator: &dyn Authenticator) -> Result<bool> {
    println!("🔐 Login Required");

    for _ in 0..LOGIN_ATTEMPTS {
        let Some(username) = prompt_line("Username: ")? else {
            return Ok(false);
        };
        let Some(password) = prompt_line("Password: ")? else {
            return Ok(false);
        };

        if authenticator.authenticate(&Credentials::new(username, password)) {
            println!("✓ Logged in\n");
            return Ok(true);
        }
        println!("✗ Incorrect credentials.");
    }

    Ok(false)
}

/// Read one trimmed line, or `None` once stdin is closed.
fn prompt_line(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    stdio::stdout().flush()?;

    let mut input = String::new();
    if stdio::stdin().read_line(&mut input)? == 0 {
        println!();
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

async fn interactive(
    pipeline: &Pipeline,
    exporter: &Exporter,
    session: &mut SessionContext,
    export_dir: &Path,
) -> Result<()> {
    println!("Try one of the sample queries:");
    for (i, example) in SAMPLE_QUERIES.iter().enumerate() {
        println!("  {}) {}", i + 1, example);
    }
    println!("\nCommands: :history  :save  :reset  :quit\n");

    let mut last_result: Option<SummaryResult> = None;

    loop {
        let Some(input) = prompt_line("🔍 Query: ")? else {
            break;
        };

        match input.as_str() {
            ":quit" | ":q" => break,
            ":history" => print_history(session),
            ":reset" => {
                session.reset();
                last_result = None;
                println!("✓ Cleared query and history\n");
            }
            ":save" => match &last_result {
                Some(result) => save_exports(exporter, result, export_dir)?,
                None => println!("⚠ Nothing to save yet.\n"),
            },
            _ => {
                // Number shortcuts pick a sample query
                let query = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| SAMPLE_QUERIES.get(i))
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| input.clone());

                if let Some(result) = summarize(pipeline, session, &query, false).await? {
                    last_result = Some(result);
                    print_history(session);
                }
            }
        }
    }

    Ok(())
}

/// Run one query. In the interactive loop user-level failures are reported
/// and yield `None`; a one-shot run returns them so the process exits non-zero.
async fn summarize(
    pipeline: &Pipeline,
    session: &mut SessionContext,
    query: &str,
    one_shot: bool,
) -> Result<Option<SummaryResult>> {
    if !query.trim().is_empty() {
        println!("\n📰 Fetching and summarizing news for \"{}\"...", query.trim());
    }

    match pipeline.run(session, query).await {
        Ok(result) if result.is_sentinel() => {
            println!("⚠ {}\n", result.formatted(pipeline.settings().delimiter));
            Ok(None)
        }
        Ok(result) => {
            print_summary(&result, pipeline.settings().delimiter);
            Ok(Some(result))
        }
        Err(e) => report_failure(e, one_shot).map(|()| None),
    }
}

fn report_failure(err: DigestError, one_shot: bool) -> Result<()> {
    if one_shot {
        return Err(err.into());
    }

    match err {
        DigestError::EmptyQuery => println!("⚠ Please enter a query first.\n"),
        DigestError::FetchFailure { .. } | DigestError::GenerationFailure { .. } => {
            println!("✗ {}\n", err)
        }
        other => return Err(other.into()),
    }
    Ok(())
}

fn print_summary(result: &SummaryResult, delimiter: char) {
    println!("\n🧠 AI-Generated News Summary:\n");
    for line in result.bullet_lines(delimiter) {
        println!("{}", line);
    }

    if !result.sources.is_empty() {
        println!("\nSources:");
        for (i, article) in result.sources.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, article.title, article.source_name);
            println!("     {}", article.url);
        }
    }
    println!();
}

fn print_history(session: &SessionContext) {
    let entries = session.history.recent(session.history.capacity());
    if entries.is_empty() {
        println!("No past queries yet.\n");
        return;
    }

    println!("📚 Past Queries");
    for (idx, entry) in entries.iter().enumerate() {
        println!("  {}. {}", idx + 1, entry.query);
        println!("     > {}", entry.preview(PREVIEW_CHARS).replace('\n', " "));
    }
    println!();
}

fn save_exports(exporter: &Exporter, result: &SummaryResult, dir: &Path) -> Result<()> {
    let now = Local::now();
    let text = exporter.to_plain_text(result);

    let text_path = Exporter::save_plain_text(&text, dir, now)?;
    println!("✓ Text saved to: {}", text_path.display());

    let document = exporter.to_document(&text);
    let doc_path = Exporter::save_document(&document, dir, now)?;
    println!(
        "✓ Document saved to: {} ({} pages)",
        doc_path.display(),
        document.pages.len()
    );
    if document.substitutions > 0 {
        println!(
            "  Note: {} characters were replaced for the document encoding",
            document.substitutions
        );
    }
    println!();

    Ok(())
}
