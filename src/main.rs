//! Gossip command-line tool
//!
//! Thin persistence shell over the library: creates record files, derives
//! resume prompts, inspects stats and extracts attachments. Fatal errors
//! surface through `anyhow` as a non-zero exit with the specific error kind
//! in the message; validation warnings are printed but never block.

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use gossip::store::{self, OutputFormat};
use gossip::{validate, GossipConfig, PromptTarget, Record, SourceAi};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gossip")]
#[command(version)]
#[command(about = "Portable conversation-context records for AI system interop")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GOSSIP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new record file
    Create {
        /// Conversation topic
        #[arg(long)]
        topic: String,

        /// Conversation summary
        #[arg(long)]
        summary: String,

        /// Source AI system (claude, chatgpt, gemini, grok, ...)
        #[arg(long, default_value = "other")]
        source_ai: String,

        /// Key points (comma-separated)
        #[arg(long)]
        keypoints: Option<String>,

        /// Open questions (comma-separated)
        #[arg(long)]
        questions: Option<String>,

        /// Next instruction for the resuming system
        #[arg(long)]
        continuation: Option<String>,

        /// Opaque user identifier to stamp into metadata
        #[arg(long)]
        user_id: Option<String>,

        /// Files to attach
        #[arg(long, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "json", value_parser = ["json", "txt"])]
        format: String,
    },

    /// Generate a resume prompt from a record file
    Resume {
        /// Record file path
        file: PathBuf,

        /// Target AI system (universal, claude, chatgpt, gemini, grok)
        #[arg(long, default_value = "universal")]
        target: String,

        /// Write the prompt to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show record statistics
    Info {
        /// Record file path
        file: PathBuf,
    },

    /// Extract an attached file from a record
    Extract {
        /// Record file path
        file: PathBuf,

        /// Name of the attachment to extract
        name: String,

        /// Output path (defaults to the attachment name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gossip={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = GossipConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Create {
            topic,
            summary,
            source_ai,
            keypoints,
            questions,
            continuation,
            user_id,
            files,
            output,
            format,
        } => create(
            &config,
            CreateArgs {
                topic,
                summary,
                source_ai,
                keypoints,
                questions,
                continuation,
                user_id,
                files,
                output,
                format,
            },
        ),
        Commands::Resume {
            file,
            target,
            output,
        } => resume(&file, &target, output.as_deref()),
        Commands::Info { file } => info(&file),
        Commands::Extract { file, name, output } => extract(&file, &name, output.as_deref()),
    }
}

struct CreateArgs {
    topic: String,
    summary: String,
    source_ai: String,
    keypoints: Option<String>,
    questions: Option<String>,
    continuation: Option<String>,
    user_id: Option<String>,
    files: Vec<PathBuf>,
    output: PathBuf,
    format: String,
}

fn create(config: &GossipConfig, args: CreateArgs) -> Result<()> {
    let source: SourceAi = args.source_ai.parse().unwrap_or_default();

    let mut builder = Record::builder(args.topic, args.summary)
        .source_ai(source)
        .key_points(split_list(args.keypoints.as_deref()))
        .open_questions(split_list(args.questions.as_deref()))
        .created_by(config.created_by.clone());
    if let Some(continuation) = args.continuation {
        builder = builder.continuation(continuation);
    }
    if let Some(user_id) = args.user_id {
        builder = builder.user_id(user_id);
    }
    let mut record = builder.build();

    for path in &args.files {
        match store::attach_file(&mut record, path) {
            Ok(att) => println!("Attached: {} ({})", att.name, att.size_display()),
            Err(e) => eprintln!("Warning: could not attach {}: {}", path.display(), e),
        }
    }

    let issues = validate::validate(&record, config);
    for issue in issues.iter().filter(|i| !i.is_fatal()) {
        eprintln!("Warning: {}", issue);
    }
    if validate::has_fatal(&issues) {
        let fatals: Vec<String> = issues
            .iter()
            .filter(|i| i.is_fatal())
            .map(|i| i.to_string())
            .collect();
        bail!("record is not valid: {}", fatals.join("; "));
    }

    let format = match args.format.as_str() {
        "txt" => OutputFormat::Txt,
        _ => OutputFormat::Json,
    };
    let path = store::save(&record, &args.output, format, config)?;

    println!("Saved: {} [{}]", path.display(), record.id);
    Ok(())
}

fn resume(file: &std::path::Path, target: &str, output: Option<&std::path::Path>) -> Result<()> {
    let record = store::load(file).with_context(|| format!("loading {}", file.display()))?;

    let target: PromptTarget = target.parse().unwrap_or_default();
    let prompt = gossip::generate_prompt(&record, target);

    match output {
        Some(path) => {
            std::fs::write(path, &prompt)?;
            println!("Resume prompt saved to: {}", path.display());
        }
        None => println!("{}", prompt),
    }
    Ok(())
}

fn info(file: &std::path::Path) -> Result<()> {
    let record = store::load(file).with_context(|| format!("loading {}", file.display()))?;
    let stats = record.stats()?;

    let rows: Vec<(&str, String)> = vec![
        ("Gossip Id", stats.id),
        ("Topic", stats.topic),
        ("Created", stats.created.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ("Source Ai", stats.source_ai.to_string()),
        ("Key Points", stats.key_points.to_string()),
        ("Open Questions", stats.open_questions.to_string()),
        ("Files", stats.files.to_string()),
        ("Attachment Size", format!("{:.1} KB", stats.attachment_bytes as f64 / 1024.0)),
        ("Json Size", format!("{:.1} KB", stats.json_bytes as f64 / 1024.0)),
        ("Rendered Size", format!("{:.1} KB", stats.rendered_bytes as f64 / 1024.0)),
    ];

    println!("{}", "=".repeat(60));
    for (key, value) in rows {
        println!("{:.<40} {}", key, value);
    }
    println!("{}", "=".repeat(60));
    Ok(())
}

fn extract(file: &std::path::Path, name: &str, output: Option<&std::path::Path>) -> Result<()> {
    let record = store::load(file).with_context(|| format!("loading {}", file.display()))?;
    let path = store::extract_file(&record, name, output)?;
    println!("Extracted: {}", path.display());
    Ok(())
}

fn split_list(input: Option<&str>) -> Vec<String> {
    input
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
