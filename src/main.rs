//! docfix - apply spelling corrections to .docx files

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use docfix::{
    Config, Corrector, DictionaryResolver, LanguageToolResolver, Resolver, flagged_words_in_package,
    output_file_name,
};

#[derive(Parser)]
#[command(name = "docfix")]
#[command(version, about = "Apply spelling corrections to .docx files", long_about = None)]
#[command(after_help = "EXAMPLES:
    docfix letter.docx fixed.docx           Correct using LanguageTool
    docfix letter.docx --out-dir public/    Write <uuid>.letter.docx into public/
    docfix -i letter.docx                   List flagged words
    docfix letter.docx -d typos.tsv         Correct offline from a word list")]
struct Cli {
    /// Input .docx file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (default: <uuid>.<input name> in --out-dir)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Directory for generated output names
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// List flagged words without correcting
    #[arg(short, long)]
    info: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", default_value = "docfix.toml")]
    config: PathBuf,

    /// Language tag for lookups (overrides the config file)
    #[arg(short, long)]
    language: Option<String>,

    /// LanguageTool server URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Resolve from a word<TAB>replacement file instead of LanguageTool
    #[arg(short, long, value_name = "TSV")]
    dictionary: Option<PathBuf>,

    /// More log output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, "correction failed");
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> docfix::Result<()> {
    let mut config = Config::load(&cli.config)?;
    if let Some(ref language) = cli.language {
        config.resolver.language = language.clone();
    }
    if let Some(ref endpoint) = cli.endpoint {
        config.resolver.endpoint = endpoint.clone();
    }

    let input = read_input(&cli.input)?;

    if cli.info {
        return show_info(&cli.input, &input, &config);
    }

    let resolver: Box<dyn Resolver> = match cli.dictionary {
        Some(ref path) => Box::new(DictionaryResolver::load(path)?),
        None => Box::new(LanguageToolResolver::new(&config.resolver)?),
    };
    let corrector =
        Corrector::new(resolver).with_max_document_bytes(config.limits.max_document_bytes);

    let corrected = corrector.correct_package(&input).await?;

    let output = match cli.output {
        Some(ref path) => path.clone(),
        None => cli.out_dir.join(output_file_name(&cli.input)),
    };
    std::fs::write(&output, &corrected.bytes)?;

    if !cli.quiet {
        for c in &corrected.corrections {
            if c.replacement.is_empty() {
                println!("  {} (no suggestion)", c.word);
            } else {
                println!("  {} -> {}", c.word, c.replacement);
            }
        }
        println!(
            "Corrected {} of {} flagged words: {}",
            corrected.summary.words_replaced,
            corrected.corrections.len(),
            output.display()
        );
    }

    Ok(())
}

fn read_input(path: &Path) -> docfix::Result<Vec<u8>> {
    if path.file_name().is_none() {
        return Err(docfix::Error::MissingDocument);
    }
    Ok(std::fs::read(path)?)
}

fn show_info(path: &Path, input: &[u8], config: &Config) -> docfix::Result<()> {
    let words = flagged_words_in_package(input, config.limits.max_document_bytes)?;

    println!("File: {}", path.display());
    println!("Flagged words: {}", words.len());
    for word in &words {
        println!("  {word}");
    }

    Ok(())
}
