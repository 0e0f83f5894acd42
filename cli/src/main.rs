//! specdoc CLI - API and database documentation generator

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use crossbeam_channel::unbounded;
use indicatif::{ProgressBar, ProgressStyle};

use specdoc::{
    CancelToken, DatabaseCapability, GenerateOptions, GenerateReport, Generator, JsonFormat,
    JsonMetadataSource, Labels, Language, Progress, SpecSource, Specdoc,
};

#[derive(Parser)]
#[command(name = "specdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Generate Word/Excel documentation from Swagger and database metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a .docx API document from a Swagger 2.0 description
    Api {
        /// URL or file path of the API description
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Output .docx file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Project name used in titles (defaults to info.title)
        #[arg(long)]
        project: Option<String>,

        /// Document version (defaults to info.version)
        #[arg(long = "doc-version", value_name = "VERSION")]
        doc_version: Option<String>,

        /// Fetch timeout in seconds
        #[arg(long, default_value = "30", env = "SPECDOC_TIMEOUT")]
        timeout: u64,

        /// Nested definition expansion depth
        #[arg(long, default_value = "1")]
        depth: usize,

        /// Label language
        #[arg(long, value_enum, default_value = "en")]
        lang: Lang,

        /// Document operations without a declared tag
        #[arg(long)]
        include_untagged: bool,
    },

    /// Generate database documentation from a JSON table listing
    Db {
        /// JSON file with table metadata
        #[arg(value_name = "TABLES")]
        tables: PathBuf,

        /// Output .xlsx or .docx file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Project title
        #[arg(long)]
        title: Option<String>,

        /// Label language
        #[arg(long, value_enum, default_value = "en")]
        lang: Lang,
    },

    /// Dump the document tree as JSON
    Tree {
        /// URL or file path of the API description
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print a plain-text preview of the API document
    Text {
        /// URL or file path of the API description
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Lang {
    /// English labels
    En,
    /// Chinese labels
    Zh,
}

impl From<Lang> for Language {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::En => Language::English,
            Lang::Zh => Language::Chinese,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Api {
            source,
            output,
            project,
            doc_version,
            timeout,
            depth,
            lang,
            include_untagged,
        } => {
            let mut options = GenerateOptions::new()
                .with_timeout(Duration::from_secs(timeout))
                .with_property_depth(depth)
                .with_labels(Labels::for_language(lang.into()))
                .with_untagged(include_untagged);
            if let Some(project) = project {
                options = options.with_project_name(project);
            }
            if let Some(version) = doc_version {
                options = options.with_version(version);
            }
            cmd_api(&source, &output, options)
        }
        Commands::Db {
            tables,
            output,
            title,
            lang,
        } => {
            let mut options = GenerateOptions::new().with_labels(Labels::for_language(lang.into()));
            if let Some(title) = title {
                options = options.with_project_name(title);
            }
            cmd_db(&tables, &output, options)
        }
        Commands::Tree {
            source,
            output,
            compact,
        } => cmd_tree(&source, output.as_deref(), compact),
        Commands::Text { source, output } => cmd_text(&source, output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Run `job` on a worker thread, mirroring its progress events on a bar.
fn run_with_progress<F>(job: F) -> Result<GenerateReport, Box<dyn std::error::Error>>
where
    F: FnOnce(&crossbeam_channel::Sender<Progress>) -> specdoc::Result<GenerateReport>
        + Send
        + 'static,
{
    let (tx, rx) = unbounded::<Progress>();
    let worker = thread::spawn(move || job(&tx));

    let pb = progress_bar(1);
    for event in rx.iter() {
        pb.set_length(u64::from(event.total));
        pb.set_position(u64::from(event.current));
        pb.set_message(event.label);
    }

    let report = worker
        .join()
        .map_err(|_| "generation worker panicked".to_string())?;
    match report {
        Ok(report) => {
            pb.finish_with_message("Done!");
            Ok(report)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}

fn print_report(report: &GenerateReport, unit: &str) {
    println!(
        "\n{} {} ({} {}, {} bytes)",
        "Saved to".green().bold(),
        report.output.display(),
        report.items,
        unit,
        report.bytes
    );
}

fn cmd_api(
    source: &str,
    output: &Path,
    options: GenerateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    // Reject a bad target before spawning anything
    specdoc::validate_output_path(output, specdoc::OutputKind::Docx)?;

    let source = SpecSource::parse(source);
    log::debug!("Source resolved to {:?}", source);
    let output = output.to_path_buf();
    let report = run_with_progress(move |tx| {
        Generator::new(options).generate_api_doc(&source, &output, tx, &CancelToken::none())
    })?;
    print_report(&report, "operations");
    Ok(())
}

fn cmd_db(
    tables: &Path,
    output: &Path,
    options: GenerateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonMetadataSource::open(tables)?;
    let capability = DatabaseCapability::Available(Box::new(source));
    let output = output.to_path_buf();
    let report = run_with_progress(move |tx| {
        Generator::new(options).generate_database_doc(
            &capability,
            &output,
            tx,
            &CancelToken::none(),
        )
    })?;
    print_report(&report, "tables");
    Ok(())
}

fn cmd_tree(
    source: &str,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = Specdoc::new().load(source)?.to_json(format)?;
    emit(&json, output)
}

fn cmd_text(source: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = Specdoc::new().load(source)?.to_text()?;
    emit(&text, output)
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "specdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Swagger and database documentation generator");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/specdoc".dimmed());
    println!("License: MIT");
}
