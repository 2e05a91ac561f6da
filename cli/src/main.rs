//! paper2tex CLI - rebuild LaTeX papers from extracted text spans

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use paper2tex::convert::{collect_inputs, DocumentStatus, ProgressEvent};
use paper2tex::{
    BatchConverter, BatchOptions, ConvertOptions, Dialect, JsonFormat, PaperConverter,
    SourceRegistry,
};

#[derive(Parser)]
#[command(name = "paper2tex")]
#[command(version)]
#[command(about = "Rebuild LaTeX papers from font-annotated text spans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert span files to .tex files
    Convert {
        /// Span files or directories of span files
        #[arg(value_name = "PATH", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (next to each input if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Paper style
        #[arg(long, value_enum, default_value = "generic")]
        style: Style,

        /// Custom LaTeX template with VAR_TITLE, VAR_ABSTRACT, VAR_BODY and VAR_REFERENCES
        #[arg(long, value_name = "FILE", env = "PAPER2TEX_TEMPLATE")]
        template: Option<PathBuf>,

        /// Convert one document at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Print the inferred document structure as JSON
    Classify {
        /// Input span file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paper style
        #[arg(long, value_enum, default_value = "generic")]
        style: Style,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show classification statistics for a span file
    Info {
        /// Input span file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Paper style
        #[arg(long, value_enum, default_value = "generic")]
        style: Style,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Style {
    /// Generic two-column article
    Generic,
    /// IEEE-style paper with Roman-numeral sections
    Ieee,
}

impl From<Style> for Dialect {
    fn from(style: Style) -> Self {
        match style {
            Style::Generic => Dialect::Generic,
            Style::Ieee => Dialect::Ieee,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            output,
            style,
            template,
            sequential,
        } => cmd_convert(&inputs, output, style, template.as_deref(), sequential),
        Commands::Classify {
            input,
            output,
            style,
            compact,
        } => cmd_classify(&input, output.as_deref(), style, compact),
        Commands::Info { input, style } => cmd_info(&input, style),
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

fn convert_options(
    style: Style,
    template: Option<&Path>,
) -> Result<ConvertOptions, paper2tex::Error> {
    let mut options = ConvertOptions::new().with_dialect(style.into());
    if let Some(path) = template {
        options.render = options.render.with_template_file(path)?;
    }
    Ok(options)
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    style: Style,
    template: Option<&Path>,
    sequential: bool,
) -> CliResult {
    // Template problems surface here, before any document is touched.
    let converter = PaperConverter::new(&convert_options(style, template)?)?;

    let registry = Arc::new(SourceRegistry::with_defaults());
    let files = collect_inputs(inputs, &registry)?;
    if files.is_empty() {
        println!("{}", "No span files found".yellow());
        return Ok(());
    }
    log::debug!("Resolved {} span file(s) from {} input(s)", files.len(), inputs.len());

    let mut batch_options = BatchOptions::new();
    if let Some(dir) = output {
        batch_options = batch_options.with_output_dir(dir);
    }
    if sequential {
        batch_options = batch_options.sequential();
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let batch = BatchConverter::new(converter, registry, batch_options).with_progress(tx);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = thread::scope(|s| {
        let worker = s.spawn(move || batch.run(&files));

        for event in rx.iter() {
            match event {
                ProgressEvent::Started { path } => {
                    pb.set_message(display_name(&path));
                }
                ProgressEvent::Finished { .. } => pb.inc(1),
            }
        }

        worker.join()
    })
    .map_err(|_| "conversion worker panicked")??;

    pb.finish_and_clear();

    for outcome in &report.outcomes {
        let name = display_name(&outcome.source);
        match outcome.status {
            DocumentStatus::Converted { ref output, ref stats } => println!(
                "{} {} -> {} ({} sections, {} references)",
                "✓".green(),
                name,
                output.display(),
                stats.section_count,
                stats.reference_entries
            ),
            DocumentStatus::Skipped => {
                println!("{} {} Skipped (Empty/Unreadable)", "-".yellow(), name)
            }
            DocumentStatus::Failed(ref e) => println!("{} {} {}", "✗".red(), name, e),
        }
    }

    println!(
        "\n{} {} converted, {} skipped, {} failed",
        "Done!".green().bold(),
        report.converted(),
        report.skipped(),
        report.failed()
    );

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_classify(input: &Path, output: Option<&Path>, style: Style, compact: bool) -> CliResult {
    let spans = paper2tex::load_spans(input)?;
    let converter = PaperConverter::new(&convert_options(style, None)?)?;
    let result = converter.convert_spans(&spans)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = result.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, style: Style) -> CliResult {
    let spans = paper2tex::load_spans(input)?;
    let converter = PaperConverter::new(&convert_options(style, None)?)?;
    let result = converter.convert_spans(&spans)?;
    let stats = &result.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), result.model.title);
    println!("{}: {}pt", "Body size".bold(), result.profile.body_size);
    println!("{}: {}pt", "Largest size".bold(), result.profile.max_size);
    println!("{}: {:?}", "Final state".bold(), result.final_state);

    println!();
    println!("{}", "Classification Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Spans".bold(), stats.span_count);
    println!("{}: {}", "Title spans".bold(), stats.title_spans);
    println!("{}: {}", "Abstract spans".bold(), stats.abstract_spans);
    println!("{}: {}", "Body spans".bold(), stats.body_spans);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "References".bold(), stats.reference_entries);
    println!("{}: {}", "Discarded".bold(), stats.discarded_spans);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "paper2tex".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Paper structure inference and LaTeX reconstruction");
    println!();
    println!("License: MIT");
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
