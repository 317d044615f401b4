//! studyguide CLI - build study material from a PDF essay

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use studyguide::{ClassifyOptions, GuideConfig};

#[derive(Parser)]
#[command(name = "studyguide")]
#[command(version)]
#[command(about = "Cleaned markdown sections and an HTML study guide from a PDF essay", long_about = None)]
struct Cli {
    /// Guide configuration file (JSON); built-in essay config if omitted
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source PDF (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    pdf: Option<PathBuf>,

    /// Output directory (overrides the configured path)
    #[arg(short, long, global = true, value_name = "DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write cleaned per-section markdown files
    Clean {
        /// Minimum leading spaces for an "indented" line
        #[arg(long, default_value = "4")]
        min_indent: usize,
    },

    /// Split the PDF and write the HTML study guide
    Build,

    /// Show marker pages and computed page ranges
    Ranges {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the whole pipeline: clean, split, and build
    All,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Clean { min_indent }) => cmd_clean(&config, min_indent),
        Some(Commands::Build) => cmd_build(&config),
        Some(Commands::Ranges { json }) => cmd_ranges(&config, json),
        Some(Commands::All) | None => {
            cmd_clean(&config, ClassifyOptions::default().min_indent).and_then(|_| cmd_build(&config))
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> studyguide::Result<GuideConfig> {
    let mut config = match &cli.config {
        Some(path) => GuideConfig::from_file(path)?,
        None => GuideConfig::default(),
    };
    if let Some(pdf) = &cli.pdf {
        config = config.with_pdf(pdf);
    }
    if let Some(output) = &cli.output {
        config = config.with_output_dir(output);
    }
    Ok(config)
}

fn cmd_clean(config: &GuideConfig, min_indent: usize) -> studyguide::Result<()> {
    println!("{}", "Extracting text with layout preservation...".cyan());

    let options = ClassifyOptions {
        min_indent,
        ..ClassifyOptions::default()
    };
    let written = studyguide::clean_sources(config, &options)?;

    println!("{}", "Source sections cleaned:".green().bold());
    for path in &written {
        println!("  {} {}", "├─".dimmed(), path.display());
    }
    Ok(())
}

fn cmd_build(config: &GuideConfig) -> studyguide::Result<()> {
    println!("{}", "Scanning pages for section markers...".cyan());

    let pb = scan_progress_bar();
    let out_path = studyguide::build_guide(config, |page, total| {
        pb.set_length(total as u64);
        pb.set_position(page as u64);
    })?;
    pb.finish_and_clear();

    println!(
        "{} {}",
        "Done! Open in browser:".green().bold(),
        out_path.display()
    );
    Ok(())
}

fn cmd_ranges(config: &GuideConfig, json: bool) -> studyguide::Result<()> {
    let pb = scan_progress_bar();
    let (markers, ranges) = studyguide::locate_ranges(config, |page, total| {
        pb.set_length(total as u64);
        pb.set_position(page as u64);
    })?;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&ranges)?);
        return Ok(());
    }

    println!("{}", "Marker pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Document pages".bold(), markers.total);
    for (num, page) in &markers.sections {
        println!("{}: page {}", format!("Section {num}").bold(), page);
    }
    match markers.notes {
        Some(page) => println!("{}: page {}", "Notes".bold(), page),
        None => println!("{}: {}", "Notes".bold(), "not found".yellow()),
    }

    println!();
    println!("{}", "Page ranges".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for section in &config.sections {
        let range = &ranges[&section.num];
        println!(
            "{}: pages {}-{}  {}",
            format!("Section {}", section.num).bold(),
            range.start,
            range.end,
            section.title.dimmed()
        );
    }
    Ok(())
}

fn scan_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
