mod settings;

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use bestiary_import::defenses::{format_defense_list, parse_defense_list};
use bestiary_import::{normalize, parse_monster_with, ImportError, ImportOptions, MonsterRecord};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use settings::Settings;

#[derive(Parser)]
#[command(name = "bestiary_import", about = "Parse D&D Beyond monster pages into structured records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one page (markdown from FILE, or stdin) into a JSON record
    Parse {
        /// Page the markdown was fetched from
        #[arg(short, long)]
        url: String,
        /// Markdown file (default: stdin)
        file: Option<PathBuf>,
        /// Extra tag to merge in (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Leave the notes field empty
        #[arg(long)]
        no_notes: bool,
    },
    /// Print the canonical URL, slug and reference id for a monster URL
    Normalize { url: String },
    /// Parse every `<id>-<slug>.md` file in a directory
    Batch {
        dir: PathBuf,
        /// Write one JSON file per monster here instead of JSON lines on stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Map a free-text defense list onto the damage/condition catalog
    Defenses { text: String },
}

fn main() -> Result<()> {
    let settings = Settings::load().unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { url, file, tags, no_notes } => {
            let markdown = match &file {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            let options = ImportOptions {
                manual_tags: tags,
                compile_notes: settings.compile_notes && !no_notes,
            };
            let record = parse_monster_with(&markdown, &url, &options)?;
            info!(name = %record.name, slug = %record.slug, tags = record.tags.len(), "parsed monster");
            println!("{}", to_json(&record, settings.pretty)?);
            Ok(())
        }
        Commands::Normalize { url } => {
            let source = normalize(&url)?;
            println!("{}", to_json(&source, settings.pretty)?);
            Ok(())
        }
        Commands::Batch { dir, out } => {
            let files = markdown_files(&dir)?;
            if files.is_empty() {
                println!("No .md files in {}.", dir.display());
                return Ok(());
            }
            if let Some(out) = &out {
                fs::create_dir_all(out)
                    .with_context(|| format!("Failed to create {}", out.display()))?;
            }
            println!("Parsing {} pages...", files.len());
            let counts = parse_batch(&files, out.as_deref(), &settings)?;
            counts.print();
            Ok(())
        }
        Commands::Defenses { text } => {
            let selection = parse_defense_list(&text);
            println!("{}", to_json(&selection, settings.pretty)?);
            println!("{}", format_defense_list(&selection));
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

#[derive(Default)]
struct BatchCounts {
    ok: usize,
    failed: BTreeMap<&'static str, usize>,
}

impl BatchCounts {
    fn print(&self) {
        let failed: usize = self.failed.values().sum();
        eprintln!("Parsed {} monsters, {} failed.", self.ok, failed);
        for (kind, n) in &self.failed {
            eprintln!("  {:<20} {}", kind, n);
        }
    }
}

fn parse_batch(files: &[PathBuf], out: Option<&Path>, settings: &Settings) -> Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let options = ImportOptions {
        manual_tags: Vec::new(),
        compile_notes: settings.compile_notes,
    };
    let mut counts = BatchCounts::default();

    for chunk in files.chunks(settings.chunk_size.max(1)) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, parse_file(path, &options)))
            .collect();

        for (path, result) in results {
            match result {
                Ok(record) => {
                    counts.ok += 1;
                    write_record(&record, out, settings.pretty)?;
                }
                Err(e) => {
                    let kind = e
                        .downcast_ref::<ImportError>()
                        .map(ImportError::kind)
                        .unwrap_or("io");
                    warn!("Failed to parse {}: {:#}", path.display(), e);
                    *counts.failed.entry(kind).or_default() += 1;
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

/// `16841-dire-wolf.md` is parsed as `/monsters/16841-dire-wolf`.
fn parse_file(path: &Path, options: &ImportOptions) -> Result<MonsterRecord> {
    let markdown =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("File name is not valid UTF-8")?;
    let record = parse_monster_with(&markdown, &format!("/monsters/{}", stem), options)?;
    Ok(record)
}

fn write_record(record: &MonsterRecord, out: Option<&Path>, pretty: bool) -> Result<()> {
    match out {
        Some(dir) => {
            let name = if record.slug.is_empty() { "monster" } else { record.slug.as_str() };
            let file = match &record.reference_id {
                Some(id) => dir.join(format!("{}-{}.json", id, name)),
                None => dir.join(format!("{}.json", name)),
            };
            fs::write(&file, to_json(record, true)?)
                .with_context(|| format!("Failed to write {}", file.display()))
        }
        None => {
            println!("{}", to_json(record, pretty)?);
            Ok(())
        }
    }
}

fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    Ok(files)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
