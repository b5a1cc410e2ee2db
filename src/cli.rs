use crate::{
    config::Config,
    engine::{Engine, LocalEngine},
    filing::{self, Applied},
    pipeline::{Pipeline, Route, SkipReason, Verdict},
    report::{FileReport, RunReport},
    util::{list_pdfs, now_rfc3339},
};
use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "aso-filer")]
#[command(about = "Hybrid ASO PDF classifier and renamer (native text + OCR + heuristics)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Path to config TOML. If omitted, uses ./aso-filer.toml if present,
    /// else compiled-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check PDF backend and OCR language-data availability.
    Doctor {},
    /// Evaluate one document and print the decision without renaming it.
    Inspect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Rename and file every PDF in a directory. The default command.
    Scan {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = Config::load_or_default(args.config.as_deref())?;
    let _guard = init_logging(&args, &cfg)?;

    match args.cmd {
        Some(Command::Doctor {}) => doctor(&cfg),
        Some(Command::Inspect { input }) => inspect(&cfg, &input),
        Some(Command::Scan { dir }) => scan(&cfg, dir.as_deref()),
        None => scan(&cfg, None),
    }
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if cfg.logging.write_to_file && !cfg.logging.file_path.is_empty() {
        let path = PathBuf::from(&cfg.logging.file_path);
        if let Some(parent) = path.parent() {
            crate::util::ensure_dir(parent)?;
        }
        let file = std::fs::File::create(&path)
            .map_err(|e| anyhow!("create log file {}: {e}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn doctor(cfg: &Config) -> Result<()> {
    let engine = LocalEngine::new(cfg);
    let diag = engine.doctor()?;
    println!("{}", serde_json::to_string_pretty(&diag)?);
    Ok(())
}

fn inspect(cfg: &Config, input: &Path) -> Result<()> {
    let engine = LocalEngine::new(cfg);
    let pipeline = Pipeline::new(cfg, engine)?;
    let eval = pipeline.evaluate(input)?;
    println!("{}", serde_json::to_string_pretty(&eval)?);
    Ok(())
}

fn scan(cfg: &Config, dir_override: Option<&Path>) -> Result<()> {
    let dir = dir_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.input_dir));

    let files = list_pdfs(&dir)?;
    if files.is_empty() {
        info!("no PDF files found in {}", dir.display());
        return Ok(());
    }
    info!("found {} files in {}", files.len(), dir.display());

    let engine = LocalEngine::new(cfg);
    let pipeline = Pipeline::new(cfg, engine)?;

    let mut report = RunReport {
        started: now_rfc3339(),
        ..Default::default()
    };

    for file in &files {
        report.scanned += 1;
        info!("reading {}", file.display());

        // Per-document boundary: one bad file never aborts the batch.
        match process_one(cfg, &pipeline, file) {
            Ok(file_report) => record(&mut report, file_report),
            Err(err) => {
                error!("failed to process {}: {err:#}", file.display());
                report.failed += 1;
                report.files.push(FileReport {
                    source: file.display().to_string(),
                    outcome: "failed".into(),
                    target: None,
                    missing: Vec::new(),
                    error: Some(format!("{err:#}")),
                });
            }
        }
    }

    report.finished = now_rfc3339();

    if cfg.global.write_report_json {
        let path = dir.join(&cfg.global.report_filename);
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
    }

    if cfg.global.print_summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!("processing complete: {} files scanned", report.scanned);
    Ok(())
}

fn process_one<E: Engine>(cfg: &Config, pipeline: &Pipeline<E>, file: &Path) -> Result<FileReport> {
    let eval = pipeline.evaluate(file)?;

    match &eval.verdict {
        Verdict::Skip { reason } => {
            match reason {
                SkipReason::NoText => {
                    warn!("no text could be extracted, even via OCR; skipping");
                }
                SkipReason::NotRecognized => {
                    warn!("not recognized as a certificate document; skipping");
                }
            }
            Ok(FileReport {
                source: file.display().to_string(),
                outcome: skip_outcome(*reason).into(),
                target: None,
                missing: Vec::new(),
                error: None,
            })
        }
        Verdict::Rename { missing, .. } => {
            let missing = missing.clone();
            if !missing.is_empty() {
                warn!("unresolved fields {missing:?}; filing for manual review");
            }
            let applied = filing::apply(cfg, &eval)?;
            let (outcome, target) = match &applied {
                Applied::Renamed { path, route, .. } => (
                    match route {
                        Route::Processed => "processed",
                        Route::Errors => "errors",
                    },
                    Some(path.display().to_string()),
                ),
                Applied::Skipped => ("skipped", None),
            };
            Ok(FileReport {
                source: file.display().to_string(),
                outcome: outcome.into(),
                target,
                missing,
                error: None,
            })
        }
    }
}

fn skip_outcome(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NoText => "skipped_no_text",
        SkipReason::NotRecognized => "skipped_unrecognized",
    }
}

fn record(report: &mut RunReport, file_report: FileReport) {
    match file_report.outcome.as_str() {
        "processed" => {
            report.renamed += 1;
            report.filed_processed += 1;
        }
        "errors" => {
            report.renamed += 1;
            report.filed_errors += 1;
        }
        "skipped_no_text" => report.skipped_no_text += 1,
        "skipped_unrecognized" => report.skipped_unrecognized += 1,
        _ => {}
    }
    report.files.push(file_report);
}
