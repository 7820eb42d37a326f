use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use sheetjson_core::{decode_sheet, Diagnostic};
use sheetjson_xlsx::Workbook;

use crate::{discover, logger, output};

#[derive(Parser, Debug)]
#[command(
    name = "sheetjson",
    about = "Convert spreadsheets with typed header rows into JSON documents."
)]
pub struct Args {
    /// Directory containing the workbooks to convert.
    #[arg(default_value = "../Tables")]
    pub input_dir: PathBuf,

    /// Directory that receives one `<name>.json` per workbook.
    #[arg(default_value = "../Output")]
    pub output_dir: PathBuf,

    /// Workbook file extensions to convert (repeatable).
    #[arg(long = "extension", value_name = "EXT", default_values = ["xlsx", "xlsm"])]
    pub extensions: Vec<String>,

    /// Decode this worksheet instead of the first one.
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Write single-line JSON instead of indented JSON.
    #[arg(long)]
    pub compact: bool,

    /// Also log blank cells and other debug details.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

/// Outcome of converting one input directory.
#[derive(Debug, Default)]
pub struct Summary {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

pub fn run() -> ExitCode {
    let args = Args::parse();
    logger::init(args.level());

    match run_with_args(&args) {
        Ok(summary) if summary.failed.is_empty() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Convert every workbook in `args.input_dir`, continuing past failures.
pub fn run_with_args(args: &Args) -> Result<Summary> {
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output directory {}", args.output_dir.display()))?;

    if !args.input_dir.is_dir() {
        bail!("input directory does not exist: {}", args.input_dir.display());
    }

    let workbooks = discover::find_workbooks(&args.input_dir, &args.extensions)?;
    let mut summary = Summary::default();
    if workbooks.is_empty() {
        log::warn!("no workbooks to convert in {}", args.input_dir.display());
        return Ok(summary);
    }
    log::info!(
        "found {} workbook(s) to convert in {}",
        workbooks.len(),
        args.input_dir.display()
    );

    for path in workbooks {
        match convert(&path, args) {
            Ok(dest) => {
                log::info!("saved {}", dest.display());
                summary.converted.push(path);
            }
            Err(err) => {
                log::error!("failed to convert {}: {err:#}", display_name(&path));
                summary.failed.push(path);
            }
        }
    }

    let output_dir = fs::canonicalize(&args.output_dir).unwrap_or_else(|_| args.output_dir.clone());
    log::info!("output directory: {}", output_dir.display());
    if summary.failed.is_empty() {
        log::info!("all {} workbook(s) converted", summary.converted.len());
    } else {
        log::error!(
            "{} of {} workbook(s) failed; see the log above",
            summary.failed.len(),
            summary.failed.len() + summary.converted.len()
        );
    }
    Ok(summary)
}

/// Decode one workbook and write its JSON document; returns the output path.
fn convert(path: &Path, args: &Args) -> Result<PathBuf> {
    log::info!("converting {}", display_name(path));

    let mut workbook = Workbook::open(path)?;
    let grid = match &args.sheet {
        Some(name) => workbook.sheet(name)?,
        None => workbook.first_sheet()?,
    };
    let decoded =
        decode_sheet(&grid).with_context(|| format!("worksheet `{}`", grid.name()))?;

    log::info!(
        "decoded {} top-level entr(ies) from worksheet `{}`",
        decoded.document.len(),
        grid.name()
    );

    let mut blanks = 0usize;
    for diagnostic in &decoded.diagnostics {
        match diagnostic {
            Diagnostic::BlankCell { .. } => {
                blanks += 1;
                log::debug!("{diagnostic}");
            }
            Diagnostic::DuplicateKey { .. } => log::warn!("{diagnostic}"),
        }
    }
    if blanks > 0 {
        log::info!("{blanks} blank cell(s) left out (use --verbose to list them)");
    }

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let dest = args.output_dir.join(format!("{stem}.json"));
    output::write_json(&dest, &decoded.document, args.compact)?;
    Ok(dest)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let args = Args::try_parse_from(["sheetjson"]).expect("parse");
        assert_eq!(args.input_dir, PathBuf::from("../Tables"));
        assert_eq!(args.output_dir, PathBuf::from("../Output"));
        assert_eq!(args.extensions, vec!["xlsx", "xlsm"]);
        assert_eq!(args.level(), LevelFilter::Info);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["sheetjson", "-v", "-q"]).is_err());
        let args = Args::try_parse_from(["sheetjson", "in", "out", "--extension", "xls", "-q"])
            .expect("parse");
        assert_eq!(args.extensions, vec!["xls"]);
        assert_eq!(args.level(), LevelFilter::Warn);
    }
}
