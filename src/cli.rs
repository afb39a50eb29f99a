//! Command-line interface for pygauge.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis::{AnalysisResult, Capabilities, Engine};
use crate::lint::ExternalLinter;
use crate::metrics::AstEvaluator;
use crate::report;
use crate::source::SourceUnit;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Python source quality analyzer.
///
/// pygauge parses Python files into syntax trees and derives structural
/// metrics, cyclomatic complexity, maintainability, lint suggestions, and
/// a bounded quality score.
#[derive(Parser)]
#[command(name = "pygauge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files and print results to the terminal
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Analyze files and write an HTML report per file
    Report(ReportArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (a .py file or a directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Skip the external lint pass
    #[arg(long)]
    pub no_lint: bool,

    /// Linter command to invoke instead of pylint
    #[arg(long)]
    pub linter: Option<String>,

    /// Minimum acceptable quality score (exit non-zero below it)
    #[arg(short, long)]
    pub min_score: Option<i32>,
}

/// Arguments for the report command.
#[derive(Parser)]
pub struct ReportArgs {
    /// Path to analyze (a .py file or a directory)
    pub path: PathBuf,

    /// Directory to write report files into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Skip the external lint pass
    #[arg(long)]
    pub no_lint: bool,

    /// Linter command to invoke instead of pylint
    #[arg(long)]
    pub linter: Option<String>,
}

/// Collect `.py` files under a root, skipping hidden directories.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // Depth 0 is the root the caller asked for; only skip hidden
            // directories found during the walk.
            let name = e.file_name().to_string_lossy();
            e.depth() == 0 || !(e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("py") {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}

fn build_capabilities(no_lint: bool, linter: &Option<String>) -> Capabilities {
    let lint_tool: Option<Box<dyn crate::lint::Linter>> = if no_lint {
        None
    } else {
        match linter {
            Some(program) => Some(Box::new(ExternalLinter::new(program.clone(), vec![]))),
            None => Some(Box::new(ExternalLinter::pylint())),
        }
    };

    Capabilities {
        complexity: Some(Box::new(AstEvaluator::new())),
        linter: lint_tool,
    }
}

fn resolve_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("cannot access path {:?}: {}", path, e))?;

    if metadata.is_dir() {
        collect_files(path)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

/// Analyze every file; runs are independent so they go wide.
fn analyze_all(files: &[PathBuf], engine: &Engine) -> Vec<(PathBuf, anyhow::Result<AnalysisResult>)> {
    files
        .par_iter()
        .map(|path| {
            let result = SourceUnit::from_file(path)
                .map(|unit| engine.analyze(&unit))
                .map_err(anyhow::Error::from);
            (path.clone(), result)
        })
        .collect()
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let files = resolve_files(&args.path)?;
    if files.is_empty() {
        eprintln!("Warning: no .py files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let engine = Engine::new(build_capabilities(args.no_lint, &args.linter));
    let outcomes = analyze_all(&files, &engine);

    let mut exit = EXIT_SUCCESS;
    for (path, outcome) in &outcomes {
        let path_str = path.to_string_lossy();
        match outcome {
            Ok(result) => {
                match args.format.as_str() {
                    "json" => report::write_json(&path_str, result)?,
                    _ => report::write_pretty(&path_str, result),
                }
                if let Some(min) = args.min_score {
                    if result.quality_score < min {
                        exit = EXIT_FAILED;
                    }
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                exit = EXIT_ERROR;
            }
        }
    }

    Ok(exit)
}

/// Run the report command.
pub fn run_report(args: &ReportArgs) -> anyhow::Result<i32> {
    let files = resolve_files(&args.path)?;
    if files.is_empty() {
        eprintln!("Warning: no .py files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    std::fs::create_dir_all(&args.output)?;

    let engine = Engine::new(build_capabilities(args.no_lint, &args.linter));
    let outcomes = analyze_all(&files, &engine);

    let mut exit = EXIT_SUCCESS;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(result) => {
                let written = report::write_html_report(&args.output, path, result)?;
                println!("{}", written.display());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                exit = EXIT_ERROR;
            }
        }
    }

    Ok(exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_finds_python_only() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(temp.path().join("b.txt"), "not python").unwrap();
        std::fs::create_dir(temp.path().join("pkg")).unwrap();
        std::fs::write(temp.path().join("pkg/c.py"), "y = 2\n").unwrap();
        std::fs::create_dir(temp.path().join(".hidden")).unwrap();
        std::fs::write(temp.path().join(".hidden/d.py"), "z = 3\n").unwrap();

        let files = collect_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.py", "c.py"]);
    }

    #[test]
    fn test_collect_files_accepts_hidden_root() {
        // A dot-prefixed directory passed explicitly is still walked;
        // only hidden directories below the root are skipped.
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".workdir");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("a.py"), "x = 1\n").unwrap();
        std::fs::create_dir(root.join(".cache")).unwrap();
        std::fs::write(root.join(".cache/b.py"), "y = 2\n").unwrap();

        let files = collect_files(&root).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "a.py");
    }

    #[test]
    fn test_analyze_all_reports_per_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("good.py"), "x = 1\n").unwrap();
        std::fs::write(temp.path().join("bad.py"), "def broken(:\n").unwrap();

        let files = collect_files(temp.path()).unwrap();
        let engine = Engine::new(Capabilities::bare());
        let outcomes = analyze_all(&files, &engine);

        assert_eq!(outcomes.len(), 2);
        let bad = outcomes
            .iter()
            .find(|(p, _)| p.file_name().unwrap() == "bad.py")
            .unwrap();
        assert!(bad.1.as_ref().unwrap().syntax_error.is_some());
    }
}
