//! Output formatting for analysis results.
//!
//! Three formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - HTML: a report file persisted next to the analyzed source, named
//!   `<file stem>_report.html`

use std::path::{Path, PathBuf};

use colored::*;
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::score;

// =============================================================================
// JSON format
// =============================================================================

/// Top-level JSON report envelope.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub path: String,
    #[serde(flatten)]
    pub analysis: &'a AnalysisResult,
}

/// Write one result as pretty-printed JSON to stdout.
pub fn write_json(path: &str, result: &AnalysisResult) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        analysis: result,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty format
// =============================================================================

/// Write one result in human-readable colored form.
pub fn write_pretty(path: &str, result: &AnalysisResult) {
    println!();
    print!("  ");
    print!("{}", "pygauge".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "File: ".dimmed());
    println!("{}", path);
    println!();

    if let Some(err) = &result.syntax_error {
        println!(
            "  {} {} at line {}",
            "✗ SYNTAX ERROR".red().bold(),
            err.message,
            err.line
        );
        if !err.text.is_empty() {
            println!("    {}", err.text.dimmed());
        }
        println!();
        println!("  {} {}", "Lines:".dimmed(), result.total_lines);
        println!();
        return;
    }

    write_metrics(result);

    if !result.functions.is_empty() {
        println!("  {}", "Functions".bold());
        for f in &result.functions {
            let cc = f
                .complexity
                .map(|c| format!("cc {}", c))
                .unwrap_or_else(|| "cc -".to_string());
            println!(
                "    {}  lines {}-{} ({} loc, {} args, {})",
                f.name, f.line, f.end_line, f.loc, f.args.len(), cc
            );
        }
        println!();
    }

    if !result.classes.is_empty() {
        println!("  {}", "Classes".bold());
        for c in &result.classes {
            println!(
                "    {}  lines {}-{} ({} loc, {} methods)",
                c.name, c.line, c.end_line, c.loc, c.method_count
            );
        }
        println!();
    }

    if !result.suggestions.is_empty() {
        println!("  {}", "Lint suggestions".bold());
        for s in &result.suggestions {
            let line = s
                .line
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("    {} {} {}", format!("L{}", line).dimmed(), s.code.yellow(), s.message);
        }
        println!();
    }

    if !result.insights.is_empty() {
        println!("  {}", "Insights".bold());
        for insight in &result.insights {
            println!("    {} {}", "•".cyan(), insight);
        }
        println!();
    }

    print!("  Quality: ");
    write_colored_score(result.quality_score);
    print!("/100  Grade: ");
    write_colored_grade(score::grade(result.quality_score));
    println!(
        "  {}",
        format!("(award scheme: {})", result.award_score).dimmed()
    );
    println!();
}

fn write_metrics(result: &AnalysisResult) {
    println!("  {}", "Metrics".bold());
    println!("    Lines:           {}", result.total_lines);
    println!("    Functions:       {}", result.function_count);
    println!("    Classes:         {}", result.class_count);
    println!("    Imports:         {}", result.import_count);
    println!("    Max nesting:     {}", result.max_nesting_depth);
    println!(
        "    Avg complexity:  {}",
        result
            .average_complexity
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!(
        "    Maintainability: {}",
        result
            .maintainability_index
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!();
}

fn write_colored_score(s: i32) {
    match s {
        s if s >= 90 => print!("{}", s.to_string().green().bold()),
        s if s >= 75 => print!("{}", s.to_string().green()),
        s if s >= 60 => print!("{}", s.to_string().yellow()),
        s if s >= 40 => print!("{}", s.to_string().yellow().bold()),
        _ => print!("{}", s.to_string().red()),
    }
}

fn write_colored_grade(grade: &str) {
    match grade {
        "A" => print!("{}", grade.green().bold()),
        "B" => print!("{}", grade.green()),
        "C" => print!("{}", grade.yellow()),
        "D" => print!("{}", grade.yellow().bold()),
        _ => print!("{}", grade.red().bold()),
    }
}

// =============================================================================
// HTML report file
// =============================================================================

/// Report file name for a source file: `<stem>_report.html`.
pub fn report_file_name(source_path: &Path) -> String {
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    format!("{}_report.html", stem)
}

/// Render and persist the HTML report; returns the written path.
pub fn write_html_report(
    output_dir: &Path,
    source_path: &Path,
    result: &AnalysisResult,
) -> anyhow::Result<PathBuf> {
    let file_name = source_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let html = render_html(&file_name, result);

    let out_path = output_dir.join(report_file_name(source_path));
    std::fs::write(&out_path, html)?;
    Ok(out_path)
}

/// Render the full result structure as a standalone HTML page.
pub fn render_html(file_name: &str, result: &AnalysisResult) -> String {
    let mut body = String::new();

    if let Some(err) = &result.syntax_error {
        body.push_str(&format!(
            "<div class=\"error\"><strong>Syntax error:</strong> {} at line {}<pre>{}</pre></div>\n",
            escape(&err.message),
            err.line,
            escape(&err.text)
        ));
    }

    body.push_str("<h2>Metrics</h2>\n<table>\n");
    for (label, value) in [
        ("Total lines", result.total_lines.to_string()),
        ("Functions", result.function_count.to_string()),
        ("Classes", result.class_count.to_string()),
        ("Imports", result.import_count.to_string()),
        ("Max nesting depth", result.max_nesting_depth.to_string()),
        (
            "Average complexity",
            result
                .average_complexity
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "n/a".to_string()),
        ),
        (
            "Maintainability index",
            result
                .maintainability_index
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "n/a".to_string()),
        ),
        ("Quality score", format!("{} / 100", result.quality_score)),
        ("Award score", format!("{} / 100", result.award_score)),
    ] {
        body.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            label, value
        ));
    }
    body.push_str("</table>\n");

    if !result.functions.is_empty() {
        body.push_str("<h2>Functions</h2>\n<table>\n");
        body.push_str("<tr><th>Name</th><th>Lines</th><th>LOC</th><th>Args</th><th>Complexity</th></tr>\n");
        for f in &result.functions {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}-{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&f.name),
                f.line,
                f.end_line,
                f.loc,
                escape(&f.args.join(", ")),
                f.complexity
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "n/a".to_string())
            ));
        }
        body.push_str("</table>\n");
    }

    if !result.classes.is_empty() {
        body.push_str("<h2>Classes</h2>\n<table>\n");
        body.push_str("<tr><th>Name</th><th>Lines</th><th>LOC</th><th>Methods</th></tr>\n");
        for c in &result.classes {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}-{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&c.name),
                c.line,
                c.end_line,
                c.loc,
                c.method_count
            ));
        }
        body.push_str("</table>\n");
    }

    if !result.suggestions.is_empty() {
        body.push_str("<h2>Lint suggestions</h2>\n<ul>\n");
        for s in &result.suggestions {
            let line = s
                .line
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string());
            body.push_str(&format!(
                "<li>line {}: <code>{}</code> {}</li>\n",
                line,
                escape(&s.code),
                escape(&s.message)
            ));
        }
        body.push_str("</ul>\n");
    }

    if !result.insights.is_empty() {
        body.push_str("<h2>Insights</h2>\n<ul>\n");
        for insight in &result.insights {
            body.push_str(&format!("<li>{}</li>\n", escape(insight)));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<h2>Node frequency</h2>\n<table>\n");
    body.push_str("<tr><th>Node kind</th><th>Count</th></tr>\n");
    for (kind, count) in &result.tracked_nodes {
        body.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td></tr>\n",
            escape(kind),
            count
        ));
    }
    body.push_str("</table>\n");

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>pygauge report: {title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; color: #222; }}\n\
         table {{ border-collapse: collapse; margin-bottom: 1.5em; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.3em 0.8em; text-align: left; }}\n\
         .error {{ background: #fdd; border: 1px solid #c66; padding: 1em; margin-bottom: 1.5em; }}\n\
         </style>\n</head>\n<body>\n<h1>pygauge report: {title}</h1>\n{body}</body>\n</html>\n",
        title = escape(file_name),
        body = body
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Capabilities, Engine};
    use crate::source::SourceUnit;

    fn analyze(source: &str) -> AnalysisResult {
        Engine::new(Capabilities::bare()).analyze(&SourceUnit::from_source(source))
    }

    #[test]
    fn test_report_file_name_uses_stem_and_suffix() {
        assert_eq!(
            report_file_name(Path::new("/tmp/uploads/sample.py")),
            "sample_report.html"
        );
    }

    #[test]
    fn test_html_contains_metrics_and_title() {
        let result = analyze("def f(a):\n    return a\n");
        let html = render_html("f.py", &result);
        assert!(html.contains("pygauge report: f.py"));
        assert!(html.contains("Total lines"));
        assert!(html.contains("<td>1</td>")); // one function
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_html_error_banner_on_syntax_failure() {
        let result = analyze("def broken(:\n");
        let html = render_html("broken.py", &result);
        assert!(html.contains("Syntax error"));
        assert!(html.contains("Total lines"));
    }

    #[test]
    fn test_html_escapes_markup() {
        let err = crate::parser::SyntaxErrorInfo {
            message: "invalid syntax".to_string(),
            line: 1,
            text: "<script>alert(1)</script>".to_string(),
        };
        let result = AnalysisResult::syntax_failure(1, err);
        let html = render_html("<evil>.py", &result);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;evil&gt;.py"));
    }

    #[test]
    fn test_write_html_report_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = analyze("x = 1\n");
        let out = write_html_report(temp.path(), Path::new("uploads/main.py"), &result).unwrap();
        assert_eq!(out.file_name().unwrap(), "main_report.html");
        let written = std::fs::read_to_string(out).unwrap();
        assert!(written.contains("pygauge report: main.py"));
    }
}
