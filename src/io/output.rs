use crate::frameworks::TestFramework;
use crate::inspection::{Diagnostic, InspectionInfo, Severity, INSPECTION};
use crate::java::{JavaWorkspace, Position};
use crate::quickfix::Fix;
use colored::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// One diagnostic resolved to a file location.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Path relative to the analyzed root when possible.
    pub file: PathBuf,
    pub start: Position,
    pub end: Position,
    pub rule: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub class: String,
    /// The highlighted source text.
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Finding {
    pub fn from_diagnostic(diagnostic: &Diagnostic, workspace: &JavaWorkspace, root: &Path) -> Self {
        let range = diagnostic.range;
        let origin = Position { line: 1, column: 1 };
        let start = workspace
            .position(&diagnostic.file, range.start)
            .unwrap_or(origin);
        let end = workspace
            .position(&diagnostic.file, range.end)
            .unwrap_or(start);
        let snippet = workspace
            .source(&diagnostic.file)
            .and_then(|text| text.get(range.start..range.end))
            .unwrap_or_default()
            .to_string();

        Self {
            file: diagnostic
                .file
                .strip_prefix(root)
                .unwrap_or(&diagnostic.file)
                .to_path_buf(),
            start,
            end,
            rule: diagnostic.rule,
            severity: diagnostic.severity,
            message: diagnostic.message,
            class: diagnostic.class.clone(),
            snippet,
            fix: diagnostic.fix.clone(),
        }
    }
}

/// Everything one `analyze` run reports.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub inspection: InspectionInfo,
    pub framework: Option<TestFramework>,
    pub files_indexed: usize,
    pub classes_analyzed: usize,
    /// Test methods created by `--fix`, as `TestClass#method`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixes_applied: Vec<String>,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    pub fn new(framework: Option<TestFramework>) -> Self {
        Self {
            inspection: INSPECTION,
            framework,
            files_indexed: 0,
            classes_analyzed: 0,
            fixes_applied: Vec::new(),
            findings: Vec::new(),
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_finding(&mut self, finding: &Finding) -> anyhow::Result<()> {
        let severity = finding.severity.to_string().yellow().bold();
        writeln!(
            self.writer,
            "{}:{}:{}: {}[{}]: {}",
            finding.file.display(),
            finding.start.line,
            finding.start.column,
            severity,
            finding.rule,
            finding.message.bold()
        )?;
        if !finding.snippet.is_empty() {
            writeln!(self.writer, "    {} {}", "-->".dimmed(), finding.snippet.trim())?;
        }
        if let Some(fix) = &finding.fix {
            writeln!(self.writer, "    {} {}", "fix:".green(), fix.name)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let framework = report
            .framework
            .map(|f| f.key().to_string())
            .unwrap_or_else(|| "none".to_string());
        let summary = format!(
            "{} issue(s) in {} class(es) across {} file(s) [framework: {}]",
            report.findings.len(),
            report.classes_analyzed,
            report.files_indexed,
            framework
        );
        if report.has_findings() {
            writeln!(self.writer, "{}", summary.yellow())?;
        } else {
            writeln!(self.writer, "{}", summary.green())?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.framework.is_none() {
            writeln!(
                self.writer,
                "{}",
                "No test framework configured; nothing to check.".dimmed()
            )?;
        }
        for applied in &report.fixes_applied {
            writeln!(self.writer, "{} {}", "created".green().bold(), applied)?;
        }
        for finding in &report.findings {
            self.write_finding(finding)?;
        }
        self.write_summary(report)
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
