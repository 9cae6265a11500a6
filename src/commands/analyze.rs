use crate::config::{self, LoadedConfig, ShouldmapConfig};
use crate::core::ClassDecl;
use crate::frameworks::TestFramework;
use crate::inspection::{resolve_framework, CoverageEngine, Diagnostic, ExecutionMode, PassOutcome};
use crate::io::{self, AnalysisReport, Finding};
use crate::java::JavaWorkspace;
use crate::quickfix::Fix;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    /// `--framework`; wins over the config file.
    pub framework: Option<String>,
    pub format: crate::cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub fix: bool,
}

/// Diagnostics from one pass over every class-under-test.
#[derive(Debug, Default)]
pub struct PassSummary {
    pub diagnostics: Vec<Diagnostic>,
    /// Classes that reached the coverage check (neither excluded nor unconfigured).
    pub classes_analyzed: usize,
}

/// Run the inspection over every class outside test sources.
///
/// Classes are independent, so each runs on its own rayon task against the
/// shared read-only index.
pub fn run_pass(workspace: &JavaWorkspace, framework: Option<TestFramework>) -> PassSummary {
    let engine = CoverageEngine::new(workspace, framework);
    let classes: Vec<&ClassDecl> = workspace.classes_under_test().collect();

    let outcomes: Vec<PassOutcome> = classes
        .par_iter()
        .map(|class| engine.evaluate(class))
        .collect();

    let classes_analyzed = outcomes
        .iter()
        .filter(|o| !matches!(o, PassOutcome::Excluded | PassOutcome::Unconfigured))
        .count();
    let mut diagnostics: Vec<Diagnostic> = outcomes
        .into_iter()
        .flat_map(PassOutcome::into_diagnostics)
        .collect();
    diagnostics.sort_by(|a, b| (&a.file, a.range).cmp(&(&b.file, b.range)));

    PassSummary {
        diagnostics,
        classes_analyzed,
    }
}

/// Apply each distinct fix once. Returns `TestClass#method` for every stub
/// created; fixes that fail are logged and skipped.
pub fn apply_fixes(workspace: &mut JavaWorkspace, diagnostics: &[Diagnostic]) -> Vec<String> {
    let fixes: BTreeMap<(&str, &str), &Fix> = diagnostics
        .iter()
        .filter_map(|d| d.fix.as_ref())
        .map(|fix| (fix.target_key(), fix))
        .collect();

    fixes
        .into_values()
        .filter(|fix| fix.invoke(&mut *workspace))
        .map(|fix| format!("{}#{}", fix.test_class, fix.method_name))
        .collect()
}

/// The project a path belongs to: the directory of the nearest config file,
/// or the path itself when there is none.
fn locate_project(path: &Path) -> LoadedConfig {
    config::find_config(path).unwrap_or_else(|| {
        log::debug!("No config found above {}. Using defaults.", path.display());
        LoadedConfig {
            root: path.to_path_buf(),
            config: ShouldmapConfig::default(),
        }
    })
}

/// Analyze `config.path` and write the report. Returns whether findings remain.
///
/// The whole project is indexed so test classes resolve from anywhere in it;
/// only classes under `config.path` are reported.
pub fn handle_analyze(config: AnalyzeConfig) -> Result<bool> {
    let LoadedConfig {
        root: project_root,
        config: file_config,
    } = locate_project(&config.path);
    let setting = config
        .framework
        .as_deref()
        .or_else(|| file_config.framework_key());
    let framework = resolve_framework(setting, ExecutionMode::Interactive)
        .context("Invalid test framework setting")?;

    let mut workspace = JavaWorkspace::load(&project_root, &file_config.sources)
        .with_context(|| format!("Failed to index {}", project_root.display()))?;
    if project_root != config.path {
        let scope = config
            .path
            .canonicalize()
            .unwrap_or_else(|_| config.path.clone());
        workspace = workspace.with_scope(scope);
    }

    let mut pass = run_pass(&workspace, framework);
    let mut fixes_applied = Vec::new();

    if config.fix && !pass.diagnostics.is_empty() {
        fixes_applied = apply_fixes(&mut workspace, &pass.diagnostics);
        workspace.save().context("Failed to write fixed sources")?;
        pass = run_pass(&workspace, framework);
    }

    let mut report = AnalysisReport::new(framework);
    report.files_indexed = workspace.file_count();
    report.classes_analyzed = pass.classes_analyzed;
    report.fixes_applied = fixes_applied;
    report.findings = pass
        .diagnostics
        .iter()
        .map(|d| Finding::from_diagnostic(d, &workspace, &project_root))
        .collect();

    write_report(&report, &config)?;
    Ok(report.has_findings())
}

fn write_report(report: &AnalysisReport, config: &AnalyzeConfig) -> Result<()> {
    let sink: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = io::create_writer(config.format.into(), sink);
    writer.write_report(report)
}
