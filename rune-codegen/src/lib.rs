//! Generating C sources for run-length encoded bitmap fonts.
//!
//! This is the library half of the `codegen` tool: it reads glyph
//! definitions, compiles them with [`rune_compiler`], reports any problems,
//! and formats the result as a C header or as C data tables.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use miette::{miette, Severity};
use rune_compiler::Compilation;

mod error;
pub mod formatting;
pub mod plan;

pub use error::ErrorReport;
pub use formatting::{generate, Artifact, Options};
pub use plan::CodegenPlan;

/// Settings shared by every generation in a run.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub options: Options,
    /// Fail instead of warning when the input has problems.
    pub deny_diagnostics: bool,
}

/// Glyph definitions that have been read into memory.
#[derive(Clone, Debug)]
pub struct Source {
    name: String,
    text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Source {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read the file at `path`, or stdin if there is no path or it is `-`.
    pub fn read(path: Option<&Path>) -> miette::Result<Self> {
        match path {
            Some(path) if path != Path::new("-") => read_contents(path)
                .map(|text| Source::new(path.display().to_string(), text)),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| miette!("error reading stdin: {e}"))?;
                Ok(Source::new("<stdin>", text))
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Compile this source, reporting any diagnostics to stderr.
    ///
    /// If `config.deny_diagnostics` is set, any diagnostic is an error.
    pub fn compile(&self, config: &Config) -> miette::Result<Compilation> {
        let compilation = rune_compiler::compile(&self.text);
        let severity = if config.deny_diagnostics {
            Severity::Error
        } else {
            Severity::Warning
        };
        for report in self.reports(&compilation, severity) {
            eprintln!("{:?}", miette::Report::new(report));
        }
        if config.deny_diagnostics && compilation.has_errors() {
            return Err(ErrorReport::message(format!(
                "{} problem(s) found in '{}'",
                compilation.diagnostics().len(),
                self.name
            ))
            .into());
        }
        Ok(compilation)
    }

    /// One report for each diagnostic in `compilation`.
    pub fn reports<'a>(
        &'a self,
        compilation: &'a Compilation,
        severity: Severity,
    ) -> impl Iterator<Item = ErrorReport> + 'a {
        compilation.diagnostics().iter().map(move |diagnostic| {
            ErrorReport::from_diagnostic(diagnostic, &self.name, self.text.clone(), severity)
        })
    }

    /// Compile this source and generate `artifact`.
    pub fn generate(&self, artifact: Artifact, config: &Config) -> miette::Result<String> {
        let compilation = self.compile(config)?;
        Ok(generate(artifact, &compilation, &config.options))
    }
}

pub(crate) fn read_contents(path: &Path) -> miette::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ErrorReport::message(format!("error reading '{}': {}", path.display(), e)).into()
    })
}

/// Write `contents` to `path`, creating any missing parent directories.
pub fn write_contents(path: &Path, contents: &str) -> miette::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| miette!("failed to create directory '{}': {e}", parent.display()))?;
    }
    std::fs::write(path, contents).map_err(|e| miette!("error writing '{}': {}", path.display(), e))
}

/// Generate `artifact` for the glyph definitions at `path`.
pub fn run_for_path(path: &Path, artifact: Artifact, config: &Config) -> miette::Result<String> {
    Source::read(Some(path))?.generate(artifact, config)
}

/// Resolve `path` relative to `root`, unless it is already absolute.
pub(crate) fn rebase(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_owned()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_diagnostics() {
        let source = Source::new("broken.txt", rune_test_data::BROKEN);
        let config = Config {
            deny_diagnostics: true,
            ..Default::default()
        };
        let err = source.compile(&config).unwrap_err();
        assert_eq!(err.to_string(), "7 problem(s) found in 'broken.txt'");
    }

    #[test]
    fn warnings_still_generate() {
        let source = Source::new("broken.txt", rune_test_data::BROKEN);
        let header = source
            .generate(Artifact::Header, &Config::default())
            .unwrap();
        assert!(header.contains("RUNE_NUM             = 4\n"));
    }

    #[test]
    fn one_report_per_diagnostic() {
        let source = Source::new("broken.txt", rune_test_data::BROKEN);
        let compilation = rune_compiler::compile(source.text());
        let reports = source
            .reports(&compilation, Severity::Warning)
            .collect::<Vec<_>>();
        assert_eq!(reports.len(), 7);
        assert_eq!(reports[0].to_string(), "problem outside of any glyph");
        assert_eq!(reports[2].to_string(), "problem in glyph 'TALL'");
    }

    #[test]
    fn write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated/nested/runes.inc");
        write_contents(&path, "// End of list\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// End of list\n");
    }

    #[test]
    fn rebase_relative_paths() {
        let root = Path::new("plans");
        assert_eq!(rebase(root, Path::new("a.txt")), Path::new("plans/a.txt"));
        let absolute = std::env::temp_dir().join("a.txt");
        assert_eq!(rebase(root, &absolute), absolute);
    }
}
