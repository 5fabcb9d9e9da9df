//! Generating several files at once, as described by a TOML plan.
//!
//! ```toml
//! clean = ["generated"]
//!
//! [[generate]]
//! source = "runes.txt"
//! target = "generated/runes.h"
//! artifact = "header"
//! ```
//!
//! Relative paths are resolved against the directory containing the plan.

use std::path::{Path, PathBuf};

use log::info;
use miette::miette;
use rayon::prelude::*;
use serde::Deserialize;

use crate::{rebase, Artifact, Config, Options, Source};

#[derive(Clone, Debug, Deserialize)]
pub struct CodegenPlan {
    /// Directories that are removed and recreated before generating.
    #[serde(default)]
    pub clean: Vec<PathBuf>,
    pub generate: Vec<CodegenOp>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CodegenOp {
    pub source: PathBuf,
    pub target: PathBuf,
    pub artifact: Artifact,
    /// Overrides the prefix of the run's [`Options`].
    #[serde(default)]
    pub prefix: Option<String>,
}

impl CodegenPlan {
    pub fn from_toml(text: &str) -> miette::Result<Self> {
        toml::from_str(text).map_err(|e| miette!("failed to parse plan: '{}'", e))
    }

    /// Load the plan at `path`, resolving its paths against its directory.
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = crate::read_contents(path)?;
        let mut plan = Self::from_toml(&contents)?;
        let root = path.parent().unwrap_or(Path::new(""));
        for dir in plan.clean.iter_mut() {
            *dir = rebase(root, dir);
        }
        for op in plan.generate.iter_mut() {
            op.source = rebase(root, &op.source);
            op.target = rebase(root, &op.target);
        }
        Ok(plan)
    }

    /// Clean the output directories, then generate every target.
    ///
    /// Nothing is written unless every source compiles.
    pub fn run(&self, config: &Config) -> miette::Result<()> {
        for path in &self.clean {
            if path.exists() {
                info!("removing {}", path.display());
                std::fs::remove_dir_all(path)
                    .map_err(|e| miette!("failed to clean directory '{}': {e}", path.display()))?;
            }
            info!("creating {}", path.display());
            std::fs::create_dir_all(path)
                .map_err(|e| miette!("failed to create directory '{}': {e}", path.display()))?;
        }

        let results = self
            .generate
            .par_iter()
            .map(|op| op.run(config))
            .collect::<Result<Vec<_>, _>>()?;

        for (op, generated) in self.generate.iter().zip(results.iter()) {
            info!(
                "writing {} bytes to {}",
                generated.len(),
                op.target.display()
            );
            crate::write_contents(&op.target, generated)?;
        }
        Ok(())
    }
}

impl CodegenOp {
    fn run(&self, config: &Config) -> miette::Result<String> {
        let config = match &self.prefix {
            Some(prefix) => Config {
                options: Options {
                    prefix: prefix.clone(),
                },
                ..config.clone()
            },
            None => config.clone(),
        };
        Source::read(Some(&self.source))?.generate(self.artifact, &config)
    }
}
