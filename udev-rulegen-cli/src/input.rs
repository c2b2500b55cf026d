//! Loading rule text from files or stdin

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, trace};

/// Where one input's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Map the positional arguments to sources; no arguments means stdin.
    pub fn from_args(files: &[PathBuf]) -> Vec<Self> {
        if files.is_empty() {
            return vec![Self::Stdin];
        }
        files
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    Self::Stdin
                } else {
                    Self::File(path.clone())
                }
            })
            .collect()
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read rules from stdin")?;
                Ok(content)
            }
            Self::File(path) => read_file(path),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    trace!("Reading {}", path.display());
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file: {}", path.display()))
}

/// Read every source in order, returning `(description, content)` pairs.
pub fn read_all(sources: &[InputSource]) -> Result<Vec<(String, String)>> {
    let mut loaded = Vec::with_capacity(sources.len());
    for source in sources {
        let content = source.read()?;
        info!("Read {} bytes from {}", content.len(), source.describe());
        loaded.push((source.describe(), content));
    }
    Ok(loaded)
}
