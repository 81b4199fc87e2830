use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::catalog::{self, GuideEntry, CATALOG_FILE_NAME};

/// Configuration for guide reading behavior
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or record it and continue
    pub fail_fast: bool,
}

/// Statistics for a single guide read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// A directory holding `list.json` and the guide documents it names
pub struct GuideLibrary {
    root: PathBuf,
    config: ReaderConfig,
}

impl GuideLibrary {
    pub fn new(root: impl Into<PathBuf>, config: ReaderConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE_NAME)
    }

    /// Read and parse the library catalog
    pub async fn load_catalog(&self) -> Result<Vec<GuideEntry>> {
        let path = self.catalog_path();
        debug!("Loading catalog from {}", path.display());

        let json = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        catalog::parse_catalog(&json).with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Resolve a guide's document path, refusing names that escape the root
    pub fn guide_path(&self, guide: &GuideEntry) -> Result<PathBuf> {
        let relative = Path::new(&guide.file);
        // WHY: catalog content is untrusted, a `../` entry must not read outside the library
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined {
            bail!("Guide file escapes library root: {}", guide.file);
        }
        Ok(self.root.join(relative))
    }

    /// Read a guide document with its original line endings
    ///
    /// Without `fail_fast` a failed read returns an empty body with the error
    /// recorded in the stats instead of an `Err`.
    pub async fn read_guide(&self, guide: &GuideEntry) -> Result<(String, ReadStats)> {
        let start_time = std::time::Instant::now();

        let outcome = match self.guide_path(guide) {
            Ok(path) => fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read guide {} ({})", guide.name, path.display())),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(content) => {
                let stats = ReadStats {
                    file_path: guide.file.clone(),
                    bytes_read: content.len() as u64,
                    duration_ms: start_time.elapsed().as_millis() as u64,
                    read_error: None,
                };
                info!(
                    "Read guide {}: {} bytes in {}ms",
                    guide.file, stats.bytes_read, stats.duration_ms
                );
                Ok((content, stats))
            }
            Err(e) => {
                let error_msg = format!("{e:#}");
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    return Err(e);
                }
                let stats = ReadStats {
                    file_path: guide.file.clone(),
                    bytes_read: 0,
                    duration_ms: start_time.elapsed().as_millis() as u64,
                    read_error: Some(error_msg),
                };
                Ok((String::new(), stats))
            }
        }
    }
}

/// Convenience function for reading any text file, such as a single guide outside a library
pub async fn read_text_file<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
