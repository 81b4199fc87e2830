// WHY: Batch export of every catalog guide to sentence files plus a run report
// Mirrors the interactive path (read, segment, render_text) so exported files match `show`

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::{Entry, HashMap};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn};

use crate::catalog::GuideEntry;
use crate::reader::GuideLibrary;
use crate::render::render_text;
use crate::segmenter::Segmenter;

/// Configuration for a library export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Abort on first failed guide instead of recording it
    pub fail_fast: bool,
    /// Maximum guides processed at once
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            concurrency: 4,
            show_progress: true,
        }
    }
}

/// Per-guide export statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GuideStats {
    pub name: String,
    pub file: String,
    /// Number of characters in the source document
    pub chars_processed: u64,
    pub sentences_detected: u64,
    /// Size of the source document on disk
    pub bytes_read: u64,
    pub read_time_ms: u64,
    pub processing_time_ms: u64,
    /// `success` or `failed`
    pub status: String,
    pub error: Option<String>,
}

/// Whole-run statistics written to the stats file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    pub total_guides: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub total_sentences: u64,
    pub total_chars: u64,
    pub run_duration_ms: u64,
    pub guides: Vec<GuideStats>,
}

/// Output path for a guide's sentence file, e.g. `gugong.txt` -> `gugong_sentences.txt`
pub fn sentence_file_path(out_dir: &Path, guide: &GuideEntry) -> PathBuf {
    out_dir.join(format!("{}_sentences.txt", guide.stem()))
}

/// Sibling path a sentence file is staged under before it is renamed into place
pub fn partial_file_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Write sentences in `render_text` format
///
/// The content goes to a `.partial` sibling first and is renamed over `path`
/// once flushed, so an interrupted export never leaves a truncated sentence file.
pub async fn write_sentence_file(path: &Path, sentences: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let staging = partial_file_path(path);
    let file = fs::File::create(&staging)
        .await
        .with_context(|| format!("Failed to create {}", staging.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_text(sentences).as_bytes()).await?;
    writer.flush().await?;
    writer.into_inner().sync_all().await?;

    fs::rename(&staging, path)
        .await
        .with_context(|| format!("Failed to move {} into place", path.display()))?;
    Ok(())
}

/// Case-folded output path, used to spot guides that would overwrite each other
fn output_key(out_dir: &Path, guide: &GuideEntry) -> String {
    sentence_file_path(out_dir, guide)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .to_string_lossy()
        .to_lowercase()
}

/// For each guide, the conflict error if an earlier catalog entry already claims its output file
///
/// `gugong.txt` and `gugong.TXT` share a stem, and case-insensitive
/// filesystems fold `Gugong` onto `gugong`, so keys are compared case-folded.
fn output_conflicts(out_dir: &Path, guides: &[GuideEntry]) -> Vec<Option<String>> {
    let mut claimed: HashMap<String, &str> = HashMap::new();
    guides
        .iter()
        .map(|guide| match claimed.entry(output_key(out_dir, guide)) {
            Entry::Occupied(owner) => Some(format!(
                "Output path {} already used by guide {}",
                sentence_file_path(out_dir, guide).display(),
                owner.get()
            )),
            Entry::Vacant(slot) => {
                slot.insert(guide.file.as_str());
                None
            }
        })
        .collect()
}

/// Read, segment and write one guide, filling the counters in `stats`
async fn segment_guide_to_file(
    library: &GuideLibrary,
    segmenter: &Segmenter,
    out_dir: &Path,
    guide: &GuideEntry,
    stats: &mut GuideStats,
) -> Result<()> {
    let (content, read_stats) = library.read_guide(guide).await?;
    stats.read_time_ms = read_stats.duration_ms;
    if let Some(error) = read_stats.read_error {
        return Err(anyhow!(error));
    }
    stats.bytes_read = read_stats.bytes_read;

    let sentences = segmenter.segment(&content);
    write_sentence_file(&sentence_file_path(out_dir, guide), &sentences).await?;
    stats.chars_processed = content.chars().count() as u64;
    stats.sentences_detected = sentences.len() as u64;
    Ok(())
}

async fn export_guide(
    library: &GuideLibrary,
    segmenter: &Segmenter,
    out_dir: &Path,
    guide: &GuideEntry,
    conflict: Option<String>,
) -> GuideStats {
    let start_time = Instant::now();
    let mut stats = GuideStats {
        name: guide.name.clone(),
        file: guide.file.clone(),
        chars_processed: 0,
        sentences_detected: 0,
        bytes_read: 0,
        read_time_ms: 0,
        processing_time_ms: 0,
        status: "success".to_string(),
        error: None,
    };

    let outcome = match conflict {
        Some(error) => Err(anyhow!(error)),
        None => segment_guide_to_file(library, segmenter, out_dir, guide, &mut stats).await,
    };
    if let Err(e) = outcome {
        warn!("Export failed for {}: {:#}", guide.file, e);
        stats.status = "failed".to_string();
        stats.error = Some(format!("{e:#}"));
    }
    stats.processing_time_ms = start_time.elapsed().as_millis() as u64;
    stats
}

fn progress_bar(len: usize, show: bool) -> Result<ProgressBar> {
    if !show {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} guides {msg}")?);
    Ok(bar)
}

/// Segment every guide in the library catalog into `out_dir`
pub async fn export_library(
    library: &GuideLibrary,
    segmenter: &Segmenter,
    out_dir: &Path,
    config: &ExportConfig,
) -> Result<RunStats> {
    let run_start = Instant::now();
    let guides = library.load_catalog().await?;
    info!("Exporting {} guides to {}", guides.len(), out_dir.display());

    fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let conflicts = output_conflicts(out_dir, &guides);
    let bar = progress_bar(guides.len(), config.show_progress)?;
    let mut results = stream::iter(guides.iter().zip(conflicts).enumerate())
        .map(|(position, (guide, conflict))| async move {
            (position, export_guide(library, segmenter, out_dir, guide, conflict).await)
        })
        .buffer_unordered(config.concurrency.max(1));

    let mut collected = Vec::with_capacity(guides.len());
    while let Some((position, stats)) = results.next().await {
        bar.inc(1);
        if config.fail_fast {
            if let Some(ref error) = stats.error {
                bar.abandon();
                anyhow::bail!("Export of {} failed: {}", stats.file, error);
            }
        }
        collected.push((position, stats));
    }
    bar.finish_and_clear();

    // buffer_unordered completes out of order; report in catalog order
    collected.sort_by_key(|(position, _)| *position);
    let guide_stats: Vec<GuideStats> = collected.into_iter().map(|(_, stats)| stats).collect();

    let failed = guide_stats.iter().filter(|s| s.error.is_some()).count() as u64;
    let run_stats = RunStats {
        total_guides: guide_stats.len() as u64,
        succeeded: guide_stats.len() as u64 - failed,
        failed,
        total_sentences: guide_stats.iter().map(|s| s.sentences_detected).sum(),
        total_chars: guide_stats.iter().map(|s| s.chars_processed).sum(),
        run_duration_ms: run_start.elapsed().as_millis() as u64,
        guides: guide_stats,
    };

    info!(
        "Export completed: {} succeeded, {} failed, {} sentences",
        run_stats.succeeded, run_stats.failed, run_stats.total_sentences
    );
    Ok(run_stats)
}

/// Write run statistics as pretty JSON
pub async fn write_run_stats(stats: &RunStats, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write stats {}", path.display()))?;
    Ok(())
}
