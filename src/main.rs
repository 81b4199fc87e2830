use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use guide_reader::export::{self, ExportConfig};
use guide_reader::reader::{self, GuideLibrary, ReaderConfig};
use guide_reader::render::{render_error, render_html, render_text};
use guide_reader::{find_guide, ReaderSession, Segmenter, Selection};

#[derive(Parser, Debug)]
#[command(name = "guide-reader")]
#[command(about = "Sentence-by-sentence reader for tour guide narration scripts")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the valid guides in a library's list.json
    List {
        /// Library directory containing list.json
        root_dir: PathBuf,
    },
    /// Print one guide split into sentences
    Show {
        /// Library directory containing list.json
        root_dir: PathBuf,

        /// Guide file or display name (defaults to the first guide)
        guide: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Segment a single text file, or stdin when no file is given
    Segment {
        file: Option<PathBuf>,
    },
    /// Write every guide's sentences to <stem>_sentences.txt files
    Export {
        /// Library directory containing list.json
        root_dir: PathBuf,

        #[arg(long)]
        out_dir: PathBuf,

        /// Stats output file path
        #[arg(long, default_value = "run_stats.json")]
        stats_out: PathBuf,

        /// Abort on first error
        #[arg(long)]
        fail_fast: bool,

        /// Suppress console progress bar
        #[arg(long)]
        no_progress: bool,

        /// Guides processed concurrently
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

fn validate_root(root_dir: &Path) -> Result<()> {
    if !root_dir.is_dir() {
        anyhow::bail!("Library root is not a directory: {}", root_dir.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logs on stderr keep stdout clean for sentence output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let segmenter = Segmenter::default();

    match args.command {
        Command::List { root_dir } => {
            validate_root(&root_dir)?;
            let library = GuideLibrary::new(root_dir, ReaderConfig::default());
            for guide in library.load_catalog().await? {
                println!("{}\t{}", guide.name, guide.file);
            }
        }
        Command::Show { root_dir, guide, format } => {
            validate_root(&root_dir)?;
            // read failures come back in the stats so the HTML view can render them
            let library = GuideLibrary::new(root_dir, ReaderConfig { fail_fast: false });
            let mut session = ReaderSession::new();

            let target = match session.refresh(library.load_catalog().await?) {
                None => anyhow::bail!("Catalog has no valid guides"),
                Some(first) => first.clone(),
            };

            let target = match guide {
                None => target,
                Some(key) => {
                    // accept display names as well as file names on the command line
                    let file = find_guide(session.guides(), &key)
                        .map(|g| g.file.clone())
                        .unwrap_or(key);
                    match session.select(&file) {
                        Selection::Guide(selected) => selected.clone(),
                        Selection::Cleared | Selection::Stale => {
                            anyhow::bail!("Guide not found in catalog: {}", file)
                        }
                    }
                }
            };

            let (content, stats) = library.read_guide(&target).await?;
            if let Some(error) = stats.read_error {
                if let OutputFormat::Html = format {
                    println!("{}", render_error(&error));
                }
                anyhow::bail!("Could not show {}: {}", stats.file_path, error);
            }
            info!(bytes = stats.bytes_read, duration_ms = stats.duration_ms, "Showing {}", target.file);

            match format {
                OutputFormat::Text => print!("{}", render_text(&segmenter.segment(&content))),
                OutputFormat::Html => println!("{}", render_html(&segmenter, &target.name, &content)),
            }
        }
        Command::Segment { file } => {
            let content = match file {
                Some(path) => reader::read_text_file(path).await?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            print!("{}", render_text(&segmenter.segment(&content)));
        }
        Command::Export {
            root_dir,
            out_dir,
            stats_out,
            fail_fast,
            no_progress,
            concurrency,
        } => {
            validate_root(&root_dir)?;
            let library = GuideLibrary::new(root_dir, ReaderConfig { fail_fast });
            let config = ExportConfig {
                fail_fast,
                concurrency,
                show_progress: !no_progress,
            };

            let stats = export::export_library(&library, &segmenter, &out_dir, &config).await?;
            export::write_run_stats(&stats, &stats_out).await?;

            println!("Exported {} guides ({} failed)", stats.succeeded, stats.failed);
            println!("Total sentences: {}", stats.total_sentences);
            println!("Stats written to {}", stats_out.display());
        }
    }

    Ok(())
}
