//! Pipeline for turning a source tree into a sampled dataset file.
//!
//! Files are discovered by extension, split into examples one file at a
//! time, aggregated in discovery order, sampled without replacement, and
//! written to a single `|`-delimited output file.

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::index;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::splitter::{split, Example, SplitterConfig};
use crate::{DEFAULT_EXTENSION, DEFAULT_MAX_CHARS, DEFAULT_NUM_EXAMPLES, PACKAGE_MARKER};

/// Column order of the output file.
const HEADER: [&str; 4] = ["fname", "prefix", "middle", "suffix"];

/// Errors raised by [`generate`].
///
/// Empty results (a file yielding no examples, an empty aggregate, a
/// sample size exceeding the pool) are not errors; they surface through
/// [`GenerateReport`] instead.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("input directory {0:?} does not exist or is not a directory")]
    MissingDirectory(PathBuf),

    #[error("parent directory {0:?} of the save path does not exist")]
    MissingSaveParent(PathBuf),

    #[error("failed to write dataset to {path:?}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("i/o error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Root directory to discover source files under.
    pub directory: PathBuf,
    /// Extension selecting source files.
    pub extension: String,
    /// Character budget per line window.
    pub max_chars: usize,
    /// Number of examples sampled into the output file.
    pub num_examples: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("code_examples"),
            extension: DEFAULT_EXTENSION.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            num_examples: DEFAULT_NUM_EXAMPLES,
        }
    }
}

/// Counts from one generation run.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub files_discovered: usize,
    pub files_skipped: usize,
    pub examples_generated: usize,
    pub examples_written: usize,
    /// False when the aggregate was empty and no output file was written.
    pub output_written: bool,
}

/// Discover all source files with the given extension under `root`.
///
/// Package-marker files (`__init__.py`) are excluded. Paths are sorted
/// so discovery order is stable across runs.
pub fn discover_source_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == extension))
        .filter(|e| e.file_name().to_str().map_or(true, |name| name != PACKAGE_MARKER))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();
    paths
}

/// Split every file and merge the examples into one ordered collection.
///
/// Order is discovery order, then within-file window order. Unreadable
/// files are skipped with a warning and counted; returns the aggregate
/// and the number of files skipped.
pub fn collect_examples<R: Rng>(
    paths: &[PathBuf],
    config: &SplitterConfig,
    rng: &mut R,
) -> (Vec<Example>, usize) {
    let mut dataset = Vec::new();
    let mut skipped = 0;

    for path in paths {
        let code = match fs::read_to_string(path) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Warning: skipping unreadable file {:?}: {}", path, e);
                skipped += 1;
                continue;
            }
        };

        let examples = split(&code, &path.to_string_lossy(), config, rng);
        if !examples.is_empty() {
            eprintln!(
                "Generated {} examples for file: {}",
                examples.len(),
                path.display()
            );
        }
        dataset.extend(examples);
    }

    (dataset, skipped)
}

/// Draw a uniform without-replacement sample of `min(num_examples, len)`
/// examples from the aggregate.
pub fn sample_examples<R: Rng>(
    dataset: Vec<Example>,
    num_examples: usize,
    rng: &mut R,
) -> Vec<Example> {
    let amount = num_examples.min(dataset.len());
    index::sample(rng, dataset.len(), amount)
        .into_iter()
        .map(|i| dataset[i].clone())
        .collect()
}

/// Write examples to `save_path` as `|`-delimited text.
///
/// Any existing file at `save_path` is removed first; the operation
/// always overwrites, never appends. Fields are quoted only when they
/// contain the delimiter, a quote, or a newline. Rows missing any of the
/// four fields are skipped rather than aborting the write.
pub fn write_dataset(examples: &[Example], save_path: &Path) -> Result<(), DatasetError> {
    if save_path.exists() {
        fs::remove_file(save_path).map_err(|source| DatasetError::Io {
            path: save_path.to_path_buf(),
            source,
        })?;
    }

    let csv_err = |source| DatasetError::Csv {
        path: save_path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .from_path(save_path)
        .map_err(csv_err)?;

    writer.write_record(HEADER).map_err(csv_err)?;

    for example in examples {
        if example.fname.is_empty()
            || example.prefix.is_empty()
            || example.middle.is_empty()
            || example.suffix.is_empty()
        {
            continue;
        }
        writer.serialize(example).map_err(csv_err)?;
    }

    writer.flush().map_err(|source| DatasetError::Io {
        path: save_path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Run the full pipeline: discover, split, aggregate, sample, write.
///
/// An empty aggregate is a legitimate terminal state: it is reported and
/// no output file is written. Configuration problems (missing input
/// directory, missing save-path parent) fail fast instead.
pub fn generate<R: Rng>(
    config: &GenerateConfig,
    save_path: &Path,
    rng: &mut R,
) -> Result<GenerateReport, DatasetError> {
    if !config.directory.is_dir() {
        return Err(DatasetError::MissingDirectory(config.directory.clone()));
    }
    if let Some(parent) = save_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(DatasetError::MissingSaveParent(parent.to_path_buf()));
        }
    }

    let paths = discover_source_files(&config.directory, &config.extension);
    let splitter = SplitterConfig {
        max_chars: config.max_chars,
    };

    let (dataset, files_skipped) = collect_examples(&paths, &splitter, rng);
    let examples_generated = dataset.len();

    if dataset.is_empty() {
        eprintln!("No examples were generated.");
        return Ok(GenerateReport {
            files_discovered: paths.len(),
            files_skipped,
            examples_generated: 0,
            examples_written: 0,
            output_written: false,
        });
    }

    let sampled = sample_examples(dataset, config.num_examples, rng);
    write_dataset(&sampled, save_path)?;

    Ok(GenerateReport {
        files_discovered: paths.len(),
        files_skipped,
        examples_generated,
        examples_written: sampled.len(),
        output_written: true,
    })
}
