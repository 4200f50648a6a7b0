//! Core generation logic for fill-in-the-middle (FIM) training datasets.
//!
//! This crate turns a directory of source files into (prefix, middle, suffix)
//! training examples for code-completion models. Each file is partitioned
//! into character-budget line windows, each window is carved into three
//! non-empty contiguous segments at randomized boundaries, and a fixed-size
//! random sample of the resulting examples is written to a `|`-delimited
//! text file.
//!
//! Every randomized step takes an explicit [`rand::Rng`], so a seeded
//! generator yields a fully deterministic run.

mod splitter;
pub mod pipeline;

pub use pipeline::{
    collect_examples, discover_source_files, generate, sample_examples, write_dataset,
    DatasetError, GenerateConfig, GenerateReport,
};
pub use splitter::{line_windows, split, Example, SplitterConfig};

/// Default character budget per line window (line lengths plus one
/// separator character each).
pub const DEFAULT_MAX_CHARS: usize = 256;

/// Default number of examples sampled into the output file.
pub const DEFAULT_NUM_EXAMPLES: usize = 40;

/// Default extension selecting source files during discovery.
pub const DEFAULT_EXTENSION: &str = "py";

/// File name excluded from discovery as a package marker.
pub const PACKAGE_MARKER: &str = "__init__.py";
