//! Load → Annotate → Save
//!
//! One run reads a whole JSON document, renames its sentinel ids and writes
//! the result back out with two-space indentation. Non-ASCII text is written
//! as-is, never `\u` escaped. The output is only opened once the input has
//! parsed, so a bad input never leaves an output file behind.

// this_file: crates/tabid-core/src/pipeline.rs

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    annotate::{AnnotateStats, Annotator},
    config::PipelineConfig,
    error::{Result, TabidError},
};

/// Path standing for stdin (input) or stdout (output)
pub const STDIO_PATH: &str = "-";

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Where the annotated document was written
    pub output: PathBuf,
    pub stats: AnnotateStats,
}

/// A configured load/annotate/save run
///
/// ```no_run
/// use tabid_core::Pipeline;
///
/// let report = Pipeline::builder()
///     .input("json/3762.json")
///     .output("3762_processed.json")
///     .build()?
///     .run()?;
/// println!("saved to {}", report.output.display());
/// # Ok::<(), tabid_core::TabidError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    annotator: Annotator,
    input: PathBuf,
    output: PathBuf,
}

impl Pipeline {
    /// Start building a new pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Build straight from a validated config
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            annotator: Annotator::new(config.sentinel_labels),
            input: config.input,
            output: config.output,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    /// Read, annotate and write, in that order
    pub fn run(&self) -> Result<RunReport> {
        let text = read_input(&self.input)?;
        log::debug!("Read {} bytes from {}", text.len(), self.input.display());

        let (rendered, stats) = self.process_text(&text, &self.input)?;
        log::debug!("Annotated {}: {stats}", self.input.display());

        write_output(&self.output, rendered.as_bytes())?;
        log::debug!("Wrote {} bytes to {}", rendered.len(), self.output.display());

        Ok(RunReport {
            output: self.output.clone(),
            stats,
        })
    }

    /// Annotate an in-memory document and render it back to text
    pub fn process_str(&self, text: &str) -> Result<(String, AnnotateStats)> {
        self.process_text(text, &self.input)
    }

    fn process_text(&self, text: &str, origin: &Path) -> Result<(String, AnnotateStats)> {
        let mut tree: Value = serde_json::from_str(text).map_err(|source| TabidError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        let stats = self.annotator.annotate(&mut tree);
        let rendered = render(&tree).map_err(|source| TabidError::Write {
            path: self.output.clone(),
            source,
        })?;
        Ok((rendered, stats))
    }
}

/// Build pipelines piece by piece
///
/// Starts from [`PipelineConfig::default`]; calling [`sentinel`](Self::sentinel)
/// at least once replaces the default sentinel set.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    custom_sentinels: Option<BTreeSet<String>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config instead of the defaults
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = path.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    /// Add a sentinel label
    pub fn sentinel(mut self, label: impl Into<String>) -> Self {
        self.custom_sentinels
            .get_or_insert_with(BTreeSet::new)
            .insert(label.into());
        self
    }

    /// Add several sentinel labels
    pub fn sentinels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.custom_sentinels.get_or_insert_with(BTreeSet::new);
        set.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Validate and build the pipeline
    pub fn build(self) -> Result<Pipeline> {
        let mut config = self.config;
        if let Some(labels) = self.custom_sentinels {
            config.sentinel_labels = labels;
        }
        Pipeline::from_config(config)
    }
}

/// Run once with the default sentinels
pub fn run(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunReport> {
    Pipeline::builder()
        .input(input.as_ref())
        .output(output.as_ref())
        .build()?
        .run()
}

/// Render a tree with two-space indentation and literal non-ASCII text
pub fn render(tree: &Value) -> io::Result<String> {
    // serde_json's pretty printer indents by two spaces and never escapes non-ASCII
    serde_json::to_string_pretty(tree).map_err(io::Error::from)
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

fn read_input(path: &Path) -> Result<String> {
    let not_found = |source: io::Error| TabidError::NotFound {
        path: path.to_path_buf(),
        source,
    };
    // The file is there but its bytes are not UTF-8 text
    let read_failed = |source: io::Error| match source.kind() {
        io::ErrorKind::InvalidData => TabidError::Encoding {
            path: path.to_path_buf(),
            source,
        },
        _ => not_found(source),
    };

    let mut text = String::new();
    if is_stdio(path) {
        io::stdin().lock().read_to_string(&mut text).map_err(read_failed)?;
    } else {
        let mut file = File::open(path).map_err(not_found)?;
        file.read_to_string(&mut text).map_err(read_failed)?;
    }
    Ok(text)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source: io::Error| TabidError::Write {
        path: path.to_path_buf(),
        source,
    };

    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes).map_err(write_err)?;
        stdout.flush().map_err(write_err)?;
    } else {
        let mut file = File::create(path).map_err(write_err)?;
        file.write_all(bytes).map_err(write_err)?;
        file.flush().map_err(write_err)?;
    }
    Ok(())
}
