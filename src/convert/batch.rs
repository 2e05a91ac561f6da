//! Batch conversion of span files to `.tex` files.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::Sender;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::ClassificationStats;

use super::{PaperConverter, SourceRegistry};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory for rendered files; `None` writes next to each source
    pub output_dir: Option<PathBuf>,

    /// Convert documents in parallel
    pub parallel: bool,

    /// Extension of rendered files, without the dot
    pub extension: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            parallel: true,
            extension: "tex".to_string(),
        }
    }
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write rendered files into a directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Convert documents one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the output file extension.
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }
}

/// Progress notifications sent while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A document was picked up
    Started {
        /// Source path
        path: PathBuf,
    },
    /// A document is done, successfully or not
    Finished {
        /// Source path
        path: PathBuf,
        /// Whether a file was written
        success: bool,
    },
}

/// What happened to one document.
#[derive(Debug)]
pub enum DocumentStatus {
    /// Rendered and written
    Converted {
        /// Where the LaTeX was written
        output: PathBuf,
        /// Classification counters
        stats: ClassificationStats,
    },
    /// No usable spans; nothing written
    Skipped,
    /// Loading, conversion or writing failed
    Failed(Error),
}

/// Outcome of one document in a batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Source span file
    pub source: PathBuf,
    /// What happened
    pub status: DocumentStatus,
}

impl DocumentOutcome {
    /// Whether the document was converted.
    pub fn is_converted(&self) -> bool {
        matches!(self.status, DocumentStatus::Converted { .. })
    }
}

/// Per-document outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One outcome per input
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Number of documents written.
    pub fn converted(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Converted { .. }))
    }

    /// Number of empty documents skipped.
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Skipped))
    }

    /// Number of failed documents.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Failed(_)))
    }

    /// Whether any document failed. Skipped documents are not failures.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// One planned document: its source, its output and any earlier claimant
/// of that output.
struct Job<'a> {
    source: &'a Path,
    output: PathBuf,
    conflict: Option<PathBuf>,
}

/// Converts many span files, one `.tex` file each.
///
/// Documents share no mutable state, so each one is independent: a failure
/// is recorded in its outcome and the rest of the batch carries on.
pub struct BatchConverter {
    converter: PaperConverter,
    sources: Arc<SourceRegistry>,
    options: BatchOptions,
    progress: Option<Sender<ProgressEvent>>,
}

impl BatchConverter {
    /// Create a batch converter.
    pub fn new(
        converter: PaperConverter,
        sources: Arc<SourceRegistry>,
        options: BatchOptions,
    ) -> Self {
        Self {
            converter,
            sources,
            options,
            progress: None,
        }
    }

    /// Send progress events to a channel.
    pub fn with_progress(mut self, sender: Sender<ProgressEvent>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// The batch options.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Where a source's rendered file goes.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let dir = match self.options.output_dir {
            Some(ref dir) => dir.clone(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        output_path_for(source, &dir, &self.options.extension)
    }

    /// Convert every input. Only failing to create the output directory
    /// aborts the run; per-document errors land in the report.
    ///
    /// Inputs that map to the same output file (e.g. `paper.json` and
    /// `paper.jsonl`) are resolved in input order: the first one keeps the
    /// path, the others fail with [`Error::OutputConflict`].
    pub fn run(&self, inputs: &[PathBuf]) -> Result<BatchReport> {
        if let Some(ref dir) = self.options.output_dir {
            fs::create_dir_all(dir)?;
        }

        log::info!(
            "Converting {} document(s) ({})",
            inputs.len(),
            if self.options.parallel { "parallel" } else { "sequential" }
        );

        let jobs = self.plan(inputs);
        let outcomes: Vec<DocumentOutcome> = if self.options.parallel {
            jobs.into_par_iter().map(|job| self.process(job)).collect()
        } else {
            jobs.into_iter().map(|job| self.process(job)).collect()
        };

        Ok(BatchReport { outcomes })
    }

    fn plan<'a>(&self, inputs: &'a [PathBuf]) -> Vec<Job<'a>> {
        let mut claimed: HashMap<PathBuf, &'a Path> = HashMap::new();
        inputs
            .iter()
            .map(|source| {
                let source = source.as_path();
                let output = self.output_path(source);
                let conflict = match claimed.entry(output.clone()) {
                    Entry::Occupied(first) => Some(first.get().to_path_buf()),
                    Entry::Vacant(slot) => {
                        slot.insert(source);
                        None
                    }
                };
                Job {
                    source,
                    output,
                    conflict,
                }
            })
            .collect()
    }

    fn process(&self, job: Job<'_>) -> DocumentOutcome {
        let source = job.source;
        self.notify(ProgressEvent::Started {
            path: source.to_path_buf(),
        });

        let result = match job.conflict {
            Some(claimed_by) => Err(Error::OutputConflict {
                output: job.output,
                claimed_by,
            }),
            None => self.convert_one(source, job.output),
        };

        let status = match result {
            Ok((output, stats)) => DocumentStatus::Converted { output, stats },
            Err(e) if e.is_empty_document() => {
                log::info!("{}: skipped (empty or unreadable)", source.display());
                DocumentStatus::Skipped
            }
            Err(e) => {
                log::warn!("{}: {}", source.display(), e);
                DocumentStatus::Failed(e)
            }
        };

        self.notify(ProgressEvent::Finished {
            path: source.to_path_buf(),
            success: matches!(status, DocumentStatus::Converted { .. }),
        });

        DocumentOutcome {
            source: source.to_path_buf(),
            status,
        }
    }

    fn convert_one(
        &self,
        source: &Path,
        output: PathBuf,
    ) -> Result<(PathBuf, ClassificationStats)> {
        let spans = self.sources.load(source)?;
        let result = self.converter.convert_spans(&spans)?;
        fs::write(&output, result.to_latex())?;

        log::debug!(
            "{} -> {} ({} sections, {} references)",
            source.display(),
            output.display(),
            result.stats.section_count,
            result.stats.reference_entries
        );
        Ok((output, result.stats))
    }

    fn notify(&self, event: ProgressEvent) {
        if let Some(ref tx) = self.progress {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    }
}

/// Destination of a rendered document: `dir` + source stem + extension.
pub fn output_path_for(source: &Path, dir: &Path, extension: &str) -> PathBuf {
    let mut name = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".");
    name.push(extension);
    dir.join(name)
}

/// Expand inputs into span files. Directories contribute their supported
/// files (not recursively), sorted by path; files are kept as given.
pub fn collect_inputs(paths: &[PathBuf], registry: &SourceRegistry) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && registry.supports_path(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}
