//! Sequential batch processing over many files
//!
//! One [`FileParseResult`] is produced per input, in input order. A failed
//! file never stops the batch; cancellation is honoured between files.

use crate::api::MetadataExtractor;
use crate::error::DicomMetaError;
use crate::types::{DicomInput, ExtractorOptions, FileParseResult};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type ProgressCallback<'a> = Box<dyn FnMut(usize, usize) + 'a>;

/// Batch coordinator
///
/// # Example
///
/// ```
/// use dicommeta_core::{BatchParser, DicomInput};
///
/// let mut seen = Vec::new();
/// let results = BatchParser::new()
///     .on_progress(|done, total| seen.push((done, total)))
///     .run(vec![DicomInput::new("broken.dcm", b"garbage".to_vec())]);
///
/// assert_eq!(results.len(), 1);
/// assert!(!results[0].is_success());
/// assert_eq!(seen, vec![(1, 1)]);
/// ```
#[derive(Default)]
pub struct BatchParser<'a> {
    options: ExtractorOptions,
    progress: Option<ProgressCallback<'a>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> BatchParser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ExtractorOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a callback invoked after every file with
    /// `(processed, total)`
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, usize) + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Flag checked before each file; once set, the batch stops and returns
    /// the results completed so far
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Parses in-memory files
    pub fn run(&mut self, inputs: Vec<DicomInput>) -> Vec<FileParseResult> {
        let total = inputs.len();
        self.process(total, inputs.into_iter().map(Ok))
    }

    /// Reads and parses files from disk, one at a time
    ///
    /// A file that cannot be read becomes an error result.
    pub fn run_paths(&mut self, paths: &[PathBuf]) -> Vec<FileParseResult> {
        self.process(paths.len(), paths.iter().map(|path| load(path)))
    }

    fn process<I>(&mut self, total: usize, inputs: I) -> Vec<FileParseResult>
    where
        I: Iterator<Item = Result<DicomInput, FileParseResult>>,
    {
        info!("Parsing {} DICOM file(s)", total);
        let mut results = Vec::with_capacity(total);

        for input in inputs {
            if self.is_cancelled() {
                info!("Batch cancelled after {} of {} file(s)", results.len(), total);
                break;
            }

            let result = match input {
                Ok(input) => self.parse_one(input),
                Err(read_failure) => read_failure,
            };
            results.push(result);

            if let Some(callback) = self.progress.as_mut() {
                callback(results.len(), total);
            }
        }

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        info!("Parsed {}/{} file(s) successfully", succeeded, results.len());
        results
    }

    fn parse_one(&self, input: DicomInput) -> FileParseResult {
        let size = input.size();
        debug!("Parsing {} ({} bytes)", input.name, size);

        match MetadataExtractor::extract_with_options(&input.data, &self.options) {
            Ok(metadata) => FileParseResult::success(input.name, size, metadata),
            Err(e) => {
                warn!("{}: {}", input.name, e);
                FileParseResult::failure(input.name, size, e.to_string())
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Parses in-memory files with default options
pub fn parse_batch(inputs: Vec<DicomInput>) -> Vec<FileParseResult> {
    BatchParser::new().run(inputs)
}

fn load(path: &Path) -> Result<DicomInput, FileParseResult> {
    let name = path.display().to_string();
    match std::fs::read(path).map_err(DicomMetaError::from) {
        Ok(data) => Ok(DicomInput::new(name, data)),
        Err(e) => {
            warn!("{}: failed to read file: {}", name, e);
            Err(FileParseResult::failure(name, 0, e.to_string()))
        }
    }
}
