//! Batch conversion of a directory of playlist exports

use super::config::ConvertConfig;
use crate::error::ConvertError;
use crate::{itunes, xspf};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const INPUT_SUFFIX: &str = ".xml";
const OUTPUT_SUFFIX: &str = ".xspf";

/// Convert one iTunes playlist document to XSPF text
pub fn convert_document<R: BufRead>(
    source: R,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    render_document(source, config).map(|(text, _)| text)
}

/// Parse and render one document, also returning how many tracks were written
fn render_document<R: BufRead>(
    source: R,
    config: &ConvertConfig,
) -> Result<(String, usize), ConvertError> {
    let tracks = itunes::parse_tracks(source)?;
    let text = xspf::render_playlist(&tracks, config)?;
    Ok((text, tracks.iter().filter(|t| !t.is_empty()).count()))
}

/// A successfully converted file
#[derive(Debug)]
pub struct Converted {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub track_count: usize,
}

/// A file that was skipped
#[derive(Debug)]
pub struct Failed {
    pub source: PathBuf,
    pub error: ConvertError,
}

/// Outcome of a batch run, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Converted>,
    pub failed: Vec<Failed>,
}

/// Converts every `.xml` file in a directory into an `.xspf` file
pub struct BatchConverter {
    config: ConvertConfig,
    input_dir: PathBuf,
    output_dir: PathBuf,
    parallel: bool,
}

impl BatchConverter {
    pub fn new(config: ConvertConfig, input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            config,
            input_dir,
            output_dir,
            parallel: false,
        }
    }

    /// Convert files concurrently instead of one at a time
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run the batch
    ///
    /// Only an unreadable input directory or an output directory that cannot
    /// be created fails the run. Per-file errors land in the report.
    pub fn run(&self) -> Result<BatchReport> {
        log::info!("Converting playlists from {:?}", self.input_dir);

        // Created once up front so parallel writes never race on it
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.output_dir))?;

        let inputs = self.collect_inputs()?;
        log::info!("Found {} playlist file(s)", inputs.len());

        let outcomes: Vec<Result<Converted, Failed>> = if self.parallel {
            inputs.par_iter().map(|path| self.process(path)).collect()
        } else {
            inputs.iter().map(|path| self.process(path)).collect()
        };

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(converted) => report.converted.push(converted),
                Err(failed) => report.failed.push(failed),
            }
        }

        log::info!(
            "Batch complete: {} converted, {} failed",
            report.converted.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Destination for an input file: `name.xml` becomes `<output>/name.xspf`
    pub fn output_path(&self, source: &Path) -> Option<PathBuf> {
        let name = source.file_name()?.to_str()?;
        let stem = name.strip_suffix(INPUT_SUFFIX)?;
        Some(self.output_dir.join(format!("{}{}", stem, OUTPUT_SUFFIX)))
    }

    /// List `.xml` files directly inside the input directory, sorted by name
    fn collect_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();

        for entry in WalkDir::new(&self.input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to read input directory {:?}", self.input_dir))?;

            let is_export = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(INPUT_SUFFIX));

            if entry.file_type().is_file() && is_export {
                inputs.push(entry.into_path());
            }
        }

        Ok(inputs)
    }

    /// Convert one file and log the outcome
    fn process(&self, source: &Path) -> Result<Converted, Failed> {
        match self.convert_file(source) {
            Ok(converted) => {
                log::info!(
                    "Converted {:?} -> {:?} ({} tracks)",
                    converted.source,
                    converted.destination,
                    converted.track_count
                );
                Ok(converted)
            }
            Err(error) => {
                log::error!("Skipping {:?}: {}", source, error);
                Err(Failed {
                    source: source.to_path_buf(),
                    error,
                })
            }
        }
    }

    fn convert_file(&self, source: &Path) -> Result<Converted, ConvertError> {
        let destination = self.output_path(source).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not an {} file: {:?}", INPUT_SUFFIX, source),
            )
        })?;

        log::debug!("Parsing iTunes playlist from {:?}", source);
        let file = File::open(source)?;
        let (output, track_count) = render_document(BufReader::new(file), &self.config)?;
        fs::write(&destination, output.as_bytes())?;

        Ok(Converted {
            source: source.to_path_buf(),
            destination,
            track_count,
        })
    }
}
