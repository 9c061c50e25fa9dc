//! Build driver — mirrors an input tree of `.comp` files into an output tree
//! of generated headers, regenerating only what is out of date.
//!
//! There is no build cache: an output is stale iff it is missing or its
//! modification time is older than its input's. Coarse filesystem timestamps
//! or clock skew can cause missed or spurious regenerations.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::codegen::{Generator, Render};
use crate::error::Error;

/// Driver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Extension of schema sources, without the dot.
    pub input_ext: String,
    /// Extension of generated files, without the dot.
    pub output_ext: String,
    /// Regenerate every file regardless of timestamps.
    pub force: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            input_ext: "comp".to_string(),
            output_ext: "hh".to_string(),
            force: false,
        }
    }
}

/// An input schema and the output it generates.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    /// `input` relative to the input root.
    pub relative: PathBuf,
}

/// What a driver run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Outputs that were (re)generated, in processing order.
    pub generated: Vec<PathBuf>,
    /// Outputs that were already up to date.
    pub up_to_date: Vec<PathBuf>,
}

pub struct BuildDriver<R> {
    generator: Generator<R>,
    options: BuildOptions,
}

impl<R: Render> BuildDriver<R> {
    pub fn new(generator: Generator<R>, options: BuildOptions) -> Self {
        Self { generator, options }
    }

    /// Process every schema under `indir`, writing outputs under `outdir`.
    ///
    /// Stops at the first error; outputs generated before it are kept.
    pub fn run(&self, indir: &Path, outdir: &Path) -> Result<BuildReport, Error> {
        if !indir.is_dir() {
            return Err(Error::InvalidInputDir(indir.to_path_buf()));
        }

        let mut report = BuildReport::default();
        let walker = WalkBuilder::new(indir)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            let relative = path.strip_prefix(indir).unwrap_or(path);
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());

            if is_dir {
                let mirrored = outdir.join(relative);
                fs::create_dir_all(&mirrored).map_err(Error::io(&mirrored))?;
                continue;
            }
            if path.extension() != Some(OsStr::new(&self.options.input_ext)) {
                continue;
            }

            let entry = BuildEntry {
                input: path.to_path_buf(),
                output: outdir.join(relative).with_extension(&self.options.output_ext),
                relative: relative.to_path_buf(),
            };
            self.process(&entry, &mut report)?;
        }

        Ok(report)
    }

    fn process(&self, entry: &BuildEntry, report: &mut BuildReport) -> Result<(), Error> {
        if !self.options.force && !is_stale(&entry.input, &entry.output)? {
            tracing::debug!(output = %entry.output.display(), "up to date");
            report.up_to_date.push(entry.output.clone());
            return Ok(());
        }

        tracing::info!("-- Generating {}", entry.output.display());
        let comps = self
            .generator
            .generate_file(&entry.input, &entry.output, &entry.relative)?;
        tracing::debug!(output = %entry.output.display(), comps, "generated");
        report.generated.push(entry.output.clone());
        Ok(())
    }
}

/// Whether `output` must be regenerated from `input`: it is missing,
/// unreadable, or strictly older than `input`.
pub fn is_stale(input: &Path, output: &Path) -> Result<bool, Error> {
    let input_mtime = fs::metadata(input)
        .and_then(|m| m.modified())
        .map_err(Error::io(input))?;

    match fs::metadata(output).and_then(|m| m.modified()) {
        Ok(output_mtime) => Ok(input_mtime > output_mtime),
        Err(_) => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn missing_output_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.comp");
        fs::write(&input, "").unwrap();
        assert!(is_stale(&input, &dir.path().join("a.hh")).unwrap());
    }

    #[test]
    fn older_output_is_stale_newer_or_equal_is_not() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.comp");
        let output = dir.path().join("a.hh");
        fs::write(&input, "").unwrap();
        fs::write(&output, "").unwrap();

        let base = SystemTime::now() - Duration::from_secs(3600);
        set_mtime(&input, base);

        set_mtime(&output, base - Duration::from_secs(10));
        assert!(is_stale(&input, &output).unwrap());

        set_mtime(&output, base);
        assert!(!is_stale(&input, &output).unwrap());

        set_mtime(&output, base + Duration::from_secs(10));
        assert!(!is_stale(&input, &output).unwrap());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = is_stale(&dir.path().join("a.comp"), &dir.path().join("a.hh")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn default_options() {
        let options = BuildOptions::default();
        assert_eq!(options.input_ext, "comp");
        assert_eq!(options.output_ext, "hh");
        assert!(!options.force);
    }
}
