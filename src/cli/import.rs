//! The `import` subcommand: discover ikiwiki sources, convert, write posts.
//!
//! Discovery and file I/O live here; the conversion itself is a pure
//! in-memory transformation in `convert`. Documents are independent, so the
//! batch runs on the rayon thread pool with the config and tag table passed
//! in as read-only values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result, ensure};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::cli::ImportArgs;
use crate::config::ImportConfig;
use crate::convert::{Converted, Converter};
use crate::logger::{self, ProgressLine};
use crate::utils::date::{DateStyle, mtime_stamp};
use crate::{debug, log};

/// Source file extension for ikiwiki posts.
const SOURCE_EXT: &str = "mdwn";

/// Default output directory when `--output` is not given.
const DEFAULT_OUTPUT_DIR: &str = "posts";

// =============================================================================
// Batch Driver
// =============================================================================

/// Per-document result of the batch run.
enum Outcome {
    /// Converted and written (dry-run counts here too).
    Written { warnings: usize },
    /// Destination existed and --overwrite was not given.
    Skipped { warnings: usize },
    /// Unreadable or undecodable source; nothing written.
    Failed,
}

/// Run the import over every source file under the input directory.
pub fn run_import(args: &ImportArgs, config: &ImportConfig) -> Result<()> {
    logger::set_verbose(args.verbose);

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let style = DateStyle::from_iso8601(args.iso8601 || config.import.iso8601);

    let sources = discover_sources(&args.input)?;
    if sources.is_empty() {
        log!("import"; "no .{} files under {}", SOURCE_EXT, args.input.display());
        return Ok(());
    }

    if !args.dry_run {
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;
    }

    log!("import"; "{} post{} from {}",
        sources.len(),
        if sources.len() == 1 { "" } else { "s" },
        args.input.display());

    let progress = ProgressLine::new("posts", sources.len());
    let outcomes: Vec<Outcome> = sources
        .par_iter()
        .map(|path| {
            let outcome = import_one(path, &output_dir, args, config, style);
            progress.inc();
            outcome
        })
        .collect();
    progress.finish();

    summarize(&outcomes, args.dry_run);
    Ok(())
}

/// Recursively collect `.mdwn` files, sorted for deterministic order.
fn discover_sources(input: &Path) -> Result<Vec<PathBuf>> {
    ensure!(input.is_dir(), "input directory {} not found", input.display());

    let mut sources: Vec<PathBuf> = WalkDir::new(input)
        .skip_hidden(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXT))
        .collect();
    sources.sort();
    Ok(sources)
}

/// Print the end-of-run summary line.
fn summarize(outcomes: &[Outcome], dry_run: bool) {
    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut warnings = 0usize;
    for outcome in outcomes {
        match outcome {
            Outcome::Written { warnings: w } => {
                written += 1;
                warnings += w;
            }
            Outcome::Skipped { warnings: w } => {
                skipped += 1;
                warnings += w;
            }
            Outcome::Failed => failed += 1,
        }
    }

    let verb = if dry_run { "converted" } else { "written" };
    log!("import"; "{written} post{} {verb}, {skipped} skipped, {failed} failed, {warnings} warning{}",
        if written == 1 { "" } else { "s" },
        if warnings == 1 { "" } else { "s" });
}

// =============================================================================
// Single Document
// =============================================================================

/// Import one source file. Failures are isolated to this document.
fn import_one(
    path: &Path,
    output_dir: &Path,
    args: &ImportArgs,
    config: &ImportConfig,
    style: DateStyle,
) -> Outcome {
    match convert_file(path, output_dir, args, config, style) {
        Ok(outcome) => outcome,
        Err(e) => {
            log!("error"; "{}: {e:#}", path.display());
            Outcome::Failed
        }
    }
}

/// Convert one file and apply the write/overwrite policy.
///
/// The document is always converted in memory first; an existing destination
/// only suppresses the write, so diagnostics for the content still surface.
fn convert_file(
    path: &Path,
    output_dir: &Path,
    args: &ImportArgs,
    config: &ImportConfig,
    style: DateStyle,
) -> Result<Outcome> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("non-UTF-8 file name: {}", path.display()))?;
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or(stem);

    debug!("import"; "processing {}", path.display());

    let contents = read_source(path)?;
    let date = mtime_stamp(source_mtime(path)?, style);
    let default_title = stem.replace('_', " ");

    let converter = Converter::new(&config.tags, &config.import.posts_base);
    let converted = converter.convert(&contents, stem, &default_title, &date);
    report_warnings(file_name, &converted);
    let warnings = converted.warnings.len();

    if args.dry_run {
        return Ok(Outcome::Written { warnings });
    }

    let dest = output_dir.join(format!("{stem}{}", config.import.output_ext));
    if dest.exists() && !args.overwrite {
        log!("skip"; "{} already exists, not overwriting", dest.display());
        return Ok(Outcome::Skipped { warnings });
    }

    fs::write(&dest, &converted.text)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    debug!("write"; "{} -> {}", path.display(), dest.display());

    Ok(Outcome::Written { warnings })
}

/// Read a source file, requiring valid UTF-8.
fn read_source(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    String::from_utf8(bytes)
        .map_err(|_| anyhow::anyhow!("source is not valid UTF-8: {}", path.display()))
}

/// Last-modification time of a source file.
fn source_mtime(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("failed to stat {}", path.display()))
}

/// Surface per-line conversion warnings as diagnostics.
fn report_warnings(file_name: &str, converted: &Converted) {
    for warning in &converted.warnings {
        log!("warning"; "[{}:{}] {}", file_name, warning.line, warning.warning);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn import_args(input: &Path, output: &Path, overwrite: bool) -> ImportArgs {
        ImportArgs {
            input: input.to_path_buf(),
            output: Some(output.to_path_buf()),
            overwrite,
            iso8601: false,
            dry_run: false,
            verbose: false,
        }
    }

    #[test]
    fn test_discover_sources_filters_extension() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.mdwn", "hello");
        write_file(tmp.path(), "nested/b.mdwn", "world");
        write_file(tmp.path(), "notes.txt", "ignored");
        write_file(tmp.path(), "c.md", "ignored");

        let sources = discover_sources(tmp.path()).unwrap();
        let names: Vec<_> = sources
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.mdwn", "b.mdwn"]);
    }

    #[test]
    fn test_discover_sources_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(discover_sources(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn test_convert_file_writes_output() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let src = write_file(tmp.path(), "hello_world.mdwn", "Some text\n");
        let config = ImportConfig::default();
        let args = import_args(tmp.path(), out.path(), false);

        let outcome =
            convert_file(&src, out.path(), &args, &config, DateStyle::Locale).unwrap();
        assert!(matches!(outcome, Outcome::Written { warnings: 0 }));

        let written = fs::read_to_string(out.path().join("hello_world.md")).unwrap();
        assert!(written.contains(".. title: hello world\n"));
        assert!(written.contains(".. slug: hello_world\n"));
        assert!(written.contains("Some text\n"));
    }

    #[test]
    fn test_convert_file_respects_overwrite_policy() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let src = write_file(tmp.path(), "post.mdwn", "new body\n");
        let dest = write_file(out.path(), "post.md", "old content");
        let config = ImportConfig::default();

        // No --overwrite: converted in memory, write suppressed
        let args = import_args(tmp.path(), out.path(), false);
        let outcome =
            convert_file(&src, out.path(), &args, &config, DateStyle::Locale).unwrap();
        assert!(matches!(outcome, Outcome::Skipped { .. }));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old content");

        // --overwrite: destination replaced
        let args = import_args(tmp.path(), out.path(), true);
        let outcome =
            convert_file(&src, out.path(), &args, &config, DateStyle::Locale).unwrap();
        assert!(matches!(outcome, Outcome::Written { .. }));
        assert!(fs::read_to_string(&dest).unwrap().contains("new body"));
    }

    #[test]
    fn test_convert_file_rejects_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let src = tmp.path().join("broken.mdwn");
        fs::write(&src, [0xff, 0xfe, 0x00]).unwrap();
        let config = ImportConfig::default();
        let args = import_args(tmp.path(), out.path(), false);

        let result = convert_file(&src, out.path(), &args, &config, DateStyle::Locale);
        assert!(result.is_err());
        assert!(!out.path().join("broken.md").exists());
    }

    #[test]
    fn test_convert_file_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let src = write_file(tmp.path(), "post.mdwn", "body\n");
        let config = ImportConfig::default();
        let mut args = import_args(tmp.path(), out.path(), false);
        args.dry_run = true;

        let outcome =
            convert_file(&src, out.path(), &args, &config, DateStyle::Locale).unwrap();
        assert!(matches!(outcome, Outcome::Written { .. }));
        assert!(!out.path().join("post.md").exists());
    }

    #[test]
    fn test_output_extension_override() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let src = write_file(tmp.path(), "post.mdwn", "body\n");
        let mut config = ImportConfig::default();
        config.import.output_ext = ".markdown".to_string();
        let args = import_args(tmp.path(), out.path(), false);

        convert_file(&src, out.path(), &args, &config, DateStyle::Locale).unwrap();
        assert!(out.path().join("post.markdown").exists());
    }
}
