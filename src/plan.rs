//! Run planning: which files go in, where the report goes, and the upfront
//! checks that must pass before anything is parsed.

use crate::error::ReportError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Inputs to process and the file to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

/// True when the argument should be expanded with `glob`
fn is_pattern(path: &Path) -> bool {
    path.to_string_lossy().contains(['*', '?', '['])
}

/// Apply the default output naming to the command-line arguments.
///
/// An explicit output always wins. Otherwise a single file argument gets
/// its extension replaced by `.html`, exactly two arguments mean
/// "input, output", and anything else writes `default_name`.
pub fn resolve_output(args: &[PathBuf], explicit: Option<&Path>, default_name: &str) -> RunPlan {
    if let Some(output) = explicit {
        return RunPlan {
            inputs: args.to_vec(),
            output: output.to_path_buf(),
        };
    }

    match args {
        [single] if !single.is_dir() && !is_pattern(single) => RunPlan {
            inputs: args.to_vec(),
            output: single.with_extension("html"),
        },
        [input, output] => RunPlan {
            inputs: vec![input.clone()],
            output: output.clone(),
        },
        _ => RunPlan {
            inputs: args.to_vec(),
            output: PathBuf::from(default_name),
        },
    }
}

/// Expand directories to the XML files beneath them and glob patterns to
/// their matches, each sorted. Plain paths pass through untouched.
///
/// Arguments that expand to nothing are kept as-is so [`preflight`]
/// reports them as missing.
pub fn expand_inputs(args: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(args.len());
    for arg in args {
        let expanded = if arg.is_dir() {
            xml_files_under(arg)
        } else if is_pattern(arg) && !arg.exists() {
            glob_matches(arg)
        } else {
            vec![arg.clone()]
        };

        if expanded.is_empty() {
            tracing::debug!(input = %arg.display(), "argument matched no files");
            files.push(arg.clone());
        } else {
            files.extend(expanded);
        }
    }
    files
}

fn xml_files_under(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    // Sort for consistent output
    files.sort();
    files
}

fn glob_matches(pattern: &Path) -> Vec<PathBuf> {
    let pattern = pattern.to_string_lossy();
    let Ok(paths) = glob::glob(&pattern) else {
        tracing::debug!(pattern = %pattern, "invalid glob pattern");
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = paths.filter_map(|p| p.ok()).filter(|p| p.is_file()).collect();
    files.sort();
    files
}

/// Check every input exists and the output may be written.
///
/// All problems are collected and returned together.
pub fn preflight(inputs: &[PathBuf], output: &Path, force: bool) -> Result<(), ReportError> {
    let mut problems: Vec<ReportError> = inputs
        .iter()
        .filter(|input| !input.is_file())
        .map(|input| ReportError::InputNotFound(input.clone()))
        .collect();

    if !force && output.exists() {
        problems.push(ReportError::OutputExists(output.to_path_buf()));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ReportError::Preflight(problems))
    }
}
