//! CLI subcommands and shared input/output plumbing.

pub mod dump;
pub mod find;
pub mod query;

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::glob;
use ignore::Walk;

/// One markup source ready for parsing
pub(crate) struct Input {
    pub name: String,
    pub source: String,
}

fn is_markup_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "html" || ext == "htm" || ext == "xhtml")
}

/// Collect markup files using glob patterns or directory walking
pub(crate) fn collect_files(patterns: &[String]) -> Vec<PathBuf> {
    patterns
        .iter()
        .flat_map(|pattern| {
            // Check if pattern contains glob characters
            if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|entry| entry.ok())
                    .filter(|path| {
                        is_markup_path(path)
                            && !path.components().any(|c| c.as_os_str() == "node_modules")
                    })
                    .collect::<Vec<_>>()
            } else {
                let path = PathBuf::from(pattern);
                if path.is_file() {
                    // An explicitly named file is taken as-is
                    vec![path]
                } else {
                    // Directory walking respects .gitignore
                    Walk::new(pattern)
                        .filter_map(|entry| entry.ok())
                        .filter(|entry| is_markup_path(entry.path()))
                        .map(|entry| entry.path().to_path_buf())
                        .collect()
                }
            }
        })
        .collect()
}

/// Read every input source. No patterns (or a lone `-`) reads stdin.
/// Returns the inputs together with the number of read failures.
pub(crate) fn read_inputs(patterns: &[String]) -> (Vec<Input>, usize) {
    if patterns.is_empty() || (patterns.len() == 1 && patterns[0] == "-") {
        let mut source = String::new();
        return match std::io::stdin().read_to_string(&mut source) {
            Ok(_) => (
                vec![Input {
                    name: "<stdin>".to_string(),
                    source,
                }],
                0,
            ),
            Err(e) => {
                eprintln!("Failed to read stdin: {e}");
                (Vec::new(), 1)
            }
        };
    }

    let files = collect_files(patterns);
    if files.is_empty() {
        eprintln!("No markup files found matching patterns: {patterns:?}");
        return (Vec::new(), 1);
    }

    let mut failures = 0;
    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        match std::fs::read_to_string(&path) {
            Ok(source) => inputs.push(Input {
                name: path.display().to_string(),
                source,
            }),
            Err(e) => {
                eprintln!("Failed to read {}: {e}", path.display());
                failures += 1;
            }
        }
    }
    (inputs, failures)
}

/// Combine per-input payloads: a single input emits its payload bare,
/// several emit a path-keyed object.
pub(crate) fn combine(mut results: Vec<(String, serde_json::Value)>) -> serde_json::Value {
    if results.len() == 1 {
        results.pop().map(|(_, value)| value).unwrap_or_default()
    } else {
        serde_json::Value::Object(results.into_iter().collect())
    }
}

/// Render the payload and write it to the output file or stdout
pub(crate) fn emit(value: &serde_json::Value, pretty: bool, output: Option<&Path>) -> i32 {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match rendered {
        Ok(json) => match output {
            Some(path) => match std::fs::write(path, json + "\n") {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("Failed to write {}: {e}", path.display());
                    1
                }
            },
            None => {
                println!("{json}");
                0
            }
        },
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            1
        }
    }
}
