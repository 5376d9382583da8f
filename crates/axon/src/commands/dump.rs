//! Dump command - Build and serialize full accessibility trees

use clap::Args;
use rayon::prelude::*;

use axon_loom::Document;
use axon_retina::{BuildOptions, TreeBuilder};

use crate::commands::{combine, emit, read_inputs};
use crate::config::load_config;

#[derive(Args, Default)]
pub struct DumpArgs {
    /// Markup files or glob pattern(s); `-` (or nothing) reads stdin
    #[arg(default_value = "-")]
    pub patterns: Vec<String>,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Quiet mode - suppress per-file diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: DumpArgs) -> i32 {
    let config = load_config(None);
    let (inputs, failures) = read_inputs(&args.patterns);
    if inputs.is_empty() {
        return 1;
    }

    let builder = TreeBuilder::with_options(BuildOptions {
        extra_attributes: config
            .dump
            .extra_attributes
            .iter()
            .map(|name| name.as_str().into())
            .collect(),
    });

    // Build all trees in parallel; inputs are independent snapshots
    let results: Vec<(String, serde_json::Value)> = inputs
        .par_iter()
        .map(|input| {
            let (doc, parse_errors) = Document::parse(&input.source);
            if !parse_errors.is_empty() && !args.quiet {
                eprintln!(
                    "{}: recovered from {} markup error(s)",
                    input.name,
                    parse_errors.len()
                );
            }

            let value = match doc.root_element() {
                Some(root) => {
                    serde_json::to_value(builder.build(&root)).unwrap_or(serde_json::Value::Null)
                }
                None => {
                    if !args.quiet {
                        eprintln!("{}: no root element", input.name);
                    }
                    serde_json::Value::Null
                }
            };
            (input.name.clone(), value)
        })
        .collect();

    let status = emit(
        &combine(results),
        args.pretty || config.dump.pretty_default,
        args.output.as_deref(),
    );
    if failures > 0 {
        1
    } else {
        status
    }
}
