//! Query command - Selector matching over markup documents

use clap::Args;
use rayon::prelude::*;

use axon_loom::Document;
use axon_retina::{query, query_one};

use crate::commands::{combine, emit, read_inputs};
use crate::config::load_config;

#[derive(Args)]
pub struct QueryArgs {
    /// CSS-like selector to match
    pub selector: String,

    /// Markup files or glob pattern(s); `-` (or nothing) reads stdin
    #[arg(default_value = "-")]
    pub patterns: Vec<String>,

    /// Return only the first match (null when nothing matches)
    #[arg(long)]
    pub one: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Quiet mode - suppress per-file diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: QueryArgs) -> i32 {
    let config = load_config(None);
    let (inputs, failures) = read_inputs(&args.patterns);
    if inputs.is_empty() {
        return 1;
    }

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
                Some(root) if args.one => {
                    serde_json::to_value(query_one(&root, &args.selector))
                        .unwrap_or(serde_json::Value::Null)
                }
                Some(root) => serde_json::to_value(query(&root, &args.selector))
                    .unwrap_or(serde_json::Value::Null),
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
        None,
    );
    if failures > 0 {
        1
    } else {
        status
    }
}
