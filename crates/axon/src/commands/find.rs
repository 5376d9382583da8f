//! Find command - Role and accessible-name lookup over built trees

use clap::Args;
use rayon::prelude::*;

use axon_loom::Document;
use axon_retina::{build, find_by_name, find_by_role};

use crate::commands::{combine, emit, read_inputs};
use crate::config::load_config;

#[derive(Args)]
pub struct FindArgs {
    /// Match nodes with exactly this computed role
    #[arg(long)]
    pub role: Option<String>,

    /// Match nodes whose accessible name contains this text
    #[arg(long)]
    pub name: Option<String>,

    /// Require the accessible name to match exactly
    #[arg(long, requires = "name")]
    pub exact: bool,

    /// Markup files or glob pattern(s); `-` (or nothing) reads stdin
    #[arg(default_value = "-")]
    pub patterns: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Quiet mode - suppress per-file diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: FindArgs) -> i32 {
    if args.role.is_none() && args.name.is_none() {
        eprintln!("find requires --role and/or --name");
        return 2;
    }

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
                Some(root) => {
                    let tree = build(&root);
                    let nodes = match (&args.role, &args.name) {
                        (Some(role), None) => find_by_role(&tree, role),
                        (None, Some(name)) => find_by_name(&tree, name, args.exact),
                        (Some(role), Some(name)) => find_by_role(&tree, role)
                            .into_iter()
                            .filter(|node| {
                                if args.exact {
                                    node.name == name.as_str()
                                } else {
                                    node.name.contains(name.as_str())
                                }
                            })
                            .collect(),
                        (None, None) => Vec::new(),
                    };
                    serde_json::to_value(&nodes).unwrap_or(serde_json::Value::Null)
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
        None,
    );
    if failures > 0 {
        1
    } else {
        status
    }
}
