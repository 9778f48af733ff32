//! Check `validate` tag expressions: grammar and constraint names.
//!
//! Usage:
//!   check_tags [OPTIONS] [FILE ...]
//!   check_tags < tags.txt
//!
//! Input holds one tag per line. Blank lines and lines starting with `#` are skipped.
//! Argument values are not interpreted here since their meaning depends on the field type.
//!
//! Options:
//!   --human, -H  Human-readable output
//!   --list, -l   Print the registered constraint names and exit
//!
//! Exit code 1 if any tag is invalid or a file cannot be read. Set `RUST_LOG=debug` for
//! per-tag diagnostics on stderr.

use std::io::{self, Read};
use std::path::Path;
use tagvalidate::{check_tag, registry, ValidationError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy)]
enum OutputStyle {
    Compact,
    Human,
}

struct Finding {
    line: usize,
    tag: String,
    error: ValidationError,
}

fn print_finding(path: &str, f: &Finding, style: OutputStyle) {
    match style {
        OutputStyle::Compact => {
            println!("{}:{}: error: {}", path, f.line, f.error);
        }
        OutputStyle::Human => {
            println!("  {}:{}: {}", path, f.line, f.tag);
            println!("    {}", f.error);
        }
    }
}

/// Check every tag line in `src`; returns (tags checked, findings).
fn check_source(src: &str) -> (usize, Vec<Finding>) {
    let mut checked = 0usize;
    let mut findings = Vec::new();
    for (i, line) in src.lines().enumerate() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        checked += 1;
        match check_tag(line, registry()) {
            Ok(clauses) => debug!(line = i + 1, clauses = clauses.len(), "tag ok"),
            Err(error) => findings.push(Finding {
                line: i + 1,
                tag: line.to_string(),
                error,
            }),
        }
    }
    (checked, findings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--list" || a == "-l") {
        for name in registry().names() {
            println!("{}", name);
        }
        return Ok(());
    }
    let style = if let Some(pos) = args.iter().position(|a| a == "--human" || a == "-H") {
        args.remove(pos);
        OutputStyle::Human
    } else {
        OutputStyle::Compact
    };

    let mut has_error = false;
    let mut total_checked = 0usize;
    let mut total_invalid = 0usize;

    let mut inputs: Vec<(String, String)> = Vec::new();
    if args.is_empty() {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src)?;
        inputs.push(("<stdin>".to_string(), src));
    } else {
        for path in &args {
            let path = Path::new(path);
            match std::fs::read_to_string(path) {
                Ok(src) => inputs.push((path.display().to_string(), src)),
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    has_error = true;
                }
            }
        }
    }

    for (name, src) in &inputs {
        let (checked, findings) = check_source(src);
        total_checked += checked;
        total_invalid += findings.len();
        for f in &findings {
            print_finding(name, f, style);
        }
    }

    eprintln!("check_tags: {} tag(s), {} invalid", total_checked, total_invalid);
    if has_error || total_invalid > 0 {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comment_lines() {
        let (checked, findings) = check_source("# header\n\nmin:1;max:5\n   \nin:a,b\n");
        assert_eq!(checked, 2);
        assert!(findings.is_empty());
    }

    #[test]
    fn reports_line_numbers() {
        let (checked, findings) = check_source("len:3\nlen 3\nfoo:1\n");
        assert_eq!(checked, 3);
        let lines: Vec<_> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert_eq!(findings[1].error, ValidationError::unsupported_tag("foo"));
    }
}
