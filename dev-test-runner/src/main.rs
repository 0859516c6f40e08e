//! Runs the generator over every fixture under a directory and checks the
//! structural properties of the output that unit tests can't cover at scale.
//!
//! Usage: `cargo run -p dev-test-runner -- [fixtures-dir]` (defaults to `fixtures`).
use std::path::{Path, PathBuf};

use colored::Colorize;
use formdata_gen::{generate, for_every_form, FormDescriptor, GenerationOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^function ([A-Za-z_$][\w$]*) \(([^)]*)\) \{$").unwrap());

fn main() {
    let dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("fixtures"));
    let mut fixtures = match std::fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect::<Vec<_>>(),
        Err(error) => {
            eprintln!("{} cannot read {}: {error}", "error:".red().bold(), dir.display());
            std::process::exit(2);
        }
    };
    fixtures.sort();

    let mut failures = 0usize;
    for path in &fixtures {
        for problem in check_fixture(path) {
            failures += 1;
            eprintln!("{} {}: {problem}", "FAIL".red().bold(), path.display());
        }
    }
    if failures > 0 {
        eprintln!("{failures} problem(s) in {} fixture(s)", fixtures.len());
        std::process::exit(1);
    }
    eprintln!("{} {} fixture(s)", "ok".green().bold(), fixtures.len());
}

fn check_fixture(path: &Path) -> Vec<String> {
    let source = match std::fs::read_to_string(path) {
        Ok(x) => x,
        Err(error) => return vec![format!("read failed: {error}")],
    };
    let doc = match serde_json::from_str::<serde_json::Value>(&source) {
        Ok(x) => x,
        Err(error) => return vec![format!("not JSON: {error}")],
    };
    let mut problems = Vec::new();
    let visited = for_every_form(&doc, |index, form| {
        for use_options_object in [false, true] {
            let options = GenerationOptions::default()
                .with_options_object(use_options_object)
                .with_line_terminator("\n");
            for problem in check_form(&form, &options) {
                problems.push(format!("form #{index} (options object: {use_options_object}): {problem}"));
            }
        }
    });
    if let Err(error) = visited {
        problems.push(error.to_string());
    }
    problems
}

fn check_form(form: &FormDescriptor, options: &GenerationOptions) -> Vec<String> {
    let mut problems = Vec::new();
    let src = generate(form, options);
    if src != generate(form, options) {
        problems.push("output is not deterministic".to_string());
    }

    match SIGNATURE.captures(&src) {
        None => problems.push("no function signature found".to_string()),
        Some(caps) => {
            if &caps[1] != options.function_name {
                problems.push(format!("function is named {}", &caps[1]));
            }
            let params = caps[2].split(", ").filter(|p| !p.is_empty()).collect::<Vec<_>>();
            if options.use_options_object && params != ["options"] {
                problems.push(format!("expected (options), got ({})", &caps[2]));
            }
            let mut unique = params.clone();
            unique.sort_unstable();
            unique.dedup();
            if unique.len() != params.len() {
                problems.push(format!("duplicate parameters in ({})", &caps[2]));
            }
        }
    }

    let appends = src.matches("formData.append(").count();
    let named = form.named_elements().count();
    if appends != named {
        problems.push(format!("{appends} append statements for {named} named fields"));
    }

    let defaults = src
        .split_once("}\n\n")
        .map(|(_, tail)| tail.lines().collect::<Vec<_>>())
        .unwrap_or_default();
    if defaults.len() != named {
        problems.push(format!("{} default lines for {named} named fields", defaults.len()));
    }
    if defaults.windows(2).any(|w| w[0] > w[1]) {
        problems.push("default block is not sorted".to_string());
    }
    problems
}
