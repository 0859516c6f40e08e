//! Minimal CLI: form dumps → (generated script | resolved field table)
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::{json, Value};

use crate::codegen::{collect_fields, generate};
use crate::document::collect_forms;
use crate::form::FormDescriptor;
use crate::line::field_lines;
use crate::options::GenerationOptions;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate FormData builder functions from JSON form descriptors
#[derive(Parser, Debug)]
#[command(name = "formdata-gen")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit one builder function per form found in the inputs
    Generate(GenerateOut),
    /// print how every field resolves, as JSON
    Inspect(InspectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON), one document per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /page/forms)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GenerationSettings {
    /// JSON file with a partial options bundle (functionName, useOptionsObject, indentUnit, lineTerminator)
    #[arg(long)]
    config: Option<PathBuf>,

    /// name of the generated function [default: prettyPinkBike]
    #[arg(long)]
    function_name: Option<String>,

    /// accept a single `options` object instead of one parameter per field
    #[arg(long)]
    options_object: bool,

    /// indentation unit [default: four spaces]
    #[arg(long)]
    indent: Option<String>,

    /// line terminator [default: crlf]
    #[arg(long, value_enum)]
    eol: Option<LineEnding>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LineEnding {
    Crlf,
    Lf,
    Cr,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation: GenerationSettings,

    /// output .js file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// report per-form field counts on stderr
    #[arg(short, long)]
    verbose: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation: GenerationSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One decoded form and where it came from.
struct SourcedForm {
    source: String,
    form: FormDescriptor,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
        }
    }
}

impl GenerationSettings {
    fn resolve(&self) -> Result<GenerationOptions> {
        let mut options = match self.config.as_ref() {
            None => GenerationOptions::default(),
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                crate::path_de::from_str_with_path::<GenerationOptions>(&source)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
        };
        if let Some(name) = self.function_name.as_ref() {
            options.function_name = name.clone();
        }
        if self.options_object {
            options.use_options_object = true;
        }
        if let Some(indent) = self.indent.as_ref() {
            options.indent_unit = indent.clone();
        }
        if let Some(eol) = self.eol {
            options.line_terminator = eol.as_str().to_string();
        }
        Ok(options)
    }
}

impl InputSettings {
    /// Every form in every input, in input order. Files are decoded in parallel.
    fn load_forms(&self) -> Result<Vec<SourcedForm>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let per_file = source_paths
            .par_iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }

    fn load_file(&self, source_path: &Path) -> Result<Vec<SourcedForm>> {
        let source_path_str = source_path.to_string_lossy().to_string();
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file {source_path_str}"))?;
        let documents = if self.ndjson {
            source
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(serde_json::from_str::<Value>)
                .collect::<Result<Vec<_>, _>>()
        } else {
            serde_json::from_str::<Value>(&source).map(|doc| vec![doc])
        };
        let documents = documents
            .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;

        let mut out = Vec::new();
        for document in documents {
            for document in self.preprocess(document, &source_path_str)? {
                let forms = collect_forms(&document)
                    .with_context(|| format!("no usable form in {source_path_str}"))?;
                out.extend(forms.into_iter().map(|form| SourcedForm {
                    source: source_path_str.clone(),
                    form,
                }));
            }
        }
        Ok(out)
    }

    fn preprocess(&self, document: Value, source_path_str: &str) -> Result<Vec<Value>> {
        let document = match self.json_pointer.as_ref() {
            None => document,
            Some(pointer) => match document.pointer(pointer) {
                Some(selected) => selected.clone(),
                None => bail!("JSON pointer {pointer} selects nothing in {source_path_str}"),
            },
        };
        match self.jq_expr.as_ref() {
            None => Ok(vec![document]),
            Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &document).with_context(|| {
                format!("failed to apply jq expression to source file ({source_path_str})")
            }),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let options = target.generation.resolve()?;
                let forms = target.input_settings.load_forms()?;
                if target.verbose {
                    for sourced in &forms {
                        report_form(sourced);
                    }
                }
                let separator = options.line_terminator.repeat(2);
                let js_src = forms
                    .par_iter()
                    .map(|sourced| generate(&sourced.form, &options))
                    .collect::<Vec<_>>()
                    .join(separator.as_str());
                write_output(target.out.as_deref(), &js_src, &options.line_terminator)
            }
            Command::Inspect(target) => {
                let options = target.generation.resolve()?;
                let forms = target.input_settings.load_forms()?;
                let report = forms
                    .iter()
                    .map(|sourced| inspect_form(sourced, &options))
                    .collect::<Vec<_>>();
                let report_src = serde_json::to_string_pretty(&report)?;
                write_output(target.out.as_deref(), &report_src, "\n")
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_form(sourced: &SourcedForm) {
    let label = sourced
        .form
        .attributes
        .get("id")
        .or_else(|| sourced.form.attributes.get("name"))
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "<anonymous form>".to_string());
    let named = sourced.form.named_elements().count();
    let skipped = sourced.form.unnamed_elements().count();
    eprintln!(
        "{} {} {}: {} fields, {}",
        "form".green().bold(),
        label.bold(),
        format!("({})", sourced.source).dimmed(),
        named,
        if skipped == 0 {
            "none skipped".dimmed()
        } else {
            format!("{skipped} unnamed skipped").yellow()
        },
    );
}

fn inspect_form(sourced: &SourcedForm, options: &GenerationOptions) -> Value {
    let acc = collect_fields(&sourced.form, options);
    let fields = sourced
        .form
        .named_elements()
        .filter_map(|el| {
            let lines = field_lines(el, options)?;
            Some(json!({
                "name": el.submitted_name(),
                "type": String::from(el.kind.clone()),
                "access": lines.access,
                "argument": lines.argument,
                "default": lines.default,
            }))
        })
        .collect::<Vec<_>>();
    json!({
        "source": sourced.source,
        "attributes": sourced.form.attributes,
        "signature": acc.arguments.signature(options.use_options_object),
        "fields": fields,
        "skipped": sourced.form.unnamed_elements().count(),
    })
}

/// Writes `src` followed by `eol`, so the whole output uses one line ending.
fn write_output(out: Option<&Path>, src: &str, eol: &str) -> Result<()> {
    let text = terminated(src, eol);
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, &text).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn terminated(src: &str, eol: &str) -> String {
    format!("{src}{eol}")
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
