//! Assembles the generated function and its default-value block.
//!
//! The per-field work is a fold: each named element yields its body line and
//! its default statement ([`FieldLines`]), and [`Accumulator::push`] threads
//! them into the growing body, the parameter set and the defaults queue.
use serde_json::Value;

use crate::args::ArgumentSet;
use crate::error::InvalidInputError;
use crate::form::FormDescriptor;
use crate::line::{attribute_comment, field_lines, FieldLines};
use crate::options::GenerationOptions;

/// Directives for the linter the generated script was written against. Kept
/// verbatim at the top of every output.
const LINT_DIRECTIVES: [&str; 2] = ["/*jslint white: true, sub: true*/", "/*globals FormData */"];

// ————————————————————————————————————————————————————————————————————————————
// FOLD STATE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    pub arguments: ArgumentSet,
    pub body: String,
    pub defaults: Vec<String>,
}

impl Accumulator {
    pub fn push(mut self, field: FieldLines) -> Self {
        if let Some(arg) = field.argument.as_deref() {
            self.arguments.insert(arg);
        }
        self.body.push_str(&field.line);
        self.defaults.push(field.default);
        self
    }

    /// Defaults in lexicographic order of the full statement text.
    pub fn sorted_defaults(&self) -> Vec<String> {
        let mut out = self.defaults.clone();
        out.sort();
        out
    }
}

/// Run the per-field fold over every named element of `form`.
pub fn collect_fields(form: &FormDescriptor, options: &GenerationOptions) -> Accumulator {
    form.elements
        .iter()
        .filter_map(|el| field_lines(el, options))
        .fold(Accumulator::default(), Accumulator::push)
}

// ————————————————————————————————————————————————————————————————————————————
// CODEGEN
// ————————————————————————————————————————————————————————————————————————————

pub struct Codegen<'a> {
    options: &'a GenerationOptions,
    out: String,
}

impl<'a> Codegen<'a> {
    pub fn new(options: &'a GenerationOptions) -> Self {
        Self { options, out: String::new() }
    }

    pub fn emit(&mut self, form: &FormDescriptor) {
        let tab = self.options.indent_unit.as_str();
        let eol = self.options.line_terminator.as_str();
        let acc = collect_fields(form, self.options);

        for directive in LINT_DIRECTIVES {
            self.out.push_str(directive);
            self.out.push_str(eol);
            self.out.push_str(eol);
        }
        self.out.push_str(&attribute_comment(&form.tag_name, &form.attributes, "", eol));

        let signature = acc.arguments.signature(self.options.use_options_object);
        self.out.push_str(&format!("function {} ({signature}) {{{eol}", self.options.function_name));
        self.out.push_str(&format!("{tab}\"use strict\";{eol}"));
        self.out.push_str(&format!("{tab}var formData = new FormData();{eol}{eol}"));
        self.out.push_str(&acc.body);
        self.out.push_str(&format!("{tab}{eol}{tab}return formData;{eol}"));
        self.out.push_str(&format!("}}{eol}{eol}"));
        self.out.push_str(&acc.sorted_defaults().join(eol));
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// Generate the builder function for an already-decoded form.
pub fn generate(form: &FormDescriptor, options: &GenerationOptions) -> String {
    let mut cg = Codegen::new(options);
    cg.emit(form);
    cg.into_string()
}

/// Validate `value` as a form descriptor, then generate.
///
/// Nothing is produced when the input is not form-shaped.
pub fn generate_from_value(value: &Value, options: &GenerationOptions) -> Result<String, InvalidInputError> {
    let form = FormDescriptor::from_value(value)?;
    Ok(generate(&form, options))
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
