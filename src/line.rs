//! Per-field output: the annotated `formData.append` line and the matching
//! default-value statement.
use crate::escape::{escape_single_quoted, quote};
use crate::form::{Attributes, ElementKind, FormElementDescriptor};
use crate::options::GenerationOptions;
use crate::path::{resolve, Root};

/// Stand-in for file contents, which cannot be defaulted.
pub const PLACEHOLDER_BLOB: &str =
    "new Blob(['here is a simple text file'],{ 'type' : 'text/plain' })";

/// Everything one named field contributes to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLines {
    /// Comment block plus append statement, indented and terminated.
    pub line: String,
    pub default: String,
    /// Access expression used in both `line` and `default`.
    pub access: String,
    /// Top-level parameter to register (positional mode only).
    pub argument: Option<String>,
}

/// `/** … */` block listing an element's attributes.
///
/// `pad` is placed before every continuation line so the block lines up with
/// the body it sits in; the opening `/**` is left for the caller to indent.
pub fn attribute_comment(tag_name: &str, attributes: &Attributes, pad: &str, eol: &str) -> String {
    let separator = format!("{eol}{pad} * ");
    let listed = attributes
        .iter()
        .map(|(name, value)| format!("{name} : {value}"))
        .collect::<Vec<_>>()
        .join(separator.as_str());
    format!("/**{eol}{pad} * {tag_name} attributes: {eol}{pad} * {listed}{eol}{pad} */{eol}")
}

/// The example assignment for one field.
pub fn default_value(access: &str, element: &FormElementDescriptor) -> String {
    let assignment = format!("{access} = {};", quote(&element.value));
    match element.kind {
        ElementKind::File => format!("// {access} = {PLACEHOLDER_BLOB};"),
        ElementKind::Checkbox if !element.checked => format!("// {assignment}"),
        ElementKind::Checkbox | ElementKind::Other(_) => assignment,
    }
}

/// Lines for one element, or `None` when it has no name.
pub fn field_lines(element: &FormElementDescriptor, options: &GenerationOptions) -> Option<FieldLines> {
    let name = element.submitted_name()?;
    let root = Root::for_options_object(options.use_options_object);
    let resolved = resolve(name, root);
    let tab = options.indent_unit.as_str();
    let eol = options.line_terminator.as_str();

    let comment = attribute_comment(&element.tag_name, &element.attributes, tab, eol);
    let line = format!(
        "{tab}{comment}{tab}formData.append('{}', {});{eol}",
        escape_single_quoted(name),
        resolved.access,
    );
    let default = default_value(&resolved.access, element);
    Some(FieldLines { line, default, access: resolved.access, argument: resolved.argument })
}
