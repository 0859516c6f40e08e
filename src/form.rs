//! Read-only form descriptors, as handed over by whatever walked the document.
//!
//! The generator never looks at a live DOM. It consumes a plain description
//! of a form: its own tag and attributes (for the header comment) and the
//! ordered list of its elements.
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::InvalidInputError;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Attribute name → value, in document order.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: Attributes,
    pub elements: Vec<FormElementDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormElementDescriptor {
    /// Possibly bracketed (`address[city]`). Empty or absent means the element
    /// would not submit anything and is skipped.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// `null` reads as empty, like an unset DOM value.
    #[serde(deserialize_with = "null_as_empty")]
    pub value: String,
    /// Only meaningful for checkboxes.
    pub checked: bool,
    #[serde(deserialize_with = "null_as_empty")]
    pub tag_name: String,
    pub attributes: Attributes,
}

/// The element categories the default synthesis distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ElementKind {
    File,
    Checkbox,
    /// text, select-one, textarea, hidden, … all treated alike.
    Other(String),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Default for ElementKind {
    fn default() -> Self {
        ElementKind::Other("text".to_string())
    }
}

impl From<String> for ElementKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "file" => ElementKind::File,
            "checkbox" => ElementKind::Checkbox,
            _ => ElementKind::Other(raw),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::File => "file".to_string(),
            ElementKind::Checkbox => "checkbox".to_string(),
            ElementKind::Other(raw) => raw,
        }
    }
}

impl FormElementDescriptor {
    /// The element's name, if it has a non-empty one.
    pub fn submitted_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl FormDescriptor {
    /// Elements that contribute to the generated function, in order.
    pub fn named_elements(&self) -> impl Iterator<Item = &FormElementDescriptor> {
        self.elements.iter().filter(|el| el.submitted_name().is_some())
    }

    /// Elements that are skipped because they carry no name.
    pub fn unnamed_elements(&self) -> impl Iterator<Item = &FormElementDescriptor> {
        self.elements.iter().filter(|el| el.submitted_name().is_none())
    }

    /// Check that `value` is form-shaped and decode it.
    ///
    /// The root must be an object whose `tagName` is `form` (any case) and
    /// which carries an `elements` array. Everything else is rejected before
    /// any generation happens.
    pub fn from_value(value: &Value) -> Result<Self, InvalidInputError> {
        if !looks_like_form(value) {
            return Err(InvalidInputError::new(format!(
                "form must be a form descriptor, found {}",
                describe(value)
            )));
        }
        crate::path_de::from_value_with_path(value)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// Cheap shape test used both for validation and for document enumeration.
pub fn looks_like_form(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false
    };
    let is_form_tag = obj
        .get("tagName")
        .and_then(Value::as_str)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("form"));
    is_form_tag && obj.get("elements").is_some_and(Value::is_array)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(obj) => match obj.get("tagName").and_then(Value::as_str) {
            Some(tag) if tag.eq_ignore_ascii_case("form") => {
                format!("a <{tag}> without an `elements` array")
            }
            Some(tag) => format!("a <{tag}> element"),
            None => "an object without `tagName`".to_string(),
        },
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_elements_with_defaults() {
        let form = FormDescriptor::from_value(&json!({
            "tagName": "FORM",
            "attributes": {"id": "signup", "method": "post"},
            "elements": [
                {"name": "email", "type": "email", "value": "a@b.com"},
                {"name": "subscribe", "type": "CHECKBOX", "checked": true},
                {"type": "submit"},
            ]
        }))
        .unwrap();
        assert_eq!(form.elements.len(), 3);
        assert_eq!(form.elements[0].kind, ElementKind::Other("email".into()));
        assert_eq!(form.elements[1].kind, ElementKind::Checkbox);
        assert!(form.elements[1].checked);
        assert_eq!(form.elements[1].value, "");
        assert_eq!(form.named_elements().count(), 2);
        assert_eq!(form.unnamed_elements().count(), 1);
        let keys: Vec<_> = form.attributes.keys().cloned().collect();
        assert_eq!(keys, ["id", "method"]);
    }

    #[test]
    fn missing_type_is_text() {
        let el: FormElementDescriptor = serde_json::from_value(json!({"name": "q"})).unwrap();
        assert_eq!(el.kind, ElementKind::Other("text".into()));
    }

    #[test]
    fn null_value_reads_as_empty() {
        let form = FormDescriptor::from_value(&json!({
            "tagName": "FORM",
            "elements": [{"name": "note", "value": null, "tagName": null}]
        }))
        .unwrap();
        assert_eq!(form.elements[0].value, "");
        assert_eq!(form.elements[0].tag_name, "");
    }

    #[test]
    fn empty_name_is_not_submitted() {
        let el: FormElementDescriptor = serde_json::from_value(json!({"name": ""})).unwrap();
        assert_eq!(el.submitted_name(), None);
    }

    #[test]
    fn rejects_non_forms() {
        let err = FormDescriptor::from_value(&json!("<form></form>")).unwrap_err();
        assert!(err.message.contains("a string"), "{err}");

        let err = FormDescriptor::from_value(&json!({"tagName": "DIV", "elements": []})).unwrap_err();
        assert!(err.message.contains("<DIV>"), "{err}");

        assert!(FormDescriptor::from_value(&json!({"tagName": "form"})).is_err());
    }

    #[test]
    fn structural_errors_carry_a_path() {
        let err = FormDescriptor::from_value(&json!({
            "tagName": "form",
            "elements": [{"name": "a"}, {"name": "b", "checked": "yes"}]
        }))
        .unwrap_err();
        assert_eq!(err.path.as_deref(), Some("elements[1].checked"));
    }
}
