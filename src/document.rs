//! Finding the forms inside a larger document dump.
use serde_json::Value;

use crate::error::InvalidInputError;
use crate::form::{looks_like_form, FormDescriptor};

/// Call `apply` once per form contained in `doc`, in document order.
///
/// Accepted shapes:
/// - a form descriptor itself
/// - an array, whose form-like entries are visited (others are skipped)
/// - an object with a `forms` array, as produced by dumping `document.forms`
pub fn for_every_form(
    doc: &Value,
    mut apply: impl FnMut(usize, FormDescriptor),
) -> Result<usize, InvalidInputError> {
    let forms = forms_of(doc)?;
    let mut count = 0;
    for (index, value) in forms.into_iter().enumerate() {
        apply(index, FormDescriptor::from_value(value)?);
        count += 1;
    }
    Ok(count)
}

/// Decode every form in `doc` up front.
pub fn collect_forms(doc: &Value) -> Result<Vec<FormDescriptor>, InvalidInputError> {
    let mut out = Vec::new();
    for_every_form(doc, |_, form| out.push(form))?;
    Ok(out)
}

fn forms_of(doc: &Value) -> Result<Vec<&Value>, InvalidInputError> {
    if looks_like_form(doc) {
        return Ok(vec![doc])
    }
    match doc {
        Value::Array(items) => Ok(items.iter().filter(|v| looks_like_form(v)).collect()),
        Value::Object(obj) => match obj.get("forms") {
            Some(Value::Array(items)) => Ok(items.iter().collect()),
            Some(_) => Err(InvalidInputError::at("forms", "expected an array of forms")),
            None => FormDescriptor::from_value(doc).map(|_| Vec::new()),
        },
        _ => FormDescriptor::from_value(doc).map(|_| Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(id: &str) -> Value {
        json!({"tagName": "FORM", "attributes": {"id": id}, "elements": []})
    }

    fn ids(doc: &Value) -> Vec<String> {
        collect_forms(doc)
            .unwrap()
            .into_iter()
            .map(|f| f.attributes["id"].clone())
            .collect()
    }

    #[test]
    fn single_form() {
        assert_eq!(ids(&form("a")), ["a"]);
    }

    #[test]
    fn array_skips_non_forms() {
        let doc = json!([form("a"), {"tagName": "DIV"}, 3, form("b")]);
        assert_eq!(ids(&doc), ["a", "b"]);
    }

    #[test]
    fn forms_property() {
        let doc = json!({"title": "Signup", "forms": [form("x"), form("y")]});
        let mut seen = Vec::new();
        let n = for_every_form(&doc, |i, _| seen.push(i)).unwrap();
        assert_eq!(n, 2);
        assert_eq!(seen, [0, 1]);
    }

    #[test]
    fn forms_property_entries_must_be_forms() {
        let doc = json!({"forms": [form("x"), "nope"]});
        assert!(collect_forms(&doc).is_err());
    }

    #[test]
    fn anything_else_is_invalid() {
        assert!(collect_forms(&json!("form")).is_err());
        assert!(collect_forms(&json!({"tagName": "BODY"})).is_err());
        assert!(collect_forms(&json!({"forms": {}})).is_err());
    }
}
