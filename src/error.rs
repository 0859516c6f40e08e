use thiserror::Error;

/// The input handed to the generator is not a form descriptor.
///
/// This is the only failure the generator reports. Unnamed fields, unknown
/// element types and missing attributes are ordinary form contents and are
/// handled by policy, never by an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input{}: {message}", path_suffix(.path))]
pub struct InvalidInputError {
    pub message: String,
    /// JSON path of the offending node, when the failure is structural.
    pub path: Option<String>,
}

impl InvalidInputError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), path: None }
    }
    pub fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { message: message.into(), path: Some(path.into()) }
    }
}

fn path_suffix(path: &Option<String>) -> String {
    match path {
        Some(p) if !p.is_empty() && p != "." => format!(" at {p}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_when_present() {
        let err = InvalidInputError::at("elements[2].checked", "expected a boolean");
        assert_eq!(err.to_string(), "invalid input at elements[2].checked: expected a boolean");
        let err = InvalidInputError::new("form must be an object");
        assert_eq!(err.to_string(), "invalid input: form must be an object");
    }
}
