use serde::Deserialize;

pub const DEFAULT_FUNCTION_NAME: &str = "prettyPinkBike";
pub const DEFAULT_INDENT_UNIT: &str = "    ";
pub const DEFAULT_LINE_TERMINATOR: &str = "\r\n";

/// Everything besides the form that shapes the emitted text.
///
/// Generation is a pure function of `(FormDescriptor, GenerationOptions)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GenerationOptions {
    pub function_name: String,
    /// Emit `function name (options)` and root every access at `options`.
    pub use_options_object: bool,
    pub indent_unit: String,
    pub line_terminator: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            use_options_object: false,
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            line_terminator: DEFAULT_LINE_TERMINATOR.to_string(),
        }
    }
}

impl GenerationOptions {
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }
    pub fn with_options_object(mut self, yes: bool) -> Self {
        self.use_options_object = yes;
        self
    }
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }
    pub fn with_line_terminator(mut self, eol: impl Into<String>) -> Self {
        self.line_terminator = eol.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: GenerationOptions =
            serde_json::from_str(r#"{"functionName": "buildSignup", "useOptionsObject": true}"#).unwrap();
        assert_eq!(opts.function_name, "buildSignup");
        assert!(opts.use_options_object);
        assert_eq!(opts.indent_unit, "    ");
        assert_eq!(opts.line_terminator, "\r\n");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_str::<GenerationOptions>(r#"{"tab": "\t"}"#);
        assert!(res.is_err());
    }
}
