/// Make `s` safe to place between single quotes in the generated script.
///
/// Backslashes are doubled first, then single quotes get a backslash. Every
/// occurrence is escaped, not just the first one.
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `'…'` around the escaped text.
pub fn quote(s: &str) -> String {
    format!("'{}'", escape_single_quoted(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quote() {
        assert_eq!(escape_single_quoted("O'Brien"), r"O\'Brien");
    }

    #[test]
    fn backslash_then_quote_escapes_both() {
        assert_eq!(escape_single_quoted(r"a\'b"), r"a\\\'b");
    }

    #[test]
    fn every_occurrence_is_escaped() {
        assert_eq!(escape_single_quoted(r"'x' \ \ 'y'"), r"\'x\' \\ \\ \'y\'");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_single_quoted("address[city]"), "address[city]");
        assert_eq!(quote(""), "''");
    }
}
