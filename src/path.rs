//! Bracket-notation field names → access expressions in the generated body.
//!
//! `a[b][c]` is read as the path `a` → `b` → `c`. In positional mode the
//! base `a` is a parameter of the generated function and the rest become
//! quoted lookups: `a['b']['c']`. In options mode everything hangs off the
//! single `options` parameter: `options['a']['b']['c']`.
use crate::escape::escape_single_quoted;

pub const OPTIONS_PARAM: &str = "options";

/// Where access expressions start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    /// One parameter per top-level name.
    Positional,
    /// A single `options` parameter.
    Options,
}

/// A field name split into its bracket segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath<'a> {
    pub base: &'a str,
    pub rest: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Expression that reads the field's value inside the generated function.
    pub access: String,
    /// Parameter the field hangs off, in positional mode.
    pub argument: Option<String>,
}

impl Root {
    pub fn for_options_object(use_options_object: bool) -> Self {
        if use_options_object { Root::Options } else { Root::Positional }
    }
}

impl<'a> FieldPath<'a> {
    /// Split on `[`, dropping the closing `]` of each segment.
    pub fn parse(name: &'a str) -> Self {
        let mut segments = name.split('[').map(|seg| seg.strip_suffix(']').unwrap_or(seg));
        let base = segments.next().unwrap_or_default();
        Self { base, rest: segments.collect() }
    }

    /// Render the path as a lookup chain rooted at `root`.
    ///
    /// In positional mode the chain needs an identifier to start from, so
    /// leading empty segments (`[x][y]`) are passed over and the first named
    /// one becomes the head: `x['y']`.
    pub fn access(&self, root: Root) -> String {
        let segments = std::iter::once(self.base).chain(self.rest.iter().copied());
        match root {
            Root::Positional => {
                let mut segments = segments.skip_while(|seg| seg.is_empty());
                let head = segments.next().unwrap_or_default().to_string();
                append_lookups(head, segments)
            }
            Root::Options => append_lookups(OPTIONS_PARAM.to_string(), segments),
        }
    }
}

/// The parameter a positional-mode field contributes: everything before the
/// first `[`.
pub fn top_level_argument(name: &str) -> &str {
    name.split('[').next().unwrap_or_default()
}

pub fn resolve(name: &str, root: Root) -> Resolved {
    let access = FieldPath::parse(name).access(root);
    let argument = match root {
        Root::Positional => Some(top_level_argument(name).to_string()),
        Root::Options => None,
    };
    Resolved { access, argument }
}

fn append_lookups<'s>(head: String, segments: impl Iterator<Item = &'s str>) -> String {
    segments.fold(head, |mut expr, seg| {
        expr.push_str(&lookup(seg));
        expr
    })
}

fn lookup(segment: &str) -> String {
    format!("['{}']", escape_single_quoted(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names() {
        let r = resolve("email", Root::Positional);
        assert_eq!(r.access, "email");
        assert_eq!(r.argument.as_deref(), Some("email"));

        let r = resolve("email", Root::Options);
        assert_eq!(r.access, "options['email']");
        assert_eq!(r.argument, None);
    }

    #[test]
    fn nested_names_nest_left_to_right() {
        let r = resolve("a[b][c]", Root::Positional);
        assert_eq!(r.access, "a['b']['c']");
        assert_eq!(r.argument.as_deref(), Some("a"));

        assert_eq!(resolve("a[b][c]", Root::Options).access, "options['a']['b']['c']");
    }

    #[test]
    fn segments_are_escaped() {
        assert_eq!(resolve("who[O'Brien]", Root::Positional).access, r"who['O\'Brien']");
        assert_eq!(resolve("O'Brien", Root::Options).access, r"options['O\'Brien']");
    }

    #[test]
    fn empty_segments_are_kept() {
        // `tags[]` is the usual "array of values" convention.
        assert_eq!(resolve("tags[]", Root::Positional).access, "tags['']");
        assert_eq!(resolve("tags[][]", Root::Options).access, "options['tags']['']['']");
        let path = FieldPath::parse("tags[]");
        assert_eq!(path.base, "tags");
        assert_eq!(path.rest, [""]);
    }

    #[test]
    fn only_a_trailing_bracket_is_dropped() {
        assert_eq!(FieldPath::parse("a[b]]").rest, ["b]"]);
    }

    #[test]
    fn positional_chain_starts_at_first_named_segment() {
        assert_eq!(resolve("[x]", Root::Positional).access, "x");
        assert_eq!(resolve("[x][y]", Root::Positional).access, "x['y']");
        assert_eq!(resolve("[x][]", Root::Positional).access, "x['']");
        assert_eq!(resolve("[]", Root::Positional).access, "");
        // the options root is always an identifier, nothing to skip
        assert_eq!(resolve("[x]", Root::Options).access, "options['']['x']");
    }

    #[test]
    fn argument_is_prefix_before_first_bracket() {
        assert_eq!(top_level_argument("address[city]"), "address");
        assert_eq!(top_level_argument("plain"), "plain");
        assert_eq!(top_level_argument("[x]"), "");
    }
}
