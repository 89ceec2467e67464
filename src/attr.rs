use crate::VMError;

/// Internal binding name for `self`, kept out of the user namespace so an
/// argument named `self` never collides with environment bookkeeping.
pub const SELF_MARKER: &str = "$";

#[inline]
pub(crate) fn fix_self(name: &str) -> &str {
    if name == "self" {
        SELF_MARKER
    } else {
        name
    }
}

/// Decoded form of a django-style attribute name.
///
/// ```
/// use tarn::AttrPath;
///
/// // a        -> key "a"
/// // _a       -> key "_a"
/// // a__b     -> key "a", attribute "b"
/// // a__b___c -> key "a", attributes "b" then "_c"
/// // __foo__  -> key "__foo__", dunder names stay opaque
/// assert_eq!(AttrPath::parse("a__b").unwrap(), AttrPath::Nested {
///     root: "a".to_string(),
///     attrs: vec!["b".to_string()],
/// });
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrPath {
    /// The whole name is one literal binding key.
    Literal(String),
    /// First segment is a binding key, the rest are attribute hops, the last
    /// of which is the target of a `set`.
    Nested { root: String, attrs: Vec<String> },
}

impl AttrPath {
    pub fn parse(name: &str) -> Result<AttrPath, VMError> {
        if name.is_empty() {
            return Err(VMError::DefinitionError("Empty attribute name".to_string()));
        }
        if name == "self" || name == SELF_MARKER {
            return Ok(AttrPath::Literal(SELF_MARKER.to_string()));
        }

        let segments = raw_segments(name);

        // Dunder-wrapped names (e.g. __init__) and single segments are used
        // verbatim, no attribute traversal.
        let dunder = segments
            .first()
            .is_some_and(|s| s.starts_with("__"))
            && segments.last().is_some_and(|s| s == "__");
        if dunder || segments.len() == 1 {
            return Ok(AttrPath::Literal(name.to_string()));
        }

        let mut it = segments.into_iter();
        let root = match it.next() {
            Some(root) => fix_self(&root).to_string(),
            None => return Err(VMError::DefinitionError(format!("Invalid attribute name {name}"))),
        };

        // A bare "_" segment glues onto the next one: "a___b" reads as a._b
        let mut attrs = Vec::new();
        while let Some(segment) = it.next() {
            let mut attr = strip_separator(&segment).to_string();
            let mut current = segment;
            while current == "_" {
                current = match it.next() {
                    Some(s) => s,
                    None => {
                        return Err(VMError::DefinitionError(format!(
                            "Trailing underscore in attribute name {name}"
                        )))
                    }
                };
                attr.push_str(strip_separator(&current));
            }
            attrs.push(attr);
        }

        Ok(AttrPath::Nested { root, attrs })
    }
}

#[inline]
fn strip_separator(segment: &str) -> &str {
    segment.strip_prefix("__").unwrap_or(segment)
}

/// Split a name into the shortest runs that end right before a `__`
/// separator or the end of the string, the `\w+?(?=__|$)` scan.
fn raw_segments(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let n = chars.len();
    let mut segments = Vec::new();
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && !(j + 1 < n && chars[j] == '_' && chars[j + 1] == '_') {
            j += 1;
        }
        segments.push(chars[i..j].iter().collect());
        i = j;
    }
    segments
}
