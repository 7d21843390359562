use crate::definition::scope_path::is_name_continue;
use crate::definition::scope_path::is_name_start;
use crate::definition::ScopePathError;
use crate::definition::ScopeReference;
use std::collections::HashMap;

/// Fragments declared as `fragment on Type { .. }` are handed to the parser
/// under a generated name carrying this prefix. Names starting with `__` are
/// reserved by GraphQL, so they never collide with user-declared fragments.
pub(crate) const ANONYMOUS_FRAGMENT_NAME_PREFIX: &str = "__anonymous_fragment_";

/// Source text rewritten into plain GraphQL that [`graphql_parser`] accepts.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PreprocessedSource {
    /// Maps each rewritten spread name back to the scope reference that was
    /// written in the original source.
    pub(crate) qualified_spreads: HashMap<String, ScopeReference>,
    pub(crate) text: String,
}

pub(crate) fn is_anonymous_fragment_name(name: &str) -> bool {
    name.starts_with(ANONYMOUS_FRAGMENT_NAME_PREFIX)
}

/// Rewrite the two source forms that plain GraphQL has no syntax for:
///
/// * `...Scope::Path` and `...Scope::Path.localName` spreads. `::` becomes
///   `__` and `.` becomes `_` so that every column after the spread keeps its
///   position for error reporting.
/// * Anonymous fragments (`fragment on User { .. }`), which get a generated
///   name.
///
/// String literals, block strings and comments are copied verbatim.
pub(crate) fn preprocess(source: &str) -> Result<PreprocessedSource, ScopePathError> {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len() + 16);
    let mut copied_up_to = 0;
    let mut anonymous_fragment_count = 0;
    let mut brace_depth: usize = 0;
    let mut qualified_spreads = HashMap::new();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'#' => i = skip_comment(bytes, i),
            b'"' => i = skip_string(bytes, i),
            b'{' => {
                brace_depth += 1;
                i += 1;
            },
            b'}' => {
                brace_depth = brace_depth.saturating_sub(1);
                i += 1;
            },
            b'.' if bytes[i..].starts_with(b"...") => {
                let name_start = skip_ignored(bytes, i + 3);
                let name_end = scan_qualified_name(bytes, name_start);
                let written = &source[name_start..name_end];
                if written.contains("::") || written.contains('.') {
                    let reference: ScopeReference = written.parse()?;
                    let rewritten = written.replace("::", "__").replace('.', "_");
                    out.push_str(&source[copied_up_to..name_start]);
                    out.push_str(&rewritten);
                    copied_up_to = name_end;
                    qualified_spreads.insert(rewritten, reference);
                }
                i = name_end.max(i + 3);
            },
            byte if is_name_start(byte) => {
                let word_end = scan_name(bytes, i);
                let starts_word = i == 0 || !is_name_continue(bytes[i - 1]);
                if starts_word
                    && brace_depth == 0
                    && &source[i..word_end] == "fragment" {
                    let next_start = skip_ignored(bytes, word_end);
                    let next_end = scan_name(bytes, next_start);
                    if &source[next_start..next_end] == "on" {
                        out.push_str(&source[copied_up_to..word_end]);
                        out.push(' ');
                        out.push_str(ANONYMOUS_FRAGMENT_NAME_PREFIX);
                        out.push_str(&anonymous_fragment_count.to_string());
                        copied_up_to = word_end;
                        anonymous_fragment_count += 1;
                    }
                }
                i = word_end;
            },
            _ => i += 1,
        }
    }
    out.push_str(&source[copied_up_to..]);

    Ok(PreprocessedSource {
        qualified_spreads,
        text: out,
    })
}

fn scan_name(bytes: &[u8], start: usize) -> usize {
    if start >= bytes.len() || !is_name_start(bytes[start]) {
        return start;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_name_continue(bytes[end]) {
        end += 1;
    }
    end
}

/// `Name ("::" Name)* ("." Name)?`
fn scan_qualified_name(bytes: &[u8], start: usize) -> usize {
    let mut end = scan_name(bytes, start);
    if end == start {
        return start;
    }
    while bytes[end..].starts_with(b"::") {
        let segment_end = scan_name(bytes, end + 2);
        if segment_end == end + 2 {
            return end;
        }
        end = segment_end;
    }
    if end < bytes.len() && bytes[end] == b'.' && !bytes[end..].starts_with(b"...") {
        let local_end = scan_name(bytes, end + 1);
        if local_end > end + 1 {
            end = local_end;
        }
    }
    end
}

/// Whitespace, commas and comments are insignificant between GraphQL tokens.
fn skip_ignored(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' | b',' => i += 1,
            b'#' => i = skip_comment(bytes, i),
            _ => break,
        }
    }
    i
}

fn skip_comment(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_string(bytes: &[u8], start: usize) -> usize {
    if bytes[start..].starts_with(b"\"\"\"") {
        let mut i = start + 3;
        while i < bytes.len() {
            if bytes[i..].starts_with(b"\\\"\"\"") {
                i += 4;
            } else if bytes[i..].starts_with(b"\"\"\"") {
                return i + 3;
            } else {
                i += 1;
            }
        }
        return i;
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            b'\n' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}
