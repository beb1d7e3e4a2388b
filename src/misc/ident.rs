//! Identifier classifiers and name transforms

/// Returns true when `s` is a plain identifier:
/// `[A-Za-z_$][A-Za-z0-9_$]*`.
pub fn is_variable_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Returns true when `s` names a directive, i.e. starts with `$`.
pub fn is_directive_name(s: &str) -> bool {
    s.starts_with('$')
}

/// Converts a `snake_case`, `kebab-case`, or space-separated name to
/// camelCase. Leading separators are dropped; letter case after a
/// separator is forced upper.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Escapes regex metacharacters so `s` matches literally inside a
/// pattern.
pub fn escape_regex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
                | '/'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Unescapes an authored field name exactly once: `\$name` becomes
/// `$name` and `\\name` becomes `\name`. Any other name is returned
/// unchanged.
pub fn unescape_field_name(name: &str) -> String {
    if let Some(rest) = name.strip_prefix("\\$") {
        format!("${}", rest)
    } else if let Some(rest) = name.strip_prefix("\\\\") {
        format!("\\{}", rest)
    } else {
        name.to_string()
    }
}

/// Re-escapes a field name for display: the inverse of
/// [`unescape_field_name`]. Names that begin with `$` or `\` gain a
/// leading backslash so they cannot be read as directives.
pub fn escape_field_name(name: &str) -> String {
    if name.starts_with('$') || name.starts_with('\\') {
        format!("\\{}", name)
    } else {
        name.to_string()
    }
}
