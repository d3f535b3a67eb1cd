//! Character-set checks for values that end up inside the helper's shell
//! command line or in engine request paths.

/// Docker's own rule for volume names: `[a-zA-Z0-9][a-zA-Z0-9_.-]*`.
pub(crate) fn is_valid_volume_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => chars.all(is_name_char),
        _ => false,
    }
}

/// Container names or ids, as accepted in an engine request path.
pub(crate) fn is_valid_reference(reference: &str) -> bool {
    !reference.is_empty() && reference.chars().all(is_name_char)
}

/// An absolute path made only of characters the shell treats literally.
pub(crate) fn is_plain_absolute_path(path: &str) -> bool {
    path.starts_with('/') && path.chars().all(|c| is_name_char(c) || c == '/')
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}
