//! Filename handling for uploaded files.

/// Longest accepted extension, dot included.
const MAX_EXTENSION_LEN: usize = 33;

/// Extension of `filename` including the leading dot, taken from the last
/// path component. Empty when the name has no dot.
///
/// `"photo.PNG"` gives `".PNG"`, `"archive."` gives `"."`, `"README"` gives `""`.
pub fn file_extension(filename: &str) -> &str {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}

/// An extension is usable when it has at least one character after the dot
/// and consists of ASCII letters and digits only.
pub fn is_valid_extension(extension: &str) -> bool {
    match extension.strip_prefix('.') {
        Some(rest) => {
            !rest.is_empty()
                && extension.len() <= MAX_EXTENSION_LEN
                && rest.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

/// Stored names are bare file names: no separators, no parent references.
pub(crate) fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
