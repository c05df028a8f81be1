//! URL slug derivation.

use crate::error::CoreError;

/// Derive a URL slug: lowercase ASCII alphanumerics, every other run of
/// characters collapsed into a single `-`, no leading or trailing `-`.
pub fn slugify(text: &str) -> Result<String, CoreError> {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "Cannot derive a slug from '{text}'"
        )));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic() {
        assert_eq!(slugify("Hello World").unwrap(), "hello-world");
    }

    #[test]
    fn collapses_separators_and_trims() {
        assert_eq!(slugify("  --Sign  Language: 101!! ").unwrap(), "sign-language-101");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Huruf Ä & B").unwrap(), "huruf-b");
    }

    #[test]
    fn empty_slug_is_error() {
        assert!(slugify("!!!").is_err());
        assert!(slugify("").is_err());
    }
}
