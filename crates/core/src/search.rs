//! Helpers for list filtering: `ILIKE` patterns and whitelisted sorting.

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse `asc` / `desc` (case-insensitive), falling back to `default`.
    pub fn parse_or(value: Option<&str>, default: SortOrder) -> SortOrder {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            _ => default,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolve a requested sort column against a whitelist.
///
/// Unknown or missing columns fall back to `default`. The returned value is
/// always one of the whitelisted literals and is safe to interpolate.
pub fn resolve_sort_column<'a>(
    requested: Option<&str>,
    allowed: &[&'a str],
    default: &'a str,
) -> &'a str {
    requested
        .and_then(|r| allowed.iter().copied().find(|a| *a == r.trim()))
        .unwrap_or(default)
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build a `%term%` substring pattern, or `None` for a blank search.
pub fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term?.trim();
    if term.is_empty() {
        return None;
    }
    Some(format!("%{}%", escape_like(term)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_parsing() {
        assert_eq!(SortOrder::parse_or(Some("ASC"), SortOrder::Desc), SortOrder::Asc);
        assert_eq!(SortOrder::parse_or(Some("nope"), SortOrder::Desc), SortOrder::Desc);
        assert_eq!(SortOrder::parse_or(None, SortOrder::Asc), SortOrder::Asc);
    }

    #[test]
    fn sort_column_whitelist() {
        let allowed = ["created_at", "title"];
        assert_eq!(resolve_sort_column(Some("title"), &allowed, "created_at"), "title");
        assert_eq!(
            resolve_sort_column(Some("title; DROP TABLE users"), &allowed, "created_at"),
            "created_at"
        );
        assert_eq!(resolve_sort_column(None, &allowed, "created_at"), "created_at");
    }

    #[test]
    fn like_escaping() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(like_pattern(Some("  hand ")).as_deref(), Some("%hand%"));
        assert_eq!(like_pattern(Some("   ")), None);
        assert_eq!(like_pattern(None), None);
    }
}
