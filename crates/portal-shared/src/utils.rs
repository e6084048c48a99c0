//! Utility functions

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        match local.chars().count() {
            0 => format!("***{}", domain),
            1 | 2 => format!("{}***{}", local.chars().next().unwrap_or('*'), domain),
            _ => format!("{}***{}", local.chars().take(2).collect::<String>(), domain),
        }
    } else {
        "***".to_string()
    }
}

/// Normalize a free-text search term: trimmed and lower-cased, `None` when blank.
pub fn normalize_search(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("admin@portal.dev"), "ad***@portal.dev");
        assert_eq!(mask_email("a@portal.dev"), "a***@portal.dev");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(Some("  Fern ")), Some("fern".to_string()));
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
    }
}
