// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of the `Link` response header used by GitHub for pagination.

use crate::error::SummaryError;

/// Extract the `rel="next"` target from a raw `Link` header.
///
/// Returns `Ok(None)` when the header has no next relation, which is how GitHub
/// marks the last page.
pub fn next_link(header: &str) -> Result<Option<String>, SummaryError> {
    for entry in split_entries(header) {
        let mut parts = entry.split(';').map(str::trim);
        let target = parts.next().unwrap_or_default();

        let is_next = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_ascii_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });
        if !is_next {
            continue;
        }

        let url = target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .ok_or_else(|| {
                SummaryError::Parse(format!("next link target is not enclosed in <>: {}", entry))
            })?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(SummaryError::Parse(format!(
                "next link target is not an absolute URL: {}",
                url
            )));
        }
        return Ok(Some(url.to_string()));
    }

    Ok(None)
}

/// Split on commas that separate entries, leaving commas inside `<...>` alone.
fn split_entries(header: &str) -> impl Iterator<Item = &str> {
    let mut entries = Vec::new();
    let mut in_target = false;
    let mut start = 0;
    for (i, c) in header.char_indices() {
        match c {
            '<' => in_target = true,
            '>' => in_target = false,
            ',' if !in_target => {
                entries.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);
    entries.into_iter().map(str::trim).filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_link_header() {
        let header = r#"<https://api.github.com/repositories/1/releases?per_page=50&page=2>; rel="next", <https://api.github.com/repositories/1/releases?per_page=50&page=3>; rel="last""#;
        assert_eq!(
            next_link(header).unwrap().as_deref(),
            Some("https://api.github.com/repositories/1/releases?per_page=50&page=2")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let header = r#"<https://api.github.com/repositories/1/releases?per_page=50&page=1>; rel="first", <https://api.github.com/repositories/1/releases?per_page=50&page=2>; rel="prev""#;
        assert_eq!(next_link(header).unwrap(), None);
        assert_eq!(next_link("").unwrap(), None);
    }

    #[test]
    fn test_next_not_first_entry() {
        let header = r#"<https://example.com/?page=1>; rel="prev", <https://example.com/?page=3>; rel="next""#;
        assert_eq!(
            next_link(header).unwrap().as_deref(),
            Some("https://example.com/?page=3")
        );
    }

    #[test]
    fn test_case_and_quoting() {
        let header = r#"<https://example.com/?page=2>; REL=Next"#;
        assert_eq!(
            next_link(header).unwrap().as_deref(),
            Some("https://example.com/?page=2")
        );

        let header = r#"<https://example.com/?page=2>; rel="Next""#;
        assert!(next_link(header).unwrap().is_some());
    }

    #[test]
    fn test_multiple_relations() {
        let header = r#"<https://example.com/?page=2>; rel="next last""#;
        assert_eq!(
            next_link(header).unwrap().as_deref(),
            Some("https://example.com/?page=2")
        );
    }

    #[test]
    fn test_comma_inside_target() {
        let header = r#"<https://example.com/?q=a,b&page=2>; rel="next""#;
        assert_eq!(
            next_link(header).unwrap().as_deref(),
            Some("https://example.com/?q=a,b&page=2")
        );
    }

    #[test]
    fn test_malformed_next() {
        let err = next_link(r#"https://example.com/?page=2; rel="next""#).unwrap_err();
        assert!(matches!(err, SummaryError::Parse(_)));

        let err = next_link(r#"</relative?page=2>; rel="next""#).unwrap_err();
        assert!(matches!(err, SummaryError::Parse(_)));
    }

    #[test]
    fn test_malformed_non_next_entry_is_ignored() {
        let header = r#"garbage; rel="prev", <https://example.com/?page=2>; rel="next""#;
        assert!(next_link(header).unwrap().is_some());
    }
}
