//! URL helpers for backend requests

/// Appends query parameters to `base`, skipping `None` values.
///
/// Keys and values are percent-encoded; a key already present in `base`
/// is replaced.
///
/// # Example
/// ```rust,ignore
/// let url = build_url("https://x.supabase.co/rest/v1/users", &[("select", Some("*"))]);
/// assert_eq!(url, "https://x.supabase.co/rest/v1/users?select=%2A");
/// ```
pub fn build_url(base: &str, params: &[(&str, Option<&str>)]) -> String {
    let (path, existing) = match base.split_once('?') {
        Some((path, query)) => (path, query),
        None => (base, ""),
    };

    let mut pairs: Vec<String> = existing
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            !params
                .iter()
                .any(|(k, v)| v.is_some() && urlencoding::encode(k) == key)
        })
        .map(str::to_string)
        .collect();

    for (key, value) in params {
        if let Some(value) = value {
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            ));
        }
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_skips_none() {
        assert_eq!(
            build_url("https://api.test/items", &[("page", Some("2")), ("q", None)]),
            "https://api.test/items?page=2"
        );
        assert_eq!(build_url("https://api.test/items", &[]), "https://api.test/items");
    }

    #[test]
    fn test_build_url_encodes_and_replaces() {
        assert_eq!(
            build_url(
                "https://api.test/items?page=1&sort=name",
                &[("page", Some("3")), ("q", Some("joint torique"))]
            ),
            "https://api.test/items?sort=name&page=3&q=joint%20torique"
        );
    }
}
