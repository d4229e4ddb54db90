//! String helpers for labels and identifiers.

/// First letter upper case, the rest lower case
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Capitalizes every whitespace-separated word, keeping the separators
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();
    for c in s.chars() {
        if c.is_whitespace() {
            out.push_str(&capitalize(&word));
            word.clear();
            out.push(c);
        } else {
            word.push(c);
        }
    }
    out.push_str(&capitalize(&word));
    out
}

/// Cuts to `length` characters and appends "..." when something was cut
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let cut: String = text.chars().take(length).collect();
    format!("{cut}...")
}

fn fold_accent(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(folded)
}

/// "Pièces détachées & co" -> "pieces-detachees-co"
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        let c = fold_accent(c).unwrap_or(c);
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// "Jean", "Dupont" -> "JD"
pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .next()
        .into_iter()
        .chain(last_name.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("rOULEMENT"), "Roulement");
        assert_eq!(capitalize("élevée"), "Élevée");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("joint  TORIQUE nbr"), "Joint  Torique Nbr");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Courroie", 20), "Courroie");
        assert_eq!(truncate("Filtre hydraulique", 6), "Filtre...");
        assert_eq!(truncate("Vérin", 2), "Vé...");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Pièces détachées & co"), "pieces-detachees-co");
        assert_eq!(slugify("  Maintenance -- préventive  "), "maintenance-preventive");
        assert_eq!(slugify("HTD 8M-1600"), "htd-8m-1600");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("jean", "dupont"), "JD");
        assert_eq!(initials("Émile", ""), "É");
    }
}
