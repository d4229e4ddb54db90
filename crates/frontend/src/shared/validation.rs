//! Form validation helpers.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email regex: {e}"))
});

pub const PASSWORD_MIN_LENGTH: usize = 8;
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Which password rules failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordErrors {
    pub min_length: bool,
    pub upper_case: bool,
    pub lower_case: bool,
    pub number: bool,
    pub special_char: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    pub is_valid: bool,
    pub errors: PasswordErrors,
}

impl PasswordCheck {
    /// French messages for every failed rule
    pub fn messages(&self) -> Vec<&'static str> {
        let e = self.errors;
        [
            (e.min_length, "Au moins 8 caractères"),
            (e.upper_case, "Au moins une majuscule"),
            (e.lower_case, "Au moins une minuscule"),
            (e.number, "Au moins un chiffre"),
            (e.special_char, "Au moins un caractère spécial"),
        ]
        .into_iter()
        .filter_map(|(failed, msg)| failed.then_some(msg))
        .collect()
    }
}

pub fn validate_password(password: &str) -> PasswordCheck {
    let errors = PasswordErrors {
        min_length: password.chars().count() < PASSWORD_MIN_LENGTH,
        upper_case: !password.chars().any(|c| c.is_ascii_uppercase()),
        lower_case: !password.chars().any(|c| c.is_ascii_lowercase()),
        number: !password.chars().any(|c| c.is_ascii_digit()),
        special_char: !password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    };
    PasswordCheck {
        is_valid: errors == PasswordErrors::default(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jean.dupont@sosmachine.pro"));
        assert!(!is_valid_email("jean.dupont@sosmachine"));
        assert!(!is_valid_email("jean dupont@sosmachine.pro"));
        assert!(!is_valid_email("@sosmachine.pro"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_strong_password() {
        let check = validate_password("Machine#2024");
        assert!(check.is_valid);
        assert!(check.messages().is_empty());
    }

    #[test]
    fn test_weak_password_reports_each_rule() {
        let check = validate_password("abc");
        assert!(!check.is_valid);
        assert_eq!(
            check.errors,
            PasswordErrors {
                min_length: true,
                upper_case: true,
                lower_case: false,
                number: true,
                special_char: true,
            }
        );
        assert_eq!(check.messages().len(), 4);
    }
}
