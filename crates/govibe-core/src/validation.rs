//! Client-side form validation.
//!
//! Every rule is a pure function over the raw input. The `check_*` helpers
//! wrap a rule into a [`ValidationError`] whose `Display` text is the
//! message shown under the field; the form types collect all field errors
//! at once so a submit attempt can report every problem in one pass.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Symbols accepted (and required) by both password policies.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

static LENIENT_PASSWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,16}$").expect("password regex"));

const STRICT_PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters long, including letters, numbers, and symbols.";
const LENIENT_PASSWORD_MESSAGE: &str =
    "Password must be 8 to 16 characters long and include one of @$!%*?&.";

/// Which password rule a form enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordPolicy {
    /// 8+ characters with at least one letter, one digit and one symbol.
    #[default]
    Strict,
    /// 8-16 characters from letters, digits and symbols, at least one symbol.
    Lenient,
}

impl PasswordPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordPolicy::Strict => "strict",
            PasswordPolicy::Lenient => "lenient",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            PasswordPolicy::Strict => STRICT_PASSWORD_MESSAGE,
            PasswordPolicy::Lenient => LENIENT_PASSWORD_MESSAGE,
        }
    }
}

impl std::str::FromStr for PasswordPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(PasswordPolicy::Strict),
            "lenient" => Ok(PasswordPolicy::Lenient),
            other => Err(ValidationError::InvalidValue {
                field: "password_policy".into(),
                message: format!("expected 'strict' or 'lenient', got '{other}'"),
            }),
        }
    }
}

// ── Rules ────────────────────────────────────────────────────────────

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_password(password: &str, policy: PasswordPolicy) -> bool {
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
    match policy {
        PasswordPolicy::Strict => {
            password.chars().count() >= 8
                && password.chars().any(|c| c.is_ascii_alphabetic())
                && password.chars().any(|c| c.is_ascii_digit())
                && has_symbol
        }
        PasswordPolicy::Lenient => has_symbol && LENIENT_PASSWORD_RE.is_match(password),
    }
}

/// Name fields only need to be non-empty.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
}

/// One-time codes are non-empty and numeric.
pub fn is_valid_otp(otp: &str) -> bool {
    !otp.is_empty() && otp.chars().all(|c| c.is_ascii_digit())
}

// ── Field checks ─────────────────────────────────────────────────────

pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        Err(ValidationError::Empty { field: "Email" })
    } else if !is_valid_email(email) {
        Err(ValidationError::Invalid {
            field: "Email",
            message: "Invalid email format.",
        })
    } else {
        Ok(())
    }
}

pub fn check_password(password: &str, policy: PasswordPolicy) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::Empty { field: "Password" })
    } else if !is_valid_password(password, policy) {
        Err(ValidationError::Invalid {
            field: "Password",
            message: policy.message(),
        })
    } else {
        Ok(())
    }
}

pub fn check_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(ValidationError::Empty { field })
    }
}

pub fn check_otp(otp: &str) -> Result<(), ValidationError> {
    if otp.is_empty() {
        Err(ValidationError::Empty { field: "OTP code" })
    } else if !is_valid_otp(otp) {
        Err(ValidationError::Invalid {
            field: "OTP code",
            message: "OTP code must contain digits only.",
        })
    } else {
        Ok(())
    }
}

pub fn check_password_confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError::Mismatch)
    }
}

fn collect(checks: impl IntoIterator<Item = Result<(), ValidationError>>) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ── Forms ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self, policy: PasswordPolicy) -> Result<(), Vec<ValidationError>> {
        collect([
            check_name("First name", &self.first_name),
            check_name("Last name", &self.last_name),
            check_email(&self.email),
            check_password(&self.password, policy),
        ])
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self, policy: PasswordPolicy) -> Result<(), Vec<ValidationError>> {
        collect([check_email(&self.email), check_password(&self.password, policy)])
    }
}

/// New-password form shown after a verified one-time code.
#[derive(Debug, Clone, Default)]
pub struct ResetForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl ResetForm {
    pub fn validate(&self, policy: PasswordPolicy) -> Result<(), Vec<ValidationError>> {
        collect([
            check_email(&self.email),
            check_password(&self.password, policy),
            check_password_confirmation(&self.password, &self.confirm_password),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("a+b_c%d-e@sub.domain.io"));
        assert!(is_valid_email("X9@host.fr"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@host",
            "user@host.c",
            "user@host.c0m",
            "us er@host.com",
            "user@@host.com",
            "user@host.com ",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn strict_password_requires_all_classes() {
        let strict = PasswordPolicy::Strict;
        assert!(is_valid_password("abcd123!", strict));
        assert!(is_valid_password("Sup3r$ecretPassword", strict));
        assert!(!is_valid_password("abc12!", strict), "too short");
        assert!(!is_valid_password("abcdefg!", strict), "no digit");
        assert!(!is_valid_password("1234567!", strict), "no letter");
        assert!(!is_valid_password("abcd1234", strict), "no symbol");
        assert!(!is_valid_password("abcd123#", strict), "# is not an allowed symbol");
    }

    #[test]
    fn lenient_password_only_needs_symbol_and_length() {
        let lenient = PasswordPolicy::Lenient;
        assert!(is_valid_password("abcdefg!", lenient));
        assert!(is_valid_password("!!!!!!!!", lenient));
        assert!(!is_valid_password("abcdefgh", lenient), "no symbol");
        assert!(!is_valid_password("abcdefghijklmno!x", lenient), "17 chars");
        assert!(!is_valid_password("abc def!", lenient), "space not allowed");
    }

    #[test]
    fn otp_must_be_numeric() {
        assert!(is_valid_otp("0427"));
        assert!(!is_valid_otp(""));
        assert!(!is_valid_otp("12a4"));
        assert_eq!(
            check_otp("").unwrap_err().to_string(),
            "OTP code cannot be empty."
        );
    }

    #[test]
    fn field_messages_match_screen_copy() {
        assert_eq!(check_email("").unwrap_err().to_string(), "Email cannot be empty.");
        assert_eq!(
            check_email("nope").unwrap_err().to_string(),
            "Invalid email format."
        );
        assert_eq!(
            check_password("short", PasswordPolicy::Strict)
                .unwrap_err()
                .to_string(),
            STRICT_PASSWORD_MESSAGE
        );
        assert_eq!(
            check_name("First name", "").unwrap_err().to_string(),
            "First name cannot be empty."
        );
    }

    #[test]
    fn signup_form_reports_every_field() {
        let form = SignupForm::default();
        let errors = form.validate(PasswordPolicy::Strict).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["First name", "Last name", "Email", "Password"]);
    }

    #[test]
    fn reset_form_detects_mismatch() {
        let form = ResetForm {
            email: "a@b.co".into(),
            password: "abcd123!".into(),
            confirm_password: "abcd123?".into(),
        };
        let errors = form.validate(PasswordPolicy::Strict).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Mismatch]);
    }

    #[test]
    fn login_form_valid() {
        let form = LoginForm {
            email: "runner@govibe.app".into(),
            password: "run4Fun!".into(),
        };
        assert!(form.validate(PasswordPolicy::Strict).is_ok());
    }

    #[test]
    fn policy_parses_from_str() {
        assert_eq!("STRICT".parse::<PasswordPolicy>().unwrap(), PasswordPolicy::Strict);
        assert_eq!("lenient".parse::<PasswordPolicy>().unwrap(), PasswordPolicy::Lenient);
        assert!("medium".parse::<PasswordPolicy>().is_err());
    }

    proptest! {
        #[test]
        fn generated_addresses_are_valid(
            local in "[A-Za-z0-9._%+-]{1,20}",
            domain in "[A-Za-z0-9.-]{1,20}",
            tld in "[A-Za-z]{2,6}",
        ) {
            let email = format!("{local}@{domain}.{tld}");
            prop_assert!(is_valid_email(&email));
        }

        #[test]
        fn addresses_without_at_are_invalid(s in "[A-Za-z0-9._%+-]{0,30}") {
            prop_assert!(!is_valid_email(&s));
        }

        #[test]
        fn strict_accepts_any_string_with_all_classes(
            letter in "[A-Za-z]",
            digit in "[0-9]",
            symbol in "[@$!%*?&]",
            filler in "\\PC{5,20}",
        ) {
            let password = format!("{filler}{letter}{digit}{symbol}");
            prop_assert!(is_valid_password(&password, PasswordPolicy::Strict));
        }

        #[test]
        fn strict_rejects_strings_without_symbol(s in "[A-Za-z0-9]{0,30}") {
            prop_assert!(!is_valid_password(&s, PasswordPolicy::Strict));
        }
    }
}
