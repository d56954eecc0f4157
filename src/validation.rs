//! Form Validation
//!
//! Synchronous field checks for the login and registration forms. Each field
//! reports at most one message: the first rule it fails.

use regex::Regex;
use std::sync::OnceLock;

pub const REQUIRED: &str = "Required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const PASSWORD_NO_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const PASSWORD_NO_LOWERCASE: &str = "Password must contain at least one lowercase letter";
pub const PASSWORD_NO_DIGIT: &str = "Password must contain at least one number";
pub const PASSWORD_NO_SYMBOL: &str = "Password must contain at least one special character";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";

/// Minimum password length, in UTF-16 code units as a browser counts them
pub const MIN_PASSWORD_LEN: usize = 8;

/// Ordered password rules; the first one that does not match wins
fn password_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"[A-Z]", PASSWORD_NO_UPPERCASE),
            (r"[a-z]", PASSWORD_NO_LOWERCASE),
            (r"[0-9]", PASSWORD_NO_DIGIT),
            (r#"[!@#$%^&*(),.?":{}|<>]"#, PASSWORD_NO_SYMBOL),
        ]
        .into_iter()
        .map(|(pattern, message)| {
            (
                Regex::new(pattern).expect("password rule pattern is valid"),
                message,
            )
        })
        .collect()
    })
}

/// Check a registration password, returning the first failed rule
pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        return Some(REQUIRED);
    }
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Some(PASSWORD_TOO_SHORT);
    }

    password_rules()
        .iter()
        .find(|(rule, _)| !rule.is_match(password))
        .map(|(_, message)| *message)
}

fn required(value: &str) -> Option<String> {
    value.is_empty().then(|| REQUIRED.to_string())
}

/// Credentials entered on the login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Per-field errors of the login form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> LoginErrors {
        LoginErrors {
            username: required(&self.username),
            password: required(&self.password),
        }
    }
}

/// Fields of the registration form
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub re_enter_password: String,
}

/// Per-field errors of the registration form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterErrors {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub re_enter_password: Option<String>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.re_enter_password.is_none()
    }
}

impl RegisterForm {
    pub fn validate(&self) -> RegisterErrors {
        let re_enter_password = if self.re_enter_password.is_empty() {
            Some(REQUIRED.to_string())
        } else if self.password != self.re_enter_password {
            Some(PASSWORDS_MUST_MATCH.to_string())
        } else {
            None
        };

        RegisterErrors {
            username: required(&self.username),
            email: required(&self.email),
            password: validate_password(&self.password).map(str::to_string),
            re_enter_password,
        }
    }
}

/// Collect the non-empty messages of a form as `field: message` lines
pub fn describe(errors: &[(&str, &Option<String>)]) -> String {
    errors
        .iter()
        .filter_map(|(field, message)| message.as_ref().map(|m| format!("{}: {}", field, m)))
        .collect::<Vec<_>>()
        .join("\n")
}

impl std::fmt::Display for LoginErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&describe(&[
            ("username", &self.username),
            ("password", &self.password),
        ]))
    }
}

impl std::fmt::Display for RegisterErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&describe(&[
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("re-enter password", &self.re_enter_password),
        ]))
    }
}
