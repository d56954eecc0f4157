//! Form Validation
//!
//! Run on submit only. Every field gets at most one message: the first
//! rule it breaks.

pub const REQUIRED: &str = "Required";

/// Characters accepted as the password's special character
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Counted in UTF-16 code units, like `String.length`
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
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

fn required(value: &str) -> Option<String> {
    value.is_empty().then(|| REQUIRED.to_string())
}

/// First failed password rule, if any
pub fn password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some(REQUIRED)
    } else if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 8 characters long")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Password must contain at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one number")
    } else if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        Some("Password must contain at least one special character")
    } else {
        None
    }
}

pub fn validate_login(username: &str, password: &str) -> LoginErrors {
    LoginErrors {
        username: required(username),
        password: required(password),
    }
}

pub fn validate_register(
    username: &str,
    email: &str,
    password: &str,
    re_enter_password: &str,
) -> RegisterErrors {
    let re_enter_password = if re_enter_password.is_empty() {
        Some(REQUIRED.to_string())
    } else if password != re_enter_password {
        Some("Passwords must match".to_string())
    } else {
        None
    };

    RegisterErrors {
        username: required(username),
        email: required(email),
        password: password_error(password).map(str::to_string),
        re_enter_password,
    }
}
