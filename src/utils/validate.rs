use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "abcd1234",
    "letmein1",
];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 邮箱统一存储为去空白的小写形式
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 未提供姓名时取邮箱 @ 之前的部分
pub fn display_name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// 密码策略：至少 8 个字符，包含大写、小写与数字，且不在常见弱密码列表中
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors: Vec<&str> = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

/// 去除首尾空白后至少 `min_chars` 个字符
pub fn require_text(field: &str, value: &str, min_chars: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min_chars {
        return Err(if min_chars <= 1 {
            format!("{field} must not be empty")
        } else {
            format!("{field} must be at least {min_chars} characters")
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(validate_email("ana@school.edu").is_ok());
        assert!(validate_email("first.last+tag@mail.example.org").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("ana@localhost").is_err());
    }

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(display_name_from_email("ana.silva@school.edu"), "ana.silva");
        assert_eq!(normalize_email("  Ana@School.EDU "), "ana@school.edu");
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecurePass123").is_ok());
        assert!(validate_password("MyP@ssw0rd").is_ok());
    }

    #[test]
    fn test_password_rules_are_reported_together() {
        let err = validate_password("abc").unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(err.contains("uppercase"));
        assert!(err.contains("digit"));
        assert!(!err.contains("lowercase"));
    }

    #[test]
    fn test_common_password() {
        let err = validate_password("Password1").unwrap_err();
        assert!(err.contains("too common"));
    }

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("title", "  Hello  ", 5), Ok("Hello".to_string()));
        assert!(require_text("title", "  Hi   ", 5).is_err());
        assert_eq!(
            require_text("name", "   ", 1),
            Err("name must not be empty".to_string())
        );
    }
}
