use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.]*$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 印度手机号，可带 +91 前缀
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+91)?[6-9][0-9]{9}$").expect("Invalid phone regex"));

// 入学申请中的手机号不带前缀
static ADMISSION_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Invalid admission phone regex"));

static PINCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("Invalid pincode regex"));

static PERSON_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").expect("Invalid name regex"));

static ACADEMIC_YEAR_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{4}$").expect("Invalid academic year regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    // 字母开头，只能包含字母、数字、下划线或点
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must start with a letter and contain only letters, numbers, underscores or dots",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number must be a valid 10-digit Indian mobile number");
    }
    Ok(())
}

pub fn validate_admission_phone(label: &str, phone: &str) -> Result<(), String> {
    if !ADMISSION_PHONE_RE.is_match(phone) {
        return Err(format!("{label} must be a valid Indian mobile number"));
    }
    Ok(())
}

pub fn validate_pincode(pincode: &str) -> Result<(), String> {
    if !PINCODE_RE.is_match(pincode) {
        return Err("Pincode must be exactly 6 digits".to_string());
    }
    Ok(())
}

/// 姓名、城市、省份：只能包含字母和空格
pub fn validate_person_name(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    if !PERSON_NAME_RE.is_match(value) {
        return Err(format!("{label} must contain only letters and spaces"));
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<(), String> {
    match gender {
        "Male" | "Female" | "Other" => Ok(()),
        _ => Err("Gender must be Male, Female or Other".to_string()),
    }
}

pub fn validate_address(address: &str) -> Result<(), String> {
    if address.trim().chars().count() < 10 {
        return Err("Address must be at least 10 characters long".to_string());
    }
    Ok(())
}

/// 入学申请学年格式 YYYY-YYYY
pub fn validate_academic_year_range(academic_year: &str) -> Result<(), String> {
    if !ACADEMIC_YEAR_RANGE_RE.is_match(academic_year) {
        return Err("Academic year format must be YYYY-YYYY".to_string());
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 特殊字符
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 下划线也算特殊字符
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        errors.push("Password must contain at least one special character");
    }

    let weak_passwords = ["P@ssword", "P@ssw0rd", "Passw0rd!", "Admin@123", "Welcome@1"];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("ravi.kumar_01").is_ok());
        assert!(validate_username("1ravi").is_err());
        assert!(validate_username("ra").is_err());
        assert!(validate_username("ravi-kumar").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("teacher@school.edu.in").is_ok());
        assert!(validate_email("teacher@school").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("5876543210").is_err());
        assert!(validate_phone("98765").is_err());
        assert!(validate_admission_phone("Phone", "9876543210").is_ok());
        assert!(validate_admission_phone("Phone", "+919876543210").is_err());
    }

    #[test]
    fn test_pincode_rules() {
        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode("56001").is_err());
        assert!(validate_pincode("5600011").is_err());
        assert!(validate_pincode("56000a").is_err());
    }

    #[test]
    fn test_name_and_address_rules() {
        assert!(validate_person_name("City", "New Delhi").is_ok());
        assert!(validate_person_name("City", "Delhi 6").is_err());
        assert!(validate_person_name("City", "  ").is_err());
        assert!(validate_address("Short").is_err());
        assert!(validate_address("221B Baker Street").is_ok());
        assert!(validate_gender("Other").is_ok());
        assert!(validate_gender("male").is_err());
        assert!(validate_academic_year_range("2025-2026").is_ok());
        assert!(validate_academic_year_range("2025-26").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss").is_valid);
        assert!(validate_password("My_Secret_Key").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab@1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_missing_character_classes() {
        let result = validate_password("abcdefgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one special character")
        );
        assert!(!validate_password("ABCDEFG@").is_valid);
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("p@ssw0rd");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
