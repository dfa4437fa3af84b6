//! 班级邀请码生成
//!
//! 格式为 `SUBJECT-SECTION-TOKEN`，科目与班号去掉非字母数字字符后转为大写，
//! TOKEN 为 10 位随机大写字母与数字。

use rand::Rng;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const TOKEN_LENGTH: usize = 10;

/// 去掉非字母数字字符并转为大写
pub fn sanitize_code_part(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn random_token(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// 生成一个候选邀请码，唯一性由调用方检查
pub fn generate_class_code(subject: &str, section: &str) -> String {
    format!(
        "{}-{}-{}",
        sanitize_code_part(subject),
        sanitize_code_part(section),
        random_token(TOKEN_LENGTH)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_code_part("Comp. Sci 101"), "COMPSCI101");
        assert_eq!(sanitize_code_part("a-1"), "A1");
        assert_eq!(sanitize_code_part("--"), "");
    }

    #[test]
    fn test_generated_code_shape() {
        let code = generate_class_code("CS", "A");
        assert!(code.starts_with("CS-A-"));

        let token = &code["CS-A-".len()..];
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_codes_differ() {
        let first = generate_class_code("Math", "B");
        let second = generate_class_code("Math", "B");
        assert_ne!(first, second);
    }
}
