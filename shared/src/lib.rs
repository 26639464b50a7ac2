use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 浏览器存储中的认证令牌键
pub const STORAGE_TOKEN_KEY: &str = "authToken";
/// 浏览器存储中的用户类型键
pub const STORAGE_ROLE_KEY: &str = "userType";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 封闭枚举：后端返回的 `userType` 只有这三种合法取值，
/// 每个角色唯一对应一个 URL 命名空间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// 线上传输与存储使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    /// 该角色页面所在的 URL 命名空间（不含斜杠）
    pub fn namespace(&self) -> &'static str {
        match self {
            Role::Student => "siswa",
            Role::Teacher => "guru",
            Role::Admin => "admin",
        }
    }

    pub fn from_namespace(namespace: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.namespace() == namespace)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的用户类型字符串
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user type: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// 已认证的会话
///
/// 令牌与角色总是成对出现，不存在只有其一的会话。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    /// 令牌是否可用：去掉空白后非空
    pub fn is_usable_token(token: &str) -> bool {
        !token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_token_rejects_blank() {
        assert!(Session::is_usable_token("abc123"));
        assert!(!Session::is_usable_token(""));
        assert!(!Session::is_usable_token(" \t\n"));
    }

    #[test]
    fn test_role_parse_known_values() {
        assert_eq!("student".parse::<Role>(), Ok(Role::Student));
        assert_eq!("teacher".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    }

    #[test]
    fn test_role_parse_rejects_unknown_and_case_variants() {
        assert_eq!(
            "guest".parse::<Role>(),
            Err(UnknownRole("guest".to_string()))
        );
        assert!("Teacher".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_namespace_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_namespace(role.namespace()), Some(role));
        }
        assert_eq!(Role::Teacher.namespace(), "guru");
        assert_eq!(Role::Student.namespace(), "siswa");
        assert_eq!(Role::from_namespace("teacher"), None);
    }

    #[test]
    fn test_role_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }
}
