use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 账号角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/account.ts")]
pub enum AccountRole {
    User,    // 学生或普通访客
    Manager, // 教务人员
    Admin,   // 管理员
}

impl AccountRole {
    pub const USER: &'static str = "user";
    pub const MANAGER: &'static str = "manager";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static AccountRole] {
        &[&Self::Admin]
    }
    pub fn staff_roles() -> &'static [&'static AccountRole] {
        &[&Self::Manager, &Self::Admin]
    }
}

impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AccountRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的账号角色: '{s}'. 支持的角色: user, manager, admin"
            ))
        })
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::User => write!(f, "{}", AccountRole::USER),
            AccountRole::Manager => write!(f, "{}", AccountRole::MANAGER),
            AccountRole::Admin => write!(f, "{}", AccountRole::ADMIN),
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AccountRole::USER => Ok(AccountRole::User),
            AccountRole::MANAGER => Ok(AccountRole::Manager),
            AccountRole::ADMIN => Ok(AccountRole::Admin),
            _ => Err(format!("Invalid account role: {s}")),
        }
    }
}

// 账号实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/account.ts")]
pub struct Account {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub display_name: String,
    pub role: AccountRole,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Account {
    /// 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> crate::errors::Result<crate::utils::jwt::TokenPair> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| crate::errors::ScholarError::authentication(format!("生成 token 对失败: {e}")))
    }

    /// 当前请求的调用者身份
    pub fn as_caller(&self) -> Caller {
        Caller {
            account_id: self.id,
            role: self.role,
            display_name: self.display_name.clone(),
        }
    }
}

/// 业务层使用的调用者身份，由认证中间件解析出的账号构造
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub account_id: i64,
    pub role: AccountRole,
    pub display_name: String,
}
