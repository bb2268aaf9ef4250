use super::entities::AccountRole;
use serde::Deserialize;
use ts_rs::TS;

// 账号创建请求（存储层使用，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: AccountRole,
}

// 角色变更请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/account.ts")]
pub struct UpdateRoleRequest {
    pub role: AccountRole,
}

// 账号列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/account.ts")]
pub struct AccountListQuery {
    pub role: Option<AccountRole>,
}
