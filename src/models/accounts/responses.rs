use super::entities::Account;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/account.ts")]
pub struct AccountResponse {
    pub account: Account,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/account.ts")]
pub struct AccountListResponse {
    pub items: Vec<Account>,
}
