use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::announcement_reads::{ActiveModel, Column, Entity as AnnouncementReads};
use crate::entity::announcements;
use crate::entity::prelude::Announcements;
use crate::errors::{Result, ScholarError};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};

// 每条回执绑定 3 个参数，单条语句保持在 SQLite 的 999 个变量以内
pub(super) const RECEIPT_INSERT_CHUNK: usize = 300;

impl SeaOrmStorage {
    /// 标记已读：首次读取创建回执，再次读取刷新时间
    pub async fn mark_announcement_read_impl(
        &self,
        account_id: i64,
        announcement_id: i64,
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScholarError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = Announcements::find_by_id(announcement_id)
            .one(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询公告失败: {e}")))?;
        if exists.is_none() {
            return Err(ScholarError::not_found(format!(
                "公告 {announcement_id} 不存在"
            )));
        }

        let receipt = ActiveModel {
            announcement_id: Set(announcement_id),
            account_id: Set(account_id),
            read_at: Set(chrono::Utc::now().timestamp_millis()),
        };

        AnnouncementReads::insert(receipt)
            .on_conflict(
                OnConflict::columns([Column::AnnouncementId, Column::AccountId])
                    .update_column(Column::ReadAt)
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("写入已读记录失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ScholarError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 将所有未读公告标记为已读，已有回执保持原时间
    pub async fn mark_all_announcements_read_impl(&self, account_id: i64) -> Result<i64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScholarError::database_operation(format!("开启事务失败: {e}")))?;

        let all_ids: Vec<i64> = Announcements::find()
            .select_only()
            .column(announcements::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询公告失败: {e}")))?;

        let read_ids: HashSet<i64> = AnnouncementReads::find()
            .select_only()
            .column(Column::AnnouncementId)
            .filter(Column::AccountId.eq(account_id))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询已读记录失败: {e}")))?
            .into_iter()
            .collect();

        let now = chrono::Utc::now().timestamp_millis();
        let receipts: Vec<ActiveModel> = all_ids
            .into_iter()
            .filter(|id| !read_ids.contains(id))
            .map(|announcement_id| ActiveModel {
                announcement_id: Set(announcement_id),
                account_id: Set(account_id),
                read_at: Set(now),
            })
            .collect();

        let marked = receipts.len() as i64;
        for chunk in receipts.chunks(RECEIPT_INSERT_CHUNK) {
            AnnouncementReads::insert_many(chunk.iter().cloned())
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    ScholarError::database_operation(format!("批量写入已读记录失败: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| ScholarError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(marked)
    }

    /// 未读数 = 公告总数 - 该账号回执数，最小为 0
    pub async fn count_unread_announcements_impl(&self, account_id: i64) -> Result<i64> {
        let total = Announcements::find()
            .count(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("统计公告数量失败: {e}")))?;

        let read = AnnouncementReads::find()
            .filter(Column::AccountId.eq(account_id))
            .count(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("统计已读数量失败: {e}")))?;

        Ok((total as i64 - read as i64).max(0))
    }
}
