use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::announcement_reads;
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements, Model};
use crate::entity::prelude::{AnnouncementReads, Accounts};
use crate::errors::{Result, ScholarError};
use crate::models::accounts::entities::Caller;
use crate::models::announcements::entities::{
    AnnouncementCategory, AnnouncementPatch, AnnouncementView, NewAnnouncement,
};
use crate::policy;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 发布公告
    pub async fn create_announcement_impl(
        &self,
        author_id: i64,
        announcement: NewAnnouncement,
    ) -> Result<AnnouncementView> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            title: Set(announcement.title),
            body: Set(announcement.body),
            category: Set(announcement.category.to_string()),
            priority: Set(announcement.priority.to_string()),
            author_id: Set(author_id),
            published_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("创建公告失败: {e}")))?;

        load_view(&self.db, created, author_id).await
    }

    /// 修改公告，权限在事务内依据作者当前角色判断
    pub async fn update_announcement_impl(
        &self,
        caller: &Caller,
        id: i64,
        patch: AnnouncementPatch,
    ) -> Result<AnnouncementView> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScholarError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = find_authorized(&txn, caller, id).await?;

        let mut model: ActiveModel = existing.into();
        if let Some(title) = patch.title {
            model.title = Set(title);
        }
        if let Some(body) = patch.body {
            model.body = Set(body);
        }
        if let Some(category) = patch.category {
            model.category = Set(category.to_string());
        }
        if let Some(priority) = patch.priority {
            model.priority = Set(priority.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp_millis());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("更新公告失败: {e}")))?;

        let view = load_view(&txn, updated, caller.account_id).await?;

        txn.commit()
            .await
            .map_err(|e| ScholarError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(view)
    }

    /// 删除公告，已读回执随之级联删除
    pub async fn delete_announcement_impl(&self, caller: &Caller, id: i64) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScholarError::database_operation(format!("开启事务失败: {e}")))?;

        find_authorized(&txn, caller, id).await?;

        Announcements::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("删除公告失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ScholarError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 获取单条公告，附带调用者的已读状态
    pub async fn get_announcement_impl(
        &self,
        account_id: i64,
        id: i64,
    ) -> Result<Option<AnnouncementView>> {
        let found = Announcements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询公告失败: {e}")))?;

        match found {
            Some(model) => load_view(&self.db, model, account_id).await.map(Some),
            None => Ok(None),
        }
    }

    /// 按发布时间倒序列出公告（同一时间按 ID 倒序），附带调用者的已读状态
    pub async fn list_announcements_impl(
        &self,
        account_id: i64,
        category: Option<AnnouncementCategory>,
    ) -> Result<Vec<AnnouncementView>> {
        let mut select = Announcements::find();
        if let Some(category) = category {
            select = select.filter(Column::Category.eq(category.to_string()));
        }

        let rows = select
            .order_by_desc(Column::PublishedAt)
            .order_by_desc(Column::Id)
            .find_also_related(Accounts)
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询公告列表失败: {e}")))?;

        let read_at: HashMap<i64, i64> = AnnouncementReads::find()
            .filter(announcement_reads::Column::AccountId.eq(account_id))
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询已读记录失败: {e}")))?
            .into_iter()
            .map(|r| (r.announcement_id, r.read_at))
            .collect();

        let views = rows
            .into_iter()
            .filter_map(|(announcement, author)| match author {
                Some(author) => {
                    let read = read_at.get(&announcement.id).copied();
                    Some(announcement.into_view(author, read))
                }
                None => {
                    warn!("Announcement {} has no author row, skipped", announcement.id);
                    None
                }
            })
            .collect();

        Ok(views)
    }
}

/// 查找公告并校验调用者是否可管理
async fn find_authorized<C: ConnectionTrait>(conn: &C, caller: &Caller, id: i64) -> Result<Model> {
    let existing = Announcements::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| ScholarError::database_operation(format!("查询公告失败: {e}")))?
        .ok_or_else(|| ScholarError::not_found(format!("公告 {id} 不存在")))?;

    let is_author = existing.author_id == caller.account_id;
    if !policy::can_manage_announcement(caller.role, is_author) {
        return Err(ScholarError::authorization("无权管理该公告"));
    }

    Ok(existing)
}

/// 组装公告视图：作者摘要加上指定账号的已读时间
async fn load_view<C: ConnectionTrait>(
    conn: &C,
    announcement: Model,
    account_id: i64,
) -> Result<AnnouncementView> {
    let author = Accounts::find_by_id(announcement.author_id)
        .one(conn)
        .await
        .map_err(|e| ScholarError::database_operation(format!("查询公告作者失败: {e}")))?
        .ok_or_else(|| ScholarError::not_found("公告作者不存在"))?;

    let receipt = AnnouncementReads::find_by_id((announcement.id, account_id))
        .one(conn)
        .await
        .map_err(|e| ScholarError::database_operation(format!("查询已读记录失败: {e}")))?;

    Ok(announcement.into_view(author, receipt.map(|r| r.read_at)))
}
