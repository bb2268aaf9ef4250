//! 公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub category: String,
    pub priority: String,
    pub author_id: i64,
    /// 毫秒时间戳
    pub published_at: i64,
    /// 毫秒时间戳
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AuthorId",
        to = "super::accounts::Column::Id"
    )]
    Author,
    #[sea_orm(has_many = "super::announcement_reads::Entity")]
    Reads,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::announcement_reads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 结合作者与调用者的已读记录组装视图
    pub fn into_view(
        self,
        author: super::accounts::Model,
        read_at: Option<i64>,
    ) -> crate::models::announcements::entities::AnnouncementView {
        use crate::models::announcements::entities::{
            AnnouncementCategory, AnnouncementPriority, AnnouncementView,
        };
        use chrono::{DateTime, Utc};

        AnnouncementView {
            id: self.id,
            title: self.title,
            body: self.body,
            category: self
                .category
                .parse::<AnnouncementCategory>()
                .unwrap_or(AnnouncementCategory::Notice),
            priority: self.priority.parse::<AnnouncementPriority>().unwrap_or_default(),
            published_at: DateTime::<Utc>::from_timestamp_millis(self.published_at)
                .unwrap_or_default(),
            author: author.into_author_summary(),
            read: read_at.is_some(),
            read_at: read_at.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}
