use super::SeaOrmStorage;
use super::reads::RECEIPT_INSERT_CHUNK;
use crate::config::DatabaseConfig;
use crate::errors::ScholarError;
use crate::models::accounts::entities::{Account, AccountRole, Caller};
use crate::models::accounts::requests::CreateAccountRequest;
use crate::models::announcements::entities::{
    AnnouncementCategory, AnnouncementPatch, AnnouncementPriority, NewAnnouncement,
};
use crate::models::grades::entities::GradeEntry;
use crate::models::students::requests::CreateStudentRequest;
use crate::storage::Storage;
use sea_orm::{ConnectionTrait, EntityTrait, Set, SqlErr};

async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage")
}

async fn account(storage: &SeaOrmStorage, email: &str, role: AccountRole) -> Account {
    storage
        .create_account(CreateAccountRequest {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            display_name: email.split('@').next().unwrap_or(email).to_string(),
            role,
        })
        .await
        .expect("create account")
}

async fn student(storage: &SeaOrmStorage, code: &str) -> i64 {
    storage
        .create_student(CreateStudentRequest {
            name: format!("Student {code}"),
            email: format!("{code}@school.test"),
            enrollment_code: code.to_string(),
            course_name: "Engineering".to_string(),
        })
        .await
        .expect("create student")
        .id
}

fn entry(subject_id: i64, n1: f64, n2: f64) -> GradeEntry {
    GradeEntry { subject_id, n1, n2 }
}

fn notice(title: &str) -> NewAnnouncement {
    NewAnnouncement {
        title: title.to_string(),
        body: "Body long enough to be valid".to_string(),
        category: AnnouncementCategory::Notice,
        priority: AnnouncementPriority::Normal,
    }
}

#[tokio::test]
async fn test_per_student_upsert_is_idempotent() {
    let storage = memory_storage().await;
    let s1 = student(&storage, "A001").await;
    let batch = [entry(1, 7.0, 8.0), entry(2, 5.5, 6.0)];

    storage.upsert_grades(Some(s1), &batch).await.unwrap();
    let first = storage.list_grades(Some(s1)).await.unwrap();
    storage.upsert_grades(Some(s1), &batch).await.unwrap();
    let second = storage.list_grades(Some(s1)).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.subject_id, b.subject_id);
        assert_eq!(a.n1, b.n1);
        assert_eq!(a.n2, b.n2);
    }
}

#[tokio::test]
async fn test_upsert_overwrites_existing_scores() {
    let storage = memory_storage().await;
    let s1 = student(&storage, "A002").await;

    storage
        .upsert_grades(Some(s1), &[entry(1, 2.0, 3.0)])
        .await
        .unwrap();
    storage
        .upsert_grades(Some(s1), &[entry(1, 9.0, 9.5)])
        .await
        .unwrap();

    let grades = storage.list_grades(Some(s1)).await.unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].n1, 9.0);
    assert_eq!(grades[0].n2, 9.5);
}

#[tokio::test]
async fn test_shared_rows_are_single_and_isolated() {
    let storage = memory_storage().await;
    let s1 = student(&storage, "A003").await;

    storage
        .upsert_grades(None, &[entry(1, 4.0, 4.0)])
        .await
        .unwrap();
    storage
        .upsert_grades(None, &[entry(1, 6.0, 7.0)])
        .await
        .unwrap();
    storage
        .upsert_grades(Some(s1), &[entry(1, 10.0, 10.0)])
        .await
        .unwrap();

    let shared = storage.list_grades(None).await.unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].student_id, None);
    assert_eq!(shared[0].n1, 6.0);

    let own = storage.list_grades(Some(s1)).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].student_id, Some(s1));
}

#[tokio::test]
async fn test_duplicate_subject_in_batch_last_wins() {
    let storage = memory_storage().await;
    let s1 = student(&storage, "A004").await;

    storage
        .upsert_grades(Some(s1), &[entry(3, 1.0, 1.0), entry(3, 8.0, 9.0)])
        .await
        .unwrap();
    storage
        .upsert_grades(None, &[entry(3, 1.0, 1.0), entry(3, 2.0, 2.5)])
        .await
        .unwrap();

    let own = storage.list_grades(Some(s1)).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!((own[0].n1, own[0].n2), (8.0, 9.0));

    let shared = storage.list_grades(None).await.unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!((shared[0].n1, shared[0].n2), (2.0, 2.5));
}

#[tokio::test]
async fn test_batch_for_missing_student_writes_nothing() {
    let storage = memory_storage().await;

    let err = storage
        .upsert_grades(Some(999), &[entry(1, 5.0, 5.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::NotFound(_)));
    assert!(storage.list_grades(Some(999)).await.unwrap().is_empty());
    assert!(storage.list_grades(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_student_removes_grades() {
    let storage = memory_storage().await;
    let s1 = student(&storage, "A005").await;
    storage
        .upsert_grades(Some(s1), &[entry(1, 5.0, 5.0)])
        .await
        .unwrap();

    assert!(storage.delete_student(s1).await.unwrap());
    assert!(storage.list_grades(Some(s1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_claim_links_once() {
    let storage = memory_storage().await;
    let first = account(&storage, "first@school.test", AccountRole::User).await;
    let second = account(&storage, "second@school.test", AccountRole::User).await;
    student(&storage, "C001").await;
    student(&storage, "C002").await;

    let claimed = storage.claim_student(first.id, "C001").await.unwrap();
    assert_eq!(claimed.account_id, Some(first.id));

    let err = storage.claim_student(second.id, "C001").await.unwrap_err();
    assert!(matches!(err, ScholarError::Conflict(_)));

    let err = storage.claim_student(first.id, "C002").await.unwrap_err();
    assert!(matches!(err, ScholarError::Conflict(_)));

    let err = storage.claim_student(second.id, "NOPE").await.unwrap_err();
    assert!(matches!(err, ScholarError::NotFound(_)));

    let linked = storage.get_student_by_account(first.id).await.unwrap();
    assert_eq!(linked.map(|s| s.enrollment_code), Some("C001".to_string()));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let storage = memory_storage().await;
    account(&storage, "dup@school.test", AccountRole::User).await;

    let err = storage
        .create_account(CreateAccountRequest {
            email: "dup@school.test".to_string(),
            password_hash: "hash".to_string(),
            display_name: "dup".to_string(),
            role: AccountRole::User,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::Conflict(_)));
}

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Manager).await;
    let reader = account(&storage, "reader@school.test", AccountRole::User).await;
    let created = storage
        .create_announcement(author.id, notice("Exam week"))
        .await
        .unwrap();
    assert!(!created.read);

    storage
        .mark_announcement_read(reader.id, created.id)
        .await
        .unwrap();
    let first = storage
        .get_announcement(reader.id, created.id)
        .await
        .unwrap()
        .unwrap();
    storage
        .mark_announcement_read(reader.id, created.id)
        .await
        .unwrap();
    let second = storage
        .get_announcement(reader.id, created.id)
        .await
        .unwrap()
        .unwrap();

    assert!(first.read && second.read);
    assert!(second.read_at >= first.read_at);
    assert_eq!(storage.count_unread_announcements(reader.id).await.unwrap(), 0);

    // 作者本人的已读状态不受影响
    assert_eq!(storage.count_unread_announcements(author.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_mark_read_missing_announcement() {
    let storage = memory_storage().await;
    let reader = account(&storage, "reader@school.test", AccountRole::User).await;

    let err = storage
        .mark_announcement_read(reader.id, 42)
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::NotFound(_)));
}

#[tokio::test]
async fn test_unread_count_matches_unread_entries() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Admin).await;
    let reader = account(&storage, "reader@school.test", AccountRole::User).await;

    let mut ids = Vec::new();
    for title in ["First notice", "Second notice", "Third notice"] {
        ids.push(
            storage
                .create_announcement(author.id, notice(title))
                .await
                .unwrap()
                .id,
        );
    }
    storage
        .mark_announcement_read(reader.id, ids[1])
        .await
        .unwrap();

    let list = storage.list_announcements(reader.id, None).await.unwrap();
    let unread_entries = list.iter().filter(|a| !a.read).count() as i64;
    let count = storage.count_unread_announcements(reader.id).await.unwrap();

    assert_eq!(list.len(), 3);
    assert_eq!(count, 2);
    assert_eq!(count, unread_entries);
}

#[tokio::test]
async fn test_list_newest_first_and_category_filter() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Manager).await;

    let older = storage
        .create_announcement(author.id, notice("Older notice"))
        .await
        .unwrap();
    let mut reminder = notice("Newer reminder");
    reminder.category = AnnouncementCategory::Reminder;
    let newer = storage
        .create_announcement(author.id, reminder)
        .await
        .unwrap();

    let all = storage.list_announcements(author.id, None).await.unwrap();
    assert_eq!(
        all.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    let reminders = storage
        .list_announcements(author.id, Some(AnnouncementCategory::Reminder))
        .await
        .unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].id, newer.id);
    assert_eq!(reminders[0].author.email, "staff@school.test");
}

#[tokio::test]
async fn test_mark_all_read() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Manager).await;
    let reader = account(&storage, "reader@school.test", AccountRole::User).await;
    let first = storage
        .create_announcement(author.id, notice("First notice"))
        .await
        .unwrap();
    storage
        .create_announcement(author.id, notice("Second notice"))
        .await
        .unwrap();
    storage
        .mark_announcement_read(reader.id, first.id)
        .await
        .unwrap();

    assert_eq!(storage.mark_all_announcements_read(reader.id).await.unwrap(), 1);
    assert_eq!(storage.mark_all_announcements_read(reader.id).await.unwrap(), 0);
    assert_eq!(storage.count_unread_announcements(reader.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_demoted_author_cannot_edit() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Manager).await;
    let created = storage
        .create_announcement(author.id, notice("Original title"))
        .await
        .unwrap();

    storage
        .update_account_role(author.id, AccountRole::User)
        .await
        .unwrap();
    let demoted = Caller {
        account_id: author.id,
        role: AccountRole::User,
        display_name: author.display_name.clone(),
    };

    let patch = AnnouncementPatch {
        title: Some("Changed title".to_string()),
        ..Default::default()
    };
    let err = storage
        .update_announcement(&demoted, created.id, patch.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::Authorization(_)));

    let err = storage
        .delete_announcement(&demoted, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::Authorization(_)));

    let admin = account(&storage, "admin@school.test", AccountRole::Admin).await;
    let updated = storage
        .update_announcement(&admin.as_caller(), created.id, patch)
        .await
        .unwrap();
    assert_eq!(updated.title, "Changed title");
    assert_eq!(updated.body, created.body);
}

#[tokio::test]
async fn test_other_manager_cannot_edit() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Manager).await;
    let other = account(&storage, "other@school.test", AccountRole::Manager).await;
    let created = storage
        .create_announcement(author.id, notice("Original title"))
        .await
        .unwrap();

    let err = storage
        .delete_announcement(&other.as_caller(), created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::Authorization(_)));

    let err = storage
        .delete_announcement(&other.as_caller(), 9999)
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_announcement_drops_receipts() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Manager).await;
    let reader = account(&storage, "reader@school.test", AccountRole::User).await;
    let first = storage
        .create_announcement(author.id, notice("First notice"))
        .await
        .unwrap();
    storage
        .create_announcement(author.id, notice("Second notice"))
        .await
        .unwrap();
    storage
        .mark_announcement_read(reader.id, first.id)
        .await
        .unwrap();

    storage
        .delete_announcement(&author.as_caller(), first.id)
        .await
        .unwrap();

    assert_eq!(storage.count_unread_announcements(reader.id).await.unwrap(), 1);
    assert!(
        storage
            .get_announcement(reader.id, first.id)
            .await
            .unwrap()
            .is_none()
    );
}

/// subject 999 的插入在数据库层被拒绝，用于模拟批次中途失败
async fn reject_subject_999(storage: &SeaOrmStorage) {
    storage
        .db
        .execute_unprepared(
            "CREATE TRIGGER reject_subject_999 BEFORE INSERT ON grades \
             WHEN NEW.subject_id = 999 BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .await
        .expect("create trigger");
}

#[tokio::test]
async fn test_store_failure_mid_batch_rolls_back_written_entries() {
    let storage = memory_storage().await;
    let s1 = student(&storage, "A006").await;
    reject_subject_999(&storage).await;

    let err = storage
        .upsert_grades(Some(s1), &[entry(1, 7.0, 7.0), entry(999, 5.0, 5.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::DatabaseOperation(_)));
    assert!(storage.list_grades(Some(s1)).await.unwrap().is_empty());

    let err = storage
        .upsert_grades(None, &[entry(1, 7.0, 7.0), entry(999, 5.0, 5.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarError::DatabaseOperation(_)));
    assert!(storage.list_grades(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_batch_keeps_previous_scores() {
    let storage = memory_storage().await;
    let s1 = student(&storage, "A007").await;
    storage
        .upsert_grades(Some(s1), &[entry(1, 3.0, 4.0)])
        .await
        .unwrap();
    reject_subject_999(&storage).await;

    assert!(
        storage
            .upsert_grades(Some(s1), &[entry(1, 9.0, 9.0), entry(999, 1.0, 1.0)])
            .await
            .is_err()
    );

    let grades = storage.list_grades(Some(s1)).await.unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!((grades[0].n1, grades[0].n2), (3.0, 4.0));
}

#[tokio::test]
async fn test_schema_allows_one_shared_row_per_subject() {
    use crate::entity::grades::{ActiveModel, Entity as Grades};

    let storage = memory_storage().await;
    let shared = |subject_id: i64| ActiveModel {
        subject_id: Set(subject_id),
        student_id: Set(None),
        n1: Set(1.0),
        n2: Set(1.0),
        created_at: Set(0),
        updated_at: Set(0),
        ..Default::default()
    };

    Grades::insert(shared(4))
        .exec_without_returning(&storage.db)
        .await
        .unwrap();
    let err = Grades::insert(shared(4))
        .exec_without_returning(&storage.db)
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    // 其他科目的共享行不受影响，账本写入仍更新同一行
    Grades::insert(shared(5))
        .exec_without_returning(&storage.db)
        .await
        .unwrap();
    storage
        .upsert_grades(None, &[entry(4, 8.0, 9.0)])
        .await
        .unwrap();

    let rows = storage.list_grades(None).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].subject_id, rows[0].n1, rows[0].n2), (4, 8.0, 9.0));
    assert_eq!(rows[1].subject_id, 5);
}

#[tokio::test]
async fn test_mark_all_read_spans_several_insert_chunks() {
    let storage = memory_storage().await;
    let author = account(&storage, "staff@school.test", AccountRole::Manager).await;
    let reader = account(&storage, "reader@school.test", AccountRole::User).await;
    let total = RECEIPT_INSERT_CHUNK + 7;
    for i in 0..total {
        storage
            .create_announcement(author.id, notice(&format!("Notice number {i}")))
            .await
            .unwrap();
    }

    assert_eq!(
        storage.mark_all_announcements_read(reader.id).await.unwrap(),
        total as i64
    );
    assert_eq!(storage.count_unread_announcements(reader.id).await.unwrap(), 0);
}
