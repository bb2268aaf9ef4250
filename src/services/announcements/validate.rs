//! 公告输入校验，所有文本先去除首尾空白

use crate::models::announcements::entities::{
    AnnouncementCategory, AnnouncementPatch, AnnouncementPriority, NewAnnouncement,
};
use crate::models::announcements::requests::{
    CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::announcements::responses::AnnouncementFieldError;

pub const MIN_TITLE_CHARS: usize = 5;
pub const MIN_BODY_CHARS: usize = 10;

fn field_error(field: &str, message: impl Into<String>) -> AnnouncementFieldError {
    AnnouncementFieldError {
        field: field.to_string(),
        message: message.into(),
    }
}

fn title(raw: &str) -> Result<String, AnnouncementFieldError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_TITLE_CHARS {
        return Err(field_error(
            "title",
            format!("title must be at least {MIN_TITLE_CHARS} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn body(raw: &str) -> Result<String, AnnouncementFieldError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_BODY_CHARS {
        return Err(field_error(
            "body",
            format!("body must be at least {MIN_BODY_CHARS} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn category(raw: &str) -> Result<AnnouncementCategory, AnnouncementFieldError> {
    raw.trim()
        .parse()
        .map_err(|e: String| field_error("category", e))
}

fn priority(raw: &str) -> Result<AnnouncementPriority, AnnouncementFieldError> {
    raw.trim()
        .parse()
        .map_err(|e: String| field_error("priority", e))
}

pub fn validate_new(
    request: &CreateAnnouncementRequest,
) -> Result<NewAnnouncement, AnnouncementFieldError> {
    Ok(NewAnnouncement {
        title: title(&request.title)?,
        body: body(&request.body)?,
        category: category(&request.category)?,
        priority: match request.priority.as_deref() {
            Some(raw) if !raw.trim().is_empty() => priority(raw)?,
            _ => AnnouncementPriority::default(),
        },
    })
}

/// 只校验提供的字段
pub fn validate_patch(
    request: &UpdateAnnouncementRequest,
) -> Result<AnnouncementPatch, AnnouncementFieldError> {
    Ok(AnnouncementPatch {
        title: request.title.as_deref().map(title).transpose()?,
        body: request.body.as_deref().map(body).transpose()?,
        category: request.category.as_deref().map(category).transpose()?,
        priority: request.priority.as_deref().map(priority).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str, body: &str, category: &str, priority: Option<&str>) -> CreateAnnouncementRequest {
        CreateAnnouncementRequest {
            title: title.to_string(),
            body: body.to_string(),
            category: category.to_string(),
            priority: priority.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_announcement_is_trimmed() {
        let new = validate_new(&create("  Exams  ", " Schedule posted. ", "notice", None)).unwrap();
        assert_eq!(new.title, "Exams");
        assert_eq!(new.body, "Schedule posted.");
        assert_eq!(new.category, AnnouncementCategory::Notice);
        assert_eq!(new.priority, AnnouncementPriority::Normal);
    }

    #[test]
    fn test_length_limits_count_trimmed_chars() {
        let err = validate_new(&create("  Hi!  ", "Long enough body", "notice", None)).unwrap_err();
        assert_eq!(err.field, "title");

        let err = validate_new(&create("Title", "   short   ", "notice", None)).unwrap_err();
        assert_eq!(err.field, "body");
    }

    #[test]
    fn test_enumerations_report_field() {
        let err = validate_new(&create("Title", "Long enough body", "gossip", None)).unwrap_err();
        assert_eq!(err.field, "category");

        let err =
            validate_new(&create("Title", "Long enough body", "reminder", Some("critical"))).unwrap_err();
        assert_eq!(err.field, "priority");

        let ok = validate_new(&create("Title", "Long enough body", "reminder", Some("urgent"))).unwrap();
        assert_eq!(ok.priority, AnnouncementPriority::Urgent);
    }

    #[test]
    fn test_patch_validates_supplied_fields_only() {
        let patch = validate_patch(&UpdateAnnouncementRequest {
            priority: Some("high".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            patch,
            AnnouncementPatch {
                priority: Some(AnnouncementPriority::High),
                ..Default::default()
            }
        );

        let err = validate_patch(&UpdateAnnouncementRequest {
            body: Some("tiny".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "body");
    }
}
