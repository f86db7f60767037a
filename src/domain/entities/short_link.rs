//! Short link entity representing a tracked redirect target.

use chrono::{DateTime, Utc};

/// A short link issued for a product article.
///
/// Immutable once created. The `code` is globally unique for the lifetime
/// of the store; `user_id` records the originating questionnaire user when
/// the link was created from a completed session.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub id: i64,
    pub code: String,
    pub item: String,
    pub user_id: Option<String>,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub code: String,
    pub item: String,
    pub user_id: Option<String>,
    pub target_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_construction() {
        let link = ShortLink {
            id: 1,
            code: "aB3xY9".to_string(),
            item: "12345".to_string(),
            user_id: Some("777".to_string()),
            target_url: "https://www.wildberries.ru/catalog/12345/detail.aspx".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(link.code, "aB3xY9");
        assert_eq!(link.item, "12345");
        assert!(link.target_url.contains("12345"));
    }

    #[test]
    fn test_new_short_link_without_user() {
        let new_link = NewShortLink {
            code: "qq11ZZ".to_string(),
            item: "9000".to_string(),
            user_id: None,
            target_url: "https://www.wildberries.ru/catalog/9000/detail.aspx".to_string(),
        };

        assert!(new_link.user_id.is_none());
    }
}
