//! DTOs for short link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, UsageEvent};

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortRequest {
    /// The URL to shorten. Absoluteness is checked by the link service.
    #[validate(length(min = 1, message = "full must not be empty"))]
    pub full: String,
}

/// A link as listed to its owner.
#[derive(Debug, Serialize)]
pub struct ShortResponse {
    pub id: i64,
    pub short: String,
    pub full: String,
}

impl From<Link> for ShortResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            short: link.code,
            full: link.full_url,
        }
    }
}

/// One recorded redirect.
#[derive(Debug, Serialize)]
pub struct UseResponse {
    pub time: DateTime<Utc>,
}

/// A link with its usage history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortDetailsResponse {
    pub id: i64,
    pub short: String,
    pub full: String,
    pub owner_id: i64,
    pub uses: Vec<UseResponse>,
}

impl ShortDetailsResponse {
    pub fn new(link: Link, uses: Vec<UsageEvent>) -> Self {
        Self {
            id: link.id,
            short: link.code,
            full: link.full_url,
            owner_id: link.owner_id,
            uses: uses
                .into_iter()
                .map(|u| UseResponse { time: u.used_at })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_details_field_names() {
        let at = Utc.with_ymd_and_hms(2020, 2, 1, 5, 10, 0).unwrap();
        let link = Link::new(37, "11".to_string(), "https://google.com".to_string(), 2, at);
        let details = ShortDetailsResponse::new(link, vec![UsageEvent::new(1, 37, at)]);

        assert_eq!(
            serde_json::to_value(details).unwrap(),
            json!({
                "id": 37,
                "short": "11",
                "full": "https://google.com",
                "ownerId": 2,
                "uses": [{"time": "2020-02-01T05:10:00Z"}]
            })
        );
    }
}
