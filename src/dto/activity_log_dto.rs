use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ActivityLog, Language};

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub lang: Language,
}

// One log line in the requested language
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityLogResponse {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityLogResponse {
    pub fn render(entry: ActivityLog, language: Language) -> Self {
        Self {
            text: entry.text(language).to_string(),
            id: entry.id,
            user_id: entry.user_id,
            user_name: entry.user_name,
            timestamp: entry.timestamp,
        }
    }
}
