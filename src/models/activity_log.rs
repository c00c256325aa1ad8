//! Activity log model
//! 
//! Immutable audit entries written for admin actions. Each entry carries the
//! same sentence in English and Hindi; readers pick one with `Language`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ParseEnumError, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl FromStr for Language {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            other => Err(ParseEnumError::new("language", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub text_en: String,
    pub text_hi: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(actor: &User, text_en: String, text_hi: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text_en,
            text_hi,
            user_id: actor.id,
            user_name: actor.name.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::En => &self.text_en,
            Language::Hi => &self.text_hi,
        }
    }
}
