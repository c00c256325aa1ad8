use std::sync::Arc;

use tracing::error;

use crate::dto::activity_log_dto::ActivityLogResponse;
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::ensure_admin;
use crate::models::{ActivityLog, Language, User};
use crate::repositories::ActivityLogRepository;
use crate::services::activity_text::LogText;
use crate::services::change_feed::{ChangeFeed, ChangeKind, Collection};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct ActivityLogController {
    logs: Arc<dyn ActivityLogRepository>,
    feed: ChangeFeed,
}

impl ActivityLogController {
    pub fn new(state: &AppState) -> Self {
        Self {
            logs: state.logs.clone(),
            feed: state.feed.clone(),
        }
    }

    pub async fn list(
        &self,
        actor: &User,
        language: Language,
    ) -> Result<ApiResponse<Vec<ActivityLogResponse>>, AppError> {
        ensure_admin(actor, "view activity logs")?;

        let entries = self
            .logs
            .list()
            .await?
            .into_iter()
            .map(|entry| ActivityLogResponse::render(entry, language))
            .collect();

        Ok(ApiResponse::success(entries))
    }

    /// Appends an audit entry. The action it describes has already been
    /// persisted, so a failure here is logged and not returned.
    pub async fn record(&self, actor: &User, text: LogText) {
        let entry = ActivityLog::new(actor, text.en, text.hi);
        match self.logs.append(&entry).await {
            Ok(entry) => self
                .feed
                .publish(Collection::ActivityLogs, entry.id, ChangeKind::Created),
            Err(e) => error!("❌ Could not write activity log '{}': {}", entry.text_en, e),
        }
    }
}
