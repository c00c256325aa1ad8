use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::activity_log_controller::ActivityLogController;
use crate::dto::activity_log_dto::{ActivityLogResponse, LogQuery};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_log_router() -> Router<AppState> {
    Router::new().route("/", get(list_logs))
}

async fn list_logs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<LogQuery>,
) -> Result<Json<ApiResponse<Vec<ActivityLogResponse>>>, AppError> {
    let response = ActivityLogController::new(&state)
        .list(&auth.user, query.lang)
        .await?;
    Ok(Json(response))
}
