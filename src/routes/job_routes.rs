use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::job_controller::JobController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::job_dto::{ApproveJobRequest, CreateJobRequest, JobListResponse, JobResponse, RejectJobRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::dashboard::DashboardStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_job_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/archive", get(archived_jobs))
        .route("/stats", get(stats))
        .route("/slots", get(slots))
        .route("/:id", get(get_job).delete(cancel_job))
        .route("/:id/approve", post(approve_job))
        .route("/:id/reject", post(reject_job))
        .route("/:id/archive", post(archive_job))
        .route("/:id/progress", post(progress_job))
        .route("/:id/slip", get(job_slip))
}

type JobResult = Result<Json<ApiResponse<JobResponse>>, AppError>;

async fn list_jobs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<JobListResponse>>, AppError> {
    let response = JobController::new(&state).list(&auth.user).await?;
    Ok(Json(response))
}

async fn create_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<CreateJobRequest>,
) -> JobResult {
    let response = JobController::new(&state).create(&auth.user, request).await?;
    Ok(Json(response))
}

async fn archived_jobs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<JobResponse>>>, AppError> {
    let response = JobController::new(&state).archived(&auth.user).await?;
    Ok(Json(response))
}

async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let response = JobController::new(&state).stats(&auth.user).await?;
    Ok(Json(response))
}

async fn slots(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(JobController::new(&state).slots())
}

async fn get_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> JobResult {
    let response = JobController::new(&state).get(&auth.user, id).await?;
    Ok(Json(response))
}

async fn approve_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApproveJobRequest>,
) -> JobResult {
    let response = JobController::new(&state).approve(&auth.user, id, request).await?;
    Ok(Json(response))
}

async fn reject_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectJobRequest>,
) -> JobResult {
    let response = JobController::new(&state).reject(&auth.user, id, request).await?;
    Ok(Json(response))
}

async fn archive_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> JobResult {
    let response = JobController::new(&state).archive(&auth.user, id).await?;
    Ok(Json(response))
}

async fn progress_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> JobResult {
    let response = JobController::new(&state).progress(&auth.user, id).await?;
    Ok(Json(response))
}

async fn cancel_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = JobController::new(&state).cancel(&auth.user, id).await?;
    Ok(Json(response))
}

async fn job_slip(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let slip = JobController::new(&state).slip(&auth.user, id).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], slip))
}
