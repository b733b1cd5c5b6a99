//! Axum route handlers for the Profile API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileDocument, Project};
use crate::profile::queries::{filter_projects, rank_skills, search, SearchResults, SkillCount};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub skill: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

async fn load_profile(state: &AppState) -> Result<ProfileDocument, AppError> {
    state
        .store
        .find()
        .await?
        .ok_or_else(|| AppError::NotFound("No profile seeded".to_string()))
}

fn parse_body(payload: Result<Json<Profile>, JsonRejection>) -> Result<Profile, AppError> {
    let Json(profile) = payload?;
    profile.validate().map_err(AppError::Malformed)?;
    Ok(profile)
}

/// POST /profile
///
/// Creates the profile. Fails with 409 when one already exists.
pub async fn handle_create_profile(
    State(state): State<AppState>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<(StatusCode, Json<ProfileDocument>), AppError> {
    let profile = parse_body(payload)?;

    let doc = state.store.insert_if_absent(profile).await?.ok_or_else(|| {
        AppError::Conflict("Profile exists. Use PUT /profile to update.".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(doc)))
}

/// GET /profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileDocument>, AppError> {
    Ok(Json(load_profile(&state).await?))
}

/// PUT /profile
///
/// Replaces the whole document, creating it if none exists.
pub async fn handle_replace_profile(
    State(state): State<AppState>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<Json<ProfileDocument>, AppError> {
    let profile = parse_body(payload)?;
    Ok(Json(state.store.upsert(profile).await?))
}

/// GET /projects?skill=X
pub async fn handle_list_projects(
    State(state): State<AppState>,
    params: Result<Query<ProjectsQuery>, QueryRejection>,
) -> Result<Json<Vec<Project>>, AppError> {
    let Query(params) = params?;
    let doc = load_profile(&state).await?;
    Ok(Json(filter_projects(
        &doc.profile.projects,
        params.skill.as_deref(),
    )))
}

/// GET /skills/top
pub async fn handle_top_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillCount>>, AppError> {
    let doc = load_profile(&state).await?;
    Ok(Json(rank_skills(&doc.profile)))
}

/// GET /search?q=X
pub async fn handle_search(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResults>, AppError> {
    let Query(params) = params?;
    let doc = load_profile(&state).await?;
    Ok(Json(search(&doc.profile, &params.q)))
}
