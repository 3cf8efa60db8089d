use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::Filter;
use warp::http::StatusCode;

use crate::session_manager::{SessionManager, today_key};
use puzzle_types::{GuessOutcome, LoadError, SessionView};

pub mod analytics;
pub mod config;
pub mod provider;
pub mod session_manager;

#[derive(Deserialize)]
struct ToggleRequest {
    word: String,
}

#[derive(Serialize)]
struct GuessResponse {
    outcome: Option<GuessOutcome>,
    state: SessionView,
}

pub fn create_routes(
    manager: Arc<SessionManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let manager_filter = warp::any().map({
        let manager = manager.clone();
        move || manager.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Today's session state; creates or restores the session on first touch
    let session = warp::path!("api" / "session")
        .and(warp::get())
        .and(manager_filter.clone())
        .and_then(handle_session_request);

    let toggle = warp::path!("api" / "session" / "toggle")
        .and(warp::post())
        .and(warp::body::json())
        .and(manager_filter.clone())
        .and_then(handle_toggle_request);

    let guess = warp::path!("api" / "session" / "guess")
        .and(warp::post())
        .and(manager_filter.clone())
        .and_then(handle_guess_request);

    let shuffle = warp::path!("api" / "session" / "shuffle")
        .and(warp::post())
        .and(manager_filter.clone())
        .and_then(handle_shuffle_request);

    let deselect = warp::path!("api" / "session" / "deselect")
        .and(warp::post())
        .and(manager_filter.clone())
        .and_then(handle_deselect_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(session)
        .or(toggle)
        .or(guess)
        .or(shuffle)
        .or(deselect)
        .with(cors)
        .with(warp::log("puzzle_server"))
}

/// Only provider failures are user-visible; everything else is silently
/// recovered inside the manager.
fn load_failure_reply(err: &LoadError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = match err {
        LoadError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        LoadError::NoPuzzleForToday(_) => StatusCode::NOT_FOUND,
    };

    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": err.to_string()
        })),
        status,
    )
}

async fn handle_session_request(
    manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match manager.session_view(&today_key()).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(load_failure_reply(&err)),
    }
}

async fn handle_toggle_request(
    request: ToggleRequest,
    manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match manager.toggle_word(&today_key(), &request.word).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(load_failure_reply(&err)),
    }
}

async fn handle_guess_request(
    manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match manager.submit_guess(&today_key()).await {
        Ok((outcome, state)) => Ok(warp::reply::with_status(
            warp::reply::json(&GuessResponse { outcome, state }),
            StatusCode::OK,
        )),
        Err(err) => Ok(load_failure_reply(&err)),
    }
}

async fn handle_shuffle_request(
    manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match manager.shuffle(&today_key()).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(load_failure_reply(&err)),
    }
}

async fn handle_deselect_request(
    manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match manager.clear_selection(&today_key()).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(load_failure_reply(&err)),
    }
}
