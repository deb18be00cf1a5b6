//! Axum HTTP server: stateless endpoints for the Formula Pyramid frontend.
//!
//! Every request carries the full tile set it operates on, so the handlers
//! hold no game state; session tracking lives with the caller.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/game/tiles` | Fresh reference tile set |
//! | POST | `/api/game/target` | Target number for a tile set |
//! | POST | `/api/game/check` | Evaluate a selected triple against a target |
//! | POST | `/api/game/solve` | All solutions for a tile set and target |

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use pyramid_core::{
    evaluate, find_solutions, ordered_triple_count, select_target, Tile, TileGenerator,
    TriplePolicy,
};

pub fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/api/game/tiles", get(handle_get_tiles))
        .route("/api/game/target", post(handle_target))
        .route("/api/game/check", post(handle_check))
        .route("/api/game/solve", post(handle_solve))
        .layer(cors)
}

// ── Request types ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest {
    selected_tiles: Vec<Tile>,
    target_number: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveRequest {
    tiles: Vec<Tile>,
    target_number: f64,
    /// Report every permutation instead of the canonical combination list.
    #[serde(default)]
    all_orderings: bool,
}

#[derive(Deserialize)]
struct TargetRequest {
    tiles: Vec<Tile>,
}

fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": msg })))
}

// ── GET handlers ────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_get_tiles() -> Json<Vec<Tile>> {
    Json(TileGenerator::new().generate())
}

// ── POST handlers ───────────────────────────────────────────────────

async fn handle_target(
    Json(req): Json<TargetRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match select_target(&req.tiles) {
        Ok(target) => Ok(Json(serde_json::json!({
            "targetNumber": target.value,
            "frequency": target.frequency,
            "totalOrderedTriples": ordered_triple_count(req.tiles.len()),
        }))),
        Err(e) => Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            &e.to_string(),
        )),
    }
}

async fn handle_check(
    Json(req): Json<CheckRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    if req.selected_tiles.len() != 3 {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "selectedTiles must contain exactly 3 tiles",
        ));
    }
    let [t1, t2, t3] = [
        &req.selected_tiles[0],
        &req.selected_tiles[1],
        &req.selected_tiles[2],
    ];
    if t1.id == t2.id || t1.id == t3.id || t2.id == t3.id {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "selectedTiles must not repeat a tile",
        ));
    }

    let outcome = evaluate(t1, t2, t3);
    let success = outcome.equals(req.target_number);

    // An undefined outcome (division by zero) serializes as null.
    Ok(Json(serde_json::json!({
        "success": success,
        "calculatedValue": outcome.value(),
        "targetNumber": req.target_number,
    })))
}

async fn handle_solve(Json(req): Json<SolveRequest>) -> impl IntoResponse {
    let policy = if req.all_orderings {
        TriplePolicy::AllOrdered
    } else {
        TriplePolicy::CombinationsOnly
    };

    let records: Vec<serde_json::Value> = find_solutions(&req.tiles, req.target_number, policy)
        .iter()
        .map(|solution| {
            serde_json::json!({
                "nameKey": solution.name_key,
                "expression": solution.expression,
                "value": solution.outcome,
                "tileIds": solution.tiles.iter().map(|t| t.id).collect::<Vec<_>>(),
            })
        })
        .collect();

    Json(records)
}
