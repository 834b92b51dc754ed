//! Runs `MatchClient` against an in-process fake of the match service.

use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use board::api::{MatchClient, MatchId};
use board::config::Config;
use board::coord::Coord;
use board::piece::Color;
use board::session::{Effect, Session};
use board::Error;

// ---------------------------------------------------------------------------
// Fake service
// ---------------------------------------------------------------------------

async fn create_match(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if body["mode"] != "LOCAL" {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({
        "matchId": "abc",
        "whitePieces": [
            {"row": 6, "col": 4, "name": "Pawn", "color": "WHITE"},
            {"row": 7, "col": 4, "name": "King", "color": "WHITE"}
        ],
        "blackPieces": [
            {"row": 0, "col": 4, "name": "King", "color": "BLACK"}
        ],
        "turn": "WHITE"
    })))
}

async fn legal_moves(Path(id): Path<String>, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if id != "abc" {
        return Err(StatusCode::NOT_FOUND);
    }
    let moves = if body["row"] == 6 && body["col"] == 4 {
        json!([[5, 4], [4, 4]])
    } else {
        json!([])
    };
    Ok(Json(json!({ "moves": moves })))
}

async fn apply_move(Path(id): Path<String>, Json(body): Json<Value>) -> (StatusCode, String) {
    if id != "abc" {
        return (StatusCode::NOT_FOUND, "no such match".into());
    }
    match (body["endRow"].as_i64(), body["endCol"].as_i64()) {
        (Some(4), Some(4)) => (StatusCode::OK, String::new()),
        (Some(1), Some(4)) => (StatusCode::OK, json!({ "check": [0, 4] }).to_string()),
        _ => (StatusCode::UNPROCESSABLE_ENTITY, "Illegal move".into()),
    }
}

async fn spawn_service() -> Config {
    let app = Router::new()
        .route("/api/matches", post(create_match))
        .route("/api/matches/move/{id}", post(legal_moves).put(apply_move));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake service");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake service stopped");
    });
    Config {
        api_url: format!("http://{addr}/api/"),
        ..Config::default()
    }
}

fn c(row: u8, col: u8) -> Coord {
    Coord::new(row, col).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_match() {
    let client = MatchClient::new(&spawn_service().await).unwrap();
    let created = client.create_match("LOCAL").await.unwrap();

    assert_eq!(created.match_id, MatchId::new("abc"));
    assert_eq!(created.turn, Color::White);
    let board = created.board();
    assert_eq!(board.len(), 64);
    assert_eq!(board.pieces().count(), 3);
}

#[tokio::test]
async fn test_create_match_with_unknown_mode_is_rejected() {
    let client = MatchClient::new(&spawn_service().await).unwrap();
    let err = client.create_match("ONLINE").await.unwrap_err();
    assert!(matches!(err, Error::Rejected { status, .. } if status == reqwest::StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_legal_moves() {
    let client = MatchClient::new(&spawn_service().await).unwrap();
    let id = MatchId::new("abc");
    assert_eq!(client.legal_moves(&id, c(6, 4)).await.unwrap(), vec![c(5, 4), c(4, 4)]);
    assert!(client.legal_moves(&id, c(0, 0)).await.unwrap().is_empty());
    assert!(client.legal_moves(&MatchId::new("nope"), c(6, 4)).await.is_err());
}

#[tokio::test]
async fn test_submit_move_outcomes() {
    let client = MatchClient::new(&spawn_service().await).unwrap();
    let id = MatchId::new("abc");

    let quiet = client.submit_move(&id, c(6, 4), c(4, 4)).await.unwrap();
    assert_eq!(quiet.check, None);

    let checking = client.submit_move(&id, c(6, 4), c(1, 4)).await.unwrap();
    assert_eq!(checking.check, Some(c(0, 4)));

    let err = client.submit_move(&id, c(6, 4), c(2, 2)).await.unwrap_err();
    match err {
        Error::Rejected { status, detail } => {
            assert_eq!(status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(detail, "Illegal move");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure() {
    let config = Config {
        api_url: "http://127.0.0.1:9/".into(),
        ..Config::default()
    };
    let client = MatchClient::new(&config).unwrap();
    let err = client.create_match("LOCAL").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

/// Drives a session through one full move cycle, running effects against the fake.
#[tokio::test]
async fn test_session_round_trip() {
    let config = spawn_service().await;
    let client = MatchClient::new(&config).unwrap();
    let mut session = Session::new(config.animation);
    session.load_match(&client.create_match(&config.match_mode).await.unwrap());

    let effects = session.click(c(6, 4));
    let [Effect::FetchLegalMoves { match_id, at }] = effects.as_slice() else {
        panic!("expected a legal-move request, got {effects:?}");
    };
    let moves = client.legal_moves(match_id, *at).await.unwrap();
    session.legal_moves_received(match_id, *at, moves);
    assert_eq!(session.available_moves().len(), 2);

    let effects = session.click(c(4, 4));
    let [Effect::SubmitMove { match_id, from, to }] = effects.as_slice() else {
        panic!("expected a move submission, got {effects:?}");
    };
    let outcome = client.submit_move(match_id, *from, *to).await.unwrap();
    let effects = session.move_accepted(match_id, *from, *to, outcome);
    let [Effect::ScheduleCommit { ticket, delay }] = effects.as_slice() else {
        panic!("expected a scheduled commit, got {effects:?}");
    };
    tokio::time::sleep(*delay).await;
    session.commit(*ticket);

    assert_eq!(session.turn(), Some(Color::Black));
    assert!(session.board().get(c(6, 4)).is_none());
    assert!(session.board().get(c(4, 4)).is_some());
}
