//! Wire types and HTTP client for the remote match service.
//!
//! The service owns every rule of the game. The client only creates matches,
//! asks which squares a piece may move to, and submits moves.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::board_state::BoardState;
use crate::config::Config;
use crate::coord::Coord;
use crate::error::{Error, Result};
use crate::piece::{Color, Piece, PieceKind};

/// Identifier of a match, as handed out by the service.
///
/// Some deployments send it as a JSON number, others as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawMatchId")]
pub struct MatchId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMatchId {
    Text(String),
    Number(i64),
}

impl From<RawMatchId> for MatchId {
    fn from(raw: RawMatchId) -> Self {
        match raw {
            RawMatchId::Text(s) => MatchId(s),
            RawMatchId::Number(n) => MatchId(n.to_string()),
        }
    }
}

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        MatchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A piece and the square it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: u8,
    pub col: u8,
    pub name: PieceKind,
    pub color: Color,
}

impl Placement {
    pub fn coord(&self) -> Option<Coord> {
        Coord::new(self.row, self.col)
    }

    pub fn piece(&self) -> Piece {
        Piece::new(self.name, self.color)
    }
}

#[derive(Debug, Clone, Serialize)]
struct CreateMatchRequest<'a> {
    mode: &'a str,
}

/// Reply to match creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCreated {
    pub match_id: MatchId,
    #[serde(default)]
    pub white_pieces: Vec<Placement>,
    #[serde(default)]
    pub black_pieces: Vec<Placement>,
    pub turn: Color,
}

impl MatchCreated {
    /// Empty board overlaid with the white, then the black placements.
    ///
    /// Placements that fall off the board are skipped.
    pub fn board(&self) -> BoardState {
        BoardState::from_placements(
            self.white_pieces
                .iter()
                .chain(&self.black_pieces)
                .filter_map(|p| p.coord().map(|at| (at, p.piece()))),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
struct LegalMovesRequest {
    row: u8,
    col: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct LegalMovesReply {
    #[serde(default)]
    moves: Vec<Coord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest {
    start_row: u8,
    start_col: u8,
    end_row: u8,
    end_col: u8,
}

/// What the service reports after accepting a move.
///
/// The body is optional; an empty reply is an acceptance with no extra data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MoveOutcome {
    /// Square of a king left in check by the move.
    #[serde(default)]
    pub check: Option<Coord>,
}

/// HTTP client for the match service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MatchClient {
    http: Client,
    base: String,
}

impl MatchClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("chessboard/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self { http, base: config.api_url.clone() })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// `POST {base}matches`
    pub async fn create_match(&self, mode: &str) -> Result<MatchCreated> {
        let url = format!("{}matches", self.base);
        let resp = self.http.post(&url).json(&CreateMatchRequest { mode }).send().await?;
        let created: MatchCreated = decode(resp).await?;
        info!(
            match_id = %created.match_id,
            turn = %created.turn,
            pieces = created.white_pieces.len() + created.black_pieces.len(),
            "match created"
        );
        Ok(created)
    }

    /// `POST {base}matches/move/{id}`: legal destinations for the piece at `at`.
    pub async fn legal_moves(&self, match_id: &MatchId, at: Coord) -> Result<Vec<Coord>> {
        let url = format!("{}matches/move/{}", self.base, match_id);
        let body = LegalMovesRequest { row: at.row(), col: at.col() };
        let resp = self.http.post(&url).json(&body).send().await?;
        let reply: LegalMovesReply = decode(resp).await?;
        debug!(%at, count = reply.moves.len(), "legal moves received");
        Ok(reply.moves)
    }

    /// `PUT {base}matches/move/{id}`. Any 2xx status is an acceptance.
    pub async fn submit_move(&self, match_id: &MatchId, from: Coord, to: Coord) -> Result<MoveOutcome> {
        let url = format!("{}matches/move/{}", self.base, match_id);
        let body = MoveRequest {
            start_row: from.row(),
            start_col: from.col(),
            end_row: to.row(),
            end_col: to.col(),
        };
        let resp = self.http.put(&url).json(&body).send().await?;
        let text = success_text(resp).await?;
        if text.trim().is_empty() {
            return Ok(MoveOutcome::default());
        }
        match serde_json::from_str(&text) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                debug!("move reply is not a recognised body, ignoring it: {e}");
                Ok(MoveOutcome::default())
            }
        }
    }
}

async fn success_text(resp: Response) -> Result<String> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(Error::Rejected { status, detail: text });
    }
    Ok(text)
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
    let text = success_text(resp).await?;
    Ok(serde_json::from_str(&text)?)
}
