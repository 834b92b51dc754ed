//! The terminal front-end: draws the board with crossterm and reads one cell per line.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::collections::VecDeque;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use board::{
    api::MatchClient,
    config::Config,
    coord::Coord,
    session::{Effect, Phase, Session},
    sound::SoundPlayer,
    view::{board_view, CellView, MoveMarker, Shade},
};

const LIGHT: Color = Color::Rgb { r: 222, g: 184, b: 135 };
const DARK: Color = Color::Rgb { r: 139, g: 90, b: 43 };
const SELECTED: Color = Color::Rgb { r: 230, g: 205, b: 60 };
const LAST_MOVE: Color = Color::Rgb { r: 160, g: 180, b: 80 };
const CHECK: Color = Color::Rgb { r: 200, g: 40, b: 40 };
const INK: Color = Color::Rgb { r: 15, g: 15, b: 15 };

/// Runs the main loop for the terminal UI.
pub async fn run() -> board::Result<()> {
    let config = Config::from_env()?;
    let client = MatchClient::new(&config)?;
    let sound = SoundPlayer::new(&config);
    let mut session = Session::new(config.animation);

    new_match(&client, &config, &mut session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let mut stdout = io::stdout();
        if let Err(e) = render(&mut stdout, &session) {
            error!("failed to draw board: {e}");
        }
        print!("cell (row col), 'new' or 'quit': ");
        io::Write::flush(&mut stdout).ok();

        let Ok(Some(input)) = lines.next_line().await else {
            break;
        };
        match input.trim() {
            "quit" | "exit" => break,
            "new" => new_match(&client, &config, &mut session).await,
            other => match parse_cell(other) {
                Some(at) => {
                    let effects = session.click(at);
                    drive(&client, &sound, &mut session, effects).await;
                }
                None => println!("Not a cell: {other:?}"),
            },
        }
    }
    Ok(())
}

async fn new_match(client: &MatchClient, config: &Config, session: &mut Session) {
    session.reset();
    match client.create_match(&config.match_mode).await {
        Ok(created) => session.load_match(&created),
        Err(e) => error!("Error creating match: {e}"),
    }
}

/// Carries out effects until the session has nothing more to ask for.
async fn drive(client: &MatchClient, sound: &SoundPlayer, session: &mut Session, effects: Vec<Effect>) {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::FetchLegalMoves { match_id, at } => match client.legal_moves(&match_id, at).await {
                Ok(moves) => session.legal_moves_received(&match_id, at, moves),
                Err(e) => session.legal_moves_failed(&match_id, at, &e),
            },
            Effect::SubmitMove { match_id, from, to } => match client.submit_move(&match_id, from, to).await {
                Ok(outcome) => queue.extend(session.move_accepted(&match_id, from, to, outcome)),
                Err(e) => session.move_rejected(&match_id, from, to, &e),
            },
            Effect::ScheduleCommit { ticket, delay } => {
                tokio::time::sleep(delay).await;
                queue.extend(session.commit(ticket));
            }
            Effect::PlaySound(cue) => {
                info!(?cue, "cue");
                sound.play(cue);
            }
        }
    }
}

/// Accepts `r c`, `r,c`, `r-c` or `rc`.
pub fn parse_cell(input: &str) -> Option<Coord> {
    let digits: Vec<u8> = input
        .chars()
        .filter(|c| !matches!(c, ' ' | ',' | '-'))
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match digits.as_slice() {
        [row, col] => Coord::new(*row, *col),
        _ => None,
    }
}

/// Draws the board, a status line and a column ruler.
pub fn render<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(out, Print(format!("{}\r\n", status(session))))?;
    queue!(out, Print("   "))?;
    for col in 0..8 {
        queue!(out, Print(format!(" {col} ")))?;
    }
    queue!(out, Print("\r\n"))?;

    for row in board_view(session, 1.0, 1.0).chunks(8) {
        queue!(out, Print(format!(" {} ", row[0].coord.row())))?;
        for cell in row {
            queue!(
                out,
                SetBackgroundColor(background(cell)),
                SetForegroundColor(INK),
                Print(cell_text(cell)),
                ResetColor
            )?;
        }
        queue!(out, Print("\r\n"))?;
    }
    out.flush()
}

fn status(session: &Session) -> String {
    match (session.phase(), session.turn()) {
        (Phase::Loading, _) | (_, None) => "No match loaded. Type 'new' to retry.".to_string(),
        (_, Some(turn)) => format!("{turn} to move"),
    }
}

fn background(cell: &CellView) -> Color {
    if cell.in_check {
        CHECK
    } else if cell.selected {
        SELECTED
    } else if cell.last_move {
        LAST_MOVE
    } else {
        match cell.shade {
            Shade::Light => LIGHT,
            Shade::Dark => DARK,
        }
    }
}

fn cell_text(cell: &CellView) -> String {
    let glyph = cell.icon.map(|i| i.glyph);
    match (cell.marker, glyph) {
        (Some(MoveMarker::Ring), Some(g)) => format!("({g})"),
        (Some(_), None) => " • ".to_string(),
        (_, Some(g)) => format!(" {g} "),
        (_, None) => "   ".to_string(),
    }
}
