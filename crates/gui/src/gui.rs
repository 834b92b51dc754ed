//! The chessboard window, built with Iced.
//!
//! This file follows the Elm architecture, a Model-View-Update pattern:
//! - `ChessApp` is the Model: it wraps the board `Session` plus the handles
//!   needed to carry out its effects.
//! - `Message` is the Update trigger: clicks, service replies and timers.
//! - `update` feeds each message to the session and turns the returned
//!   effects into `Command`s.
//! - `view` renders the board canvas and the turn indicator.

use iced::{
    executor,
    time::{self, Duration, Instant},
    widget::{canvas::Canvas, svg, text, Button, Column, Container, Row, Svg},
    Application, Command, Element, Length, Pixels, Settings, Size, Subscription, Theme,
};
use std::sync::Arc;
use tracing::{error, info};

use board::{
    api::{MatchClient, MatchCreated, MatchId, MoveOutcome},
    config::Config,
    coord::Coord,
    icons,
    piece::{Piece, PieceKind},
    session::{CommitTicket, Effect, Phase, Session},
    sound::SoundPlayer,
    Error,
};

use crate::board_canvas::BoardCanvas;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Everything the window needs at start-up.
pub struct Launch {
    pub config: Config,
    pub client: MatchClient,
}

/// Runs the GUI application.
pub fn run(launch: Launch) -> iced::Result {
    let edge = launch.config.board_size;
    ChessApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(edge + 80.0, edge + 160.0),
            ..iced::window::Settings::default()
        },
        ..Settings::with_flags(launch)
    })
}

/// Defines the messages that can be sent to the `update` function.
#[derive(Debug, Clone)]
pub enum Message {
    NewMatch,
    MatchCreated(Result<MatchCreated, Arc<Error>>),
    CellClicked(Coord),
    LegalMoves {
        match_id: MatchId,
        at: Coord,
        result: Result<Vec<Coord>, Arc<Error>>,
    },
    MoveResult {
        match_id: MatchId,
        from: Coord,
        to: Coord,
        result: Result<MoveOutcome, Arc<Error>>,
    },
    Commit(CommitTicket),
    Tick(Instant),
}

/// The main application state (the "Model").
struct ChessApp {
    config: Config,
    client: MatchClient,
    sound: SoundPlayer,
    session: Session,

    // --- Animation clock ---
    animation_started: Option<Instant>,
    now: Instant,

    service_error: Option<String>,
}

impl Application for ChessApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Launch;

    fn new(launch: Launch) -> (Self, Command<Message>) {
        let Launch { config, client } = launch;
        let mut app = ChessApp {
            sound: SoundPlayer::new(&config),
            session: Session::new(config.animation),
            config,
            client,
            animation_started: None,
            now: Instant::now(),
            service_error: None,
        };
        let command = app.handle_new_match();
        (app, command)
    }

    fn title(&self) -> String {
        match self.session.match_id() {
            Some(id) => format!("Chess - match {id}"),
            None => String::from("Chess"),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::NewMatch => self.handle_new_match(),
            Message::MatchCreated(Ok(created)) => {
                self.service_error = None;
                self.session.load_match(&created);
                Command::none()
            }
            Message::MatchCreated(Err(e)) => {
                error!("Error creating match: {e}");
                self.service_error = Some(e.to_string());
                Command::none()
            }
            Message::CellClicked(at) => {
                let effects = self.session.click(at);
                self.run_effects(effects)
            }
            Message::LegalMoves { match_id, at, result } => {
                match result {
                    Ok(moves) => self.session.legal_moves_received(&match_id, at, moves),
                    Err(e) => self.session.legal_moves_failed(&match_id, at, &e),
                }
                Command::none()
            }
            Message::MoveResult { match_id, from, to, result } => match result {
                Ok(outcome) => {
                    let effects = self.session.move_accepted(&match_id, from, to, outcome);
                    self.run_effects(effects)
                }
                Err(e) => {
                    self.session.move_rejected(&match_id, from, to, &e);
                    Command::none()
                }
            },
            Message::Commit(ticket) => {
                let effects = self.session.commit(ticket);
                self.run_effects(effects)
            }
            Message::Tick(now) => {
                self.now = now;
                Command::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.session.moving_piece().is_some() {
            time::every(FRAME_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&'_ self) -> Element<'_, Message> {
        let canvas = Canvas::new(BoardCanvas::new(&self.session, self.progress()))
            .width(Length::Fixed(self.config.board_size))
            .height(Length::Fixed(self.config.board_size));

        let controls = Row::new()
            .spacing(10)
            .push(Button::new(text("New Match")).on_press(Message::NewMatch));

        let content = Column::new()
            .spacing(20)
            .align_items(iced::Alignment::Center)
            .push(self.status_row())
            .push(canvas)
            .push(controls);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

// --- Update Helper Functions ---

impl ChessApp {
    /// Drops the current match and asks the service for a new one.
    fn handle_new_match(&mut self) -> Command<Message> {
        self.session.reset();
        self.animation_started = None;
        let client = self.client.clone();
        let mode = self.config.match_mode.clone();
        info!(base = client.base_url(), %mode, "requesting new match");

        Command::perform(
            async move { client.create_match(&mode).await.map_err(Arc::new) },
            Message::MatchCreated,
        )
    }

    /// Turns session effects into commands.
    fn run_effects(&mut self, effects: Vec<Effect>) -> Command<Message> {
        let commands: Vec<_> = effects.into_iter().map(|effect| self.run_effect(effect)).collect();
        Command::batch(commands)
    }

    fn run_effect(&mut self, effect: Effect) -> Command<Message> {
        match effect {
            Effect::FetchLegalMoves { match_id, at } => {
                let client = self.client.clone();
                let id = match_id.clone();
                Command::perform(
                    async move { client.legal_moves(&id, at).await.map_err(Arc::new) },
                    move |result| Message::LegalMoves { match_id, at, result },
                )
            }
            Effect::SubmitMove { match_id, from, to } => {
                let client = self.client.clone();
                let id = match_id.clone();
                Command::perform(
                    async move { client.submit_move(&id, from, to).await.map_err(Arc::new) },
                    move |result| Message::MoveResult { match_id, from, to, result },
                )
            }
            Effect::ScheduleCommit { ticket, delay } => {
                let now = Instant::now();
                self.animation_started = Some(now);
                self.now = now;
                Command::perform(tokio::time::sleep(delay), move |_| Message::Commit(ticket))
            }
            Effect::PlaySound(cue) => {
                self.sound.play(cue);
                Command::none()
            }
        }
    }

    /// Fraction of the animation window that has elapsed.
    fn progress(&self) -> f32 {
        let Some(started) = self.animation_started else {
            return 0.0;
        };
        let window = self.session.animation().as_secs_f32();
        if window <= f32::EPSILON {
            return 1.0;
        }
        (self.now.saturating_duration_since(started).as_secs_f32() / window).min(1.0)
    }

    fn status_row(&self) -> Row<'_, Message> {
        let label = if let Some(err) = &self.service_error {
            format!("Match service unavailable: {err}")
        } else {
            match (self.session.phase(), self.session.turn()) {
                (Phase::Loading, _) | (_, None) => "Creating match...".to_string(),
                (Phase::AwaitingMoveResult { .. }, _) => "Submitting move...".to_string(),
                (_, Some(turn)) => format!("{turn} to move"),
            }
        };

        let mut row = Row::new().spacing(12).align_items(iced::Alignment::Center);
        if let Some(turn) = self.session.turn() {
            let king = icons::icon(Piece::new(PieceKind::King, turn));
            let handle = svg::Handle::from_memory(king.svg.as_bytes());
            row = row.push(Svg::new(handle).width(Length::Fixed(36.0)).height(Length::Fixed(36.0)));
        }
        row.push(text(label).size(Pixels(24.0)))
    }
}
