//! Move and capture cues, played through an external audio program.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Move,
    Capture,
}

#[derive(Debug, Clone)]
pub struct SoundPlayer {
    program: Option<String>,
    move_sound: PathBuf,
    capture_sound: PathBuf,
}

impl SoundPlayer {
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.sound_player.clone(),
            move_sound: config.move_sound.clone(),
            capture_sound: config.capture_sound.clone(),
        }
    }

    pub fn file_for(&self, cue: SoundCue) -> &PathBuf {
        match cue {
            SoundCue::Move => &self.move_sound,
            SoundCue::Capture => &self.capture_sound,
        }
    }

    /// Starts playback and returns immediately. A detached thread waits on the
    /// player so it is reaped once it exits; the handle is only useful to tests.
    pub fn play(&self, cue: SoundCue) -> Option<JoinHandle<()>> {
        let Some(program) = &self.program else {
            debug!(?cue, "no sound player configured");
            return None;
        };
        let file = self.file_for(cue);
        let spawned = Command::new(program)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!(?cue, program = %program, "failed to start sound player: {e}");
                return None;
            }
        };
        debug!(?cue, file = %file.display(), pid = child.id(), "playing sound");

        let program = program.clone();
        Some(thread::spawn(move || match child.wait() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(?cue, program = %program, %status, "sound player exited with an error"),
            Err(e) => warn!(?cue, program = %program, "failed to wait for sound player: {e}"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_files() {
        let player = SoundPlayer::new(&Config::default());
        assert!(player.file_for(SoundCue::Move).ends_with("move.mp3"));
        assert!(player.file_for(SoundCue::Capture).ends_with("capture.mp3"));
        // Without a configured program this only logs.
        assert!(player.play(SoundCue::Capture).is_none());
    }

    fn with_program(program: &str) -> SoundPlayer {
        SoundPlayer::new(&Config {
            sound_player: Some(program.to_string()),
            ..Config::default()
        })
    }

    #[cfg(unix)]
    #[test]
    fn test_player_is_waited_on() {
        for program in ["true", "false"] {
            let reaper = with_program(program).play(SoundCue::Move).expect("player started");
            reaper.join().expect("reaper finished");
        }
    }

    #[test]
    fn test_missing_player_is_not_fatal() {
        let player = with_program("/nonexistent/sound-player");
        assert!(player.play(SoundCue::Move).is_none());
    }
}
