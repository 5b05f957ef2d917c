//! Line-oriented stand-in for the browser's form and pointer events.
//!
//! Each stdin line becomes one [`Command`]. Anything that is not a known
//! keyword is taken as a date submission, so typing `2015-09-07` behaves
//! like filling in the date field and pressing Submit.

use std::io::BufRead;

use crossbeam_channel::Sender;
use tracing::{debug, warn};

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit a date string for fetching.
    Submit(String),
    /// Pointer moved to pixel `(x, y)`.
    Move(f32, f32),
    /// Click at pixel `(x, y)`.
    Click(f32, f32),
    /// Touch began at pixel `(x, y)`.
    Touch(f32, f32),
    /// Orbit the camera by `(yaw, pitch)` degrees.
    Orbit(f32, f32),
    /// Viewport resized to `width` x `height`.
    Resize(u32, u32),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("`{command}` takes two numbers, e.g. `{command} 640 360`")]
    BadArguments { command: &'static str },
}

/// Degrees the camera orbits per `a`/`d`/`w`/`s` key.
pub const ORBIT_KEY_STEP_DEGREES: f32 = 5.0;

pub const HELP: &str = "\
commands:
  YYYY-MM-DD        fetch asteroids approaching on that date
  move X Y          hover the pointer at pixel (X, Y)
  click X Y         click at pixel (X, Y)
  touch X Y         touch at pixel (X, Y)
  orbit YAW PITCH   orbit the camera (degrees)
  a / d / w / s     orbit left / right / up / down
  resize W H        resize the viewport
  help              show this text
  quit              exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let keyword = words.next().unwrap_or_default();
        let rest: Vec<&str> = words.collect();

        match keyword.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "help" | "?" => Ok(Self::Help),
            "move" => pair("move", &rest).map(|(x, y)| Self::Move(x, y)),
            "click" => pair("click", &rest).map(|(x, y)| Self::Click(x, y)),
            "touch" => pair("touch", &rest).map(|(x, y)| Self::Touch(x, y)),
            "orbit" => pair("orbit", &rest).map(|(yaw, pitch)| Self::Orbit(yaw, pitch)),
            "a" if rest.is_empty() => Ok(Self::Orbit(-ORBIT_KEY_STEP_DEGREES, 0.0)),
            "d" if rest.is_empty() => Ok(Self::Orbit(ORBIT_KEY_STEP_DEGREES, 0.0)),
            "w" if rest.is_empty() => Ok(Self::Orbit(0.0, ORBIT_KEY_STEP_DEGREES)),
            "s" if rest.is_empty() => Ok(Self::Orbit(0.0, -ORBIT_KEY_STEP_DEGREES)),
            "resize" => pair::<u32>("resize", &rest).map(|(w, h)| Self::Resize(w, h)),
            _ => Ok(Self::Submit(line.to_string())),
        }
    }
}

fn pair<T: std::str::FromStr>(
    command: &'static str,
    args: &[&str],
) -> Result<(T, T), CommandError> {
    let bad = || CommandError::BadArguments { command };
    match args {
        [a, b] => Ok((a.parse().map_err(|_| bad())?, b.parse().map_err(|_| bad())?)),
        _ => Err(bad()),
    }
}

/// Read lines from `input` until EOF or `quit`, forwarding parsed commands.
///
/// EOF is forwarded as [`Command::Quit`]. Lines that fail to parse are
/// logged and skipped. Returns when the receiver hangs up.
pub fn read_commands(input: impl BufRead, tx: Sender<Command>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        match Command::parse(&line) {
            Ok(command) => {
                debug!(?command, "console command");
                let quit = command == Command::Quit;
                if tx.send(command).is_err() || quit {
                    return;
                }
            }
            Err(e) => warn!("{e}"),
        }
    }
    let _ = tx.send(Command::Quit);
}
