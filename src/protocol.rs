//! Morris Text Protocol (MTP).
//!
//! A line-based command protocol in the style of GTP, so a front end (or a
//! person at a terminal) can drive the rules engine and the computer
//! opponent. Each command gets one reply: `=` followed by the result on
//! success, `?` followed by a readable message on failure. Rejected moves
//! leave the game untouched, so the front end can simply ask again.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `variant <six|nine|twelve>` - Change the variant and start a new game
//! - `clear_board` - New game in the placement phase, red first
//! - `setup` - New game in setup mode
//! - `setup_place <color> <pt>`, `setup_clear <pt>`, `setup_hand <color> <n>`
//! - `start <color|random>` - Leave setup mode
//! - `place <color> <pt>`, `move <color> <from> <to>`, `remove <color> <pt>`
//! - `genmove <color>` - Let the computer act for `color`
//! - `showboard`, `status`
//!
//! ## Example
//!
//! ```ignore
//! use morris_rust::protocol::MtpEngine;
//! let mut engine = MtpEngine::new(Variant::SIX, fastrand::Rng::new());
//! engine.run_stdio()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::ai::Opponent;
use crate::board::{Color, Point, Variant};
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::error::MoveError;
use crate::rules::{Action, Advance, RulesEngine};

/// The list of known MTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "move",
    "name",
    "place",
    "protocol_version",
    "quit",
    "remove",
    "setup",
    "setup_clear",
    "setup_hand",
    "setup_place",
    "showboard",
    "start",
    "status",
    "variant",
    "version",
];

/// Protocol session state.
pub struct MtpEngine {
    game: RulesEngine,
    /// Source for opponent tie-breaks and random first player.
    rng: fastrand::Rng,
    /// Echo applied actions to stderr
    verbose: bool,
}

impl MtpEngine {
    pub fn new(variant: Variant, rng: fastrand::Rng) -> Self {
        Self {
            game: RulesEngine::new(variant, Color::Red),
            rng,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn game(&self) -> &RulesEngine {
        &self.game
    }

    /// Run the command loop on stdin and stdout.
    pub fn run_stdio(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match self.dispatch(command, args) {
            Ok(response) => (true, response),
            Err(message) => (false, message),
        }
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<String, String> {
        match command {
            "name" => Ok(ENGINE_NAME.to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok(PROTOCOL_VERSION.to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = arg(args, 0)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "variant" => {
                let variant = arg(args, 0)?
                    .parse::<Variant>()
                    .map_err(|e| e.to_string())?;
                self.game = RulesEngine::new(variant, Color::Red);
                Ok(String::new())
            }

            "clear_board" => {
                self.game = RulesEngine::new(self.game.variant(), Color::Red);
                Ok(String::new())
            }

            "setup" => {
                self.game = RulesEngine::setup(self.game.variant());
                Ok(String::new())
            }

            "setup_place" => {
                let color = parse_color(arg(args, 0)?)?;
                let pt = parse_point(arg(args, 1)?)?;
                self.game.setup_place(pt, color).map_err(reject)?;
                Ok(String::new())
            }

            "setup_clear" => {
                let pt = parse_point(arg(args, 0)?)?;
                let owner = self.game.setup_clear(pt).map_err(reject)?;
                Ok(owner.map(|c| c.to_string()).unwrap_or_default())
            }

            "setup_hand" => {
                let color = parse_color(arg(args, 0)?)?;
                let count = arg(args, 1)?
                    .parse::<usize>()
                    .map_err(|_| "invalid count".to_string())?;
                self.game.setup_in_hand(color, count).map_err(reject)?;
                Ok(String::new())
            }

            "start" => {
                let who = arg(args, 0)?;
                let first = if who.eq_ignore_ascii_case("random") {
                    Color::random(&mut self.rng)
                } else {
                    parse_color(who)?
                };
                let advance = self.game.start(first).map_err(reject)?;
                Ok(advance.to_string())
            }

            "place" => {
                let color = parse_color(arg(args, 0)?)?;
                let pt = parse_point(arg(args, 1)?)?;
                self.play(Action::Place(pt), color)
            }

            "move" => {
                let color = parse_color(arg(args, 0)?)?;
                let from = parse_point(arg(args, 1)?)?;
                let to = parse_point(arg(args, 2)?)?;
                self.play(Action::Move(from, to), color)
            }

            "remove" => {
                let color = parse_color(arg(args, 0)?)?;
                let pt = parse_point(arg(args, 1)?)?;
                self.play(Action::Remove(pt), color)
            }

            "genmove" => {
                let color = parse_color(arg(args, 0)?)?;
                match self.game.current_player() {
                    None => return Err(reject(MoveError::WrongPhase)),
                    Some(c) if c != color => return Err(reject(MoveError::WrongPlayer)),
                    Some(_) => {}
                }
                let action = Opponent::new(color)
                    .decide(&self.game, &mut self.rng)
                    .ok_or_else(|| "no legal action".to_string())?;
                let advance = self.apply(action, color).map_err(reject)?;
                Ok(format!("{action}\n{advance}"))
            }

            "showboard" => Ok(format!("\n{}", self.game.board())),

            "status" => Ok(self.status()),

            _ => Err(format!("unknown command: {command}")),
        }
    }

    fn play(&mut self, action: Action, color: Color) -> Result<String, String> {
        let advance = self.apply(action, color).map_err(reject)?;
        Ok(advance.to_string())
    }

    fn apply(&mut self, action: Action, color: Color) -> Result<Advance, MoveError> {
        let advance = self.game.apply(action, color)?;
        if self.verbose {
            eprintln!("{color} {action}: {advance}");
        }
        Ok(advance)
    }

    fn status(&self) -> String {
        let game = &self.game;
        let to_play = game
            .current_player()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "variant {}\nphase {}\nto_play {}\nin_hand red {} blue {}\non_board red {} blue {}",
            game.variant(),
            game.phase(),
            to_play,
            game.in_hand(Color::Red),
            game.in_hand(Color::Blue),
            game.pieces_on_board(Color::Red),
            game.pieces_on_board(Color::Blue),
        )
    }
}

fn arg<'a>(args: &[&'a str], i: usize) -> Result<&'a str, String> {
    args.get(i).copied().ok_or_else(|| "missing argument".to_string())
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse()
}

fn parse_point(s: &str) -> Result<Point, String> {
    s.parse().map_err(|_| format!("invalid point '{s}'"))
}

fn reject(err: MoveError) -> String {
    err.to_string()
}
