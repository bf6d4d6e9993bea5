use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use fluent_bundle::FluentArgs;
use rand::Rng;
use thiserror::Error;

use crate::ai::Difficulty;
use crate::game::logic::GameState;
use crate::game::types::Move;
use crate::i18n::I18n;
use crate::storage::{self, Settings};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Play(Move),
    Difficulty(Option<String>),
    History,
    Stats,
    Reset,
    Theme,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Command::Empty;
        };
        if let Ok(m) = head.parse::<Move>() {
            return Command::Play(m);
        }
        match head.to_lowercase().as_str() {
            "difficulty" | "d" => Command::Difficulty(words.next().map(str::to_string)),
            "history" | "h" => Command::History,
            "stats" => Command::Stats,
            "reset" => Command::Reset,
            "theme" => Command::Theme,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

/// Line-oriented front end. Reads commands until `quit` or end of input.
pub struct Console<'a, W: Write, G: Rng> {
    out: W,
    rng: G,
    i18n: &'a I18n,
    pub state: GameState,
    pub settings: Settings,
    // None disables persisting the theme flag
    settings_path: Option<PathBuf>,
}

impl<'a, W: Write, G: Rng> Console<'a, W, G> {
    pub fn new(
        out: W,
        rng: G,
        i18n: &'a I18n,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            out,
            rng,
            i18n,
            state: GameState::default(),
            settings,
            settings_path,
        }
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), ConsoleError> {
        writeln!(self.out, "{}", self.i18n.t("console-welcome"))?;
        self.show_difficulty()?;
        let mut lines = input.lines();
        loop {
            write!(self.out, "{} ", self.i18n.t("console-prompt"))?;
            self.out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            match Command::parse(&line) {
                Command::Play(m) => self.play(m)?,
                Command::Difficulty(None) => self.show_difficulty()?,
                Command::Difficulty(Some(name)) => match name.parse::<Difficulty>() {
                    Ok(d) => {
                        self.state.set_difficulty(d);
                        self.show_difficulty()?;
                    }
                    Err(e) => {
                        log::debug!("{e}");
                        let mut args = FluentArgs::new();
                        args.set("input", name);
                        writeln!(
                            self.out,
                            "{}",
                            self.i18n.t_args("console-unknown-difficulty", &args)
                        )?;
                    }
                },
                Command::History => self.show_history()?,
                Command::Stats => {
                    writeln!(self.out, "{}", self.i18n.t("stats-title"))?;
                    let summary = self
                        .i18n
                        .stats_summary(&self.state.statistics, self.state.difficulty);
                    writeln!(self.out, "{summary}")?;
                }
                Command::Reset => {
                    write!(
                        self.out,
                        "{} {} ",
                        self.i18n.t("reset-message"),
                        self.i18n.t("console-confirm")
                    )?;
                    self.out.flush()?;
                    let answer = lines.next().transpose()?.unwrap_or_default();
                    if answer.trim().eq_ignore_ascii_case("y") {
                        self.state.reset();
                        writeln!(self.out, "{}", self.i18n.t("reset-done"))?;
                        writeln!(self.out, "{}", self.i18n.round_message(None))?;
                    }
                }
                Command::Theme => self.toggle_theme()?,
                Command::Help => writeln!(self.out, "{}", self.i18n.t("console-help"))?,
                Command::Quit => break,
                Command::Empty => {}
                Command::Unknown(input) => {
                    let mut args = FluentArgs::new();
                    args.set("input", input);
                    writeln!(self.out, "{}", self.i18n.t_args("console-unknown", &args))?;
                }
            }
        }
        writeln!(self.out, "{}", self.i18n.t("console-bye"))?;
        Ok(())
    }

    fn play(&mut self, player: Move) -> Result<(), ConsoleError> {
        let round = self.state.play(player, &mut self.rng);
        let mut args = FluentArgs::new();
        args.set("player", self.i18n.move_name(round.player));
        args.set("computer", self.i18n.move_name(round.computer));
        writeln!(self.out, "{}", self.i18n.t_args("console-you-chose", &args))?;
        writeln!(self.out, "{}", self.i18n.round_message(Some(&round)))?;
        writeln!(
            self.out,
            "{} | {}: {}",
            self.i18n.streak(&self.state.statistics),
            self.i18n.t("stat-win-rate"),
            self.i18n.win_rate(&self.state.statistics)
        )?;
        Ok(())
    }

    fn show_difficulty(&mut self) -> Result<(), ConsoleError> {
        let d = self.state.difficulty;
        let mut args = FluentArgs::new();
        args.set("name", self.i18n.difficulty_name(d));
        args.set("desc", self.i18n.difficulty_desc(d));
        writeln!(
            self.out,
            "{}",
            self.i18n.t_args("console-difficulty-set", &args)
        )?;
        Ok(())
    }

    fn show_history(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.out, "{}", self.i18n.t("history-title"))?;
        if self.state.statistics.history.is_empty() {
            writeln!(self.out, "  {}", self.i18n.t("history-empty"))?;
        }
        for round in &self.state.statistics.history {
            writeln!(
                self.out,
                "  {:<24} {}",
                self.i18n.history_entry(round),
                self.i18n.outcome_label(round.outcome)
            )?;
        }
        Ok(())
    }

    fn toggle_theme(&mut self) -> Result<(), ConsoleError> {
        self.settings.theme = self.settings.theme.toggled();
        if let Some(path) = &self.settings_path {
            if let Err(e) = storage::save_settings_to(path, &self.settings) {
                log::warn!("could not persist theme: {e}");
            }
        }
        let id = if self.settings.theme.is_dark() {
            "theme-dark"
        } else {
            "theme-light"
        };
        writeln!(self.out, "{}", self.i18n.t(id))?;
        Ok(())
    }
}
