use std::path::Path;

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use unic_langid::LanguageIdentifier;

use crate::ai::Difficulty;
use crate::game::types::{Move, Round, RoundOutcome, Statistics};

/// English strings compiled into the binary, used when `resources/` is missing.
const EMBEDDED_EN: &str = include_str!("../../resources/en.ftl");

/// Fluent-based internationalization.
pub struct I18n {
    bundle: FluentBundle<FluentResource>,
    lang: String,
}

/// Map a system locale such as `de-AT` to a supported language code.
pub fn lang_for_locale(locale: &str) -> &'static str {
    if locale.to_lowercase().starts_with("de") {
        "de"
    } else {
        "en"
    }
}

impl I18n {
    /// Load `<lang>.ftl` from the resources directory for the system language,
    /// falling back to English on disk and then to the embedded copy.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let sys_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let lang_code = lang_for_locale(&sys_lang);

        if let Some(i18n) = Self::try_load(dir, lang_code) {
            return i18n;
        }
        if lang_code != "en" {
            if let Some(i18n) = Self::try_load(dir, "en") {
                return i18n;
            }
        }
        log::warn!(
            "no translations found in {}, using built-in English",
            dir.display()
        );
        Self::english()
    }

    /// The built-in English bundle.
    pub fn english() -> Self {
        Self::from_source("en", EMBEDDED_EN.to_string()).unwrap_or_else(|| Self {
            bundle: FluentBundle::new(vec![LanguageIdentifier::default()]),
            lang: "en".to_string(),
        })
    }

    fn try_load(dir: &Path, lang: &str) -> Option<Self> {
        let path = dir.join(format!("{}.ftl", lang));
        let source = std::fs::read_to_string(&path).ok()?;
        let i18n = Self::from_source(lang, source);
        if i18n.is_none() {
            log::warn!("could not parse {}", path.display());
        }
        i18n
    }

    fn from_source(lang: &str, source: String) -> Option<Self> {
        let resource = FluentResource::try_new(source).ok()?;
        let langid: LanguageIdentifier = lang.parse().ok()?;
        let mut bundle = FluentBundle::new(vec![langid]);
        // Output goes to labels and terminals, not bidi-aware markup.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).ok()?;
        Some(Self {
            bundle,
            lang: lang.to_string(),
        })
    }

    /// Get a translated message by its identifier.
    pub fn t(&self, id: &str) -> String {
        self.format(id, None)
    }

    /// Get a translated message with arguments.
    pub fn t_args(&self, id: &str, args: &FluentArgs) -> String {
        self.format(id, Some(args))
    }

    fn format(&self, id: &str, args: Option<&FluentArgs>) -> String {
        let Some(pattern) = self.bundle.get_message(id).and_then(|m| m.value()) else {
            return id.to_string();
        };
        let mut errors = vec![];
        let text = self
            .bundle
            .format_pattern(pattern, args, &mut errors)
            .to_string();
        if !errors.is_empty() {
            log::debug!("formatting {id}: {errors:?}");
        }
        text
    }

    /// Shorthand for a message with a single `$value` argument.
    fn t_value(&self, id: &str, value: impl ToString) -> String {
        let mut args = FluentArgs::new();
        args.set("value", value.to_string());
        self.t_args(id, &args)
    }

    pub fn current_language(&self) -> &str {
        &self.lang
    }

    pub fn move_name(&self, m: Move) -> String {
        self.t(&format!("move-{}", m.key()))
    }

    /// Capitalized move name for buttons.
    #[cfg_attr(not(feature = "gui"), allow(dead_code))]
    pub fn move_label(&self, m: Move) -> String {
        self.t(&format!("move-{}-label", m.key()))
    }

    pub fn difficulty_name(&self, d: Difficulty) -> String {
        self.t(d.profile().name_key)
    }

    pub fn difficulty_desc(&self, d: Difficulty) -> String {
        self.t(d.profile().desc_key)
    }

    fn round_args(&self, round: &Round) -> FluentArgs<'static> {
        let mut args = FluentArgs::new();
        args.set("player", self.move_name(round.player));
        args.set("computer", self.move_name(round.computer));
        args
    }

    /// Message line text: the last round's result, or the idle prompt.
    pub fn round_message(&self, round: Option<&Round>) -> String {
        match round {
            Some(round) => {
                let id = format!("message-{}", round.outcome.key());
                self.t_args(&id, &self.round_args(round))
            }
            None => self.t("message-idle"),
        }
    }

    pub fn outcome_label(&self, outcome: RoundOutcome) -> String {
        self.t(&format!("result-{}", outcome.key()))
    }

    /// "rock vs paper" part of a history row.
    pub fn history_entry(&self, round: &Round) -> String {
        self.t_args("history-entry", &self.round_args(round))
    }

    /// Win rate with one decimal, or a dash before the first round.
    pub fn win_rate(&self, stats: &Statistics) -> String {
        match stats.win_rate() {
            Some(rate) => format!("{:.1}%", rate),
            None => self.t("win-rate-none"),
        }
    }

    /// Multi-line summary shown by the statistics dialog and console command.
    pub fn stats_summary(&self, stats: &Statistics, difficulty: Difficulty) -> String {
        let rate = match stats.win_rate() {
            Some(rate) => format!("{:.1}", rate),
            None => "0".to_string(),
        };
        [
            self.t_value("stats-total", stats.rounds),
            self.t_value("stats-wins", stats.player_wins),
            self.t_value("stats-losses", stats.computer_wins),
            self.t_value("stats-draws", stats.draws()),
            self.t_value("stats-win-rate", rate),
            self.t_value("stats-streak", stats.streak),
            self.t_value("stats-difficulty", self.difficulty_name(difficulty)),
        ]
        .join("\n")
    }

    pub fn streak(&self, stats: &Statistics) -> String {
        self.t_value("console-streak", stats.streak)
    }
}
