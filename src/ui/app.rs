use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gtk4::gdk::Display;
use gtk4::gio::{Menu, SimpleAction};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, Button, CssProvider, DropDown,
    HeaderBar, Label, MenuButton, Orientation, Separator, STYLE_PROVIDER_PRIORITY_APPLICATION,
};

use super::dialogs;
use crate::ai::Difficulty;
use crate::game::logic::GameState;
use crate::game::types::{Move, RoundOutcome};
use crate::i18n::I18n;
use crate::storage::{self, Settings, Theme};

/// Pause between the click and revealing the computer's move.
const REVEAL_DELAY: Duration = Duration::from_millis(300);
/// How long the chosen button stays highlighted afterwards.
const HIGHLIGHT_DURATION: Duration = Duration::from_millis(1500);

const CSS: &str = "
    .title-label    { font-weight: 700; font-size: 15px; }
    .score          { font-weight: 700; font-size: 28px; }
    .score-caption  { font-size: 12px; }
    .message        { font-size: 16px; margin: 8px 0; }
    .message.win    { color: #2e7d32; }
    .message.lose   { color: #c62828; }
    .choice         { font-size: 18px; padding: 12px 18px; }
    .choice.selected { border: 2px solid @accent_color; }
    .choice.winner  { background: alpha(#2e7d32, 0.25); }
    .stat-label     { font-size: 12px; margin: 0 6px; }
    .history-result.win  { color: #2e7d32; }
    .history-result.lose { color: #c62828; }
";

fn move_icon(m: Move) -> &'static str {
    match m {
        Move::Rock => "✊",
        Move::Paper => "✋",
        Move::Scissors => "✌",
    }
}

fn apply_theme(theme: Theme) {
    if let Some(gtk_settings) = gtk4::Settings::default() {
        gtk_settings.set_gtk_application_prefer_dark_theme(theme.is_dark());
    }
}

fn save_settings(settings: &Settings) {
    if let Err(e) = storage::save_settings(settings) {
        log::warn!("could not save settings: {e}");
    }
}

/// Labels and containers that reflect the session state.
struct Widgets {
    player_score: Label,
    computer_score: Label,
    message: Label,
    win_rate: Label,
    streak: Label,
    rounds: Label,
    difficulty_name: Label,
    difficulty_desc: Label,
    history: GtkBox,
    choices: Vec<(Move, Button)>,
}

impl Widgets {
    fn refresh(&self, state: &GameState, i18n: &I18n) {
        self.update_stats(state, i18n);
        self.update_message(state, i18n);
        self.update_history(state, i18n);
        self.update_difficulty(state.difficulty, i18n);
    }

    fn update_stats(&self, state: &GameState, i18n: &I18n) {
        let st = &state.statistics;
        self.player_score.set_text(&st.player_wins.to_string());
        self.computer_score.set_text(&st.computer_wins.to_string());
        self.rounds.set_text(&st.rounds.to_string());
        self.streak.set_text(&st.streak.to_string());
        self.win_rate.set_text(&i18n.win_rate(st));
    }

    fn update_message(&self, state: &GameState, i18n: &I18n) {
        self.message
            .set_text(&i18n.round_message(state.last_round.as_ref()));
        self.message.set_css_classes(&["message"]);
        if let Some(round) = &state.last_round {
            if round.outcome != RoundOutcome::Draw {
                self.message.add_css_class(round.outcome.key());
            }
        }
    }

    fn update_history(&self, state: &GameState, i18n: &I18n) {
        while let Some(child) = self.history.first_child() {
            self.history.remove(&child);
        }

        if state.statistics.history.is_empty() {
            let empty = Label::new(Some(&i18n.t("history-empty")));
            empty.add_css_class("dim-label");
            self.history.append(&empty);
            return;
        }

        for round in &state.statistics.history {
            let row = GtkBox::new(Orientation::Horizontal, 8);
            let entry = Label::new(Some(&i18n.history_entry(round)));
            entry.set_hexpand(true);
            entry.set_xalign(0.0);
            let result = Label::new(Some(&i18n.outcome_label(round.outcome)));
            result.add_css_class("history-result");
            result.add_css_class(round.outcome.key());
            row.append(&entry);
            row.append(&result);
            self.history.append(&row);
        }
    }

    fn update_difficulty(&self, difficulty: Difficulty, i18n: &I18n) {
        self.difficulty_name
            .set_text(&i18n.difficulty_name(difficulty));
        self.difficulty_desc
            .set_text(&i18n.difficulty_desc(difficulty));
    }

    fn set_processing(&self, busy: bool) {
        for (_, button) in &self.choices {
            button.set_sensitive(!busy);
        }
    }

    fn highlight(&self, player: Move, outcome: RoundOutcome) {
        for (m, button) in &self.choices {
            if *m == player {
                button.add_css_class("selected");
                if outcome == RoundOutcome::Win {
                    button.add_css_class("winner");
                }
            }
        }
    }

    fn clear_highlight(&self) {
        for (_, button) in &self.choices {
            button.remove_css_class("selected");
            button.remove_css_class("winner");
        }
    }
}

/// Start a round: lock input, wait briefly, then resolve and redraw.
fn play_round(
    player: Move,
    state: &Rc<RefCell<GameState>>,
    widgets: &Rc<Widgets>,
    i18n: &Rc<I18n>,
    processing: &Rc<Cell<bool>>,
) {
    if processing.get() {
        return;
    }
    processing.set(true);
    widgets.clear_highlight();
    widgets.set_processing(true);

    let state = state.clone();
    let widgets = widgets.clone();
    let i18n = i18n.clone();
    let processing = processing.clone();
    glib::timeout_add_local_once(REVEAL_DELAY, move || {
        let round = state.borrow_mut().play(player, &mut rand::thread_rng());
        widgets.refresh(&state.borrow(), &i18n);
        widgets.highlight(round.player, round.outcome);
        widgets.set_processing(false);
        processing.set(false);

        let widgets = widgets.clone();
        glib::timeout_add_local_once(HIGHLIGHT_DURATION, move || widgets.clear_highlight());
    });
}

fn score_column(caption: &str) -> (GtkBox, Label) {
    let column = GtkBox::new(Orientation::Vertical, 2);
    let value = Label::new(Some("0"));
    value.add_css_class("score");
    let caption = Label::new(Some(caption));
    caption.add_css_class("score-caption");
    column.append(&value);
    column.append(&caption);
    (column, value)
}

fn stat_pair(caption: &str, bar: &GtkBox) -> Label {
    let caption = Label::new(Some(&format!("{caption}:")));
    caption.add_css_class("stat-label");
    let value = Label::new(None);
    value.add_css_class("stat-label");
    bar.append(&caption);
    bar.append(&value);
    value
}

/// Build and present the main application window.
pub fn build_ui(app: &Application, resources_dir: &str) {
    // ── Shared state ──
    let settings = Rc::new(RefCell::new(storage::load_settings()));
    let i18n = Rc::new(I18n::load_from_dir(resources_dir));
    let state = Rc::new(RefCell::new(GameState::default()));
    let processing = Rc::new(Cell::new(false));
    log::info!("language: {}", i18n.current_language());

    apply_theme(settings.borrow().theme);

    // ── CSS ──
    let provider = CssProvider::new();
    provider.load_from_data(CSS);
    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    // ── Window ──
    let window = ApplicationWindow::builder()
        .application(app)
        .title(&i18n.t("app-title"))
        .default_width(460)
        .default_height(560)
        .resizable(true)
        .build();

    {
        let s = settings.borrow();
        if let (Some(w), Some(h)) = (s.window_width, s.window_height) {
            window.set_default_size(w, h);
        }
    }

    // ── Header bar ──
    let header = HeaderBar::new();
    header.set_show_title_buttons(true);
    let header_title = Label::new(Some(&i18n.t("app-title")));
    header_title.add_css_class("title-label");
    header.set_title_widget(Some(&header_title));

    let theme_button = Button::from_icon_name("weather-clear-night-symbolic");
    theme_button.set_tooltip_text(Some(&i18n.t("theme-toggle")));
    header.pack_start(&theme_button);

    let menu = Menu::new();
    menu.append(Some(&i18n.t("menu-reset")), Some("win.reset"));
    menu.append(Some(&i18n.t("menu-stats")), Some("win.stats"));
    let menu_button = MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");
    menu_button.set_menu_model(Some(&menu));
    header.pack_end(&menu_button);

    // ── Main layout ──
    let main_box = GtkBox::new(Orientation::Vertical, 12);
    main_box.set_margin_start(16);
    main_box.set_margin_end(16);
    main_box.set_margin_top(12);
    main_box.set_margin_bottom(12);

    // Scoreboard
    let scores = GtkBox::new(Orientation::Horizontal, 32);
    scores.set_halign(Align::Center);
    let (player_column, player_score) = score_column(&i18n.t("score-player"));
    let (computer_column, computer_score) = score_column(&i18n.t("score-computer"));
    scores.append(&player_column);
    scores.append(&Separator::new(Orientation::Vertical));
    scores.append(&computer_column);
    main_box.append(&scores);

    let message = Label::new(None);
    message.set_wrap(true);
    main_box.append(&message);

    // Move buttons
    let choice_bar = GtkBox::new(Orientation::Horizontal, 8);
    choice_bar.set_halign(Align::Center);
    let choices: Vec<(Move, Button)> = Move::ALL
        .into_iter()
        .map(|m| {
            let button =
                Button::with_label(&format!("{} {}", move_icon(m), i18n.move_label(m)));
            button.add_css_class("choice");
            choice_bar.append(&button);
            (m, button)
        })
        .collect();
    main_box.append(&choice_bar);

    // Difficulty
    let difficulty_box = GtkBox::new(Orientation::Horizontal, 8);
    let difficulty_caption = Label::new(Some(&i18n.t("difficulty-label")));
    let names: Vec<String> = Difficulty::ALL
        .iter()
        .map(|d| i18n.difficulty_name(*d))
        .collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let difficulty_select = DropDown::from_strings(&name_refs);
    difficulty_select.set_selected(state.borrow().difficulty.index() as u32);
    difficulty_box.append(&difficulty_caption);
    difficulty_box.append(&difficulty_select);
    main_box.append(&difficulty_box);

    let difficulty_name = Label::new(None);
    difficulty_name.set_xalign(0.0);
    difficulty_name.add_css_class("heading");
    let difficulty_desc = Label::new(None);
    difficulty_desc.set_xalign(0.0);
    difficulty_desc.set_wrap(true);
    difficulty_desc.add_css_class("dim-label");
    main_box.append(&difficulty_name);
    main_box.append(&difficulty_desc);

    // Status bar
    let status_bar = GtkBox::new(Orientation::Horizontal, 8);
    let win_rate = stat_pair(&i18n.t("stat-win-rate"), &status_bar);
    status_bar.append(&Separator::new(Orientation::Vertical));
    let streak = stat_pair(&i18n.t("stat-streak"), &status_bar);
    status_bar.append(&Separator::new(Orientation::Vertical));
    let rounds = stat_pair(&i18n.t("stat-rounds"), &status_bar);
    main_box.append(&status_bar);

    // History
    let history_title = Label::new(Some(&i18n.t("history-title")));
    history_title.set_xalign(0.0);
    history_title.add_css_class("heading");
    let history = GtkBox::new(Orientation::Vertical, 4);
    main_box.append(&history_title);
    main_box.append(&history);

    let widgets = Rc::new(Widgets {
        player_score,
        computer_score,
        message,
        win_rate,
        streak,
        rounds,
        difficulty_name,
        difficulty_desc,
        history,
        choices,
    });
    widgets.refresh(&state.borrow(), &i18n);

    // ── Signals ──
    for (m, button) in &widgets.choices {
        let m = *m;
        let state = state.clone();
        let widgets_for_click = widgets.clone();
        let i18n = i18n.clone();
        let processing = processing.clone();
        button.connect_clicked(move |_| {
            play_round(m, &state, &widgets_for_click, &i18n, &processing);
        });
    }

    {
        let state = state.clone();
        let widgets = widgets.clone();
        let i18n = i18n.clone();
        difficulty_select.connect_selected_notify(move |dd| {
            if let Some(d) = Difficulty::from_index(dd.selected() as usize) {
                state.borrow_mut().set_difficulty(d);
                widgets.update_difficulty(d, &i18n);
            }
        });
    }

    {
        let settings = settings.clone();
        theme_button.connect_clicked(move |_| {
            let mut s = settings.borrow_mut();
            s.theme = s.theme.toggled();
            apply_theme(s.theme);
            save_settings(&s);
        });
    }

    // ── Actions ──
    // Reset
    {
        let action = SimpleAction::new("reset", None);
        let state = state.clone();
        let widgets = widgets.clone();
        let i18n = i18n.clone();
        let win_for_closure = window.clone();
        action.connect_activate(move |_, _| {
            let state = state.clone();
            let widgets = widgets.clone();
            let i18n_for_reset = i18n.clone();
            dialogs::confirm_reset(&win_for_closure, &i18n, move || {
                state.borrow_mut().reset();
                widgets.clear_highlight();
                widgets.refresh(&state.borrow(), &i18n_for_reset);
            });
        });
        window.add_action(&action);
    }

    // Statistics
    {
        let action = SimpleAction::new("stats", None);
        let state = state.clone();
        let i18n = i18n.clone();
        let win_for_closure = window.clone();
        action.connect_activate(move |_, _| {
            let st = state.borrow();
            let summary = i18n.stats_summary(&st.statistics, st.difficulty);
            dialogs::show_info(&win_for_closure, &i18n.t("stats-title"), &summary, &i18n);
        });
        window.add_action(&action);
    }

    // ── Persist window size on close ──
    {
        let settings = settings.clone();
        window.connect_close_request(move |win| {
            let mut s = settings.borrow_mut();
            s.window_width = Some(win.width());
            s.window_height = Some(win.height());
            save_settings(&s);
            gtk4::Inhibit(false)
        });
    }

    window.set_titlebar(Some(&header));
    window.set_child(Some(&main_box));
    window.present();
}
