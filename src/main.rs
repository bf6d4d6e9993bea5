mod ai;
mod console;
mod game;
mod i18n;
mod storage;
#[cfg(feature = "gui")]
mod ui;

use std::io;

use console::{Console, ConsoleError};
use i18n::I18n;

/// Log filter used when `RUST_LOG` is unset. Kept at `warn` so stderr stays
/// quiet next to the console game.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
    let res_dir = find_resources_dir();

    let want_console = std::env::args().skip(1).any(|a| a == "--console");
    if cfg!(feature = "gui") && !want_console {
        #[cfg(feature = "gui")]
        run_gui(res_dir);
        return;
    }

    if let Err(e) = run_console(&res_dir) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(feature = "gui")]
fn run_gui(res_dir: String) {
    use gtk4::prelude::*;
    use gtk4::Application;

    let app = Application::builder()
        .application_id("io.github.laserlicht.RockPaperScissors")
        .build();

    app.connect_activate(move |app| {
        ui::app::build_ui(app, &res_dir);
    });

    // Arguments are handled above; don't let GTK reject them.
    app.run_with_args::<&str>(&[]);
}

fn run_console(res_dir: &str) -> Result<(), ConsoleError> {
    let i18n = I18n::load_from_dir(res_dir);
    log::info!("language: {}", i18n.current_language());
    let settings = storage::load_settings();
    let settings_path = storage::settings_path().ok();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(
        stdout.lock(),
        rand::thread_rng(),
        &i18n,
        settings,
        settings_path,
    );
    console.run(stdin.lock())
}

/// Locate the `resources/` directory holding the `.ftl` translations.
fn find_resources_dir() -> String {
    let candidates = [
        // cargo run from project root
        std::env::current_dir().ok().map(|d| d.join("resources")),
        // next to executable
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("resources"))),
    ];

    for candidate in candidates.iter().flatten() {
        if candidate.is_dir() {
            return candidate.to_string_lossy().to_string();
        }
    }

    "resources".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_events_are_hidden_by_default() {
        let filter: log::LevelFilter = DEFAULT_LOG_FILTER.parse().unwrap();
        assert_eq!(filter, log::LevelFilter::Warn);
        assert!(log::Level::Info > filter);
    }
}
