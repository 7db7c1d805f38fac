#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use callbook::client::HttpClient;
use callbook::config::Config;
use callbook::logging;
use callbook::tui::App;

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if let Some(path) = logging::default_log_path() {
        if let Err(e) = logging::init(&path) {
            eprintln!("warning: logging disabled ({}): {e}", path.display());
        }
    }

    let client = HttpClient::new(config.api_base()?, config.request_timeout())?
        .with_search_limit(config.search_limit());
    tracing::info!(host = %client.host(), "starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config.debounce(), client.host());
    let result = app.run(&mut terminal, client).await;

    let restore_result = restore_terminal();
    match result {
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            Err(e.into())
        }
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
