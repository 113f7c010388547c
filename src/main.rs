#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::rc::Rc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use sidebar_checkout::config::CheckoutConfig;
use sidebar_checkout::logging;
use sidebar_checkout::model::{Product, SystemClock};
use sidebar_checkout::order::InMemoryOrderStore;
use sidebar_checkout::purchase::SimulatedCheckout;
use sidebar_checkout::tui::{App, AppError};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CheckoutConfig::from_env().map_err(AppError::from)?;
    let log_dir = logging::default_log_dir().map_err(AppError::from)?;
    let log_path = logging::init(&log_dir).map_err(AppError::from)?;
    info!(
        rules = %config.rules,
        mode = %config.mode,
        delivery = %config.delivery,
        log = %log_path.display(),
        "starting checkout"
    );

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let store = Rc::new(InMemoryOrderStore::with_cart(demo_cart()));
    let api = Rc::new(SimulatedCheckout::default());
    let mut app = App::new(config, store, api, Rc::new(SystemClock))?;

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn demo_cart() -> Vec<Product> {
    vec![
        Product::new(1, "Cafeteira italiana", 15990),
        Product::new(2, "Filtro de papel 103", 1250),
        Product::new(3, "Moedor manual", 189900),
    ]
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
