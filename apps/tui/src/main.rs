mod app;
mod cli;
mod config;
mod data;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = config::init_app_config();

    let headless = args.headless || !is_terminal();
    logging::init_logging(&config, headless)?;
    tracing::info!(data = %config.data_path.display(), headless, "starting");

    let catalog = data::load_catalog(&config.data_path)
        .await
        .wrap_err_with(|| {
            format!(
                "Data loading error: cannot use {}",
                config.data_path.display()
            )
        })?;

    if headless {
        return event::run_headless(&catalog, args.json, args.store.as_deref());
    }

    let mut app = App::new(catalog, config.search_debounce);

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app);
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
