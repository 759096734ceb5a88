// SPDX-License-Identifier: GPL-3.0-only

use bubble::app::AppModel;
use bubble::constants::ui;
use bubble::i18n;
use clap::Parser;

#[derive(Parser)]
#[command(name = "bubble")]
#[command(about = "Floating camera bubble for the COSMIC desktop")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=bubble=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let Cli {} = Cli::parse();

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // The bubble is a fixed-size square window; resizing happens only
    // through the app's own gesture handling.
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(
            ui::DEFAULT_BUBBLE_SIDE,
            ui::DEFAULT_BUBBLE_SIDE,
        ))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(ui::MIN_BUBBLE_SIDE)
                .min_height(ui::MIN_BUBBLE_SIDE)
                .max_width(ui::MAX_BUBBLE_SIDE)
                .max_height(ui::MAX_BUBBLE_SIDE),
        )
        .resizable(None)
        .transparent(true);

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
