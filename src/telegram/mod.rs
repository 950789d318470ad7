//! Telegram bot integration and handlers

pub mod commands;
pub mod handlers;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

// Re-exports for convenience
pub use commands::Command;
pub use handlers::{handle_command, handle_message};

/// Bot client type used across handlers
pub type Bot = teloxide::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's
/// Dispatcher. The same schema is used in production and can be used in
/// integration tests.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry().branch(
        Update::filter_message()
            // Command handler
            .branch(teloxide::filter_command::<Command, _>().endpoint(handle_command))
            // Message handler for plain YouTube links
            .branch(dptree::endpoint(handle_message)),
    )
}
