use teloxide::utils::command::BotCommands;

/// Bot commands available to every chat.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "What I can do:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "find a track and send it as mp3")]
    Song(String),
    #[command(description = "find a clip and send it as mp4")]
    Video(String),
}
