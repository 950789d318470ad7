//! Message and command handlers.
//!
//! The bot-facing boundary: every download or search failure below this
//! layer arrives as an absence value, and the handlers translate it into
//! a "couldn't fulfil this request" reply. Nothing from the lower layers
//! can bubble an error into the dispatcher except Telegram API failures.

use crate::core::error::{AppError, AppResult};
use crate::telegram::commands::Command;
use crate::telegram::Bot;
use crate::youtube::{resolver, Track, YouTubeApi};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::utils::command::BotCommands;

/// Handle a parsed bot command.
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, api: Arc<YouTubeApi>) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "🎵 Send me a YouTube link or use /song <query> to get music.\n\n{}",
                    Command::descriptions()
                ),
            )
            .await?;
        }
        Command::Song(query) => serve_media(&bot, &msg, &api, query, false).await?,
        Command::Video(query) => serve_media(&bot, &msg, &api, query, true).await?,
    }
    Ok(())
}

/// Handle a plain (non-command) message: a YouTube link anywhere in the
/// message or its reply target is treated as a song request.
pub async fn handle_message(bot: Bot, msg: Message, api: Arc<YouTubeApi>) -> ResponseResult<()> {
    let Some(url) = resolver::url_from_message(&msg) else {
        return Ok(());
    };
    if !resolver::is_youtube_link(&url) {
        return Ok(());
    }
    serve_media(&bot, &msg, &api, url, false).await
}

/// Resolve a query or link to a track, download it, and send the file.
async fn serve_media(bot: &Bot, msg: &Message, api: &YouTubeApi, query: String, video: bool) -> ResponseResult<()> {
    let query = query.trim().to_string();
    let query = if query.is_empty() {
        // Empty command argument: fall back to a link carried by the
        // message itself or the message it replies to
        match resolver::url_from_message(msg) {
            Some(url) => url,
            None => {
                bot.send_message(msg.chat.id, "Send me a YouTube link or a search query.")
                    .await?;
                return Ok(());
            }
        }
    } else {
        query
    };

    let Some(track) = api.track(&query).await else {
        log::info!("No search result for {:?}", query);
        bot.send_message(msg.chat.id, "😔 Couldn't find anything for that request.")
            .await?;
        return Ok(());
    };

    let status = bot
        .send_message(msg.chat.id, format!("⏳ Fetching: {} ({})", track.title, track.duration))
        .await?;

    if let Err(e) = send_track(bot, msg.chat.id, api, &track, video).await {
        log::error!("Failed to serve {}: {}", track.video_id, e);
        bot.edit_message_text(msg.chat.id, status.id, "😔 Download failed, try again later.")
            .await?;
        return Ok(());
    }

    let _ = bot.delete_message(msg.chat.id, status.id).await;
    Ok(())
}

/// Download the track and push it into the chat.
async fn send_track(bot: &Bot, chat_id: ChatId, api: &YouTubeApi, track: &Track, video: bool) -> AppResult<()> {
    let Some(path) = api.download(&track.link, video, false).await else {
        return Err(AppError::Download(format!("no artifact for {}", track.video_id)));
    };

    if video {
        bot.send_video(chat_id, InputFile::file(path))
            .caption(track.title.clone())
            .await?;
    } else {
        bot.send_audio(chat_id, InputFile::file(path))
            .title(track.title.clone())
            .await?;
    }

    Ok(())
}
