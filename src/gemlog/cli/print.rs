use colored::Colorize;
use gemlog::api::{CmdMessage, MessageLevel};
use gemlog::error::GemlogError;
use gemlog::model::Post;

const SUCCESS_MARK: &str = "✓";

pub(super) fn format_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => format!("{} {}", SUCCESS_MARK, message.content)
            .green()
            .to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", format_message(message));
    }
}

pub(super) fn format_post(post: &Post) -> String {
    format!("{} - {}", post.filename, post.title.bold())
}

pub(super) fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("{}", "No posts found.".dimmed());
        return;
    }
    for post in posts {
        println!("{}", format_post(post));
    }
}

pub(crate) fn print_error(err: &GemlogError) {
    eprintln!("{}", format!("Error: {}", err).red());
}
