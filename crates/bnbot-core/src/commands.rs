use crate::{
    messaging::types::{Command, IncomingUpdate},
    profile::{find_profile_link, mentions_profile_domain},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased, without `/` and `@botname`.
    pub name: String,
    pub mention: Option<String>,
    pub args: String,
}

/// Split `/cmd@botname arg1 ...` into the command name, the optional bot
/// mention and the trimmed remainder.
pub fn parse_command(text: &str) -> ParsedCommand {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let args = parts.next().unwrap_or("").trim().to_string();

    let mut head = first.trim_start_matches('/').splitn(2, '@');
    let name = head.next().unwrap_or("").to_lowercase();
    let mention = head.next().map(str::to_string);

    ParsedCommand {
        name,
        mention,
        args,
    }
}

/// Collapse free-form arguments into single-space separated text.
pub fn join_args(args: &str) -> String {
    args.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First whitespace-separated argument, if any.
pub fn first_arg(args: &str) -> Option<&str> {
    args.split_whitespace().next()
}

/// A command is ours when it names no bot or names `own_username`.
/// With an unknown own username, any addressed command is foreign.
fn addressed_to_us(cmd: &Command, own_username: Option<&str>) -> bool {
    match (cmd.mention.as_deref(), own_username) {
        (None, _) => true,
        (Some(mention), Some(own)) => mention.eq_ignore_ascii_case(own.trim_start_matches('@')),
        (Some(_), None) => false,
    }
}

/// Where an incoming update goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Help,
    Translate(String),
    /// Profile lookup; `None` when no link argument was given.
    Profile(Option<String>),
    Restart,
    Ignore,
}

impl Route {
    /// Unknown commands and commands addressed to another bot are ignored.
    pub fn from_update(update: &IncomingUpdate, own_username: Option<&str>) -> Self {
        match update {
            IncomingUpdate::Command(cmd) => {
                if !addressed_to_us(cmd, own_username) {
                    return Route::Ignore;
                }
                match cmd.name.as_str() {
                    "start" | "help" => Route::Help,
                    "translate" => Route::Translate(join_args(&cmd.args)),
                    "fb" => Route::Profile(first_arg(&cmd.args).map(str::to_string)),
                    "restart" => Route::Restart,
                    _ => Route::Ignore,
                }
            }
            IncomingUpdate::Text(msg) => {
                if !mentions_profile_domain(&msg.text) {
                    return Route::Ignore;
                }
                match find_profile_link(&msg.text) {
                    Some(link) => Route::Profile(Some(link.to_string())),
                    None => Route::Ignore,
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Help => "help",
            Route::Translate(_) => "translate",
            Route::Profile(_) => "profile",
            Route::Restart => "restart",
            Route::Ignore => "ignore",
        }
    }
}
