//! Terminal presentation: views, notifications, prompts and the interactive shell

pub mod actions;
pub mod notify;
pub mod prompt;
pub mod shell;
pub mod view;

pub use notify::{Level, Notifier, TerminalNotifier, Toast};
pub use prompt::LinePrompt;
pub use shell::Shell;
