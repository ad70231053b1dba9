//! Command line: the interactive shell and one-shot catalog commands

use std::io;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use crate::{
    error::AppResult,
    models::{Book, NewBook},
    services::{AssumeYes, CatalogService, Confirm, EditSession, LibraryState},
    ui::{actions, view, LinePrompt, Notifier, Shell, TerminalNotifier},
    AppState,
};

#[derive(Parser, Debug)]
#[clap(version, about = "My Library - manage a remote book catalog")]
pub struct Opts {
    /// Remote catalog base URL, overrides configuration
    #[clap(long, global = true)]
    pub base_url: Option<String>,
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive catalog (default)
    Shell,
    /// Print the catalog
    List {
        /// Only books whose title contains this text
        #[clap(short, long)]
        search: Option<String>,
    },
    /// Create a book
    Add {
        #[clap(long)]
        title: String,
        #[clap(long)]
        author: String,
        #[clap(long, default_value = "")]
        cover: String,
        #[clap(long)]
        description: Option<String>,
    },
    /// Edit a book; omitted fields keep their current value
    Edit {
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        author: Option<String>,
        /// Empty string removes the cover
        #[clap(long)]
        cover: Option<String>,
        /// Empty string removes the description
        #[clap(long)]
        description: Option<String>,
    },
    /// Like or unlike a book
    Favorite { id: String },
    /// Delete a book
    Delete {
        id: String,
        /// Do not ask for confirmation
        #[clap(short, long)]
        yes: bool,
    },
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

/// Fetch the catalog and look a book up by id
async fn load_book(
    catalog: &CatalogService,
    state: &mut LibraryState,
    id: &str,
    notifier: &mut dyn Notifier,
) -> Option<Book> {
    if let Some(Err(e)) = catalog.activate(state).await {
        actions::report_lookup(notifier, &e);
        return None;
    }
    match state.book(id) {
        Ok(book) => Some(book.clone()),
        Err(e) => {
            actions::report_lookup(notifier, &e);
            None
        }
    }
}

/// Run one command. `Ok(false)` means the flow failed and was reported.
pub async fn run(command: Command, app: &AppState) -> AppResult<bool> {
    let catalog = &app.services.catalog;
    let placeholder = app.config.ui.placeholder_cover.as_str();
    let mut notifier = TerminalNotifier::new(io::stdout());
    let mut state = LibraryState::new();

    match command {
        Command::Shell => {
            let prompt = LinePrompt::new(BufReader::new(tokio::io::stdin()), io::stdout());
            let mut shell = Shell::new(catalog.clone(), prompt, notifier, placeholder);
            shell.run().await?;
            Ok(true)
        }
        Command::List { search } => {
            if let Some(Err(_)) = catalog.activate(&mut state).await {
                notifier.error("Failed to load books");
                return Ok(false);
            }
            if let Some(term) = search {
                state.set_search_term(term);
            }
            print!("{}", view::library(&state, placeholder));
            Ok(true)
        }
        Command::Add {
            title,
            author,
            cover,
            description,
        } => {
            let form = NewBook {
                title,
                author,
                cover_image: cover,
                description,
            };
            Ok(actions::create_book(catalog, &mut state, &form, &mut notifier).await)
        }
        Command::Edit {
            id,
            title,
            author,
            cover,
            description,
        } => {
            let Some(book) = load_book(catalog, &mut state, &id, &mut notifier).await else {
                return Ok(false);
            };
            let mut session = EditSession::open(&book);
            let draft = session.draft_mut();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(author) = author {
                draft.author = author;
            }
            if let Some(cover) = cover {
                draft.cover_image = non_empty(cover);
            }
            if let Some(description) = description {
                draft.description = non_empty(description);
            }
            if !session.is_dirty() {
                notifier.info("Nothing to change");
                return Ok(true);
            }
            Ok(actions::save_edit(catalog, &mut state, &session, &mut notifier).await)
        }
        Command::Favorite { id } => {
            let Some(book) = load_book(catalog, &mut state, &id, &mut notifier).await else {
                return Ok(false);
            };
            Ok(actions::toggle_favorite(catalog, &mut state, &book, &mut notifier).await)
        }
        Command::Delete { id, yes } => {
            let Some(book) = load_book(catalog, &mut state, &id, &mut notifier).await else {
                return Ok(false);
            };
            let mut assume_yes = AssumeYes;
            let mut stdin_prompt;
            let confirm: &mut dyn Confirm = if yes {
                &mut assume_yes
            } else {
                stdin_prompt = LinePrompt::new(BufReader::new(tokio::io::stdin()), io::stdout());
                &mut stdin_prompt
            };
            Ok(actions::delete_book(catalog, &mut state, &book, confirm, &mut notifier).await)
        }
    }
}
