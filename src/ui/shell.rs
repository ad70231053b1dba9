//! Interactive shell: the single-page catalog view driven by typed commands

use std::io::Write;

use tokio::io::AsyncBufRead;

use crate::{
    error::AppResult,
    models::{Book, NewBook},
    services::{CatalogService, Confirm, EditSession, LibraryState},
};

use super::{actions, notify::Notifier, prompt::LinePrompt, view};

const HELP: &str = "\
Commands:
  list              show the catalog
  search [TERM]     filter by title (no term clears the filter)
  refresh           reload the catalog from the server
  add               create a new book
  show N            show the book at position N
  edit N            edit the book at position N
  fav N             like / unlike the book at position N
  delete N          delete the book at position N
  help              show this help
  quit              leave
";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    List,
    Search(String),
    Refresh,
    Add,
    Show(usize),
    Edit(usize),
    Favorite(usize),
    Delete(usize),
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let position = |make: fn(usize) -> ShellCommand| match rest.parse::<usize>() {
            Ok(n) => make(n),
            Err(_) => ShellCommand::Unknown(line.to_string()),
        };

        match word.to_lowercase().as_str() {
            "" => ShellCommand::Empty,
            "help" | "?" => ShellCommand::Help,
            "list" | "ls" => ShellCommand::List,
            "search" | "find" => ShellCommand::Search(rest.to_string()),
            "refresh" | "reload" => ShellCommand::Refresh,
            "add" | "new" | "create" => ShellCommand::Add,
            "show" => position(ShellCommand::Show),
            "edit" => position(ShellCommand::Edit),
            "fav" | "like" | "favorite" => position(ShellCommand::Favorite),
            "delete" | "rm" => position(ShellCommand::Delete),
            "quit" | "exit" | "q" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}

pub struct Shell<R, W, N> {
    catalog: CatalogService,
    state: LibraryState,
    prompt: LinePrompt<R, W>,
    notifier: N,
    placeholder_cover: String,
}

impl<R, W, N> Shell<R, W, N>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
    N: Notifier,
{
    pub fn new(
        catalog: CatalogService,
        prompt: LinePrompt<R, W>,
        notifier: N,
        placeholder_cover: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            state: LibraryState::new(),
            prompt,
            notifier,
            placeholder_cover: placeholder_cover.into(),
        }
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    pub fn into_parts(self) -> (W, N) {
        (self.prompt.into_out(), self.notifier)
    }

    /// Run until `quit` or end of input
    pub async fn run(&mut self) -> AppResult<()> {
        write!(self.prompt.out(), "{}", view::header())?;
        self.print_library()?;
        self.catalog.activate(&mut self.state).await;
        self.print_library()?;

        while let Some(line) = self.prompt.read_line("> ").await? {
            match ShellCommand::parse(&line) {
                ShellCommand::Quit => break,
                command => self.execute(command).await?,
            }
        }

        write!(self.prompt.out(), "{}", view::footer())?;
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> AppResult<()> {
        match command {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => write!(self.prompt.out(), "{}", HELP)?,
            ShellCommand::List => self.print_library()?,
            ShellCommand::Search(term) => {
                self.state.set_search_term(term);
                self.print_library()?;
            }
            ShellCommand::Refresh => {
                let _ = self.catalog.refresh(&mut self.state).await;
                self.print_library()?;
            }
            ShellCommand::Add => self.create_form().await?,
            ShellCommand::Show(n) => {
                if let Some(book) = self.book_at(n) {
                    let details = view::details(&book, &self.placeholder_cover);
                    write!(self.prompt.out(), "{}", details)?;
                }
            }
            ShellCommand::Edit(n) => {
                if let Some(book) = self.book_at(n) {
                    self.edit_form(&book).await?;
                }
            }
            ShellCommand::Favorite(n) => {
                if let Some(book) = self.book_at(n) {
                    actions::toggle_favorite(&self.catalog, &mut self.state, &book, &mut self.notifier)
                        .await;
                    self.print_library()?;
                }
            }
            ShellCommand::Delete(n) => {
                if let Some(book) = self.book_at(n) {
                    let deleted = actions::delete_book(
                        &self.catalog,
                        &mut self.state,
                        &book,
                        &mut self.prompt,
                        &mut self.notifier,
                    )
                    .await;
                    if deleted {
                        self.print_library()?;
                    }
                }
            }
            ShellCommand::Unknown(line) => {
                self.notifier
                    .warning(&format!("Unknown command \"{}\" (type help)", line));
            }
        }
        Ok(())
    }

    fn book_at(&mut self, position: usize) -> Option<Book> {
        match self.state.book_at(position) {
            Ok(book) => Some(book.clone()),
            Err(e) => {
                actions::report_lookup(&mut self.notifier, &e);
                None
            }
        }
    }

    fn print_library(&mut self) -> AppResult<()> {
        let rendered = view::library(&self.state, &self.placeholder_cover);
        write!(self.prompt.out(), "{}", rendered)?;
        Ok(())
    }

    /// Stays open until the book is created or the user gives up
    async fn create_form(&mut self) -> AppResult<()> {
        let mut form = NewBook::default();
        loop {
            form.title = self.prompt.field("Book title", &form.title).await?;
            form.author = self.prompt.field("Author", &form.author).await?;
            form.cover_image = self
                .prompt
                .optional_field("Image URL", Some(form.cover_image.as_str()))
                .await?
                .unwrap_or_default();
            form.description = self
                .prompt
                .optional_field("Description", form.description.as_deref())
                .await?;

            if !self.prompt.confirm("Create book?").await? {
                writeln!(self.prompt.out(), "Creation cancelled")?;
                return Ok(());
            }
            if actions::create_book(&self.catalog, &mut self.state, &form, &mut self.notifier).await
            {
                return self.print_library();
            }
        }
    }

    /// Stays open until the changes are saved or the edit is cancelled
    async fn edit_form(&mut self, book: &Book) -> AppResult<()> {
        let mut session = EditSession::open(book);
        loop {
            let draft = session.draft().clone();
            let title = self.prompt.field("Title", &draft.title).await?;
            let author = self.prompt.field("Author", &draft.author).await?;
            let cover_image = self
                .prompt
                .optional_field("Cover Image URL", draft.cover_image.as_deref())
                .await?;
            let description = self
                .prompt
                .optional_field("Description", draft.description.as_deref())
                .await?;

            let fields = session.draft_mut();
            fields.title = title;
            fields.author = author;
            fields.cover_image = cover_image;
            fields.description = description;

            if !self.prompt.confirm("Save changes?").await? {
                session.cancel();
                writeln!(self.prompt.out(), "Edit cancelled")?;
                return Ok(());
            }
            if actions::save_edit(&self.catalog, &mut self.state, &session, &mut self.notifier).await
            {
                return self.print_library();
            }
        }
    }
}
