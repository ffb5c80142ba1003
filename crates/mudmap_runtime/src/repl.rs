//! The interactive shell.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use mudmap_foundation::{Error, ErrorContext, Result};
use mudmap_storage::Room;

use crate::command::{Command, HELP, Zoom};
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{ClickOutcome, Session};

/// The interactive shell.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Editing state.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Cleared by `quit`.
    running: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a shell over `session` with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "mudmap> ".to_string(),
            running: true,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Consumes the shell, returning the session.
    #[must_use]
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Runs the shell loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }
        self.refresh_keywords();

        while self.running {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line) {
                Ok(output) if !output.is_empty() => println!("{output}"),
                Ok(_) => {}
                Err(e) => print_error(&e),
            }
            self.refresh_keywords();
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Parses and executes one line, then saves changed records.
    ///
    /// Returns the text to show the user.
    ///
    /// # Errors
    ///
    /// Returns the command's error. The session keeps its last valid
    /// state.
    pub fn eval(&mut self, input: &str) -> Result<String> {
        let command = Command::parse(input)?;
        let output = self.execute(command);
        if let Err(e) = self.session.save() {
            log::warn!("could not save session: {e}");
        }
        output
    }

    /// Runs every line of a command file. Blank lines and lines starting
    /// with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Stops at the first failing line; the error names the file and line.
    pub fn eval_file(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::io(e.to_string())
                .with_context(ErrorContext::new().with_source(path.display().to_string()))
        })?;

        for (number, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let output = self.eval(line).map_err(|e| {
                e.with_context(
                    ErrorContext::new()
                        .with_source(format!("{}:{}", path.display(), number + 1))
                        .with_frame(line.to_string()),
                )
            })?;
            if !output.is_empty() {
                println!("{output}");
            }
            if !self.running {
                break;
            }
        }
        Ok(())
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns the underlying session error.
    #[allow(clippy::too_many_lines)]
    pub fn execute(&mut self, command: Command) -> Result<String> {
        let session = &mut self.session;
        let out = match command {
            Command::Help => HELP.to_string(),
            Command::Click(coord) => match session.click(coord)? {
                ClickOutcome::Selected => format!("selected {}", describe_current(session)),
                ClickOutcome::Drafted => {
                    format!("draft at {coord}; click again to create it")
                }
                ClickOutcome::Created => format!("created {}", describe_current(session)),
            },
            Command::Select(coord) => match session.select(coord) {
                Some(room) => format!("selected {}", summary(room)),
                None => format!("no room at {coord}"),
            },
            Command::Create(coord) => format!("created {}", summary(session.create(coord)?)),
            Command::Show => match session.current() {
                Some(room) => show_room(room, session.is_draft()),
                None => "no room selected".to_string(),
            },
            Command::List => {
                if session.rooms().is_empty() {
                    "no rooms".to_string()
                } else {
                    session
                        .rooms()
                        .iter()
                        .map(summary)
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::Name(local) => {
                session.set_local_name(&local)?;
                pending(session)
            }
            Command::Title(text) => {
                session.set_title(&text)?;
                pending(session)
            }
            Command::Desc(text) => {
                session.set_description(&text)?;
                pending(session)
            }
            Command::Save => {
                if session.save_room()? {
                    "saved".to_string()
                } else {
                    "saved (no stored room matched; use `create` first)".to_string()
                }
            }
            Command::Exit(heading) => match session.add_exit(&heading)? {
                Some(exit) => format!("exit {} -> {}", exit.direction, exit.destination),
                None if session.current().is_none() => "no room selected".to_string(),
                None => "center is not an exit".to_string(),
            },
            Command::Dest(index, text) => {
                session.set_exit_destination(index, &text)?;
                format!("exit {} -> {text}", index + 1)
            }
            Command::RemoveExit(index) => {
                let exit = session.remove_exit(index)?;
                format!("removed exit {} -> {}", exit.direction, exit.destination)
            }
            Command::Tag(tag) => {
                if session.add_tag(&tag)? {
                    format!("tagged {tag}")
                } else {
                    String::new()
                }
            }
            Command::Untag(tag) => {
                if session.remove_tag(&tag)? {
                    format!("untagged {tag}")
                } else {
                    format!("no tag {tag}")
                }
            }
            Command::Flag(id, on) => {
                session.set_flag(&id, on)?;
                format!("{id} {}", if on { "on" } else { "off" })
            }
            Command::Attr(id, name) => {
                session.register_attribute(&id, &name)?;
                format!("registered {id} ({name})")
            }
            Command::Attrs => session
                .registry()
                .iter()
                .map(|a| format!("{}  {}", a.id, a.name))
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Template => format!("saved template {}", session.save_template()?.name),
            Command::Templates => {
                if session.templates().is_empty() {
                    "no templates".to_string()
                } else {
                    session
                        .templates()
                        .iter()
                        .enumerate()
                        .map(|(i, t)| format!("{:>3}. {}  ({})", i + 1, t.name, t.room.name))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::Apply(index) => {
                session.apply_template(index)?;
                format!("applied template {}", index + 1)
            }
            Command::Copy => format!("copied to {}", summary(session.copy_current()?)),
            Command::Delete => format!("deleted {}", session.delete_current()?),
            Command::Undo => {
                if session.undo() {
                    history_position(session)
                } else {
                    "nothing to undo".to_string()
                }
            }
            Command::Redo => {
                if session.redo() {
                    history_position(session)
                } else {
                    "nothing to redo".to_string()
                }
            }
            Command::Search(term) => {
                let results = session.search(&term);
                if results.is_empty() {
                    "no matches".to_string()
                } else {
                    results.iter().map(summary).collect::<Vec<_>>().join("\n")
                }
            }
            Command::Prefixes => {
                let selected = session.selected_prefix();
                session
                    .prefixes()
                    .iter()
                    .map(|p| format!("{} {p}", if p == selected { "*" } else { " " }))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::PrefixAdd(prefix) => {
                if session.add_prefix(&prefix) {
                    format!("using {prefix}")
                } else {
                    format!("prefix {prefix:?} not added")
                }
            }
            Command::PrefixUse(prefix) => {
                session.use_prefix(&prefix)?;
                format!("using {prefix}")
            }
            Command::Code => session.generate_current()?,
            Command::Export(path) => {
                let written = session.export(path.as_deref())?;
                format!(
                    "exported {} room(s) to {}",
                    session.rooms().len(),
                    written.display()
                )
            }
            Command::Import(path) => {
                let count = session.import_file(&path)?;
                format!("imported {count} room(s)")
            }
            Command::Clear { confirmed } => {
                session.clear_all(confirmed)?;
                "cleared all rooms".to_string()
            }
            Command::Zoom(zoom) => {
                let view = session.view_mut();
                match zoom {
                    Zoom::In => view.zoom_in(),
                    Zoom::Out => view.zoom_out(),
                    Zoom::Reset => view.reset(),
                }
                format!("scale {:.2}", view.scale)
            }
            Command::Pan(dx, dy) => {
                let view = session.view_mut();
                view.pan(dx, dy);
                format!("offset ({}, {})", view.offset_x, view.offset_y)
            }
            Command::History => {
                let history = session.history();
                history
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        let marker = if i == history.cursor() { ">" } else { " " };
                        format!("{marker} {i:>3} {} ({} rooms)", s.label(), s.store().len())
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Quit => {
                self.running = false;
                String::new()
            }
        };
        Ok(out)
    }

    fn refresh_keywords(&mut self) {
        let mut words: Vec<String> = self
            .session
            .prefixes()
            .iter()
            .map(String::from)
            .collect();
        words.extend(self.session.registry().iter().map(|a| a.id.clone()));
        words.extend(["add", "use", "on", "off", "in", "out", "reset", "--yes"].map(String::from));
        self.editor.set_keywords(words);
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mmudmap\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type `help` for commands. Use Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
    if let Some(context) = &error.context {
        eprintln!("{context}");
    }
}

fn summary(room: &Room) -> String {
    format!("{:>8}  {}  {}", room.id().as_str(), room.name, room.title)
}

fn describe_current(session: &Session) -> String {
    session.current().map(summary).unwrap_or_default()
}

fn pending(session: &Session) -> String {
    format!("{} (unsaved)", describe_current(session))
}

fn history_position(session: &Session) -> String {
    let history = session.history();
    format!(
        "at state {}/{} ({})",
        history.cursor() + 1,
        history.len(),
        history.current().label()
    )
}

fn show_room(room: &Room, draft: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:    {}{}", room.id(), if draft { " (draft)" } else { "" });
    let _ = writeln!(out, "name:  {}", room.name);
    let _ = writeln!(out, "title: {}", room.title);
    let _ = writeln!(out, "desc:  {}", room.description.replace('\n', "\n       "));
    for (i, exit) in room.exits.iter().enumerate() {
        let _ = writeln!(out, "exit {}: {} -> {}", i + 1, exit.direction.label(), exit.destination);
    }
    if !room.tags.is_empty() {
        let _ = writeln!(out, "tags:  {}", room.tags.join(", "));
    }
    let flags: Vec<_> = room.attributes().iter().collect();
    if !flags.is_empty() {
        let _ = writeln!(out, "flags: {}", flags.join(", "));
    }
    out.trim_end().to_string()
}
