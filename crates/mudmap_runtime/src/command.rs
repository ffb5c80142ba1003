//! Shell command grammar.
//!
//! One command per line: a command word followed by arguments. Free-text
//! arguments (titles, descriptions, tags, destinations) take the rest of
//! the line verbatim.

use std::path::PathBuf;

use mudmap_foundation::{Coord, Error, Result};

/// Zoom action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zoom {
    /// Scale up one step.
    In,
    /// Scale down one step.
    Out,
    /// Recenter and restore scale 1.
    Reset,
}

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// List commands.
    Help,
    /// Click a grid cell: select, draft, or create.
    Click(Coord),
    /// Select the room at a cell.
    Select(Coord),
    /// Create a room at a cell.
    Create(Coord),
    /// Show the active room.
    Show,
    /// List all rooms.
    List,
    /// Set the local part of the active room's name.
    Name(String),
    /// Set the active room's title.
    Title(String),
    /// Set the active room's description. `\n` in the text is a line break.
    Desc(String),
    /// Write the active room back to the store.
    Save,
    /// Add an exit toward a direction.
    Exit(String),
    /// Rewrite an exit's destination.
    Dest(usize, String),
    /// Remove an exit.
    RemoveExit(usize),
    /// Add a tag.
    Tag(String),
    /// Remove a tag.
    Untag(String),
    /// Turn an attribute on or off.
    Flag(String, bool),
    /// Register an attribute.
    Attr(String, String),
    /// List attributes.
    Attrs,
    /// Save the active room as a template.
    Template,
    /// List templates.
    Templates,
    /// Apply a template by its one-based number.
    Apply(usize),
    /// Copy the active room.
    Copy,
    /// Delete the active room.
    Delete,
    /// Undo.
    Undo,
    /// Redo.
    Redo,
    /// Search rooms.
    Search(String),
    /// List prefixes.
    Prefixes,
    /// Add and select a prefix.
    PrefixAdd(String),
    /// Select a prefix.
    PrefixUse(String),
    /// Print the active room's script.
    Code,
    /// Write the export archive.
    Export(Option<PathBuf>),
    /// Import a snapshot file.
    Import(PathBuf),
    /// Remove every room.
    Clear {
        /// Whether `--yes` was given.
        confirmed: bool,
    },
    /// Change zoom.
    Zoom(Zoom),
    /// Pan the view.
    Pan(f64, f64),
    /// Show undo history.
    History,
    /// Leave the shell.
    Quit,
}

/// Every command word, for completion.
pub const COMMAND_WORDS: &[&str] = &[
    "help", "click", "select", "create", "show", "list", "name", "title", "desc", "save", "exit",
    "dest", "rmexit", "tag", "untag", "flag", "attr", "attrs", "template", "templates", "apply",
    "copy", "delete", "undo", "redo", "search", "prefixes", "prefix", "code", "export", "import",
    "clear", "zoom", "pan", "history", "quit",
];

/// Help text listing every command.
pub const HELP: &str = "\
click X Y          select the room at X,Y, or draft it (click twice to create)
select X Y         select the room at X,Y
create X Y         create a room at X,Y
show | list        show the active room | list all rooms
name LOCAL         set name to <selected prefix>LOCAL (then `save`)
title TEXT         set title (then `save`)
desc TEXT          set description, \\n for a line break (then `save`)
save               write the active room back to the map
exit DIR           add an exit (n, ne, e, se, s, sw, w, nw, or full names)
dest N TEXT        set destination of exit N
rmexit N           remove exit N
tag TEXT | untag TEXT
flag ID on|off     toggle an attribute
attr ID NAME       register an attribute | attrs: list them
template           save the active room as a template | templates: list
apply N            apply template N
copy | delete      copy or delete the active room
undo | redo | history
search TERM        find rooms by name, title, or tag
prefixes           list prefixes | prefix add P | prefix use P
code               print the active room's script
export [PATH]      write the zip archive
import PATH        replace the map with a map_data.json file
clear --yes        remove every room
zoom in|out|reset | pan DX DY
quit";

impl Command {
    /// Parses one line.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCommand` for an unknown word or bad arguments.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "click" => Self::Click(coord_arg(rest)?),
            "select" => Self::Select(coord_arg(rest)?),
            "create" => Self::Create(coord_arg(rest)?),
            "show" => Self::Show,
            "list" | "ls" => Self::List,
            "name" => Self::Name(rest.to_string()),
            "title" => Self::Title(rest.to_string()),
            "desc" => Self::Desc(rest.replace("\\n", "\n")),
            "save" => Self::Save,
            "exit" => Self::Exit(required(rest, "exit DIR")?.to_string()),
            "dest" => {
                let (index, text) = split_first(rest);
                Self::Dest(index_arg(index)?, text.to_string())
            }
            "rmexit" => Self::RemoveExit(index_arg(rest)?),
            "tag" => Self::Tag(rest.to_string()),
            "untag" => Self::Untag(required(rest, "untag TEXT")?.to_string()),
            "flag" => {
                let (id, state) = split_first(rest);
                let on = match state.to_ascii_lowercase().as_str() {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    _ => return Err(usage("flag ID on|off")),
                };
                Self::Flag(required(id, "flag ID on|off")?.to_string(), on)
            }
            "attr" => {
                let (id, name) = split_first(rest);
                Self::Attr(id.to_string(), name.to_string())
            }
            "attrs" => Self::Attrs,
            "template" => Self::Template,
            "templates" => Self::Templates,
            "apply" => Self::Apply(index_arg(rest)?),
            "copy" => Self::Copy,
            "delete" => Self::Delete,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "search" => Self::Search(rest.to_string()),
            "prefixes" => Self::Prefixes,
            "prefix" => {
                let (action, prefix) = split_first(rest);
                match action {
                    "add" => Self::PrefixAdd(prefix.to_string()),
                    "use" => Self::PrefixUse(required(prefix, "prefix use P")?.to_string()),
                    _ => return Err(usage("prefix add P | prefix use P")),
                }
            }
            "code" => Self::Code,
            "export" => Self::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "import" => Self::Import(PathBuf::from(required(rest, "import PATH")?)),
            "clear" => Self::Clear {
                confirmed: matches!(rest, "--yes" | "-y"),
            },
            "zoom" => Self::Zoom(match rest {
                "in" | "+" => Zoom::In,
                "out" | "-" => Zoom::Out,
                "reset" => Zoom::Reset,
                _ => return Err(usage("zoom in|out|reset")),
            }),
            "pan" => {
                let (dx, dy) = split_first(rest);
                Self::Pan(float_arg(dx)?, float_arg(dy)?)
            }
            "history" => Self::History,
            "quit" | "q" => Self::Quit,
            other => return Err(Error::invalid_command(format!("unknown command: {other}"))),
        };
        Ok(command)
    }
}

fn usage(text: &str) -> Error {
    Error::invalid_command(format!("usage: {text}"))
}

fn split_first(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace)
        .map_or((text, ""), |(a, b)| (a, b.trim()))
}

fn required<'a>(text: &'a str, form: &str) -> Result<&'a str> {
    if text.is_empty() {
        Err(usage(form))
    } else {
        Ok(text)
    }
}

/// Accepts `X Y` or `X,Y`.
fn coord_arg(text: &str) -> Result<Coord> {
    let (x, y) = split_first(text);
    if y.is_empty() {
        return x.parse();
    }
    let parse = |v: &str| {
        v.parse::<i32>()
            .map_err(|_| Error::invalid_command(format!("not a coordinate: {v}")))
    };
    Ok(Coord::new(parse(x)?, parse(y)?))
}

/// Shell indices are one-based.
fn index_arg(text: &str) -> Result<usize> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(Error::invalid_command(format!("not an index: {text}"))),
    }
}

fn float_arg(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|_| Error::invalid_command(format!("not a number: {text}")))
}
