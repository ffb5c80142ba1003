//! LPC room script generation.
//!
//! Each room becomes one `inherit ROOM;` file. Output depends only on the
//! room and the attribute registry: flag assignments follow registry order
//! and exits follow their stored order.

use std::borrow::Cow;
use std::fmt::Write;

use mudmap_storage::{AttributeRegistry, Room};

/// Configuration for script generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// File extension for generated scripts, without the dot.
    pub extension: String,
    /// Escape quotes, backslashes, and control characters inside string
    /// literals. When off, text is interpolated verbatim and a quote in a
    /// title or description produces a broken script.
    pub escape_strings: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extension: "c".to_string(),
            escape_strings: true,
        }
    }
}

impl GeneratorConfig {
    /// Builder method to set the file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method to enable/disable string escaping.
    #[must_use]
    pub const fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_strings = escape;
        self
    }
}

/// Turns rooms into LPC source.
#[derive(Clone, Debug, Default)]
pub struct CodeGenerator {
    config: GeneratorConfig,
}

impl CodeGenerator {
    /// Creates a generator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with custom configuration.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The file name a room's script is written under.
    #[must_use]
    pub fn file_name(&self, room: &Room) -> String {
        format!("{}.{}", room.name, self.config.extension)
    }

    /// Generates the script for `room`.
    #[must_use]
    pub fn generate(&self, room: &Room, registry: &AttributeRegistry) -> String {
        let flags = registry
            .iter()
            .filter(|attr| room.has_attribute(&attr.id))
            .map(|attr| format!("set(\"{}\", 1);", attr.id))
            .collect::<Vec<_>>()
            .join("\n  ");

        let exits = room
            .exits
            .iter()
            .map(|exit| {
                format!(
                    "\"{}\" : \"{}\"",
                    exit.direction,
                    self.literal(&exit.destination)
                )
            })
            .collect::<Vec<_>>()
            .join(",\n        ");

        let mut out = String::new();
        let _ = writeln!(out, "// {}", self.file_name(room));
        let _ = writeln!(out, "#include <ansi.h>");
        let _ = writeln!(out, "#include <room.h>");
        let _ = writeln!(out);
        let _ = writeln!(out, "inherit ROOM;");
        let _ = writeln!(out);
        let _ = writeln!(out, "void create()");
        let _ = writeln!(out, "{{");
        let _ = writeln!(out, "  set(\"short\", \"{}\");", self.literal(&room.title));
        let _ = writeln!(out, "  set(\"long\", \"{}\");", self.literal(&room.description));
        let _ = writeln!(out, "  {flags}");
        let _ = writeln!(out, "  ");
        let _ = writeln!(out, "  set(\"exits\", ([");
        let _ = writeln!(out, "      {exits}");
        let _ = writeln!(out, "  ]));");
        let _ = writeln!(out);
        let _ = writeln!(out, "  setup();");
        let _ = writeln!(out, "}}");
        out
    }

    fn literal<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.config.escape_strings {
            escape_lpc(text)
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Escapes `text` for use inside an LPC string literal.
#[must_use]
pub fn escape_lpc(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
