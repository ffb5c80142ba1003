//! Editing session.
//!
//! The session owns every piece of editor state: the room store, the
//! attribute registry, templates, prefixes, the room being edited, undo
//! history, and the viewport. Each operation that changes the room store
//! commits exactly one history snapshot.
//!
//! The room being edited is a working copy. Field edits (`set_local_name`,
//! `set_title`, `set_description`) only touch the copy until `save_room`
//! writes it back; exits, tags, flags, and templates write back
//! immediately. The copy may also be a draft: a room at an empty cell that
//! is not in the store yet.

use std::path::{Path, PathBuf};

use mudmap_codegen::{Archive, CodeGenerator, MapData, export_all, import_all};
use mudmap_foundation::{Coord, Error, ErrorKind, Result, RoomId};
use mudmap_history::HistoryStack;
use mudmap_storage::{
    AttributeRegistry, Exit, PrefixStore, Room, RoomStore, Template, TemplateStore, linker,
};

use crate::config::SessionConfig;
use crate::persist::{Loaded, Persistence};
use crate::view::ViewState;

/// What a grid click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An existing room became the active room.
    Selected,
    /// An empty cell became the active draft.
    Drafted,
    /// The draft cell was clicked again and is now a stored room.
    Created,
}

/// Records changed since the last save.
#[derive(Clone, Copy, Debug, Default)]
struct Dirty {
    rooms: bool,
    templates: bool,
    prefixes: bool,
}

/// State for one editing session.
pub struct Session {
    rooms: RoomStore,
    registry: AttributeRegistry,
    templates: TemplateStore,
    prefixes: PrefixStore,
    selected_prefix: String,
    current: Option<Room>,
    search_results: Vec<Room>,
    history: HistoryStack,
    view: ViewState,
    generator: CodeGenerator,
    persistence: Persistence,
    config: SessionConfig,
    dirty: Dirty,
}

impl Session {
    /// Creates an empty session with in-memory persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates an empty session with in-memory persistence.
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self::from_loaded(config, Persistence::in_memory(), Loaded::default())
    }

    /// Opens a session over `persistence`, loading whatever it holds.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the store cannot be read, or if an unreadable
    /// record cannot be copied aside.
    pub fn open(config: SessionConfig, mut persistence: Persistence) -> Result<Self> {
        let loaded = persistence.load()?;
        Ok(Self::from_loaded(config, persistence, loaded))
    }

    fn from_loaded(config: SessionConfig, persistence: Persistence, loaded: Loaded) -> Self {
        let rooms = loaded.rooms.unwrap_or_default();
        let templates = loaded.templates.unwrap_or_default();
        let prefixes = loaded
            .prefixes
            .unwrap_or_else(|| PrefixStore::from_vec(config.default_prefixes.clone()));
        let selected_prefix = prefixes.first().unwrap_or_default().to_string();
        log::info!(
            "session opened with {} room(s), {} template(s), {} prefix(es)",
            rooms.len(),
            templates.len(),
            prefixes.len()
        );

        Self {
            history: HistoryStack::with_config(rooms.snapshot(), config.history.clone()),
            generator: CodeGenerator::with_config(config.generator.clone()),
            rooms,
            registry: AttributeRegistry::default(),
            templates,
            prefixes,
            selected_prefix,
            current: None,
            search_results: Vec::new(),
            view: ViewState::default(),
            persistence,
            config,
            dirty: Dirty::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// All rooms.
    #[must_use]
    pub const fn rooms(&self) -> &RoomStore {
        &self.rooms
    }

    /// The attribute registry.
    #[must_use]
    pub const fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Saved templates.
    #[must_use]
    pub const fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Known prefixes.
    #[must_use]
    pub const fn prefixes(&self) -> &PrefixStore {
        &self.prefixes
    }

    /// The prefix used for names and synthesized destinations.
    #[must_use]
    pub fn selected_prefix(&self) -> &str {
        &self.selected_prefix
    }

    /// The room being edited, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Room> {
        self.current.as_ref()
    }

    /// True if the room being edited is not in the store.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|room| self.rooms.get(&room.id()).is_none())
    }

    /// Results of the last search.
    #[must_use]
    pub fn search_results(&self) -> &[Room] {
        &self.search_results
    }

    /// Undo history.
    #[must_use]
    pub const fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// The viewport.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable viewport.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// The script generator.
    #[must_use]
    pub const fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The persistence layer.
    #[must_use]
    pub const fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    fn active(&self) -> Result<&Room> {
        self.current
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::NoActiveRoom))
    }

    fn active_mut(&mut self) -> Result<&mut Room> {
        self.current
            .as_mut()
            .ok_or_else(|| Error::new(ErrorKind::NoActiveRoom))
    }

    // =========================================================================
    // Selection and placement
    // =========================================================================

    /// Handles a click on the grid cell `coord`.
    ///
    /// An occupied cell selects its room. An empty cell becomes a draft;
    /// clicking the draft's cell again creates the room.
    ///
    /// # Errors
    ///
    /// Propagates `create` failures.
    pub fn click(&mut self, coord: Coord) -> Result<ClickOutcome> {
        if let Some(room) = self.rooms.at(coord) {
            self.current = Some(room.clone());
            return Ok(ClickOutcome::Selected);
        }
        if self.current.as_ref().is_some_and(|r| r.coord() == coord) {
            self.create(coord)?;
            return Ok(ClickOutcome::Created);
        }
        self.current = Some(Room::new(coord));
        Ok(ClickOutcome::Drafted)
    }

    /// Makes the room at `coord` the active room.
    pub fn select(&mut self, coord: Coord) -> Option<&Room> {
        let room = self.rooms.at(coord)?.clone();
        Some(&*self.current.insert(room))
    }

    /// Places a new room at `coord` and makes it the active room.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCoordinate` if the cell is occupied.
    pub fn create(&mut self, coord: Coord) -> Result<&Room> {
        let room = self.rooms.create(coord)?;
        self.commit(format!("create {coord}"));
        Ok(&*self.current.insert(room))
    }

    // =========================================================================
    // Working-copy edits
    // =========================================================================

    /// Sets the active room's name to the selected prefix plus `local`.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn set_local_name(&mut self, local: &str) -> Result<()> {
        let name = format!("{}{local}", self.selected_prefix);
        self.active_mut()?.name = name;
        Ok(())
    }

    /// Sets the active room's title.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.active_mut()?.title = title.to_string();
        Ok(())
    }

    /// Sets the active room's description.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn set_description(&mut self, description: &str) -> Result<()> {
        self.active_mut()?.description = description.to_string();
        Ok(())
    }

    /// Writes the active room back to the store.
    ///
    /// Commits a snapshot even when no stored room matched (a draft).
    /// Returns whether a stored room was replaced.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn save_room(&mut self) -> Result<bool> {
        let room = self.active()?.clone();
        Ok(self.commit_update(room, "save room"))
    }

    // =========================================================================
    // Immediate edits
    // =========================================================================

    /// Adds an exit from the active room toward `heading`.
    ///
    /// Returns the new exit, or `None` for `center` or when nothing is being
    /// edited.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDirection` if `heading` is not a direction.
    pub fn add_exit(&mut self, heading: &str) -> Result<Option<Exit>> {
        let updated = linker::add_exit(
            &self.rooms,
            self.current.as_ref(),
            heading,
            &self.selected_prefix,
        )?;
        let Some(updated) = updated else {
            return Ok(None);
        };
        let exit = updated.exits.last().cloned();
        self.commit_update(updated, "add exit");
        Ok(exit)
    }

    /// Rewrites the destination of exit `index`.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` or `ExitIndexOutOfBounds`.
    pub fn set_exit_destination(&mut self, index: usize, destination: &str) -> Result<()> {
        let mut room = self.active()?.clone();
        let length = room.exits.len();
        let exit = room
            .exits
            .get_mut(index)
            .ok_or_else(|| Error::new(ErrorKind::ExitIndexOutOfBounds { index, length }))?;
        exit.destination = destination.to_string();
        self.commit_update(room, "edit exit");
        Ok(())
    }

    /// Removes exit `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` or `ExitIndexOutOfBounds`.
    pub fn remove_exit(&mut self, index: usize) -> Result<Exit> {
        let mut room = self.active()?.clone();
        let length = room.exits.len();
        if index >= length {
            return Err(Error::new(ErrorKind::ExitIndexOutOfBounds { index, length }));
        }
        let exit = room.exits.remove(index);
        self.commit_update(room, "remove exit");
        Ok(exit)
    }

    /// Adds a tag. An empty tag is ignored and commits nothing.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool> {
        let mut room = self.active()?.clone();
        if !room.add_tag(tag) {
            return Ok(false);
        }
        self.commit_update(room, "add tag");
        Ok(true)
    }

    /// Removes every copy of `tag`. Commits whether or not it was present.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn remove_tag(&mut self, tag: &str) -> Result<bool> {
        let mut room = self.active()?.clone();
        let removed = room.remove_tag(tag);
        self.commit_update(room, "remove tag");
        Ok(removed)
    }

    /// Turns attribute `id` on or off for the active room.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom`, or `UnknownAttribute` if `id` is not
    /// registered.
    pub fn set_flag(&mut self, id: &str, on: bool) -> Result<()> {
        let mut room = self.active()?.clone();
        room.set_attribute(&self.registry, id, on)?;
        self.commit_update(room, "set flag");
        Ok(())
    }

    /// Adds an attribute to the registry.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAttributeId` or `InvalidAttribute`.
    pub fn register_attribute(&mut self, id: &str, name: &str) -> Result<()> {
        self.registry.register(id, name)
    }

    // =========================================================================
    // Templates, copy, delete
    // =========================================================================

    /// Saves the active room as a template.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn save_template(&mut self) -> Result<&Template> {
        let room = self.active()?.clone();
        self.dirty.templates = true;
        Ok(self.templates.save(&room))
    }

    /// Applies template `index` to the active room.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` or `TemplateNotFound`.
    pub fn apply_template(&mut self, index: usize) -> Result<()> {
        let room = self.templates.apply(index, self.active()?)?;
        self.commit_update(room, "apply template");
        Ok(())
    }

    /// Copies the active room one cell south-east and selects the copy.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited, or `OffGrid` if
    /// the copy would leave the coordinate range.
    pub fn copy_current(&mut self) -> Result<&Room> {
        let source = self.active()?.clone();
        let copy = self.rooms.copy(&source)?;
        self.commit("copy room");
        Ok(&*self.current.insert(copy))
    }

    /// Deletes the active room and clears the selection.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn delete_current(&mut self) -> Result<RoomId> {
        let id = self.active()?.id();
        self.rooms.delete(&id);
        self.current = None;
        self.commit(format!("delete {id}"));
        Ok(id)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Steps back one state. Returns false at the oldest state.
    pub fn undo(&mut self) -> bool {
        let Some(store) = self.history.undo().map(|s| s.store().snapshot()) else {
            return false;
        };
        self.restore(&store);
        true
    }

    /// Steps forward one state. Returns false at the newest state.
    pub fn redo(&mut self) -> bool {
        let Some(store) = self.history.redo().map(|s| s.store().snapshot()) else {
            return false;
        };
        self.restore(&store);
        true
    }

    fn restore(&mut self, store: &RoomStore) {
        self.rooms.restore(store);
        let refreshed = self
            .current
            .as_ref()
            .and_then(|room| self.rooms.get(&room.id()))
            .cloned();
        if refreshed.is_some() {
            self.current = refreshed;
        }
        self.dirty.rooms = true;
    }

    fn commit(&mut self, label: impl Into<String>) {
        let label = label.into();
        log::debug!("commit '{label}' ({} room(s))", self.rooms.len());
        self.history.commit(self.rooms.snapshot(), label);
        self.dirty.rooms = true;
    }

    fn commit_update(&mut self, room: Room, label: &str) -> bool {
        let matched = self.rooms.update(&room);
        self.current = Some(room);
        self.commit(label);
        matched
    }

    // =========================================================================
    // Search and prefixes
    // =========================================================================

    /// Finds rooms whose name, title, or a tag contains `term`, ignoring
    /// case. The results are kept until the next search or clear.
    pub fn search(&mut self, term: &str) -> &[Room] {
        self.search_results = self.rooms.search(term).cloned().collect();
        &self.search_results
    }

    /// Adds `prefix` and selects it. Empty or known prefixes are ignored.
    pub fn add_prefix(&mut self, prefix: &str) -> bool {
        if !self.prefixes.add(prefix) {
            return false;
        }
        self.selected_prefix = prefix.to_string();
        self.dirty.prefixes = true;
        true
    }

    /// Selects a known prefix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCommand` if `prefix` is not in the list.
    pub fn use_prefix(&mut self, prefix: &str) -> Result<()> {
        if !self.prefixes.contains(prefix) {
            return Err(Error::invalid_command(format!("unknown prefix: {prefix}")));
        }
        self.selected_prefix = prefix.to_string();
        Ok(())
    }

    // =========================================================================
    // Code, export, import
    // =========================================================================

    /// Generates the script for the active room.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRoom` if nothing is being edited.
    pub fn generate_current(&self) -> Result<String> {
        Ok(self.generator.generate(self.active()?, &self.registry))
    }

    /// Builds the export archive in memory.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the snapshot cannot be encoded.
    pub fn export_archive(&self) -> Result<Archive> {
        export_all(&self.rooms, &self.registry, &self.generator)
    }

    /// Writes the export archive to `path`, or to the configured archive
    /// name when `path` is `None`. Returns where it was written.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveAssemblyFailure` or `IoError`; nothing is written on
    /// assembly failure.
    pub fn export(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path.map_or_else(|| PathBuf::from(&self.config.archive_name), Path::to_path_buf);
        self.export_archive()?.write_zip(&path)?;
        Ok(path)
    }

    /// Replaces rooms and registry from a snapshot document.
    /// Returns the number of rooms imported.
    ///
    /// # Errors
    ///
    /// Returns `MalformedImport`; the session is unchanged on error.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let data = import_all(json)?;
        Ok(self.replace_map(data))
    }

    /// Replaces rooms and registry from a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` or `MalformedImport`; the session is unchanged on
    /// error.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let data = mudmap_codegen::import_file(path)?;
        Ok(self.replace_map(data))
    }

    fn replace_map(&mut self, data: MapData) -> usize {
        let count = data.rooms.len();
        self.rooms = data.room_store();
        self.registry = data.attribute_templates;
        self.current = None;
        self.view.reset();
        self.history.reset(self.rooms.snapshot(), "import");
        self.dirty.rooms = true;
        log::info!("map replaced by import: {count} room(s)");
        count
    }

    /// Removes every room and resets history and the view.
    /// Templates and prefixes survive.
    ///
    /// # Errors
    ///
    /// Returns `ConfirmationRequired` unless `confirmed`.
    pub fn clear_all(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(Error::new(ErrorKind::ConfirmationRequired(
                "clear".to_string(),
            )));
        }
        let count = self.rooms.len();
        self.rooms.clear();
        self.current = None;
        self.search_results.clear();
        self.history.reset(self.rooms.snapshot(), "clear");
        self.view.reset();
        self.dirty.rooms = true;
        log::info!("cleared {count} room(s)");
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// True if a record changed since the last save.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty.rooms || self.dirty.templates || self.dirty.prefixes
    }

    /// Rewrites every changed record.
    ///
    /// # Errors
    ///
    /// Returns the first write failure; records not yet written stay dirty.
    pub fn save(&mut self) -> Result<()> {
        if self.dirty.rooms {
            self.persistence.save_rooms(&self.rooms)?;
            self.dirty.rooms = false;
        }
        if self.dirty.templates {
            self.persistence.save_templates(&self.templates)?;
            self.dirty.templates = false;
        }
        if self.dirty.prefixes {
            self.persistence.save_prefixes(&self.prefixes)?;
            self.dirty.prefixes = false;
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
