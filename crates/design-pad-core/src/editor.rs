//! Editor session: one open design with its scene, history, clipboard,
//! selection and zoom.
//!
//! Every action that changes the scene commits exactly one snapshot once
//! the change is complete. View state (zoom, selection, clipboard) is not
//! part of the scene and is never committed.

use std::sync::Arc;

use chrono::{DateTime, Local};
use design_pad_config::{AppConfig, HexColor};

use crate::error::{EditorError, EditorResult};
use crate::history::{HistoryConfig, HistoryManager, PersistenceLayer, SceneState};
use crate::object::{Dimension, ObjectId, ObjectProperty, SceneObject};
use crate::presets::{self, IconPreset, LinePreset, ShapePreset, TextPreset, IMAGE_DROP_WIDTH};
use crate::scene::{Background, Scene};
use crate::shortcuts::EditorCommand;
use crate::templates::TemplateId;

/// Session settings derived from the application config.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: HexColor,
    pub font_family: String,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    pub paste_offset: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for EditorSettings {
    /// Builds settings from a sanitized copy of `config`.
    fn from(config: &AppConfig) -> Self {
        let mut config = config.clone();
        config.sanitize();
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            background: config.background_color,
            font_family: config.default_font_family.clone(),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            paste_offset: config.paste_offset,
        }
    }
}

impl EditorSettings {
    /// Clamps a zoom level into `[min_zoom, max_zoom]`.
    ///
    /// Never panics: an inverted or NaN range resolves to one of its bounds.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }
}

/// A single open design.
pub struct EditorSession {
    scene: Scene,
    history: HistoryManager,
    settings: EditorSettings,
    clipboard: Option<SceneObject>,
    active: Option<ObjectId>,
    zoom: f32,
    last_committed_at: Option<DateTime<Local>>,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("objects", &self.scene.len())
            .field("history", &self.history)
            .field("active", &self.active)
            .field("zoom", &self.zoom)
            .finish()
    }
}

impl EditorSession {
    /// Opens a session on top of the given history.
    ///
    /// An empty history gets the blank canvas committed as its initial
    /// state. A resumed history has its current snapshot restored instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial commit or the resume restore fails.
    pub fn open(settings: EditorSettings, mut history: HistoryManager) -> EditorResult<Self> {
        let mut scene = Scene::new(
            settings.canvas_width,
            settings.canvas_height,
            Background::solid(settings.background),
        );

        match history.current() {
            Some(snapshot) => {
                scene.restore(snapshot)?;
                tracing::info!(
                    "Resumed design {} at snapshot {} of {}",
                    history.session_id(),
                    history.cursor(),
                    history.len()
                );
            }
            None => history.commit(&scene)?,
        }

        Ok(Self {
            scene,
            history,
            settings,
            clipboard: None,
            active: None,
            zoom: 1.0,
            last_committed_at: None,
        })
    }

    /// Opens a session configured from `config`.
    ///
    /// With `persist_history` enabled the history of `design_id` is loaded
    /// from (and later flushed to) the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the history database cannot be opened or read.
    pub fn from_config(config: &AppConfig, design_id: &str) -> EditorResult<Self> {
        let history_config = HistoryConfig {
            max_history_depth: config.max_history_depth,
            ..HistoryConfig::default()
        };
        let history = if config.persist_history {
            let persistence = PersistenceLayer::open(&history_config.data_dir)
                .map_err(crate::history::HistoryError::from)?;
            HistoryManager::load_or_new(design_id.to_string(), history_config, Some(persistence))?
        } else {
            HistoryManager::new(design_id.to_string(), history_config, None)
        };
        Self::open(EditorSettings::from(config), history)
    }

    /// Opens a session with persistent history in an explicit database.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored history cannot be read or restored.
    pub fn open_persistent(
        settings: EditorSettings,
        design_id: &str,
        config: HistoryConfig,
        persistence: Arc<PersistenceLayer>,
    ) -> EditorResult<Self> {
        let history = HistoryManager::load_or_new(design_id.to_string(), config, Some(persistence))?;
        Self::open(settings, history)
    }

    /// Ends the session, flushing history to disk when persistent.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn close(mut self) -> EditorResult<()> {
        self.history.flush()?;
        tracing::debug!("Closed design {}", self.history.session_id());
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn clipboard(&self) -> Option<&SceneObject> {
        self.clipboard.as_ref()
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active.and_then(|id| self.scene.get(id))
    }

    /// When the last successful commit happened in this session.
    pub fn last_committed_at(&self) -> Option<DateTime<Local>> {
        self.last_committed_at
    }

    /// Selects an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn select(&mut self, id: ObjectId) -> EditorResult<()> {
        if !self.scene.contains(id) {
            return Err(EditorError::ObjectNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.active = None;
    }

    // ── Adding objects ─────────────────────────────────────────────────

    pub fn add_text(&mut self, preset: TextPreset) -> EditorResult<ObjectId> {
        let object = preset.build(&self.settings.font_family);
        self.add_object(object)
    }

    pub fn add_shape(&mut self, preset: ShapePreset) -> EditorResult<ObjectId> {
        self.add_object(preset.build())
    }

    pub fn add_line(&mut self, preset: LinePreset) -> EditorResult<ObjectId> {
        self.add_object(preset.build())
    }

    pub fn add_icon(&mut self, preset: IconPreset) -> EditorResult<ObjectId> {
        self.add_object(preset.build())
    }

    /// Adds an image scaled to the standard drop width.
    ///
    /// # Errors
    ///
    /// Returns an error if the natural size is not positive, or if the
    /// commit fails.
    pub fn add_image(
        &mut self,
        src: &str,
        natural_width: f32,
        natural_height: f32,
    ) -> EditorResult<ObjectId> {
        for (property, value) in [("width", natural_width), ("height", natural_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EditorError::InvalidValue { property, value });
            }
        }
        let mut object = presets::image(src, natural_width, natural_height);
        object.scale_to_width(IMAGE_DROP_WIDTH)?;
        self.add_object(object)
    }

    // ── Editing ────────────────────────────────────────────────────────

    /// Replaces the canvas background.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite gradient angle, or if the commit
    /// fails.
    pub fn set_background(&mut self, background: Background) -> EditorResult<()> {
        if let Background::Gradient { angle, .. } = &background {
            if !angle.is_finite() {
                return Err(EditorError::InvalidValue {
                    property: "angle",
                    value: *angle,
                });
            }
        }
        self.scene.set_background(background);
        self.commit()
    }

    /// Sets a property on the active object.
    ///
    /// Returns `Ok(false)` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the property does not fit the object, or if the
    /// commit fails (the change then stays applied but unrecorded).
    pub fn set_property(&mut self, property: ObjectProperty) -> EditorResult<bool> {
        let Some(object) = self.active_object_mut()? else {
            return Ok(false);
        };
        object.apply(property)?;
        self.commit()?;
        Ok(true)
    }

    /// Resizes the active object along one edge, keeping its aspect ratio.
    ///
    /// Returns `Ok(false)` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the object has no intrinsic size or the value
    /// is invalid, or if the commit fails.
    pub fn resize_active(&mut self, dimension: Dimension, value: f32) -> EditorResult<bool> {
        let Some(object) = self.active_object_mut()? else {
            return Ok(false);
        };
        object.scale_to(dimension, value)?;
        self.commit()?;
        Ok(true)
    }

    /// Copies the active object to the clipboard. Not a scene change.
    pub fn copy(&mut self) -> bool {
        match self.active_object().cloned() {
            Some(object) => {
                self.clipboard = Some(object);
                true
            }
            None => false,
        }
    }

    /// Pastes a fresh copy of the clipboard, offset from the original, and
    /// selects it.
    ///
    /// Returns `Ok(None)` when the clipboard is empty.
    pub fn paste(&mut self) -> EditorResult<Option<ObjectId>> {
        let Some(source) = &self.clipboard else {
            return Ok(None);
        };
        let copy = source.duplicate(self.settings.paste_offset);
        self.add_object(copy).map(Some)
    }

    /// Removes the active object.
    ///
    /// Returns `Ok(false)` when nothing is selected.
    pub fn delete_active(&mut self) -> EditorResult<bool> {
        let Some(id) = self.active else {
            return Ok(false);
        };
        self.scene.remove(id)?;
        self.active = None;
        self.commit()?;
        Ok(true)
    }

    /// Replaces the canvas with a starter template and a heading.
    ///
    /// The whole replacement is committed as a single step.
    pub fn load_template(&mut self, template: TemplateId) -> EditorResult<ObjectId> {
        let layout = template.layout();
        self.scene.clear();
        self.scene.set_size(layout.width, layout.height);
        self.scene.set_background(Background::solid(layout.background));
        let heading = TextPreset::Heading.build(&self.settings.font_family);
        let id = self.scene.add(heading);
        self.active = Some(id);
        tracing::debug!("Loaded template {}", template.slug());
        self.commit()?;
        Ok(id)
    }

    // ── View ───────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom + self.settings.zoom_step)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom - self.settings.zoom_step)
    }

    /// Sets the zoom level, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        // Round to whole percents so repeated steps don't accumulate drift.
        let zoom = (zoom * 100.0).round() / 100.0;
        let zoom = self.settings.clamp_zoom(zoom);
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
        self.zoom
    }

    /// Zoom as a whole percentage, e.g. `110` for 1.1.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    // ── History ────────────────────────────────────────────────────────

    /// Steps back one snapshot. Returns `Ok(false)` at the start of history.
    pub fn undo(&mut self) -> EditorResult<bool> {
        let moved = self.history.undo(&mut self.scene)?;
        self.drop_stale_selection();
        Ok(moved)
    }

    /// Steps forward one snapshot. Returns `Ok(false)` at the end of history.
    pub fn redo(&mut self) -> EditorResult<bool> {
        let moved = self.history.redo(&mut self.scene)?;
        self.drop_stale_selection();
        Ok(moved)
    }

    /// Runs a keyboard command. Returns whether anything happened.
    pub fn execute(&mut self, command: EditorCommand) -> EditorResult<bool> {
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Copy => Ok(self.copy()),
            EditorCommand::Paste => Ok(self.paste()?.is_some()),
            EditorCommand::Delete => self.delete_active(),
        }
    }

    fn add_object(&mut self, object: SceneObject) -> EditorResult<ObjectId> {
        let id = self.scene.add(object);
        self.active = Some(id);
        self.commit()?;
        Ok(id)
    }

    fn active_object_mut(&mut self) -> EditorResult<Option<&mut SceneObject>> {
        match self.active {
            None => Ok(None),
            Some(id) => self
                .scene
                .get_mut(id)
                .map(Some)
                .ok_or(EditorError::ObjectNotFound(id)),
        }
    }

    fn commit(&mut self) -> EditorResult<()> {
        if let Err(e) = self.history.commit(&self.scene) {
            tracing::warn!("Edit applied but not recorded in history: {e}");
            return Err(e.into());
        }
        self.last_committed_at = Some(Local::now());
        Ok(())
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.active {
            if !self.scene.contains(id) {
                self.active = None;
            }
        }
    }
}
