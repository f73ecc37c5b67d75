//! The canvas scene: size, background and z-ordered objects.

use design_pad_config::HexColor;
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::history::{SceneState, Snapshot};
use crate::object::{ObjectId, SceneObject};

/// Canvas background fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    Solid {
        color: HexColor,
    },
    /// Linear gradient; `angle` in degrees.
    Gradient {
        from: HexColor,
        to: HexColor,
        angle: f32,
    },
}

impl Background {
    pub fn solid(color: HexColor) -> Self {
        Self::Solid { color }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::solid(HexColor::WHITE)
    }
}

/// A design canvas and everything placed on it.
///
/// Objects are kept in paint order: later entries are drawn on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    width: u32,
    height: u32,
    background: Background,
    objects: Vec<SceneObject>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(800, 600, Background::default())
    }
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Background) -> Self {
        Self {
            width,
            height,
            background,
            objects: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    /// Add an object on top of the others.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Remove an object from the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn remove(&mut self, id: ObjectId) -> EditorResult<SceneObject> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or(EditorError::ObjectNotFound(id))?;
        Ok(self.objects.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Objects in paint order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every object and resets the background to white.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.background = Background::default();
    }
}

impl SceneState for Scene {
    type Error = serde_json::Error;

    /// Serializes the scene and checks it parses back.
    ///
    /// serde_json writes NaN and infinity as `null`, which would give a
    /// snapshot that can never be restored; that surfaces here instead.
    fn capture(&self) -> Result<Snapshot, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        serde_json::from_str::<Scene>(&json)?;
        Ok(Snapshot::from(json))
    }

    /// Parses into a fresh scene first, so a malformed snapshot leaves
    /// `self` untouched.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), serde_json::Error> {
        let restored: Scene = serde_json::from_str(snapshot.as_str())?;
        *self = restored;
        Ok(())
    }
}
