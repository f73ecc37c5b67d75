//! Design editor core: scene model, editor session, and card templates.
//!
//! The `Scene` is the collaborator tracked by the snapshot history in
//! `design-pad-mod-history`; `EditorSession` ties scene, history,
//! clipboard, selection and zoom together for one open design.

pub mod card;
pub mod editor;
pub mod error;
pub mod history;
pub mod object;
pub mod presets;
pub mod scene;
pub mod shortcuts;
pub mod templates;

pub use editor::{EditorSession, EditorSettings};
pub use error::{EditorError, EditorResult};
pub use object::{ObjectId, ObjectKind, ObjectProperty, SceneObject};
pub use scene::{Background, Scene};
