//! docgen editor engine: the canvas editor state machine and the wizard
//! step controller. Pure client-local state — hosts render it and feed
//! pointer/keyboard events back in.

pub mod canvas;
pub mod wizard;

pub use canvas::{CanvasEditor, ElementPatch, TextFormat};
pub use wizard::{SETTLE_INTERVAL, Step, Transition, WizardController};
