//! WASM bridge for docgen — exposes the wizard, the canvas editor, and
//! the identity store to the browser host.
//!
//! Compiled via `wasm-pack build --target web`. The host renders from the
//! JSON snapshots and feeds pointer/form events back through the typed
//! methods; all state lives on the Rust side.

pub mod storage;

use dg_core::id::{ElementId, TemplateId};
use dg_core::model::{ElementKind, EMOJI_PALETTE, TextAlign};
use dg_core::person::{Person, PersonDraft};
use dg_core::template;
use dg_editor::canvas::{
    CanvasEditor, ElementPatch, FONT_SIZE_RANGE, IMAGE_HEIGHT_RANGE, IMAGE_WIDTH_RANGE,
    LINE_WIDTH_RANGE, TextFormat,
};
use dg_editor::wizard::{SETTLE_INTERVAL, Step, WizardController};
use dg_store::{IdentityDraft, IdentityStore, KeyValueStorage, MemoryStorage};
use wasm_bindgen::prelude::*;

/// Pick the identity storage backend: browser `localStorage` when
/// available, otherwise a session-only in-memory fallback.
fn default_storage() -> Box<dyn KeyValueStorage> {
    #[cfg(target_arch = "wasm32")]
    {
        match storage::LocalStorage::new() {
            Ok(s) => return Box::new(s),
            Err(e) => log::warn!("identities will not persist: {e}"),
        }
    }
    Box::new(MemoryStorage::new())
}

fn parse_kind(kind: &str) -> Option<ElementKind> {
    match kind {
        "text" => Some(ElementKind::Text),
        "title" => Some(ElementKind::Title),
        "paragraph" => Some(ElementKind::Paragraph),
        "heading1" | "h1" => Some(ElementKind::Heading1),
        "heading2" | "h2" => Some(ElementKind::Heading2),
        "line" => Some(ElementKind::Line),
        "image" => Some(ElementKind::Image),
        "emoji" => Some(ElementKind::Emoji),
        _ => None,
    }
}

fn parse_align(align: &str) -> Option<TextAlign> {
    match align {
        "left" => Some(TextAlign::Left),
        "center" => Some(TextAlign::Center),
        "right" => Some(TextAlign::Right),
        _ => None,
    }
}

fn parse_format(format: &str) -> Option<TextFormat> {
    match format {
        "bold" => Some(TextFormat::Bold),
        "italic" => Some(TextFormat::Italic),
        "underline" => Some(TextFormat::Underline),
        _ => None,
    }
}

/// The main WASM-facing application controller.
///
/// Holds the wizard, the canvas editor, and the identity store. All
/// interaction from the host JS goes through this struct.
#[wasm_bindgen]
pub struct DgStudio {
    wizard: WizardController,
    canvas: CanvasEditor,
    identities: IdentityStore,
    storage: Box<dyn KeyValueStorage>,
}

#[wasm_bindgen]
impl DgStudio {
    /// Create the controller, loading any persisted identities.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let storage = default_storage();
        let identities = IdentityStore::load(storage.as_ref());
        Self {
            wizard: WizardController::new(),
            canvas: CanvasEditor::new(),
            identities,
            storage,
        }
    }

    // ─── Wizard ──────────────────────────────────────────────────────────

    /// Current 1-based step number.
    pub fn current_step(&self) -> u8 {
        self.wizard.step().number()
    }

    pub fn can_proceed_to(&self, step: u8) -> bool {
        Step::from_number(step).is_some_and(|s| self.wizard.can_proceed_to(s))
    }

    pub fn advance(&mut self) {
        self.wizard.advance();
    }

    pub fn retreat(&mut self) {
        self.wizard.retreat();
    }

    /// Apply the armed step change. The host calls this from a timer
    /// scheduled `settle_interval_ms` after `advance`/`retreat`.
    pub fn settle(&mut self) {
        self.wizard.settle();
        // Re-seed the canvas whenever the customize step is (re-)entered.
        if self.wizard.step() == Step::Customize {
            self.canvas = CanvasEditor::new();
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.wizard.is_transitioning()
    }

    pub fn settle_interval_ms(&self) -> u32 {
        SETTLE_INTERVAL.as_millis() as u32
    }

    pub fn completion_percentage(&self) -> u8 {
        self.wizard.completion_percentage()
    }

    // ─── People ──────────────────────────────────────────────────────────

    pub fn people_json(&self) -> String {
        serde_json::to_string(self.wizard.people()).unwrap_or_else(|_| "[]".into())
    }

    /// Quick-add a random sample person; returns the created record.
    pub fn add_sample_person(&mut self) -> String {
        let person = self.wizard.add_sample_person();
        serde_json::to_string(person).unwrap_or_else(|_| "{}".into())
    }

    /// Register a person from a draft JSON object. Returns false on
    /// malformed input.
    pub fn add_person(&mut self, draft_json: &str) -> bool {
        match serde_json::from_str::<PersonDraft>(draft_json) {
            Ok(draft) => {
                self.wizard.add_person(draft);
                true
            }
            Err(e) => {
                log::warn!("rejected person draft: {e}");
                false
            }
        }
    }

    /// Replace the whole people list (external people source boundary).
    pub fn set_people(&mut self, people_json: &str) -> bool {
        match serde_json::from_str::<Vec<Person>>(people_json) {
            Ok(people) => {
                self.wizard.set_people(people);
                true
            }
            Err(e) => {
                log::warn!("rejected people list: {e}");
                false
            }
        }
    }

    // ─── Templates ───────────────────────────────────────────────────────

    pub fn templates_json(&self) -> String {
        serde_json::to_string(template::CATALOG).unwrap_or_else(|_| "[]".into())
    }

    pub fn select_template(&mut self, id: u32) {
        self.wizard.select_template(TemplateId(id));
    }

    pub fn selected_template_json(&self) -> Option<String> {
        let tpl = self.wizard.selected_template()?;
        serde_json::to_string(tpl).ok()
    }

    // ─── Canvas ──────────────────────────────────────────────────────────

    pub fn elements_json(&self) -> String {
        serde_json::to_string(self.canvas.elements()).unwrap_or_else(|_| "[]".into())
    }

    pub fn selected_element_id(&self) -> Option<f64> {
        self.canvas.selected_id().map(|id| id.raw() as f64)
    }

    /// Add an element by kind name ("text", "h1", "emoji", ...). Returns
    /// the new element's id, or None for an unknown kind.
    pub fn add_element(&mut self, kind: &str) -> Option<f64> {
        let kind = parse_kind(kind)?;
        Some(self.canvas.add_element(kind).raw() as f64)
    }

    pub fn select_element(&mut self, id: f64) {
        self.canvas.select(ElementId::from_raw(id as u64));
    }

    pub fn begin_drag(&mut self, id: f64, offset_x: f32, offset_y: f32) {
        self.canvas
            .begin_drag(ElementId::from_raw(id as u64), offset_x, offset_y);
    }

    /// Pointer-move in canvas-space coordinates.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        self.canvas.drag_to(x, y);
    }

    pub fn end_drag(&mut self) {
        self.canvas.end_drag();
    }

    /// Pointer left the canvas region. Same as pointer-up, so a drag can
    /// never get stuck armed.
    pub fn pointer_left_canvas(&mut self) {
        self.canvas.end_drag();
    }

    /// Merge a property patch (JSON object of optional fields) into the
    /// selected element. Returns false on malformed input.
    pub fn update_selected(&mut self, patch_json: &str) -> bool {
        match serde_json::from_str::<ElementPatch>(patch_json) {
            Ok(patch) => {
                self.canvas.update_selected(patch);
                true
            }
            Err(e) => {
                log::warn!("rejected element patch: {e}");
                false
            }
        }
    }

    /// Toggle "bold" | "italic" | "underline" on the selection.
    pub fn toggle_format(&mut self, format: &str) -> bool {
        let Some(format) = parse_format(format) else {
            return false;
        };
        self.canvas.toggle_format(format);
        true
    }

    /// Set "left" | "center" | "right" alignment on the selection.
    pub fn set_alignment(&mut self, align: &str) -> bool {
        let Some(align) = parse_align(align) else {
            return false;
        };
        self.canvas.set_alignment(align);
        true
    }

    /// Assign uploaded image bytes to the selected image element.
    pub fn upload_image(&mut self, data: &[u8], mime: &str) {
        self.canvas.replace_image_source(data, mime);
    }

    pub fn emoji_palette_json(&self) -> String {
        serde_json::to_string(EMOJI_PALETTE).unwrap_or_else(|_| "[]".into())
    }

    /// Property-panel slider ranges, keyed by control name.
    pub fn property_ranges_json(&self) -> String {
        format!(
            "{{\"font_size\":[{},{}],\"image_width\":[{},{}],\"image_height\":[{},{}],\"line_width\":[{},{}]}}",
            FONT_SIZE_RANGE.start(),
            FONT_SIZE_RANGE.end(),
            IMAGE_WIDTH_RANGE.start(),
            IMAGE_WIDTH_RANGE.end(),
            IMAGE_HEIGHT_RANGE.start(),
            IMAGE_HEIGHT_RANGE.end(),
            LINE_WIDTH_RANGE.start(),
            LINE_WIDTH_RANGE.end(),
        )
    }

    // ─── Identities ──────────────────────────────────────────────────────

    pub fn identities_json(&self) -> String {
        serde_json::to_string(self.identities.list()).unwrap_or_else(|_| "[]".into())
    }

    pub fn active_identity_json(&self) -> Option<String> {
        let active = self.identities.active()?;
        serde_json::to_string(active).ok()
    }

    /// Create an identity from a draft JSON object. The required-field
    /// check lives here, in front of the store. Returns the created
    /// record, or None when the draft is malformed or incomplete.
    pub fn create_identity(&mut self, draft_json: &str) -> Option<String> {
        let draft: IdentityDraft = match serde_json::from_str(draft_json) {
            Ok(draft) => draft,
            Err(e) => {
                log::warn!("rejected identity draft: {e}");
                return None;
            }
        };
        if !draft.is_complete() {
            return None;
        }
        let created = serde_json::to_string(self.identities.create(draft)).ok();
        self.persist_identities();
        created
    }

    /// Mark the identity with `id` as active. Returns false when no such
    /// identity exists.
    pub fn select_identity(&mut self, id: &str) -> bool {
        let Some(identity) = self.identities.list().iter().find(|i| i.id == id).cloned() else {
            return false;
        };
        self.identities.select(identity);
        self.persist_identities();
        true
    }

    pub fn delete_identity(&mut self, id: &str) {
        self.identities.delete(id);
        self.persist_identities();
    }

    // ─── Generation ──────────────────────────────────────────────────────

    /// One personalized document per person, as a JSON array. Empty when
    /// generation is not reachable yet.
    pub fn generate_json(&self) -> String {
        let docs = self.wizard.generate(self.canvas.elements());
        serde_json::to_string(&docs).unwrap_or_else(|_| "[]".into())
    }
}

impl DgStudio {
    fn persist_identities(&mut self) {
        if let Err(e) = self.identities.save(self.storage.as_mut()) {
            log::warn!("failed to persist identities: {e}");
        }
    }
}

impl Default for DgStudio {
    fn default() -> Self {
        Self::new()
    }
}
