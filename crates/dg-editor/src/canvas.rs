//! Canvas editor state: the ordered element collection, the single
//! selection, and the drag gesture.
//!
//! All operations that target a missing or unselected element are silent
//! no-ops — this is an editor, not a transactional system. The host only
//! ever observes state through the accessors; disabled controls are its
//! concern.
//!
//! Drag protocol: `begin_drag` records the pointer offset within the
//! element so the element does not jump to the pointer on the first move.
//! `drag_to` takes the pointer in canvas space and repositions the
//! selected element, clamped to non-negative coordinates. The host must
//! call `end_drag` on pointer-up AND on the pointer leaving the canvas —
//! treating both identically avoids stuck drags.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use dg_core::id::ElementId;
use dg_core::model::{
    Color, Element, ElementKind, FontStyle, Position, TextAlign, TextDecoration, WEIGHT_BOLD,
    WEIGHT_NORMAL,
};
use serde::{Deserialize, Serialize};

// Property-panel slider ranges. The editor itself does not clamp patch
// values; hosts use these to build their controls.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<f32> = 12.0..=48.0;
pub const IMAGE_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 50.0..=400.0;
pub const IMAGE_HEIGHT_RANGE: std::ops::RangeInclusive<f32> = 50.0..=300.0;
pub const LINE_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 50.0..=500.0;

/// The toggleable text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Bold,
    Italic,
    Underline,
}

/// A partial element update — every property-panel edit funnels through
/// one of these. Only `Some` fields are applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub content: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<u16>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub text_align: Option<TextAlign>,
    pub color: Option<Color>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub image_source: Option<String>,
}

impl ElementPatch {
    /// Merge this patch into `el`, overwriting only `Some` fields.
    fn apply_to(self, el: &mut Element) {
        if let Some(content) = self.content {
            el.content = content;
        }
        if let Some(size) = self.font_size {
            el.style.font_size = size;
        }
        if let Some(weight) = self.font_weight {
            el.style.font_weight = weight;
        }
        if let Some(style) = self.font_style {
            el.style.font_style = style;
        }
        if let Some(deco) = self.text_decoration {
            el.style.text_decoration = deco;
        }
        if let Some(align) = self.text_align {
            el.style.text_align = align;
        }
        if let Some(color) = self.color {
            el.style.color = color;
        }
        if let Some(width) = self.width {
            el.width = Some(width);
        }
        if let Some(height) = self.height {
            el.height = Some(height);
        }
        if let Some(src) = self.image_source {
            el.image_source = Some(src);
        }
    }
}

/// Armed drag gesture: the offset between the pointer and the element
/// origin, captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    offset: Position,
}

/// The canvas editor.
///
/// Insertion order of `elements` is z-order (later = on top). At most one
/// element is selected at a time.
#[derive(Debug, Clone)]
pub struct CanvasEditor {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    drag: Option<DragState>,
}

impl CanvasEditor {
    /// A canvas pre-seeded with the placeholder text element, selected —
    /// the state the wizard hands over when the user opens the editor.
    pub fn new() -> Self {
        let mut seed = Element::new_at(ElementKind::Text, 50.0, 50.0);
        seed.content = "Name: {{name}}".to_string();
        let selected = Some(seed.id);
        Self {
            elements: vec![seed],
            selected,
            drag: None,
        }
    }

    /// An empty canvas with no selection.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            drag: None,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, if any.
    pub fn selected(&self) -> Option<&Element> {
        let id = self.selected?;
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn selected_mut(&mut self) -> Option<&mut Element> {
        let id = self.selected?;
        self.elements.iter_mut().find(|el| el.id == id)
    }

    // ─── Creation & selection ────────────────────────────────────────────

    /// Append a new element with kind defaults and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let el = Element::new(kind);
        let id = el.id;
        self.elements.push(el);
        self.selected = Some(id);
        log::debug!("added {kind:?} element {id}");
        id
    }

    /// Select an element by id. No-op if the id is not on the canvas.
    pub fn select(&mut self, id: ElementId) {
        if self.elements.iter().any(|el| el.id == id) {
            self.selected = Some(id);
        }
    }

    // ─── Drag gesture ────────────────────────────────────────────────────

    /// Arm a drag on the element under the pointer. `offset` is the
    /// pointer position relative to the element origin. Selects the
    /// element; no-op if the id is not on the canvas.
    pub fn begin_drag(&mut self, id: ElementId, offset_x: f32, offset_y: f32) {
        if self.elements.iter().any(|el| el.id == id) {
            self.selected = Some(id);
            self.drag = Some(DragState {
                offset: Position::new(offset_x, offset_y),
            });
        }
    }

    /// Move the selected element under the pointer (canvas-space
    /// coordinates). Only effective while a drag is armed and a selection
    /// exists. Coordinates clamp at zero; there is no upper clamp.
    pub fn drag_to(&mut self, pointer_x: f32, pointer_y: f32) {
        let Some(drag) = self.drag else { return };
        let Some(el) = self.selected_mut() else {
            return;
        };
        el.position =
            Position::new(pointer_x - drag.offset.x, pointer_y - drag.offset.y).clamped();
    }

    /// Disarm the drag. Idempotent; also the handler for the pointer
    /// leaving the canvas.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    // ─── Property mutation ───────────────────────────────────────────────

    /// Merge `patch` into the selected element. No-op without a selection.
    pub fn update_selected(&mut self, patch: ElementPatch) {
        if let Some(el) = self.selected_mut() {
            patch.apply_to(el);
        }
    }

    /// Flip a format between its "on" value and the neutral default on
    /// the selected element. No-op without a selection.
    pub fn toggle_format(&mut self, format: TextFormat) {
        let Some(el) = self.selected_mut() else {
            return;
        };
        let style = &mut el.style;
        match format {
            TextFormat::Bold => {
                style.font_weight = if style.font_weight == WEIGHT_BOLD {
                    WEIGHT_NORMAL
                } else {
                    WEIGHT_BOLD
                };
            }
            TextFormat::Italic => {
                style.font_style = match style.font_style {
                    FontStyle::Italic => FontStyle::Normal,
                    FontStyle::Normal => FontStyle::Italic,
                };
            }
            TextFormat::Underline => {
                style.text_decoration = match style.text_decoration {
                    TextDecoration::Underline => TextDecoration::None,
                    TextDecoration::None => TextDecoration::Underline,
                };
            }
        }
    }

    /// Set the text alignment directly (not a toggle).
    pub fn set_alignment(&mut self, align: TextAlign) {
        if let Some(el) = self.selected_mut() {
            el.style.text_align = align;
        }
    }

    /// Encode uploaded image bytes as a data URL and assign them to the
    /// selected element. Only meaningful for image elements; no-op for
    /// any other selection.
    pub fn replace_image_source(&mut self, data: &[u8], mime: &str) {
        let Some(el) = self.selected_mut() else {
            return;
        };
        if el.kind != ElementKind::Image {
            return;
        }
        el.image_source = Some(format!("data:{mime};base64,{}", BASE64.encode(data)));
    }
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_canvas_is_seeded_and_selected() {
        let canvas = CanvasEditor::new();
        assert_eq!(canvas.elements().len(), 1);
        let seed = canvas.selected().expect("seed element selected");
        assert_eq!(seed.kind, ElementKind::Text);
        assert_eq!(seed.content, "Name: {{name}}");
        assert_eq!(seed.position, Position::new(50.0, 50.0));
    }

    #[test]
    fn add_element_selects_it() {
        let mut canvas = CanvasEditor::empty();
        let a = canvas.add_element(ElementKind::Text);
        assert_eq!(canvas.selected_id(), Some(a));
        let b = canvas.add_element(ElementKind::Emoji);
        assert_eq!(canvas.selected_id(), Some(b));
        assert_eq!(canvas.elements().len(), 2);
    }

    #[test]
    fn select_unknown_id_is_noop() {
        let mut canvas = CanvasEditor::empty();
        let a = canvas.add_element(ElementKind::Text);
        canvas.select(ElementId::from_raw(u64::MAX));
        assert_eq!(canvas.selected_id(), Some(a));
    }

    #[test]
    fn drag_applies_recorded_offset() {
        let mut canvas = CanvasEditor::empty();
        let id = canvas.add_element(ElementKind::Title);

        // Pointer grabbed the element 10px right, 5px down of its origin.
        canvas.begin_drag(id, 10.0, 5.0);
        canvas.drag_to(200.0, 150.0);

        let el = canvas.selected().unwrap();
        assert_eq!(el.position, Position::new(190.0, 145.0));
    }

    #[test]
    fn drag_clamps_to_canvas_origin() {
        let mut canvas = CanvasEditor::empty();
        let id = canvas.add_element(ElementKind::Text);
        canvas.begin_drag(id, 40.0, 40.0);
        canvas.drag_to(10.0, 500.0);

        let el = canvas.selected().unwrap();
        assert_eq!(el.position, Position::new(0.0, 460.0));
    }

    #[test]
    fn drag_without_begin_is_noop() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Text);
        let before = canvas.selected().unwrap().position;
        canvas.drag_to(400.0, 400.0);
        assert_eq!(canvas.selected().unwrap().position, before);
    }

    #[test]
    fn end_drag_is_idempotent_and_stops_moves() {
        let mut canvas = CanvasEditor::empty();
        let id = canvas.add_element(ElementKind::Text);
        canvas.begin_drag(id, 0.0, 0.0);
        canvas.drag_to(30.0, 30.0);
        canvas.end_drag();
        canvas.end_drag();
        assert!(!canvas.is_dragging());

        canvas.drag_to(999.0, 999.0);
        assert_eq!(canvas.selected().unwrap().position, Position::new(30.0, 30.0));
    }

    #[test]
    fn update_without_selection_leaves_elements_untouched() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Text);
        // Simulate a host that lost its selection.
        canvas.selected = None;
        let before = canvas.elements.clone();

        canvas.update_selected(ElementPatch {
            font_size: Some(40.0),
            ..ElementPatch::default()
        });
        canvas.toggle_format(TextFormat::Bold);
        canvas.set_alignment(TextAlign::Center);

        assert_eq!(canvas.elements, before);
    }

    #[test]
    fn toggle_bold_flips_between_bold_and_normal() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Heading1);
        assert_eq!(canvas.selected().unwrap().style.font_weight, WEIGHT_BOLD);

        canvas.toggle_format(TextFormat::Bold);
        assert_eq!(canvas.selected().unwrap().style.font_weight, WEIGHT_NORMAL);

        canvas.toggle_format(TextFormat::Bold);
        assert_eq!(canvas.selected().unwrap().style.font_weight, WEIGHT_BOLD);
    }

    #[test]
    fn semibold_heading_toggles_to_bold_first() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Heading2);
        canvas.toggle_format(TextFormat::Bold);
        assert_eq!(canvas.selected().unwrap().style.font_weight, WEIGHT_BOLD);
    }

    #[test]
    fn line_width_patch_leaves_font_defaults() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Line);
        canvas.update_selected(ElementPatch {
            width: Some(350.0),
            ..ElementPatch::default()
        });

        let el = canvas.selected().unwrap();
        assert_eq!(el.kind, ElementKind::Line);
        assert_eq!(el.width, Some(350.0));
        assert_eq!(el.style.font_size, 16.0);
        assert_eq!(el.style.font_weight, WEIGHT_NORMAL);
    }

    #[test]
    fn italic_and_underline_toggle() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Paragraph);

        canvas.toggle_format(TextFormat::Italic);
        assert_eq!(canvas.selected().unwrap().style.font_style, FontStyle::Italic);
        canvas.toggle_format(TextFormat::Italic);
        assert_eq!(canvas.selected().unwrap().style.font_style, FontStyle::Normal);

        canvas.toggle_format(TextFormat::Underline);
        assert_eq!(
            canvas.selected().unwrap().style.text_decoration,
            TextDecoration::Underline
        );
    }

    #[test]
    fn image_upload_sets_data_url() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Image);
        canvas.replace_image_source(&[0x89, 0x50, 0x4E, 0x47], "image/png");

        let src = canvas.selected().unwrap().image_source.as_deref().unwrap();
        assert!(src.starts_with("data:image/png;base64,"), "got {src}");
    }

    #[test]
    fn image_upload_on_text_element_is_noop() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Text);
        canvas.replace_image_source(&[1, 2, 3], "image/png");
        assert_eq!(canvas.selected().unwrap().image_source, None);
    }

    #[test]
    fn patch_color_and_content() {
        let mut canvas = CanvasEditor::empty();
        canvas.add_element(ElementKind::Text);
        canvas.update_selected(ElementPatch {
            content: Some("Hello {{name}}".into()),
            color: Color::from_hex("#FF0000"),
            ..ElementPatch::default()
        });

        let el = canvas.selected().unwrap();
        assert_eq!(el.content, "Hello {{name}}");
        assert_eq!(el.style.color.to_hex(), "#FF0000");
    }
}
