//! Integration tests: the full wizard flow (dg-editor).
//!
//! Walks the four steps end-to-end the way the host does, including the
//! hand-off into the canvas editor at step 3 and generation at step 4.

use dg_core::id::TemplateId;
use dg_core::person::PersonDraft;
use dg_editor::canvas::{CanvasEditor, ElementPatch};
use dg_editor::wizard::{Step, WizardController};
use pretty_assertions::assert_eq;

fn draft(name: &str, age: u32) -> PersonDraft {
    PersonDraft {
        name: name.into(),
        age,
        category: "Student".into(),
        subcategory: "Dyslexia".into(),
        last_update: "1 day".into(),
    }
}

fn advance_settled(wizard: &mut WizardController) {
    wizard.advance();
    wizard.settle();
}

#[test]
fn full_run_from_people_to_generated_documents() {
    let mut wizard = WizardController::new();

    // Step 1: register people.
    wizard.add_person(draft("Ana Silva", 8));
    wizard.add_person(draft("John Santos", 12));
    advance_settled(&mut wizard);
    assert_eq!(wizard.step(), Step::SelectTemplate);

    // Step 2: pick a template.
    wizard.select_template(TemplateId(2));
    assert_eq!(wizard.selected_template().unwrap().name, "Individual Education Plan");
    advance_settled(&mut wizard);
    assert_eq!(wizard.step(), Step::Customize);

    // Step 3: the canvas editor takes over, pre-seeded.
    let mut canvas = CanvasEditor::new();
    assert_eq!(canvas.elements().len(), 1);
    canvas.update_selected(ElementPatch {
        content: Some("{{name}}, {{age}} years, {{subcategory}}".into()),
        ..ElementPatch::default()
    });

    advance_settled(&mut wizard);
    assert_eq!(wizard.step(), Step::Generate);
    assert_eq!(wizard.completion_percentage(), 100);

    // Step 4: generate one document per person.
    let docs = wizard.generate(canvas.elements());
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].elements[0].content, "Ana Silva, 8 years, Dyslexia");
    assert_eq!(docs[1].elements[0].content, "John Santos, 12 years, Dyslexia");
}

#[test]
fn back_from_editor_returns_to_customize() {
    let mut wizard = WizardController::new();
    wizard.add_person(draft("Ana", 8));
    wizard.select_template(TemplateId(1));
    advance_settled(&mut wizard);
    advance_settled(&mut wizard);
    advance_settled(&mut wizard);
    assert_eq!(wizard.step(), Step::Generate);

    // The editor's "back" signal retreats the wizard one step.
    wizard.retreat();
    wizard.settle();
    assert_eq!(wizard.step(), Step::Customize);
}

#[test]
fn sample_people_register_like_manual_ones() {
    let mut wizard = WizardController::new();
    wizard.add_sample_person();
    wizard.add_sample_person();
    assert_eq!(wizard.people().len(), 2);
    assert_ne!(wizard.people()[0].id, wizard.people()[1].id);
    assert!(wizard.can_proceed_to(Step::SelectTemplate));
}

#[test]
fn replacing_people_updates_gating() {
    let mut wizard = WizardController::new();
    wizard.add_person(draft("Ana", 8));
    assert!(wizard.can_proceed_to(Step::SelectTemplate));

    wizard.set_people(Vec::new());
    assert!(!wizard.can_proceed_to(Step::SelectTemplate));
}
