//! Wizard step controller: the linear four-step flow from registering
//! people to generating documents.
//!
//! Step changes are two-phase: `advance`/`retreat` arm a [`Transition`]
//! and the host applies it with [`WizardController::settle`] once the
//! settling interval has elapsed (it drives the fade/scale animation and
//! debounces rapid clicks). Gating failures never arm a transition — they
//! are silent no-ops, surfaced to the user only as disabled controls.

use dg_core::generate::{GeneratedDocument, generate};
use dg_core::id::TemplateId;
use dg_core::model::Element;
use dg_core::person::{Person, PersonDraft};
use dg_core::template::{self, Template};
use std::time::Duration;

/// How long a step transition takes to settle.
pub const SETTLE_INTERVAL: Duration = Duration::from_millis(300);

/// The four wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    RegisterPeople,
    SelectTemplate,
    Customize,
    Generate,
}

impl Step {
    /// 1-based step number, as shown in the progress header.
    pub const fn number(self) -> u8 {
        match self {
            Step::RegisterPeople => 1,
            Step::SelectTemplate => 2,
            Step::Customize => 3,
            Step::Generate => 4,
        }
    }

    pub const fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::RegisterPeople),
            2 => Some(Step::SelectTemplate),
            3 => Some(Step::Customize),
            4 => Some(Step::Generate),
            _ => None,
        }
    }

    const fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    const fn prev(self) -> Option<Step> {
        match self.number() {
            0 | 1 => None,
            n => Step::from_number(n - 1),
        }
    }
}

/// An armed step change, waiting for the settling interval to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: Step,
    pub settle_after: Duration,
}

/// The wizard controller: current step, the people list, and the selected
/// template.
#[derive(Debug, Clone)]
pub struct WizardController {
    step: Step,
    people: Vec<Person>,
    selected_template: Option<TemplateId>,
    transition: Option<Transition>,
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            step: Step::RegisterPeople,
            people: Vec::new(),
            selected_template: None,
            transition: None,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn selected_template(&self) -> Option<&'static Template> {
        self.selected_template.and_then(template::find)
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Whether `step` is reachable given the current inputs. Pure; has no
    /// side effects and ignores the current step.
    pub fn can_proceed_to(&self, step: Step) -> bool {
        match step {
            Step::RegisterPeople => true,
            Step::SelectTemplate => !self.people.is_empty(),
            Step::Customize | Step::Generate => {
                !self.people.is_empty() && self.selected_template.is_some()
            }
        }
    }

    /// Progress readout for the header bar. Derived, never stored; has no
    /// effect on gating.
    pub fn completion_percentage(&self) -> u8 {
        let mut pct = 0;
        if !self.people.is_empty() {
            pct += 25;
        }
        if self.selected_template.is_some() {
            pct += 25;
        }
        if self.step >= Step::Customize {
            pct += 25;
        }
        if self.step >= Step::Generate {
            pct += 25;
        }
        pct.min(100)
    }

    // ─── Navigation ──────────────────────────────────────────────────────

    /// Arm a forward step change if the next step is reachable. No-op when
    /// already transitioning (debounce), at the last step, or gated.
    pub fn advance(&mut self) {
        if self.transition.is_some() {
            return;
        }
        let Some(next) = self.step.next() else { return };
        if !self.can_proceed_to(next) {
            return;
        }
        self.transition = Some(Transition {
            to: next,
            settle_after: SETTLE_INTERVAL,
        });
    }

    /// Arm a backward step change. Same transient behavior as `advance`;
    /// no gate beyond not being at the first step.
    pub fn retreat(&mut self) {
        if self.transition.is_some() {
            return;
        }
        let Some(prev) = self.step.prev() else { return };
        self.transition = Some(Transition {
            to: prev,
            settle_after: SETTLE_INTERVAL,
        });
    }

    /// Apply the armed transition. The host calls this once the settling
    /// interval has elapsed. Idempotent when nothing is armed.
    pub fn settle(&mut self) {
        if let Some(t) = self.transition.take() {
            log::debug!("wizard step {} -> {}", self.step.number(), t.to.number());
            self.step = t.to;
        }
    }

    // ─── People & template inputs ────────────────────────────────────────

    /// Register a person from a draft, assigning a fresh id.
    pub fn add_person(&mut self, draft: PersonDraft) -> &Person {
        self.people.push(Person::from_draft(draft));
        self.people.last().expect("person just pushed")
    }

    /// Register a random sample person (the host's quick-add action).
    pub fn add_sample_person(&mut self) -> &Person {
        let mut rng = rand::rng();
        self.people.push(Person::sample(&mut rng));
        self.people.last().expect("person just pushed")
    }

    /// Replace the whole people list — the collaborator boundary for an
    /// external people source. People are never persisted here.
    pub fn set_people(&mut self, people: Vec<Person>) {
        self.people = people;
    }

    /// Select a template from the catalog. Unknown ids are ignored.
    pub fn select_template(&mut self, id: TemplateId) {
        if template::find(id).is_some() {
            self.selected_template = Some(id);
        }
    }

    // ─── Terminal action ─────────────────────────────────────────────────

    /// Generate one personalized document per registered person from the
    /// editor's element collection. Returns nothing when generation is not
    /// yet reachable (no people or no template).
    pub fn generate(&self, elements: &[Element]) -> Vec<GeneratedDocument> {
        if !self.can_proceed_to(Step::Generate) {
            return Vec::new();
        }
        generate(elements, &self.people)
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}
