//! The template catalog — static descriptions of document shapes.
//!
//! The catalog is fixed at process start and never mutated; the wizard
//! only ever holds a reference into it.

use crate::id::TemplateId;
use serde::{Deserialize, Serialize};

/// Which preview renderer variant the host uses for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Evaluation,
    Educational,
    Therapy,
    Test,
    Fill,
    Certificate,
}

/// A static catalog entry describing a document shape. Entries are only
/// ever serialized (for the host), never read back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    /// How many editable fields the template exposes.
    pub field_count: u32,
    /// Human-readable completion estimate shown on the template card.
    pub estimated_time: &'static str,
    pub kind: TemplateKind,
}

/// The built-in template catalog.
pub const CATALOG: &[Template] = &[
    Template {
        id: TemplateId(1),
        name: "Evaluation Report",
        description: "Complete personalized evaluation document",
        field_count: 8,
        estimated_time: "5 min",
        kind: TemplateKind::Evaluation,
    },
    Template {
        id: TemplateId(2),
        name: "Individual Education Plan",
        description: "Personalized IEP for students",
        field_count: 12,
        estimated_time: "8 min",
        kind: TemplateKind::Educational,
    },
    Template {
        id: TemplateId(3),
        name: "Therapy Progress Sheet",
        description: "Session tracking and progress notes",
        field_count: 10,
        estimated_time: "6 min",
        kind: TemplateKind::Therapy,
    },
    Template {
        id: TemplateId(4),
        name: "Multiple Choice Test",
        description: "Assessment with customizable objective questions",
        field_count: 15,
        estimated_time: "10 min",
        kind: TemplateKind::Test,
    },
    Template {
        id: TemplateId(5),
        name: "Fill-in Worksheet",
        description: "Writing prompt or activity to complete",
        field_count: 6,
        estimated_time: "4 min",
        kind: TemplateKind::Fill,
    },
    Template {
        id: TemplateId(6),
        name: "Participation Certificate",
        description: "Recognition document",
        field_count: 4,
        estimated_time: "2 min",
        kind: TemplateKind::Certificate,
    },
];

/// Look up a catalog entry by id.
pub fn find(id: TemplateId) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == id)
}
