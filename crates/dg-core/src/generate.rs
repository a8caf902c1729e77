//! Per-person document instantiation.
//!
//! The terminal wizard action: for every registered person, clone the
//! canvas element collection and substitute the `{{field}}` tokens in each
//! element's content with that person's attributes. Rasterization and
//! export stay with the host.

use crate::fields;
use crate::id::PersonId;
use crate::model::Element;
use crate::person::Person;
use serde::Serialize;

/// One personalized document — the element collection with all resolvable
/// tokens substituted for a single person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDocument {
    pub person: PersonId,
    pub elements: Vec<Element>,
}

/// Resolve a field name against a person's attributes.
///
/// Field names are matched case-insensitively. Unknown names resolve to
/// `None` and stay verbatim in the output.
pub fn person_field(person: &Person, field: &str) -> Option<String> {
    match field.to_ascii_lowercase().as_str() {
        "name" => Some(person.name.clone()),
        "age" => Some(person.age.to_string()),
        "category" => Some(person.category.clone()),
        "subcategory" => Some(person.subcategory.clone()),
        _ => None,
    }
}

/// Instantiate one document per person from the given element collection.
///
/// Element ids, positions, and styling carry over unchanged; only
/// `content` strings are rewritten.
pub fn generate(elements: &[Element], people: &[Person]) -> Vec<GeneratedDocument> {
    log::debug!(
        "generating {} documents from {} elements",
        people.len(),
        elements.len()
    );
    people
        .iter()
        .map(|person| {
            let elements = elements
                .iter()
                .map(|el| {
                    let mut el = el.clone();
                    el.content = fields::substitute(&el.content, |f| person_field(person, f));
                    el
                })
                .collect();
            GeneratedDocument {
                person: person.id,
                elements,
            }
        })
        .collect()
}
