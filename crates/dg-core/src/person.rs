//! Registered people — the subjects personalized documents are generated
//! for. People live for the session only; nothing here touches storage.

use crate::id::PersonId;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// A subject for whom one personalized document instance is intended.
///
/// Immutable once created, except by removal from the owning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub age: u32,
    pub category: String,
    pub subcategory: String,
    /// Freeform recency label shown on the person card ("today", "1 week").
    pub last_update: String,
}

/// Field values for creating a person; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonDraft {
    pub name: String,
    pub age: u32,
    pub category: String,
    pub subcategory: String,
    pub last_update: String,
}

impl Person {
    pub fn from_draft(draft: PersonDraft) -> Self {
        Self {
            id: PersonId::fresh(),
            name: draft.name,
            age: draft.age,
            category: draft.category,
            subcategory: draft.subcategory,
            last_update: draft.last_update,
        }
    }

    /// Pick one of the canned sample profiles at random, with a fresh id.
    /// Backs the "add person" quick action in the host UI.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (name, age, category, subcategory, last_update) = *SAMPLE_PROFILES
            .choose(rng)
            .expect("sample profile table is non-empty");
        Self::from_draft(PersonDraft {
            name: name.to_string(),
            age,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            last_update: last_update.to_string(),
        })
    }
}

/// Canned profiles for the sample-person quick action.
const SAMPLE_PROFILES: &[(&str, u32, &str, &str, &str)] = &[
    ("Maria Santos", 10, "Student", "ADHD", "today"),
    ("John Silva", 15, "Student", "Dyslexia", "1 day"),
    ("Ana Costa", 25, "Patient", "Therapy", "2 days"),
    ("Lucas Pereira", 8, "Student", "Special education", "1 week"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_draft_assigns_fresh_id() {
        let draft = PersonDraft {
            name: "Ana".into(),
            age: 8,
            category: "Student".into(),
            subcategory: "Special education".into(),
            last_update: "2 days".into(),
        };
        let a = Person::from_draft(draft.clone());
        let b = Person::from_draft(draft);
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn sample_comes_from_profile_table() {
        let mut rng = rand::rng();
        let p = Person::sample(&mut rng);
        assert!(
            SAMPLE_PROFILES.iter().any(|(name, ..)| *name == p.name),
            "unexpected sample name {}",
            p.name
        );
    }

    #[test]
    fn samples_get_distinct_ids() {
        let mut rng = rand::rng();
        let a = Person::sample(&mut rng);
        let b = Person::sample(&mut rng);
        assert_ne!(a.id, b.id);
    }
}
