//! External parts collaborator.
//!
//! Parts are a read-only collection maintained outside the supplier store.
//! The filter engine never touches them directly; it goes through the
//! [`PartsLookup`](crate::filter::PartsLookup) trait, which a loaded part
//! list implements.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::filter::PartsLookup;

/// A part and the suppliers able to supply it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub supplier_ids: Vec<Uuid>,
}

impl PartsLookup for [Part] {
    fn suppliers_for_term(&self, term: &str) -> HashSet<Uuid> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return HashSet::new();
        }
        self.iter()
            .filter(|part| part.name.to_lowercase().contains(&needle))
            .flat_map(|part| part.supplier_ids.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_unions_matching_parts() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let parts = vec![
            Part {
                id: Uuid::new_v4(),
                name: "Hydraulic Pump".to_string(),
                supplier_ids: vec![a],
            },
            Part {
                id: Uuid::new_v4(),
                name: "Hydraulic Hose".to_string(),
                supplier_ids: vec![b, c],
            },
            Part {
                id: Uuid::new_v4(),
                name: "Brake Pads".to_string(),
                supplier_ids: vec![c],
            },
        ];

        let matched = parts.as_slice().suppliers_for_term("hydraulic");
        assert_eq!(matched, HashSet::from([a, b, c]));
        assert!(parts.as_slice().suppliers_for_term("gasket").is_empty());
        assert!(parts.as_slice().suppliers_for_term("  ").is_empty());
    }
}
