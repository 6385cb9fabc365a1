//! Denormalized references between entities.

use serde::{Deserialize, Serialize};

/// A denormalized `{id, name}` pair pointing at another entity.
///
/// References are captured when a record is saved and are not kept in sync
/// afterwards: renaming or deleting the target leaves existing references
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Raw id of the referenced entity.
    pub id: i32,
    /// Name of the referenced entity at the time the reference was taken.
    pub name: String,
}

impl EntityRef {
    /// Create a new reference.
    #[must_use]
    pub fn new(id: impl Into<i32>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Join the names of several references for display (`"Cards, Flyers"`).
    #[must_use]
    pub fn join_names(refs: &[Self]) -> String {
        refs.iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_names() {
        let refs = vec![EntityRef::new(1, "Cards"), EntityRef::new(2, "Flyers")];
        assert_eq!(EntityRef::join_names(&refs), "Cards, Flyers");
        assert_eq!(EntityRef::join_names(&[]), "");
    }
}
