//! Identifiers for curriculum entities.
//!
//! Curriculum ids are authored by hand (`"rust-basics"`, `"ownership"`), so
//! unlike generated ids they are plain strings wrapped in newtypes. They
//! serialize transparently, which keeps them usable as JSON object keys.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a curriculum module.
    ModuleId
);

string_id!(
    /// Identifier of a lesson, unique within its module.
    LessonId
);

string_id!(
    /// Identifier of an exercise, unique within its lesson.
    ExerciseId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = ModuleId::new("m1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m1\"");

        let mut map = BTreeMap::new();
        map.insert(LessonId::from("l1"), 3);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"l1":3}"#);

        let back: BTreeMap<LessonId, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("l1"), Some(&3));
    }
}
