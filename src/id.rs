//! Interned string identifiers.
//!
//! Jobs and modifiers are keyed by short names (`"Builder"`,
//! `"haste_potion"`). Both id types share one `Arc<str>` representation,
//! generated by `interned_id!`, so clones are pointer copies and map
//! lookups work directly with `&str`.
//!
//! Ids read from data must not be blank; deserializing `""` or `"  "`
//! fails.

/// Define an `Arc<str>`-backed identifier newtype.
macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(std::sync::Arc<str>);

        impl $name {
            pub fn new(name: impl AsRef<str>) -> Self {
                Self(std::sync::Arc::from(name.as_ref()))
            }

            /// Like `new`, but `None` for a blank name.
            pub fn parse(name: &str) -> Option<Self> {
                let trimmed = name.trim();
                (!trimmed.is_empty()).then(|| Self::new(trimmed))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(std::sync::Arc::from(name))
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(concat!($what, " id must not be blank"))
                })
            }
        }
    };
}

interned_id!(
    /// Identifier of a registered job, e.g. `"Builder"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use colony_vitals::JobId;
    ///
    /// let builder = JobId::new("Builder");
    /// assert_eq!(builder, JobId::from("Builder"));
    /// assert_eq!(JobId::parse("  Scout "), Some(JobId::new("Scout")));
    /// assert_eq!(JobId::parse("   "), None);
    /// ```
    JobId,
    "job"
);

interned_id!(
    /// Identifier of a modifier on a stats block, e.g. `"haste_potion"`.
    ///
    /// Removal and refresh are keyed on this id.
    ModifierId,
    "modifier"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(JobId::new("Queen"), 1);
        assert_eq!(map.get("Queen"), Some(&1));
        assert_eq!(map.get("Drone"), None);
    }

    #[test]
    fn test_clone_shares_allocation() {
        let id = ModifierId::new("haste");
        let copy = id.clone();
        assert!(std::ptr::eq(id.as_str(), copy.as_str()));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = JobId::new("Spitter");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Spitter\"");
        assert_eq!(serde_json::from_str::<JobId>(&json).unwrap(), id);
    }

    #[test]
    fn test_blank_id_rejected_on_deserialize() {
        let err = serde_json::from_str::<JobId>("\" \"").unwrap_err();
        assert!(err.to_string().contains("job id must not be blank"));
        assert!(serde_json::from_str::<ModifierId>("\"\"").is_err());
    }
}
