//! Engine configuration.
//!
//! Configuration is an explicit value passed into every entry point; there is
//! no ambient or process-wide state. The JSON encoding matches the editor
//! settings the organizer historically shipped with (camelCase keys, all
//! optional).

use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::warn;

use crate::members::MemberType;

/// One entry of the member ordering configuration.
///
/// Either a leaf (one or more categories, rendered as blank-line-separated
/// clusters inside one group) or a nested entry with `sub_groups`. The pin
/// lists force named members above or below the sorted remainder of each
/// category; they are matched against the members actually present at render
/// time.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberOrderEntry {
    pub caption: Option<String>,
    #[serde(deserialize_with = "deserialize_member_types")]
    pub member_types: Vec<MemberType>,
    pub sub_groups: Vec<MemberOrderEntry>,
    pub place_above: Vec<String>,
    pub place_below: Vec<String>,
}

impl MemberOrderEntry {
    /// A captioned leaf entry covering the given categories.
    pub fn leaf(caption: impl Into<String>, member_types: Vec<MemberType>) -> Self {
        Self {
            caption: Some(caption.into()),
            member_types,
            ..Self::default()
        }
    }
}

/// Duplicates and unknown names are configuration anomalies, not errors:
/// duplicates are de-duplicated, unknown names ignored with a warning.
fn deserialize_member_types<'de, D>(deserializer: D) -> Result<Vec<MemberType>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(parse_member_types(&names))
}

pub(crate) fn parse_member_types(names: &[String]) -> Vec<MemberType> {
    let mut seen: IndexSet<MemberType> = IndexSet::new();
    for name in names {
        match MemberType::from_name(name) {
            Some(member_type) => {
                seen.insert(member_type);
            }
            None => warn!(%name, "ignoring unknown member type in configuration"),
        }
    }
    seen.into_iter().collect()
}

/// All knobs of one reorganize invocation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Wrap groups in `// #region` / `// #endregion` marker lines.
    pub use_regions: bool,
    /// Insert `public` on class members without an accessibility keyword.
    pub add_public_modifier_if_missing: bool,
    /// Append the member count to region captions, `(N)`.
    pub add_member_count_in_region_name: bool,
    /// Indent region marker lines inside container bodies.
    pub add_region_indentation: bool,
    /// Repeat the caption on the closing region marker.
    pub add_region_caption_to_region_end: bool,
    /// Cluster members sharing identical decorators within a category.
    pub group_properties_with_decorators: bool,
    /// Classify arrow-function properties as methods.
    pub treat_arrow_function_properties_as_methods: bool,
    /// Honored by editor hosts, not by the engine or the CLI.
    pub organize_on_save: bool,
    /// User member ordering; categories it does not mention are appended in
    /// canonical order by the resolver.
    pub member_order: Vec<MemberOrderEntry>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            use_regions: true,
            add_public_modifier_if_missing: true,
            add_member_count_in_region_name: true,
            add_region_indentation: true,
            add_region_caption_to_region_end: true,
            group_properties_with_decorators: false,
            treat_arrow_function_properties_as_methods: true,
            organize_on_save: false,
            member_order: Vec::new(),
        }
    }
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Configuration {
    /// Parse a configuration from its JSON encoding.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert!(config.use_regions);
        assert!(config.add_public_modifier_if_missing);
        assert!(!config.group_properties_with_decorators);
        assert!(config.member_order.is_empty());
    }

    #[test]
    fn test_from_json_partial_keys() {
        let config = Configuration::from_json(r#"{ "useRegions": false }"#).unwrap();
        assert!(!config.use_regions);
        // untouched keys keep their defaults
        assert!(config.add_member_count_in_region_name);
    }

    #[test]
    fn test_member_order_parsing() {
        let config = Configuration::from_json(
            r#"{
                "memberOrder": [
                    {
                        "caption": "Properties",
                        "memberTypes": ["privateProperties", "publicProperties"],
                        "placeAbove": ["id"]
                    }
                ]
            }"#,
        )
        .unwrap();
        let entry = &config.member_order[0];
        assert_eq!(entry.caption.as_deref(), Some("Properties"));
        assert_eq!(
            entry.member_types,
            vec![MemberType::PrivateProperties, MemberType::PublicProperties]
        );
        assert_eq!(entry.place_above, vec!["id"]);
    }

    #[test]
    fn test_unknown_and_duplicate_member_types_are_absorbed() {
        let config = Configuration::from_json(
            r#"{
                "memberOrder": [
                    { "memberTypes": ["publicMethods", "noSuchThing", "publicMethods"] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.member_order[0].member_types, vec![MemberType::PublicMethods]);
    }

    #[test]
    fn test_nested_sub_groups() {
        let config = Configuration::from_json(
            r#"{
                "memberOrder": [
                    {
                        "caption": "Accessors",
                        "subGroups": [
                            { "caption": "Getters And Setters", "memberTypes": ["publicGettersAndSetters"] },
                            { "caption": "Auto", "memberTypes": ["publicAccessors"] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let entry = &config.member_order[0];
        assert!(entry.member_types.is_empty());
        assert_eq!(entry.sub_groups.len(), 2);
        assert_eq!(
            entry.sub_groups[0].member_types,
            vec![MemberType::PublicGettersAndSetters]
        );
    }
}
