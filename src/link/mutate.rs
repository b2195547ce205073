use crate::provider::{LinkRef, RemoteEntry};
use crate::resolve::CrossSpaceLink;
use crate::space::SpaceConfiguration;

/// Link record pointing at `entry` in the space it was picked from.
///
/// Identity comes from the entry's `sys` block, falling back to the
/// configuration the picker searched.
pub fn build_link(entry: &RemoteEntry, config: &SpaceConfiguration) -> CrossSpaceLink {
    let space_id = entry
        .sys
        .space
        .as_ref()
        .map_or(config.space_id.as_str(), LinkRef::id);
    let environment = entry
        .sys
        .environment
        .as_ref()
        .map_or(config.environment.as_str(), LinkRef::id);
    CrossSpaceLink::new(entry.id(), space_id, environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::entry;
    use serde_json::json;

    #[test]
    fn test_identity_from_entry() {
        let config = SpaceConfiguration::new("Cats", "cats", "tok", Some("staging"));
        let mut picked = entry("e1", "article", 3, json!({"title": "Tabby"}));
        picked.sys.space = Some(LinkRef::new("Space", "cats"));
        picked.sys.environment = Some(LinkRef::new("Environment", "staging"));

        let link = build_link(&picked, &config);
        assert_eq!(link.id, "e1");
        assert_eq!(link.space_id(), "cats");
        assert_eq!(link.environment(), "staging");
        assert_eq!(link.config_id(), config.id);
    }

    #[test]
    fn test_falls_back_to_config() {
        let config = SpaceConfiguration::new("Dogs", "dogs", "tok", None);
        let picked = entry("e2", "article", 1, json!({}));

        let link = build_link(&picked, &config);
        assert_eq!(link.space_id(), "dogs");
        assert_eq!(link.environment(), "master");
        assert_eq!(link.to_field_value()["sys"]["linkType"], "CrossSpaceLink");
    }
}
