//! Resource options and the options-merge step.
//!
//! Every generated resource class computes its effective options the same
//! way: generator defaults (carrying the stamped version) are merged with
//! the caller's options, then the lookup ID, if any, is forced in.

use serde::{Deserialize, Serialize};

/// Options controlling a resource's behavior.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOptions {
    /// Provider ID of an existing resource to adopt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Provider plugin version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// URN of the parent resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// URN of an explicit provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Whether deletion is blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protect: Option<bool>,
    /// Whether replacements delete before creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_before_replace: Option<bool>,
    /// URNs this resource depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Property names whose changes are ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_changes: Vec<String>,
    /// Previous URNs of this resource.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Where to download the provider plugin from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_download_url: Option<String>,
}

impl ResourceOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the parent URN.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the provider URN.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the protect flag.
    #[must_use]
    pub fn with_protect(mut self, protect: bool) -> Self {
        self.protect = Some(protect);
        self
    }

    /// Adds a dependency.
    #[must_use]
    pub fn depends_on(mut self, urn: impl Into<String>) -> Self {
        self.depends_on.push(urn.into());
        self
    }

    /// Adds an ignored property.
    #[must_use]
    pub fn ignore_change(mut self, property: impl Into<String>) -> Self {
        self.ignore_changes.push(property.into());
        self
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, urn: impl Into<String>) -> Self {
        self.aliases.push(urn.into());
        self
    }
}

/// Merges caller options over defaults.
///
/// Scalar fields set by the caller replace the default; list fields are
/// concatenated, defaults first. Pure: neither input is modified.
#[must_use]
pub fn merge(defaults: &ResourceOptions, caller: Option<&ResourceOptions>) -> ResourceOptions {
    let Some(caller) = caller else {
        return defaults.clone();
    };

    ResourceOptions {
        id: caller.id.clone().or_else(|| defaults.id.clone()),
        version: caller.version.clone().or_else(|| defaults.version.clone()),
        parent: caller.parent.clone().or_else(|| defaults.parent.clone()),
        provider: caller.provider.clone().or_else(|| defaults.provider.clone()),
        protect: caller.protect.or(defaults.protect),
        delete_before_replace: caller.delete_before_replace.or(defaults.delete_before_replace),
        depends_on: concat(&defaults.depends_on, &caller.depends_on),
        ignore_changes: concat(&defaults.ignore_changes, &caller.ignore_changes),
        aliases: concat(&defaults.aliases, &caller.aliases),
        plugin_download_url: caller
            .plugin_download_url
            .clone()
            .or_else(|| defaults.plugin_download_url.clone()),
    }
}

fn concat(first: &[String], second: &[String]) -> Vec<String> {
    first.iter().chain(second).cloned().collect()
}

/// The options-merge step of a resource binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsMergePlan {
    /// Generator defaults, always carrying the stamped version.
    pub defaults: ResourceOptions,
    /// Whether the lookup entry point's ID replaces the caller's option ID.
    pub force_lookup_id: bool,
}

impl OptionsMergePlan {
    /// Creates a plan stamping the given version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            defaults: ResourceOptions::new().with_version(version),
            force_lookup_id: true,
        }
    }

    /// Returns the stamped version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.defaults.version.as_deref()
    }

    /// Computes effective options.
    ///
    /// When `forced_id` is given (lookup of an existing resource) it replaces
    /// whatever ID the caller put in the options bag: identity comes from the
    /// explicit argument, matching every other language binding. A differing
    /// caller ID is logged but still overridden.
    #[must_use]
    pub fn effective(
        &self,
        caller: Option<&ResourceOptions>,
        forced_id: Option<&str>,
    ) -> ResourceOptions {
        let mut merged = merge(&self.defaults, caller);
        if let Some(id) = forced_id.filter(|_| self.force_lookup_id) {
            if let Some(previous) = merged.id.as_deref().filter(|previous| *previous != id) {
                tracing::warn!(
                    lookup_id = id,
                    options_id = previous,
                    "options bag ID differs from lookup ID; using lookup ID"
                );
            }
            merged.id = Some(id.to_string());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_without_caller_returns_defaults() {
        let defaults = ResourceOptions::new().with_version("1.2.3");
        assert_eq!(merge(&defaults, None), defaults);
    }

    #[test]
    fn test_merge_caller_overrides_scalars() {
        let defaults = ResourceOptions::new().with_version("1.2.3").with_protect(false);
        let caller = ResourceOptions::new().with_version("2.0.0").with_parent("urn:parent");
        let merged = merge(&defaults, Some(&caller));
        assert_eq!(merged.version.as_deref(), Some("2.0.0"));
        assert_eq!(merged.parent.as_deref(), Some("urn:parent"));
        assert_eq!(merged.protect, Some(false));
    }

    #[test]
    fn test_merge_concatenates_lists() {
        let defaults = ResourceOptions::new().with_alias("urn:old");
        let caller = ResourceOptions::new().with_alias("urn:older").depends_on("urn:db");
        let merged = merge(&defaults, Some(&caller));
        assert_eq!(merged.aliases, vec!["urn:old", "urn:older"]);
        assert_eq!(merged.depends_on, vec!["urn:db"]);
    }

    #[test]
    fn test_merge_is_pure() {
        let defaults = ResourceOptions::new().with_version("1.0.0");
        let caller = ResourceOptions::new().with_id("abc");
        let _ = merge(&defaults, Some(&caller));
        assert_eq!(defaults, ResourceOptions::new().with_version("1.0.0"));
        assert_eq!(caller, ResourceOptions::new().with_id("abc"));
    }

    #[test]
    fn test_effective_stamps_version() {
        let plan = OptionsMergePlan::new("0.0.1");
        let options = plan.effective(None, None);
        assert_eq!(options.version.as_deref(), Some("0.0.1"));
        assert_eq!(options.id, None);
        assert_eq!(plan.version(), Some("0.0.1"));
    }

    #[test]
    fn test_effective_create_keeps_caller_id() {
        let plan = OptionsMergePlan::new("0.0.1");
        let caller = ResourceOptions::new().with_id("import-me");
        let options = plan.effective(Some(&caller), None);
        assert_eq!(options.id.as_deref(), Some("import-me"));
    }

    #[test]
    fn test_effective_lookup_forces_id() {
        let plan = OptionsMergePlan::new("0.0.1");
        for caller_id in [None, Some("other"), Some("lookup-id")] {
            let caller = ResourceOptions {
                id: caller_id.map(str::to_string),
                ..ResourceOptions::new().with_protect(true)
            };
            let options = plan.effective(Some(&caller), Some("lookup-id"));
            assert_eq!(options.id.as_deref(), Some("lookup-id"));
            assert_eq!(options.protect, Some(true));
        }
    }

    #[test]
    fn test_options_serialize_skips_unset() {
        let json = serde_json::to_string(&ResourceOptions::new().with_version("1.0.0"))
            .expect("serialize");
        assert_eq!(json, r#"{"version":"1.0.0"}"#);
    }
}
