//! Identity of the content collection a wall shows.

use serde::{Deserialize, Serialize};

/// Reference to an upstream collection.
///
/// Two references name the same collection when network, environment, site
/// and article all match; the optional `id` is only known once content flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    /// Network the collection lives on.
    pub network: String,
    /// Site id within the network.
    pub site_id: String,
    /// Article id within the site.
    pub article_id: String,
    /// Deployment environment, if not production.
    #[serde(default)]
    pub environment: Option<String>,
    /// Collection id, learned from the first content.
    #[serde(default)]
    pub id: Option<String>,
}

impl CollectionRef {
    /// Reference for a production collection.
    pub fn new(
        network: impl Into<String>,
        site_id: impl Into<String>,
        article_id: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            site_id: site_id.into(),
            article_id: article_id.into(),
            environment: None,
            id: None,
        }
    }

    /// Whether `other` names the same collection.
    pub fn is_same(&self, other: &CollectionRef) -> bool {
        self.network == other.network
            && self.environment == other.environment
            && self.site_id == other.site_id
            && self.article_id == other.article_id
    }
}

/// Whether two optional references name the same collection.
///
/// Absent references never match, not even each other.
pub fn is_same_collection(a: Option<&CollectionRef>, b: Option<&CollectionRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.is_same(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> CollectionRef {
        CollectionRef::new("labs.fyre.co", "315833", "custom-1")
    }

    #[test]
    fn same_identity_ignores_collection_id() {
        let mut other = collection();
        other.id = Some("10669131".to_string());
        assert!(collection().is_same(&other));
    }

    #[test]
    fn any_identity_field_differs() {
        let base = collection();
        let mut article = base.clone();
        article.article_id = "custom-2".to_string();
        let mut env = base.clone();
        env.environment = Some("qa-ext.livefyre.com".to_string());

        assert!(!base.is_same(&article));
        assert!(!base.is_same(&env));
    }

    #[test]
    fn missing_references_never_match() {
        let c = collection();
        assert!(is_same_collection(Some(&c), Some(&c)));
        assert!(!is_same_collection(Some(&c), None));
        assert!(!is_same_collection(None, None));
    }

    #[test]
    fn deserializes_from_json() {
        let c: CollectionRef = serde_json::from_str(
            r#"{"network":"n","site_id":"1","article_id":"a","environment":"qa"}"#,
        )
        .unwrap();
        assert_eq!(c.environment.as_deref(), Some("qa"));
        assert_eq!(c.id, None);
    }
}
