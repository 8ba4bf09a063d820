//! Third-party block explorer links for candy transactions.
//!
//! The wallet's display options carry a pipe-separated list of URL templates
//! (`https://explorer-a.example/tx/%s|https://explorer-b.example/?hash=%s`).
//! Each template becomes one context-menu entry labeled by its host; templates
//! without a parsable host are dropped.

use url::Url;

/// Placeholder token replaced by the transaction hash.
pub const TX_HASH_PLACEHOLDER: &str = "%s";

/// One validated explorer link template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplorerLink {
    /// Host name used as the menu label.
    pub host: String,
    pub template: String,
}

impl ExplorerLink {
    /// Substitute a transaction hash into the template.
    pub fn url_for(&self, tx_hash: &str) -> String {
        self.template.replace(TX_HASH_PLACEHOLDER, tx_hash)
    }
}

/// Parse a pipe-separated template list, keeping only entries with a
/// parsable host.
pub fn parse_templates(list: &str) -> Vec<ExplorerLink> {
    list.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|template| match Url::parse(template) {
            Ok(url) => url.host_str().map(|host| ExplorerLink {
                host: host.to_string(),
                template: template.to_string(),
            }),
            Err(e) => {
                tracing::warn!("Dropping explorer template {:?}: {}", template, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_templates tests ====================

    #[test]
    fn test_parse_single_template() {
        let links = parse_templates("https://example.com/tx/%s");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].host, "example.com");
        assert_eq!(links[0].template, "https://example.com/tx/%s");
    }

    #[test]
    fn test_parse_pipe_separated_list() {
        let links =
            parse_templates("https://a.example/tx/%s|https://b.example/explorer?hash=%s");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].host, "a.example");
        assert_eq!(links[1].host, "b.example");
    }

    #[test]
    fn test_parse_drops_hostless_entries() {
        // "mailto:" URLs parse but have no host; garbage does not parse
        let links = parse_templates("mailto:nobody@example.com|garbage|https://ok.example/%s");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].host, "ok.example");
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        let links = parse_templates("|  |https://ok.example/%s|");
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_templates("").is_empty());
    }

    // ==================== url_for tests ====================

    #[test]
    fn test_url_for_substitutes_hash() {
        let link = ExplorerLink {
            host: "example.com".to_string(),
            template: "https://example.com/tx/%s".to_string(),
        };
        assert_eq!(link.url_for("abc123"), "https://example.com/tx/abc123");
    }

    #[test]
    fn test_url_for_without_placeholder_is_unchanged() {
        let link = ExplorerLink {
            host: "example.com".to_string(),
            template: "https://example.com/tx".to_string(),
        };
        assert_eq!(link.url_for("abc123"), "https://example.com/tx");
    }
}
