use std::collections::HashSet;
use std::ops::Deref;

/// The ordered, de-duplicated set of domains offered for search.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    domains: Vec<String>,
}

impl Catalog {
    /// Build from raw entries. Surrounding whitespace is trimmed, blank
    /// entries are skipped and the first occurrence of a duplicate wins.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let domains = entries
            .into_iter()
            .filter_map(|entry| {
                let entry = entry.as_ref().trim();
                (!entry.is_empty() && seen.insert(entry.to_string())).then(|| entry.to_string())
            })
            .collect();
        Self { domains }
    }

    /// Parse the plain-text catalog format: one domain per line, `#` starts a
    /// comment line.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}

impl Deref for Catalog {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_keeps_order_and_dedupes() {
        let catalog = Catalog::new(["b.com", "a.com", "b.com", "c.com", "a.com"]);
        assert_eq!(catalog.domains(), ["b.com", "a.com", "c.com"]);
    }

    #[test]
    fn test_new_trims_and_skips_blank() {
        let catalog = Catalog::new(["  a.com ", "", "   ", "a.com", "b.com\t"]);
        assert_eq!(catalog.domains(), ["a.com", "b.com"]);
    }

    #[test]
    fn test_parse_skips_comments() {
        let text = "# disposable domains\nmail.tm\n\n  # indented comment\nyopmail.com\nmail.tm\n";
        let catalog = Catalog::parse(text);
        assert_eq!(catalog.domains(), ["mail.tm", "yopmail.com"]);
    }

    #[test]
    fn test_deref_and_contains() {
        let catalog = Catalog::new(["a.com", "b.com"]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert!(catalog.contains("b.com"));
        assert!(!catalog.contains("B.com"));
    }
}
