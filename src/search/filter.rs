/// Narrow `catalog` down to the entries containing `query`.
///
/// - empty `query` returns every entry in catalog order
/// - otherwise a case-insensitive substring match, no trimming of the query
pub fn filter<'a, S: AsRef<str>>(catalog: &'a [S], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return catalog.iter().map(|entry| entry.as_ref()).collect();
    }

    let needle = query.to_lowercase();
    catalog
        .iter()
        .map(|entry| entry.as_ref())
        .filter(|entry: &&str| entry.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<String> {
        ["aaa.com", "bbb.com", "mail.aaa.com", "MailBox.org", "x.y+z.net"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let c = catalog();
        let visible = filter(&c, "");
        assert_eq!(visible, c.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_substring_match_keeps_order() {
        let c = vec!["aaa.com", "bbb.com", "mail.aaa.com"];
        assert_eq!(filter(&c, "aaa"), vec!["aaa.com", "mail.aaa.com"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let c = catalog();
        assert!(filter(&c, "zzz").is_empty());
    }

    #[test]
    fn test_case_insensitive_both_ways() {
        let c = catalog();
        assert_eq!(filter(&c, "mailbox"), vec!["MailBox.org"]);
        assert_eq!(filter(&c, "AAA"), vec!["aaa.com", "mail.aaa.com"]);
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let c = catalog();
        assert!(filter(&c, " aaa").is_empty());
    }

    #[test]
    fn test_special_characters_are_literal() {
        let c = catalog();
        assert_eq!(filter(&c, "y+z"), vec!["x.y+z.net"]);
        assert!(filter(&c, ".*").is_empty());
    }

    #[test]
    fn test_full_domain_matches_itself_and_superstrings() {
        let c = catalog();
        assert_eq!(filter(&c, "aaa.com"), vec!["aaa.com", "mail.aaa.com"]);
        assert_eq!(filter(&c, "bbb.com"), vec!["bbb.com"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let c = catalog();
        for q in ["", "a", "com", "MAIL", "zzz", "."] {
            let once = filter(&c, q);
            let twice = filter(&once, q);
            assert_eq!(once, twice, "query {q:?}");
        }
    }

    #[test]
    fn test_result_partitions_catalog() {
        let c = catalog();
        for q in ["a", "o", "Box", "net"] {
            let visible = filter(&c, q);
            let needle = q.to_lowercase();
            for entry in &c {
                let hit = entry.to_lowercase().contains(&needle);
                assert_eq!(visible.contains(&entry.as_str()), hit, "{entry} vs {q:?}");
            }
            // subsequence of the catalog in original relative order
            let mut positions = visible
                .iter()
                .map(|v| c.iter().position(|e| e == v).unwrap());
            let mut last = positions.next();
            for p in positions {
                assert!(Some(p) > last);
                last = Some(p);
            }
        }
    }
}
