use crate::catalog::Catalog;
use crate::search::filter;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    pub total: usize,
    pub matches: Vec<&'a str>,
}

impl<'a> SearchReport<'a> {
    pub fn new(catalog: &'a Catalog, query: Option<&'a str>) -> Self {
        Self {
            query,
            total: catalog.len(),
            matches: filter(catalog.domains(), query.unwrap_or_default()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if self.matches.is_empty() {
            out.push_str("No matching domains\n");
            return out;
        }

        for domain in &self.matches {
            let _ = writeln!(out, "{domain}");
        }

        let _ = match self.query {
            Some(q) if !q.is_empty() => {
                writeln!(out, "\n{} of {} domains match {q:?}", self.matches.len(), self.total)
            }
            _ => writeln!(out, "\n{} domains", self.total),
        };
        out
    }
}
