//! Filter query model for the issue listing.
//!
//! The listing's applied filters live in a single query string of
//! whitespace-separated `facet:value` tokens (e.g. `status:open label:bug`).
//! `FilterQuery` is the parsed, immutable form of that string: every edit
//! produces a new value, and membership checks are exact-token comparisons
//! rather than substring tests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};
use crate::types::IssueStatus;

/// One filterable dimension of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Status,
    Assignee,
    Label,
    Milestone,
    Author,
}

impl Facet {
    pub const ALL: &[Facet] = &[
        Facet::Status,
        Facet::Assignee,
        Facet::Label,
        Facet::Milestone,
        Facet::Author,
    ];

    /// Whether the query may hold several tokens of this facet at once.
    /// Status, milestone, and author are scalar search parameters on the
    /// backend; a new token replaces the old one.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Facet::Assignee | Facet::Label)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Status => write!(f, "status"),
            Facet::Assignee => write!(f, "assignee"),
            Facet::Label => write!(f, "label"),
            Facet::Milestone => write!(f, "milestone"),
            Facet::Author => write!(f, "author"),
        }
    }
}

impl FromStr for Facet {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "status" => Ok(Facet::Status),
            "assignee" => Ok(Facet::Assignee),
            "label" => Ok(Facet::Label),
            "milestone" => Ok(Facet::Milestone),
            "author" => Ok(Facet::Author),
            _ => Err(DeskError::InvalidToken(
                s.to_string(),
                "unknown facet".to_string(),
            )),
        }
    }
}

/// A single `facet:value` unit within the filter query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToken {
    pub facet: Facet,
    pub value: String,
}

impl FilterToken {
    pub fn new(facet: Facet, value: impl Into<String>) -> Self {
        Self {
            facet,
            value: value.into(),
        }
    }

    /// Parse a strict `facet:value` token. Used where the caller supplies a
    /// token directly (CLI flags); free text is rejected here, unlike in
    /// `FilterQuery::parse` where it becomes a search term.
    pub fn parse(s: &str) -> Result<Self> {
        let (facet, value) = s.split_once(':').ok_or_else(|| {
            DeskError::InvalidToken(s.to_string(), "expected facet:value".to_string())
        })?;

        if value.is_empty() {
            return Err(DeskError::InvalidToken(
                s.to_string(),
                "empty value".to_string(),
            ));
        }

        Ok(Self::new(facet.parse::<Facet>()?, value))
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.facet, self.value)
    }
}

impl FromStr for FilterToken {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        FilterToken::parse(s)
    }
}

/// Parsed filter query: an ordered token list plus free-text search terms.
///
/// Words without a known `facet:` prefix are collected as title search terms,
/// matching how the backend splits its query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    tokens: Vec<FilterToken>,
    terms: Vec<String>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string. Never fails: anything that is not a recognized
    /// `facet:value` token is kept as a free-text search term.
    pub fn parse(input: &str) -> Self {
        let mut query = Self::new();

        for word in input.split_whitespace() {
            match FilterToken::parse(word) {
                Ok(token) => query.push_token(token),
                Err(_) => query.terms.push(word.to_string()),
            }
        }

        query
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.terms.is_empty()
    }

    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    pub fn search_terms(&self) -> &[String] {
        &self.terms
    }

    /// Exact token membership. `status:open` never matches `status:opened`.
    pub fn contains(&self, token: &FilterToken) -> bool {
        self.tokens.contains(token)
    }

    /// All values currently applied for a facet, in insertion order.
    pub fn values(&self, facet: Facet) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| t.facet == facet)
            .map(|t| t.value.as_str())
            .collect()
    }

    /// The value of a single-valued facet, if applied.
    pub fn value(&self, facet: Facet) -> Option<&str> {
        self.tokens
            .iter()
            .find(|t| t.facet == facet)
            .map(|t| t.value.as_str())
    }

    /// The applied status filter, by exact token match.
    pub fn status(&self) -> Option<IssueStatus> {
        self.value(Facet::Status).and_then(|v| v.parse().ok())
    }

    /// Return a new query with `token` added. Single-valued facets replace
    /// any prior token of the same facet; multi-valued facets ignore an
    /// exact duplicate.
    pub fn with_token(&self, token: FilterToken) -> Self {
        let mut next = self.clone();
        next.push_token(token);
        next
    }

    /// Return a new query with `token` removed if present, added otherwise.
    pub fn toggle(&self, token: FilterToken) -> Self {
        let mut next = self.clone();
        if next.contains(&token) {
            next.tokens.retain(|t| *t != token);
        } else {
            next.push_token(token);
        }
        next
    }

    /// Return a new query with every token of `facet` removed.
    pub fn without_facet(&self, facet: Facet) -> Self {
        let mut next = self.clone();
        next.tokens.retain(|t| t.facet != facet);
        next
    }

    fn push_token(&mut self, token: FilterToken) {
        if self.contains(&token) {
            return;
        }
        if !token.facet.is_multi_valued()
            && let Some(existing) = self.tokens.iter_mut().find(|t| t.facet == token.facet)
        {
            // Single-valued facets replace in place so the token keeps its
            // position in the rendered query.
            existing.value = token.value;
            return;
        }
        self.tokens.push(token);
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.tokens {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
            first = false;
        }
        for term in &self.terms {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", term)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for FilterQuery {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(FilterQuery::parse(s))
    }
}
