// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Keyword-driven pattern matching and instantiation plans.
//!
//! Nothing here touches the live document: a template is a plan of nodes and
//! edges keyed by template-local ids, and the caller creates them through the
//! mutation engine, remapping those ids to real ones.

mod catalog;

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ObservableValue;
use crate::resolve;

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateNode {
    pub template_id: String,
    pub type_name: String,
    pub x: f64,
    pub y: f64,
    pub value: Option<ObservableValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEdge {
    pub source: String,
    pub source_slot: String,
    pub target: String,
    pub target_slot: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternTemplate {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub nodes: Vec<TemplateNode>,
    pub edges: Vec<TemplateEdge>,
}

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").expect("word regex"));

fn tokenize(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_owned()).collect()
}

fn keyword_score(template: &PatternTemplate, tokens: &BTreeSet<String>) -> usize {
    template
        .keywords
        .iter()
        .filter(|keyword| tokens.contains(keyword.as_str()))
        .count()
}

pub fn all() -> &'static [PatternTemplate] {
    &catalog::TEMPLATES
}

pub fn find(name: &str) -> Option<&'static PatternTemplate> {
    catalog::TEMPLATES.iter().find(|template| template.name.eq_ignore_ascii_case(name))
}

/// Pick the template whose keywords best cover the description's tokens.
///
/// Plain set-intersection counting; ties break in catalog order (first wins)
/// and a zero score means no match.
pub fn recognize_intent(text: &str) -> Option<&'static PatternTemplate> {
    let tokens = tokenize(text);
    let mut best: Option<(&'static PatternTemplate, usize)> = None;
    for template in catalog::TEMPLATES.iter() {
        let score = keyword_score(template, &tokens);
        if score == 0 {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((template, score)),
        }
    }
    best.map(|(template, _)| template)
}

/// Rank templates against a free-text query for `get_available_patterns`.
/// An empty query lists the whole catalog in order.
pub fn search(query: &str) -> Vec<&'static PatternTemplate> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return catalog::TEMPLATES.iter().collect();
    }

    let tokens = tokenize(trimmed);
    let mut scored = catalog::TEMPLATES
        .iter()
        .map(|template| {
            let keyword_hits = keyword_score(template, &tokens) as f64 * 100.0;
            let fuzzy = resolve::search_score(trimmed, &template.name);
            (template, keyword_hits + fuzzy)
        })
        .filter(|(_, score)| *score >= 50.0)
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(template, _)| template).collect()
}
