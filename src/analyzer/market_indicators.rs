use crate::model::JobRecord;
use serde::Serialize;
use std::collections::HashMap;

/// One row of a ranked count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub key: String,
    pub count: usize,
}

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    pub fn jobs_by_country(jobs: &[JobRecord]) -> Vec<Count> {
        let keys = jobs.iter().map(|j| j.country.trim()).filter(|c| !c.is_empty()).map(title_case);
        rank(tally(keys), None)
    }

    pub fn top_companies(jobs: &[JobRecord], limit: usize) -> Vec<Count> {
        let keys = jobs.iter().map(|j| j.company.trim()).filter(|c| !c.is_empty()).map(String::from);
        rank(tally(keys), Some(limit))
    }

    /// Titles are counted case-insensitively and reported title-cased.
    pub fn top_titles(jobs: &[JobRecord], limit: usize) -> Vec<Count> {
        let keys = jobs.iter().map(|j| j.title.trim().to_lowercase()).filter(|t| !t.is_empty());
        rank(tally(keys), Some(limit))
            .into_iter()
            .map(|c| Count {
                key: title_case(&c.key),
                count: c.count,
            })
            .collect()
    }

    /// Postings per `YYYY-MM`, oldest month first.
    pub fn jobs_by_month(jobs: &[JobRecord]) -> Vec<Count> {
        let keys = jobs.iter().filter_map(|j| j.posted_date).map(|d| d.format("%Y-%m").to_string());
        let mut months: Vec<Count> = tally(keys)
            .into_iter()
            .map(|(key, count)| Count { key, count })
            .collect();
        months.sort_by(|a, b| a.key.cmp(&b.key));
        months
    }

    /// Skills are counted lowercased, so `Python` and `python` add up here.
    pub fn top_skills(jobs: &[JobRecord], limit: usize) -> Vec<Count> {
        rank(skill_tally(jobs.iter()), Some(limit))
    }
}

pub(crate) fn skill_tally<'a>(jobs: impl Iterator<Item = &'a JobRecord>) -> HashMap<String, usize> {
    let keys = jobs.flat_map(|j| j.skills.iter()).map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
    tally(keys)
}

pub(crate) fn tally(keys: impl Iterator<Item = String>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Sorts by count descending, then key ascending, and truncates to `limit`.
pub(crate) fn rank(counts: HashMap<String, usize>, limit: Option<usize>) -> Vec<Count> {
    let mut ranked: Vec<Count> = counts.into_iter().map(|(key, count)| Count { key, count }).collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
