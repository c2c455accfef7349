//! Heuristic job analyzer: structured requirements from raw posting text using
//! the keyword dictionaries. Company, location and salary cannot be recovered
//! reliably without structure and get fixed placeholders.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dictionaries::Dictionaries;
use crate::models::job::{JobRequirements, ParsedJobDescription};
use crate::text::{contains_term, strip_bullet};

/// `5 years of experience`, `3+ yrs experience`, `2-years experience`.
static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*\+?[\s-]*(?:years?|yrs?)\s+(?:of\s+)?experience").unwrap()
});

pub const NOT_SPECIFIED: &str = "Not specified";
const DEFAULT_TITLE: &str = "Job Position";
const REQUIRED_SKILLS: usize = 8;
const PREFERRED_SKILLS: usize = 4;
const MAX_KEYWORDS: usize = 10;
const MAX_RESPONSIBILITIES: usize = 5;
const MIN_RESPONSIBILITY_CHARS: usize = 20;

/// Checked in order; the first hit names the employment type.
const EMPLOYMENT_TYPES: &[(&str, &str)] = &[
    ("internship", "Internship"),
    ("part-time", "Part-time"),
    ("part time", "Part-time"),
    ("contract*", "Contract"),
];
const DEFAULT_EMPLOYMENT_TYPE: &str = "Full-time";

pub fn analyze(job_text: &str, dicts: &Dictionaries) -> ParsedJobDescription {
    let lower = job_text.to_lowercase();
    let vocab = &dicts.job;

    let mut seen = HashSet::new();
    let mut hits: Vec<String> = Vec::new();
    let mut tech_stack: Vec<String> = Vec::new();
    let categories = [
        (&vocab.languages, true),
        (&vocab.frameworks, true),
        (&vocab.databases, true),
        (&vocab.tools, true),
        (&vocab.methodologies, false),
    ];
    for (set, is_tech) in categories {
        for term in set.hits(&lower) {
            if !seen.insert(term) {
                continue;
            }
            hits.push(term.to_string());
            if is_tech {
                tech_stack.push(term.to_string());
            }
        }
    }

    let lines: Vec<&str> = job_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let title = lines
        .first()
        .map(|l| l.to_string())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let responsibilities = lines
        .iter()
        .filter(|l| l.chars().count() > MIN_RESPONSIBILITY_CHARS)
        .filter(|l| vocab.responsibility_verbs.any_in(&l.to_lowercase()))
        .map(|l| strip_bullet(l).to_string())
        .take(MAX_RESPONSIBILITIES)
        .collect();

    ParsedJobDescription {
        title,
        company: "Company Name".to_string(),
        location: "Location".to_string(),
        employment_type: employment_type(&lower).to_string(),
        salary_range: NOT_SPECIFIED.to_string(),
        industry: "Technology".to_string(),
        requirements: JobRequirements {
            required_skills: hits.iter().take(REQUIRED_SKILLS).cloned().collect(),
            preferred_skills: hits
                .iter()
                .skip(REQUIRED_SKILLS)
                .take(PREFERRED_SKILLS)
                .cloned()
                .collect(),
            experience_years: experience_years(job_text),
            education: education_requirement(&lower, dicts).to_string(),
            certifications: vec![],
        },
        responsibilities,
        keywords: hits.into_iter().take(MAX_KEYWORDS).collect(),
        tech_stack,
    }
}

fn experience_years(text: &str) -> String {
    EXPERIENCE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| format!("{} years", m.as_str()))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Highest degree mentioned.
fn education_requirement(lower: &str, dicts: &Dictionaries) -> &'static str {
    let vocab = &dicts.job;
    if vocab.doctorate.any_in(lower) {
        "PhD or equivalent"
    } else if vocab.masters.any_in(lower) {
        "Master's degree or equivalent"
    } else if vocab.degree.any_in(lower) {
        "Bachelor's degree or equivalent"
    } else {
        NOT_SPECIFIED
    }
}

fn employment_type(lower: &str) -> &'static str {
    EMPLOYMENT_TYPES
        .iter()
        .find(|(term, _)| contains_term(lower, term))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_EMPLOYMENT_TYPE)
}
