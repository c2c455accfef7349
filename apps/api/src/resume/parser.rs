//! Heuristic resume parser: best-effort structure from raw text when no AI parse
//! is available.
//!
//! Line-based: a short line naming a section is a header when it is upper case,
//! ends with a colon, or holds nothing but header words. Every line until the
//! next header belongs to that section. Known limitations:
//! all experience bullets land in a single entry (no per-employer segmentation),
//! and name, location and summary are left blank.

use std::collections::HashSet;

use crate::dictionaries::{Dictionaries, SectionHeaders};
use crate::models::resume::{EducationItem, ExperienceItem, ParsedResume, Profile, ProjectItem};
use crate::resume::impact::skills_in_bullet;
use crate::text::{
    first_email, first_phone, starts_with_bullet, strip_bullet, DATE_RANGE_RE, EMAIL_RE, PHONE_RE,
};

const MIN_BULLET_CHARS: usize = 10;
const MIN_PLAIN_BULLET_CHARS: usize = 20;
const MAX_PLAIN_BULLET_CHARS: usize = 200;
const MAX_COMPANY_CHARS: usize = 50;
const MAX_TITLE_CHARS: usize = 50;
const MAX_INSTITUTION_CHARS: usize = 100;
const MIN_SKILL_CHARS: usize = 2;
const MAX_SKILL_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Experience,
    Education,
    Skills,
    Projects,
    Other,
}

/// Section bodies in document order.
#[derive(Debug, Default)]
struct Sections<'a> {
    experience: Vec<&'a str>,
    education: Vec<&'a str>,
    skills: Vec<&'a str>,
    projects: Vec<&'a str>,
}

/// Parses `text` into a `ParsedResume`. Never fails; unmatched sections are empty.
pub fn parse(text: &str, dicts: &Dictionaries) -> ParsedResume {
    let limits = &dicts.parser_limits;
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(limits.max_lines)
        .collect();

    let sections = split_sections(&lines, dicts);

    let skills = extract_skills(&sections.skills, dicts);
    let experience = extract_experience(&sections.experience, &skills, dicts);
    let education = extract_education(&sections.education, dicts);
    let projects = extract_projects(&sections.projects, &skills, dicts);

    ParsedResume {
        profile: Profile {
            email: first_email(text).unwrap_or_default().to_string(),
            phone: first_phone(text).unwrap_or_default().to_string(),
            ..Default::default()
        },
        experience,
        education,
        skills,
        projects,
    }
}

fn header_kind(line: &str, headers: &SectionHeaders, max_words: usize) -> Option<Section> {
    if starts_with_bullet(line) {
        return None;
    }
    // "Skills: Rust, Go" is content; "Skills:" is a header.
    let head = match line.split_once(':') {
        Some((_, rest)) if !rest.trim().is_empty() => return None,
        Some((head, _)) => head,
        None => line,
    };
    if head.split_whitespace().count() > max_words {
        return None;
    }
    let lower = head.to_lowercase();
    let kind = [
        (&headers.experience, Section::Experience),
        (&headers.education, Section::Education),
        (&headers.skills, Section::Skills),
        (&headers.projects, Section::Projects),
        (&headers.other, Section::Other),
    ]
    .into_iter()
    .find(|(set, _)| set.any_in(&lower))
    .map(|(_, kind)| kind)?;

    let only_header_words = lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .all(|w| headers.is_header_word(w));
    (is_upper_case(head) || line.ends_with(':') || only_header_words).then_some(kind)
}

fn is_upper_case(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
}

fn split_sections<'a>(lines: &[&'a str], dicts: &Dictionaries) -> Sections<'a> {
    let headers = &dicts.parser.headers;
    let max_words = dicts.parser_limits.max_header_words;

    let mut sections = Sections::default();
    let mut current: Option<Section> = None;

    for &line in lines {
        if let Some(kind) = header_kind(line, headers, max_words) {
            current = Some(kind);
            continue;
        }
        let bucket = match current {
            Some(Section::Experience) => &mut sections.experience,
            Some(Section::Education) => &mut sections.education,
            Some(Section::Skills) => &mut sections.skills,
            Some(Section::Projects) => &mut sections.projects,
            Some(Section::Other) | None => continue,
        };
        bucket.push(line);
    }
    sections
}

fn is_contact_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    EMAIL_RE.is_match(line)
        || PHONE_RE.is_match(line)
        || ["email:", "phone:", "location:", "linkedin", "github.com"]
            .iter()
            .any(|p| lower.starts_with(p) || lower.contains(p))
}

/// Bullet-like lines: a leading glyph, or a plain sentence of plausible length.
/// Dated lines are role headers ("Acme | 2020 - Present"), not bullets.
fn bullets_from(lines: &[&str], max: usize) -> Vec<String> {
    lines
        .iter()
        .filter(|l| {
            starts_with_bullet(l)
                || ((MIN_PLAIN_BULLET_CHARS..MAX_PLAIN_BULLET_CHARS).contains(&l.chars().count())
                    && !is_contact_line(l)
                    && !DATE_RANGE_RE.is_match(l))
        })
        .map(|l| strip_bullet(l).to_string())
        .filter(|l| l.chars().count() > MIN_BULLET_CHARS)
        .take(max)
        .collect()
}

/// Text before a `|` separator, bounded in length.
fn label(line: &str, max_chars: usize) -> String {
    let head = line.split('|').next().unwrap_or_default().trim();
    head.chars().take(max_chars).collect()
}

fn extract_experience(
    lines: &[&str],
    skills: &[String],
    dicts: &Dictionaries,
) -> Vec<ExperienceItem> {
    let bullets = bullets_from(lines, dicts.parser_limits.max_bullets);
    if bullets.is_empty() {
        return vec![];
    }

    let vocab = &dicts.parser;
    let plain: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| !starts_with_bullet(l))
        .collect();

    let company = plain
        .iter()
        .find(|l| vocab.company_markers.any_in(&l.to_lowercase()))
        .map(|l| label(l, MAX_COMPANY_CHARS))
        .unwrap_or_default();
    let title = plain
        .iter()
        .find(|l| vocab.title_markers.any_in(&l.to_lowercase()))
        .map(|l| label(l, MAX_TITLE_CHARS))
        .unwrap_or_default();

    let mut seen = HashSet::new();
    let item_skills = bullets
        .iter()
        .flat_map(|b| skills_in_bullet(b, skills))
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect();

    vec![ExperienceItem {
        company,
        title,
        bullets,
        skills: item_skills,
        ..Default::default()
    }]
}

fn extract_education(lines: &[&str], dicts: &Dictionaries) -> Vec<EducationItem> {
    lines
        .iter()
        .find(|l| dicts.parser.education_markers.any_in(&l.to_lowercase()))
        .map(|l| EducationItem {
            institution: l.chars().take(MAX_INSTITUTION_CHARS).collect(),
            ..Default::default()
        })
        .into_iter()
        .collect()
}

fn extract_skills(lines: &[&str], dicts: &Dictionaries) -> Vec<String> {
    let limits = &dicts.parser_limits;
    let mut seen = HashSet::new();

    lines
        .iter()
        .take(limits.skill_lines)
        // "Languages: Rust, Go" → "Rust, Go"
        .map(|l| l.rsplit_once(':').map_or(*l, |(_, rest)| rest))
        .flat_map(|l| l.split([',', '|', '•', '·', ';']))
        .map(|s| strip_bullet(s).to_string())
        .filter(|s| (MIN_SKILL_CHARS..=MAX_SKILL_CHARS).contains(&s.chars().count()))
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(limits.max_skills)
        .collect()
}

fn extract_projects(lines: &[&str], skills: &[String], dicts: &Dictionaries) -> Vec<ProjectItem> {
    let bullets = bullets_from(lines, dicts.parser_limits.max_bullets);
    if bullets.is_empty() {
        return vec![];
    }

    let mut seen = HashSet::new();
    let technologies = bullets
        .iter()
        .flat_map(|b| skills_in_bullet(b, skills))
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect();

    vec![ProjectItem {
        technologies,
        bullets,
        ..Default::default()
    }]
}
