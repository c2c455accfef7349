//! Heuristic ATS score, in two modes.
//!
//! General mode sums a fixed list of named rules, each bounded on its own, then
//! clamps once into [20, 100]. Job mode starts from a base of 40 and adds skill,
//! experience and education alignment with a previously analyzed job, clamped
//! into [0, 100].

use std::borrow::Cow;
use std::collections::HashSet;

use crate::dictionaries::Dictionaries;
use crate::models::job::JobContext;
use crate::models::resume::ParsedResume;
use crate::models::score::{AtsAnalysis, AtsScoreResult, RuleContribution};
use crate::resume::impact::validate_bullets;
use crate::text::{word_count, BULLET_LINE_RE, EMAIL_RE, METRIC_RE, PHONE_RE};

pub const GENERAL_FLOOR: i32 = 20;

const MAX_BULLET_SUGGESTIONS: usize = 3;

/// The document a general-mode rule looks at.
pub struct Document<'a> {
    pub resume: &'a ParsedResume,
    pub text: Cow<'a, str>,
    pub lower: String,
    pub dicts: &'a Dictionaries,
}

impl<'a> Document<'a> {
    /// Uses `raw_text` when present, otherwise a plain-text rendering of the resume.
    pub fn new(resume: &'a ParsedResume, raw_text: &'a str, dicts: &'a Dictionaries) -> Self {
        let text = if raw_text.trim().is_empty() {
            Cow::Owned(render_text(resume))
        } else {
            Cow::Borrowed(raw_text)
        };
        let lower = text.to_lowercase();
        Self {
            resume,
            text,
            lower,
            dicts,
        }
    }

    fn has_all_sections(&self) -> bool {
        let v = &self.dicts.scoring;
        v.experience.any_in(&self.lower) && v.education.any_in(&self.lower) && v.skills.any_in(&self.lower)
    }
}

/// Plain-text view of a parsed resume, laid out the way an uploaded one would be.
pub fn render_text(resume: &ParsedResume) -> String {
    let mut lines: Vec<String> = Vec::new();
    let p = &resume.profile;
    for field in [&p.name, &p.email, &p.phone, &p.location, &p.summary] {
        if !field.trim().is_empty() {
            lines.push(field.clone());
        }
    }
    if !resume.experience.is_empty() {
        lines.push("EXPERIENCE".into());
        for e in &resume.experience {
            lines.push(format!("{} {}", e.title, e.company).trim().to_string());
            lines.extend(e.bullets.iter().map(|b| format!("- {b}")));
        }
    }
    if !resume.education.is_empty() {
        lines.push("EDUCATION".into());
        for e in &resume.education {
            lines.push(format!("{} {} {}", e.degree, e.field, e.institution).trim().to_string());
        }
    }
    if !resume.skills.is_empty() {
        lines.push("SKILLS".into());
        lines.push(resume.skills.join(", "));
    }
    if !resume.projects.is_empty() {
        lines.push("PROJECTS".into());
        for p in &resume.projects {
            lines.extend(p.bullets.iter().map(|b| format!("- {b}")));
        }
    }
    lines.join("\n")
}

/// One independently bounded term of the general-mode score.
pub struct ScoringRule {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
    pub eval: fn(&Document) -> i32,
    pub strength: &'static str,
    pub improvement: &'static str,
}

impl ScoringRule {
    pub fn apply(&self, doc: &Document) -> RuleContribution {
        RuleContribution {
            rule: self.name.to_string(),
            points: (self.eval)(doc).clamp(self.min, self.max),
            max_points: self.max,
        }
    }
}

fn flag(present: bool, points: i32) -> i32 {
    if present {
        points
    } else {
        0
    }
}

fn per_unit(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(2)
}

/// Distinct numeric tokens, ignoring digits inside emails and phone numbers.
fn distinct_metrics(text: &str) -> usize {
    let stripped = EMAIL_RE.replace_all(text, " ");
    let stripped = PHONE_RE.replace_all(&stripped, " ");
    METRIC_RE
        .find_iter(&stripped)
        .map(|m| m.as_str().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

fn length_points(doc: &Document) -> i32 {
    let words = word_count(&doc.text);
    if (180..=1500).contains(&words) {
        10
    } else if words < 120 && !doc.has_all_sections() {
        -10
    } else {
        0
    }
}

pub const GENERAL_RULES: &[ScoringRule] = &[
    ScoringRule {
        name: "experience_section",
        min: 0,
        max: 15,
        eval: |d| flag(d.dicts.scoring.experience.any_in(&d.lower), 15),
        strength: "Has a work experience section",
        improvement: "Add a clearly labelled work experience section",
    },
    ScoringRule {
        name: "education_section",
        min: 0,
        max: 10,
        eval: |d| flag(d.dicts.scoring.education.any_in(&d.lower), 10),
        strength: "Has an education section",
        improvement: "Add an education section",
    },
    ScoringRule {
        name: "skills_section",
        min: 0,
        max: 10,
        eval: |d| flag(d.dicts.scoring.skills.any_in(&d.lower), 10),
        strength: "Has a skills section",
        improvement: "Add a skills section listing your technical skills",
    },
    ScoringRule {
        name: "bullet_lines",
        min: 0,
        max: 15,
        eval: |d| per_unit(BULLET_LINE_RE.find_iter(&d.text).count()),
        strength: "Achievements are written as bullet points",
        improvement: "Use bullet points to describe your achievements",
    },
    ScoringRule {
        name: "metrics",
        min: 0,
        max: 12,
        eval: |d| per_unit(distinct_metrics(&d.text)),
        strength: "Quantifies results with numbers",
        improvement: "Quantify achievements with numbers, percentages or amounts",
    },
    ScoringRule {
        name: "action_verbs",
        min: 0,
        max: 12,
        eval: |d| per_unit(d.dicts.action_verbs.count_in(&d.lower)),
        strength: "Uses strong action verbs",
        improvement: "Start bullets with action verbs such as led, built or reduced",
    },
    ScoringRule {
        name: "tech_terms",
        min: 0,
        max: 16,
        eval: |d| per_unit(d.dicts.scoring.tech_terms.hits(&d.lower).len()),
        strength: "Mentions in-demand technologies",
        improvement: "Name the specific technologies you have worked with",
    },
    ScoringRule {
        name: "email",
        min: 0,
        max: 5,
        eval: |d| flag(EMAIL_RE.is_match(&d.text), 5),
        strength: "Includes an email address",
        improvement: "Add an email address",
    },
    ScoringRule {
        name: "phone",
        min: 0,
        max: 5,
        eval: |d| flag(PHONE_RE.is_match(&d.text), 5),
        strength: "Includes a phone number",
        improvement: "Add a phone number",
    },
    ScoringRule {
        name: "bullet_volume",
        min: 0,
        max: 5,
        eval: |d| flag(d.resume.all_bullets().count() > 5, 5),
        strength: "Describes experience in detail",
        improvement: "Describe each role with several bullet points",
    },
    ScoringRule {
        name: "length",
        min: -10,
        max: 10,
        eval: length_points,
        strength: "Resume length is in the typical range",
        improvement: "Aim for roughly 180 to 1500 words",
    },
];

/// General-mode score from the parsed resume and the text it came from.
pub fn score_general(resume: &ParsedResume, raw_text: &str, dicts: &Dictionaries) -> AtsScoreResult {
    let doc = Document::new(resume, raw_text, dicts);

    let contributions: Vec<RuleContribution> = GENERAL_RULES.iter().map(|r| r.apply(&doc)).collect();
    let total: i32 = contributions.iter().map(|c| c.points).sum();

    let mut strengths = Vec::new();
    let mut improvements = Vec::new();
    for (rule, c) in GENERAL_RULES.iter().zip(&contributions) {
        if c.points >= rule.max {
            strengths.push(rule.strength.to_string());
        } else if c.points <= 0 {
            improvements.push(rule.improvement.to_string());
        }
    }

    let bullets: Vec<String> = resume.all_bullets().map(str::to_string).collect();
    let mut seen = HashSet::new();
    improvements.extend(
        validate_bullets(&bullets)
            .suggestions
            .into_iter()
            .filter(|s| seen.insert(s.clone()))
            .take(MAX_BULLET_SUGGESTIONS),
    );

    let analysis = AtsAnalysis {
        matching_keywords: dicts
            .scoring
            .tech_terms
            .hits(&doc.lower)
            .into_iter()
            .map(str::to_string)
            .collect(),
        missing_keywords: vec![],
        strengths,
        improvements,
        contributions,
    };

    AtsScoreResult::clamped(total, GENERAL_FLOOR, Some(analysis))
}

const JOB_BASE: i32 = 40;
const JOB_SKILLS_MAX: i32 = 30;
const JOB_SKILLS_UNLISTED: i32 = 15;
const JOB_EXPERIENCE_MATCH: i32 = 20;
const JOB_EXPERIENCE_DEFAULT: i32 = 5;
const JOB_EDUCATION_MATCH: i32 = 10;
const JOB_EDUCATION_MISMATCH: i32 = 3;
const JOB_EDUCATION_DEFAULT: i32 = 5;
const MIN_OVERLAP_WORD_CHARS: usize = 4;

/// Lowercased words longer than three characters.
fn overlap_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_OVERLAP_WORD_CHARS)
        .map(str::to_string)
        .collect()
}

fn skill_matches(skill: &str, resume_skills: &[String], text_lower: &str) -> bool {
    let skill = skill.trim().to_lowercase();
    if skill.is_empty() {
        return false;
    }
    resume_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .any(|s| s.contains(&skill) || skill.contains(&s))
        || text_lower.contains(&skill)
}

fn is_unspecified(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case("not specified")
}

/// Job-specific score: alignment of the resume with an analyzed job.
pub fn score_for_job(
    resume: &ParsedResume,
    raw_text: &str,
    job: &JobContext,
    dicts: &Dictionaries,
) -> AtsScoreResult {
    let doc = Document::new(resume, raw_text, dicts);
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    let job_skills = job.parsed.listed_skills();
    let (matching, missing): (Vec<String>, Vec<String>) = job_skills
        .iter()
        .cloned()
        .partition(|s| skill_matches(s, &resume.skills, &doc.lower));

    let skill_points = if job_skills.is_empty() {
        JOB_SKILLS_UNLISTED
    } else {
        let fraction = matching.len() as f64 / job_skills.len() as f64;
        (fraction * JOB_SKILLS_MAX as f64).round() as i32
    };
    if !job_skills.is_empty() {
        strengths.push(format!(
            "Matches {} of {} listed skills",
            matching.len(),
            job_skills.len()
        ));
    }
    if !missing.is_empty() {
        improvements.push(format!("Add missing skills if you have them: {}", missing.join(", ")));
    }

    let job_words = overlap_words(&job.text());
    let relevant_experience = resume
        .experience
        .iter()
        .map(|e| e.combined_text())
        .any(|text| job_words.iter().any(|w| text.contains(w.as_str())));
    let experience_points = if relevant_experience {
        strengths.push("Experience relates to the role".to_string());
        JOB_EXPERIENCE_MATCH
    } else {
        improvements.push("Describe experience using the job's terminology".to_string());
        JOB_EXPERIENCE_DEFAULT
    };

    let job_education = &job.parsed.requirements.education;
    let resume_education = resume.education_text();
    let education_points = if is_unspecified(job_education) || resume_education.trim().is_empty() {
        JOB_EDUCATION_DEFAULT
    } else if !overlap_words(job_education).is_disjoint(&overlap_words(&resume_education)) {
        strengths.push("Education matches the stated requirement".to_string());
        JOB_EDUCATION_MATCH
    } else {
        improvements.push(format!("The role asks for: {job_education}"));
        JOB_EDUCATION_MISMATCH
    };

    let contributions = vec![
        RuleContribution {
            rule: "base".into(),
            points: JOB_BASE,
            max_points: JOB_BASE,
        },
        RuleContribution {
            rule: "skills_match".into(),
            points: skill_points,
            max_points: JOB_SKILLS_MAX,
        },
        RuleContribution {
            rule: "experience_match".into(),
            points: experience_points,
            max_points: JOB_EXPERIENCE_MATCH,
        },
        RuleContribution {
            rule: "education_match".into(),
            points: education_points,
            max_points: JOB_EDUCATION_MATCH,
        },
    ];
    let total = contributions.iter().map(|c| c.points).sum();

    let analysis = AtsAnalysis {
        matching_keywords: matching,
        missing_keywords: missing,
        strengths,
        improvements,
        contributions,
    };
    AtsScoreResult::clamped(total, 0, Some(analysis))
}
