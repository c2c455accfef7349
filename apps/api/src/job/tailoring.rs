//! Job-specific tailoring: AI rewrite suggestions, plus a deterministic
//! projection of what they would do to the job-mode score.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assist::{AiAssistant, AssistError};
use crate::dictionaries::Dictionaries;
use crate::errors::AppError;
use crate::models::job::JobContext;
use crate::models::resume::{ParsedResume, ScoredBullet};
use crate::resume::ats_score::score_for_job;
use crate::resume::impact::score_bullets;

/// Bullets considered before relevance filtering.
const REFERENCE_POOL: usize = 10;
const REFERENCE_LIMIT: usize = 5;
/// Bullets at or above this impact are offered even without a matching skill.
const HIGH_IMPACT: u8 = 7;

const QUESTION_FIELD: &str = "question";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailorMode {
    /// One-pass rewrite.
    #[default]
    Fast,
    /// The model may ask clarifying questions instead of guessing.
    Assistive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TailorChange {
    pub section: String,
    pub index: usize,
    pub field: String,
    pub original: String,
    pub suggested: String,
    pub reasoning: String,
    pub confidence: f32,
    /// Content not grounded in the resume; shown to the user, never auto-applied.
    pub is_external: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtsImprovements {
    pub keyword_matches: u32,
    pub estimated_score_increase: i32,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TailoringSuggestions {
    pub changes: Vec<TailorChange>,
    pub ats_improvements: AtsImprovements,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub suggestions: TailoringSuggestions,
    pub mode: TailorMode,
    pub baseline_score: u8,
    pub projected_score: u8,
    pub applied_changes: usize,
    pub reference_bullets: Vec<ScoredBullet>,
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn replace_bullet(bullets: &mut [String], original: &str, suggested: &str) -> bool {
    match bullets.iter_mut().find(|b| same_text(b, original)) {
        Some(bullet) => {
            *bullet = suggested.to_string();
            true
        }
        None => false,
    }
}

fn apply_one(resume: &mut ParsedResume, change: &TailorChange) -> bool {
    let suggested = change.suggested.trim();
    if suggested.is_empty() {
        return false;
    }
    match (change.section.as_str(), change.field.as_str()) {
        ("experience", field) => {
            let Some(item) = resume.experience.get_mut(change.index) else {
                return false;
            };
            match field {
                "bullets" => replace_bullet(&mut item.bullets, &change.original, suggested),
                "title" => {
                    item.title = suggested.to_string();
                    true
                }
                "description" => {
                    item.description = suggested.to_string();
                    true
                }
                _ => false,
            }
        }
        ("projects", field) => {
            let Some(item) = resume.projects.get_mut(change.index) else {
                return false;
            };
            match field {
                "bullets" => replace_bullet(&mut item.bullets, &change.original, suggested),
                "title" | "name" => {
                    item.name = suggested.to_string();
                    true
                }
                "description" => {
                    item.description = suggested.to_string();
                    true
                }
                _ => false,
            }
        }
        ("skills", _) => {
            if resume.skills.iter().any(|s| same_text(s, suggested)) {
                return false;
            }
            match resume
                .skills
                .iter_mut()
                .find(|s| !change.original.trim().is_empty() && same_text(s, &change.original))
            {
                Some(skill) => *skill = suggested.to_string(),
                None => resume.skills.push(suggested.to_string()),
            }
            true
        }
        _ => false,
    }
}

/// Applies grounded changes to a copy of `resume`. External suggestions and
/// clarifying questions are skipped, as are changes whose target does not exist.
/// Returns the edited resume and the number of changes applied.
pub fn apply_changes(resume: &ParsedResume, changes: &[TailorChange]) -> (ParsedResume, usize) {
    let mut edited = resume.clone();
    let applied = changes
        .iter()
        .filter(|c| !c.is_external && c.field != QUESTION_FIELD)
        .filter(|c| apply_one(&mut edited, c))
        .count();
    (edited, applied)
}

/// The strongest resume bullets that relate to the job: the top bullets by
/// impact, kept when they share a skill with the job or are high impact.
pub fn relevant_bullets(
    resume: &ParsedResume,
    job: &JobContext,
    dicts: &Dictionaries,
) -> Vec<ScoredBullet> {
    let req = &job.parsed.requirements;
    let targets: Vec<String> = req
        .required_skills
        .iter()
        .chain(req.preferred_skills.iter())
        .chain(job.parsed.tech_stack.iter())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut bullets = score_bullets(resume, dicts);
    bullets.sort_by(|a, b| b.impact_score.cmp(&a.impact_score));
    bullets
        .into_iter()
        .take(REFERENCE_POOL)
        .filter(|b| {
            b.impact_score >= HIGH_IMPACT
                || b.skills.iter().any(|skill| {
                    let skill = skill.to_lowercase();
                    targets
                        .iter()
                        .any(|t| skill.contains(t.as_str()) || t.contains(skill.as_str()))
                })
        })
        .take(REFERENCE_LIMIT)
        .collect()
}

/// AI tailoring suggestions with baseline and projected job-mode scores.
/// There is no heuristic rewrite, so an unavailable AI is a 503.
pub async fn tailor(
    assistant: &dyn AiAssistant,
    dicts: &Dictionaries,
    resume: &ParsedResume,
    job: &JobContext,
    mode: TailorMode,
) -> Result<TailorResponse, AppError> {
    let reference = relevant_bullets(resume, job, dicts);

    let suggestions = assistant
        .suggest_tailoring(resume, &job.parsed, mode, &reference)
        .await
        .map_err(|e| {
            warn!(error = %e, "tailoring unavailable");
            match e {
                AssistError::Disabled => AppError::ServiceUnavailable(
                    "Tailoring requires AI assistance, which is not configured".to_string(),
                ),
                other => AppError::ServiceUnavailable(format!("Tailoring failed: {other}")),
            }
        })?;

    let baseline = score_for_job(resume, "", job, dicts).score;
    let (edited, applied_changes) = apply_changes(resume, &suggestions.changes);
    let projected = score_for_job(&edited, "", job, dicts).score;

    info!(
        ?mode,
        changes = suggestions.changes.len(),
        applied_changes,
        baseline,
        projected,
        "tailoring suggestions ready"
    );

    Ok(TailorResponse {
        suggestions,
        mode,
        baseline_score: baseline,
        projected_score: projected,
        applied_changes,
        reference_bullets: reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::testing::ScriptedAssistant;
    use crate::assist::DisabledAssistant;
    use crate::models::job::{JobRequirements, ParsedJobDescription};
    use crate::models::resume::{ExperienceItem, ProjectItem};

    fn resume() -> ParsedResume {
        ParsedResume {
            experience: vec![ExperienceItem {
                title: "Engineer".into(),
                bullets: vec![
                    "Worked on the checkout page".into(),
                    "Led migration of 12 services to Kubernetes, reducing costs by 30%".into(),
                ],
                ..Default::default()
            }],
            projects: vec![ProjectItem {
                name: "side".into(),
                bullets: vec!["Wrote a blog engine in React".into()],
                ..Default::default()
            }],
            skills: vec!["React".into(), "AWS".into(), "Kubernetes".into()],
            ..Default::default()
        }
    }

    fn job() -> JobContext {
        JobContext {
            parsed: ParsedJobDescription {
                requirements: JobRequirements {
                    required_skills: vec!["React".into(), "Node.js".into(), "AWS".into()],
                    ..Default::default()
                },
                ..Default::default()
            },
            raw_text: None,
        }
    }

    fn change(section: &str, index: usize, field: &str, original: &str, suggested: &str) -> TailorChange {
        TailorChange {
            section: section.into(),
            index,
            field: field.into(),
            original: original.into(),
            suggested: suggested.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_changes_rewrites_matching_bullet() {
        let changes = [change(
            "experience",
            0,
            "bullets",
            "worked on the checkout page ",
            "Rebuilt the checkout page in React",
        )];
        let (edited, applied) = apply_changes(&resume(), &changes);
        assert_eq!(applied, 1);
        assert_eq!(edited.experience[0].bullets[0], "Rebuilt the checkout page in React");
    }

    #[test]
    fn test_apply_changes_skips_external_questions_and_missing_targets() {
        let mut external = change("skills", 0, "skills", "", "Node.js");
        external.is_external = true;
        let changes = [
            external,
            change("experience", 0, QUESTION_FIELD, "", "What was the team size?"),
            change("experience", 5, "title", "", "Senior Engineer"),
            change("experience", 0, "bullets", "not in the resume", "x"),
        ];
        let (edited, applied) = apply_changes(&resume(), &changes);
        assert_eq!(applied, 0);
        assert_eq!(edited, resume());
    }

    #[test]
    fn test_apply_changes_to_projects_and_skills() {
        let changes = [
            change("projects", 0, "title", "side", "Static blog engine"),
            change("skills", 0, "skills", "", "Node.js"),
            change("skills", 0, "skills", "AWS", "Amazon Web Services"),
            change("skills", 0, "skills", "", "react"),
        ];
        let (edited, applied) = apply_changes(&resume(), &changes);
        assert_eq!(applied, 3);
        assert_eq!(edited.projects[0].name, "Static blog engine");
        assert_eq!(
            edited.skills,
            vec!["React", "Amazon Web Services", "Kubernetes", "Node.js"]
        );
    }

    #[test]
    fn test_relevant_bullets_prefer_skill_overlap_or_high_impact() {
        let bullets = relevant_bullets(&resume(), &job(), &Dictionaries::default());
        let texts: Vec<&str> = bullets.iter().map(|b| b.text.as_str()).collect();
        assert!(texts.contains(&"Wrote a blog engine in React"));
        assert!(!texts.contains(&"Worked on the checkout page"));
        assert!(bullets.len() <= REFERENCE_LIMIT);
        assert!(bullets
            .windows(2)
            .all(|w| w[0].impact_score >= w[1].impact_score));
    }

    #[tokio::test]
    async fn test_tailor_requires_ai() {
        let err = tailor(
            &DisabledAssistant,
            &Dictionaries::default(),
            &resume(),
            &job(),
            TailorMode::Fast,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_tailor_projects_score_from_applied_changes() {
        let ai = ScriptedAssistant {
            tailoring: Some(TailoringSuggestions {
                changes: vec![change("skills", 0, "skills", "", "Node.js")],
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = tailor(
            &ai,
            &Dictionaries::default(),
            &resume(),
            &job(),
            TailorMode::Assistive,
        )
        .await
        .unwrap();
        assert_eq!(out.applied_changes, 1);
        assert!(out.projected_score > out.baseline_score);
        assert_eq!(out.mode, TailorMode::Assistive);
        assert_eq!(ai.call_count(), 1);
    }

    #[test]
    fn test_mode_and_change_wire_format() {
        let mode: TailorMode = serde_json::from_str(r#""assistive""#).unwrap();
        assert_eq!(mode, TailorMode::Assistive);
        let parsed: TailoringSuggestions = serde_json::from_str(
            r#"{"changes": [{"section": "skills", "suggested": "Go", "isExternal": true}],
                "atsImprovements": {"missingKeywords": ["Go"]}}"#,
        )
        .unwrap();
        assert!(parsed.changes[0].is_external);
        assert_eq!(parsed.ats_improvements.missing_keywords, vec!["Go"]);
    }
}
