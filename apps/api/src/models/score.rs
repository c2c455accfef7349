use serde::{Deserialize, Serialize};

pub const MAX_SCORE: i32 = 100;

/// ATS compatibility score. `score` is always within [0, MAX_SCORE].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsScoreResult {
    pub score: u8,
    #[serde(default)]
    pub analysis: Option<AtsAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtsAnalysis {
    pub matching_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// Per-rule points for heuristic scores; empty for AI scores.
    pub contributions: Vec<RuleContribution>,
}

/// Points awarded by one named scoring rule, already bounded to the rule's range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: String,
    pub points: i32,
    pub max_points: i32,
}

impl AtsScoreResult {
    /// Builds a result, clamping `raw` into `[floor, MAX_SCORE]`.
    pub fn clamped(raw: i32, floor: i32, analysis: Option<AtsAnalysis>) -> Self {
        Self {
            score: raw.clamp(floor.clamp(0, MAX_SCORE), MAX_SCORE) as u8,
            analysis,
        }
    }
}

/// Classifier output: is this document plausibly a resume, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeVerdict {
    pub is_resume: bool,
    pub reason: String,
}

/// Combined AI + heuristic validation annotation returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationInfo {
    /// The AI verdict, when the AI path answered.
    pub ai_is_resume: Option<bool>,
    pub is_resume: bool,
    pub reason: String,
    pub heuristic_guess: bool,
    pub low_confidence: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_respects_floor_and_ceiling() {
        assert_eq!(AtsScoreResult::clamped(-40, 20, None).score, 20);
        assert_eq!(AtsScoreResult::clamped(140, 20, None).score, 100);
        assert_eq!(AtsScoreResult::clamped(-5, 0, None).score, 0);
        assert_eq!(AtsScoreResult::clamped(73, 0, None).score, 73);
    }

    #[test]
    fn test_floor_above_ceiling_is_capped() {
        assert_eq!(AtsScoreResult::clamped(50, 150, None).score, MAX_SCORE as u8);
    }

    #[test]
    fn test_verdict_serializes_camel_case() {
        let v = ResumeVerdict {
            is_resume: true,
            reason: "ok".into(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["isResume"], true);
    }

    #[test]
    fn test_analysis_missing_fields_default() {
        let a: AtsAnalysis = serde_json::from_str(r#"{"strengths": ["clear headers"]}"#).unwrap();
        assert_eq!(a.strengths, vec!["clear headers"]);
        assert!(a.matching_keywords.is_empty());
        assert!(a.contributions.is_empty());
    }
}
