use serde::{Deserialize, Serialize};

/// Structured job posting, produced by the AI analysis or the heuristic analyzer.
///
/// Same empty-array invariant as `ParsedResume`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedJobDescription {
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: String,
    pub salary_range: String,
    pub industry: String,
    pub requirements: JobRequirements,
    pub responsibilities: Vec<String>,
    pub keywords: Vec<String>,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequirements {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience_years: String,
    pub education: String,
    pub certifications: Vec<String>,
}

/// A previously analyzed job, optionally with the posting text it came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobContext {
    pub parsed: ParsedJobDescription,
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl ParsedJobDescription {
    /// Required then preferred skills, deduplicated case-insensitively.
    /// Falls back to the tech stack when the posting lists no skills.
    pub fn listed_skills(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut skills: Vec<String> = self
            .requirements
            .required_skills
            .iter()
            .chain(self.requirements.preferred_skills.iter())
            .filter(|s| !s.trim().is_empty())
            .filter(|s| seen.insert(s.trim().to_lowercase()))
            .cloned()
            .collect();

        if skills.is_empty() {
            skills = self
                .tech_stack
                .iter()
                .filter(|s| !s.trim().is_empty())
                .filter(|s| seen.insert(s.trim().to_lowercase()))
                .cloned()
                .collect();
        }
        skills
    }

    /// Every keyword-like entry: required, preferred, tech stack and free keywords.
    pub fn all_keywords(&self) -> Vec<&str> {
        self.requirements
            .required_skills
            .iter()
            .chain(self.requirements.preferred_skills.iter())
            .chain(self.tech_stack.iter())
            .chain(self.keywords.iter())
            .map(String::as_str)
            .collect()
    }
}

impl JobContext {
    /// Lowercased posting text. When the raw posting is unavailable, the parsed
    /// title, responsibilities and keywords stand in for it.
    pub fn text(&self) -> String {
        match self.raw_text.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.to_lowercase(),
            _ => {
                let p = &self.parsed;
                format!(
                    "{} {} {}",
                    p.title,
                    p.responsibilities.join(" "),
                    p.all_keywords().join(" ")
                )
                .to_lowercase()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let job: ParsedJobDescription = serde_json::from_str(r#"{"title": "SRE"}"#).unwrap();
        assert_eq!(job.title, "SRE");
        assert!(job.requirements.required_skills.is_empty());
        assert!(job.tech_stack.is_empty());
    }

    #[test]
    fn test_listed_skills_dedupes_case_insensitively() {
        let job = ParsedJobDescription {
            requirements: JobRequirements {
                required_skills: vec!["React".into(), "AWS".into()],
                preferred_skills: vec!["react".into(), "Kafka".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(job.listed_skills(), vec!["React", "AWS", "Kafka"]);
    }

    #[test]
    fn test_listed_skills_falls_back_to_tech_stack() {
        let job = ParsedJobDescription {
            tech_stack: vec!["rust".into()],
            ..Default::default()
        };
        assert_eq!(job.listed_skills(), vec!["rust"]);
    }

    #[test]
    fn test_context_text_prefers_raw_posting() {
        let ctx = JobContext {
            parsed: ParsedJobDescription {
                title: "Ignored".into(),
                ..Default::default()
            },
            raw_text: Some("Build PIPELINES".into()),
        };
        assert_eq!(ctx.text(), "build pipelines");
    }

    #[test]
    fn test_context_text_synthesized_without_raw_posting() {
        let ctx = JobContext {
            parsed: ParsedJobDescription {
                title: "Data Engineer".into(),
                keywords: vec!["Spark".into()],
                ..Default::default()
            },
            raw_text: None,
        };
        let text = ctx.text();
        assert!(text.contains("data engineer"));
        assert!(text.contains("spark"));
    }
}
