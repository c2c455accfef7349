use serde::{Deserialize, Serialize};

/// Structured resume, produced either by the AI parse or by the heuristic parser.
///
/// Every collection defaults to an empty array so consumers can iterate
/// unconditionally, including when AI output omits a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceItem {
    pub company: String,
    pub title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub bullets: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub graduation_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub bullets: Vec<String>,
}

impl ParsedResume {
    /// All experience and project bullets, in document order.
    pub fn all_bullets(&self) -> impl Iterator<Item = &str> {
        self.experience
            .iter()
            .flat_map(|e| e.bullets.iter())
            .chain(self.projects.iter().flat_map(|p| p.bullets.iter()))
            .map(String::as_str)
    }

    /// Lowercased education text (institution, degree, field) used for overlap checks.
    pub fn education_text(&self) -> String {
        self.education
            .iter()
            .map(|e| format!("{} {} {}", e.degree, e.field, e.institution))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl ExperienceItem {
    /// Lowercased title, description and bullets joined into one string.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.bullets.join(" ")
        )
        .to_lowercase()
    }
}

/// A resume bullet prepared for later retrieval: impact-scored and skill-tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBullet {
    pub text: String,
    pub impact_score: u8,
    pub skills: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collections_deserialize_as_empty() {
        let resume: ParsedResume = serde_json::from_str(r#"{"profile": {"name": "Ada"}}"#).unwrap();
        assert_eq!(resume.profile.name, "Ada");
        assert!(resume.experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.skills.is_empty());
        assert!(resume.projects.is_empty());
    }

    #[test]
    fn test_experience_uses_camel_case_keys() {
        let json = r#"{
            "experience": [{
                "company": "Initech",
                "title": "Engineer",
                "startDate": "2020",
                "endDate": "Present",
                "bullets": ["Shipped things"]
            }]
        }"#;
        let resume: ParsedResume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.experience[0].start_date, "2020");
        assert_eq!(resume.experience[0].end_date, "Present");
        assert!(resume.experience[0].skills.is_empty());
    }

    #[test]
    fn test_all_bullets_chains_experience_and_projects() {
        let resume = ParsedResume {
            experience: vec![ExperienceItem {
                bullets: vec!["a".to_string(), "b".to_string()],
                ..Default::default()
            }],
            projects: vec![ProjectItem {
                bullets: vec!["c".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let bullets: Vec<&str> = resume.all_bullets().collect();
        assert_eq!(bullets, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serialized_default_has_every_array_field() {
        let value = serde_json::to_value(ParsedResume::default()).unwrap();
        for key in ["experience", "education", "skills", "projects"] {
            assert!(value[key].is_array(), "{key} should be an array");
        }
    }
}
