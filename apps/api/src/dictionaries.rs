//! Keyword dictionaries for the heuristic components.
//!
//! Everything the classifier, parser, scorer and job analyzer match against lives
//! here as plain data, injected at call sites. Tuning a list never touches
//! matching logic. Terms are stored lowercase; see [`crate::text::count_term`] for
//! the boundary and `*` prefix rules.

use serde::{Deserialize, Serialize};

use crate::text::count_term;

/// An ordered set of lowercase terms with word-boundary matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `haystack` must already be lowercased.
    pub fn any_in(&self, haystack: &str) -> bool {
        self.0.iter().any(|t| count_term(haystack, t) > 0)
    }

    /// Total occurrences of all terms.
    pub fn count_in(&self, haystack: &str) -> usize {
        self.0.iter().map(|t| count_term(haystack, t)).sum()
    }

    /// Distinct terms present, in dictionary order, without any `*` marker.
    pub fn hits(&self, haystack: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|t| count_term(haystack, t) > 0)
            .map(|t| t.trim_end_matches('*'))
            .collect()
    }

    pub fn first_in(&self, haystack: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| count_term(haystack, t) > 0)
            .map(|t| t.trim_end_matches('*'))
    }

    /// True when `line` (lowercased) starts with one of the terms.
    pub fn starts(&self, line: &str) -> bool {
        self.0.iter().any(|t| {
            let stem = t.trim_end_matches('*');
            if stem.is_empty() || !line.starts_with(stem) {
                return false;
            }
            let head_end = line[stem.len()..]
                .chars()
                .next()
                .map_or(line.len(), |c| stem.len() + c.len_utf8());
            count_term(&line[..head_end], t) > 0
        })
    }
}

/// Signal vocabularies for the resume-likelihood classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierVocabulary {
    pub experience: KeywordSet,
    pub education: KeywordSet,
    pub skills: KeywordSet,
    pub resume_phrases: KeywordSet,
    /// Tax forms, legal agreements, manuals, READMEs, FAQs.
    pub disqualifiers: KeywordSet,
    pub form_fields: KeywordSet,
    pub api_terms: KeywordSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierLimits {
    pub max_chars: usize,
    pub min_words: usize,
    pub max_words: usize,
    /// Reject when form-field vocabulary occurs more often than this.
    pub form_field_limit: usize,
    /// Reject when API vocabulary occurs more often than this without work signals.
    pub api_term_limit: usize,
}

/// Section header vocabularies for the line-based resume parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHeaders {
    pub experience: KeywordSet,
    pub education: KeywordSet,
    pub skills: KeywordSet,
    pub projects: KeywordSet,
    /// Recognized headers whose bodies are not extracted (summary, awards, …).
    pub other: KeywordSet,
    /// Words that may qualify a header ("Professional Experience", "Key Skills").
    pub qualifiers: KeywordSet,
}

impl SectionHeaders {
    fn sets(&self) -> [&KeywordSet; 5] {
        [
            &self.experience,
            &self.education,
            &self.skills,
            &self.projects,
            &self.other,
        ]
    }

    /// True when the lowercase `word` is part of some header term or is a qualifier.
    pub fn is_header_word(&self, word: &str) -> bool {
        self.qualifiers.any_in(word)
            || self
                .sets()
                .into_iter()
                .flat_map(KeywordSet::terms)
                .flat_map(str::split_whitespace)
                .any(|part| count_term(word, part) > 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserVocabulary {
    pub headers: SectionHeaders,
    pub company_markers: KeywordSet,
    pub title_markers: KeywordSet,
    pub education_markers: KeywordSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserLimits {
    pub max_lines: usize,
    pub max_header_words: usize,
    pub max_bullets: usize,
    pub skill_lines: usize,
    pub max_skills: usize,
}

/// Vocabularies for the general-mode ATS score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringVocabulary {
    pub experience: KeywordSet,
    pub education: KeywordSet,
    pub skills: KeywordSet,
    pub tech_terms: KeywordSet,
}

/// Vocabularies for the heuristic job analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobVocabulary {
    pub languages: KeywordSet,
    pub frameworks: KeywordSet,
    pub databases: KeywordSet,
    pub tools: KeywordSet,
    pub methodologies: KeywordSet,
    pub responsibility_verbs: KeywordSet,
    pub doctorate: KeywordSet,
    pub masters: KeywordSet,
    pub degree: KeywordSet,
}

/// One cluster of interchangeable or co-occurring technologies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechCluster {
    pub anchor: String,
    pub members: Vec<String>,
}

impl TechCluster {
    fn new(anchor: &str, members: &[&str]) -> Self {
        Self {
            anchor: anchor.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Anchor followed by members.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.anchor.as_str()).chain(self.members.iter().map(String::as_str))
    }
}

/// Every dictionary used by the heuristic layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dictionaries {
    pub classifier: ClassifierVocabulary,
    pub classifier_limits: ClassifierLimits,
    pub parser: ParserVocabulary,
    pub parser_limits: ParserLimits,
    pub scoring: ScoringVocabulary,
    pub job: JobVocabulary,
    /// Shared by the classifier, the scorer and bullet impact scoring.
    pub action_verbs: KeywordSet,
    /// Technical vocabulary for bullet impact scoring.
    pub impact_terms: KeywordSet,
    pub tech_clusters: Vec<TechCluster>,
}

impl Default for Dictionaries {
    fn default() -> Self {
        Self {
            classifier: ClassifierVocabulary {
                experience: KeywordSet::new([
                    "experience", "work*", "employment", "job", "position", "role",
                    "developer*", "engineer*", "manager*", "analyst*", "coordinator*",
                    "specialist*", "director*", "lead*",
                ]),
                education: KeywordSet::new([
                    "education", "universit*", "college", "bachelor*", "master*", "degree*",
                    "diploma*", "certification*", "school*",
                ]),
                skills: KeywordSet::new([
                    "skill*", "technical", "programming", "software", "tools",
                    "technolog*", "languages", "frameworks",
                ]),
                resume_phrases: KeywordSet::new(["resume", "résumé", "cv", "curriculum vitae"]),
                disqualifiers: KeywordSet::new([
                    "withholding", "w-4", "w4", "internal revenue service", "irs",
                    "tax return", "tax form", "certificate", "department of the treasury",
                    "invoice", "purchase order", "terms and conditions", "terms of service",
                    "privacy policy", "cookie policy", "license agreement", "hereinafter",
                    "whereas", "table of contents", "user manual", "user guide",
                    "installation guide", "readme", "frequently asked questions", "faq*",
                    "application form", "i-9", "i-94", "immigration", "customs",
                    "border protection",
                ]),
                form_fields: KeywordSet::new([
                    "checkbox*", "check box*", "dropdown*", "drop-down*", "required field*",
                    "text field*", "radio button*", "select one", "fill in", "fill out",
                    "signature line",
                ]),
                api_terms: KeywordSet::new([
                    "endpoint*", "parameter*", "json", "protocol*", "request body",
                    "response code*", "http", "header*", "payload*", "schema*",
                    "query string*", "api key*",
                ]),
            },
            classifier_limits: ClassifierLimits {
                max_chars: 20_000,
                min_words: 50,
                max_words: 10_000,
                form_field_limit: 5,
                api_term_limit: 10,
            },
            parser: ParserVocabulary {
                headers: SectionHeaders {
                    experience: KeywordSet::new([
                        "experience", "work history", "employment*", "career history",
                    ]),
                    education: KeywordSet::new(["education", "academic*"]),
                    skills: KeywordSet::new([
                        "skills", "technical skills", "technologies", "competencies",
                        "tech stack",
                    ]),
                    projects: KeywordSet::new(["projects"]),
                    other: KeywordSet::new([
                        "summary", "objective", "profile", "certifications", "awards",
                        "interests", "references", "publications", "volunteer*",
                    ]),
                    qualifiers: KeywordSet::new([
                        "professional", "relevant", "key", "core", "selected", "personal",
                        "additional", "technical", "and", "my",
                    ]),
                },
                company_markers: KeywordSet::new([
                    "inc", "corp", "llc", "ltd", "company", "technologies", "systems", "labs",
                    "solutions", "gmbh",
                ]),
                title_markers: KeywordSet::new([
                    "engineer*", "developer*", "manager*", "analyst*", "coordinator*",
                    "specialist*", "director*", "lead", "consultant*", "architect*",
                    "intern*", "scientist*", "designer*",
                ]),
                education_markers: KeywordSet::new([
                    "universit*", "college*", "institute*", "school*", "academy",
                    "bachelor*", "master*", "degree*", "b.s.", "bs", "ba", "b.a.", "ms",
                    "m.s.", "mba", "phd", "ph.d.", "bsc", "msc", "associate*",
                ]),
            },
            parser_limits: ParserLimits {
                max_lines: 1_500,
                max_header_words: 4,
                max_bullets: 8,
                skill_lines: 5,
                max_skills: 20,
            },
            scoring: ScoringVocabulary {
                experience: KeywordSet::new(["experience", "work*", "employment"]),
                education: KeywordSet::new([
                    "education", "universit*", "college", "degree*", "bachelor*", "master*",
                ]),
                skills: KeywordSet::new([
                    "skill*", "technical", "technolog*", "tools", "languages", "frameworks",
                ]),
                tech_terms: KeywordSet::new([
                    "react", "node*", "typescript", "python", "java", "c++", "aws", "azure",
                    "gcp", "docker", "kubernetes", "sql", "nosql", "api*", "microservices",
                    "graphql", "rest",
                ]),
            },
            job: JobVocabulary {
                languages: KeywordSet::new([
                    "javascript", "typescript", "python", "java", "c#", "c++", "php", "ruby",
                    "go", "rust", "swift", "kotlin",
                ]),
                frameworks: KeywordSet::new([
                    "react", "angular", "vue", "node.js", "express", "django", "flask",
                    "spring", ".net",
                ]),
                databases: KeywordSet::new([
                    "sql", "mysql", "postgresql", "mongodb", "redis", "oracle",
                ]),
                tools: KeywordSet::new([
                    "git", "docker", "kubernetes", "aws", "azure", "gcp", "jenkins", "jira",
                ]),
                methodologies: KeywordSet::new(["agile", "scrum", "devops", "ci/cd", "tdd", "api"]),
                responsibility_verbs: KeywordSet::new([
                    "develop*", "design*", "implement*", "maintain*", "create*", "build*",
                    "manage*", "lead*", "collaborate*",
                ]),
                doctorate: KeywordSet::new(["phd", "ph.d.", "doctorate", "doctoral"]),
                masters: KeywordSet::new(["master*", "msc", "m.s.", "mba"]),
                degree: KeywordSet::new([
                    "bachelor*", "degree*", "diploma*", "certification*", "bs", "b.s.", "bsc",
                ]),
            },
            action_verbs: KeywordSet::new([
                "led", "managed", "developed", "created", "implemented", "optimized",
                "designed", "built", "architected", "increased", "reduced", "launched",
                "delivered", "migrated", "automated", "coordinated", "achieved", "improved",
            ]),
            impact_terms: KeywordSet::new([
                "api*", "database*", "framework*", "system*", "algorithm*", "cloud",
                "automation", "ci/cd", "microservices",
            ]),
            tech_clusters: vec![
                TechCluster::new("JavaScript", &["TypeScript", "Node.js", "React", "Vue", "Angular"]),
                TechCluster::new("Python", &["Django", "Flask", "FastAPI", "NumPy", "Pandas"]),
                TechCluster::new("Java", &["Spring", "Spring Boot", "Hibernate", "Maven"]),
                TechCluster::new("C#", &[".NET", ".NET Core", "ASP.NET", "Entity Framework"]),
                TechCluster::new("React", &["Vue.js", "Angular", "Svelte", "Next.js"]),
                TechCluster::new("PostgreSQL", &["MySQL", "SQL Server", "Oracle", "MongoDB"]),
                TechCluster::new("AWS", &["Azure", "Google Cloud", "IBM Cloud"]),
                TechCluster::new("Docker", &["Kubernetes", "Podman", "containerd"]),
                TechCluster::new("Git", &["GitHub", "GitLab", "Bitbucket", "SVN"]),
            ],
        }
    }
}
