// LLM prompts for job analysis and resume tailoring.

/// Job analysis prompt. Replace `{job_text}`.
pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract structured data.

Return a JSON object with this EXACT schema:
{
  "title": "",
  "company": "",
  "location": "",
  "employment_type": "",
  "salary_range": "",
  "industry": "",
  "requirements": {
    "required_skills": [],
    "preferred_skills": [],
    "experience_years": "",
    "education": "",
    "certifications": []
  },
  "responsibilities": [],
  "keywords": [],
  "tech_stack": []
}

Focus on:
- every technical skill and technology mentioned
- required versus preferred qualifications
- key action words and industry terms
- educational requirements and the experience level needed

JOB DESCRIPTION:
{job_text}"#;

/// Tailoring prompt. Replace `{mode_instruction}`, `{reference_bullets}`,
/// `{resume_json}` and `{job_json}`.
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Rewrite resume content so it is more ATS-friendly and specific to the job below, without losing truthfulness.

RULES:
1. NEVER fabricate companies, dates or responsibilities.
2. Only improve the wording of existing experience.
3. Anything not grounded in the resume must have "isExternal": true.
4. Work in keywords from the job description.
5. Prefer strong action verbs and quantified results.

{mode_instruction}

{reference_bullets}

Return a JSON object with this EXACT schema:
{
  "changes": [
    {
      "section": "experience|projects|skills",
      "index": 0,
      "field": "bullets|title|description",
      "original": "original text",
      "suggested": "improved text",
      "reasoning": "why this improves the match",
      "confidence": 0.85,
      "isExternal": false
    }
  ],
  "atsImprovements": {
    "keywordMatches": 0,
    "estimatedScoreIncrease": 0,
    "missingKeywords": []
  }
}

RESUME:
{resume_json}

JOB:
{job_json}"#;

pub const FAST_INSTRUCTION: &str =
    "Make the strongest changes you can in one pass; do not ask questions.";

pub const ASSISTIVE_INSTRUCTION: &str = "ASK clarifying questions, as changes with \
    \"field\": \"question\", when you need more context about a specific experience \
    before making suggestions.";

/// Header for the strongest existing bullets, offered as reference material.
pub const REFERENCE_BULLETS_HEADER: &str =
    "Strongest existing bullets for reference (reword, never duplicate):";
