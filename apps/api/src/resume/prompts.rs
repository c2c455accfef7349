// LLM prompts for resume validation, parsing and ATS scoring.
// Templates use `{placeholder}` markers that callers replace before sending.

/// Resume validation prompt. Replace `{document}`.
pub const VALIDATE_PROMPT_TEMPLATE: &str = r#"Decide whether the following document is a resume or CV.

Return a JSON object with this EXACT schema:
{
  "isResume": true,
  "reason": "one sentence explaining the decision"
}

A resume describes one person's work history, education, skills and contact details.
Tax forms, contracts, invoices, manuals, READMEs, API documentation and job postings are NOT resumes.

DOCUMENT:
{document}"#;

/// Resume parsing prompt. Replace `{no_invention}` and `{resume_text}`.
pub const PARSE_PROMPT_TEMPLATE: &str = r#"Extract structured data from the following resume.

{no_invention}

Return a JSON object with this EXACT schema:
{
  "profile": {"name": "", "email": "", "phone": "", "location": "", "summary": ""},
  "experience": [
    {
      "company": "",
      "title": "",
      "location": "",
      "startDate": "",
      "endDate": "",
      "description": "",
      "bullets": ["achievement, verbatim from the resume"],
      "skills": ["technologies used in this role"]
    }
  ],
  "education": [
    {"institution": "", "degree": "", "field": "", "graduationDate": "", "gpa": ""}
  ],
  "skills": ["flat list of skills"],
  "projects": [
    {"name": "", "description": "", "technologies": [], "bullets": []}
  ]
}

RESUME:
{resume_text}"#;

/// General ATS scoring prompt. Replace `{resume_json}` and `{resume_text}`.
pub const ATS_GENERAL_PROMPT_TEMPLATE: &str = r#"Estimate how well the following resume would pass an applicant tracking system.

Consider section structure, quantified achievements, action verbs, technical keywords,
contact details and length.

Return a JSON object with this EXACT schema:
{
  "score": 0,
  "analysis": {
    "matchingKeywords": [],
    "missingKeywords": [],
    "strengths": [],
    "improvements": []
  }
}
"score" is an integer from 0 to 100.

PARSED RESUME:
{resume_json}

RESUME TEXT:
{resume_text}"#;

/// Job-specific ATS scoring prompt. Replace `{resume_json}` and `{job_json}`.
pub const ATS_JOB_PROMPT_TEMPLATE: &str = r#"Estimate how well the following resume matches the job below, as an applicant tracking system would.

Weigh required skills most, then preferred skills, relevant experience and education.

Return a JSON object with this EXACT schema:
{
  "score": 0,
  "analysis": {
    "matchingKeywords": ["job keywords found in the resume"],
    "missingKeywords": ["job keywords absent from the resume"],
    "strengths": [],
    "improvements": []
  }
}
"score" is an integer from 0 to 100.

PARSED RESUME:
{resume_json}

JOB:
{job_json}"#;
