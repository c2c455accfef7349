//! Resume likelihood classifier: decides whether arbitrary text is plausibly a resume.
//!
//! Rule-based and deterministic: a set of boolean signals, a veto stage for
//! documents that are clearly something else, then an acceptance stage that needs
//! at least two independent signal groups.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::dictionaries::Dictionaries;
use crate::models::score::ResumeVerdict;
use crate::text::{truncate_chars, word_count, BULLET_LINE_RE, DATE_RANGE_RE, EMAIL_RE, PHONE_RE};

/// User-correctable rejection shown when a document is not accepted as a resume.
pub const NOT_A_RESUME_MESSAGE: &str = "This doesn't look like a resume. Please upload a \
    document with experience, education, and contact info.";

/// `Form 1040`, `form 8821`, …
static FORM_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bform\s?\d{1,4}\b").unwrap());

/// Boolean and count signals extracted from a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeSignals {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_experience: bool,
    pub has_education: bool,
    pub has_skills: bool,
    pub has_resume_phrase: bool,
    pub has_action_words: bool,
    pub has_date_ranges: bool,
    pub bullet_count: usize,
    pub word_count: usize,
    pub disqualifier: Option<String>,
    pub form_field_hits: usize,
    pub api_term_hits: usize,
}

impl ResumeSignals {
    pub fn collect(text: &str, dicts: &Dictionaries) -> Self {
        let lower = text.to_lowercase();
        let vocab = &dicts.classifier;

        let disqualifier = vocab
            .disqualifiers
            .first_in(&lower)
            .map(str::to_string)
            .or_else(|| FORM_NUMBER_RE.find(&lower).map(|m| m.as_str().to_string()));

        Self {
            has_email: EMAIL_RE.is_match(text),
            has_phone: PHONE_RE.is_match(text),
            has_experience: vocab.experience.any_in(&lower),
            has_education: vocab.education.any_in(&lower),
            has_skills: vocab.skills.any_in(&lower),
            has_resume_phrase: vocab.resume_phrases.any_in(&lower),
            has_action_words: dicts.action_verbs.any_in(&lower),
            has_date_ranges: DATE_RANGE_RE.is_match(&lower),
            bullet_count: BULLET_LINE_RE.find_iter(text).count(),
            word_count: word_count(text),
            disqualifier,
            form_field_hits: vocab.form_fields.count_in(&lower),
            api_term_hits: vocab.api_terms.count_in(&lower),
        }
    }

    fn has_contact(&self) -> bool {
        self.has_email || self.has_phone
    }

    fn has_work(&self) -> bool {
        self.has_experience || self.has_action_words || self.has_date_ranges
    }

    fn has_education_or_skills(&self) -> bool {
        self.has_education || self.has_skills
    }

    /// An explicit resume phrase, or experience, education and skills together.
    fn has_strong_resume_signals(&self) -> bool {
        self.has_resume_phrase || (self.has_experience && self.has_education && self.has_skills)
    }
}

/// Classifies `text` as resume or not. Input beyond the configured character
/// budget is ignored.
pub fn classify(text: &str, dicts: &Dictionaries) -> ResumeVerdict {
    let limits = &dicts.classifier_limits;
    let text = truncate_chars(text, limits.max_chars);
    let signals = ResumeSignals::collect(text, dicts);

    debug!(?signals, "resume heuristic signals");

    verdict_from_signals(&signals, dicts)
}

fn reject(reason: String) -> ResumeVerdict {
    ResumeVerdict {
        is_resume: false,
        reason,
    }
}

fn accept(reason: String) -> ResumeVerdict {
    ResumeVerdict {
        is_resume: true,
        reason,
    }
}

pub fn verdict_from_signals(s: &ResumeSignals, dicts: &Dictionaries) -> ResumeVerdict {
    let limits = &dicts.classifier_limits;

    // Veto: strong non-resume markers win unless strong resume signals are present.
    if let Some(marker) = &s.disqualifier {
        if !s.has_strong_resume_signals() {
            return reject(format!(
                "Document contains non-resume marker '{marker}' and lacks resume sections"
            ));
        }
    }

    if s.form_field_hits > limits.form_field_limit {
        return reject(format!(
            "Document reads like a form ({} form-field terms)",
            s.form_field_hits
        ));
    }

    if s.api_term_hits > limits.api_term_limit && !s.has_experience {
        return reject(format!(
            "Document reads like technical documentation ({} API terms, no work experience)",
            s.api_term_hits
        ));
    }

    if s.has_resume_phrase {
        return accept("Document identifies itself as a resume or CV".to_string());
    }

    if s.has_strong_resume_signals() {
        return accept("Document has experience, education and skills sections".to_string());
    }

    let plausible_length = (limits.min_words..=limits.max_words).contains(&s.word_count);
    if !plausible_length {
        return reject(format!(
            "Document length ({} words) is outside the expected resume range of {}–{} words",
            s.word_count, limits.min_words, limits.max_words
        ));
    }

    if s.has_contact() && (s.has_work() || s.has_education_or_skills()) {
        return accept("Contact details with work or education/skills content".to_string());
    }

    if s.has_work() && s.has_education_or_skills() {
        return accept("Work content with education or skills content".to_string());
    }

    if s.has_contact() && s.bullet_count >= 1 {
        return accept("Contact details with bulleted content".to_string());
    }

    reject(NOT_A_RESUME_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_RESUME: &str = "Experienced Software Engineer\njohn@x.com\n555-123-4567\nEXPERIENCE\n- Led team of 5, increased revenue by 20%\nEDUCATION\nBS Computer Science, MIT\nSKILLS\nPython, AWS, Docker";

    const W4_FORM: &str = "Form W-4 Employee's Withholding Certificate... Department of the Treasury...";

    const LONG_RESUME: &str = r#"Jane Smith
jane.smith@email.com | (555) 987-6543 | San Francisco, CA

SUMMARY
Full-stack developer with 5+ years building scalable web applications for consumer and enterprise customers.

WORK EXPERIENCE
Senior Software Developer
Innovation Labs | Jan 2021 - Present
• Led development of microservices architecture serving 1M+ users
• Implemented CI/CD pipelines reducing deployment time by 50%
• Mentored team of 4 junior developers on testing and code review practices

Software Developer
Digital Solutions | 2019 - 2021
• Built RESTful APIs using Node.js and Express for the customer dashboard
• Optimized database queries improving performance by 25%

EDUCATION
Master of Science in Software Engineering
Tech University | 2019

SKILLS
JavaScript, TypeScript, React, Node.js, Python, AWS, Docker, Kubernetes"#;

    const API_DOC: &str = r#"Orders API
GET /orders endpoint returns JSON. Each endpoint accepts a limit parameter and an offset parameter.
The request body must be JSON. The protocol is HTTP. Set the header Authorization.
Every payload follows the schema below. Response codes: 200, 404. The endpoint parameter
list is documented per endpoint, and the JSON schema defines every header and payload field."#;

    const FORM: &str = r#"Please fill in each required field. Use the checkbox to confirm.
Select one option from the dropdown. Another checkbox for consent. A second dropdown for region.
Each required field is marked. Fill in your name in the text field and tick the checkbox."#;

    fn dicts() -> Dictionaries {
        Dictionaries::default()
    }

    #[test]
    fn test_scenario_resume_is_accepted() {
        let v = classify(SCENARIO_RESUME, &dicts());
        assert!(v.is_resume, "reason: {}", v.reason);
    }

    #[test]
    fn test_w4_form_is_rejected_by_disqualifier() {
        let v = classify(W4_FORM, &dicts());
        assert!(!v.is_resume);
        assert!(v.reason.contains("withholding"), "reason: {}", v.reason);
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let v = classify("", &dicts());
        assert!(!v.is_resume);
    }

    #[test]
    fn test_contact_info_only_is_rejected() {
        let v = classify("john@x.com 555-123-4567", &dicts());
        assert!(!v.is_resume);
    }

    #[test]
    fn test_long_resume_is_accepted() {
        assert!(classify(LONG_RESUME, &dicts()).is_resume);
    }

    #[test]
    fn test_explicit_resume_phrase_accepts_short_text() {
        let v = classify("Curriculum Vitae of Dr. Ada Lovelace", &dicts());
        assert!(v.is_resume);
        assert!(v.reason.contains("resume or CV"));
    }

    #[test]
    fn test_disqualifier_overridden_by_resume_triad() {
        let text = format!("{LONG_RESUME}\nCertificate in Cloud Architecture");
        let v = classify(&text, &dicts());
        assert!(v.is_resume, "reason: {}", v.reason);
    }

    #[test]
    fn test_api_documentation_is_rejected() {
        let v = classify(API_DOC, &dicts());
        assert!(!v.is_resume);
        assert!(v.reason.contains("technical documentation"), "reason: {}", v.reason);
    }

    #[test]
    fn test_form_vocabulary_is_rejected() {
        let v = classify(FORM, &dicts());
        assert!(!v.is_resume);
        assert!(v.reason.contains("form"), "reason: {}", v.reason);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for text in [SCENARIO_RESUME, W4_FORM, LONG_RESUME, API_DOC, ""] {
            assert_eq!(classify(text, &dicts()), classify(text, &dicts()));
        }
    }

    #[test]
    fn test_signals_count_bullets_and_dates() {
        let s = ResumeSignals::collect(LONG_RESUME, &dicts());
        assert_eq!(s.bullet_count, 5);
        assert!(s.has_date_ranges);
        assert!(s.has_email && s.has_phone);
    }

    #[test]
    fn test_input_beyond_char_budget_is_ignored() {
        let mut d = dicts();
        d.classifier_limits.max_chars = 10;
        // The resume phrase sits past the budget.
        let v = classify("aaaaaaaaaa curriculum vitae", &d);
        assert!(!v.is_resume);
    }
}
