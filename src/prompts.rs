//! Prompts for LLM-based résumé extraction.
//!
//! The example schema embedded in [`EXTRACTION_TEMPLATE`] is the contract
//! between the prompt and [`crate::record::CandidateRecord`]: the tests below
//! decode it with the same parser the pipeline uses, so a renamed key on either
//! side fails the build's test suite instead of silently dropping data.
//!
//! Callers can override the system message via
//! [`crate::config::ExtractionConfig::system_prompt`]; the user prompt is
//! always built from the fixed template.

/// Default system message sent ahead of the extraction prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional résumé analysis assistant. \
You read résumé text and return only the requested JSON, without commentary.";

/// Placeholder replaced with the extracted résumé text.
const RESUME_PLACEHOLDER: &str = "{resume_text}";

/// Fixed extraction prompt. `{resume_text}` is replaced by [`build_prompt`].
pub const EXTRACTION_TEMPLATE: &str = r#"Extract the following information from the résumé provided below:
- The candidate's full name
- Contact details: email and phone number
- Education entries, in order: degree, institution, dates attended
- The list of skills, in order
- Work experience entries, in order: company, role, dates employed

Return the result as JSON in exactly the following format, inside a fenced code block tagged as json:

```json
{
  "candidate_name": "Candidate name",
  "contact_details": {
    "email": "email@example.com",
    "phone": "+84 123 456 789"
  },
  "education": [
    {
      "degree": "Degree",
      "institution": "Institution name",
      "dates": "Dates attended"
    }
  ],
  "skills": [
    "Skill 1",
    "Skill 2"
  ],
  "work_experience": [
    {
      "company": "Company name",
      "role": "Role",
      "dates": "Dates employed"
    }
  ]
}
```

Here is the résumé text:
---
{resume_text}
---
"#;

/// Embed `resume_text` into the fixed extraction template.
///
/// Pure and infallible. Callers must not call this with empty text; the
/// pipeline short-circuits with [`crate::error::ResumeError::EmptyInput`]
/// before reaching the builder.
pub fn build_prompt(resume_text: &str) -> String {
    EXTRACTION_TEMPLATE.replacen(RESUME_PLACEHOLDER, resume_text, 1)
}
