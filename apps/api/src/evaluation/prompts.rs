//! Prompt templates for candidate evaluation and interview questions.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

use super::types::EvaluationRequest;

const EVALUATION_SHAPE: &str = r#"{
  "score": 85,
  "summary": "Brief summary text",
  "strengths": ["Strength 1", "Strength 2"],
  "weaknesses": ["Weakness 1", "Weakness 2"],
  "recommendations": ["Recommendation 1", "Recommendation 2"]
}"#;

const QUESTIONS_SHAPE: &str = r#"{
  "questions": [
    {
      "question": "Question text",
      "category": "Category (e.g., JavaScript, Algorithms, System Design)",
      "difficulty": "Easy, Medium, or Hard"
    }
  ]
}"#;

/// Returns the text to send for this request: the override prompt verbatim,
/// or a recruiter-evaluation prompt built from skills and experience.
pub fn build_evaluation_prompt(request: &EvaluationRequest) -> String {
    if let Some(raw) = &request.raw_prompt {
        return raw.clone();
    }

    let skills = if request.skills.is_empty() {
        "None listed".to_string()
    } else {
        request.skills.join(", ")
    };

    let requirements = match &request.job_requirements {
        Some(reqs) if !reqs.is_empty() => format!("Job requirements: {}\n\n", reqs.join(", ")),
        _ => String::new(),
    };

    format!(
        "As a technical recruiter, evaluate a candidate with the following profile:\n\
         - Skills: {skills}\n\
         - Years of experience: {years}\n\n\
         {requirements}\
         Provide a comprehensive evaluation including:\n\
         1. Overall score (0-100)\n\
         2. Summary of strengths and weaknesses\n\
         3. Recommendations for next steps\n\n\
         {JSON_ONLY_INSTRUCTION} The JSON should have this structure:\n\
         {EVALUATION_SHAPE}",
        years = request.experience_years,
    )
}

pub fn build_questions_prompt(job_title: &str, skills: &[String], experience_years: u32) -> String {
    format!(
        "Generate 5 technical interview questions for a {job_title} position.\n\
         The candidate has {experience_years} years of experience and skills in: {skills}.\n\n\
         {JSON_ONLY_INSTRUCTION} The JSON should have this structure:\n\
         {QUESTIONS_SHAPE}",
        skills = skills.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_skills_and_experience() {
        let request = EvaluationRequest::new(vec!["Rust".into(), "Go".into()], 4);
        let prompt = build_evaluation_prompt(&request);
        assert!(prompt.contains("- Skills: Rust, Go"));
        assert!(prompt.contains("- Years of experience: 4"));
        assert!(!prompt.contains("Job requirements"));
    }

    #[test]
    fn test_prompt_names_every_key_and_asks_for_json_only() {
        let prompt = build_evaluation_prompt(&EvaluationRequest::default());
        for key in ["score", "summary", "strengths", "weaknesses", "recommendations"] {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing {key}");
        }
        assert!(prompt.contains("ONLY a valid JSON object"));
        assert!(prompt.contains("None listed"));
    }

    #[test]
    fn test_prompt_includes_job_requirements() {
        let request = EvaluationRequest::new(vec![], 0)
            .with_job_requirements(vec!["Kubernetes".into(), "SQL".into()]);
        assert!(build_evaluation_prompt(&request).contains("Job requirements: Kubernetes, SQL"));
    }

    #[test]
    fn test_raw_prompt_is_used_verbatim() {
        let request = EvaluationRequest {
            skills: vec!["React".into()],
            raw_prompt: Some("just say hi".into()),
            ..Default::default()
        };
        assert_eq!(build_evaluation_prompt(&request), "just say hi");
    }

    #[test]
    fn test_questions_prompt_mentions_title() {
        let prompt = build_questions_prompt("Backend Engineer", &["Go".into()], 3);
        assert!(prompt.contains("for a Backend Engineer position"));
        assert!(prompt.contains("\"questions\""));
    }
}
