//! Interview question generation. Rides on the evaluation pipeline's
//! raw-prompt path and falls back to a fixed question set.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::evaluator::Evaluator;
use super::extract::try_parse_embedded_json;
use super::prompts::build_questions_prompt;
use super::types::EvaluationRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub category: String,
    pub difficulty: String,
}

#[derive(Debug, Deserialize)]
struct QuestionSet {
    questions: Vec<InterviewQuestion>,
}

pub async fn generate_interview_questions(
    evaluator: &Evaluator,
    job_title: &str,
    skills: &[String],
    experience_years: u32,
) -> Vec<InterviewQuestion> {
    let request = EvaluationRequest {
        raw_prompt: Some(build_questions_prompt(job_title, skills, experience_years)),
        ..Default::default()
    };

    let parsed = evaluator
        .complete(&request)
        .await
        .and_then(|text| try_parse_embedded_json::<QuestionSet>(&text))
        .map(|set| set.questions)
        .filter(|questions| !questions.is_empty());

    parsed.unwrap_or_else(|| {
        warn!("No usable interview questions from model, returning defaults");
        default_questions(skills)
    })
}

pub fn default_questions(skills: &[String]) -> Vec<InterviewQuestion> {
    let primary = skills.first().map(String::as_str);
    let q = |question: String, category: &str, difficulty: &str| InterviewQuestion {
        question,
        category: category.to_string(),
        difficulty: difficulty.to_string(),
    };

    vec![
        q(
            format!(
                "Can you explain your experience with {}?",
                primary.unwrap_or("your primary technology")
            ),
            primary.unwrap_or("Technical Skills"),
            "Medium",
        ),
        q(
            "Describe a challenging technical problem you solved recently.".to_string(),
            "Problem Solving",
            "Medium",
        ),
        q(
            "How do you approach learning new technologies?".to_string(),
            "Learning Ability",
            "Easy",
        ),
        q(
            "Describe your experience working in a team environment.".to_string(),
            "Teamwork",
            "Easy",
        ),
        q(
            "Where do you see yourself professionally in 5 years?".to_string(),
            "Career Goals",
            "Easy",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluator::tests::StubGenerator;
    use std::sync::Arc;

    #[test]
    fn test_defaults_use_first_skill() {
        let questions = default_questions(&["Elixir".to_string(), "SQL".to_string()]);
        assert_eq!(questions.len(), 5);
        assert_eq!(
            questions[0].question,
            "Can you explain your experience with Elixir?"
        );
        assert_eq!(questions[0].category, "Elixir");
    }

    #[test]
    fn test_defaults_without_skills() {
        let questions = default_questions(&[]);
        assert_eq!(questions[0].category, "Technical Skills");
        assert!(questions[0].question.contains("your primary technology"));
    }

    #[tokio::test]
    async fn test_model_questions_are_returned() {
        let stub = StubGenerator::replying(
            r#"{"questions":[{"question":"What is ownership?","category":"Rust","difficulty":"Easy"}]}"#,
        );
        let evaluator = Evaluator::new(Arc::new(stub));
        let questions =
            generate_interview_questions(&evaluator, "Rust Engineer", &["Rust".into()], 2).await;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "What is ownership?");
    }

    #[tokio::test]
    async fn test_unusable_reply_returns_defaults() {
        let evaluator = Evaluator::new(Arc::new(StubGenerator::replying(r#"{"questions": []}"#)));
        let questions = generate_interview_questions(&evaluator, "SRE", &[], 1).await;
        assert_eq!(questions, default_questions(&[]));
    }

    #[tokio::test]
    async fn test_backend_failure_returns_defaults() {
        let evaluator = Evaluator::new(Arc::new(StubGenerator::failing()));
        let questions = generate_interview_questions(&evaluator, "SRE", &["Go".into()], 1).await;
        assert_eq!(questions[0].category, "Go");
    }
}
