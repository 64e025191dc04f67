//! Deterministic mock evaluation used whenever the model cannot be reached.
//!
//! Pure function of skills and experience. Every list it returns is non-empty.

use super::types::EvaluationResult;

const FRONTEND_FRAMEWORKS: &[&str] = &["React", "Vue", "Angular"];
const BACKEND_FRAMEWORKS: &[&str] = &["Node.js", "Django", "Spring"];
const CORE_LANGUAGES: &[&str] = &["Python", "Java", "JavaScript"];

const BASE_SCORE: u32 = 50;
const POINTS_PER_SKILL: u32 = 3;
const MAX_SKILL_POINTS: u32 = 20;

pub fn synthesize_fallback(skills: &[String], experience_years: u32) -> EvaluationResult {
    let has_frontend = has_any(skills, FRONTEND_FRAMEWORKS);
    let has_backend = has_any(skills, BACKEND_FRAMEWORKS);
    let has_core_language = has_any(skills, CORE_LANGUAGES);
    let skill_count = skills.len();

    let mut strengths = Vec::new();
    if has_frontend {
        strengths.push("Strong frontend development skills");
    }
    if has_backend {
        strengths.push("Good backend development knowledge");
    }
    if has_core_language {
        strengths.push("Proficient in core programming languages");
    }
    if experience_years >= 3 {
        strengths.push("Substantial work experience");
    }
    if skill_count >= 5 {
        strengths.push("Diverse technical skill set");
    }
    if strengths.is_empty() {
        strengths.push("Eager to learn new technologies");
    }

    let mut weaknesses = Vec::new();
    let mut recommendations = Vec::new();
    if experience_years < 2 {
        weaknesses.push("Limited professional experience");
        recommendations.push("Gain more experience through personal projects");
    }
    if !has_frontend {
        weaknesses.push("Lacks modern frontend framework experience");
        recommendations.push("Learn a modern frontend framework");
    }
    if !has_backend {
        weaknesses.push("Limited backend development experience");
        recommendations.push("Develop backend development skills");
    }
    if skill_count < 3 {
        weaknesses.push("Narrow technical skill set");
        recommendations.push("Expand technical skill set");
    }
    if weaknesses.is_empty() {
        weaknesses.push("Could benefit from more specialized knowledge");
    }
    recommendations.push("Consider contributing to open source projects");

    EvaluationResult {
        score: fallback_score(skill_count, experience_years),
        summary: format!(
            "Candidate with {experience_years} years of experience and skills in {}. \
             Shows potential for growth in technical roles.",
            skills.join(", ")
        ),
        strengths: to_owned(strengths),
        weaknesses: to_owned(weaknesses),
        recommendations: to_owned(recommendations),
    }
}

fn fallback_score(skill_count: usize, experience_years: u32) -> u8 {
    let experience_points = match experience_years {
        5.. => 20,
        3..=4 => 15,
        1..=2 => 10,
        0 => 0,
    };
    let skill_points = u32::try_from(skill_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(POINTS_PER_SKILL)
        .min(MAX_SKILL_POINTS);

    (BASE_SCORE + experience_points + skill_points).min(100) as u8
}

fn has_any(skills: &[String], names: &[&str]) -> bool {
    skills
        .iter()
        .any(|s| names.iter().any(|n| s.trim().eq_ignore_ascii_case(n)))
}

fn to_owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}
