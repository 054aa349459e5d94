// src/quiz/data.rs

use std::fs;

use crate::models::question::Question;

/// Built-in question set, used unless QUIZ_DATA_PATH points at a JSON file.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            question: "What is the capital of France?".to_string(),
            options: vec![
                "London".to_string(),
                "Berlin".to_string(),
                "Paris".to_string(),
                "Madrid".to_string(),
            ],
            correct_answer: 2,
        },
        Question {
            id: 2,
            question: "Which planet is known as the Red Planet?".to_string(),
            options: vec![
                "Venus".to_string(),
                "Mars".to_string(),
                "Jupiter".to_string(),
                "Saturn".to_string(),
            ],
            correct_answer: 1,
        },
        Question {
            id: 3,
            question: "What is the largest ocean on Earth?".to_string(),
            options: vec![
                "Atlantic Ocean".to_string(),
                "Indian Ocean".to_string(),
                "Arctic Ocean".to_string(),
                "Pacific Ocean".to_string(),
            ],
            correct_answer: 3,
        },
        Question {
            id: 4,
            question: "Who painted the Mona Lisa?".to_string(),
            options: vec![
                "Leonardo da Vinci".to_string(),
                "Vincent van Gogh".to_string(),
                "Pablo Picasso".to_string(),
                "Claude Monet".to_string(),
            ],
            correct_answer: 0,
        },
        Question {
            id: 5,
            question: "Which element has the chemical symbol 'O'?".to_string(),
            options: vec![
                "Gold".to_string(),
                "Oxygen".to_string(),
                "Silver".to_string(),
                "Osmium".to_string(),
            ],
            correct_answer: 1,
        },
    ]
}

/// Loads the question list, either from a JSON file or the built-in set,
/// and validates it. Called once at startup; the list is read-only after.
pub fn load_questions(path: Option<&str>) -> Result<Vec<Question>, String> {
    let questions = match path {
        Some(p) => {
            let raw = fs::read_to_string(p)
                .map_err(|e| format!("Failed to read quiz data file '{}': {}", p, e))?;
            serde_json::from_str(&raw)
                .map_err(|e| format!("Invalid quiz data in '{}': {}", p, e))?
        }
        None => default_questions(),
    };

    validate_questions(&questions)?;
    Ok(questions)
}

fn validate_questions(questions: &[Question]) -> Result<(), String> {
    if questions.is_empty() {
        return Err("Question list must not be empty".to_string());
    }

    for question in questions {
        if question.question.trim().is_empty() {
            return Err(format!("Question {} has empty text", question.id));
        }
        if question.options.len() < 2 {
            return Err(format!(
                "Question {} needs at least two options",
                question.id
            ));
        }
        if question.correct_answer >= question.options.len() {
            return Err(format!(
                "Question {} has correct_answer {} out of range",
                question.id, question.correct_answer
            ));
        }
    }

    Ok(())
}
