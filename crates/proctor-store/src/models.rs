use serde::{Deserialize, Serialize};

/// Answer letter for a quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectOption {
    A,
    B,
    C,
    D,
}

/// A quiz question row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: CorrectOption,
    pub created_at: String,
}

impl Quiz {
    /// Text of the option the given letter selects.
    pub fn option_text(&self, option: CorrectOption) -> &str {
        match option {
            CorrectOption::A => &self.option_a,
            CorrectOption::B => &self.option_b,
            CorrectOption::C => &self.option_c,
            CorrectOption::D => &self.option_d,
        }
    }
}

/// A participant result row.
///
/// `id` and `submitted_at` are assigned by the store on insert and omitted
/// from the outgoing payload when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub mobile: String,
    pub correct_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

/// Count correct answers against the quiz set, pairwise by position.
/// Unanswered questions count as incorrect.
pub fn score_answers(quizzes: &[Quiz], answers: &[Option<CorrectOption>]) -> u32 {
    quizzes
        .iter()
        .zip(answers.iter())
        .filter(|(quiz, answer)| **answer == Some(quiz.correct_option))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(id: &str, correct: CorrectOption) -> Quiz {
        Quiz {
            id: id.to_string(),
            question: "What is 2 + 2?".to_string(),
            option_a: "3".to_string(),
            option_b: "4".to_string(),
            option_c: "5".to_string(),
            option_d: "22".to_string(),
            correct_option: correct,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_option_text() {
        let q = quiz("1", CorrectOption::B);
        assert_eq!(q.option_text(CorrectOption::A), "3");
        assert_eq!(q.option_text(q.correct_option), "4");
    }

    #[test]
    fn test_score_answers_counts_matches() {
        let quizzes = vec![
            quiz("1", CorrectOption::B),
            quiz("2", CorrectOption::A),
            quiz("3", CorrectOption::D),
        ];
        let answers = vec![
            Some(CorrectOption::B),
            Some(CorrectOption::C),
            Some(CorrectOption::D),
        ];
        assert_eq!(score_answers(&quizzes, &answers), 2);
    }

    #[test]
    fn test_score_answers_unanswered_count_as_incorrect() {
        let quizzes = vec![quiz("1", CorrectOption::A), quiz("2", CorrectOption::B)];
        let answers = vec![None, Some(CorrectOption::B)];
        assert_eq!(score_answers(&quizzes, &answers), 1);
    }

    #[test]
    fn test_score_answers_length_mismatch_scores_the_overlap() {
        let quizzes = vec![quiz("1", CorrectOption::A)];
        let answers = vec![Some(CorrectOption::A), Some(CorrectOption::B)];
        assert_eq!(score_answers(&quizzes, &answers), 1);
        assert_eq!(score_answers(&quizzes, &[]), 0);
    }

    #[test]
    fn test_correct_option_serializes_as_letter() {
        let json = serde_json::to_string(&CorrectOption::C).expect("serialization failed");
        assert_eq!(json, "\"C\"");
    }

    #[test]
    fn test_quiz_deserialization() {
        let json = r#"{
            "id": "q1",
            "question": "What is 2 + 2?",
            "option_a": "3",
            "option_b": "4",
            "option_c": "5",
            "option_d": "22",
            "correct_option": "B",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let q: Quiz = serde_json::from_str(json).expect("deserialization failed");
        assert_eq!(q.correct_option, CorrectOption::B);
        assert_eq!(q.option_text(q.correct_option), "4");
    }

    #[test]
    fn test_participant_outgoing_payload_omits_store_assigned_fields() {
        let p = Participant {
            id: None,
            name: "Ada".to_string(),
            mobile: "5551234567".to_string(),
            correct_count: 7,
            submitted_at: None,
        };

        let json = serde_json::to_value(&p).expect("serialization failed");
        assert!(json.get("id").is_none());
        assert!(json.get("submitted_at").is_none());
        assert_eq!(json["correct_count"], 7);
    }

    #[test]
    fn test_participant_deserialization_with_assigned_fields() {
        let json = r#"{
            "id": "p1",
            "name": "Ada",
            "mobile": "5551234567",
            "correct_count": 7,
            "submitted_at": "2024-01-02T12:00:00Z"
        }"#;

        let p: Participant = serde_json::from_str(json).expect("deserialization failed");
        assert_eq!(p.id.as_deref(), Some("p1"));
        assert_eq!(p.submitted_at.as_deref(), Some("2024-01-02T12:00:00Z"));
    }
}
