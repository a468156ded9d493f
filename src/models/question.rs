use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which exam variant a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// Applies to every state exam.
    #[serde(rename = "Gen")]
    General,
    #[serde(rename = "CA")]
    California,
    #[serde(rename = "MO")]
    Missouri,
}

impl Jurisdiction {
    /// Short code used in the question file and the `state` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::General => "Gen",
            Jurisdiction::California => "CA",
            Jurisdiction::Missouri => "MO",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GEN" | "GENERAL" => Ok(Jurisdiction::General),
            "CA" => Ok(Jurisdiction::California),
            "MO" => Ok(Jurisdiction::Missouri),
            other => Err(format!("unknown state: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(rename = "state")]
    pub jurisdiction: Jurisdiction,
    pub category: String,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Position of the correct answer among the current option order.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_format() {
        let json = r#"{
            "id": "q1",
            "text": "What is a deductible?",
            "options": ["A fee", "What you pay first"],
            "correctAnswer": "What you pay first",
            "state": "CA",
            "category": "Health Basics"
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.jurisdiction, Jurisdiction::California);
        assert_eq!(question.correct_index(), Some(1));

        let back = serde_json::to_string(&question).unwrap();
        assert!(back.contains("\"correctAnswer\""));
        assert!(back.contains("\"state\":\"CA\""));
    }

    #[test]
    fn test_jurisdiction_from_str() {
        assert_eq!("ca".parse::<Jurisdiction>(), Ok(Jurisdiction::California));
        assert_eq!("MO".parse::<Jurisdiction>(), Ok(Jurisdiction::Missouri));
        assert_eq!("Gen".parse::<Jurisdiction>(), Ok(Jurisdiction::General));
        assert!("TX".parse::<Jurisdiction>().is_err());
    }
}
