use crate::models::WrongAnswer;

pub const EXPLANATION_MAX_TOKENS: u32 = 500;
pub const STUDY_GUIDE_MAX_TOKENS: u32 = 2000;

pub const EXPLANATION_SYSTEM_PROMPT: &str = "You are an expert in health and life insurance who \
explains complex concepts in simple, easy-to-understand language.";

pub const STUDY_GUIDE_SYSTEM_PROMPT: &str = "You are an expert insurance educator who specializes \
in teaching complex concepts through clear explanations, memory techniques, and practical examples. \
Your goal is to help students understand WHY they got questions wrong and give them tools to \
remember and apply the correct concepts. Use mnemonics, patterns, analogies, and real-world \
examples to make insurance concepts memorable.";

pub fn explanation_prompt(question: &str, options: &[String], correct_answer: &str) -> String {
    format!(
        "Question: {}\n\
         Options: {}\n\
         Correct Answer: {}\n\n\
         Please explain this insurance concept in simple terms. Explain why the correct answer is \
         right and why the other options are incorrect. Keep your explanation concise but \
         informative, suitable for someone learning about insurance.",
        question,
        options.join(", "),
        correct_answer
    )
}

/// Prompt for a study guide covering `shown` out of `total_wrong` misses.
pub fn study_guide_prompt(
    shown: &[WrongAnswer],
    total_wrong: usize,
    score: u32,
    total_questions: usize,
) -> String {
    let correct = total_questions.saturating_sub(total_wrong);

    let questions_text = shown
        .iter()
        .enumerate()
        .map(|(index, wrong)| {
            format!(
                "{}. Question: {}\n   Your Answer: {}\n   Correct Answer: {}\n   Options: {}\n",
                index + 1,
                wrong.question.text,
                wrong.user_answer.as_deref().unwrap_or("(no answer)"),
                wrong.question.correct_answer,
                wrong.question.options.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let truncation_note = if total_wrong > shown.len() {
        format!(" (showing {} of {})", shown.len(), total_wrong)
    } else {
        String::new()
    };

    format!(
        "A student just completed an insurance quiz and scored {score}% ({correct}/{total_questions} correct).\n\n\
         Here are {shown_count} of the questions they got wrong{truncation_note}:\n\
         {questions_text}\n\
         Create a personalized study guide focused on teaching. For each missed question:\n\
         1. Explain why their answer was wrong and the misconception behind it.\n\
         2. Teach the correct answer and the concept underneath it.\n\
         3. Give a mnemonic or memory aid for the concept.\n\
         4. Point out patterns shared with similar questions.\n\
         5. Connect the concept to a real-world scenario.\n\n\
         Structure the response with these sections:\n\
         - Key Learning Areas: group the questions by topic\n\
         - Detailed Explanations\n\
         - Memory Techniques\n\
         - Study Strategies\n\
         - Practice Recommendations\n\n\
         Keep the tone encouraging and focus on understanding rather than memorizing answers.",
        shown_count = shown.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Jurisdiction, Question};

    fn wrong(id: usize, user_answer: Option<&str>) -> WrongAnswer {
        WrongAnswer {
            question: Question {
                id: id.to_string(),
                text: format!("What is term {}?", id),
                options: vec!["Fixed period".to_string(), "Whole life".to_string()],
                correct_answer: "Fixed period".to_string(),
                jurisdiction: Jurisdiction::General,
                category: "Life".to_string(),
            },
            user_answer: user_answer.map(str::to_string),
        }
    }

    #[test]
    fn test_explanation_prompt_lists_everything() {
        let options = vec!["A".to_string(), "B".to_string()];
        let prompt = explanation_prompt("What is a rider?", &options, "B");
        assert!(prompt.contains("Question: What is a rider?"));
        assert!(prompt.contains("Options: A, B"));
        assert!(prompt.contains("Correct Answer: B"));
    }

    #[test]
    fn test_study_guide_prompt() {
        let shown = vec![wrong(1, Some("Whole life")), wrong(2, None)];
        let prompt = study_guide_prompt(&shown, 2, 60, 5);

        assert!(prompt.contains("scored 60% (3/5 correct)"));
        assert!(prompt.contains("Here are 2 of the questions"));
        assert!(prompt.contains("1. Question: What is term 1?"));
        assert!(prompt.contains("Your Answer: Whole life"));
        assert!(prompt.contains("Your Answer: (no answer)"));
        assert!(!prompt.contains("showing"));
    }

    #[test]
    fn test_study_guide_prompt_mentions_truncation() {
        let shown = vec![wrong(1, Some("Whole life"))];
        let prompt = study_guide_prompt(&shown, 4, 20, 5);
        assert!(prompt.contains("(showing 1 of 4)"));
    }
}
