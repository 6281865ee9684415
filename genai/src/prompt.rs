/// Instruction sent with every generation request.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "Generate a professional and informative presentation about \"{topic}\".\n\
         The presentation should be structured with a clear introduction, main body, and conclusion.\n\
         Create between 5 and 10 slides. For each slide, provide a title, content as bullet points, and brief speaker notes.\n\
         Ensure the content is well-researched, accurate, and easy to understand for a general audience.\n\
         The first slide should be a title slide and the last should be a conclusion or Q&A slide."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_quotes_topic_and_states_shape() {
        let p = build_prompt("The history of jazz");
        assert!(p.contains("\"The history of jazz\""));
        assert!(p.contains("between 5 and 10 slides"));
        assert!(p.contains("conclusion or Q&A slide"));
    }
}
