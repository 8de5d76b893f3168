use chrono::Local;

// Common text blocks for all prompts

pub const JSON_ONLY: &str = r#"
Important instructions for your response:

1. Respond with a single JSON object and nothing else.
2. Do not wrap the JSON in Markdown code fences.
3. Do not narrate or describe your actions.
4. Do not preface your response with phrases like "Here is the JSON..."
5. Every field must use the exact names given in the output format.
"#;

/// Utility function to get the current date in a human-readable format
pub fn current_date() -> String {
    let today = Local::now();
    format!(
        "{} {}, {}",
        today.format("%B"),
        today.format("%-d"),
        today.format("%Y")
    )
}
