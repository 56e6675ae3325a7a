// Cross-cutting prompt fragments shared by the screening and interview prompts.
// Each module that calls the collaborator keeps its own prompts.rs alongside it.

/// Appended to every system prompt: the reply is decoded strictly, so nothing but JSON may come back.
pub const JSON_ONLY_RULES: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Scale reminder for every numeric score requested from the collaborator.
pub const SCORE_SCALE_RULE: &str =
    "All scores are integers from 1 to 10 inclusive. Never use fractions or values outside that range.";

/// Builds a system prompt from a role description plus the JSON-only rules.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_RULES}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_json_rules() {
        let prompt = system_prompt("You are an interviewer.");
        assert!(prompt.starts_with("You are an interviewer."));
        assert!(prompt.contains("valid JSON only"));
    }
}
