//! Fixed instructions and templates.

/// Instruction for the org chatbot behind the dispatcher.
pub const ORG_CHATBOT_INSTRUCTION: &str = "\
You are an Organisation chatbot. Follow the below rules:
1. When you get questions about employees and their reporting structure, call get_employees tool
2. When you get questions about departments, route the query to \"department_navigator\" agent \
by calling the route_to_department_navigator tool";

/// Instruction for the standalone employee responder.
pub const INFOBANK_INSTRUCTION: &str = "\
You are an Employee Infobank. When you get questions about employees and their reporting \
structure, call get_employees tool";

/// Prompt template for the department navigator; `{context}` and
/// `{question}` are substituted.
pub const NAVIGATOR_TEMPLATE: &str = "\
You are a department navigator. Provide the department location based on the context:
{context}

Question: {question}";

/// Answer given when the model keeps requesting tools past the round cap.
pub const TOOL_ROUNDS_EXCEEDED: &str = "I couldn't complete that request within the allowed \
number of tool calls. Please try rephrasing your question.";

/// Text recorded for the org chatbot when it hands a query to the navigator.
pub const HANDOFF_NOTICE: &str = "Routing the query to department_navigator agent.";

/// Fill `{context}` and `{question}` in `template`.
pub fn render(template: &str, context: &str, question: &str) -> String {
    template
        .replace("{context}", context)
        .replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_both_slots() {
        let prompt = render(NAVIGATOR_TEMPLATE, "HR is located on the first floor", "where is HR?");
        assert!(prompt.contains("based on the context:\nHR is located on the first floor\n"));
        assert!(prompt.ends_with("Question: where is HR?"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn org_instruction_names_the_marker() {
        assert!(ORG_CHATBOT_INSTRUCTION.contains("department_navigator"));
        assert!(ORG_CHATBOT_INSTRUCTION.contains("get_employees"));
    }
}
