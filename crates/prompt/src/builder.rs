//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use ragbench_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// Every variable the definition declares must be supplied. The whole
/// rendered template becomes the user message.
///
/// # Example
/// ```no_run
/// use ragbench_prompt::{build_prompt, builtin::rag_answer};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut vars = HashMap::new();
/// vars.insert("context".to_string(), "[policy.md:0]\nPTO cap is 240 hours.".to_string());
/// vars.insert("question".to_string(), "What is the PTO cap?".to_string());
///
/// let built = build_prompt(&rag_answer(), vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    for var in &definition.variables {
        if !variables.contains_key(var) {
            return Err(AppError::Prompt(format!(
                "Missing variable '{}' for prompt '{}'",
                var, definition.id
            )));
        }
    }

    let rendered = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(
        None,
        rendered,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::rag_answer;

    fn rag_vars(context: &str, question: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_string());
        vars.insert("question".to_string(), question.to_string());
        vars
    }

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Hello, world!".to_string());

        let result = render_template("Question: {{question}}", &vars).unwrap();
        assert_eq!(result, "Question: Hello, world!");
    }

    #[test]
    fn test_render_does_not_escape() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Flights > $800 & 'quotes'".to_string());

        let result = render_template("{{question}}", &vars).unwrap();
        assert_eq!(result, "Flights > $800 & 'quotes'");
    }

    #[test]
    fn test_build_rag_answer_prompt() {
        let built = build_prompt(
            &rag_answer(),
            rag_vars("[policy.md:0]\nPTO accrual cap is 240 hours.", "What is the PTO accrual cap?"),
        )
        .unwrap();

        assert_eq!(
            built.user,
            "You are a concise assistant. Use only the provided context to answer. \
Cite sources as [file:section] for every claim. If no answer, say 'No supporting chunk.'\n\
Context:\n[policy.md:0]\nPTO accrual cap is 240 hours.\n\n\
Question: What is the PTO accrual cap?\nAnswer with citations:"
        );
        assert_eq!(built.system, None);
        assert_eq!(built.metadata.source_prompt_id, "rag.answer");
    }

    #[test]
    fn test_build_prompt_missing_variable() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "What?".to_string());

        let err = build_prompt(&rag_answer(), vars).unwrap_err();
        assert!(matches!(err, AppError::Prompt(_)));
        assert!(err.to_string().contains("context"));
    }

    #[test]
    fn test_render_template_unknown_variable() {
        let vars = HashMap::new();
        // Undeclared variables render as empty
        assert_eq!(render_template("Q: {{missing}}", &vars).unwrap(), "Q: ");
    }
}
