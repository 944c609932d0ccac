//! Prompt loader for YAML prompt definitions.

use crate::builtin;
use crate::types::PromptDefinition;
use ragbench_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".ragbench/prompts")
}

/// Load a prompt definition by ID from the workspace.
///
/// Searches for `<id>.yml` in `.ragbench/prompts/`.
///
/// # Example
/// ```no_run
/// use ragbench_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "rag.answer")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file)
        .map_err(|e| AppError::file_access(&prompt_file, e))?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load a workspace prompt, falling back to the built-in definition of the
/// same id when no file exists.
pub fn resolve_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));
    if prompt_file.exists() {
        return load_prompt(workspace_path, prompt_id);
    }

    builtin::builtin(prompt_id).ok_or_else(|| {
        AppError::Prompt(format!(
            "Prompt '{}' not found in {:?} and no built-in exists",
            prompt_id,
            prompts_dir(workspace_path)
        ))
    })
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    // Every declared variable must actually be referenced
    for var in &def.variables {
        if !def.template.contains(&format!("{{{{{}}}}}", var)) {
            return Err(AppError::Prompt(format!(
                "Prompt '{}' declares variable '{}' but its template never uses it",
                def.id, var
            )));
        }
    }

    Ok(())
}
