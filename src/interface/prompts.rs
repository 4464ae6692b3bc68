use dialoguer::Confirm;

use crate::error::Result;

/// Prompt for a yes/no answer.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
