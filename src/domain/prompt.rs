pub const FORMAT_EXAMPLE: &str = "feat(auth): add token refresh logic";

/// Wraps the staged diff in the commit-message instructions. The diff is
/// inserted as-is.
pub fn build_prompt(diff: &str) -> String {
    format!(
        "\nYou are an expert software engineer. Generate a short, descriptive Conventional Commit message based on this diff:\n{diff}\n\nUse the format: type(scope?): description\nExample: {FORMAT_EXAMPLE}\n"
    )
}
