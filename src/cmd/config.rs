use std::io::{self, Write};

use crate::config::AppConfig;
use crate::error::AppResult;

pub fn run(cfg: &AppConfig) -> AppResult<()> {
    let mut stdout = io::stdout();
    write_summary(&mut stdout, cfg)?;
    stdout.flush()?;
    Ok(())
}

fn write_summary(out: &mut impl Write, cfg: &AppConfig) -> io::Result<()> {
    writeln!(out, "Workspace: {}", cfg.workspace_root.display())?;
    writeln!(out, "Endpoint: {}", cfg.endpoint)?;
    writeln!(out, "Model: {}", cfg.model)?;
    writeln!(out, "OpenRouter API key: {}", mask_secret(&cfg.api_key))?;
    writeln!(out, "Max diff characters: {}", display_limit(cfg.max_diff_chars))?;
    Ok(())
}

fn display_limit(limit: usize) -> String {
    if limit == 0 {
        "unlimited".to_string()
    } else {
        limit.to_string()
    }
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
