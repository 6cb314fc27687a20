use std::path::Path;
use std::process::{Command, Stdio};

/// Hand stdio over to the `tarot-mcp` binary.
pub fn run(deck: Option<&Path>) -> Result<(), String> {
    let mut command = Command::new("tarot-mcp");
    if let Some(deck) = deck {
        command.arg("--deck").arg(deck);
    }
    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(format!("tarot-mcp exited with {s}")),
        Err(_) => Err(
            "tarot-mcp binary not found. Install it with: cargo install --path crates/tarot-mcp"
                .into(),
        ),
    }
}
