//! Key sender backed by an external command such as `xdotool`.

use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

use crate::traits::{KeyError, KeySender};

/// Runs `<program> key <k1+k2+...>` for every combination.
#[derive(Debug, Clone)]
pub struct CommandKeySender {
    program: String,
}

impl CommandKeySender {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program for `keys`.
    pub fn args_for(keys: &[String]) -> Vec<String> {
        let combo: Vec<String> = keys.iter().map(|key| keysym(key)).collect();
        vec!["key".to_string(), combo.join("+")]
    }
}

/// X keysym for a lowercase key identifier. Keysyms are case-sensitive;
/// modifiers and single characters pass through as xdotool accepts them.
fn keysym(key: &str) -> String {
    let named = match key {
        "escape" | "esc" => "Escape",
        "enter" | "return" => "Return",
        "tab" => "Tab",
        "space" => "space",
        "backspace" => "BackSpace",
        "delete" => "Delete",
        "insert" => "Insert",
        "home" => "Home",
        "end" => "End",
        "pageup" => "Page_Up",
        "pagedown" => "Page_Down",
        "up" => "Up",
        "down" => "Down",
        "left" => "Left",
        "right" => "Right",
        _ => {
            return match key.strip_prefix('f') {
                Some(n) if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) => {
                    format!("F{n}")
                }
                _ => key.to_string(),
            };
        }
    };
    named.to_string()
}

#[async_trait]
impl KeySender for CommandKeySender {
    async fn send_key_combo(&self, keys: &[String]) -> Result<(), KeyError> {
        if keys.is_empty() {
            return Err(KeyError::EmptyCombo);
        }

        let args = Self::args_for(keys);
        debug!(program = %self.program, ?args, "Sending key combination");

        let status = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| KeyError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(KeyError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}
