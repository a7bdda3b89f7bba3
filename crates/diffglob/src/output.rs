use colored::*;
use diffglob_core::RunOutcome;
use serde::Serialize;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    /// Running as a GitHub Actions step: errors and warnings become workflow
    /// commands so they show up as annotations.
    Actions,
    Json,
    Quiet,
}

/// Accumulated JSON result entry.
#[derive(Debug, Serialize, Clone)]
pub struct JsonResultEntry {
    #[serde(rename = "type")]
    pub result_type: String,
    pub message: String,
}

/// Accumulated JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub results: Vec<JsonResultEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RunOutcome>,
}

/// Reporter handles all output formatting.
pub struct Reporter {
    mode: OutputMode,
    json_results: Vec<JsonResultEntry>,
    outcome: Option<RunOutcome>,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            json_results: Vec::new(),
            outcome: None,
        }
    }

    fn push_json(&mut self, result_type: &str, message: &str) {
        self.json_results.push(JsonResultEntry {
            result_type: result_type.to_string(),
            message: message.to_string(),
        });
    }

    pub fn error(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {}", "ERROR:".red(), message);
            }
            OutputMode::Actions => {
                println!("::error::{}", escape_data(message));
            }
            OutputMode::Json => self.push_json("error", message),
        }
    }

    pub fn warning(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {}", "WARNING:".yellow(), message);
            }
            OutputMode::Actions => {
                println!("::warning::{}", escape_data(message));
            }
            OutputMode::Json => self.push_json("warning", message),
            OutputMode::Quiet => {}
        }
    }

    pub fn success(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Actions => {
                println!("{} {}", "✓".green(), message);
            }
            OutputMode::Json => self.push_json("success", message),
            OutputMode::Quiet => {}
        }
    }

    pub fn info(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "INFO:".blue(), message);
            }
            OutputMode::Actions => {
                println!("{message}");
            }
            OutputMode::Json => self.push_json("info", message),
            OutputMode::Quiet => {}
        }
    }

    /// Prints a step output that has no output file to go to.
    pub fn output(&mut self, name: &str, value: &str) {
        match self.mode {
            OutputMode::Actions => {
                println!("::set-output name={name}::{}", escape_data(value));
            }
            OutputMode::Human => {
                println!("{name}={value}");
            }
            // Carried by the outcome in JSON mode.
            OutputMode::Json | OutputMode::Quiet => {}
        }
    }

    pub fn section(&mut self, title: &str) {
        if self.mode == OutputMode::Human {
            println!("{}", format!("=== {title} ===").cyan());
        }
    }

    pub fn set_outcome(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
    }

    pub fn finish(&self) {
        if self.mode == OutputMode::Json {
            let output = JsonOutput {
                results: self.json_results.clone(),
                outcome: self.outcome.clone(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                println!("{json}");
            }
        }
    }
}

/// Escapes a workflow command value.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
