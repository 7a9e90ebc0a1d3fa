use grader_common::Procedure;
use grader_common::form::DEFAULT_ENTRY_SLOTS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraderConfig {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub repl: ReplConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Entry slots shown on a fresh form.
    #[serde(default = "default_entries")]
    pub default_entries: usize,
    #[serde(default)]
    pub default_procedure: Procedure,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_entries: default_entries(),
            default_procedure: Procedure::default(),
        }
    }
}

fn default_entries() -> usize {
    DEFAULT_ENTRY_SLOTS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_handle_ctrl_c")]
    pub handle_ctrl_c: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            handle_ctrl_c: default_handle_ctrl_c(),
        }
    }
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_handle_ctrl_c() -> bool {
    true
}
