//! Scripted preview sessions loaded from TOML.
//!
//! ```toml
//! [[steps]]
//! action = "render"
//!
//! [[steps]]
//! action = "start"
//! value = "2023-01-01"
//!
//! [[steps]]
//! action = "end"
//! value = "2023-01-31"
//!
//! [[steps]]
//! action = "clear"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One host render or user input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Host render; `payload` replaces the current payload, relative to the scenario file
    Render { payload: Option<PathBuf> },
    Start { value: String },
    End { value: String },
    Clear,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        let mut scenario: Scenario = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse scenario: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for step in &mut scenario.steps {
            if let Step::Render { payload: Some(p) } = step {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_steps_and_resolves_payload_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(
            &path,
            r#"
[[steps]]
action = "render"
payload = "data.json"

[[steps]]
action = "start"
value = "2023-01-01"

[[steps]]
action = "end"
value = "31/01/2023"

[[steps]]
action = "clear"
"#,
        )
        .unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.steps.len(), 4);
        assert_eq!(
            scenario.steps[0],
            Step::Render {
                payload: Some(dir.path().join("data.json"))
            }
        );
        assert_eq!(
            scenario.steps[2],
            Step::End {
                value: "31/01/2023".into()
            }
        );
        assert_eq!(scenario.steps[3], Step::Clear);
    }

    #[test]
    fn render_without_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, "[[steps]]\naction = \"render\"\n").unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.steps, vec![Step::Render { payload: None }]);
    }

    #[test]
    fn unknown_action_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, "[[steps]]\naction = \"explode\"\n").unwrap();

        assert!(Scenario::load(&path).is_err());
    }

    #[test]
    fn missing_file_fails_with_path() {
        let err = Scenario::load(Path::new("/nonexistent/scenario.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scenario.toml"));
    }
}
