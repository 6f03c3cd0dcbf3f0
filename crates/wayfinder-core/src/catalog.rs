//! Step catalog: the fixed, ordered sequence of journey stages.
//!
//! A catalog is loaded once at session start and never mutated afterwards.
//! Steps are identified by their position; any index present in the source
//! is ignored and rewritten on construction.

use crate::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DESIGN_THINKING_CATALOG: &str = include_str!("../catalog/design_thinking.toml");

/// One stage of the journey, e.g. "Empathize" or "Define".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(skip)]
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub agent: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompts: Vec<String>,
}

impl Step {
    pub fn new(name: impl Into<String>, description: impl Into<String>, prompts: Vec<String>) -> Self {
        Self {
            index: 0,
            name: name.into(),
            agent: String::new(),
            description: description.into(),
            prompts,
        }
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    /// Label used for the agent this step chats with; falls back to the step name.
    pub fn agent_label(&self) -> String {
        if self.agent.is_empty() {
            format!("{} Agent", self.name)
        } else {
            self.agent.clone()
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    welcome: Option<String>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Vec<Step>,
    welcome: Option<String>,
}

impl StepCatalog {
    pub fn new(steps: Vec<Step>, welcome: Option<String>) -> Result<Self> {
        if steps.is_empty() {
            return Err(WizardError::EmptyCatalog);
        }
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| Step { index, ..step })
            .collect();
        let welcome = welcome.filter(|text| !text.trim().is_empty());
        Ok(Self { steps, welcome })
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(source)?;
        Self::new(file.steps, file.welcome)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The built-in ten stage Design Thinking journey.
    pub fn design_thinking() -> Result<Self> {
        Self::from_toml_str(DESIGN_THINKING_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn welcome(&self) -> Option<&str> {
        self.welcome.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_ten_indexed_steps() {
        let catalog = StepCatalog::design_thinking().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get(0).unwrap().name, "Empathize");
        assert_eq!(catalog.get(9).unwrap().name, "Scale");
        for (i, step) in catalog.steps().iter().enumerate() {
            assert_eq!(step.index, i);
            assert_eq!(step.prompts.len(), 3, "step {} should carry three prompts", step.name);
        }
        assert!(catalog.welcome().unwrap().contains("Empathy Agent"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = StepCatalog::new(Vec::new(), None).unwrap_err();
        assert!(matches!(err, WizardError::EmptyCatalog));

        let err = StepCatalog::from_toml_str("welcome = \"hi\"").unwrap_err();
        assert!(matches!(err, WizardError::EmptyCatalog));
    }

    #[test]
    fn indices_follow_position() {
        let catalog = StepCatalog::new(
            vec![
                Step { index: 7, ..Step::new("One", "", vec![]) },
                Step { index: 3, ..Step::new("Two", "", vec![]) },
            ],
            None,
        )
        .unwrap();
        assert_eq!(catalog.get(0).unwrap().index, 0);
        assert_eq!(catalog.get(1).unwrap().index, 1);
    }

    #[test]
    fn blank_welcome_is_dropped() {
        let catalog = StepCatalog::new(vec![Step::new("Only", "", vec![])], Some("  ".into())).unwrap();
        assert_eq!(catalog.welcome(), None);
    }

    #[test]
    fn malformed_toml_reports_catalog_error() {
        let err = StepCatalog::from_toml_str("[[steps]]\nname = 42").unwrap_err();
        assert!(matches!(err, WizardError::Catalog(_)));
    }

    #[test]
    fn agent_label_falls_back_to_step_name() {
        let step = Step::new("Define", "", vec![]);
        assert_eq!(step.agent_label(), "Define Agent");
        let step = step.with_agent("Problem Definition Agent");
        assert_eq!(step.agent_label(), "Problem Definition Agent");
    }

    #[test]
    fn load_reads_catalog_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            "[[steps]]\nname = \"Sketch\"\ndescription = \"Draw it\"\nprompts = [\"What shape?\"]\n",
        )
        .unwrap();

        let catalog = StepCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().prompts, vec!["What shape?".to_string()]);
    }
}
