//! Per-session composer state.

use std::fmt;

use crate::errors::{AppError, FetchTarget};
use crate::models::{DraftPost, OptionSet, Route, SelectOption};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Editing,
    Submitting,
    /// Terminal: the post was accepted.
    Submitted,
    /// Terminal: abandoned, or denied by the role gate.
    Closed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Editing => "editing",
            Phase::Submitting => "submitting",
            Phase::Submitted => "submitted",
            Phase::Closed => "closed",
        }
    }

    /// Whether form fields and selections may still change.
    pub fn is_editable(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Loading | Phase::Editing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Submitted | Phase::Closed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which call a submit issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Create,
    Update(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub priority: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.required("priority", &self.priority);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub tags: OptionSet,
    pub parent: Option<SelectOption>,
    pub related: OptionSet,
}

/// Options loaded from the API, one slice per source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub tags: OptionSet,
    pub parents: OptionSet,
    pub related: OptionSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerState {
    pub phase: Phase,
    pub form: PostForm,
    pub selection: Selection,
    pub reference: ReferenceData,
    pub redirect: Option<Route>,
    /// Tag creations still waiting on the API. Submit is refused while non-zero.
    pub creating_tags: usize,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            form: PostForm::default(),
            selection: Selection::default(),
            reference: ReferenceData::default(),
            redirect: None,
            creating_tags: 0,
        }
    }
}

impl ComposerState {
    /// Build the submission payload from the current form and selection.
    pub fn draft(&self, description: String) -> DraftPost {
        DraftPost {
            title: self.form.title.clone(),
            priority: self.form.priority.clone(),
            description,
            parent_id: self.selection.parent.as_ref().map(|p| p.value.clone()),
            related: self.selection.related.values(),
            tags: self.selection.tags.values(),
        }
    }
}

/// Outcome of the reference-data load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Sources that failed, each already surfaced once.
    pub failures: Vec<AppError>,
    /// Sources whose result arrived after the session ended.
    pub discarded: Vec<FetchTarget>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.discarded.is_empty()
    }

    pub fn failed_targets(&self) -> Vec<FetchTarget> {
        self.failures
            .iter()
            .filter_map(|e| match e {
                AppError::Fetch { target, .. } => Some(*target),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_requires_title_and_priority() {
        let errors = PostForm::default().validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["title", "priority"]);

        let form = PostForm {
            title: "Hello".to_string(),
            priority: "1".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_draft_without_parent_has_explicit_null() {
        let state = ComposerState {
            form: PostForm {
                title: "Hello".to_string(),
                priority: "1".to_string(),
            },
            ..ComposerState::default()
        };
        let value = serde_json::to_value(state.draft("{}".to_string())).unwrap();
        assert_eq!(value["parent_id"], json!(null));
        assert_eq!(value["tags"], json!([]));
        assert_eq!(value["related"], json!([]));
    }

    #[test]
    fn test_draft_preserves_selection_order() {
        let mut state = ComposerState::default();
        state.selection.tags.insert(SelectOption::new("7", "Heat"));
        state.selection.tags.insert(SelectOption::new("3", "Flood"));
        state.selection.parent = Some(SelectOption::new("P1", "Parent"));
        state.selection.related.insert(SelectOption::new("R2", "Other"));

        let draft = state.draft(String::new());
        assert_eq!(draft.tags, vec!["7", "3"]);
        assert_eq!(draft.parent_id.as_deref(), Some("P1"));
        assert_eq!(draft.related, vec!["R2"]);
    }

    #[test]
    fn test_phase_editability() {
        assert!(Phase::Loading.is_editable());
        assert!(!Phase::Submitting.is_editable());
        assert!(Phase::Closed.is_terminal());
        assert_eq!(Phase::Submitted.to_string(), "submitted");
    }
}
