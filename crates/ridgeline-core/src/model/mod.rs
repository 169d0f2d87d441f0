//! Annotation data model.
//!
//! The document model owns fragments and minutiae. The overlay works on an
//! [`AnnotationModel`], a borrowed snapshot taken once per paint or pointer
//! event so that rendering and hit-testing read the same state.

mod fragment;
mod settings;
mod view_state;

pub use fragment::{Fragment, Minutia, MinutiaKind};
pub use settings::{DisplaySettings, LabelPosition, SymbolKind};
pub use view_state::ViewTransformState;

use std::collections::HashSet;
use thiserror::Error;

/// Consistency errors in a model snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Duplicate fragment id: {0}")]
    DuplicateFragment(String),

    #[error("Duplicate minutia id {minutia} in fragment {fragment}")]
    DuplicateMinutia { fragment: String, minutia: String },
}

/// Read-only snapshot of everything the overlay draws and queries.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationModel<'a> {
    fragments: &'a [Fragment],
    current: Option<&'a Fragment>,
    settings: &'a DisplaySettings,
    view: &'a ViewTransformState,
}

impl<'a> AnnotationModel<'a> {
    /// Static display of a fragment list over the base image.
    pub fn with_fragments(
        fragments: &'a [Fragment],
        settings: &'a DisplaySettings,
        view: &'a ViewTransformState,
    ) -> Self {
        Self {
            fragments,
            current: None,
            settings,
            view,
        }
    }

    /// Edit mode on a single fragment's working image.
    ///
    /// The fragment list is empty in this mode; only the current fragment's
    /// minutiae are drawn and queried.
    pub fn editing(
        current: &'a Fragment,
        settings: &'a DisplaySettings,
        view: &'a ViewTransformState,
    ) -> Self {
        Self {
            fragments: &[],
            current: Some(current),
            settings,
            view,
        }
    }

    pub fn fragments(&self) -> &'a [Fragment] {
        self.fragments
    }

    pub fn current(&self) -> Option<&'a Fragment> {
        self.current
    }

    pub fn settings(&self) -> &'a DisplaySettings {
        self.settings
    }

    pub fn view(&self) -> &'a ViewTransformState {
        self.view
    }

    pub fn fragment(&self, id: &str) -> Option<&'a Fragment> {
        self.fragments
            .iter()
            .chain(self.current)
            .find(|f| f.id() == id)
    }

    /// Check id uniqueness for fragments and for minutiae within each fragment.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut fragment_ids = HashSet::new();
        for fragment in self.fragments.iter().chain(self.current) {
            if !fragment_ids.insert(fragment.id()) {
                return Err(ModelError::DuplicateFragment(fragment.id().to_string()));
            }
            let mut minutia_ids = HashSet::new();
            for m in fragment.minutiae() {
                if !minutia_ids.insert(m.id.as_str()) {
                    return Err(ModelError::DuplicateMinutia {
                        fragment: fragment.id().to_string(),
                        minutia: m.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
