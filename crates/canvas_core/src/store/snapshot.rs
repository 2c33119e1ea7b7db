//! Read-only scene snapshots and the observer seam used by renderers.

use crate::model::element::{Element, ElementId};
use serde::Serialize;

/// One element as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSnapshot {
    #[serde(flatten)]
    pub element: Element,
    pub selected: bool,
}

/// Immutable view of the whole scene in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub elements: Vec<ElementSnapshot>,
    /// May name an id that is not in `elements` (permissive select).
    pub selected_id: Option<ElementId>,
}

impl SceneSnapshot {
    /// Builds a snapshot, flagging the element whose id equals `selected_id`.
    pub fn capture(elements: &[Element], selected_id: Option<&ElementId>) -> Self {
        Self {
            elements: elements
                .iter()
                .map(|element| ElementSnapshot {
                    element: element.clone(),
                    selected: selected_id == Some(&element.id),
                })
                .collect(),
            selected_id: selected_id.cloned(),
        }
    }

    pub fn get(&self, id: &ElementId) -> Option<&ElementSnapshot> {
        self.elements.iter().find(|entry| &entry.element.id == id)
    }

    pub fn selected(&self) -> impl Iterator<Item = &ElementSnapshot> {
        self.elements.iter().filter(|entry| entry.selected)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Receives a fresh snapshot after each scene mutation.
///
/// Observers must not call back into the store; they only read the snapshot.
pub trait SceneObserver {
    fn scene_changed(&self, snapshot: &SceneSnapshot);
}
