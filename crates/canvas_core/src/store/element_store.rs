//! Element store contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide CRUD and single-selection APIs over the scene.
//! - Notify subscribed observers after each state transition.
//!
//! # Invariants
//! - Ids are generated here and never reused within one store.
//! - `update`/`remove` on an absent id are no-ops, not errors.
//! - A failed patch leaves the element untouched.

use crate::model::element::{Element, ElementId, ElementProps};
use crate::store::snapshot::{SceneObserver, SceneSnapshot};
use log::debug;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure for patch application.
#[derive(Debug)]
pub enum StoreError {
    /// Patch values do not fit the element's field types.
    InvalidPatch {
        id: ElementId,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPatch { id, source } => {
                write!(f, "invalid patch for element {id}: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPatch { source, .. } => Some(source),
        }
    }
}

/// Scene storage interface used by the command executor.
pub trait ElementStore {
    /// Appends a new element and returns its freshly assigned id.
    fn add(&mut self, props: ElementProps) -> ElementId;

    /// Shallow-merges `patch` into the element with `id`.
    ///
    /// Returns `Ok(false)` when no such element exists.
    fn update(&mut self, id: &ElementId, patch: &Map<String, Value>) -> StoreResult<bool>;

    /// Removes the element with `id`, returning whether it existed.
    fn remove(&mut self, id: &ElementId) -> bool;

    /// Sets the selection key. Unknown ids are recorded as-is.
    fn select_element(&mut self, id: Option<ElementId>);

    /// Removes every element and clears selection, returning the removed count.
    fn clear_all(&mut self) -> usize;

    /// Elements in paint order.
    fn elements(&self) -> &[Element];

    fn selected_id(&self) -> Option<&ElementId>;

    fn clear_selection(&mut self) {
        self.select_element(None);
    }

    fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements().iter().find(|element| &element.id == id)
    }

    fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Derived selection flag: true only for an existing, selected element.
    fn is_selected(&self, id: &ElementId) -> bool {
        self.selected_id() == Some(id) && self.contains(id)
    }

    fn len(&self) -> usize {
        self.elements().len()
    }

    fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(self.elements(), self.selected_id())
    }
}

/// Process-memory scene owned by whoever composes parser and executor.
#[derive(Default)]
pub struct InMemoryElementStore {
    elements: Vec<Element>,
    selected_id: Option<ElementId>,
    observers: Vec<Arc<dyn SceneObserver>>,
}

impl InMemoryElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer that receives a snapshot after every mutation.
    pub fn subscribe(&mut self, observer: Arc<dyn SceneObserver>) {
        self.observers.push(observer);
    }

    fn position_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|element| &element.id == id)
    }

    fn fresh_id(&self) -> ElementId {
        loop {
            let id = ElementId::generate();
            if self.selected_id.as_ref() != Some(&id) && !self.contains(&id) {
                return id;
            }
        }
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &self.observers {
            observer.scene_changed(&snapshot);
        }
    }
}

impl Debug for InMemoryElementStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryElementStore")
            .field("elements", &self.elements)
            .field("selected_id", &self.selected_id)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ElementStore for InMemoryElementStore {
    fn add(&mut self, props: ElementProps) -> ElementId {
        let id = self.fresh_id();
        let kind = props.kind();
        self.elements.push(Element::new(id.clone(), props));
        debug!(
            "event=element_add module=store status=ok id={} type={} count={}",
            id,
            kind,
            self.elements.len()
        );
        self.notify();
        id
    }

    fn update(&mut self, id: &ElementId, patch: &Map<String, Value>) -> StoreResult<bool> {
        let Some(index) = self.position_of(id) else {
            debug!("event=element_update module=store status=missing id={id}");
            return Ok(false);
        };

        let merged = self.elements[index]
            .props
            .merged(patch)
            .map_err(|source| StoreError::InvalidPatch {
                id: id.clone(),
                source,
            })?;
        self.elements[index].props = merged;
        debug!(
            "event=element_update module=store status=ok id={} fields={}",
            id,
            patch.len()
        );
        self.notify();
        Ok(true)
    }

    fn remove(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.position_of(id) else {
            debug!("event=element_remove module=store status=missing id={id}");
            return false;
        };

        self.elements.remove(index);
        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
        debug!(
            "event=element_remove module=store status=ok id={} count={}",
            id,
            self.elements.len()
        );
        self.notify();
        true
    }

    fn select_element(&mut self, id: Option<ElementId>) {
        debug!(
            "event=selection_change module=store status=ok selected={} known={}",
            id.as_ref().map_or("none", ElementId::as_str),
            id.as_ref().is_some_and(|value| self.contains(value))
        );
        self.selected_id = id;
        self.notify();
    }

    fn clear_all(&mut self) -> usize {
        let removed = self.elements.len();
        self.elements.clear();
        self.selected_id = None;
        debug!("event=scene_clear module=store status=ok removed={removed}");
        self.notify();
        removed
    }

    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn selected_id(&self) -> Option<&ElementId> {
        self.selected_id.as_ref()
    }
}
