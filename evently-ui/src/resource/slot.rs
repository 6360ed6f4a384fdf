//! Per-surface ownership of loaded handles
//!
//! A [`ResourceSlot`] holds the state rendered by one display surface. It
//! releases the previous object URL whenever the state moves on, discards
//! results from superseded requests, and revokes everything once closed.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::debug;

use super::loader::{ObjectUrlRegistry, SecureResourceLoader};
use super::reference::ResourceReference;
use super::state::{LoadState, LocalHandle};

/// Generation stamp of a started request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

pub struct ResourceSlot {
    urls: Rc<dyn ObjectUrlRegistry>,
    state: LoadState,
    generation: u64,
    released: HashSet<String>,
    /// Handles replaced in `state` but possibly still on screen
    retired: Vec<LocalHandle>,
    closed: bool,
}

impl ResourceSlot {
    pub fn new(urls: Rc<dyn ObjectUrlRegistry>) -> Self {
        Self {
            urls,
            state: LoadState::Idle,
            generation: 0,
            released: HashSet::new(),
            retired: Vec::new(),
            closed: false,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start a request. The held handle is retired until [`release_retired`]
    /// is called, once the view has moved on to `Loading`.
    ///
    /// [`release_retired`]: ResourceSlot::release_retired
    pub fn begin(&mut self) -> Option<RequestTicket> {
        if self.closed {
            return None;
        }

        self.generation += 1;
        let previous = std::mem::replace(&mut self.state, LoadState::Loading);
        self.retire(previous);

        Some(RequestTicket(self.generation))
    }

    /// Drop back to `Idle`, superseding any request in flight. The held
    /// handle is retired like in [`begin`](ResourceSlot::begin).
    /// Returns false once the slot is closed.
    pub fn reset(&mut self) -> bool {
        if self.closed {
            return false;
        }

        self.generation += 1;
        let previous = std::mem::replace(&mut self.state, LoadState::Idle);
        self.retire(previous);
        true
    }

    /// Revoke handles retired by `begin` or `reset`
    pub fn release_retired(&mut self) {
        for handle in std::mem::take(&mut self.retired) {
            self.release(&handle);
        }
    }

    /// Apply the outcome of a request. Returns false when it was discarded.
    pub fn settle(&mut self, ticket: RequestTicket, outcome: LoadState) -> bool {
        if self.closed || ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                generation = self.generation,
                closed = self.closed,
                "discarding stale load result"
            );
            self.release_state(outcome);
            return false;
        }

        let previous = std::mem::replace(&mut self.state, outcome);
        self.release_state(previous);
        true
    }

    /// Release the held handle and refuse any further results
    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        self.closed = true;
        self.generation += 1;
        let previous = std::mem::take(&mut self.state);
        self.release_state(previous);
        self.release_retired();
    }

    fn retire(&mut self, state: LoadState) {
        if let Some(handle) = state.into_handle() {
            self.retired.push(handle);
        }
    }

    fn release_state(&mut self, state: LoadState) {
        if let Some(handle) = state.into_handle() {
            self.release(&handle);
        }
    }

    fn release(&mut self, handle: &LocalHandle) {
        if self.released.insert(handle.url().to_string()) {
            debug!(handle = handle.seq(), "revoking object URL");
            self.urls.revoke(handle);
        }
    }
}

impl Drop for ResourceSlot {
    fn drop(&mut self) {
        self.close();
    }
}

/// Drive one load through `slot`, calling `notify` with every state it applies.
///
/// An absent reference resets the slot to `Idle`. A replaced handle is only
/// revoked after `notify` has moved the view off it. The slot is never
/// borrowed across the fetch, so it can be closed while the request is in
/// flight.
pub async fn request<F>(
    slot: &RefCell<ResourceSlot>,
    loader: &SecureResourceLoader,
    reference: Option<&ResourceReference>,
    notify: F,
) where
    F: Fn(&LoadState),
{
    if reference.is_none() {
        if slot.borrow_mut().reset() {
            notify(&LoadState::Idle);
            slot.borrow_mut().release_retired();
        }
        return;
    }

    let Some(ticket) = slot.borrow_mut().begin() else {
        return;
    };
    notify(&LoadState::Loading);
    slot.borrow_mut().release_retired();

    let outcome = loader.load(reference).await;

    let applied = {
        let mut slot = slot.borrow_mut();
        slot.settle(ticket, outcome).then(|| slot.state().clone())
    };
    if let Some(state) = applied {
        notify(&state);
    }
}
