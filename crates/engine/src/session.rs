/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Generation state machine.
 *
 * Every trigger allocates the next request id and moves the state to
 * `Loading(id)`; the generation itself runs on a spawned task with the
 * document and target captured at trigger time. A completion is applied only
 * if its id is still the latest, so an older result can never replace a
 * newer one regardless of arrival order. Nothing is cancelled.
 *
 * Id allocation and the completion check both run inside the watch channel's
 * modify closures, which hold its lock, so they never interleave.
 */

use crate::dispatcher::{Generate, GenerationRequest, GenerationResult, DEFAULT_ROOT_NAME};
use crate::error::GenerationFailure;
use crate::registry::OutputTarget;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::debug;

/// Monotonically increasing id, one per trigger. The first trigger gets 1.
pub type RequestId = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading(RequestId),
    Ready(RequestId, GenerationResult),
    Failed(RequestId, GenerationFailure),
}

impl GenerationState {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            GenerationState::Idle => None,
            GenerationState::Loading(id)
            | GenerationState::Ready(id, _)
            | GenerationState::Failed(id, _) => Some(*id),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GenerationState::Loading(_))
    }

    /// Settled on a result or failure for `id`.
    pub fn is_settled(&self, id: RequestId) -> bool {
        matches!(self, GenerationState::Ready(r, _) | GenerationState::Failed(r, _) if *r == id)
    }
}

/// The pure transition logic, without any task spawning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationMachine {
    latest: RequestId,
    state: GenerationState,
}

impl GenerationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn latest(&self) -> RequestId {
        self.latest
    }

    /// Allocate the next id and enter `Loading` for it.
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        self.state = GenerationState::Loading(self.latest);
        self.latest
    }

    /// Apply the outcome of request `id`. Returns false, leaving the state
    /// untouched, when `id` is not the latest request.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<GenerationResult, GenerationFailure>,
    ) -> bool {
        if id != self.latest {
            return false;
        }
        self.state = match outcome {
            Ok(result) => GenerationState::Ready(id, result),
            Err(failure) => GenerationState::Failed(id, failure),
        };
        true
    }
}

/// Supplies the current document. `None` means it is not available, and no
/// generation is started.
pub trait JsonSource: Send + Sync + 'static {
    fn current_json(&self) -> Option<Value>;
}

impl<F> JsonSource for F
where
    F: Fn() -> Option<Value> + Send + Sync + 'static,
{
    fn current_json(&self) -> Option<Value> {
        self()
    }
}

#[derive(Debug)]
struct Surface {
    active: bool,
    target: OutputTarget,
}

/// Drives a generator from surface events and publishes the resulting state.
///
/// Trigger methods spawn onto the current Tokio runtime and must be called
/// from within one.
pub struct GenerationSession {
    generator: Arc<dyn Generate>,
    source: Arc<dyn JsonSource>,
    root_name: String,
    surface: Mutex<Surface>,
    state: Arc<watch::Sender<GenerationMachine>>,
}

impl GenerationSession {
    /// A closed session; call [`open`](Self::open) to start generating.
    pub fn new(
        generator: Arc<dyn Generate>,
        source: impl JsonSource,
        target: OutputTarget,
    ) -> Self {
        let (state, _) = watch::channel(GenerationMachine::new());
        Self {
            generator,
            source: Arc::new(source),
            root_name: DEFAULT_ROOT_NAME.to_string(),
            surface: Mutex::new(Surface {
                active: false,
                target,
            }),
            state: Arc::new(state),
        }
    }

    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    pub fn state(&self) -> GenerationState {
        self.state.borrow().state().clone()
    }

    pub fn subscribe(&self) -> StateWatcher {
        StateWatcher {
            rx: self.state.subscribe(),
        }
    }

    pub fn target(&self) -> OutputTarget {
        self.surface().target
    }

    pub fn is_active(&self) -> bool {
        self.surface().active
    }

    /// Activate the surface and generate for the current document.
    pub fn open(&self) -> Option<RequestId> {
        let mut surface = self.surface();
        surface.active = true;
        self.trigger(&surface)
    }

    /// Deactivate the surface. Later triggers are ignored until reopened;
    /// in-flight generations still settle.
    pub fn close(&self) {
        self.surface().active = false;
    }

    /// Switch target. Selecting the current target is not a change.
    pub fn select_target(&self, target: OutputTarget) -> Option<RequestId> {
        let mut surface = self.surface();
        if surface.target == target {
            return None;
        }
        surface.target = target;
        self.trigger(&surface)
    }

    /// The document was edited or became available.
    pub fn document_changed(&self) -> Option<RequestId> {
        let surface = self.surface();
        self.trigger(&surface)
    }

    fn surface(&self) -> std::sync::MutexGuard<'_, Surface> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Runs with the surface lock held so that concurrent triggers allocate
    // ids in the same order as they changed the surface.
    fn trigger(&self, surface: &Surface) -> Option<RequestId> {
        if !surface.active {
            return None;
        }
        let Some(json) = self.source.current_json() else {
            debug!("document unavailable, not generating");
            return None;
        };
        let request =
            GenerationRequest::new(json, surface.target).with_root_name(self.root_name.clone());

        let mut id = 0;
        self.state.send_modify(|machine| id = machine.begin());
        debug!(request_id = id, target_id = surface.target.id(), "generation started");

        let generator = Arc::clone(&self.generator);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let outcome = generator.generate(request).await;
            if !state.send_if_modified(|machine| machine.complete(id, outcome)) {
                debug!(request_id = id, "discarding stale generation result");
            }
        });
        Some(id)
    }
}

/// Read side of a session's state.
#[derive(Debug, Clone)]
pub struct StateWatcher {
    rx: watch::Receiver<GenerationMachine>,
}

impl StateWatcher {
    pub fn current(&self) -> GenerationState {
        self.rx.borrow().state().clone()
    }

    /// Wait for the next state change. `None` once the session is gone.
    pub async fn changed(&mut self) -> Option<GenerationState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().state().clone())
    }

    /// Wait until the state satisfies `predicate`, checking the current state first.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&GenerationState) -> bool,
    ) -> Option<GenerationState> {
        let machine = self.rx.wait_for(|m| predicate(m.state())).await.ok()?;
        Some(machine.state().clone())
    }
}
