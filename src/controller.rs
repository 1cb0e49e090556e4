//! Generic list/create/update/delete controller for one resource.
//!
//! A [`ResourceController`] owns the list shown in the table, the form
//! draft, the edit mode and the last error. It never patches `items`
//! locally: every successful mutation is followed by a full reload, so
//! the list always mirrors what the server last returned.
//!
//! Each operation comes in two shapes:
//!
//! - async methods ([`load_all`](ResourceController::load_all),
//!   [`create`](ResourceController::create), ...) that run the whole flow
//!   including the follow-up reload;
//! - a split form for event-driven front ends: `prepare_*` returns the
//!   [`Request`] to send, [`Request::send`] performs it, and
//!   [`apply`](ResourceController::apply) folds the [`Reply`] back in and
//!   hands out the reload request when one is due.
//!
//! Only one mutation is in flight per controller at a time. While one is
//! pending, further `prepare_*` calls for mutations return `None`.

use tracing::{debug, info, warn};

use crate::ImsError;
use crate::api::ResourceApi;
use crate::models::{DELETE_FAILED, Resource};

/// Whether the form creates a new entity or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<Id> {
    Browsing,
    Editing(Id),
}

/// A call the controller wants sent to the API.
#[derive(Debug)]
pub enum Request<R: Resource> {
    List,
    Create(R::Payload),
    Update(R::Id, R::Payload),
    Delete(R::Id),
}

impl<R: Resource> Request<R> {
    /// Sends the request and wraps the outcome for [`ResourceController::apply`].
    pub async fn send<A: ResourceApi<R>>(self, api: &A) -> Reply<R> {
        match self {
            Request::List => Reply::Listed(api.list().await),
            Request::Create(payload) => Reply::Created(api.create(&payload).await),
            Request::Update(id, payload) => Reply::Updated(api.update(&id, &payload).await),
            Request::Delete(id) => Reply::Deleted(api.delete(&id).await),
        }
    }

    /// Returns `true` for create, update and delete.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Request::List)
    }
}

/// The outcome of a [`Request`].
#[derive(Debug)]
pub enum Reply<R: Resource> {
    Listed(crate::Result<Vec<R>>),
    Created(crate::Result<()>),
    Updated(crate::Result<()>),
    Deleted(crate::Result<()>),
}

/// State and operations behind one resource screen.
#[derive(Debug)]
pub struct ResourceController<R: Resource, A> {
    api: A,
    items: Vec<R>,
    draft: R::Draft,
    mode: Mode<R::Id>,
    last_error: Option<String>,
    mutation_in_flight: bool,
    loads_in_flight: usize,
}

impl<R: Resource, A> ResourceController<R, A> {
    /// Creates an empty controller. Nothing is fetched until the first load.
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            draft: R::Draft::default(),
            mode: Mode::Browsing,
            last_error: None,
            mutation_in_flight: false,
            loads_in_flight: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Entities in the order the server listed them.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    pub fn mode(&self) -> &Mode<R::Id> {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    /// Identifier of the entity being edited.
    pub fn editing_id(&self) -> Option<&R::Id> {
        match &self.mode {
            Mode::Editing(id) => Some(id),
            Mode::Browsing => None,
        }
    }

    /// Message from the most recent failed operation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns `true` while a create, update or delete awaits its reply.
    pub fn is_busy(&self) -> bool {
        self.mutation_in_flight
    }

    /// Returns `true` while a list request awaits its reply.
    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    /// Checks the draft, recording the validation message on failure.
    pub fn validate_draft(&mut self) -> bool {
        self.validated_payload().is_some()
    }

    /// Loads an entity into the draft and switches to edit mode.
    ///
    /// Refused while a mutation is in flight, so a pending update cannot
    /// clear a draft that belongs to a different entity.
    pub fn begin_edit(&mut self, entity: &R) -> bool {
        if self.mutation_in_flight {
            debug!(resource = R::PATH, "edit refused while a request is pending");
            return false;
        }
        self.draft = entity.to_draft();
        self.mode = Mode::Editing(entity.id());
        debug!(resource = R::PATH, id = %entity.id(), "editing");
        true
    }

    /// Discards the draft, leaves edit mode and clears the error.
    pub fn cancel_edit(&mut self) {
        self.reset_draft();
        self.last_error = None;
    }

    /// Starts a collection reload.
    pub fn prepare_load(&mut self) -> Request<R> {
        self.loads_in_flight += 1;
        Request::List
    }

    /// Prepares a create from the draft. Only valid while browsing.
    pub fn prepare_create(&mut self) -> Option<Request<R>> {
        if !self.ready_to_mutate() {
            return None;
        }
        if self.is_editing() {
            debug!(resource = R::PATH, "create refused in edit mode");
            return None;
        }
        let payload = self.validated_payload()?;
        self.mutation_in_flight = true;
        Some(Request::Create(payload))
    }

    /// Prepares an update of the entity being edited.
    pub fn prepare_update(&mut self) -> Option<Request<R>> {
        if !self.ready_to_mutate() {
            return None;
        }
        let Mode::Editing(id) = &self.mode else {
            debug!(resource = R::PATH, "update refused outside edit mode");
            return None;
        };
        let id = id.clone();
        let payload = self.validated_payload()?;
        self.mutation_in_flight = true;
        Some(Request::Update(id, payload))
    }

    /// Prepares a create or an update depending on the mode.
    pub fn prepare_submit(&mut self) -> Option<Request<R>> {
        if self.is_editing() {
            self.prepare_update()
        } else {
            self.prepare_create()
        }
    }

    /// Prepares deletion of an entity.
    pub fn prepare_remove(&mut self, id: R::Id) -> Option<Request<R>> {
        if !self.ready_to_mutate() {
            return None;
        }
        self.mutation_in_flight = true;
        Some(Request::Delete(id))
    }

    /// Folds a reply into the state.
    ///
    /// Returns the reload request that must follow a successful mutation.
    pub fn apply(&mut self, reply: Reply<R>) -> Option<Request<R>> {
        match reply {
            Reply::Listed(result) => {
                self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
                match result {
                    Ok(items) => {
                        info!(resource = R::PATH, count = items.len(), "collection loaded");
                        self.items = items;
                        self.last_error = None;
                    }
                    // Keep the stale list; a blank table helps nobody.
                    Err(e) => self.fail(R::LABELS.fetch_failed, &e),
                }
                None
            }
            Reply::Created(result) => {
                self.mutation_in_flight = false;
                match result {
                    Ok(()) => {
                        info!(resource = R::PATH, "created");
                        if !self.is_editing() {
                            self.draft = R::Draft::default();
                        }
                        self.last_error = None;
                        Some(self.prepare_load())
                    }
                    Err(e) => {
                        self.fail(R::LABELS.create_failed, &e);
                        None
                    }
                }
            }
            Reply::Updated(result) => {
                self.mutation_in_flight = false;
                match result {
                    Ok(()) => {
                        info!(resource = R::PATH, "updated");
                        self.reset_draft();
                        self.last_error = None;
                        Some(self.prepare_load())
                    }
                    Err(e) => {
                        self.fail(R::LABELS.update_failed, &e);
                        None
                    }
                }
            }
            Reply::Deleted(result) => {
                self.mutation_in_flight = false;
                match result {
                    Ok(()) => {
                        info!(resource = R::PATH, "deleted");
                        self.last_error = None;
                        Some(self.prepare_load())
                    }
                    Err(e) => {
                        self.fail(DELETE_FAILED, &e);
                        None
                    }
                }
            }
        }
    }

    fn ready_to_mutate(&self) -> bool {
        if self.mutation_in_flight {
            debug!(resource = R::PATH, "request already pending");
            return false;
        }
        true
    }

    fn validated_payload(&mut self) -> Option<R::Payload> {
        match R::validate(&self.draft) {
            Ok(payload) => Some(payload),
            Err(e) => {
                debug!(resource = R::PATH, error = %e, "draft rejected");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    fn reset_draft(&mut self) {
        self.draft = R::Draft::default();
        self.mode = Mode::Browsing;
    }

    fn fail(&mut self, prefix: &str, error: &ImsError) {
        warn!(resource = R::PATH, error = %error, "{prefix}");
        self.last_error = Some(format!("{prefix}: {}", error.detail()));
    }
}

impl<R: Resource, A: ResourceApi<R>> ResourceController<R, A> {
    /// Replaces `items` with the server's collection.
    ///
    /// On failure the previous items stay and the error is recorded.
    pub async fn load_all(&mut self) {
        let request = self.prepare_load();
        self.drive(request).await;
    }

    /// Creates an entity from the draft, then reloads.
    pub async fn create(&mut self) {
        if let Some(request) = self.prepare_create() {
            self.drive(request).await;
        }
    }

    /// Saves the draft over the entity being edited, then reloads.
    pub async fn update(&mut self) {
        if let Some(request) = self.prepare_update() {
            self.drive(request).await;
        }
    }

    /// Creates or updates depending on the mode.
    pub async fn submit(&mut self) {
        if let Some(request) = self.prepare_submit() {
            self.drive(request).await;
        }
    }

    /// Deletes an entity, then reloads.
    pub async fn remove(&mut self, id: R::Id) {
        if let Some(request) = self.prepare_remove(id) {
            self.drive(request).await;
        }
    }

    async fn drive(&mut self, request: Request<R>) {
        let mut next = Some(request);
        while let Some(request) = next {
            let reply = request.send(&self.api).await;
            next = self.apply(reply);
        }
    }
}
