//! Post composer: one editing session from entry to submit or abandon.
//!
//! The composer owns the session's state behind a lock. Reference data is
//! fetched concurrently on [`PostComposer::load`]; each source writes only its
//! own slice as soon as it resolves, so callers can observe partial arrival
//! through [`PostComposer::snapshot`]. Ending the session cancels `alive`, and
//! any fetch that resolves afterwards is dropped.

mod state;

pub use state::{
    ComposerState, EditTarget, LoadReport, Phase, PostForm, ReferenceData, Selection,
};

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{CmsApi, Reply};
use crate::auth::{authorize, Session, POST_EDITOR_ROLES};
use crate::document::Document;
use crate::errors::{AppError, FetchTarget};
use crate::models::{OptionSet, Route, SelectOption};
use crate::notify::Notifier;
use crate::relations::{self, RelationshipSelector};
use crate::taxonomy::{self, TaxonomyResolver};

pub struct PostComposer<A> {
    api: Arc<A>,
    session: Arc<Session>,
    target: EditTarget,
    notifier: Arc<dyn Notifier>,
    taxonomy: TaxonomyResolver<A>,
    relations: RelationshipSelector<A>,
    state: Arc<Mutex<ComposerState>>,
    alive: CancellationToken,
}

impl<A> Clone for PostComposer<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            target: self.target.clone(),
            notifier: self.notifier.clone(),
            taxonomy: self.taxonomy.clone(),
            relations: self.relations.clone(),
            state: self.state.clone(),
            alive: self.alive.clone(),
        }
    }
}

impl<A: CmsApi> PostComposer<A> {
    pub fn new(
        api: Arc<A>,
        session: Session,
        target: EditTarget,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            taxonomy: TaxonomyResolver::new(api.clone()),
            relations: RelationshipSelector::new(api.clone()),
            api,
            session: Arc::new(session),
            target,
            notifier,
            state: Arc::new(Mutex::new(ComposerState::default())),
            alive: CancellationToken::new(),
        }
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub async fn snapshot(&self) -> ComposerState {
        self.state.lock().await.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase
    }

    pub async fn redirect(&self) -> Option<Route> {
        self.state.lock().await.redirect
    }

    /// Check the role gate, then fetch tags, own posts and all posts concurrently.
    ///
    /// A denied session is closed with a redirect home and nothing is fetched.
    /// Fetch failures do not fail the load: they are surfaced once each and
    /// listed in the report, and the session still moves to `Editing`.
    pub async fn load(&self) -> Result<LoadReport, AppError> {
        {
            let mut state = self.state.lock().await;
            if state.phase != Phase::Idle {
                return Err(AppError::InvalidState(format!(
                    "Cannot load a session that is {}",
                    state.phase
                )));
            }

            if let Err(err) = authorize(&self.session, POST_EDITOR_ROLES, Utc::now()) {
                warn!(user = %self.session.user.email, "Composer access denied: {}", err.message());
                state.phase = Phase::Closed;
                state.redirect = Some(Route::Home);
                self.alive.cancel();
                return Err(err);
            }

            state.phase = Phase::Loading;
        }
        info!(user = %self.session.user.email, "Loading reference data");

        let (tags, parents, related) = tokio::join!(
            self.fetch_slice(
                FetchTarget::Tags,
                self.taxonomy.load_catalog(),
                |state, options| taxonomy::merge_fetched(&mut state.reference.tags, options),
            ),
            self.fetch_slice(
                FetchTarget::OwnPosts,
                self.relations.load_parent_candidates(),
                |state, options| state.reference.parents = options.into_iter().collect(),
            ),
            self.fetch_slice(
                FetchTarget::AllPosts,
                self.relations.load_related_candidates(),
                |state, options| state.reference.related = options.into_iter().collect(),
            ),
        );

        let mut report = LoadReport::default();
        for (target, outcome) in [
            (FetchTarget::Tags, tags),
            (FetchTarget::OwnPosts, parents),
            (FetchTarget::AllPosts, related),
        ] {
            match outcome {
                Ok(true) => {}
                Ok(false) => report.discarded.push(target),
                Err(err) => report.failures.push(err),
            }
        }

        let mut state = self.state.lock().await;
        if state.phase == Phase::Loading {
            state.phase = Phase::Editing;
            info!(
                tags = state.reference.tags.len(),
                parents = state.reference.parents.len(),
                related = state.reference.related.len(),
                "Composer ready"
            );
        }
        Ok(report)
    }

    /// Await one source and apply it. `Ok(false)` means the session ended first.
    async fn fetch_slice<T, F>(
        &self,
        target: FetchTarget,
        fetch: F,
        apply: impl FnOnce(&mut ComposerState, T),
    ) -> Result<bool, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let result = tokio::select! {
            biased;
            _ = self.alive.cancelled() => {
                debug!(%target, "Session ended before fetch completed");
                return Ok(false);
            }
            result = fetch => result,
        };

        let mut state = self.state.lock().await;
        if self.alive.is_cancelled() {
            debug!(%target, "Discarding late fetch result");
            return Ok(false);
        }

        match result {
            Ok(value) => {
                apply(&mut *state, value);
                debug!(%target, "Reference data applied");
                Ok(true)
            }
            Err(err) => {
                self.notifier.error(&err.message());
                Err(err)
            }
        }
    }

    /// Run `f` against the state if the session still accepts edits.
    async fn edit<T>(
        &self,
        f: impl FnOnce(&mut ComposerState) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut state = self.state.lock().await;
        if !state.phase.is_editable() {
            return Err(AppError::InvalidState(format!(
                "Cannot edit while the session is {}",
                state.phase
            )));
        }
        f(&mut *state)
    }

    pub async fn set_title(&self, title: impl Into<String>) -> Result<(), AppError> {
        let title = title.into();
        self.edit(|state| {
            state.form.title = title;
            Ok(())
        })
        .await
    }

    pub async fn set_priority(&self, priority: impl Into<String>) -> Result<(), AppError> {
        let priority = priority.into();
        self.edit(|state| {
            state.form.priority = priority;
            Ok(())
        })
        .await
    }

    /// Select a loaded tag. Returns false if it was already selected.
    pub async fn pick_tag(&self, value: &str) -> Result<bool, AppError> {
        self.edit(|state| {
            let option = lookup(&state.reference.tags, "tag", value)?;
            Ok(state.selection.tags.insert(option))
        })
        .await
    }

    pub async fn unpick_tag(&self, value: &str) -> Result<bool, AppError> {
        self.edit(|state| Ok(state.selection.tags.remove(value).is_some()))
            .await
    }

    pub async fn clear_tags(&self) -> Result<(), AppError> {
        self.edit(|state| {
            state.selection.tags.clear();
            Ok(())
        })
        .await
    }

    /// Create a tag and select it.
    ///
    /// On success the new option joins the catalog and the selection in one
    /// update. On failure nothing changes and the server message is surfaced once.
    /// Submit is refused until the call returns, so a tag the server created is
    /// never lost to a phase change.
    pub async fn create_tag(&self, label: &str) -> Result<SelectOption, AppError> {
        self.edit(|state| {
            state.creating_tags += 1;
            Ok(())
        })
        .await?;

        let result = self.taxonomy.create(label).await;

        let mut state = self.state.lock().await;
        state.creating_tags = state.creating_tags.saturating_sub(1);
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                if matches!(err, AppError::Submission(_)) {
                    self.notifier.error(&err.message());
                }
                return Err(err);
            }
        };

        let option = reply.data;
        if state.phase == Phase::Closed {
            debug!(tag = %option.value, "Session closed before tag creation completed");
        } else {
            let state = &mut *state;
            taxonomy::absorb_created(
                &mut state.reference.tags,
                &mut state.selection.tags,
                option.clone(),
            );
        }
        drop(state);

        if let Some(message) = reply.message {
            self.notifier.success(&message);
        }
        Ok(option)
    }

    /// Set the parent, replacing any previous one.
    pub async fn choose_parent(&self, value: &str) -> Result<(), AppError> {
        self.edit(|state| {
            let option = lookup(&state.reference.parents, "parent", value)?;
            relations::choose_parent(&mut state.selection.parent, option);
            Ok(())
        })
        .await
    }

    pub async fn clear_parent(&self) -> Result<(), AppError> {
        self.edit(|state| {
            state.selection.parent = None;
            Ok(())
        })
        .await
    }

    pub async fn add_related(&self, value: &str) -> Result<bool, AppError> {
        self.edit(|state| {
            let option = lookup(&state.reference.related, "related", value)?;
            Ok(relations::add_related(&mut state.selection.related, option))
        })
        .await
    }

    pub async fn remove_related(&self, value: &str) -> Result<bool, AppError> {
        self.edit(|state| Ok(state.selection.related.remove(value).is_some()))
            .await
    }

    pub async fn clear_related(&self) -> Result<(), AppError> {
        self.edit(|state| {
            state.selection.related.clear();
            Ok(())
        })
        .await
    }

    /// Validate, serialize `document` and issue exactly one create or update call.
    ///
    /// Only allowed from `Editing`; a submit while another is in flight is
    /// rejected. On failure the session returns to `Editing` untouched.
    pub async fn submit(&self, document: &dyn Document) -> Result<Reply<()>, AppError> {
        let draft = {
            let mut state = self.state.lock().await;
            match state.phase {
                Phase::Editing => {}
                Phase::Submitting => {
                    return Err(AppError::InvalidState(
                        "A submission is already in progress".to_string(),
                    ))
                }
                phase => {
                    return Err(AppError::InvalidState(format!(
                        "Cannot submit while the session is {}",
                        phase
                    )))
                }
            }
            if state.creating_tags > 0 {
                return Err(AppError::InvalidState(
                    "A tag is still being created".to_string(),
                ));
            }
            state.form.validate()?;

            let draft = state.draft(document.serialize());
            state.phase = Phase::Submitting;
            draft
        };

        info!(
            title = %draft.title,
            tags = draft.tags.len(),
            related = draft.related.len(),
            parent = ?draft.parent_id,
            "Submitting post"
        );
        let result = match &self.target {
            EditTarget::Create => self.api.create_post(&draft).await,
            EditTarget::Update(id) => self.api.update_post(id, &draft).await,
        };

        let mut state = self.state.lock().await;
        let abandoned = state.phase == Phase::Closed;
        match result {
            Ok(reply) => {
                if !abandoned {
                    state.phase = Phase::Submitted;
                    state.redirect = Some(Route::AdminPosts);
                    self.alive.cancel();
                }
                let message = reply.message.clone().unwrap_or_else(|| match self.target {
                    EditTarget::Create => "Post created".to_string(),
                    EditTarget::Update(_) => "Post updated".to_string(),
                });
                self.notifier.success(&message);
                info!("Post submitted");
                Ok(reply)
            }
            Err(e) => {
                let err = AppError::submission(e);
                if !abandoned {
                    state.phase = Phase::Editing;
                }
                self.notifier.error(&err.message());
                Err(err)
            }
        }
    }

    /// Navigate away: the session closes and pending fetches are dropped.
    pub async fn abandon(&self) {
        let mut state = self.state.lock().await;
        if state.phase.is_terminal() {
            return;
        }
        info!(phase = %state.phase, "Composer abandoned");
        state.phase = Phase::Closed;
        self.alive.cancel();
    }
}

fn lookup(options: &OptionSet, field: &'static str, value: &str) -> Result<SelectOption, AppError> {
    options
        .get(value)
        .cloned()
        .ok_or_else(|| AppError::UnknownOption {
            field,
            value: value.to_string(),
        })
}
