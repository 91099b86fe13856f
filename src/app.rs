//! Composition layer: wires the store, game session, and editor together.
//!
//! Data flows one way at startup (store -> session) and one way on save
//! (editor -> store -> re-fetch -> session re-initializes). Nothing is
//! mutated optimistically: a store failure is logged and leaves the prior
//! in-memory state untouched, so the user sees an absent refresh rather
//! than an error surface.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::core::{ColleagueDraft, ColleagueId, GameRng};
use crate::editor::{ColleagueEditor, ColleagueSave};
use crate::game::{lock_session, Countdown, GameSession, SessionConfig, SharedSession};
use crate::store::ColleagueStore;

/// Which surface is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Game,
    Editor,
}

/// Top-level application state: store handle, shared session, editor,
/// countdown guard, and the active view.
pub struct App {
    store: ColleagueStore,
    session: SharedSession,
    editor: ColleagueEditor,
    countdown: Option<Countdown>,
    view: View,
}

impl App {
    /// Fetch the roster and deal the first round.
    ///
    /// A store failure starts an empty session; the game becomes playable
    /// on the next successful refresh.
    pub async fn start(store: ColleagueStore, config: SessionConfig) -> Self {
        let colleagues = match store.list().await {
            Ok(colleagues) => colleagues,
            Err(err) => {
                warn!(%err, "failed to fetch colleagues, starting empty");
                Vec::new()
            }
        };

        let session: SharedSession = Arc::new(Mutex::new(GameSession::new(
            colleagues.clone(),
            config,
            GameRng::from_entropy(),
        )));
        let countdown = Countdown::arm(Arc::clone(&session));

        Self {
            store,
            session,
            editor: ColleagueEditor::new(colleagues),
            countdown: Some(countdown),
            view: View::Game,
        }
    }

    /// Re-fetch the roster and re-initialize the session.
    ///
    /// On a store failure the current round keeps running unchanged.
    pub async fn refresh(&mut self) {
        let colleagues = match self.store.list().await {
            Ok(colleagues) => colleagues,
            Err(err) => {
                warn!(%err, "failed to fetch colleagues, keeping current round");
                return;
            }
        };

        self.editor = ColleagueEditor::new(colleagues.clone());
        // Drop the old guard before the new round starts ticking.
        self.countdown = None;
        lock_session(&self.session).initialize(colleagues);
        self.countdown = Some(Countdown::arm(Arc::clone(&self.session)));
    }

    /// Route an editor save to the store, then refresh.
    pub async fn save(&mut self, save: ColleagueSave) {
        let draft = ColleagueDraft {
            name: save.name,
            photo: save.photo,
            descriptions: save.descriptions,
        };
        let result = match save.id {
            Some(id) => self.store.update(id, &draft).await.map(|_| ()),
            None => self.store.create(&draft).await.map(|_| ()),
        };
        match result {
            Ok(()) => {
                self.view = View::Game;
                self.refresh().await;
            }
            Err(err) => warn!(%err, "failed to save colleague"),
        }
    }

    /// Delete a record, then refresh.
    pub async fn delete(&mut self, id: ColleagueId) {
        match self.store.delete(id).await {
            Ok(()) => self.refresh().await,
            Err(err) => warn!(%err, "failed to delete colleague"),
        }
    }

    /// Restart the round with the last-known roster.
    pub fn reset(&mut self) {
        self.countdown = None;
        lock_session(&self.session).reset();
        self.countdown = Some(Countdown::arm(Arc::clone(&self.session)));
    }

    /// Show the answer key and stop the clock.
    pub fn reveal(&mut self) {
        self.countdown = None;
        lock_session(&self.session).reveal();
    }

    /// Finish the round early and score it.
    pub fn end_game(&mut self) {
        self.countdown = None;
        lock_session(&self.session).end_game();
    }

    /// Toggle between the game and the editor.
    pub fn toggle_editor(&mut self) {
        self.view = match self.view {
            View::Game => View::Editor,
            View::Editor => View::Game,
        };
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    #[must_use]
    pub fn editor(&self) -> &ColleagueEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ColleagueEditor {
        &mut self.editor
    }
}
