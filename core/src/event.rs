use std::{
    thread::JoinHandle,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender};

use crate::{
    error::{CrackleError, CrackleResult},
    search::{CancellationToken, SearchResult, SearchState},
};

/// Minimum delay between two progress events.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// An event to track the progress of a search.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Candidates evaluated so far.
    Progress { attempts: u64, elapsed: Duration },
    /// A candidate reproducing the target digest was found.
    Found(String),
}

/// Sends events from the thread driving a search.
/// Progress events are throttled; nothing is sent when there is no receiver.
pub(crate) struct EventSender {
    sender: Option<Sender<Event>>,
    last_progress: Option<Instant>,
}

impl EventSender {
    pub(crate) fn new(sender: Option<Sender<Event>>) -> Self {
        Self {
            sender,
            last_progress: None,
        }
    }

    pub(crate) fn progress(&mut self, state: &SearchState) {
        let Some(sender) = &self.sender else {
            return;
        };

        if self
            .last_progress
            .is_some_and(|last| last.elapsed() < PROGRESS_INTERVAL)
        {
            return;
        }
        self.last_progress = Some(Instant::now());

        // the receiver may have been dropped, the search goes on regardless
        let _ = sender.send(Event::Progress {
            attempts: state.attempts(),
            elapsed: state.elapsed(),
        });
    }

    pub(crate) fn finish(&mut self, state: &SearchState) {
        let Some(sender) = &self.sender else {
            return;
        };

        let _ = sender.send(Event::Progress {
            attempts: state.attempts(),
            elapsed: state.elapsed(),
        });

        if let Some(password) = state.found() {
            let _ = sender.send(Event::Found(password.to_owned()));
        }
    }
}

/// A search running on its own thread.
pub struct SearchHandle {
    pub(crate) handle: JoinHandle<CrackleResult<SearchResult>>,
    pub(crate) receiver: Receiver<Event>,
    pub(crate) token: CancellationToken,
}

impl SearchHandle {
    /// Returns the result of the search.
    /// Blocks until the search is finished.
    pub fn join(self) -> CrackleResult<SearchResult> {
        self.handle.join().map_err(|_| CrackleError::Join)?
    }

    /// Blocks until an event is received.
    /// Returns `None` if the search is finished.
    pub fn recv(&self) -> Option<Event> {
        self.receiver.recv().ok()
    }

    /// Asks the search to stop. Statistics gathered so far are kept.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A token cancelling this search, e.g. from a signal handler.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
