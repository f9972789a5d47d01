use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, OnceLock,
    },
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use rayon::ThreadPoolBuilder;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::{
    error::CrackleResult,
    event::{EventSender, SearchHandle},
    generator::{AttackSpec, Candidates},
    oracle::HashOracle,
    DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY,
};

/// A cancellation flag shared between a search and its callers.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The state shared by every worker of a single search.
#[derive(Debug)]
pub struct SearchState {
    attempts: AtomicU64,
    found: OnceLock<String>,
    start_time: Instant,
}

impl SearchState {
    pub(crate) fn new() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            found: OnceLock::new(),
            start_time: Instant::now(),
        }
    }

    /// Number of candidates evaluated so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn found(&self) -> Option<&str> {
        self.found.get().map(String::as_str)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn add_attempts(&self, attempts: u64) {
        self.attempts.fetch_add(attempts, Ordering::SeqCst);
    }

    /// Records a match. Only the first match is kept, later ones are discarded.
    fn record_match(&self, candidate: &str) -> bool {
        self.found.set(candidate.to_owned()).is_ok()
    }
}

/// The outcome of a search.
#[derive(Clone, Debug, Serialize)]
pub struct SearchResult {
    success: bool,
    password: Option<String>,
    attempts: u64,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    elapsed: Duration,
    rate: f64,
    interrupted: bool,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl SearchResult {
    fn new(state: &SearchState, interrupted: bool) -> Self {
        let password = state.found().map(str::to_owned);
        let attempts = state.attempts();
        let elapsed = state.elapsed();
        let rate = if elapsed.is_zero() {
            0.
        } else {
            attempts as f64 / elapsed.as_secs_f64()
        };

        Self {
            success: password.is_some(),
            password,
            attempts,
            elapsed,
            rate,
            interrupted: interrupted && state.found().is_none(),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Number of candidates hashed.
    /// Exact unless the search stopped early, in which case work that was
    /// already running when the search stopped is included.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Attempts per second.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// True if the search was cancelled before finding a match or running out of candidates.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}

/// A builder for a search coordinator.
#[derive(Clone)]
pub struct SearchCoordinatorBuilder {
    oracle: HashOracle,
    concurrency: usize,
    batch_size: usize,
}

impl SearchCoordinatorBuilder {
    /// Creates a new SearchCoordinatorBuilder.
    pub fn new(oracle: HashOracle) -> Self {
        Self {
            oracle,
            concurrency: DEFAULT_CONCURRENCY,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the number of workers.
    /// A single worker evaluates every candidate in order on the calling thread.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);

        self
    }

    /// Sets the number of candidates handed to a worker at once.
    /// Cancellation is observed between batches, so bigger batches
    /// mean more work done after a match.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);

        self
    }

    pub fn build(self) -> SearchCoordinator {
        SearchCoordinator {
            oracle: self.oracle,
            concurrency: self.concurrency,
            batch_size: self.batch_size,
        }
    }
}

/// Drives candidates through a hash oracle until one matches.
#[derive(Clone)]
pub struct SearchCoordinator {
    oracle: HashOracle,
    concurrency: usize,
    batch_size: usize,
}

impl SearchCoordinator {
    /// Creates a coordinator with the default concurrency and batch size.
    pub fn new(oracle: HashOracle) -> Self {
        SearchCoordinatorBuilder::new(oracle).build()
    }

    pub fn builder(oracle: HashOracle) -> SearchCoordinatorBuilder {
        SearchCoordinatorBuilder::new(oracle)
    }

    /// Searches for a candidate matching the target digest.
    /// Blocks until a match is found or the candidates are exhausted.
    pub fn search(&self, spec: &AttackSpec) -> CrackleResult<SearchResult> {
        self.search_with_token(spec, &CancellationToken::new())
    }

    /// Searches for a candidate matching the target digest, stopping early if `token` is cancelled.
    /// A cancelled search still returns the statistics gathered so far.
    pub fn search_with_token(
        &self,
        spec: &AttackSpec,
        token: &CancellationToken,
    ) -> CrackleResult<SearchResult> {
        self.run(spec, token, EventSender::new(None))
    }

    /// Searches on a new thread.
    /// Returns an handle to get events related to the search and to get its result.
    pub fn search_nonblocking(&self, spec: AttackSpec) -> SearchHandle {
        let (sender, receiver) = unbounded();
        let token = CancellationToken::new();

        let coordinator = self.clone();
        let thread_token = token.clone();
        let handle = thread::spawn(move || {
            coordinator.run(&spec, &thread_token, EventSender::new(Some(sender)))
        });

        SearchHandle {
            handle,
            receiver,
            token,
        }
    }

    fn run(
        &self,
        spec: &AttackSpec,
        token: &CancellationToken,
        mut events: EventSender,
    ) -> CrackleResult<SearchResult> {
        let candidates = spec.candidates()?;
        let state = SearchState::new();

        info!(
            "Starting a {} search for a {} digest with {} worker(s)",
            spec.kind(),
            self.oracle.hash_function(),
            self.concurrency
        );

        let outcome = if self.concurrency == 1 {
            self.run_sequential(candidates, &state, token, &mut events)
        } else {
            self.run_batched(candidates, &state, token, &mut events)
        };
        events.finish(&state);
        let interrupted = outcome?;

        let result = SearchResult::new(&state, interrupted);
        info!(
            "Search finished after {} attempts in {:.2?} (found: {})",
            result.attempts(),
            result.elapsed(),
            result.success()
        );

        Ok(result)
    }

    /// Evaluates every candidate in generation order on the calling thread.
    /// Returns true if the search stopped because `token` was cancelled.
    fn run_sequential(
        &self,
        mut candidates: Candidates,
        state: &SearchState,
        token: &CancellationToken,
        events: &mut EventSender,
    ) -> CrackleResult<bool> {
        loop {
            if token.is_cancelled() {
                return Ok(true);
            }

            let batch = next_batch(&mut candidates, self.batch_size)?;
            if batch.is_empty() || self.evaluate(&batch, state) {
                return Ok(false);
            }
            events.progress(state);
        }
    }

    /// Cuts the candidates into batches evaluated by a pool of workers.
    ///
    /// The calling thread is the only one reading candidates. A batch is only
    /// dispatched while fewer than `concurrency` batches separate it from the
    /// oldest unfinished batch, so at most one batch per worker is evaluated
    /// past a match.
    ///
    /// Returns true if batches were left unevaluated because `token` was cancelled.
    fn run_batched(
        &self,
        candidates: Candidates,
        state: &SearchState,
        token: &CancellationToken,
        events: &mut EventSender,
    ) -> CrackleResult<bool> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .thread_name(|i| format!("crackle-worker-{i}"))
            .build()?;

        let (batch_sender, batch_receiver) = bounded::<(usize, Vec<String>)>(self.concurrency);
        let (done_sender, done_receiver) = unbounded::<usize>();
        let skipped = AtomicBool::new(false);

        let interrupted = pool.in_place_scope(|scope| {
            for _ in 0..self.concurrency {
                let batch_receiver = batch_receiver.clone();
                let done_sender = done_sender.clone();
                let skipped = &skipped;

                scope.spawn(move |_| {
                    for (number, batch) in batch_receiver {
                        // batches queued before the search stopped are skipped
                        if state.found().is_none() {
                            if token.is_cancelled() {
                                skipped.store(true, Ordering::SeqCst);
                            } else {
                                self.evaluate(&batch, state);
                            }
                        }

                        // fails only once the producer stopped listening
                        let _ = done_sender.send(number);
                    }
                });
            }
            drop(done_sender);

            self.produce(candidates, batch_sender, done_receiver, state, token, events)
        })?;

        Ok(interrupted || (skipped.load(Ordering::SeqCst) && state.found().is_none()))
    }

    /// Feeds batches to the workers until a match, a cancellation or the end of the candidates.
    /// Returns true if it stopped because `token` was cancelled.
    fn produce(
        &self,
        mut candidates: Candidates,
        batch_sender: Sender<(usize, Vec<String>)>,
        done_receiver: Receiver<usize>,
        state: &SearchState,
        token: &CancellationToken,
        events: &mut EventSender,
    ) -> CrackleResult<bool> {
        let stopped = || state.found().is_some() || token.is_cancelled();
        let cancelled = || state.found().is_none() && token.is_cancelled();

        let mut next_number = 0;
        let mut oldest_unfinished = 0;
        let mut finished = BTreeSet::new();

        loop {
            if stopped() {
                return Ok(cancelled());
            }

            while next_number >= oldest_unfinished + self.concurrency {
                let Ok(number) = done_receiver.recv() else {
                    return Ok(false);
                };

                finished.insert(number);
                while finished.remove(&oldest_unfinished) {
                    oldest_unfinished += 1;
                }
                events.progress(state);

                if stopped() {
                    return Ok(cancelled());
                }
            }

            let batch = next_batch(&mut candidates, self.batch_size)?;
            if batch.is_empty() {
                return Ok(false);
            }

            debug!("Dispatching batch {next_number} ({} candidates)", batch.len());
            if batch_sender.send((next_number, batch)).is_err() {
                return Ok(false);
            }
            next_number += 1;
        }
    }

    /// Evaluates a batch in order, stopping at the first match.
    /// Returns true if a candidate of the batch matched.
    fn evaluate(&self, batch: &[String], state: &SearchState) -> bool {
        let mut attempts = 0;
        let mut matched = None;

        for candidate in batch {
            attempts += 1;
            if self.oracle.verify(candidate) {
                matched = Some(candidate);
                break;
            }
        }

        state.add_attempts(attempts);

        match matched {
            Some(candidate) => {
                if state.record_match(candidate) {
                    debug!("Match found after {} attempts", state.attempts());
                }
                true
            }
            None => false,
        }
    }
}

/// Pulls at most `batch_size` candidates.
fn next_batch(candidates: &mut Candidates, batch_size: usize) -> CrackleResult<Vec<String>> {
    candidates.by_ref().take(batch_size).collect()
}
