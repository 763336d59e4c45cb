use crate::charset::{combinations, Alphabet};
use crate::config::CrackConfig;
use crate::error::CrackError;
use crate::strategy::{Candidates, Strategy};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Cooperative cancellation flag shared by every worker of a search.
///
/// Workers poll it before each candidate; nothing is interrupted.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Something worth telling the user while a search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent<'a> {
    Started {
        combinations: &'a BigUint,
    },
    Progress {
        worker: usize,
        candidate: &'a str,
        attempts: u64,
    },
    Cracked {
        target: &'a str,
        attempts: u64,
    },
    Failed {
        target: &'a str,
        attempts: u64,
    },
}

impl fmt::Display for SearchEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchEvent::Started { combinations } => {
                write!(f, "Potential Combinations to Try: {}", with_commas(combinations))
            }
            SearchEvent::Progress {
                worker,
                candidate,
                attempts,
            } => write!(
                f,
                "Thread {}: Trying \"{}\", {} Attempts",
                worker,
                candidate,
                with_commas(attempts)
            ),
            SearchEvent::Cracked { target, attempts } => {
                write!(f, "\"{}\" Cracked in {} Attempts!", target, with_commas(attempts))
            }
            SearchEvent::Failed { target, attempts } => {
                write!(f, "Failed to Crack \"{}\" in {} Attempts", target, with_commas(attempts))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found {
        candidate: String,
        attempts: u64,
        worker: usize,
    },
    NotFound {
        attempts: u64,
    },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    pub fn attempts(&self) -> u64 {
        match self {
            SearchOutcome::Found { attempts, .. } | SearchOutcome::NotFound { attempts } => *attempts,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub target: String,
    pub length: usize,
    pub alphabet: String,
    pub combinations: BigUint,
    pub outcome: SearchOutcome,
    /// Raw value of the shared counter. Workers overlap, so this can
    /// exceed `combinations`.
    pub candidates_examined: u64,
    pub elapsed: Duration,
    pub finished_at: String,
}

pub struct SearchCoordinator {
    config: CrackConfig,
}

/// State shared by the four workers of one search.
struct SharedState<'a, F> {
    target: &'a str,
    length: usize,
    stop: &'a StopSignal,
    attempts: AtomicU64,
    found: AtomicBool,
    winner: Mutex<Option<SearchOutcome>>,
    output: Mutex<F>,
    space: Option<u64>,
    max_attempts: Option<u64>,
    pause_interval: Duration,
    pause_duration: Duration,
}

impl<F> SharedState<'_, F>
where
    F: FnMut(&SearchEvent<'_>) + Send,
{
    fn emit(&self, event: SearchEvent<'_>) {
        if let Ok(mut guard) = self.output.lock() {
            let sink = &mut *guard;
            sink(&event);
        }
    }

    /// Counts past the size of the space come from workers overlapping, and
    /// counts past the cap from workers racing beyond it.
    fn reported(&self, attempts: u64) -> u64 {
        let attempts = match self.space {
            Some(space) => attempts.min(space),
            None => attempts,
        };
        match self.max_attempts {
            Some(cap) => attempts.min(cap),
            None => attempts,
        }
    }

    fn run_worker(&self, strategy: Strategy, chars: Vec<char>) {
        let mut candidates = Candidates::new(chars, self.length);
        let mut last_report = Instant::now();

        while let Some(guess) = candidates.advance() {
            if self.stop.is_set() {
                break;
            }
            if let Some(cap) = self.max_attempts {
                if self.attempts.load(Ordering::SeqCst) >= cap {
                    break;
                }
            }

            let attempts = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

            if guess == self.target {
                // Every worker walks the same space, so a second worker can
                // hit the target before it sees the stop signal.
                if self
                    .found
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    self.stop.set();
                    let attempts = self.reported(attempts);
                    if let Ok(mut winner) = self.winner.lock() {
                        *winner = Some(SearchOutcome::Found {
                            candidate: guess.to_string(),
                            attempts,
                            worker: strategy.worker_id(),
                        });
                    }
                    self.emit(SearchEvent::Cracked {
                        target: self.target,
                        attempts,
                    });
                }
                return;
            }

            if last_report.elapsed() >= self.pause_interval {
                self.emit(SearchEvent::Progress {
                    worker: strategy.worker_id(),
                    candidate: guess,
                    attempts,
                });
                std::thread::sleep(self.pause_duration);
                last_report = Instant::now();
            }
        }
    }
}

impl SearchCoordinator {
    pub fn new(config: CrackConfig) -> Self {
        SearchCoordinator { config }
    }

    pub fn config(&self) -> &CrackConfig {
        &self.config
    }

    /// Brute force `target` using the alphabet derived from its contents
    ///
    /// Four workers, one per [`Strategy`], walk the candidate space in
    /// parallel. They share one attempt counter and `stop`; the first to
    /// hit the target sets `stop` and the others exit at their next poll.
    /// Every event is handed to `sink` under a single lock, so lines from
    /// different workers never interleave.
    ///
    /// Blocks until every worker has finished.
    ///
    /// # Errors
    ///
    /// `CrackError::InvalidArgument` when `length` differs from the
    /// target's character count and `strict_length` is on, and
    /// `CrackError::ThreadPool` when the workers cannot be started.
    /// Exhausting the space without a match is reported as
    /// [`SearchOutcome::NotFound`], not as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use brute_force::{CrackConfig, SearchCoordinator, StopSignal};
    ///
    /// let coordinator = SearchCoordinator::new(CrackConfig::default());
    /// let report = coordinator
    ///     .run_search("ab", 2, &StopSignal::new(), |event| println!("{}", event))
    ///     .unwrap();
    ///
    /// assert!(report.outcome.is_found());
    /// assert!(report.outcome.attempts() <= 26 * 26);
    /// ```
    pub fn run_search<F>(
        &self,
        target: &str,
        length: usize,
        stop: &StopSignal,
        sink: F,
    ) -> Result<SearchReport, CrackError>
    where
        F: FnMut(&SearchEvent<'_>) + Send,
    {
        self.run_search_with_alphabet(target, length, Alphabet::for_target(target), stop, sink)
    }

    /// Same as [`run_search`](Self::run_search) over a caller supplied alphabet.
    pub fn run_search_with_alphabet<F>(
        &self,
        target: &str,
        length: usize,
        alphabet: Alphabet,
        stop: &StopSignal,
        sink: F,
    ) -> Result<SearchReport, CrackError>
    where
        F: FnMut(&SearchEvent<'_>) + Send,
    {
        self.validate(target, length)?;

        let start_time = Instant::now();
        let combinations = combinations(alphabet.len(), length);

        let shared = SharedState {
            target,
            length,
            stop,
            attempts: AtomicU64::new(0),
            found: AtomicBool::new(false),
            winner: Mutex::new(None),
            output: Mutex::new(sink),
            space: combinations.to_u64(),
            max_attempts: self.config.max_attempts,
            pause_interval: self.config.pause_interval(),
            pause_duration: self.config.pause_duration(),
        };

        shared.emit(SearchEvent::Started {
            combinations: &combinations,
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(Strategy::ALL.len())
            .thread_name(|i| format!("brute-force-{}", i + 1))
            .build()
            .map_err(|e| CrackError::ThreadPool(e.to_string()))?;

        pool.scope(|s| {
            for strategy in Strategy::ALL {
                let shared = &shared;
                let chars = strategy.arrange(&alphabet);
                s.spawn(move |_| shared.run_worker(strategy, chars));
            }
        });

        let examined = shared.attempts.load(Ordering::SeqCst);
        let winner = match shared.winner.lock() {
            Ok(mut winner) => winner.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        let outcome = match winner {
            Some(found) => found,
            None => {
                let attempts = shared.reported(examined);
                // An external stop ends the search silently
                if !stop.is_set() {
                    shared.emit(SearchEvent::Failed { target, attempts });
                }
                SearchOutcome::NotFound { attempts }
            }
        };

        Ok(SearchReport {
            target: target.to_string(),
            length,
            alphabet: alphabet.to_string(),
            combinations,
            outcome,
            candidates_examined: examined,
            elapsed: start_time.elapsed(),
            finished_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    fn validate(&self, target: &str, length: usize) -> Result<(), CrackError> {
        let actual = target.chars().count();
        if self.config.strict_length && actual != length {
            return Err(CrackError::InvalidArgument(format!(
                "length {} does not match target \"{}\" ({} characters)",
                length, target, actual
            )));
        }
        Ok(())
    }
}

/// Group digits in threes: `1234567` becomes `1,234,567`.
pub fn with_commas<T: fmt::Display>(n: T) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
