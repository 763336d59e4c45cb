use brute_force::{
    combinations, Alphabet, CrackConfig, SearchCoordinator, SearchEvent, SearchOutcome, StopSignal,
    Strategy,
};
use num_bigint::BigUint;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn quiet_config() -> CrackConfig {
    CrackConfig {
        pause_interval_ms: 60_000,
        pause_duration_ms: 0,
        timer_sleep_ms: 0,
        ..CrackConfig::default()
    }
}

#[test]
fn test_lowercase_target_alphabet() {
    for word in ["a", "password", "zyxwvutsrqponmlkjihgfedcba"] {
        assert_eq!(Alphabet::for_target(word), Alphabet::for_target("abc"));
        assert_eq!(Alphabet::for_target(word).len(), 26);
    }
}

#[test]
fn test_combinations_match_alphabet_size() {
    for target in ["abc", "ab1", "a!", "a1!"] {
        let alphabet = Alphabet::for_target(target);
        for length in 0..6u32 {
            assert_eq!(
                combinations(alphabet.len(), length as usize),
                BigUint::from(alphabet.len()).pow(length)
            );
        }
    }
}

#[test]
fn test_cracks_scrambled_word() {
    let coordinator = SearchCoordinator::new(quiet_config());
    let report = coordinator
        .run_search("ogd", 3, &StopSignal::new(), |_| {})
        .unwrap();

    match report.outcome {
        SearchOutcome::Found {
            candidate,
            attempts,
            ..
        } => {
            assert_eq!(candidate, "ogd");
            assert!(attempts > 0 && attempts <= 26 * 26 * 26);
        }
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_cracks_word_with_digit_and_symbol() {
    let coordinator = SearchCoordinator::new(quiet_config());
    let report = coordinator
        .run_search("a1!", 3, &StopSignal::new(), |_| {})
        .unwrap();

    assert_eq!(report.alphabet.len(), 68);
    assert!(report.outcome.is_found());
}

#[test]
fn test_exactly_one_terminal_line() {
    let coordinator = SearchCoordinator::new(quiet_config());
    let lines = Mutex::new(Vec::new());
    // "n" comes first for both middle-out workers
    for target in ["a", "n", "z"] {
        lines.lock().unwrap().clear();
        coordinator
            .run_search(target, 1, &StopSignal::new(), |event| {
                lines.lock().unwrap().push(event.to_string())
            })
            .unwrap();

        let lines = lines.lock().unwrap();
        let terminal = lines
            .iter()
            .filter(|l| l.contains("Cracked") || l.starts_with("Failed"))
            .count();
        assert_eq!(terminal, 1, "lines: {:?}", *lines);
    }
}

#[test]
fn test_not_found_count_is_deterministic() {
    let coordinator = SearchCoordinator::new(CrackConfig {
        strict_length: false,
        ..quiet_config()
    });

    let first = coordinator
        .run_search("abcd", 3, &StopSignal::new(), |_| {})
        .unwrap();
    let second = coordinator
        .run_search("abcd", 3, &StopSignal::new(), |_| {})
        .unwrap();

    assert_eq!(first.outcome, SearchOutcome::NotFound { attempts: 17_576 });
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.candidates_examined, 4 * 17_576);
}

#[test]
fn test_external_stop_ends_search() {
    let coordinator = SearchCoordinator::new(CrackConfig {
        strict_length: false,
        ..quiet_config()
    });
    let stop = StopSignal::new();

    let stopper = {
        let stop = stop.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            stop.set();
        })
    };

    // 26^7 candidates per worker, far more than 50ms of work
    let report = coordinator
        .run_search("abcdefgh", 7, &stop, |_| {})
        .unwrap();
    stopper.join().unwrap();

    assert!(!report.outcome.is_found());
    assert!(report.outcome.attempts() < 26u64.pow(7));
}

#[test]
fn test_progress_events_name_their_worker() {
    let coordinator = SearchCoordinator::new(CrackConfig {
        pause_interval_ms: 0,
        pause_duration_ms: 0,
        ..quiet_config()
    });
    let workers = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&workers);

    let alphabet = Alphabet::from_chars("xyz".chars());
    coordinator
        .run_search_with_alphabet("zz", 2, alphabet, &StopSignal::new(), move |event| {
            if let SearchEvent::Progress { worker, .. } = event {
                seen.lock().unwrap().push(*worker);
            }
        })
        .unwrap();

    let workers = workers.lock().unwrap();
    assert!(!workers.is_empty());
    assert!(workers.iter().all(|w| (1..=4).contains(w)));
}

#[test]
fn test_strategies_cover_same_space() {
    let alphabet = Alphabet::from_chars("abcde".chars());
    let mut baseline: Vec<String> = brute_force::Candidates::new(alphabet.as_slice().to_vec(), 3).collect();
    baseline.sort();

    for strategy in Strategy::ALL {
        let mut walked: Vec<String> =
            brute_force::Candidates::new(strategy.arrange(&alphabet), 3).collect();
        walked.sort();
        assert_eq!(walked, baseline, "{:?}", strategy);
    }
}
