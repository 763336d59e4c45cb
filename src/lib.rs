pub mod charset;
pub mod config;
pub mod error;
pub mod io_utils;
pub mod search;
pub mod strategy;
pub mod wordlist;

pub use charset::{combinations, Alphabet};
pub use config::CrackConfig;
pub use error::CrackError;
pub use search::{SearchCoordinator, SearchEvent, SearchOutcome, SearchReport, StopSignal};
pub use strategy::{Candidates, Strategy};
pub use wordlist::{find_common_match, load_words, CommonMatch};
