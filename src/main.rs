use brute_force::io_utils;
use brute_force::wordlist::{pick_random_word, scramble};
use brute_force::{find_common_match, load_words, CrackConfig, CrackError, SearchCoordinator, SearchReport, StopSignal};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "brute-force")]
#[command(about = "Recover a word or password by exhaustive multi-threaded search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SearchOptions {
    #[arg(long, help = "Configuration file (JSON) - CLI options override config file values")]
    config: Option<PathBuf>,

    #[arg(long, help = "Milliseconds a worker runs before reporting progress and pausing")]
    pause_interval: Option<u64>,

    #[arg(long, help = "Milliseconds a worker pauses after reporting progress")]
    pause_duration: Option<u64>,

    #[arg(long, help = "Give up after this many attempts")]
    max_attempts: Option<u64>,

    #[arg(short, long, help = "Output file for the search report (JSON)")]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Crack a given word")]
    Crack {
        #[arg(help = "The word to recover")]
        target: String,

        #[arg(short, long, help = "Word list checked for a common match before brute forcing")]
        word_list: Option<PathBuf>,

        #[command(flatten)]
        options: SearchOptions,
    },

    #[command(about = "Scramble a random word from a word list and crack it")]
    Random {
        #[arg(short, long, help = "Word list, one word per line")]
        word_list: PathBuf,

        #[arg(long, help = "Milliseconds to wait before starting the search")]
        timer_sleep: Option<u64>,

        #[command(flatten)]
        options: SearchOptions,
    },

    #[command(about = "Generate a default configuration file")]
    InitConfig {
        #[arg(help = "Output file path (default: crack_config.json)")]
        output: Option<String>,
    },
}

const WELCOME: &str = "
    Welcome to Brute Force.

    This tool tries to find a word or password using brute force.
    It first checks a list of common words for a match.
    If none is found, it goes through every possible combination of characters.

    For educational purposes only.
";

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crack {
            target,
            word_list,
            options,
        } => {
            let config = load_config(&options, None);
            crack_word(&target, word_list.as_deref(), &config, options.output.as_deref());
        }
        Commands::Random {
            word_list,
            timer_sleep,
            options,
        } => {
            let config = load_config(&options, timer_sleep);
            crack_random_word(&word_list, &config, options.output.as_deref());
        }
        Commands::InitConfig { output } => {
            init_config_file(output.as_deref().unwrap_or("crack_config.json"));
        }
    }
}

fn load_config(options: &SearchOptions, timer_sleep_override: Option<u64>) -> CrackConfig {
    let mut config = if let Some(config_path) = &options.config {
        match CrackConfig::load_from_file(config_path) {
            Ok(c) => {
                println!("Loaded configuration from: {}\n", config_path.display());
                c
            }
            Err(e) => {
                eprintln!("Error loading config file '{}': {}", config_path.display(), e);
                eprintln!("Using default configuration instead.\n");
                CrackConfig::default()
            }
        }
    } else {
        CrackConfig::default()
    };

    if let Some(v) = options.pause_interval {
        config.pause_interval_ms = v;
    }
    if let Some(v) = options.pause_duration {
        config.pause_duration_ms = v;
    }
    if let Some(v) = options.max_attempts {
        config.max_attempts = Some(v);
    }
    if let Some(v) = timer_sleep_override {
        config.timer_sleep_ms = v;
    }

    config
}

fn crack_word(target: &str, word_list: Option<&Path>, config: &CrackConfig, output: Option<&Path>) {
    println!("{}", WELCOME);

    let words = match word_list {
        Some(path) => match load_words(path) {
            Ok(words) => words,
            Err(e) => exit_with(&e),
        },
        None => Vec::new(),
    };

    let start_time = Instant::now();
    if let Some(common) = find_common_match(target, &words) {
        println!("{}", common);
    } else {
        run_brute_force(target, config, output);
    }
    println!("Finished in {:.2} Seconds", start_time.elapsed().as_secs_f64());
}

fn crack_random_word(word_list: &Path, config: &CrackConfig, output: Option<&Path>) {
    println!("{}", WELCOME);

    let words = match load_words(word_list) {
        Ok(words) => words,
        Err(e) => exit_with(&e),
    };

    let mut rng = rand::thread_rng();
    let target = match pick_random_word(&words, &mut rng) {
        Some(word) => scramble(word, &mut rng),
        None => {
            eprintln!("Error: no word to pick from {}", word_list.display());
            std::process::exit(1);
        }
    };

    println!("Starting Search for: {}\nStandby...", target);
    std::thread::sleep(config.timer_sleep());

    let start_time = Instant::now();
    if let Some(common) = find_common_match(&target, &words) {
        println!("{}", common);
    } else {
        run_brute_force(&target, config, output);
    }
    println!("Finished in {:.2} Seconds", start_time.elapsed().as_secs_f64());
}

fn run_brute_force(target: &str, config: &CrackConfig, output: Option<&Path>) {
    let coordinator = SearchCoordinator::new(config.clone());
    let stop = StopSignal::new();
    let length = target.chars().count();

    let result = coordinator.run_search(target, length, &stop, |event| println!("{}", event));

    match result {
        Ok(report) => {
            if let Some(path) = output {
                save_report(&report, path);
            }
        }
        Err(e) => exit_with(&e),
    }
}

/// Bad input exits with 2, anything else with 1.
fn exit_with(e: &CrackError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(if e.is_caller_error() { 2 } else { 1 })
}

fn save_report(report: &SearchReport, path: &Path) {
    match io_utils::save_to_file(report, path) {
        Ok(_) => println!("\nReport saved to: {}", path.display()),
        Err(e) => eprintln!("Error writing report: {}", e),
    }
}

fn init_config_file(output: &str) {
    let config = CrackConfig::default();

    match config.save_to_file(Path::new(output)) {
        Ok(_) => {
            println!("Default configuration file created: {}", output);
            println!("\nConfiguration:");
            println!("  Pause interval:  {} ms", config.pause_interval_ms);
            println!("  Pause duration:  {} ms", config.pause_duration_ms);
            match config.max_attempts {
                Some(cap) => println!("  Max attempts:    {}", cap),
                None => println!("  Max attempts:    unlimited"),
            }
            println!("  Strict length:   {}", config.strict_length);
            println!("  Timer sleep:     {} ms", config.timer_sleep_ms);
            println!("\nYou can now edit this file and use:");
            println!("  cargo run --release -- crack <word> --config {}", output);
        }
        Err(e) => {
            eprintln!("Error creating config file: {}", e);
            std::process::exit(1);
        }
    }
}
