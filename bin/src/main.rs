use chrono::NaiveDate;
use clap::{ArgEnum, Parser, Subcommand};
use colored::Colorize;
use dyn_clone::DynClone;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io;
use std::time::Instant;
use wordle_sieve::*;

/// Simple program to run a Wordle game in reverse, where the computer guesses the word.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[clap(short = 'f', long)]
    words_file: String,

    /// The strategy used to pick each guess.
    #[clap(short, long, arg_enum, default_value = "unseen-letters")]
    guesser: GuesserChoice,

    /// The maximum number of guesses per game.
    #[clap(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Seed for the random number generator. Takes precedence over `--date`.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Derives the random seed from this date (YYYY-MM-DD). Defaults to today.
    #[clap(short, long)]
    date: Option<NaiveDate>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum GuesserChoice {
    /// Guess a random remaining word.
    Random,
    /// Guess the remaining word with the most common unguessed letters.
    UnseenLetters,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Benchmark the solver against every word in the given words file.
    Benchmark,
    /// Run a single game with the given word.
    Single { word: String },
    /// Run an interactive game against the solver.
    Interactive,
}

trait CloneableGuesser: Guesser + DynClone + Send + Sync {}

impl<T: Guesser + Clone + Send + Sync> CloneableGuesser for T {}

dyn_clone::clone_trait_object!(CloneableGuesser);

/// Prints each guess to stdout.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn on_guess(&mut self, attempt: u32, guess: Word, remaining: usize) {
        let noun = if remaining == 1 {
            "possibility"
        } else {
            "possibilities"
        };
        println!(
            "Suggestion {}: {} - out of {} {}",
            format!("({})", attempt).magenta(),
            guess.to_string().green(),
            remaining.to_string().magenta(),
            noun
        );
    }

    fn on_no_candidates(&mut self) {
        println!("{}", "No remaining words, check input".red());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    let args = Args::parse();
    println!("File: {}", args.words_file);

    let words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(words_reader)?;
    println!("There are {} possible words.", word_bank.len());

    let guesser: Box<dyn CloneableGuesser> = match args.guesser {
        GuesserChoice::Random => Box::new(RandomGuesser),
        GuesserChoice::UnseenLetters => Box::new(UnseenLettersGuesser::new()),
    };
    let seed = match (args.seed, args.date) {
        (Some(seed), _) => seed,
        (None, Some(date)) => seed_for_date(date),
        (None, None) => seed_for_date(chrono::Local::now().date_naive()),
    };

    match args.command {
        Command::Benchmark => run_benchmark(&word_bank, guesser, seed, args.max_attempts),
        Command::Single { word } => {
            play_single_game(&word, word_bank, guesser, seed, args.max_attempts)?
        }
        Command::Interactive => play_interactive_game(word_bank, guesser, seed, args.max_attempts),
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn run_benchmark(
    word_bank: &WordBank,
    guesser: Box<dyn CloneableGuesser>,
    seed: u64,
    max_attempts: u32,
) {
    let results: Vec<GameResult> = word_bank
        .par_iter()
        .enumerate()
        .map(|(index, word)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            let mut solver = Solver::new(
                word_bank.clone(),
                guesser.clone(),
                SolutionFeedback::new(*word),
            )
            .with_max_attempts(max_attempts);
            solver.solve(&mut rng)
        })
        .collect();

    let num_guesses_per_game: Vec<u32> = results
        .iter()
        .filter(|result| result.solution().is_some())
        .map(|result| result.guesses().len() as u32)
        .collect();
    let mut num_failures_per_reason: BTreeMap<String, u32> = BTreeMap::new();
    for reason in results.iter().filter_map(GameResult::failure_reason) {
        *num_failures_per_reason
            .entry(reason.to_string())
            .or_insert(0) += 1;
    }
    println!(
        "Solved {} of {} words. Results:",
        num_guesses_per_game.len(),
        word_bank.len()
    );

    let mut num_games_per_round: BTreeMap<u32, u32> = BTreeMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    for (num_round, num_games) in num_games_per_round.iter() {
        println!("|{}|{}|", num_round, num_games);
    }
    for (reason, num_games) in num_failures_per_reason.iter() {
        println!("|{}|{}|", reason.red(), num_games);
    }

    if num_guesses_per_game.is_empty() {
        return;
    }
    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of guesses:** {:.2} +/- {:.2}",
        average, std_dev
    );
}

fn play_single_game(
    word: &str,
    word_bank: WordBank,
    guesser: Box<dyn CloneableGuesser>,
    seed: u64,
    max_attempts: u32,
) -> Result<(), WordleError> {
    let solution = Word::new(word)?;
    if !word_bank.contains(solution) {
        eprintln!("Error: given word not in the word list.");
        std::process::exit(1);
    }
    let mut solver = Solver::new(word_bank, guesser, SolutionFeedback::new(solution))
        .with_reporter(ConsoleReporter)
        .with_max_attempts(max_attempts);
    let result = solver.solve(&mut StdRng::seed_from_u64(seed));
    print_result(&result);
    Ok(())
}

fn play_interactive_game(
    word_bank: WordBank,
    guesser: Box<dyn CloneableGuesser>,
    seed: u64,
    max_attempts: u32,
) {
    println!(
        "Choose a word from the word-list. I will now try to guess it.\n\n\
         For each guess, enter the correctness of each letter as:\n\n\
           * 'n' = this letter is not in the word\n\
           * 'm' = this letter is in the word, but not in this location\n\
           * 'c' = this letter is in the word and in the right location.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"cncmn\".\n\
         Enter an empty line to give up.\n"
    );

    let stdin = io::stdin();
    let feedback = InteractiveFeedback::new(stdin.lock(), io::stdout());
    let mut solver = Solver::new(word_bank, guesser, feedback)
        .with_reporter(ConsoleReporter)
        .with_max_attempts(max_attempts);
    let result = solver.solve(&mut StdRng::seed_from_u64(seed));
    print_result(&result);
}

fn print_result(result: &GameResult) {
    match result {
        GameResult::Success { solution, guesses } => {
            println!(
                "{}",
                format!("Solved it! The word is {}.", solution).green().bold()
            );
            println!("It took me {} guesses:", guesses.len());
        }
        GameResult::Failure { reason, guesses } => {
            println!(
                "{}",
                format!("I couldn't solve it :( ({})", reason).red().bold()
            );
            println!("I made {} guesses:", guesses.len());
        }
    }
    for guess in result.guesses() {
        println!("\t{}", guess);
    }
}
