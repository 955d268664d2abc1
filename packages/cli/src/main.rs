#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the street address normalizer.
//!
//! Single strings are processed from the command line; datasets are read
//! from CSV and written back as CSV to `--output` or stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use callejero_dataset::{Table, ops};
use callejero_matching::extract::{ExtractOptions, PatternExtractor};
use callejero_matching::spelling::SpellingCorrector;
use callejero_matching::{
    MatchingConfig, MisspellingDictionary, PatternSource, PrepositionSet, config, registry,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "callejero", about = "Spanish street address normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold accents, keeping ñ, ü, ° and º
    Fold {
        /// Text to fold
        text: String,
    },
    /// Run the full preprocessing pipeline over a string
    Preprocess {
        /// Text to preprocess
        text: String,
        /// Drop the default Spanish prepositions
        #[arg(long)]
        prepositions: bool,
    },
    /// Correct misspelled street names
    Correct {
        /// Street name to correct (omit when using --input)
        text: Option<String>,
        /// Built-in misspelling dictionary
        #[arg(long, default_value = "madrid")]
        dictionary: String,
        /// Misspelling dictionary TOML file, overriding --dictionary
        #[arg(long)]
        misspellings: Option<PathBuf>,
        /// Input CSV file
        #[arg(long, requires = "column", conflicts_with = "text")]
        input: Option<PathBuf>,
        /// Column to correct
        #[arg(long, requires = "input")]
        column: Option<String>,
        /// Column to write (defaults to the input column)
        #[arg(long, requires = "input")]
        target: Option<String>,
        /// Output CSV file (defaults to stdout)
        #[arg(long, requires = "input")]
        output: Option<PathBuf>,
    },
    /// Extract canonical street names or street types from a column
    Extract {
        #[command(flatten)]
        column: ColumnArgs,
        /// Matching configuration TOML file
        #[arg(
            long = "config",
            conflicts_with_all = ["dictionary", "patterns", "composed", "prepositions"]
        )]
        config_path: Option<PathBuf>,
        /// Built-in alias dictionary (e.g. `street_types`)
        #[arg(long, conflicts_with = "patterns")]
        dictionary: Option<String>,
        /// Comma-separated list of patterns
        #[arg(long)]
        patterns: Option<String>,
        /// Match only the part of each pattern before " - "
        #[arg(long)]
        composed: bool,
        /// Drop the default Spanish prepositions before matching
        #[arg(long)]
        prepositions: bool,
    },
    /// List the distinct names of one or two columns, longest first
    UniqueNames {
        /// Input CSV file
        #[arg(long)]
        input: PathBuf,
        /// First column
        #[arg(long)]
        column: String,
        /// Second column
        #[arg(long)]
        column2: Option<String>,
        /// Print a JSON array instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// Fill missing cells from a second CSV with the same row order
    Fill {
        /// CSV file with missing cells
        #[arg(long)]
        input: PathBuf,
        /// CSV file providing the values
        #[arg(long)]
        filler: PathBuf,
        /// Comma-separated columns to fill
        #[arg(long)]
        columns: String,
        /// Comma-separated filler columns, paired with --columns
        #[arg(long)]
        filler_columns: Option<String>,
        /// Output CSV file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Append house number 1 to addresses without a number
    AddNumber {
        #[command(flatten)]
        column: ColumnArgs,
    },
    /// List the built-in dictionaries
    Dictionaries,
}

/// A CSV column to read from and write to.
#[derive(Args)]
struct ColumnArgs {
    /// Input CSV file
    #[arg(long)]
    input: PathBuf,
    /// Column to read
    #[arg(long)]
    column: String,
    /// Column to write (defaults to the input column)
    #[arg(long)]
    target: Option<String>,
    /// Output CSV file (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ColumnArgs {
    fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.column)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fold { text } => println!("{}", callejero_normalize::fold(&text)),
        Commands::Preprocess { text, prepositions } => {
            let prepositions = prepositions.then(PrepositionSet::spanish);
            println!(
                "{}",
                callejero_normalize::preprocess(&text, prepositions.as_ref())
            );
        }
        Commands::Correct {
            text,
            dictionary,
            misspellings,
            input,
            column,
            target,
            output,
        } => {
            let misspellings = load_misspellings(&dictionary, misspellings.as_deref())?;
            let corrector = SpellingCorrector::new(&misspellings);
            match (text, input, column) {
                (Some(text), None, None) => println!("{}", corrector.correct(&text)),
                (None, Some(input), Some(column)) => {
                    let table = Table::read_csv(&input)?;
                    let target = target.as_deref().unwrap_or(&column);
                    let out = ops::correct_column(&table, &corrector, &column, target)?;
                    write_table(&out, output.as_deref())?;
                }
                _ => return Err("pass either a street name or --input and --column".into()),
            }
        }
        Commands::Extract {
            column,
            config_path,
            dictionary,
            patterns,
            composed,
            prepositions,
        } => {
            let run = match config_path {
                Some(path) => config::load_config(path)?,
                None => MatchingConfig {
                    composed,
                    prepositions: prepositions.then(|| {
                        PrepositionSet::spanish().iter().map(str::to_string).collect()
                    }),
                    patterns: pattern_source(dictionary, patterns)?,
                },
            };
            let options = ExtractOptions {
                composed: run.composed,
                prepositions: run.prepositions.map(PrepositionSet::new),
            };
            let extractor = PatternExtractor::from_source(&run.patterns, &options)?;
            log::info!("Loaded {} patterns", extractor.len());

            let table = Table::read_csv(&column.input)?;
            let out = ops::extract_and_store(&table, &extractor, &column.column, column.target())?;
            write_table(&out, column.output.as_deref())?;
        }
        Commands::UniqueNames {
            input,
            column,
            column2,
            json,
        } => {
            let table = Table::read_csv(&input)?;
            let names = ops::unique_names(&table, &column, column2.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in &names {
                    println!("{name}");
                }
            }
        }
        Commands::Fill {
            input,
            filler,
            columns,
            filler_columns,
            output,
        } => {
            let table = Table::read_csv(&input)?;
            let filler = Table::read_csv(&filler)?;
            let targets = split_list(&columns);
            let fillers = filler_columns.as_deref().map(split_list);
            let out = ops::fill_missing(&table, &filler, targets.as_slice(), fillers.as_deref())?;
            write_table(&out, output.as_deref())?;
        }
        Commands::AddNumber { column } => {
            let table = Table::read_csv(&column.input)?;
            let out = ops::add_house_numbers(&table, &column.column, column.target())?;
            write_table(&out, column.output.as_deref())?;
        }
        Commands::Dictionaries => {
            println!("{:<20} KIND", "NAME");
            println!("{}", "-".repeat(34));
            for (name, kind) in registry::all_dictionaries() {
                println!("{name:<20} {}", kind.as_str());
            }
        }
    }

    Ok(())
}

fn load_misspellings(
    dictionary: &str,
    path: Option<&Path>,
) -> Result<MisspellingDictionary, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => config::load_misspellings(path)?,
        None => registry::misspelling_dictionary(dictionary)?,
    })
}

fn pattern_source(
    dictionary: Option<String>,
    patterns: Option<String>,
) -> Result<PatternSource, Box<dyn std::error::Error>> {
    match (dictionary, patterns) {
        (Some(name), None) => Ok(PatternSource::Builtin { name }),
        (None, Some(patterns)) => Ok(PatternSource::List {
            patterns: split_list(&patterns),
        }),
        _ => Err("pass one of --config, --dictionary or --patterns".into()),
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_table(table: &Table, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            table.write_csv(std::fs::File::create(path)?)?;
            log::info!("Wrote {} rows to {}", table.row_count(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            table.write_csv(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}
