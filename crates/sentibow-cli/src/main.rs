use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use sentibow_cli::input::ClassifyConfig;
use sentibow_cli::run::{run_evaluation, run_prediction, write_prediction_output};

fn config_arg() -> Arg {
    Arg::new("config")
        .help("Path to a JSON configuration file. Defaults are used when omitted.")
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn train_data_arg() -> Arg {
    Arg::new("train_data")
        .short('d')
        .long("train_data")
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
        .help(
            "Path to labeled training data (<text>\\t<label> per line). \
             Overrides the training data file specified in the configuration file.",
        )
        .value_hint(ValueHint::FilePath)
}

fn model_args() -> [Arg; 2] {
    [
        Arg::new("vectorizer")
            .long("vectorizer")
            .help("Bag-of-words mode. Overrides the vectorizer in the configuration file.")
            .value_parser(["binary", "count"])
            .value_hint(ValueHint::Other),
        Arg::new("delta")
            .long("delta")
            .help("Laplace smoothing constant (>= 0). Overrides the configuration file.")
            .value_parser(clap::value_parser!(f64)),
    ]
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or(
            "SENTIBOW_LOG",
            "warn,sentibow=info,sentibow_cli=info,sentibow_classifiers=info",
        ))
        .init();

    let matches = Command::new("sentibow")
        .version(clap::crate_version!())
        .about("Bag-of-words Naive Bayes sentiment classifier")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("evaluate")
                .about("Train a classifier and report precision, recall and F1 on held-out data")
                .arg(config_arg())
                .arg(train_data_arg())
                .arg(
                    Arg::new("test_data")
                        .short('t')
                        .long("test_data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to labeled evaluation data. Without it a holdout split \
                             of the training data is used.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .args(model_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Train a classifier and label each line of an input file")
                .arg(config_arg())
                .arg(train_data_arg())
                .arg(
                    Arg::new("input_data")
                        .short('i')
                        .long("input")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Path to the texts to classify, one per line")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Path to write predictions (TSV). Defaults to stdout.")
                        .value_hint(ValueHint::FilePath),
                )
                .args(model_args()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("evaluate", sub_m)) => handle_evaluate(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn load_config(matches: &ArgMatches) -> Result<ClassifyConfig> {
    let config_path = matches.get_one::<PathBuf>("config");
    match config_path {
        Some(path) => log::info!("[sentibow] Using config: {:?}", path),
        None => log::info!("[sentibow] No config provided; using defaults."),
    }

    let config = ClassifyConfig::from_arguments(config_path, matches)?;
    if config_path.is_none() {
        let json = serde_json::to_string_pretty(&config).unwrap_or_default();
        eprintln!("[sentibow] Effective config:\n{}", json);
    }
    Ok(config)
}

fn handle_evaluate(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    match run_evaluation(&config) {
        Ok(report) => {
            if matches.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let predictions = match run_prediction(&config) {
        Ok(predictions) => predictions,
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    };
    write_prediction_output(&predictions, config.output_file.as_deref())
}
