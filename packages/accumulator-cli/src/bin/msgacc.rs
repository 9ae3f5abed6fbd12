/**
 * Message Accumulator CLI - msgacc
 *
 * Parse, minimize and measure tagged localization messages
 */
use anyhow::{bail, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use message_accumulator_cli::{
    load_options, read_message, run_length, run_minimize, run_parse, ConsoleSink,
};
use std::path::Path;
use std::process;
use std::sync::Arc;

fn message_arg() -> Arg {
    Arg::new("message")
        .value_name("MESSAGE")
        .required(true)
        .help("Tagged message, or - to read it from stdin")
}

fn cli() -> Command {
    Command::new("msgacc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse, minimize and measure tagged localization messages")
        .subcommand_required(true)
        .arg(
            Arg::new("options")
                .long("options")
                .value_name("FILE")
                .global(true)
                .help("JSON file with accumulator options"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print debug diagnostics to stderr"),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the canonical serialization of a message")
                .arg(message_arg()),
        )
        .subcommand(
            Command::new("minimize")
                .about("Print the minimal string with its prefix and suffix as JSON")
                .arg(message_arg()),
        )
        .subcommand(
            Command::new("length")
                .about("Print the number of non-whitespace text characters")
                .arg(message_arg()),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    let Some((command, sub)) = matches.subcommand() else {
        bail!("no command given");
    };
    let options = load_options(sub.get_one::<String>("options").map(Path::new))?;
    let sink = Arc::new(ConsoleSink::for_verbosity(sub.get_flag("verbose")));
    let message = read_message(message_of(sub))?;

    match command {
        "parse" => println!("{}", run_parse(&message, &options, sink)),
        "minimize" => {
            let report = run_minimize(&message, &options, sink);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "length" => println!("{}", run_length(&message, &options, sink)),
        other => bail!("unknown command {}", other),
    }
    Ok(())
}

fn message_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("message")
        .map(String::as_str)
        .unwrap_or("-")
}

fn main() {
    let matches = cli().get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
