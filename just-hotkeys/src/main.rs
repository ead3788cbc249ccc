use crate::errors::{HotkeyError, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use just_hotkeys_core::event::{EventElement, SyntheticKeyEvent};
use just_hotkeys_core::parser;
use ron::ser::PrettyConfig;
use std::path::Path;

use tracing_subscriber::{filter::EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt};

pub mod config;
pub mod errors;
pub mod lint;
pub mod simulate;
mod tests;

const NORMALIZE_COMMAND: &str = "normalize";
const PARSE_COMMAND: &str = "parse";
const CHECK_COMMAND: &str = "check";
const SIMULATE_COMMAND: &str = "simulate";

fn main() {
    setup_logging();
    let matches = get_app().get_matches();

    match matches.subcommand() {
        Some((NORMALIZE_COMMAND, args)) => normalize(args),
        Some((PARSE_COMMAND, args)) => errors::exit_on_error!(parse(args)),
        Some((CHECK_COMMAND, args)) => errors::exit_on_error!(check(args)),
        Some((SIMULATE_COMMAND, args)) => errors::exit_on_error!(simulate(args)),
        _ => unreachable!("a subcommand is required"),
    }
}

fn normalize(args: &ArgMatches) {
    for shortcut in args.get_many::<String>("shortcut").into_iter().flatten() {
        println!("{}", parser::normalize_shortcut(shortcut));
    }
}

fn parse(args: &ArgMatches) -> Result<()> {
    let Some(shortcut) = args.get_one::<String>("shortcut") else {
        return Ok(());
    };
    let parsed = if args.get_flag("strict") {
        parser::parse_shortcut_strict(shortcut)
            .map_err(just_hotkeys_core::errors::HotkeyError::from)?
    } else {
        parser::parse_shortcut(shortcut)
    };
    println!("{}", ron::ser::to_string_pretty(&parsed, PrettyConfig::new().struct_names(true))?);
    Ok(())
}

fn check(args: &ArgMatches) -> Result<()> {
    let bindings = config::load(config_path(args))?;
    let report = lint::check(&bindings);

    for entry in &report.entries {
        println!("{:?} -> {}", entry.normalized, entry.action);
    }
    for collision in &report.collisions {
        tracing::warn!(
            "{:?} and {:?} both bind {:?}; `{}` replaces `{}`",
            collision.earlier.shortcut,
            collision.later.shortcut,
            collision.normalized,
            collision.later.action,
            collision.earlier.action,
        );
    }

    if args.get_flag("strict") {
        for (kb, err) in &report.strict_errors {
            println!("{:?}: {}", kb.shortcut, err);
        }
        if !report.strict_errors.is_empty() {
            return Err(HotkeyError::StrictViolations(report.strict_errors.len()));
        }
    }
    Ok(())
}

fn simulate(args: &ArgMatches) -> Result<()> {
    let bindings = config::load(config_path(args))?;
    let key = args.get_one::<String>("key").map_or("", String::as_str);

    let mut event = SyntheticKeyEvent::new(key);
    if args.get_flag("ctrl") {
        event = event.ctrl();
    }
    if args.get_flag("meta") {
        event = event.meta();
    }
    if args.get_flag("alt") {
        event = event.alt();
    }
    if args.get_flag("shift") {
        event = event.shift();
    }
    if let Some(tag) = args.get_one::<String>("tag") {
        let mut element = EventElement::new(tag);
        if args.get_flag("editable") {
            element = element.with_content_editable("true");
        }
        event = event.on(element);
    }

    let outcome = simulate::simulate(&bindings, &event);
    match outcome.action {
        Some(action) => println!("{action}"),
        None => println!("no match"),
    }
    println!("default prevented: {}", outcome.default_prevented);
    println!("propagation stopped: {}", outcome.propagation_stopped);
    Ok(())
}

fn config_path(args: &ArgMatches) -> Option<&Path> {
    args.get_one::<String>("config").map(Path::new)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .help("Bindings file to use instead of the one in the config directory")
}

fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Reject shortcuts with several keys, no key or empty segments")
}

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).action(ArgAction::SetTrue).help(help)
}

fn get_app() -> Command {
    clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(NORMALIZE_COMMAND)
                .about("Print the canonical form of each shortcut")
                .arg(Arg::new("shortcut").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new(PARSE_COMMAND)
                .about("Print how a shortcut is parsed")
                .arg(Arg::new("shortcut").required(true))
                .arg(strict_arg()),
        )
        .subcommand(
            Command::new(CHECK_COMMAND)
                .about("List the shortcuts a bindings file registers")
                .arg(config_arg())
                .arg(strict_arg()),
        )
        .subcommand(
            Command::new(SIMULATE_COMMAND)
                .about("Dispatch one keydown against a bindings file")
                .arg(config_arg())
                .arg(
                    Arg::new("key")
                        .short('k')
                        .long("key")
                        .required(true)
                        .help("Key value as a browser reports it, e.g. `k` or `Escape`"),
                )
                .arg(flag("ctrl", "Hold control"))
                .arg(flag("meta", "Hold meta (cmd/win)"))
                .arg(flag("alt", "Hold alt (option)"))
                .arg(flag("shift", "Hold shift"))
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .value_name("TAG")
                        .help("Tag name of the element the event comes from"),
                )
                .arg(flag("editable", "Mark the element as content-editable").requires("tag")),
        )
}

fn setup_logging() {
    let subscriber = fmt::Layer::new().with_writer(std::io::stderr);
    let log_level = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let collector = tracing_subscriber::registry()
        .with(log_level)
        .with(subscriber);

    tracing::subscriber::set_global_default(collector).expect("Couldn't setup logging");
}
