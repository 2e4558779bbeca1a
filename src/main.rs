use anyhow::Result;
use clap::{crate_version, App as Cli, Arg, SubCommand};
use log::LevelFilter;
use registration_tui::app::App;
use registration_tui::config::{Config, Overrides};
use registration_tui::{logger, submit};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("registration-tui")
        .version(crate_version!())
        .about("Terminal registration form for the CSI Junior Core recruitment drive")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("endpoint")
                .short("e")
                .long("endpoint")
                .value_name("URL")
                .help("Relay submissions to this storage endpoint")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("sheet")
                .short("s")
                .long("sheet")
                .value_name("PATH")
                .help("Append submissions to a local CSV sheet")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("phone-digits")
                .long("phone-digits")
                .value_name("RANGE")
                .help("Accepted leading digits of phone numbers, e.g. 6-9")
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("submit")
                .about("Validate and relay an application stored as JSON")
                .arg(
                    Arg::with_name("FILE")
                        .help("Path to the application JSON file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    config.apply(Overrides {
        endpoint: matches.value_of("endpoint"),
        sheet: matches.value_of("sheet"),
        phone_digits: matches.value_of("phone-digits"),
    });

    if let Some(submit_matches) = matches.subcommand_matches("submit") {
        logger::init(Box::new(|line: String| eprintln!("{}", line)), LevelFilter::Info)?;
        let path = submit_matches.value_of("FILE").unwrap_or_default();
        let code = submit::run(&config, Path::new(path)).await?;
        std::process::exit(code);
    }

    App::start(config).await?;
    Ok(())
}
