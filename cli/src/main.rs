use cardreader_core::{Machine, Transcriber};
use cardreader_input_evdev::print_available_devices;
use clap::{App, Arg, ArgMatches};
use log::{error, info};
use std::{error::Error, io, path::Path, process};

mod config;

fn main() {
    // stdout carries the card data, so everything else goes to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("cardreader")
        .version("0.1.0")
        .about(
            "Reads a card reader that types like a keyboard and prints each entry it types as one
line on stdout. The device is taken from the INPUT_DEVICE environment variable
or from the config file.",
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Config file to use instead of the default one")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read key events from stdin (ex: \"KEY_4 down\") instead of a device"),
        )
        .arg(
            Arg::with_name("grab")
                .long("grab")
                .help("Take exclusive access to the device so its keys reach nothing else"),
        )
        .arg(
            Arg::with_name("list")
                .long("list")
                .help("List input devices with keys and exit"),
        )
        .get_matches();

    if matches.is_present("list") {
        print_available_devices();
        return;
    }

    if let Err(e) = run(&matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = config::read(matches.value_of("config").map(Path::new))?;
    let mut machine =
        config.get_input_machine(matches.is_present("stdin"), matches.is_present("grab"))?;

    info!("Waiting for cards...");
    let stdout = io::stdout();
    let mut transcriber = Transcriber::new(stdout.lock());
    transcriber.run(machine.events())?;

    info!("Input ended");
    Ok(())
}
