use clap::{crate_version, App, Arg};
use log::error;
use permaflat::config::Config;
use permaflat::pipeline::{self, Error, Format, Options};
use std::fs::File;
use std::io;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let matches = App::new("permaflat")
        .version(crate_version!())
        .about("Flattens blog-post permalinks and orders posts by them, newest first")
        .arg(
            Arg::with_name("INPUT")
                .help("YAML or JSON list of posts; reads stdin if omitted or `-`")
                .index(1),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("Config file; defaults to the nearest permaflat.yaml"),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .possible_values(&["yaml", "json"])
                .default_value("yaml")
                .help("Output format"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Fail on permalinks that don't start with `/`"),
        )
        .arg(
            Arg::with_name("urls")
                .long("urls")
                .help("Print absolute post URLs instead of posts"),
        )
        .get_matches();

    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::from_directory(&std::env::current_dir()?)?,
    };
    if matches.is_present("strict") {
        config.strict = true;
    }

    let options = Options {
        config,
        format: matches.value_of("format").unwrap_or("yaml").parse::<Format>()?,
        urls: matches.is_present("urls"),
    };

    let stdout = io::stdout();
    match matches.value_of("INPUT") {
        None | Some("-") => {
            let stdin = io::stdin();
            pipeline::run(&options, stdin.lock(), stdout.lock())
        }
        Some(path) => {
            let file = File::open(path).map_err(|err| Error::OpenInput {
                path: path.into(),
                err,
            })?;
            pipeline::run(&options, file, stdout.lock())
        }
    }
}
