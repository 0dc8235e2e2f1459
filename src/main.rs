use std::path::Path;

mod config;
mod error;
mod filter;
mod host;
mod operator;
mod table;

pub type ErrorBox = Box<dyn std::error::Error + Send + Sync>;

fn main() {
    let panic_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        panic_hook(panic_info);
        std::process::exit(1);
    }));

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let arg = std::env::args().nth(1);
    match arg.as_deref() {
        Some("--version") => {
            println!("kalmanop {}", env!("KALMANOP_VERSION"));
            return;
        }
        Some("--parameters") => {
            for parameter in config::app::parameter_types() {
                println!("{}", parameter);
            }
            return;
        }
        _ => {}
    }

    let config = match config::load(arg.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(err) => panic!("Unable to load config: {:#}", err),
    };

    log::debug!("Using {:#?}", config);

    let mut host = host::file::Host::new(config);
    if let Err(err) = operator::run(&mut host) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
