use atrium::core::config::Config;
use atrium::flags::Flags;
use atrium::shell::Shell;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), atrium::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("Atrium {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(flags.is_set("debug"));

    let config = Config::from_flags(&flags)?;
    let mut shell = Shell::new(config)?;
    shell.run()
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
