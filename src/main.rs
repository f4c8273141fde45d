use posh::core::config::ShellConfig;
use posh::error::ShellError;
use posh::flags::Flags;
use posh::shell::Shell;
use std::{env, process};

fn main() {
    let argv0 = env::args().next().unwrap_or_else(|| String::from("posh"));

    let code = match run(&argv0) {
        Ok(code) => code,
        Err(e) => {
            match &e {
                ShellError::ScriptOpen(..) => eprintln!("{}: 0: {}", argv0, e),
                _ => eprintln!("{}: {}", argv0, e),
            }
            e.exit_code()
        }
    };

    process::exit(code);
}

/// Everything that owns resources lives here so it is dropped, and its output
/// flushed, before `process::exit`.
fn run(argv0: &str) -> Result<i32, ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(0);
    }

    if flags.is_set("version") {
        println!("posh {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let level = if flags.is_set("debug") {
        "debug"
    } else if flags.is_set("quiet") {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = ShellConfig::from_flags(&flags, argv0);
    log::debug!("{:?}", config);

    let mut shell = Shell::new(config)?;
    shell.run()
}
