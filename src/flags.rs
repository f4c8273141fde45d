use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<&'static str, Flag>,
    order: Vec<&'static str>,
    positional: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: Option<&'static str>,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = Flags {
            flags: HashMap::new(),
            order: Vec::new(),
            positional: Vec::new(),
        };

        flags.define("help", Some("-h"), "--help", "Print this help message", false);
        flags.define("version", Some("-v"), "--version", "Show version information", false);
        flags.define("quiet", Some("-q"), "--quiet", "Only report errors", false);
        flags.define("debug", Some("-d"), "--debug", "Enable debug logging", false);
        flags.define("config", Some("-c"), "--config", "Read startup commands from FILE", true);
        flags.define("norc", Some("-n"), "--norc", "Skip the startup file", false);
        flags.define("no-history", None, "--no-history", "Do not read or write the history file", false);

        flags
    }

    fn define(
        &mut self,
        name: &'static str,
        short: Option<&'static str>,
        long: &'static str,
        description: &'static str,
        takes_value: bool,
    ) {
        self.order.push(name);
        self.flags.insert(
            name,
            Flag {
                short,
                long,
                description,
                takes_value,
                value: None,
            },
        );
    }

    /// Parses options up to the first positional argument (the script file);
    /// everything after the script belongs to the script.
    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if !arg.starts_with('-') {
                self.positional.push(arg.clone());
                self.positional.extend(iter.cloned());
                break;
            }

            let flag = self
                .flags
                .values_mut()
                .find(|flag| flag.short == Some(arg.as_str()) || flag.long == arg.as_str())
                .ok_or_else(|| ShellError::FlagError(format!("unknown option {}", arg)))?;

            flag.value = if flag.takes_value {
                let value = iter.next().ok_or_else(|| {
                    ShellError::FlagError(format!("Flag {} requires a value", arg))
                })?;
                Some(value.clone())
            } else {
                Some("true".to_string())
            };
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    /// The script file, if one was given.
    pub fn script(&self) -> Option<&String> {
        self.positional.first()
    }

    pub fn print_help(&self) {
        println!("Usage: posh [OPTIONS] [SCRIPT]");
        println!("\nOptions:");
        for flag in self.order.iter().filter_map(|name| self.flags.get(name)) {
            let short = flag.short.map(|s| format!("{},", s)).unwrap_or_default();
            let long = if flag.takes_value {
                format!("{} FILE", flag.long)
            } else {
                flag.long.to_string()
            };
            println!("  {:<4}{:<16} {}", short, long, flag.description);
        }
    }
}
