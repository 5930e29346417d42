use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn switch(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Self {
            short,
            long,
            description,
            takes_value: false,
            value: None,
        }
    }

    fn option(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Self {
            takes_value: true,
            ..Self::switch(short, long, description)
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert("help", Flag::switch("-h", "--help", "Print this help message"));
        flags.insert(
            "version",
            Flag::switch("-v", "--version", "Show version information"),
        );
        flags.insert(
            "config",
            Flag::option("-c", "--config", "Read startup commands from FILE instead of ~/.atriumrc"),
        );
        flags.insert(
            "timeout",
            Flag::option("-t", "--timeout", "Kill foreground commands after SECS seconds (0 = never)"),
        );
        flags.insert("norc", Flag::switch("-n", "--norc", "Skip the startup file"));
        flags.insert("quiet", Flag::switch("-q", "--quiet", "Suppress warnings"));
        flags.insert("debug", Flag::switch("-d", "--debug", "Enable debug output"));

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == flag.short || arg == flag.long)
                .ok_or_else(|| ShellError::Flag(format!("Unknown flag {}", arg)))?;

            if flag.takes_value {
                let value = args
                    .next()
                    .ok_or_else(|| ShellError::Flag(format!("Flag {} requires a value", arg)))?;
                flag.value = Some(value.clone());
            } else {
                flag.value = Some("true".to_string());
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: atrium [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} <VALUE>", flag.long)
            } else {
                flag.long.to_string()
            };
            println!("  {}, {:<20} {}", flag.short, long, flag.description);
        }
    }
}
