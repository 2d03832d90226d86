use std::str::FromStr;

use chip::definitions::keyboard;
use thiserror::Error;

/// The amount of entries shown by `disassemble` and `dump` if no count is given
const DEFAULT_COUNT: usize = 16;

/// The commands as `(name, short name, usage)`
pub const COMMANDS: [(&str, &str, &str); 10] = [
    ("disassemble", "di", "Disassemble: disassemble addr [count=16]"),
    ("registers", "r", "Examine registers"),
    ("step", "s", "One CPU step: step [count=1]"),
    ("video", "v", "Examine video memory contents"),
    ("dump", "du", "Dump memory: dump addr [count=16]"),
    ("press", "p", "Press a key: press key"),
    ("release", "re", "Release a key: release key"),
    ("tick", "t", "Tick the timers: tick [count=1]"),
    ("help", "h", "This help"),
    ("quit", "q", "Quit"),
];

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CommandError {
    #[error("No command given.")]
    Empty,
    #[error("Unknown command {0}")]
    Unknown(String),
    #[error("Bad arguments, see 'help' for usage: {0}")]
    BadArguments(&'static str),
    #[error("Bad arguments, see 'help' for usage: '{0}' is not a number")]
    NotANumber(String),
    #[error("There is no key {0:#X}, keys range from 0x0 to 0xF")]
    InvalidKey(usize),
}

/// A single parsed shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Disassemble { address: usize, count: usize },
    Registers,
    Step { count: usize },
    Video,
    Dump { address: usize, count: usize },
    Press { key: usize },
    Release { key: usize },
    Tick { count: usize },
    Help,
    Quit,
}

/// Parses a decimal or `0x` prefixed hexadecimal number
fn parse_number(word: &str) -> Result<usize, CommandError> {
    let parsed = match word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => word.parse(),
    };
    parsed.map_err(|_| CommandError::NotANumber(word.to_string()))
}

fn no_arguments(args: &[usize]) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::BadArguments("this command require no arguments"))
    }
}

fn address_and_count(args: &[usize]) -> Result<(usize, usize), CommandError> {
    match *args {
        [address] => Ok((address, DEFAULT_COUNT)),
        [address, count] => Ok((address, count)),
        _ => Err(CommandError::BadArguments("wrong number of arguments")),
    }
}

fn optional_count(args: &[usize]) -> Result<usize, CommandError> {
    match *args {
        [] => Ok(1),
        [count] => Ok(count),
        _ => Err(CommandError::BadArguments("wrong number of arguments")),
    }
}

fn key(args: &[usize]) -> Result<usize, CommandError> {
    match *args {
        [key] if key < keyboard::SIZE => Ok(key),
        [key] => Err(CommandError::InvalidKey(key)),
        _ => Err(CommandError::BadArguments("wrong number of arguments")),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        // all arguments are numeric
        let args = words.map(parse_number).collect::<Result<Vec<_>, _>>()?;

        let command = match name {
            "disassemble" | "di" => {
                let (address, count) = address_and_count(&args)?;
                Command::Disassemble { address, count }
            }
            "registers" | "r" => no_arguments(&args).map(|_| Command::Registers)?,
            "step" | "s" => Command::Step {
                count: optional_count(&args)?,
            },
            "video" | "v" => no_arguments(&args).map(|_| Command::Video)?,
            "dump" | "du" => {
                let (address, count) = address_and_count(&args)?;
                Command::Dump { address, count }
            }
            "press" | "p" => Command::Press { key: key(&args)? },
            "release" | "re" => Command::Release { key: key(&args)? },
            "tick" | "t" => Command::Tick {
                count: optional_count(&args)?,
            },
            "help" | "h" => no_arguments(&args).map(|_| Command::Help)?,
            "quit" | "q" => no_arguments(&args).map(|_| Command::Quit)?,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn test_long_and_short_names() {
        for (name, short, _) in COMMANDS.iter() {
            let line = match *name {
                "disassemble" | "dump" => " 0x200",
                "press" | "release" => " 1",
                _ => "",
            };
            assert_eq!(
                parse(&format!("{}{}", name, line)),
                parse(&format!("{}{}", short, line))
            );
            assert!(parse(&format!("{}{}", name, line)).is_ok());
        }
    }

    #[test]
    fn test_address_and_count() {
        assert_eq!(
            parse("di 0x200 3"),
            Ok(Command::Disassemble {
                address: 0x200,
                count: 3
            })
        );
        assert_eq!(
            parse("dump 512"),
            Ok(Command::Dump {
                address: 512,
                count: DEFAULT_COUNT
            })
        );
        assert_eq!(
            parse("du"),
            Err(CommandError::BadArguments("wrong number of arguments"))
        );
    }

    #[test]
    fn test_optional_count() {
        assert_eq!(parse("s"), Ok(Command::Step { count: 1 }));
        assert_eq!(parse("step 0x10"), Ok(Command::Step { count: 16 }));
        assert_eq!(parse("t 3"), Ok(Command::Tick { count: 3 }));
        assert_eq!(
            parse("t 1 2"),
            Err(CommandError::BadArguments("wrong number of arguments"))
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(parse("p 0xF"), Ok(Command::Press { key: 0xF }));
        assert_eq!(parse("re 3"), Ok(Command::Release { key: 3 }));
        assert_eq!(parse("p 0x10"), Err(CommandError::InvalidKey(0x10)));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("jump"), Err(CommandError::Unknown("jump".to_string())));
        assert_eq!(
            parse("dump zz"),
            Err(CommandError::NotANumber("zz".to_string()))
        );
        assert_eq!(
            parse("registers 1"),
            Err(CommandError::BadArguments("this command require no arguments"))
        );
    }
}
