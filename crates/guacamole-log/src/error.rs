use thiserror::Error;

/// Template and argument list do not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format specifier at byte {position} refers to argument {index}, but only {available} were given")]
    MissingArgument {
        position: usize,
        /// 1-based argument index.
        index: usize,
        available: usize,
    },
    #[error("unknown conversion '{conversion}' at byte {position}")]
    UnknownConversion { conversion: char, position: usize },
    #[error("template ends with an unterminated '%'")]
    DanglingPercent,
    #[error("argument index 0 at byte {position}; indices are 1-based")]
    ZeroIndex { position: usize },
    #[error("flag '{flag}' cannot be used with '%{conversion}' at byte {position}")]
    UnsupportedFlag { flag: char, conversion: char, position: usize },
    #[error("flags '{first}' and '{second}' conflict at byte {position}")]
    ConflictingFlags { first: char, second: char, position: usize },
    #[error("flag '{flag}' at byte {position} needs a width")]
    MissingWidth { flag: char, position: usize },
    #[error("'%{conversion}' at byte {position} takes no precision")]
    IllegalPrecision { conversion: char, position: usize },
    #[error("'%{conversion}' at byte {position} needs a numeric argument, got '{value}'")]
    NotANumber { conversion: char, position: usize, value: String },
}

/// Invalid logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum name width {min} exceeds maximum {max}")]
    WidthRange { min: usize, max: usize },
    #[error("unknown log level '{0}'")]
    InvalidLevel(String),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}
