#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] regex::Error),
    #[error("duplicate speaker id: {0}")]
    DuplicateSpeakerId(String),
    #[error("speaker {0:?} has an empty id, emoji or name")]
    EmptyLabelPart(String),
    #[error("speaker {0:?} has an emoji containing whitespace or a separator")]
    InvalidEmoji(String),
    #[error("speaker {0:?} has a name with surrounding whitespace or a separator")]
    InvalidName(String),
    #[error("labels of {first:?} and {second:?} cannot be told apart")]
    AmbiguousLabels { first: String, second: String },
}

pub type Result<T> = std::result::Result<T, Error>;
