mod error;
mod full_text;
mod parser;
mod speaker;

pub mod matcher;
pub mod panel;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use full_text::parse_turns;
pub use matcher::{LabelMatch, LabelMatcher};
pub use panel::{PANELISTS, Panelist, panel_registry, panelist};
pub use parser::StreamingTurnParser;
pub use session::session_turns;
pub use speaker::{Speaker, SpeakerRegistry};
pub use types::{StreamEvent, Turn};
