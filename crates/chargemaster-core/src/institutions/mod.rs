//! One self-contained parsing strategy per source institution.
//!
//! Every module follows the same two-phase shape — locate the header row
//! amid preamble noise, then decode each subsequent row into zero or more
//! canonical records — varying only in column vocabulary, code-decoding
//! rules, and payer fan-out. Strategies share nothing beyond the record
//! model, the ingest abstractions, and the price/code utilities.

mod cedars_sinai;
mod lluh;
mod palomar;
mod rady;
mod southwest;
mod tricity;
mod uci;
mod ucsd;

pub use cedars_sinai::CedarsSinaiParser;
pub use lluh::LluhParser;
pub use palomar::PalomarParser;
pub use rady::RadyParser;
pub use southwest::SouthwestParser;
pub use tricity::TriCityParser;
pub use uci::UciParser;
pub use ucsd::UcsdParser;
