//! Institution parser registry.
//!
//! Registration is an explicit call, not a side effect of defining a type:
//! [`default_registry`] registers every institution exactly once at first
//! use and is the lookup path for callers that select a parser dynamically.

use std::sync::OnceLock;

use crate::error::{ParseError, Result};
use crate::institutions::{
    CedarsSinaiParser, LluhParser, PalomarParser, RadyParser, SouthwestParser, TriCityParser,
    UciParser, UcsdParser,
};
use crate::parser::ChargeMasterParser;

type Factory = fn() -> Box<dyn ChargeMasterParser>;

struct Registration {
    /// Trimmed, case-folded lookup key.
    key: String,
    /// Display name as the parser reports it.
    name: &'static str,
    factory: Factory,
}

/// Maps institution display names to parser factories.
#[derive(Default)]
pub struct ParserRegistry {
    registrations: Vec<Registration>,
}

fn lookup_key(institution: &str) -> String {
    institution.trim().to_lowercase()
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parser under its own institution name.
    ///
    /// # Errors
    ///
    /// Fails when another parser already holds the name: a duplicate is a
    /// configuration error, never a silent override.
    pub fn register(&mut self, factory: Factory) -> Result<()> {
        let name = factory().institution_name();
        let key = lookup_key(name);
        if self.registrations.iter().any(|reg| reg.key == key) {
            return Err(ParseError::DuplicateInstitution {
                name: name.to_string(),
            });
        }
        self.registrations.push(Registration { key, name, factory });
        Ok(())
    }

    /// Builds a fresh parser for the named institution. Matching is
    /// case-insensitive and ignores surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Fails with the attempted name and the full list of registered
    /// institutions when nothing matches.
    pub fn build(&self, institution: &str) -> Result<Box<dyn ChargeMasterParser>> {
        let key = lookup_key(institution);
        self.registrations
            .iter()
            .find(|reg| reg.key == key)
            .map(|reg| (reg.factory)())
            .ok_or_else(|| {
                let mut known: Vec<&str> = self.institution_names().collect();
                known.sort_unstable();
                ParseError::UnknownInstitution {
                    name: institution.trim().to_string(),
                    known: known.join(", "),
                }
            })
    }

    /// Registered institution display names, in registration order.
    pub fn institution_names(&self) -> impl Iterator<Item = &'static str> {
        self.registrations.iter().map(|reg| reg.name)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

/// The process-wide registry holding every institution parser, built once.
///
/// # Panics
///
/// Panics on first use if two parsers claim the same institution name; that
/// is a fatal configuration error, caught at startup rather than papered
/// over by last-registration-wins.
pub fn default_registry() -> &'static ParserRegistry {
    static REGISTRY: OnceLock<ParserRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let factories: &[Factory] = &[
            || Box::new(CedarsSinaiParser),
            || Box::new(LluhParser),
            || Box::new(PalomarParser),
            || Box::new(RadyParser),
            || Box::new(SouthwestParser),
            || Box::new(TriCityParser),
            || Box::new(UciParser),
            || Box::new(UcsdParser),
        ];
        let mut registry = ParserRegistry::new();
        for factory in factories {
            if let Err(err) = registry.register(*factory) {
                panic!("parser registration failed: {err}");
            }
        }
        registry
    })
}

/// Builds a parser from the process-wide registry.
///
/// # Errors
///
/// See [`ParserRegistry::build`].
pub fn build_parser(institution: &str) -> Result<Box<dyn ChargeMasterParser>> {
    default_registry().build(institution)
}
