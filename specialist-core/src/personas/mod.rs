//! Specialist persona catalog
//!
//! Every persona pairs a display name with the system instruction that is
//! sent verbatim to the model once the persona is selected. The catalog
//! order is significant: selection ties are broken by it and listings
//! follow it.

mod catalog;

pub use catalog::BUILTIN_PERSONA_COUNT;

use catalog::BUILTIN_PERSONAS;
use serde::Serialize;

/// A named system-prompt instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub instruction: &'static str,
}

impl Persona {
    pub const fn new(name: &'static str, instruction: &'static str) -> Self {
        Self { name, instruction }
    }
}

/// Ordered, read-only view over the persona table.
#[derive(Debug, Clone, Copy)]
pub struct PersonaCatalog {
    personas: &'static [Persona],
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PersonaCatalog {
    /// The built-in specialist personas in catalog order.
    pub fn builtin() -> Self {
        Self {
            personas: &BUILTIN_PERSONAS,
        }
    }

    /// Build a catalog over an arbitrary static table.
    pub fn from_static(personas: &'static [Persona]) -> Self {
        Self { personas }
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Persona> + '_ {
        self.personas.iter()
    }

    /// Look up a persona by name.
    ///
    /// An exact match wins; otherwise the first case-insensitive match is
    /// returned so that `--agent "web developer"` works from the shell.
    pub fn get(&self, name: &str) -> Option<&'static Persona> {
        let name = name.trim();
        self.personas
            .iter()
            .find(|persona| persona.name == name)
            .or_else(|| {
                self.personas
                    .iter()
                    .find(|persona| persona.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.personas.iter().map(|persona| persona.name).collect()
    }

    /// Persona instructions in catalog order; this is the embedding corpus.
    pub fn instructions(&self) -> Vec<String> {
        self.personas
            .iter()
            .map(|persona| persona.instruction.to_string())
            .collect()
    }
}
