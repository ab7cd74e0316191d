//! Identifiers for declared entities, and the minter that hands out
//! generated ones.
//!
//! An [`Identifier`] may be *referenced* long before the entity it names is
//! declared; resolution is the scheduler's job. Here we only guarantee that
//! every identifier is well-formed and that no two declarations in one
//! compilation unit share a name.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of an entity that is, or will be, declared during compilation.
///
/// Always matches `[A-Za-z_][A-Za-z0-9_]*`, so it can be used verbatim as a
/// variable name in the generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

/// Returned when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid identifier")]
pub struct InvalidIdentifier(pub String);

impl Identifier {
    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(text: &str) -> bool {
        let mut chars = text.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidIdentifier(s.to_string()))
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = InvalidIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidIdentifier(value))
        }
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// Tracks every identifier claimed in a compilation unit and mints fresh
/// ones for entities the user did not name.
///
/// Minted names derive from the host type: `light::StrobeLightEffect`
/// becomes `light_strobelighteffect`, then `light_strobelighteffect_2`, and
/// so on. Minting is sequential, so the same input always yields the same
/// names.
///
/// Names the user wrote anywhere in the unit should be [reserved] up front:
/// minting never hands them out, even before their owner claims them.
///
/// [reserved]: IdMinter::reserve
#[derive(Debug, Default)]
pub struct IdMinter {
    taken: HashSet<Identifier>,
    reserved: HashSet<Identifier>,
}

impl IdMinter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `id` out of minting without claiming it.
    pub fn reserve(&mut self, id: Identifier) {
        self.reserved.insert(id);
    }

    /// Claim a user-supplied identifier.
    ///
    /// Returns `false` when the identifier was already claimed or minted.
    pub fn claim(&mut self, id: &Identifier) -> bool {
        self.taken.insert(id.clone())
    }

    /// Mint a fresh identifier for an entity of the given host type.
    pub fn mint(&mut self, type_name: &str) -> Identifier {
        let base = base_name(type_name);
        let mut candidate = Identifier(base.clone());
        let mut suffix = 1;
        while self.taken.contains(&candidate) || self.reserved.contains(&candidate) {
            suffix += 1;
            candidate = Identifier(format!("{base}_{suffix}"));
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// `light::TurnOnAction<float>` → `light_turnonaction`.
fn base_name(type_name: &str) -> String {
    let plain = type_name.split('<').next().unwrap_or(type_name);
    let base: String = plain
        .replace("::", "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase();
    if Identifier::is_valid(&base) {
        base
    } else {
        format!("_{base}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_valid_identifier() {
        let id: Identifier = "kitchen_light_2".parse().unwrap();
        assert_eq!(id.as_str(), "kitchen_light_2");
        assert_eq!(id.to_string(), "kitchen_light_2");
    }

    #[test]
    fn should_reject_identifier_starting_with_digit() {
        assert!("2lights".parse::<Identifier>().is_err());
    }

    #[test]
    fn should_reject_identifier_with_spaces_or_dashes() {
        assert!("my light".parse::<Identifier>().is_err());
        assert!("my-light".parse::<Identifier>().is_err());
        assert!("".parse::<Identifier>().is_err());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let id: Identifier = "porch".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"porch\"");
        let parsed: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_reject_invalid_identifier_when_deserializing() {
        let result = serde_json::from_str::<Identifier>("\"not valid\"");
        assert!(result.is_err());
    }

    #[test]
    fn should_mint_from_type_name() {
        let mut minter = IdMinter::new();
        let id = minter.mint("light::StrobeLightEffect");
        assert_eq!(id.as_str(), "light_strobelighteffect");
    }

    #[test]
    fn should_strip_template_arguments_when_minting() {
        let mut minter = IdMinter::new();
        let id = minter.mint("light::TurnOnAction<float>");
        assert_eq!(id.as_str(), "light_turnonaction");
    }

    #[test]
    fn should_append_suffix_when_minting_twice() {
        let mut minter = IdMinter::new();
        let first = minter.mint("light::LightState");
        let second = minter.mint("light::LightState");
        let third = minter.mint("light::LightState");
        assert_eq!(first.as_str(), "light_lightstate");
        assert_eq!(second.as_str(), "light_lightstate_2");
        assert_eq!(third.as_str(), "light_lightstate_3");
    }

    #[test]
    fn should_skip_claimed_names_when_minting() {
        let mut minter = IdMinter::new();
        let claimed: Identifier = "light_lightstate".parse().unwrap();
        assert!(minter.claim(&claimed));
        let minted = minter.mint("light::LightState");
        assert_eq!(minted.as_str(), "light_lightstate_2");
    }

    #[test]
    fn should_not_mint_a_reserved_name() {
        let mut minter = IdMinter::new();
        let reserved: Identifier = "light_lightstate".parse().unwrap();
        minter.reserve(reserved.clone());
        let minted = minter.mint("light::LightState");
        assert_eq!(minted.as_str(), "light_lightstate_2");
        assert!(minter.claim(&reserved));
        assert!(!minter.claim(&reserved));
    }

    #[test]
    fn should_refuse_second_claim_of_same_identifier() {
        let mut minter = IdMinter::new();
        let id: Identifier = "kitchen".parse().unwrap();
        assert!(minter.claim(&id));
        assert!(!minter.claim(&id));
    }
}
