//! Closed set of base stats reported for every species.

use std::fmt;

/// A base stat tracked on [`crate::Species`].
///
/// # Examples
/// ```
/// use pokedex_core::Stat;
///
/// assert_eq!(Stat::from_api_name("special-attack"), Some(Stat::SpecialAttack));
/// assert_eq!(Stat::from_api_name("accuracy"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    /// Hit points.
    Hp,
    /// Physical attack.
    Attack,
    /// Physical defense.
    Defense,
    /// Special attack.
    SpecialAttack,
    /// Special defense.
    SpecialDefense,
    /// Speed.
    Speed,
}

impl Stat {
    /// Every stat in the order the remote API lists them.
    pub const ALL: [Self; 6] = [
        Self::Hp,
        Self::Attack,
        Self::Defense,
        Self::SpecialAttack,
        Self::SpecialDefense,
        Self::Speed,
    ];

    /// Resolve the wire name used by the remote API.
    ///
    /// Returns `None` for names outside the closed set so callers can skip
    /// them.
    #[must_use]
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "hp" => Some(Self::Hp),
            "attack" => Some(Self::Attack),
            "defense" => Some(Self::Defense),
            "special-attack" => Some(Self::SpecialAttack),
            "special-defense" => Some(Self::SpecialDefense),
            "speed" => Some(Self::Speed),
            _ => None,
        }
    }

    /// Wire name used by the remote API.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::SpecialAttack => "special-attack",
            Self::SpecialDefense => "special-defense",
            Self::Speed => "speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}
