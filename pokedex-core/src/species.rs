//! Species entries and their incremental builder.
//!
//! A [`SpeciesBuilder`] accumulates whatever attributes a detail document
//! provides; [`SpeciesBuilder::build`] snapshots them into an immutable
//! [`Species`]. Only the identifier is mandatory.

use crate::Stat;

/// One finalized catalog entry.
///
/// Fields are private: a `Species` can only be obtained from
/// [`SpeciesBuilder::build`] and never changes afterwards.
///
/// # Examples
/// ```
/// use pokedex_core::SpeciesBuilder;
///
/// let species = SpeciesBuilder::new(25)
///     .with_name("pikachu")
///     .with_speed(90)
///     .with_types(vec![13])
///     .build();
/// assert_eq!(species.id(), 25);
/// assert_eq!(species.name(), "pikachu");
/// assert_eq!(species.speed(), 90);
/// assert_eq!(species.types(), &[13]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    id: u32,
    name: String,
    base_experience: u32,
    height: f64,
    weight: f64,
    hp: u32,
    attack: u32,
    defense: u32,
    special_attack: u32,
    special_defense: u32,
    speed: u32,
    types: Vec<u32>,
}

impl Species {
    /// Catalog identifier, matching the remote numbering.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Display name taken from the first listed form.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Experience granted for defeating this species.
    #[must_use]
    pub const fn base_experience(&self) -> u32 {
        self.base_experience
    }

    /// Height in metres.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Weight in kilograms.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Base hit points.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.hp
    }

    /// Base attack.
    #[must_use]
    pub const fn attack(&self) -> u32 {
        self.attack
    }

    /// Base defense.
    #[must_use]
    pub const fn defense(&self) -> u32 {
        self.defense
    }

    /// Base special attack.
    #[must_use]
    pub const fn special_attack(&self) -> u32 {
        self.special_attack
    }

    /// Base special defense.
    #[must_use]
    pub const fn special_defense(&self) -> u32 {
        self.special_defense
    }

    /// Base speed.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Look up a base stat by its enumerated identifier.
    ///
    /// # Examples
    /// ```
    /// use pokedex_core::{SpeciesBuilder, Stat};
    ///
    /// let species = SpeciesBuilder::new(1).with_stat(Stat::Hp, 45).build();
    /// assert_eq!(species.stat(Stat::Hp), 45);
    /// assert_eq!(species.stat(Stat::Speed), 0);
    /// ```
    #[must_use]
    pub const fn stat(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    /// Type identifiers in source order; the first entry is the primary type.
    #[must_use]
    pub fn types(&self) -> &[u32] {
        &self.types
    }
}

/// Incremental constructor for [`Species`].
///
/// Setters consume and return the builder so calls chain; each overwrites the
/// previous value for its attribute. Unset attributes default to zero or
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesBuilder {
    draft: Species,
}

impl SpeciesBuilder {
    /// Start a builder for the species with the given identifier.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            draft: Species {
                id,
                name: String::new(),
                base_experience: 0,
                height: 0.0,
                weight: 0.0,
                hp: 0,
                attack: 0,
                defense: 0,
                special_attack: 0,
                special_defense: 0,
                speed: 0,
                types: Vec::new(),
            },
        }
    }

    /// Identifier supplied at construction.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.draft.id
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = name.into();
        self
    }

    /// Set the base experience.
    #[must_use]
    pub const fn with_base_experience(mut self, base_experience: u32) -> Self {
        self.draft.base_experience = base_experience;
        self
    }

    /// Set the height in metres.
    #[must_use]
    pub const fn with_height(mut self, height: f64) -> Self {
        self.draft.height = height;
        self
    }

    /// Set the weight in kilograms.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.draft.weight = weight;
        self
    }

    /// Set base hit points.
    #[must_use]
    pub const fn with_hp(mut self, hp: u32) -> Self {
        self.draft.hp = hp;
        self
    }

    /// Set base attack.
    #[must_use]
    pub const fn with_attack(mut self, attack: u32) -> Self {
        self.draft.attack = attack;
        self
    }

    /// Set base defense.
    #[must_use]
    pub const fn with_defense(mut self, defense: u32) -> Self {
        self.draft.defense = defense;
        self
    }

    /// Set base special attack.
    #[must_use]
    pub const fn with_special_attack(mut self, special_attack: u32) -> Self {
        self.draft.special_attack = special_attack;
        self
    }

    /// Set base special defense.
    #[must_use]
    pub const fn with_special_defense(mut self, special_defense: u32) -> Self {
        self.draft.special_defense = special_defense;
        self
    }

    /// Set base speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: u32) -> Self {
        self.draft.speed = speed;
        self
    }

    /// Route a stat value onto its matching field.
    ///
    /// # Examples
    /// ```
    /// use pokedex_core::{SpeciesBuilder, Stat};
    ///
    /// let species = SpeciesBuilder::new(1)
    ///     .with_stat(Stat::SpecialDefense, 65)
    ///     .build();
    /// assert_eq!(species.special_defense(), 65);
    /// ```
    #[must_use]
    pub const fn with_stat(self, stat: Stat, value: u32) -> Self {
        match stat {
            Stat::Hp => self.with_hp(value),
            Stat::Attack => self.with_attack(value),
            Stat::Defense => self.with_defense(value),
            Stat::SpecialAttack => self.with_special_attack(value),
            Stat::SpecialDefense => self.with_special_defense(value),
            Stat::Speed => self.with_speed(value),
        }
    }

    /// Replace the ordered list of type identifiers.
    #[must_use]
    pub fn with_types(mut self, types: Vec<u32>) -> Self {
        self.draft.types = types;
        self
    }

    /// Snapshot the current values into a new [`Species`].
    ///
    /// The builder stays usable; every call yields an independent value.
    #[must_use]
    pub fn build(&self) -> Species {
        self.draft.clone()
    }
}
