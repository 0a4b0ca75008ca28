use pokedex_core::Species;

/// Species finalised during an ingest run, in load order.
///
/// The caller owns the roster and hands it to
/// [`ingest_catalog`](super::ingest_catalog), which returns it inside the
/// [`IngestReport`](super::IngestReport).
///
/// # Examples
/// ```
/// use pokedex_core::SpeciesBuilder;
/// use pokedex_data::Roster;
///
/// let mut roster = Roster::default();
/// roster.push(SpeciesBuilder::new(1).with_name("bulbasaur").build());
/// assert_eq!(roster.len(), 1);
/// assert_eq!(roster.get(1).map(|species| species.name()), Some("bulbasaur"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    species: Vec<Species>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalised species.
    pub fn push(&mut self, species: Species) {
        self.species.push(species);
    }

    /// Number of species held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the roster holds no species.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Find a species by identifier.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Species> {
        self.species.iter().find(|species| species.id() == id)
    }

    /// Iterate over the species in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Species> {
        self.species.iter()
    }

    /// Consume the roster and return its species.
    #[must_use]
    pub fn into_vec(self) -> Vec<Species> {
        self.species
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Species;
    type IntoIter = std::slice::Iter<'a, Species>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Species>> for Roster {
    fn from(species: Vec<Species>) -> Self {
        Self { species }
    }
}
