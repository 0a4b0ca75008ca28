/// A named categorical tag from the type catalog (e.g. `grass`).
///
/// Identifiers are assigned by the remote catalog and reused verbatim as the
/// primary key of the `types` table.
///
/// # Examples
/// ```
/// use pokedex_core::PokemonType;
///
/// let grass = PokemonType::new(12, "grass");
/// assert_eq!(grass.id, 12);
/// assert_eq!(grass.name, "grass");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonType {
    /// Catalog identifier.
    pub id: u32,
    /// Display name as listed by the catalog.
    pub name: String,
}

impl PokemonType {
    /// Construct a catalog entry.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<(u32, String)> for PokemonType {
    fn from((id, name): (u32, String)) -> Self {
        Self { id, name }
    }
}
