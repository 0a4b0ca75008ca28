use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use pokedex_core::{PokemonType, Species, SpeciesBuilder};
use rusqlite::{Connection, Error as SqliteError, ErrorCode, OptionalExtension};
use thiserror::Error;

use super::schema::{SchemaError, initialise_schema};

/// A species row read back from the store with its insertion timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSpecies {
    /// The persisted attributes and bridge rows, in insertion order.
    pub species: Species,
    /// Wall-clock time the row was written (`modified` column).
    pub captured_at: DateTime<Utc>,
}

/// Exclusive handle on a Pokedex SQLite database.
///
/// Every connection opened through this type has foreign-key enforcement
/// switched on, so species and bridge rows can only reference types that
/// were persisted earlier.
///
/// # Examples
/// ```
/// use pokedex_core::{PokemonType, SpeciesBuilder};
/// use pokedex_data::PokedexStore;
///
/// let mut store = PokedexStore::open_in_memory()?;
/// store.initialise_schema()?;
/// store.persist_type_catalog(&[PokemonType::new(12, "grass")])?;
/// store.persist_species(&SpeciesBuilder::new(1).with_types(vec![12]).build())?;
/// assert_eq!(store.species_count()?, 1);
/// assert_eq!(store.bridge_count()?, 1);
/// # Ok::<(), pokedex_data::StoreError>(())
/// ```
#[derive(Debug)]
pub struct PokedexStore {
    pub(super) connection: Connection,
    location: Option<Utf8PathBuf>,
}

impl PokedexStore {
    /// Open (creating if needed) the store at `path`.
    ///
    /// Missing parent directories are created first.
    ///
    /// # Errors
    ///
    /// [`StoreError::CreateDir`] or [`StoreError::Open`] when the file cannot
    /// be reached, [`StoreError::Sqlite`] when foreign keys cannot be enabled.
    pub fn open(path: &Utf8Path) -> Result<Self, StoreError> {
        pokedex_fs::ensure_parent_dir(path).map_err(|source| StoreError::CreateDir {
            path: path.to_owned(),
            source,
        })?;
        let connection = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::from_connection(connection, Some(path.to_owned()))
    }

    /// Open a private in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory().map_err(|source| StoreError::Sqlite {
            operation: "open in-memory database",
            source,
        })?;
        Self::from_connection(connection, None)
    }

    fn from_connection(
        connection: Connection,
        location: Option<Utf8PathBuf>,
    ) -> Result<Self, StoreError> {
        connection
            .pragma_update(None, "foreign_keys", true)
            .map_err(|source| StoreError::Sqlite {
                operation: "enable foreign keys",
                source,
            })?;
        Ok(Self {
            connection,
            location,
        })
    }

    /// Path of the backing file, or `None` for in-memory stores.
    #[must_use]
    pub fn location(&self) -> Option<&Utf8Path> {
        self.location.as_deref()
    }

    /// Create the catalog and bookkeeping tables, or verify existing ones.
    ///
    /// Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when a table exists with different columns,
    /// when the recorded layout version differs, or when SQLite fails.
    pub fn initialise_schema(&mut self) -> Result<(), SchemaError> {
        initialise_schema(&mut self.connection)
    }

    /// Insert the type catalog in one transaction and return the row count.
    ///
    /// # Errors
    ///
    /// [`StoreError::Constraint`] when an identifier is already present. No
    /// row from the batch is kept on failure.
    pub fn persist_type_catalog(&mut self, types: &[PokemonType]) -> Result<usize, StoreError> {
        let transaction = self
            .connection
            .transaction()
            .map_err(sqlite_error("begin type transaction"))?;
        {
            let mut insert_type = transaction
                .prepare_cached("INSERT INTO types (type_id, type) VALUES (?1, ?2)")
                .map_err(sqlite_error("prepare insert type"))?;
            for entry in types {
                insert_type
                    .execute((entry.id, entry.name.as_str()))
                    .map_err(sqlite_error("insert type"))?;
            }
        }
        transaction
            .commit()
            .map_err(sqlite_error("commit type transaction"))?;
        Ok(types.len())
    }

    /// Insert one species and its bridge rows stamped with the current time.
    ///
    /// Returns the timestamp written to the `modified` column.
    ///
    /// # Errors
    ///
    /// See [`PokedexStore::persist_species_at`].
    pub fn persist_species(&mut self, species: &Species) -> Result<DateTime<Utc>, StoreError> {
        let captured_at = Utc::now();
        self.persist_species_at(species, captured_at)?;
        Ok(captured_at)
    }

    /// Insert one species and its bridge rows with an explicit timestamp.
    ///
    /// Bridge rows follow the order of [`Species::types`].
    ///
    /// # Errors
    ///
    /// [`StoreError::Constraint`] when the species id already exists or a
    /// referenced type was never persisted. The species row is rolled back
    /// with the failing bridge row.
    pub fn persist_species_at(
        &mut self,
        species: &Species,
        captured_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let transaction = self
            .connection
            .transaction()
            .map_err(sqlite_error("begin species transaction"))?;
        {
            let mut insert_species = transaction
                .prepare_cached(
                    "INSERT INTO pokemon (
                        id,
                        name,
                        base_experience,
                        height,
                        weight,
                        hp,
                        attack,
                        defense,
                        special_attack,
                        special_defense,
                        speed,
                        modified
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                )
                .map_err(sqlite_error("prepare insert species"))?;
            insert_species
                .execute(rusqlite::params![
                    species.id(),
                    species.name(),
                    species.base_experience(),
                    species.height(),
                    species.weight(),
                    species.hp(),
                    species.attack(),
                    species.defense(),
                    species.special_attack(),
                    species.special_defense(),
                    species.speed(),
                    captured_at,
                ])
                .map_err(sqlite_error("insert species"))?;

            let mut insert_bridge = transaction
                .prepare_cached("INSERT INTO pokemon_types (pokemon_id, type_id) VALUES (?1, ?2)")
                .map_err(sqlite_error("prepare insert species type"))?;
            for type_id in species.types() {
                insert_bridge
                    .execute((species.id(), *type_id))
                    .map_err(sqlite_error("insert species type"))?;
            }
        }
        transaction
            .commit()
            .map_err(sqlite_error("commit species transaction"))
    }

    /// Number of rows in `types`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the query fails.
    pub fn type_count(&self) -> Result<u64, StoreError> {
        self.count("SELECT COUNT(*) FROM types", "count types")
    }

    /// Number of rows in `pokemon`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the query fails.
    pub fn species_count(&self) -> Result<u64, StoreError> {
        self.count("SELECT COUNT(*) FROM pokemon", "count species")
    }

    /// Number of rows in `pokemon_types`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the query fails.
    pub fn bridge_count(&self) -> Result<u64, StoreError> {
        self.count("SELECT COUNT(*) FROM pokemon_types", "count species types")
    }

    fn count(&self, sql: &str, operation: &'static str) -> Result<u64, StoreError> {
        self.connection
            .query_row(sql, [], |row| row.get(0))
            .map_err(sqlite_error(operation))
    }

    /// Highest species identifier persisted so far.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the query fails.
    pub fn last_species_id(&self) -> Result<Option<u32>, StoreError> {
        self.connection
            .query_row("SELECT MAX(id) FROM pokemon", [], |row| row.get(0))
            .map_err(sqlite_error("read last species id"))
    }

    /// Read one species and its bridge rows back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if a query fails or a column holds an
    /// unexpected value.
    pub fn load_species(&self, id: u32) -> Result<Option<StoredSpecies>, StoreError> {
        let row = self
            .connection
            .prepare_cached(
                "SELECT name, base_experience, height, weight, hp, attack, defense,
                        special_attack, special_defense, speed, modified
                 FROM pokemon WHERE id = ?1",
            )
            .and_then(|mut statement| {
                statement
                    .query_row([id], |row| {
                        let builder = SpeciesBuilder::new(id)
                            .with_name(row.get::<_, String>(0)?)
                            .with_base_experience(row.get(1)?)
                            .with_height(row.get(2)?)
                            .with_weight(row.get(3)?)
                            .with_hp(row.get(4)?)
                            .with_attack(row.get(5)?)
                            .with_defense(row.get(6)?)
                            .with_special_attack(row.get(7)?)
                            .with_special_defense(row.get(8)?)
                            .with_speed(row.get(9)?);
                        let captured_at: DateTime<Utc> = row.get(10)?;
                        Ok((builder, captured_at))
                    })
                    .optional()
            })
            .map_err(sqlite_error("load species"))?;

        let Some((builder, captured_at)) = row else {
            return Ok(None);
        };

        let types = self
            .connection
            .prepare_cached("SELECT type_id FROM pokemon_types WHERE pokemon_id = ?1 ORDER BY rowid")
            .and_then(|mut statement| {
                let rows = statement.query_map([id], |row| row.get::<_, u32>(0))?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .map_err(sqlite_error("load species types"))?;

        Ok(Some(StoredSpecies {
            species: builder.with_types(types).build(),
            captured_at,
        }))
    }

    /// Read the whole type catalog ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the query fails.
    pub fn load_type_catalog(&self) -> Result<Vec<PokemonType>, StoreError> {
        self.connection
            .prepare_cached("SELECT type_id, type FROM types ORDER BY type_id")
            .and_then(|mut statement| {
                let rows = statement.query_map([], |row| {
                    Ok(PokemonType::new(row.get(0)?, row.get::<_, String>(1)?))
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .map_err(sqlite_error("load type catalog"))
    }

    /// Record the start of an ingest run and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the insert fails.
    pub fn begin_run(&self, species_expected: u32) -> Result<i64, StoreError> {
        self.connection
            .execute(
                "INSERT INTO pokedex_ingest_runs (started_at, species_expected) VALUES (?1, ?2)",
                (Utc::now(), species_expected),
            )
            .map_err(sqlite_error("begin ingest run"))?;
        Ok(self.connection.last_insert_rowid())
    }

    /// Mark run `run_id` as finished.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownRun`] when no such run exists, otherwise
    /// [`StoreError::Sqlite`] if the update fails.
    pub fn complete_run(&self, run_id: i64, loaded: u32, skipped: u32) -> Result<(), StoreError> {
        let updated = self
            .connection
            .execute(
                "UPDATE pokedex_ingest_runs
                 SET completed_at = ?2, species_loaded = ?3, species_skipped = ?4
                 WHERE run_id = ?1",
                (run_id, Utc::now(), loaded, skipped),
            )
            .map_err(sqlite_error("complete ingest run"))?;
        if updated == 0 {
            return Err(StoreError::UnknownRun { run_id });
        }
        Ok(())
    }

    /// Whether the most recent ingest run reached completion.
    ///
    /// Stores without run bookkeeping, or with no runs, are incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the file is not a readable SQLite
    /// database.
    pub fn is_complete(&self) -> Result<bool, StoreError> {
        let has_runs: bool = self
            .connection
            .query_row(
                "SELECT EXISTS (
                    SELECT 1 FROM sqlite_master
                    WHERE type = 'table' AND name = 'pokedex_ingest_runs'
                )",
                [],
                |row| row.get(0),
            )
            .map_err(sqlite_error("inspect ingest bookkeeping"))?;
        if !has_runs {
            return Ok(false);
        }

        let latest: Option<bool> = self
            .connection
            .query_row(
                "SELECT completed_at IS NOT NULL FROM pokedex_ingest_runs
                 ORDER BY run_id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(sqlite_error("read latest ingest run"))?;
        Ok(latest.unwrap_or(false))
    }
}

fn sqlite_error(operation: &'static str) -> impl FnOnce(SqliteError) -> StoreError {
    move |source| {
        if source.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            StoreError::Constraint { operation, source }
        } else {
            StoreError::Sqlite { operation, source }
        }
    }
}

/// Errors raised by [`PokedexStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create parent directory for {path}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open SQLite database at {path}")]
    Open {
        path: Utf8PathBuf,
        #[source]
        source: SqliteError,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("constraint violated during {operation}")]
    Constraint {
        operation: &'static str,
        #[source]
        source: SqliteError,
    },
    #[error("ingest run {run_id} does not exist")]
    UnknownRun { run_id: i64 },
    #[error("failed to {operation}")]
    Sqlite {
        operation: &'static str,
        #[source]
        source: SqliteError,
    },
}
