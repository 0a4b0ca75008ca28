use rusqlite::{Connection, Error as SqliteError, OptionalExtension, Transaction};
use thiserror::Error;

/// Layout version recorded in `pokedex_schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Tables owned by the store and the columns each must expose, in order.
pub(crate) const EXPECTED_TABLES: &[(&str, &[&str])] = &[
    ("types", &["type_id", "type"]),
    (
        "pokemon",
        &[
            "id",
            "name",
            "base_experience",
            "height",
            "weight",
            "hp",
            "attack",
            "defense",
            "special_attack",
            "special_defense",
            "speed",
            "modified",
        ],
    ),
    ("pokemon_types", &["pokemon_id", "type_id"]),
    ("pokedex_schema_version", &["version", "applied_at"]),
    (
        "pokedex_ingest_runs",
        &[
            "run_id",
            "started_at",
            "completed_at",
            "species_expected",
            "species_loaded",
            "species_skipped",
        ],
    ),
];

/// Create the catalog schema if absent and verify it if present.
///
/// Foreign keys must already be enabled on the connection; the pragma has no
/// effect inside a transaction.
pub(crate) fn initialise_schema(connection: &mut Connection) -> Result<(), SchemaError> {
    let transaction = connection
        .transaction()
        .map_err(|source| SchemaError::Migration {
            step: "begin schema transaction",
            source,
        })?;

    create_catalog_tables(&transaction)?;
    create_bookkeeping_tables(&transaction)?;
    verify_columns(&transaction)?;
    ensure_schema_version(&transaction)?;

    transaction
        .commit()
        .map_err(|source| SchemaError::Migration {
            step: "commit schema transaction",
            source,
        })
}

fn create_catalog_tables(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "create types",
        "CREATE TABLE IF NOT EXISTS types (type_id INTEGER PRIMARY KEY, type STRING)",
    )?;
    run_migration_step(
        transaction,
        "create pokemon",
        "CREATE TABLE IF NOT EXISTS pokemon (
            id INTEGER PRIMARY KEY,
            name STRING,
            base_experience INTEGER,
            height FLOAT,
            weight FLOAT,
            hp INTEGER,
            attack INTEGER,
            defense INTEGER,
            special_attack INTEGER,
            special_defense INTEGER,
            speed INTEGER,
            modified DATE
        )",
    )?;
    run_migration_step(
        transaction,
        "create pokemon_types",
        "CREATE TABLE IF NOT EXISTS pokemon_types (
            pokemon_id INTEGER,
            type_id INTEGER,
            FOREIGN KEY(pokemon_id) REFERENCES pokemon(id),
            FOREIGN KEY(type_id) REFERENCES types(type_id)
        )",
    )
}

fn create_bookkeeping_tables(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "create schema version table",
        "CREATE TABLE IF NOT EXISTS pokedex_schema_version (
            version INTEGER PRIMARY KEY CHECK (version > 0),
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        ) WITHOUT ROWID",
    )?;
    run_migration_step(
        transaction,
        "create ingest runs table",
        "CREATE TABLE IF NOT EXISTS pokedex_ingest_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            completed_at TEXT,
            species_expected INTEGER NOT NULL,
            species_loaded INTEGER,
            species_skipped INTEGER
        )",
    )
}

fn verify_columns(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    let mut statement = transaction
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(|source| SchemaError::Migration {
            step: "prepare column inspection",
            source,
        })?;

    for &(table, expected) in EXPECTED_TABLES {
        let found = statement
            .query_map([table], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|source| SchemaError::Migration {
                step: "inspect table columns",
                source,
            })?;
        if found.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(SchemaError::IncompatibleTable {
                table,
                expected: expected.join(", "),
                found: found.join(", "),
            });
        }
    }
    Ok(())
}

fn ensure_schema_version(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    let existing_version: Option<i64> = transaction
        .query_row(
            "SELECT version FROM pokedex_schema_version LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| SchemaError::Migration {
            step: "read schema version",
            source,
        })?;

    match existing_version {
        Some(version) if version == SCHEMA_VERSION => Ok(()),
        Some(found) => Err(SchemaError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found,
        }),
        None => run_migration_step(
            transaction,
            "record schema version",
            "INSERT INTO pokedex_schema_version (version) VALUES (1)",
        ),
    }
}

fn run_migration_step(
    transaction: &Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), SchemaError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| SchemaError::Migration { step, source })
}

/// Errors raised when creating or verifying the catalog schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to execute migration step '{step}'")]
    Migration {
        step: &'static str,
        #[source]
        source: SqliteError,
    },
    #[error("table '{table}' has columns [{found}] but [{expected}] are required")]
    IncompatibleTable {
        table: &'static str,
        expected: String,
        found: String,
    },
    #[error("expected Pokedex schema version {expected} but found {found}; recreate the store")]
    VersionMismatch { expected: i64, found: i64 },
}
