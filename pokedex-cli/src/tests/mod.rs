//! Shared test harness modules for the Pokedex CLI.

use super::*;

mod helpers;
