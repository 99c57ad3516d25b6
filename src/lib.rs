// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive tool.
//
// Module responsibilities:
// - `config`: command-line flags.
// - `store`: the SQLite database (schema, seed data, queries, admins).
// - `model`: employee records and report rows.
// - `validate`: checks on operator input.
// - `auth`: admin password hashing.
// - `export`: CSV output.
// - `table`: grid rendering for terminal output.
// - `ui`: menu and prompt flows; delegates all data access to `store`.
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod store;
pub mod table;
pub mod ui;
pub mod validate;
