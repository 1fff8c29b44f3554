// Library root
// -----------
// The `hbd` binary is a thin wrapper around these modules.
//
// Module responsibilities:
// - `api`: one method per backend endpoint, JSON in and out.
// - `credentials`: per-host token file (load, save, delete).
// - `models`: request and response records.
// - `config`: host/port/ssl resolution and the `Settings` handed to commands.
// - `cli`: clap argument definitions.
// - `commands`: one handler per CLI command.
// - `ui`: prompts, spinner and text rendering.
// - `error`: typed errors for the client and the credential store.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod ui;

pub use api::ApiClient;
pub use error::{ClientError, CredentialsError, UsageError};
