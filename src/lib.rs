//! Daily heating degree days for a municipality, from DMI climate data to an SFTP drop.
//!
//! [`process::process`] is the entry point a scheduler calls.

pub mod climate;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod process;
pub mod record;
pub mod settings;
pub mod upload;
pub mod window;
