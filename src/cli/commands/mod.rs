//! CLI command implementations

pub mod cache;
pub mod config;
pub mod contribute;
pub mod data;
pub mod init;
pub mod options;
pub mod predict;
pub mod ranges;
mod request;

pub use cache::execute as cache;
pub use config::execute as config;
pub use contribute::execute as contribute;
pub use data::execute as data;
pub use init::execute as init;
pub use options::execute as options;
pub use predict::execute as predict;
pub use ranges::execute as ranges;

use crate::error::WagecastResult;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> WagecastResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
