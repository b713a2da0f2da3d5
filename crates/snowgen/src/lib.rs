#![doc = include_str!("../README.md")]

mod config;
mod error;
mod generator;
mod id;
mod mono_clock;
mod mutex;
mod status;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::mono_clock::*;
pub use crate::status::*;
pub use crate::time::*;
