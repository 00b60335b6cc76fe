//! echo2mox - EchoMTG to Moxfield inventory conversion
//!
//! Fetches a store export from the EchoMTG API, runs it through the
//! `echo2mox_core` correction rules and hands back a Moxfield-ready CSV plus
//! an audit record, either on the command line or through a small web UI.

pub mod echomtg;
pub mod error;
pub mod export;
pub mod web;

pub use echomtg::{Credentials, EchoClient};
pub use error::{Error, Result};
pub use export::{convert, default_output_dir, write_outputs, ExportOutput};
