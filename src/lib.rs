//! RTT Scope (rtt-scope)
//!
//! Terminal oscilloscope for a raw stream of little-endian 32-bit samples
//! served over TCP (typically a SEGGER RTT telnet/raw channel).
//!
//! The library follows a Pure Core / Impure Shell split: `state` and
//! `export` hold the sample pipeline and interaction logic, `source` talks
//! to the network and `view` owns the terminal.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
