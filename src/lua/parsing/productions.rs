//! Productions
//!
//! One method on [Parser](super::context::Parser) per grammar rule, grouped by what they
//! parse. Every production assumes nothing about the token under the cursor: on a mismatch
//! it logs, steps over the token and returns, and its caller carries on.
//!
//! Statement productions also drive the function registry: declarations register directly,
//! assignments open a pairing frame and push their names and expressions on it.

mod blocks;
mod expressions;
mod functions;
mod statements;
mod tables;
