//! Order lifecycle, account bootstrap, statistics and route access rules.

pub mod account;
pub mod guard;
pub mod orders;
pub mod stats;
