//! Local search operators for improving VRP solutions.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt edge reversal
//! - [`relocate_improve`] — Inter-route destination relocation under the distance cap

mod relocate;
mod two_opt;

pub use relocate::relocate_improve;
pub use two_opt::two_opt_improve;
