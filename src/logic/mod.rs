pub mod behavior;
pub mod classification;
pub mod recommendations;
pub mod rules;

pub use rules::SuitabilityEngine;
