//! Command line front end for the city calculations: scenario loading and
//! report rendering.

pub mod loader;
pub mod report;

pub use loader::{Scenario, ScenarioFile};
pub use report::TextReport;
