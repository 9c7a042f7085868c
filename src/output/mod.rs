// Result sinks: console blocks and the JSON file

pub mod persister;
pub mod presenter;

pub use persister::{persist, save};
pub use presenter::display_results;
