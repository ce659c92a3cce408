pub mod agents;
pub mod campaigns;
pub mod engines;
pub mod utils;
