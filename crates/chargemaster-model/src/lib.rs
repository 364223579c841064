pub mod entry;

pub use entry::ChargeMasterEntry;
