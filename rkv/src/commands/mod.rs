pub mod backup;
pub mod version;
