pub mod profile;

pub use profile::FitnessProfile;
