// Adapters layer: concrete default stores and purchase providers.

pub mod file;
pub mod memory;
pub mod simulated;

pub use file::JsonFileDefaults;
pub use memory::InMemoryDefaults;
pub use simulated::SimulatedStore;
