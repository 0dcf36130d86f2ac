pub mod traits;
pub mod evolution;
pub mod data;
pub mod manager;

pub use manager::AppConfig;
pub use evolution::EvolutionConfig;
pub use data::DataConfig;
pub use traits::ConfigSection;
