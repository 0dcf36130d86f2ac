pub mod ast;
pub mod generator;
pub mod navigator;
pub mod operators;
pub mod best_so_far;
pub mod evolution_engine;
pub mod progress;
pub mod stop;

pub use ast::{Program, ProgramMetadata, ProgramOrigin};
pub use best_so_far::{BestEntry, BestSoFar};
pub use evolution_engine::{run, EvolutionEngine, EvolutionOutcome};
pub use generator::ProgramGenerator;
pub use navigator::{select_node, NodeSelection};
pub use operators::{crossover, mutate, tournament_selection};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, GenerationReport, JsonLinesProgressCallback,
    ProgressCallback, ProgressMessage,
};
pub use stop::{StopController, StopHandle};
