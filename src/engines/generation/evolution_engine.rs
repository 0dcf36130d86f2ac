use crate::config::EvolutionConfig;
use crate::data::Dataset;
use crate::engines::evaluation::{fitness, median};
use crate::engines::generation::{
    ast::{Program, ProgramOrigin},
    best_so_far::BestSoFar,
    generator::ProgramGenerator,
    operators::{crossover, mutate, tournament_selection},
    progress::{GenerationReport, ProgressCallback},
    stop::{StopController, StopHandle},
};
use crate::error::{Result, SymgpError};
use crate::functions::OperatorRegistry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Result of a finished run: the best program ever scored.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    pub program: Program,
    pub score: f64,
    pub predictions: Vec<f64>,
    pub generations_completed: usize,
    pub stopped_early: bool,
}

/// Predictions and fitness of one individual for one generation.
type Scored = (Vec<f64>, f64);

pub struct EvolutionEngine {
    config: EvolutionConfig,
    registry: OperatorRegistry,
    rng: StdRng,
    stop: StopController,
}

impl EvolutionEngine {
    /// Engine over the operators named in `config`.
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        let registry = OperatorRegistry::from_names(&config.operators)?;
        Self::with_registry(config, registry)
    }

    /// Engine over an explicit registry, which may hold operators outside the
    /// built-in set. `config.operators` is replaced by the registry's names.
    pub fn with_registry(config: EvolutionConfig, registry: OperatorRegistry) -> Result<Self> {
        let checked = EvolutionConfig {
            operators: registry.names().into_iter().map(String::from).collect(),
            ..config
        };
        checked.validate_search_parameters()?;

        let rng = StdRng::seed_from_u64(checked.random_seed);
        let stop = StopController::new(StopHandle::new(), checked.max_runtime_seconds);

        Ok(Self {
            config: checked,
            registry,
            rng,
            stop,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Handle for aborting the run between generations from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.handle()
    }

    /// Run the generational loop to completion or early abort.
    ///
    /// The random source keeps its state across calls, so a second `run` on
    /// the same engine continues the stream rather than replaying it.
    pub fn run<D, C>(&mut self, data: &D, mut callback: C) -> Result<EvolutionOutcome>
    where
        D: Dataset + Sync,
        C: ProgressCallback,
    {
        data.check_schema()?;
        self.stop.restart_clock();

        let Self {
            config,
            registry,
            rng,
            stop,
        } = self;
        let generator = ProgramGenerator::new(registry, data.feature_names())?;

        let mut population = initialize_population(&generator, config.population_size, rng);
        let mut best = BestSoFar::new();
        let mut generations_completed = 0;
        let mut stopped_early = false;

        for generation in 0..config.generations {
            callback.on_generation_start(generation);

            let scored = evaluate_population(&population, data, config, &mut callback)?;
            for (program, (predictions, score)) in population.iter().zip(&scored) {
                if best.offer(program, *score, predictions, generation) {
                    log::debug!(
                        "New best {:.6} in generation {}: {}",
                        score,
                        generation,
                        program.render()
                    );
                }
            }

            let fitness: Vec<f64> = scored.iter().map(|(_, score)| *score).collect();
            drop(scored);

            let best_entry = best.get().ok_or_else(|| {
                SymgpError::StructuralInvariant("No individual was scored".to_string())
            })?;
            let report = GenerationReport {
                generation,
                best_score: best_entry.score,
                median_score: median(&fitness).unwrap_or(f64::INFINITY),
                best_program_rendered: best_entry.program.render(),
            };
            callback.on_generation_complete(&report);
            generations_completed = generation + 1;

            if generations_completed == config.generations {
                break;
            }
            if stop.should_stop() {
                log::warn!(
                    "Stopping early after {} of {} generations",
                    generations_completed,
                    config.generations
                );
                stopped_early = true;
                break;
            }

            population = create_next_generation(&population, &fitness, &generator, config, rng)?;
        }

        let best = best.into_inner().ok_or_else(|| {
            SymgpError::StructuralInvariant("Run finished without a best program".to_string())
        })?;
        log::debug!(
            "Run finished after {} generations, best found in generation {}",
            generations_completed,
            best.generation
        );

        Ok(EvolutionOutcome {
            program: best.program,
            score: best.score,
            predictions: best.predictions,
            generations_completed,
            stopped_early,
        })
    }
}

/// One-shot entry point: build an engine from `config` and run it.
pub fn run<D, C>(config: &EvolutionConfig, data: &D, callback: C) -> Result<EvolutionOutcome>
where
    D: Dataset + Sync,
    C: ProgressCallback,
{
    EvolutionEngine::new(config.clone())?.run(data, callback)
}

fn initialize_population<R: Rng>(
    generator: &ProgramGenerator<'_>,
    size: usize,
    rng: &mut R,
) -> Vec<Program> {
    (0..size)
        .map(|_| {
            Program::with_metadata(generator.random_program(0, rng), ProgramOrigin::Random, 0)
        })
        .collect()
}

fn score_program<D: Dataset>(
    program: &Program,
    data: &D,
    complexity_exponent: f64,
) -> Result<Scored> {
    let predictions = program.predict(data)?;
    let score = fitness(program.size(), &predictions, data.targets(), complexity_exponent)?;
    Ok((predictions, score))
}

/// Score every program. Evaluation draws no randomness, so the parallel and
/// sequential paths give identical results in population order.
fn evaluate_population<D, C>(
    population: &[Program],
    data: &D,
    config: &EvolutionConfig,
    callback: &mut C,
) -> Result<Vec<Scored>>
where
    D: Dataset + Sync,
    C: ProgressCallback,
{
    let total = population.len();
    let exponent = config.complexity_exponent;

    if config.parallel_evaluation {
        let scored = population
            .par_iter()
            .map(|program| score_program(program, data, exponent))
            .collect::<Result<Vec<_>>>()?;
        callback.on_program_evaluated(total, total);
        Ok(scored)
    } else {
        population
            .iter()
            .enumerate()
            .map(|(i, program)| -> Result<Scored> {
                let scored = score_program(program, data, exponent)?;
                callback.on_program_evaluated(i + 1, total);
                Ok(scored)
            })
            .collect()
    }
}

fn create_next_generation<R: Rng>(
    population: &[Program],
    fitness: &[f64],
    generator: &ProgramGenerator<'_>,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<Vec<Program>> {
    // Crossover happens when the draw exceeds this threshold.
    let crossover_threshold = 1.0 - config.crossover_probability;
    let mut next_generation = Vec::with_capacity(config.population_size);
    let mut crossovers = 0usize;

    while next_generation.len() < config.population_size {
        let parent1 = tournament_selection(population, fitness, config.tournament_size, rng)?;
        let offspring = if rng.gen::<f64>() > crossover_threshold {
            let parent2 = tournament_selection(population, fitness, config.tournament_size, rng)?;
            crossovers += 1;
            crossover(parent1, parent2, rng)?
        } else {
            mutate(parent1, generator, rng)?
        };
        next_generation.push(offspring);
    }

    log::debug!(
        "Bred {} offspring: {} crossover, {} mutation",
        next_generation.len(),
        crossovers,
        next_generation.len() - crossovers
    );
    Ok(next_generation)
}
