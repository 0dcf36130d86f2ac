use super::ast::{Program, ProgramOrigin};
use super::generator::ProgramGenerator;
use super::navigator::select_node;
use crate::error::{Result, SymgpError};
use rand::Rng;

/// Tournament selection: best (lowest fitness) of `tournament_size` members
/// drawn uniformly with replacement.
///
/// Ties keep the earliest draw. A tournament as large as the population scans
/// every member instead of sampling, so it always returns the single best.
pub fn tournament_selection<'p, R: Rng>(
    population: &'p [Program],
    fitness: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> Result<&'p Program> {
    if population.is_empty() {
        return Err(SymgpError::Configuration(
            "Cannot run a tournament on an empty population".to_string(),
        ));
    }
    if population.len() != fitness.len() {
        return Err(SymgpError::StructuralInvariant(format!(
            "{} fitness values for {} programs",
            fitness.len(),
            population.len()
        )));
    }

    let best_idx = if tournament_size >= population.len() {
        (1..fitness.len()).fold(0, |best, i| if fitness[i] < fitness[best] { i } else { best })
    } else {
        let mut best_idx = rng.gen_range(0..population.len());
        for _ in 1..tournament_size {
            let idx = rng.gen_range(0..population.len());
            if fitness[idx] < fitness[best_idx] {
                best_idx = idx;
            }
        }
        best_idx
    };

    Ok(&population[best_idx])
}

/// Replace one subtree of a copy of `program` with a fresh random tree.
///
/// The replacement is grown from depth 0 regardless of where it lands.
pub fn mutate<R: Rng>(
    program: &Program,
    generator: &ProgramGenerator<'_>,
    rng: &mut R,
) -> Result<Program> {
    let mut offspring = program.root.clone();

    let selection = select_node(&offspring, rng);
    let edit_point = selection.edit_point()?.to_vec();
    let child_count = child_count_at(&offspring, &edit_point)?;

    let idx = rng.gen_range(0..child_count);
    let subtree = generator.random_program(0, rng);
    offspring.replace_child(&edit_point, idx, subtree)?;

    Ok(Program::with_metadata(
        offspring,
        ProgramOrigin::Mutation,
        program.metadata.generation + 1,
    ))
}

/// Splice a copy of a subtree of `donor` into a copy of `recipient`.
///
/// Neither parent is modified and the offspring shares no nodes with either.
pub fn crossover<R: Rng>(recipient: &Program, donor: &Program, rng: &mut R) -> Result<Program> {
    let mut offspring = recipient.root.clone();

    let recipient_selection = select_node(&offspring, rng);
    let donor_selection = select_node(&donor.root, rng);
    let edit_point = recipient_selection.edit_point()?.to_vec();
    let donor_point = donor_selection.edit_point()?;

    let child_count = child_count_at(&offspring, &edit_point)?;
    let idx = rng.gen_range(0..child_count);

    let graft = donor
        .root
        .get(donor_point)
        .ok_or_else(|| {
            SymgpError::StructuralInvariant(format!("No donor node at path {:?}", donor_point))
        })?
        .clone();
    offspring.replace_child(&edit_point, idx, graft)?;

    Ok(Program::with_metadata(
        offspring,
        ProgramOrigin::Crossover,
        recipient.metadata.generation + 1,
    ))
}

fn child_count_at(root: &crate::types::Node, path: &[usize]) -> Result<usize> {
    let node = root
        .get(path)
        .ok_or_else(|| SymgpError::StructuralInvariant(format!("No node at path {:?}", path)))?;
    match node.children().len() {
        0 => Err(SymgpError::StructuralInvariant(format!(
            "Edit point at path {:?} has no children",
            path
        ))),
        n => Ok(n),
    }
}
