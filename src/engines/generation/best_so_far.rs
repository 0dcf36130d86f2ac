use super::ast::Program;

/// Lowest-fitness individual seen so far in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BestEntry {
    pub program: Program,
    pub score: f64,
    pub predictions: Vec<f64>,
    /// Generation in which this score was first observed.
    pub generation: usize,
}

/// Replace-if-lower record of the best individual, never reset mid-run.
#[derive(Debug, Clone, Default)]
pub struct BestSoFar {
    best: Option<BestEntry>,
}

impl BestSoFar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a scored program. The first offer is always kept; later offers
    /// replace the record only when strictly lower.
    pub fn offer(
        &mut self,
        program: &Program,
        score: f64,
        predictions: &[f64],
        generation: usize,
    ) -> bool {
        let improves = match &self.best {
            None => true,
            Some(current) => score < current.score,
        };
        if improves {
            self.best = Some(BestEntry {
                program: program.clone(),
                score,
                predictions: predictions.to_vec(),
                generation,
            });
        }
        improves
    }

    pub fn score(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.score)
    }

    pub fn get(&self) -> Option<&BestEntry> {
        self.best.as_ref()
    }

    pub fn into_inner(self) -> Option<BestEntry> {
        self.best
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Node;

    #[test]
    fn test_only_strict_improvements_replace() {
        let a = Program::new(Node::leaf("a"));
        let b = Program::new(Node::leaf("b"));
        let mut best = BestSoFar::new();
        assert!(best.is_empty());

        assert!(best.offer(&a, 2.0, &[1.0], 0));
        assert!(!best.offer(&b, 2.0, &[2.0], 0));
        assert!(!best.offer(&b, 3.0, &[2.0], 1));
        assert_eq!(best.get().map(|e| e.program.render()), Some("a".to_string()));

        assert!(best.offer(&b, 1.0, &[2.0], 2));
        let entry = best.into_inner().unwrap();
        assert_eq!(entry.score, 1.0);
        assert_eq!(entry.generation, 2);
        assert_eq!(entry.predictions, vec![2.0]);
    }

    #[test]
    fn test_infinite_first_score_is_kept() {
        let a = Program::new(Node::leaf("a"));
        let mut best = BestSoFar::new();
        assert!(best.offer(&a, f64::INFINITY, &[f64::INFINITY], 0));
        assert_eq!(best.score(), Some(f64::INFINITY));
    }
}
