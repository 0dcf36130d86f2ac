use super::traits::ConfigSection;
use crate::error::SymgpError;
use crate::functions::OperatorRegistry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,
    /// Chance an offspring comes from crossover rather than mutation. The
    /// engine draws `u` in `[0, 1)` and crosses over when
    /// `u > 1 - crossover_probability`.
    pub crossover_probability: f64,
    /// Exponent on node count in the fitness penalty.
    pub complexity_exponent: f64,
    pub random_seed: u64,
    /// Built-in operator names, in registry order.
    pub operators: Vec<String>,
    pub parallel_evaluation: bool,
    /// Wall-clock budget checked between generations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_runtime_seconds: Option<f64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            generations: 10,
            tournament_size: 3,
            crossover_probability: 0.3,
            complexity_exponent: 0.5,
            random_seed: 0,
            operators: OperatorRegistry::new()
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            parallel_evaluation: true,
            max_runtime_seconds: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), SymgpError> {
        self.validate_search_parameters()?;
        OperatorRegistry::from_names(&self.operators)?;
        Ok(())
    }
}

impl EvolutionConfig {
    /// Check every setting except the operator names, which only have to
    /// resolve when the registry is built from them.
    pub fn validate_search_parameters(&self) -> Result<(), SymgpError> {
        if self.population_size == 0 {
            return Err(SymgpError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        if self.generations == 0 {
            return Err(SymgpError::Configuration(
                "Number of generations must be at least 1".to_string()
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(SymgpError::Configuration(format!(
                "Tournament size must be between 1 and the population size ({}), got {}",
                self.population_size, self.tournament_size
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(SymgpError::Configuration(
                "Crossover probability must be between 0 and 1".to_string()
            ));
        }
        if !self.complexity_exponent.is_finite() || self.complexity_exponent < 0.0 {
            return Err(SymgpError::Configuration(
                "Complexity exponent must be finite and non-negative".to_string()
            ));
        }
        if let Some(seconds) = self.max_runtime_seconds {
            if !seconds.is_finite() || seconds <= 0.0 {
                return Err(SymgpError::Configuration(
                    "Maximum runtime must be a positive number of seconds".to_string()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population_size, 300);
        assert_eq!(config.operators.len(), 5);
    }

    #[test]
    fn test_rejects_zero_population() {
        let config = EvolutionConfig {
            population_size: 0,
            tournament_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SymgpError::Configuration(_))));
    }

    #[test]
    fn test_rejects_oversized_tournament() {
        let config = EvolutionConfig {
            population_size: 4,
            tournament_size: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_probability_and_exponent() {
        let config = EvolutionConfig {
            crossover_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvolutionConfig {
            complexity_exponent: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_operator() {
        let config = EvolutionConfig {
            operators: vec!["add".to_string(), "sqrt".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.validate_search_parameters().is_ok());
    }
}
