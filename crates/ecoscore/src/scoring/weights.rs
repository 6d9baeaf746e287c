//! Editable criterion weights for the custom strategy, with an undo/redo
//! history of changes.

use super::criteria::{Criterion, ScoringParams};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightConfig {
    weights: BTreeMap<Criterion, f64>,
}

impl WeightConfig {
    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        self.weights.get(&criterion).copied()
    }

    /// Returns the weight that was replaced, if any.
    pub fn set(&mut self, criterion: Criterion, weight: f64) -> Option<f64> {
        self.weights.insert(criterion, weight)
    }

    pub fn remove(&mut self, criterion: Criterion) -> Option<f64> {
        self.weights.remove(&criterion)
    }

    pub fn weights(&self) -> &BTreeMap<Criterion, f64> {
        &self.weights
    }

    /// Parameters accepted by the `custom` strategy.
    pub fn to_params(&self) -> ScoringParams {
        self.weights
            .iter()
            .map(|(criterion, weight)| (criterion.as_str().to_string(), *weight))
            .collect()
    }
}

/// One reversible weight update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightChange {
    pub criterion: Criterion,
    pub new_weight: f64,
    previous: Option<f64>,
}

impl WeightChange {
    fn new(criterion: Criterion, new_weight: f64) -> Self {
        Self {
            criterion,
            new_weight,
            previous: None,
        }
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    fn apply(&mut self, config: &mut WeightConfig) {
        self.previous = config.set(self.criterion, self.new_weight);
    }

    fn revert(&self, config: &mut WeightConfig) {
        match self.previous {
            Some(weight) => {
                config.set(self.criterion, weight);
            }
            None => {
                config.remove(self.criterion);
            }
        }
    }

    pub fn describe(&self) -> String {
        match self.previous {
            Some(previous) => format!(
                "update weight '{}' from {} to {}",
                self.criterion, previous, self.new_weight
            ),
            None => format!("set weight '{}' to {}", self.criterion, self.new_weight),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightLogEntry {
    pub description: String,
    pub executed_at: DateTime<Utc>,
}

/// Weight configuration plus the stack of changes applied to it. Executing a
/// new change discards anything that could have been redone.
#[derive(Clone, Default)]
pub struct WeightHistory {
    config: WeightConfig,
    applied: Vec<(WeightChange, DateTime<Utc>)>,
    undone: Vec<WeightChange>,
    listeners: Vec<Arc<dyn WeightListener>>,
}

/// Receives the full configuration after every execute, undo or redo.
pub trait WeightListener: Send + Sync {
    fn weights_changed(&self, config: &WeightConfig);
}

impl<F> WeightListener for F
where
    F: Fn(&WeightConfig) + Send + Sync,
{
    fn weights_changed(&self, config: &WeightConfig) {
        self(config)
    }
}

impl WeightHistory {
    pub fn new(config: WeightConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn subscribe(&mut self, listener: impl WeightListener + 'static) {
        self.listeners.push(Arc::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener.weights_changed(&self.config);
        }
    }

    pub fn config(&self) -> &WeightConfig {
        &self.config
    }

    pub fn execute(&mut self, criterion: Criterion, weight: f64) {
        let mut change = WeightChange::new(criterion, weight);
        change.apply(&mut self.config);
        self.applied.push((change, Utc::now()));
        self.undone.clear();
        self.notify();
    }

    pub fn undo(&mut self) -> bool {
        match self.applied.pop() {
            Some((change, _)) => {
                change.revert(&mut self.config);
                self.undone.push(change);
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(mut change) => {
                change.apply(&mut self.config);
                self.applied.push((change, Utc::now()));
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn log(&self) -> Vec<WeightLogEntry> {
        self.applied
            .iter()
            .map(|(change, executed_at)| WeightLogEntry {
                description: change.describe(),
                executed_at: *executed_at,
            })
            .collect()
    }
}

impl std::fmt::Debug for WeightHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightHistory")
            .field("config", &self.config)
            .field("applied", &self.applied.len())
            .field("undone", &self.undone.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
