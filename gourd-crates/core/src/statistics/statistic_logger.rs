use std::fmt::Display;

use itertools::Itertools;

use super::statistic_logging::log_statistic;

/// Logs statistics under a shared name prefix, e.g. `search_nodes`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new<Input: IntoIterator<Item = impl Display>>(name_prefix: Input) -> Self {
        Self {
            name_prefix: name_prefix.into_iter().join("_"),
        }
    }

    /// Returns a new [`StatisticLogger`] whose prefix is the current prefix followed by
    /// `addition_to_prefix`.
    pub fn attach_to_prefix(&self, addition_to_prefix: impl Display) -> Self {
        if self.name_prefix.is_empty() {
            Self {
                name_prefix: addition_to_prefix.to_string(),
            }
        } else {
            Self {
                name_prefix: format!("{}_{}", self.name_prefix, addition_to_prefix),
            }
        }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.name_prefix, value);
    }
}
