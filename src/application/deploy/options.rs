//! Deploy Options
//!
//! Configuration types for deployment attempts.

use crate::domain::value_objects::ExclusionRules;

/// Stream buffer used when copying a file between hosts
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Options for the deployment orchestrator
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Substrings that keep staged files off the live host
    pub exclusions: ExclusionRules,
    /// Copy buffer size in bytes (never zero)
    pub buffer_size: usize,
    /// Treat per-file backup/copy failures as fatal to the attempt
    pub strict: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DeployOptions {
    pub fn new() -> Self {
        Self {
            exclusions: ExclusionRules::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            strict: false,
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionRules) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
