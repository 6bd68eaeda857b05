//! Tiling parameters.

use framegrid_core::Axis;

/// Parameters of one composition.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingConfig {
    /// Frames per stack
    pub stack_length: usize,
    /// Direction frames are concatenated in within a stack
    pub stack_axis: Axis,
    /// Optional resize of the final grid, in percent
    pub scale_percent: Option<f64>,
    /// Optional output name prefix
    pub prefix: Option<String>,
}

impl TilingConfig {
    /// Unscaled, unprefixed configuration.
    pub fn new(stack_length: usize, stack_axis: Axis) -> Self {
        Self {
            stack_length,
            stack_axis,
            scale_percent: None,
            prefix: None,
        }
    }

    /// Scales the final grid by `percent`.
    pub fn with_scale(mut self, percent: f64) -> Self {
        self.scale_percent = Some(percent);
        self
    }

    /// Prefixes the output name, e.g. with the input directory name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into()).filter(|p: &String| !p.is_empty());
        self
    }

    /// The scale that actually changes the grid: `None` for no scale or 100%.
    pub fn effective_scale(&self) -> Option<f64> {
        self.scale_percent.filter(|p| *p != 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_scale() {
        let config = TilingConfig::new(10, Axis::Vertical);
        assert_eq!(config.effective_scale(), None);
        assert_eq!(config.clone().with_scale(100.0).effective_scale(), None);
        assert_eq!(config.with_scale(50.0).effective_scale(), Some(50.0));
    }

    #[test]
    fn test_empty_prefix_is_none() {
        let config = TilingConfig::new(1, Axis::Horizontal).with_prefix("");
        assert_eq!(config.prefix, None);
    }
}
