/// Contains Config properties which will be used by a GraphStore
#[derive(Clone, Debug)]
pub struct GraphConfig {
    /// How many output pins a single value request may chain through before
    /// it gives up and yields the empty value
    pub max_evaluation_depth: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_evaluation_depth: 256,
        }
    }
}
