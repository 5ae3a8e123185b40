use clvmr::cost::Cost;

/// The subset of the chain's consensus parameters the validator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusConstants {
    /// The maximum cost of a single block, covering its byte size, VM
    /// execution and conditions.
    pub max_block_cost_clvm: Cost,
    /// The cost charged per byte of serialized generator program.
    pub cost_per_byte: Cost,
}

pub const DEFAULT_CONSTANTS: ConsensusConstants = ConsensusConstants {
    max_block_cost_clvm: 11_000_000_000,
    cost_per_byte: 12_000,
};
