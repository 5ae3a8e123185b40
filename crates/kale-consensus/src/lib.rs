pub mod check_conditions;
pub mod condition_sanitizers;
pub mod conditions;
pub mod consensus_constants;
pub mod generator_types;
pub mod get_puzzle_and_solution;
pub mod interpreter;
pub mod npc_result;
pub mod opcodes;
pub mod run_block_generator;
pub mod sanitize_int;
pub mod validation_error;
