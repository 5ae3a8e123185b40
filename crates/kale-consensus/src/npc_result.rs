use crate::conditions::Condition;
use crate::opcodes::ConditionOpcode;
use crate::validation_error::ErrorCode;
use kale_protocol::Bytes32;

/// Name, puzzle hash and conditions of one coin spent by a block. This is the
/// per-coin output of running the block generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NPC {
    pub coin_name: Bytes32,
    pub puzzle_hash: Bytes32,
    // insertion ordered: opcodes appear in the order first emitted and the
    // conditions under each opcode keep their original relative order
    pub conditions: Vec<(ConditionOpcode, Vec<Condition>)>,
}

/// The outcome of running a block generator. On error the NPC list is empty
/// and the cost is zero. On success the cost is the VM execution cost; the
/// byte- and per-condition costs are only charged against the budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NPCResult {
    pub error: Option<ErrorCode>,
    pub npc_list: Vec<NPC>,
    pub cost: u64,
}
