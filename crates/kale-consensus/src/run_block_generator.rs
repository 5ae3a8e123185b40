use crate::condition_sanitizers::{parse_amount, sanitize_hash};
use crate::conditions::{conditions_by_opcode, parse_condition, Condition};
use crate::generator_types::BlockGenerator;
use crate::interpreter::GeneratorInterpreter;
use crate::npc_result::{NPCResult, NPC};
use crate::validation_error::{first, next, rest, ErrorCode, ValidationErr};
use clvmr::allocator::{Allocator, NodePtr};
use clvmr::cost::Cost;
use clvmr::reduction::Reduction;
use clvmr::serde::node_from_bytes;
use kale_protocol::Coin;

pub fn subtract_cost(
    a: &Allocator,
    cost_left: &mut Cost,
    subtract: Cost,
) -> Result<(), ValidationErr> {
    if subtract > *cost_left {
        Err(ValidationErr(a.nil(), ErrorCode::BlockCostExceedsMax))
    } else {
        *cost_left -= subtract;
        Ok(())
    }
}

/// Deserializes the generator program and prepares its argument list: a
/// single argument holding the list of reference blocks.
pub fn setup_generator_args(
    a: &mut Allocator,
    generator: &BlockGenerator,
) -> Result<(NodePtr, NodePtr), ValidationErr> {
    let program = node_from_bytes(a, generator.program.as_slice())?;

    // iterate in reverse order since we're building a linked list from
    // the tail
    let mut refs = a.nil();
    for g in generator.generator_refs.iter().rev() {
        let ref_gen = a.new_atom(g.as_slice())?;
        refs = a.new_pair(ref_gen, refs)?;
    }

    let args = a.new_pair(refs, a.nil())?;
    Ok((program, args))
}

// The generator output is a list whose first element is the list of spends.
// Each spend has the following structure:

// (<coin-parent-id> <coin-puzzle-hash> <coin-amount> (CONDITION-LIST ...) ...)

// where ... is possible extra fields that are currently ignored.

fn run_generator<I: GeneratorInterpreter>(
    a: &mut Allocator,
    interpreter: &I,
    generator: &BlockGenerator,
    max_cost: Cost,
    cost_per_byte: Cost,
    safe_mode: bool,
) -> Result<(Vec<NPC>, Cost), ValidationErr> {
    let mut cost_left = max_cost;

    // program parsing precedes the byte-cost check: a malformed generator is
    // a runtime error even when it is also too large for the budget
    let (program, args) = setup_generator_args(a, generator)?;

    let byte_cost = generator.program.len() as u64 * cost_per_byte;
    subtract_cost(a, &mut cost_left, byte_cost)?;

    let result = if safe_mode {
        interpreter.run_safe_with_cost(a, cost_left, program, args)
    } else {
        interpreter.run_with_cost(a, cost_left, program, args)
    };
    // any interpreter fault, including running out of cost mid-program,
    // rejects the block as a whole
    let Reduction(clvm_cost, output) =
        result.map_err(|_| ValidationErr(a.nil(), ErrorCode::GeneratorRuntimeError))?;

    subtract_cost(a, &mut cost_left, clvm_cost)?;

    let mut npc_list = Vec::<NPC>::new();
    let mut spends = first(a, output)?;

    while let Some((spend, tail)) = next(a, spends)? {
        spends = tail;

        let parent_id = sanitize_hash::<32>(a, first(a, spend)?, ErrorCode::InvalidParentId)?;
        let spend = rest(a, spend)?;
        let puzzle_hash = sanitize_hash::<32>(a, first(a, spend)?, ErrorCode::InvalidPuzzleHash)?;
        let spend = rest(a, spend)?;
        let amount = parse_amount(a, first(a, spend)?, ErrorCode::InvalidCoinAmount)?;
        let spend = rest(a, spend)?;
        let mut conditions = first(a, spend)?;

        let coin = Coin::new(parent_id, puzzle_hash, amount);

        let mut conditions_list = Vec::<Condition>::new();
        while let Some((cond, tail)) = next(a, conditions)? {
            conditions = tail;
            let (cost, cwa) = parse_condition(a, cond, safe_mode)?;
            subtract_cost(a, &mut cost_left, cost)?;
            if let Some(cwa) = cwa {
                conditions_list.push(cwa);
            }
        }

        npc_list.push(NPC {
            coin_name: coin.coin_id(),
            puzzle_hash: coin.puzzle_hash,
            conditions: conditions_by_opcode(conditions_list),
        });
    }

    Ok((npc_list, clvm_cost))
}

/// Executes the block generator and returns the spent coins with their
/// conditions. If the cost of the block (size, VM execution and conditions)
/// exceeds `max_cost` the run fails; `cost_per_byte` prices the serialized
/// size of the program. `safe_mode` selects the strict dialect for both the
/// interpreter and the condition parser, in which unknown operators and
/// conditions are failures. This is the mode used when accepting
/// transactions into the mempool.
///
/// All failures are reported in the returned `NPCResult`; budget exhaustion
/// observed by this function is distinguished from every other fault, which
/// is collapsed into `GeneratorRuntimeError`.
pub fn get_name_puzzle_conditions<I: GeneratorInterpreter>(
    a: &mut Allocator,
    interpreter: &I,
    generator: &BlockGenerator,
    max_cost: Cost,
    cost_per_byte: Cost,
    safe_mode: bool,
) -> NPCResult {
    match run_generator(a, interpreter, generator, max_cost, cost_per_byte, safe_mode) {
        Ok((npc_list, clvm_cost)) => NPCResult {
            error: None,
            npc_list,
            cost: clvm_cost,
        },
        Err(ValidationErr(_, ErrorCode::BlockCostExceedsMax)) => NPCResult {
            error: Some(ErrorCode::BlockCostExceedsMax),
            npc_list: Vec::new(),
            cost: 0,
        },
        Err(_) => NPCResult {
            error: Some(ErrorCode::GeneratorRuntimeError),
            npc_list: Vec::new(),
            cost: 0,
        },
    }
}
