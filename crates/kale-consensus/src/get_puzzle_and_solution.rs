use crate::generator_types::BlockGenerator;
use crate::interpreter::GeneratorInterpreter;
use crate::run_block_generator::setup_generator_args;
use crate::validation_error::{first, rest, ValidationErr};
use clvmr::allocator::{Allocator, NodePtr};
use clvmr::cost::Cost;
use clvmr::reduction::Reduction;
use clvmr::serde::node_from_bytes;
use kale_protocol::Bytes32;

/// Runs the specialized single-coin module over a block generator to recover
/// the puzzle and solution of the coin named `coin_name`. Interpreter
/// failures, including the coin not being found, are passed through. No cost
/// is reported; `max_cost` only bounds execution.
pub fn get_puzzle_and_solution_for_coin<I: GeneratorInterpreter>(
    a: &mut Allocator,
    interpreter: &I,
    generator: &BlockGenerator,
    max_cost: Cost,
    coin_name: Bytes32,
) -> Result<(NodePtr, NodePtr), ValidationErr> {
    let (program, args) = if generator.generator_refs.is_empty() {
        (node_from_bytes(a, generator.program.as_slice())?, a.nil())
    } else {
        setup_generator_args(a, generator)?
    };

    let Reduction(_cost, result) =
        interpreter.run_for_single_coin(a, max_cost, program, args, &coin_name)?;

    // the result is expected to be the (puzzle solution) pair of the coin
    let puzzle = first(a, result)?;
    let solution = first(a, rest(a, result)?)?;
    Ok((puzzle, solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus_constants::DEFAULT_CONSTANTS;
    use crate::validation_error::ErrorCode;
    use clvmr::error::EvalErr;
    use clvmr::reduction::Response;

    const MAX_COST: u64 = DEFAULT_CONSTANTS.max_block_cost_clvm;
    const NIL_PROGRAM: &[u8] = &[0x80];

    // hands back (puzzle solution) when asked for the coin it knows about,
    // and raises otherwise, like the single-coin module does
    struct SingleCoinStub {
        coin_name: Bytes32,
        malformed: bool,
    }

    impl GeneratorInterpreter for SingleCoinStub {
        fn run_with_cost(
            &self,
            _a: &mut Allocator,
            _max_cost: Cost,
            _program: NodePtr,
            _args: NodePtr,
        ) -> Response {
            unimplemented!()
        }

        fn run_safe_with_cost(
            &self,
            _a: &mut Allocator,
            _max_cost: Cost,
            _program: NodePtr,
            _args: NodePtr,
        ) -> Response {
            unimplemented!()
        }

        fn run_for_single_coin(
            &self,
            a: &mut Allocator,
            _max_cost: Cost,
            _program: NodePtr,
            _args: NodePtr,
            coin_name: &Bytes32,
        ) -> Response {
            if *coin_name != self.coin_name {
                return Err(EvalErr::Raise(NodePtr::NIL));
            }
            if self.malformed {
                return Ok(Reduction(0, a.new_atom(b"garbage")?));
            }
            let puzzle = a.new_atom(b"puzzle")?;
            let solution = a.new_atom(b"solution")?;
            let tail = a.new_pair(solution, NodePtr::NIL)?;
            let result = a.new_pair(puzzle, tail)?;
            Ok(Reduction(0, result))
        }
    }

    fn known_coin() -> Bytes32 {
        Bytes32::from(&[7; 32])
    }

    fn stub() -> SingleCoinStub {
        SingleCoinStub {
            coin_name: known_coin(),
            malformed: false,
        }
    }

    #[test]
    fn test_coin_found() {
        let mut a = Allocator::new();
        let generator = BlockGenerator::new(NIL_PROGRAM.into(), vec![]);
        let (puzzle, solution) =
            get_puzzle_and_solution_for_coin(&mut a, &stub(), &generator, MAX_COST, known_coin())
                .unwrap();
        assert_eq!(a.atom(puzzle).as_ref(), b"puzzle");
        assert_eq!(a.atom(solution).as_ref(), b"solution");
    }

    #[test]
    fn test_coin_not_found() {
        let mut a = Allocator::new();
        let generator = BlockGenerator::new(NIL_PROGRAM.into(), vec![]);
        let err = get_puzzle_and_solution_for_coin(
            &mut a,
            &stub(),
            &generator,
            MAX_COST,
            Bytes32::from(&[8; 32]),
        )
        .unwrap_err();
        assert_eq!(err.1, ErrorCode::GeneratorRuntimeError);
    }

    #[test]
    fn test_malformed_result() {
        let mut a = Allocator::new();
        let generator = BlockGenerator::new(NIL_PROGRAM.into(), vec![]);
        let interpreter = SingleCoinStub {
            coin_name: known_coin(),
            malformed: true,
        };
        let err = get_puzzle_and_solution_for_coin(
            &mut a,
            &interpreter,
            &generator,
            MAX_COST,
            known_coin(),
        )
        .unwrap_err();
        assert_eq!(err.1, ErrorCode::InvalidCondition);
    }

    #[test]
    fn test_invalid_program_bytes() {
        let mut a = Allocator::new();
        // a truncated serialization never reaches the interpreter
        let generator = BlockGenerator::new(vec![0xff_u8].into(), vec![]);
        let err =
            get_puzzle_and_solution_for_coin(&mut a, &stub(), &generator, MAX_COST, known_coin())
                .unwrap_err();
        assert_eq!(err.1, ErrorCode::GeneratorRuntimeError);
    }
}
