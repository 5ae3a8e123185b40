use clvmr::allocator::{Allocator, NodePtr};
use clvmr::cost::Cost;
use clvmr::reduction::Response;
use kale_protocol::Bytes32;

/// The sandboxed VM that executes generator programs. It is injected rather
/// than imported so that callers pick the dialect revision and tests can
/// substitute canned result trees. Implementations must be deterministic and
/// must charge all work against `max_cost`, which bounds execution.
pub trait GeneratorInterpreter {
    /// Runs the generator with the permissive dialect, used when validating
    /// blocks. Unknown operators are accepted for forward compatibility.
    fn run_with_cost(
        &self,
        a: &mut Allocator,
        max_cost: Cost,
        program: NodePtr,
        args: NodePtr,
    ) -> Response;

    /// Runs the generator with the strict dialect, used by the mempool.
    /// Unknown operators fail the program.
    fn run_safe_with_cost(
        &self,
        a: &mut Allocator,
        max_cost: Cost,
        program: NodePtr,
        args: NodePtr,
    ) -> Response;

    /// Runs the specialized module that scans the generator output for one
    /// coin and returns its (puzzle solution) pair.
    fn run_for_single_coin(
        &self,
        a: &mut Allocator,
        max_cost: Cost,
        program: NodePtr,
        args: NodePtr,
        coin_name: &Bytes32,
    ) -> Response;
}
