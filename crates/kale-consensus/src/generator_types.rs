use kale_protocol::Bytes;

/// The transactions generator of a block: the serialized generator program
/// together with the generator programs of the previous blocks it references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockGenerator {
    pub program: Bytes,
    pub generator_refs: Vec<Bytes>,
}

impl BlockGenerator {
    pub fn new(program: Bytes, generator_refs: Vec<Bytes>) -> Self {
        Self {
            program,
            generator_refs,
        }
    }
}
