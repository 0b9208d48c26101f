/*! Block contract towards the surrounding framework.

The framework owns scheduling and buffers. A block only describes
what its ports look like, how many items it wants per call, and does
the work when asked.
*/

/// Port count and item size of one side of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoSignature {
    min_streams: usize,
    max_streams: usize,
    item_size: usize,
}

impl IoSignature {
    /// Create a new signature. `item_size` is in bytes.
    pub fn new(min_streams: usize, max_streams: usize, item_size: usize) -> Self {
        Self {
            min_streams,
            max_streams,
            item_size,
        }
    }

    /// Minimum number of connected streams.
    #[must_use]
    pub fn min_streams(&self) -> usize {
        self.min_streams
    }

    /// Maximum number of connected streams.
    #[must_use]
    pub fn max_streams(&self) -> usize {
        self.max_streams
    }

    /// Size of one item, in bytes.
    #[must_use]
    pub fn item_size(&self) -> usize {
        self.item_size
    }
}

/**
Block trait, that must be implemented for all blocks.
*/
pub trait Block {
    /** Name of block

    Not name of *instance* of block. But it may include the
    type. E.g. `MultiplyConstV<fc32>`.
     */
    fn block_name(&self) -> &str;

    /// Signature of the input side.
    fn input_signature(&self) -> IoSignature;

    /// Signature of the output side.
    fn output_signature(&self) -> IoSignature;

    /// The framework must only call `work()` with a number of output
    /// items that is a multiple of this.
    fn output_multiple(&self) -> usize {
        1
    }
}

/**
Block producing exactly one output item per input item.

Items are frames of one or more samples of type `T`, as described by
the block's signatures.
*/
pub trait SyncBlock<T>: Block {
    /** Block work function

    # Args
    * `noutput`: Number of items to produce. A multiple of
      `output_multiple()`.
    * `input`: At least `noutput` items of input.
    * `out`: Room for at least `noutput` items.

    Returns the number of items produced.
     */
    fn work(&mut self, noutput: usize, input: &[T], out: &mut [T]) -> usize;
}
