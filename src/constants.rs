pub const OFFSET_BITS: u32 = 12;

pub const PAGE_SIZE: u64 = 1 << OFFSET_BITS;
pub const OFFSET_MASK: u64 = PAGE_SIZE - 1;

// Reference configuration of the trace driver
pub const DEFAULT_TLB_SIZE: usize = 8;
pub const DEFAULT_PAGE_COUNT: usize = 256;
pub const DEFAULT_NUM_FRAMES: usize = 32;

pub const DEFAULT_TRACE_PATH: &str = "input/trace.txt";
