/// Use mimalloc as the global allocator. 2-3x faster than glibc malloc
/// for the small allocations on the CLI path; the streaming buffer is a
/// single large allocation either way.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod hash;
