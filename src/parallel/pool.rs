// rayon thread-pool sizing

/// Sizes the global rayon pool so that `workers` co-located workers share the
/// machine's cores instead of each assuming it owns all of them.
///
/// Only the first call has an effect; the global pool cannot be rebuilt.
pub fn init_thread_pool(workers: usize) {
    let threads = (num_cpus::get() / workers.max(1)).max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
