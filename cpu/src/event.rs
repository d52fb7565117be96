/// A progress event emitted by worker 0 during a build.
///
/// Purely advisory: nothing downstream depends on these being received, and
/// a build proceeds identically whether or not anyone is listening.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Worker 0 finished `done` of its `total` assigned rows.
    Progress { done: u64, total: u64 },
}
