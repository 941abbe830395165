use crate::query_console::domain::model::value_objects::query_constraints::QueryConstraints;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct QueryExecutionOptions {
    pub max_rows: u32,
    pub timeout_ms: u64,
    pub read_only: bool,
    pub require_where: bool,
}

impl QueryExecutionOptions {
    /// Smallest positive cap among the global limit, the policy constraint and the request.
    pub fn resolve(
        global_max_rows: u32,
        global_timeout_ms: u64,
        constraints: &QueryConstraints,
        requested_max_rows: Option<u32>,
        requested_timeout_ms: Option<u64>,
    ) -> Self {
        Self {
            max_rows: tightest(
                global_max_rows,
                [Some(constraints.max_rows), requested_max_rows],
            ),
            timeout_ms: tightest(
                global_timeout_ms,
                [Some(constraints.timeout_ms), requested_timeout_ms],
            ),
            read_only: constraints.read_only,
            require_where: constraints.require_where,
        }
    }
}

fn tightest<T: Copy + Ord + Default>(base: T, candidates: [Option<T>; 2]) -> T {
    let zero = T::default();
    candidates
        .into_iter()
        .flatten()
        .filter(|value| *value > zero)
        .fold(base, |current, value| {
            if current == zero { value } else { current.min(value) }
        })
}
