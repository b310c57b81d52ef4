use rayon::prelude::*;

/// Apply `body` to every replica, optionally in parallel, collecting the
/// results in replica order.
///
/// When `sequential` is true, replicas are processed on the current thread
/// (no rayon overhead, best when an outer level of parallelism already
/// saturates the cores).
pub fn par_over_replicas<T, U>(
    replicas: &mut [T],
    sequential: bool,
    body: impl Fn(&mut T) -> U + Send + Sync,
) -> Vec<U>
where
    T: Send,
    U: Send,
{
    if sequential {
        replicas.iter_mut().map(body).collect()
    } else {
        replicas.par_iter_mut().map(body).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_result_both_modes() {
        let mut a: Vec<u64> = (0..64).collect();
        let mut b = a.clone();
        let seq = par_over_replicas(&mut a, true, |x| {
            *x *= 3;
            *x + 1
        });
        let par = par_over_replicas(&mut b, false, |x| {
            *x *= 3;
            *x + 1
        });
        assert_eq!(seq, par);
        assert_eq!(a, b);
        assert_eq!(seq[5], 16);
    }
}
