//! Candidate selection shared by the network and subnet resolvers

/// Pick the first candidate flagged by `is_preferred`, else the first
/// candidate in provider order. Provider order is not guaranteed stable.
pub fn pick_preferred<T, F>(candidates: Vec<T>, is_preferred: F) -> Option<T>
where
    F: Fn(&T) -> bool,
{
    let position = candidates.iter().position(is_preferred).unwrap_or(0);
    candidates.into_iter().nth(position)
}
