use std::cmp::Ordering;

/// Sort items by descending score.
///
/// The sort is stable, so equal scores keep their input order. NaN scores
/// are pushed to the end so they never rank first.
pub fn sort_by_score_desc<T, F>(items: &mut [T], score: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let sa = score(a);
        let sb = score(b);
        match (sa.is_nan(), sb.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => sb.partial_cmp(&sa).unwrap_or(Ordering::Equal),
        }
    });
}
