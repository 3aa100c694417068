/// Picks the hero subset of a recency-ordered list.
///
/// Items rated at least `min_rating` are ordered by rating, highest first,
/// keeping recency order between equal ratings. When nothing qualifies the
/// most recent items are used instead.
pub fn select_trending<T, F>(items: &[T], rating: F, min_rating: f64, limit: usize) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<f64>,
{
    let mut rated: Vec<(f64, &T)> = items
        .iter()
        .filter_map(|item| rating(item).map(|r| (r, item)))
        .filter(|(r, _)| *r >= min_rating)
        .collect();

    if rated.is_empty() {
        return items.iter().take(limit).cloned().collect();
    }

    // sort_by is stable, which keeps the incoming recency order for ties.
    rated.sort_by(|a, b| b.0.total_cmp(&a.0));
    rated.into_iter().take(limit).map(|(_, item)| item.clone()).collect()
}
