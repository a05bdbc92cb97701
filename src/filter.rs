use crate::models::TicketSolution;

/// Keeps the solutions whose journey contains at least one segment matching
/// the configured criteria: category in `categories` or denomination in
/// `denominations`. The two criteria are OR'd, as is the check across the
/// segment list. Input order is preserved.
pub fn matching_solutions(
    solutions: Vec<TicketSolution>,
    categories: &[String],
    denominations: &[String],
) -> Vec<TicketSolution> {
    solutions
        .into_iter()
        .filter(|solution| {
            solution.solution.trains.iter().any(|train| {
                categories.iter().any(|c| c == &train.train_category)
                    || denominations.iter().any(|d| d == &train.denomination)
            })
        })
        .collect()
}
