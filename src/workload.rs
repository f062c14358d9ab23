//! Workload redistribution: splitting 100% of a person's capacity across
//! their assignments.

use sqlx::SqliteConnection;

use crate::db::DbError;

/// Split 100 percent into `count` integer shares.
///
/// Largest-remainder apportionment: every share gets `100 / count`, and the
/// leftover points go to the earliest shares, one each. The result always
/// sums to exactly 100 (empty for a count of zero), so no rounding drift can
/// accumulate.
pub fn apportion(count: usize) -> Vec<i64> {
    let n = count as i64;
    if n == 0 {
        return Vec::new();
    }
    let base = 100 / n;
    let remainder = 100 - base * n;
    (0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Rewrite the quantities of one person's assignments so they sum to 100.
///
/// Assignments are walked in creation order (ascending id), so the extra
/// remainder points always land on the earliest-created assignments and the
/// result is deterministic. Runs on the caller's connection; callers wrap
/// this in their mutation's transaction so the rewrite is all-or-nothing.
pub(crate) async fn recompute_person(
    conn: &mut SqliteConnection,
    person_id: i64,
) -> Result<(), DbError> {
    let ids: Vec<i64> =
        sqlx::query_scalar("SELECT id FROM assignments WHERE person_id = ? ORDER BY id")
            .bind(person_id)
            .fetch_all(&mut *conn)
            .await?;

    let shares = apportion(ids.len());
    for (assignment_id, quantity) in ids.into_iter().zip(shares) {
        sqlx::query("UPDATE assignments SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(assignment_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::apportion;

    #[test]
    fn splits_evenly_when_divisible() {
        assert_eq!(apportion(1), vec![100]);
        assert_eq!(apportion(2), vec![50, 50]);
        assert_eq!(apportion(4), vec![25, 25, 25, 25]);
        assert_eq!(apportion(5), vec![20, 20, 20, 20, 20]);
    }

    #[test]
    fn remainder_goes_to_earliest_shares() {
        assert_eq!(apportion(3), vec![34, 33, 33]);
        assert_eq!(apportion(6), vec![17, 17, 17, 17, 16, 16]);
        assert_eq!(apportion(7), vec![15, 15, 14, 14, 14, 14, 14]);
    }

    #[test]
    fn zero_count_yields_no_shares() {
        assert!(apportion(0).is_empty());
    }

    #[test]
    fn always_sums_to_one_hundred() {
        for count in 1..=150 {
            let shares = apportion(count);
            assert_eq!(shares.len(), count);
            assert_eq!(shares.iter().sum::<i64>(), 100, "count = {count}");
            assert!(shares.iter().all(|&q| q >= 0));
        }
    }
}
