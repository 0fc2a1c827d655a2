//! Record id generation.
//!
//! Ids are decimal strings allocated like an autoincrement column: one more
//! than the highest numeric id already present. Non-numeric ids (imported
//! from other sources) are ignored.

pub fn next_id<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::next_id;

    #[test]
    fn starts_at_one() {
        assert_eq!(next_id(std::iter::empty()), "1");
    }

    #[test]
    fn skips_non_numeric_ids() {
        assert_eq!(next_id(["3", "salary-alert-1-0-2025", "12"]), "13");
    }
}
