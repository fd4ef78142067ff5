//! Roster partitioning by accessibility priority.

use crate::models::Participant;

/// Splits the roster into `(accessible, regular)` sub-sequences.
///
/// Both halves keep the input relative order. With prioritization off,
/// `accessible` is empty and `regular` is the whole roster.
pub fn partition<'a, I>(
    participants: I,
    prioritize_accessibility: bool,
) -> (Vec<&'a Participant>, Vec<&'a Participant>)
where
    I: IntoIterator<Item = &'a Participant>,
{
    if !prioritize_accessibility {
        return (Vec::new(), participants.into_iter().collect());
    }
    participants
        .into_iter()
        .partition(|p| p.is_accessibility_priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(group: &[&Participant]) -> Vec<i64> {
        group.iter().map(|p| p.id).collect()
    }

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new(1),
            Participant::accessible(2),
            Participant::new(3),
            Participant::accessible(4),
            Participant::new(5),
        ]
    }

    #[test]
    fn test_partition_preserves_order() {
        let people = roster();
        let (acc, reg) = partition(&people, true);
        assert_eq!(ids(&acc), vec![2, 4]);
        assert_eq!(ids(&reg), vec![1, 3, 5]);
    }

    #[test]
    fn test_partition_disabled() {
        let people = roster();
        let (acc, reg) = partition(&people, false);
        assert!(acc.is_empty());
        assert_eq!(ids(&reg), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_partition_from_references() {
        let people = roster();
        let subset: Vec<&Participant> = people.iter().skip(1).collect();
        let (acc, reg) = partition(subset.iter().copied(), true);
        assert_eq!(ids(&acc), vec![2, 4]);
        assert_eq!(ids(&reg), vec![3, 5]);
    }

    #[test]
    fn test_partition_empty() {
        let empty: Vec<Participant> = Vec::new();
        let (acc, reg) = partition(&empty, true);
        assert!(acc.is_empty());
        assert!(reg.is_empty());
    }
}
