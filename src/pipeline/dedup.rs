use std::collections::HashSet;

use crate::model::RayHit;

/// Keeps the first hit for each distinct wall reference.
///
/// A ray usually reports several faces of the same wall (entry and exit
/// faces, layers of a compound wall). Only one opening is wanted per wall,
/// so later hits on an already seen [`WallRef`](crate::model::WallRef) are
/// dropped. Fed with hits in increasing distance order, the survivor for
/// each wall is its nearest hit. Relative order of survivors is preserved.
#[must_use]
pub fn dedup_hits<T>(hits: T) -> Vec<RayHit>
where
    T: IntoIterator<Item = RayHit>,
{
    let mut seen = HashSet::new();
    hits.into_iter().filter(|hit| seen.insert(hit.wall)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WallRef;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_wall_collapses_to_nearest_hit() {
        let hits = vec![
            RayHit::new(1.0, WallRef::local(7)),
            RayHit::new(1.0001, WallRef::local(7)),
        ];

        assert_eq!(dedup_hits(hits), vec![RayHit::new(1.0, WallRef::local(7))]);
    }

    #[test]
    fn distinct_walls_survive_in_order() {
        let hits = vec![
            RayHit::new(1.0, WallRef::local(1)),
            RayHit::new(1.2, WallRef::local(1)),
            RayHit::new(3.0, WallRef::local(2)),
            RayHit::new(3.2, WallRef::local(2)),
        ];

        assert_eq!(
            dedup_hits(hits),
            vec![
                RayHit::new(1.0, WallRef::local(1)),
                RayHit::new(3.0, WallRef::local(2)),
            ]
        );
    }

    #[test]
    fn link_id_is_part_of_identity() {
        let hits = vec![
            RayHit::new(1.0, WallRef::local(5)),
            RayHit::new(2.0, WallRef::linked(1, 5)),
            RayHit::new(3.0, WallRef::linked(2, 5)),
            RayHit::new(4.0, WallRef::linked(1, 5)),
        ];

        let walls: Vec<WallRef> = dedup_hits(hits).iter().map(|h| h.wall).collect();
        assert_eq!(
            walls,
            vec![
                WallRef::local(5),
                WallRef::linked(1, 5),
                WallRef::linked(2, 5)
            ]
        );
    }

    #[test]
    fn output_is_stable_across_runs() {
        let hits: Vec<RayHit> = (0..50_u32)
            .map(|i| RayHit::new(f64::from(i), WallRef::local(u64::from(i % 7))))
            .collect();

        let first = dedup_hits(hits.clone());
        assert_eq!(first.len(), 7);
        assert_eq!(first, dedup_hits(hits));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(dedup_hits(Vec::new()).is_empty());
    }
}
