use std::cmp::Ordering;

use crate::data::Dataset;

use super::pie::{self, ArcSpan, SliceSort};

/// A named ordering criterion. Determines both the sort order of departments
/// and, for the chord view, what quantity slice sizes are proportional to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSpec {
    Department,
    Links,
    Emphasis,
    Faculty,
}

impl OrderSpec {
    /// Fixed cyclic order the auto-advance timer walks through.
    pub const CYCLE: [OrderSpec; 4] = [
        OrderSpec::Department,
        OrderSpec::Links,
        OrderSpec::Emphasis,
        OrderSpec::Faculty,
    ];

    /// The next order in the cycle, wrapping.
    pub fn next(self) -> Self {
        let i = Self::CYCLE.iter().position(|&o| o == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    pub fn key(self) -> &'static str {
        match self {
            OrderSpec::Department => "department",
            OrderSpec::Links => "links",
            OrderSpec::Emphasis => "emphasis",
            OrderSpec::Faculty => "faculty",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::CYCLE.iter().copied().find(|o| o.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderSpec::Department => "Department",
            OrderSpec::Links => "Total links",
            OrderSpec::Emphasis => "Research/teaching emphasis",
            OrderSpec::Faculty => "Faculty size",
        }
    }

    /// Angular layout for the chord view: one slice per department, indexed
    /// by department.
    pub fn chord_layout(self, dataset: &Dataset) -> Vec<ArcSpan> {
        match self {
            OrderSpec::Department => {
                let values = vec![1.0; dataset.len()];
                pie::layout(&values, SliceSort::None)
            }
            OrderSpec::Faculty => {
                let values: Vec<f64> = dataset.faculty.iter().map(|&f| f as f64).collect();
                pie::layout(&values, SliceSort::Ascending)
            }
            OrderSpec::Links => pie::layout(&dataset.links_sum, SliceSort::Descending),
            // Slice sizes use the raw signed balance sums; the sort key is
            // the same quantity.
            OrderSpec::Emphasis => pie::layout(&dataset.balance_sum, SliceSort::Descending),
        }
    }

    /// Axis order for the matrix view: department indices in display order.
    /// The same permutation is used on both axes, so the grid stays
    /// symmetric. Sorts are stable; ties keep original index order.
    pub fn permutation(self, dataset: &Dataset) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..dataset.len()).collect();
        match self {
            OrderSpec::Department => {
                perm.sort_by(|&a, &b| dataset.names[a].cmp(&dataset.names[b]));
            }
            OrderSpec::Faculty => {
                perm.sort_by(|&a, &b| dataset.faculty[b].cmp(&dataset.faculty[a]));
            }
            OrderSpec::Links => {
                perm.sort_by(|&a, &b| descending(dataset.links_sum[a], dataset.links_sum[b]));
            }
            OrderSpec::Emphasis => {
                perm.sort_by(|&a, &b| descending(dataset.balance_sum[a], dataset.balance_sum[b]));
            }
        }
        perm
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Invert a permutation: `positions[dept] = display slot`.
pub fn positions_of(perm: &[usize]) -> Vec<usize> {
    let mut positions = vec![0; perm.len()];
    for (slot, &dept) in perm.iter().enumerate() {
        positions[dept] = slot;
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LinkRecord;

    fn link(a: &str, b: &str, n: f64) -> LinkRecord {
        LinkRecord {
            department1: a.to_string(),
            department2: b.to_string(),
            links: n,
        }
    }

    fn dataset() -> Dataset {
        // Universe order: Economics, Anthropology, Law.
        Dataset::build(
            vec![
                ("Economics".into(), 10),
                ("Anthropology".into(), 3),
                ("Law".into(), 7),
            ],
            vec![
                link("Economics", "Anthropology", 4.0),
                link("Economics", "Law", 2.0),
            ],
            vec![link("Anthropology", "Law", 1.0)],
        )
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(OrderSpec::Department.next(), OrderSpec::Links);
        assert_eq!(OrderSpec::Links.next(), OrderSpec::Emphasis);
        assert_eq!(OrderSpec::Emphasis.next(), OrderSpec::Faculty);
        assert_eq!(OrderSpec::Faculty.next(), OrderSpec::Department);
    }

    #[test]
    fn keys_round_trip() {
        for order in OrderSpec::CYCLE {
            assert_eq!(OrderSpec::from_key(order.key()), Some(order));
        }
        assert_eq!(OrderSpec::from_key("nope"), None);
    }

    #[test]
    fn department_permutation_is_lexicographic() {
        let d = dataset();
        let perm = OrderSpec::Department.permutation(&d);
        let sorted: Vec<&str> = perm.iter().map(|&i| d.names[i].as_str()).collect();
        assert_eq!(sorted, vec!["Anthropology", "Economics", "Law"]);
    }

    #[test]
    fn faculty_permutation_is_descending_by_count() {
        let d = dataset();
        let perm = OrderSpec::Faculty.permutation(&d);
        let counts: Vec<u32> = perm.iter().map(|&i| d.faculty[i]).collect();
        assert_eq!(counts, vec![10, 7, 3]);
    }

    #[test]
    fn links_permutation_is_descending_by_row_sum() {
        let d = dataset();
        let perm = OrderSpec::Links.permutation(&d);
        for pair in perm.windows(2) {
            assert!(d.links_sum[pair[0]] >= d.links_sum[pair[1]]);
        }
    }

    #[test]
    fn faculty_chord_slices_run_ascending() {
        let d = dataset();
        // Faculty counts: Economics 10, Anthropology 3, Law 7. Ascending
        // order on the circle: Anthropology, Law, Economics.
        let spans = OrderSpec::Faculty.chord_layout(&d);
        assert!(spans[1].start_angle < spans[2].start_angle);
        assert!(spans[2].start_angle < spans[0].start_angle);
    }

    #[test]
    fn department_chord_slices_are_uniform() {
        let d = dataset();
        let spans = OrderSpec::Department.chord_layout(&d);
        let w0 = spans[0].end_angle - spans[0].start_angle;
        for span in &spans {
            assert!(((span.end_angle - span.start_angle) - w0).abs() < 1e-9);
        }
        // Insertion order, not sorted.
        assert!(spans[0].start_angle < spans[1].start_angle);
    }

    #[test]
    fn links_chord_slices_are_proportional_to_row_sums() {
        let d = dataset();
        let spans = OrderSpec::Links.chord_layout(&d);
        for (i, span) in spans.iter().enumerate() {
            assert_eq!(span.value, d.links_sum[i]);
        }
    }

    #[test]
    fn positions_invert_the_permutation() {
        let d = dataset();
        let perm = OrderSpec::Department.permutation(&d);
        let pos = positions_of(&perm);
        for (slot, &dept) in perm.iter().enumerate() {
            assert_eq!(pos[dept], slot);
        }
    }

    #[test]
    fn stable_ties_keep_original_index_order() {
        let d = Dataset::build(
            vec![("B".into(), 5), ("A".into(), 5)],
            vec![link("B", "A", 1.0)],
            vec![],
        );
        let perm = OrderSpec::Faculty.permutation(&d);
        // Equal faculty counts: original universe order (B first) is kept.
        assert_eq!(perm, vec![0, 1]);
    }
}
