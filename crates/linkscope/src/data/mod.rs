pub mod csv;
pub mod matrix;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

pub use matrix::{CombineOp, Matrix};

pub const DEPARTMENTS_FILE: &str = "departments.csv";
pub const RESEARCH_FILE: &str = "research.csv";
pub const TEACHING_FILE: &str = "teaching.csv";

/// One collaboration record between two departments.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub department1: String,
    pub department2: String,
    pub links: f64,
}

/// A duplicate link pair found while building a matrix, with names resolved.
#[derive(Debug, Clone)]
pub struct DuplicateLink {
    pub kind: LinkKind,
    pub department1: String,
    pub department2: String,
    pub previous: f64,
    pub replacement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Research,
    Teaching,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::Research => "research",
            LinkKind::Teaching => "teaching",
        }
    }
}

/// The loaded dataset plus every matrix derived from it.
///
/// Matrices and sums are computed once here and treated as immutable
/// read-only data for the rest of the program's life.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Department universe in first-appearance order across the link files.
    pub names: Vec<String>,
    /// Faculty head count per department; 0 when the roster has no entry.
    pub faculty: Vec<u32>,
    pub research: Matrix,
    pub teaching: Matrix,
    pub links: Matrix,
    pub balance: Matrix,
    pub links_sum: Vec<f64>,
    pub balance_sum: Vec<f64>,
    /// Duplicate-pair diagnostics collected during the build (non-fatal).
    pub duplicates: Vec<DuplicateLink>,
}

impl Dataset {
    /// Load the three datasets from a directory using the conventional
    /// file names. Any read or parse failure is fatal.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Self::load(
            &dir.join(DEPARTMENTS_FILE),
            &dir.join(RESEARCH_FILE),
            &dir.join(TEACHING_FILE),
        )
    }

    pub fn load(departments: &Path, research: &Path, teaching: &Path) -> Result<Self> {
        let roster = read_roster(departments)
            .with_context(|| format!("loading {}", departments.display()))?;
        let research_records =
            read_links(research).with_context(|| format!("loading {}", research.display()))?;
        let teaching_records =
            read_links(teaching).with_context(|| format!("loading {}", teaching.display()))?;

        Ok(Self::build(roster, research_records, teaching_records))
    }

    /// Assemble the department universe and all derived matrices.
    pub fn build(
        roster: Vec<(String, u32)>,
        research_records: Vec<LinkRecord>,
        teaching_records: Vec<LinkRecord>,
    ) -> Self {
        // The universe is the union of names in the link files, in order of
        // first appearance. It may be a superset of the roster.
        let mut names: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in research_records.iter().chain(&teaching_records) {
            for name in [&record.department1, &record.department2] {
                if !index.contains_key(name) {
                    index.insert(name.clone(), names.len());
                    names.push(name.clone());
                }
            }
        }
        let n = names.len();

        // Roster entries for departments with no links are dropped.
        let mut faculty = vec![0u32; n];
        for (name, count) in roster {
            if let Some(&i) = index.get(&name) {
                faculty[i] = count;
            }
        }

        let mut duplicates = Vec::new();
        let research = build_matrix(
            &research_records,
            &index,
            n,
            LinkKind::Research,
            &names,
            &mut duplicates,
        );
        let teaching = build_matrix(
            &teaching_records,
            &index,
            n,
            LinkKind::Teaching,
            &names,
            &mut duplicates,
        );

        let links = Matrix::combine(&research, &teaching, CombineOp::Add);
        let balance = Matrix::combine(&research, &teaching, CombineOp::Subtract);
        let links_sum = links.row_sums();
        let balance_sum = balance.row_sums();

        Self {
            names,
            faculty,
            research,
            teaching,
            links,
            balance,
            links_sum,
            balance_sum,
            duplicates,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn build_matrix(
    records: &[LinkRecord],
    index: &HashMap<String, usize>,
    n: usize,
    kind: LinkKind,
    names: &[String],
    duplicates: &mut Vec<DuplicateLink>,
) -> Matrix {
    let pairs = records
        .iter()
        .map(|r| (index[&r.department1], index[&r.department2], r.links));
    let (matrix, cells) = Matrix::from_pairs(n, pairs);
    duplicates.extend(cells.into_iter().map(|d| DuplicateLink {
        kind,
        department1: names[d.i].clone(),
        department2: names[d.j].clone(),
        previous: d.previous,
        replacement: d.replacement,
    }));
    matrix
}

fn read_roster(path: &Path) -> Result<Vec<(String, u32)>> {
    let content = std::fs::read_to_string(path)?;
    let table = csv::Table::parse(&content)?;
    let dept = table.column("department")?;
    let faculty = table.column("faculty")?;

    let mut roster = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let count: u32 = row[faculty]
            .parse()
            .with_context(|| format!("bad faculty count for '{}'", row[dept]))?;
        roster.push((row[dept].clone(), count));
    }
    Ok(roster)
}

fn read_links(path: &Path) -> Result<Vec<LinkRecord>> {
    let content = std::fs::read_to_string(path)?;
    let table = csv::Table::parse(&content)?;
    let d1 = table.column("department1")?;
    let d2 = table.column("department2")?;
    let links = table.column("links")?;

    let mut records = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let count: f64 = row[links].parse().with_context(|| {
            format!("bad link count for '{}' x '{}'", row[d1], row[d2])
        })?;
        records.push(LinkRecord {
            department1: row[d1].clone(),
            department2: row[d2].clone(),
            links: count,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(a: &str, b: &str, n: f64) -> LinkRecord {
        LinkRecord {
            department1: a.to_string(),
            department2: b.to_string(),
            links: n,
        }
    }

    #[test]
    fn universe_is_union_of_link_names() {
        let dataset = Dataset::build(
            vec![("Law".into(), 40)],
            vec![link("Law", "Economics", 2.0)],
            vec![link("Sociology", "Law", 1.0)],
        );
        assert_eq!(dataset.names, vec!["Law", "Economics", "Sociology"]);
    }

    #[test]
    fn missing_roster_entries_default_to_zero_faculty() {
        let dataset = Dataset::build(
            vec![("Law".into(), 40)],
            vec![link("Law", "Economics", 2.0)],
            vec![],
        );
        assert_eq!(dataset.faculty, vec![40, 0]);
    }

    #[test]
    fn roster_entries_without_links_are_dropped() {
        let dataset = Dataset::build(
            vec![("Philosophy".into(), 12), ("Law".into(), 40)],
            vec![link("Law", "Economics", 2.0)],
            vec![],
        );
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.names.contains(&"Philosophy".to_string()));
    }

    #[test]
    fn links_and_balance_are_derived_elementwise() {
        let dataset = Dataset::build(
            vec![],
            vec![link("A", "B", 3.0)],
            vec![link("A", "B", 1.0)],
        );
        assert_eq!(dataset.links.get(0, 1), 4.0);
        assert_eq!(dataset.balance.get(0, 1), 2.0);
    }

    #[test]
    fn row_sums_of_links_match_component_sums() {
        let dataset = Dataset::build(
            vec![],
            vec![link("A", "B", 3.0), link("B", "C", 2.0)],
            vec![link("A", "C", 1.0)],
        );
        let research_sums = dataset.research.row_sums();
        let teaching_sums = dataset.teaching.row_sums();
        for i in 0..dataset.len() {
            assert_eq!(dataset.links_sum[i], research_sums[i] + teaching_sums[i]);
        }
    }

    #[test]
    fn duplicate_links_surface_as_diagnostics() {
        let dataset = Dataset::build(
            vec![],
            vec![link("A", "B", 3.0), link("B", "A", 5.0)],
            vec![],
        );
        assert_eq!(dataset.duplicates.len(), 1);
        let dup = &dataset.duplicates[0];
        assert_eq!(dup.kind, LinkKind::Research);
        assert_eq!(dup.previous, 3.0);
        assert_eq!(dup.replacement, 5.0);
        // Last write wins.
        assert_eq!(dataset.research.get(0, 1), 5.0);
    }
}
