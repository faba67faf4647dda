pub use crate::model::*;

/// A builder for assembling a dataset row by row.
///
/// It is the simplest way to get a canonical dataset in tests or in
/// embedding code that does not read the tables from files.
///
/// ```
/// use games_analytics::builder::DatasetBuilder;
/// use games_analytics::{Medal, RawRecord};
///
/// let ds = DatasetBuilder::new()
///     .region("USA", "USA")
///     .row(RawRecord::new(
///         "A. Carlsen",
///         "USA",
///         2000,
///         "Judo",
///         "Judo Men's Heavyweight",
///         Some(Medal::Gold),
///     ))
///     .row(RawRecord::new(
///         "B. Reyes",
///         "USA",
///         2000,
///         "Judo",
///         "Judo Women's Middleweight",
///         None,
///     ))
///     .build();
///
/// assert_eq!(ds.len(), 2);
/// ```
pub struct DatasetBuilder {
    rows: Vec<RawRecord>,
    regions: Vec<RegionRow>,
}

impl DatasetBuilder {
    pub fn new() -> DatasetBuilder {
        DatasetBuilder {
            rows: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Registers a NOC code → region name mapping.
    pub fn region(mut self, noc: &str, region: &str) -> DatasetBuilder {
        self.regions.push(RegionRow {
            noc: noc.to_string(),
            region: Some(region.to_string()),
            notes: None,
        });
        self
    }

    /// Adds one raw row. Rows are normalized all at once by [Self::build].
    pub fn row(mut self, record: RawRecord) -> DatasetBuilder {
        self.rows.push(record);
        self
    }

    /// Normalizes the accumulated rows into the canonical dataset.
    pub fn build(self) -> Dataset {
        crate::normalize(self.rows, &self.regions)
    }
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        DatasetBuilder::new()
    }
}
