//! Table layout configuration.
//!
//! Describes which columns of the input table carry the treatment indicator,
//! the event/treatment time and the covariates used for distance scoring.

/// Column names describing a subject table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Boolean (or 0/1 integer) treatment indicator column
    pub treatment_column: String,
    /// Numeric or `Date32` time column
    pub time_column: String,
    /// Numeric covariate columns, in the order they form the covariate vector
    pub covariate_columns: Vec<String>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            treatment_column: "treated".to_string(),
            time_column: "time".to_string(),
            covariate_columns: Vec::new(),
        }
    }
}

impl TableLayout {
    /// Create a layout from explicit column names
    #[must_use]
    pub fn new<S: Into<String>>(
        treatment_column: impl Into<String>,
        time_column: impl Into<String>,
        covariate_columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            treatment_column: treatment_column.into(),
            time_column: time_column.into(),
            covariate_columns: covariate_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a new builder starting from the default column names
    #[must_use]
    pub fn builder() -> TableLayoutBuilder {
        TableLayoutBuilder::default()
    }

    /// Number of covariates each subject carries
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.covariate_columns.len()
    }
}

/// Builder for constructing a table layout
#[derive(Debug, Clone, Default)]
pub struct TableLayoutBuilder {
    layout: TableLayout,
}

impl TableLayoutBuilder {
    /// Set the treatment indicator column
    #[must_use]
    pub fn treatment_column(mut self, column: impl Into<String>) -> Self {
        self.layout.treatment_column = column.into();
        self
    }

    /// Set the time column
    #[must_use]
    pub fn time_column(mut self, column: impl Into<String>) -> Self {
        self.layout.time_column = column.into();
        self
    }

    /// Append one covariate column
    #[must_use]
    pub fn covariate(mut self, column: impl Into<String>) -> Self {
        self.layout.covariate_columns.push(column.into());
        self
    }

    /// Replace the covariate columns
    #[must_use]
    pub fn covariates<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.layout.covariate_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Build the layout
    #[must_use]
    pub fn build(self) -> TableLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let layout = TableLayout::builder()
            .treatment_column("exposed")
            .time_column("event_time")
            .covariate("age")
            .covariate("income")
            .build();

        assert_eq!(layout.treatment_column, "exposed");
        assert_eq!(layout.time_column, "event_time");
        assert_eq!(layout.covariate_columns, vec!["age", "income"]);
        assert_eq!(layout.dimension(), 2);
    }

    #[test]
    fn default_layout_has_no_covariates() {
        let layout = TableLayout::default();
        assert_eq!(layout.treatment_column, "treated");
        assert_eq!(layout.time_column, "time");
        assert_eq!(layout.dimension(), 0);
    }
}
