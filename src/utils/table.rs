use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};

/// Unit of output sample indices, the ultrasound period divided by 256.
pub(crate) const OUTPUT_UNIT: &str = "25us/256";

/// Column-major buffers handed to a native fill call: one buffer of `rows` values per column
/// plus one time stamp per column.
#[derive(Debug)]
pub(crate) struct ColumnBuffer<T> {
    time: Vec<u64>,
    columns: Vec<Vec<T>>,
}

impl<T: Copy + Default> ColumnBuffer<T> {
    pub(crate) fn new(cols: usize, rows: usize) -> Self {
        log::trace!("allocating {cols} columns x {rows} rows");
        Self {
            time: vec![0; cols],
            columns: vec![vec![T::default(); rows]; cols],
        }
    }

    pub(crate) fn time_mut(&mut self) -> &mut [u64] {
        &mut self.time
    }

    /// Pointers to the first element of every column, in column order.
    pub(crate) fn column_ptrs(&mut self) -> Vec<*mut T> {
        self.columns.iter_mut().map(|v| v.as_mut_ptr()).collect()
    }

    /// Builds a table whose `i`-th column is named after the `i`-th time stamp.
    pub(crate) fn into_time_frame(self, prefix: &str) -> PolarsResult<DataFrame>
    where
        Series: NamedFrom<Vec<T>, [T]>,
    {
        DataFrame::new(
            self.time
                .iter()
                .zip(self.columns)
                .map(|(t, v)| Column::new(format!("{prefix}@{t}[ns]").into(), v))
                .collect::<Vec<_>>(),
        )
    }

    /// Builds a table whose `i`-th column is named after its sample index.
    pub(crate) fn into_index_frame(self, prefix: &str) -> PolarsResult<DataFrame>
    where
        Series: NamedFrom<Vec<T>, [T]>,
    {
        DataFrame::new(
            self.columns
                .into_iter()
                .enumerate()
                .map(|(i, v)| Column::new(format!("{prefix}@{i}[{OUTPUT_UNIT}]").into(), v))
                .collect::<Vec<_>>(),
        )
    }
}
