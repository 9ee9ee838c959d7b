/// Generic rectangular container of `rows × columns` cells.
///
/// Dimensions are fixed at construction. Every row holds exactly `columns`
/// entries. Iteration is row-major and restartable; the iterators borrow the
/// grid and can be recreated at any time.
///
/// Indices are not defensively checked: `get`, `set`, `row`, and `fill_row`
/// panic on out-of-range coordinates. Callers are responsible for staying
/// within the dimensions reported by [`Grid::rows`] and [`Grid::columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<T>>,
}

impl<T: Clone> Grid<T> {
    /// Creates a `rows × columns` grid with every cell set to `fill`.
    #[must_use]
    pub fn new(rows: usize, columns: usize, fill: T) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![fill; columns]; rows],
        }
    }
}

impl<T> Grid<T> {
    /// Builds a grid from a literal 2D array.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length, or if `rows` is
    /// empty. Equal row lengths are a precondition of every grid.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let row_count = rows.len();
        assert!(row_count > 0, "grid must have at least one row");
        let columns = rows[0].len();
        assert!(
            rows.iter().all(|row| row.len() == columns),
            "all rows of a grid must have equal length"
        );
        Self {
            rows: row_count,
            columns,
            cells: rows,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> &T {
        &self.cells[row][column]
    }

    pub fn set(&mut self, row: usize, column: usize, value: T) {
        self.cells[row][column] = value;
    }

    /// Borrows a full row of cells.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row]
    }

    /// Sets every cell of a row to `value`.
    pub fn fill_row(&mut self, row: usize, value: T)
    where
        T: Clone,
    {
        self.cells[row].fill(value);
    }

    /// Iterates `(row, column)` coordinates in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = (usize, usize)> {
        self.entries().map(|(row, column, _)| (row, column))
    }

    /// Like [`Grid::keys`], restricted to cells whose value satisfies `pred`.
    pub fn keys_where<'a, F>(&'a self, pred: F) -> impl Iterator<Item = (usize, usize)>
    where
        F: Fn(&T) -> bool + 'a,
    {
        self.entries_where(pred).map(|(row, column, _)| (row, column))
    }

    /// Iterates `(row, column, value)` triples in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, value)| (row, column, value))
        })
    }

    /// Like [`Grid::entries`], restricted to cells whose value satisfies `pred`.
    pub fn entries_where<'a, F>(&'a self, pred: F) -> impl Iterator<Item = (usize, usize, &'a T)>
    where
        F: Fn(&T) -> bool + 'a,
    {
        self.entries().filter(move |(_, _, value)| pred(value))
    }
}
