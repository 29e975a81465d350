/// Read-only row access to a row-major grid.
pub trait GridView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { grid: self, y: 0 }
    }

    fn as_slice(&self) -> &[Self::Pixel];
}

pub trait GridViewMut: GridView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn as_mut_slice(&mut self) -> &mut [Self::Pixel];
}

pub struct Rows<'a, G: ?Sized + GridView> {
    grid: &'a G,
    y: usize,
}

impl<'a, G: GridView> Iterator for Rows<'a, G> {
    type Item = &'a [G::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.grid.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.grid.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.grid.height().saturating_sub(self.y);
        (left, Some(left))
    }
}
