//! Dense rectangular grids parsed from puzzle text

use std::ops::{Index, IndexMut};

use anyhow::{Result, bail, ensure};

use super::geometry::Point2;

/// A rectangular grid stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Parses one cell per character; blank lines are skipped, ragged rows rejected
    pub fn parse(input: &str, mut cell: impl FnMut(char) -> Result<T>) -> Result<Self> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;
        for (row, line) in input.lines().map(str::trim_end).filter(|l| !l.is_empty()).enumerate() {
            let before = cells.len();
            for c in line.chars() {
                cells.push(cell(c)?);
            }
            let len = cells.len() - before;
            match width {
                None => width = Some(len),
                Some(w) if w != len => bail!("row {} has width {len}, expected {w}", row + 1),
                Some(_) => {}
            }
            height += 1;
        }
        let Some(width) = width else {
            bail!("empty grid");
        };
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Point2) -> T) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Point2::new(x as i64, y as i64)))
            .map(&mut f)
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn from_cells(width: usize, cells: Vec<T>) -> Result<Self> {
        ensure!(width > 0 && cells.len() % width == 0, "cells do not fill rows of width {width}");
        Ok(Self {
            width,
            height: cells.len() / width,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Point2) -> bool {
        (0..self.width as i64).contains(&p.x) && (0..self.height as i64).contains(&p.y)
    }

    fn offset(&self, p: Point2) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    pub fn get(&self, p: Point2) -> Option<&T> {
        self.offset(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point2) -> Option<&mut T> {
        self.offset(p).map(|i| &mut self.cells[i])
    }

    /// Every coordinate, row by row
    pub fn points(&self) -> impl Iterator<Item = Point2> + use<T> {
        let width = self.width as i64;
        (0..self.height as i64).flat_map(move |y| (0..width).map(move |x| Point2::new(x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point2, &T)> {
        self.points().zip(&self.cells)
    }

    /// First point whose cell satisfies `pred`
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Point2> {
        self.iter().find(|(_, c)| pred(c)).map(|(p, _)| p)
    }

    /// In-bounds orthogonal neighbours of `p`
    pub fn neighbors4(&self, p: Point2) -> impl Iterator<Item = Point2> + '_ {
        p.neighbors4().filter(|&q| self.contains(q))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl Grid<char> {
    pub fn parse_chars(input: &str) -> Result<Self> {
        Self::parse(input, Ok)
    }
}

impl<T> Index<Point2> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point2) -> &T {
        match self.get(p) {
            Some(cell) => cell,
            None => panic!("{p} outside {}x{} grid", self.width, self.height),
        }
    }
}

impl<T> IndexMut<Point2> for Grid<T> {
    fn index_mut(&mut self, p: Point2) -> &mut T {
        let (width, height) = (self.width, self.height);
        match self.get_mut(p) {
            Some(cell) => cell,
            None => panic!("{p} outside {width}x{height} grid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_index() {
        let grid = Grid::parse_chars("ab\ncd\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid[Point2::new(1, 0)], 'b');
        assert_eq!(grid.get(Point2::new(2, 0)), None);
        assert_eq!(grid.get(Point2::new(0, -1)), None);
        assert_eq!(grid.find(|&c| c == 'c'), Some(Point2::new(0, 1)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::parse_chars("abc\nde\n").unwrap_err();
        assert_eq!(err.to_string(), "row 2 has width 2, expected 3");
        assert!(Grid::parse_chars("\n\n").is_err());
    }

    #[test]
    fn corner_has_two_neighbours() {
        let grid = Grid::from_fn(3, 3, |p| p.x + p.y);
        assert_eq!(grid.neighbors4(Point2::ORIGIN).count(), 2);
        assert_eq!(grid.neighbors4(Point2::new(1, 1)).count(), 4);
        assert_eq!(grid[Point2::new(2, 1)], 3);
        assert_eq!(grid.map(|v| v * 2)[Point2::new(2, 2)], 8);
    }
}
