//! The sticker-level cube model and its turn engine.

use crate::{
    geometry::{self, Axis, Direction, Face},
    moves::Move,
};
use fxhash::FxHashMap;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("Every cube dimension must be at least 1, got {0:?}")]
    InvalidDimensions([usize; 3]),
    #[error("Layer {layer} is out of range for axis {axis} of size {size}")]
    LayerOutOfRange {
        axis: Axis,
        layer: usize,
        size: usize,
    },
    #[error("A move must turn at least one layer")]
    EmptyMove,
    #[error("Square ({row}, {col}) is not on the {face} face")]
    SquareOutOfRange { face: Face, row: usize, col: usize },
}

/// A sticker color. The six canonical colors are the solved colors of the
/// faces with the same index; any other id is a custom paint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u8);

impl Color {
    pub const GREEN: Color = Color(0);
    pub const RED: Color = Color(1);
    pub const BLUE: Color = Color(2);
    pub const ORANGE: Color = Color(3);
    pub const WHITE: Color = Color(4);
    pub const YELLOW: Color = Color(5);

    /// The color a face shows in the canonical solved layout.
    #[must_use]
    pub const fn solved(face: Face) -> Color {
        Color(face as u8)
    }

    /// One character for the net. Painted ids below 36 print as a base-36
    /// digit; anything from 36 up prints as `?`.
    #[must_use]
    pub fn letter(self) -> char {
        match self.0 {
            0 => 'G',
            1 => 'R',
            2 => 'B',
            3 => 'O',
            4 => 'W',
            5 => 'Y',
            n => char::from_digit(u32::from(n), 36).unwrap_or('?'),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One visible unit sticker. Its position is fixed for the lifetime of the
/// layout; ordinary turns only ever change its color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    face: Face,
    row: usize,
    col: usize,
    cubie: [usize; 3],
    color: Color,
}

impl Square {
    #[must_use]
    pub fn face(&self) -> Face {
        self.face
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Grid coordinates of the cubie this sticker is glued to.
    #[must_use]
    pub fn cubie(&self) -> [usize; 3] {
        self.cubie
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Center,
    Edge,
    Corner,
}

/// The squares sharing one cubie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cubie: [usize; 3],
    squares: Vec<usize>,
}

impl Piece {
    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn cubie(&self) -> [usize; 3] {
        self.cubie
    }

    /// Indices into [`Cube::squares`].
    #[must_use]
    pub fn squares(&self) -> &[usize] {
        &self.squares
    }
}

/// One axis slice: the pieces in it and the four side strips a turn cycles.
///
/// `strips[k][i]` for `k = 0..4` are the squares one clockwise quarter turn
/// carries into each other; on skewed axes `strips[2]` and `strips[3]` are
/// the half-turn images of `strips[0]` and `strips[1]` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    axis: Axis,
    index: usize,
    pieces: Vec<usize>,
    strips: [Vec<usize>; 4],
}

impl Layer {
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Indices into [`Cube::pieces`].
    #[must_use]
    pub fn pieces(&self) -> &[usize] {
        &self.pieces
    }
}

/// A cuboid puzzle of `X×Y×Z` cubies.
///
/// All squares live in one arena. Faces, pieces and layers are index lists
/// into it, rebuilt together whenever the dimensions change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    dims: [usize; 3],
    squares: Vec<Square>,
    faces: [Vec<usize>; 6],
    pieces: Vec<Piece>,
    layers: [Vec<Layer>; 3],
}

impl Cube {
    /// Create a cube in the canonical solved layout.
    ///
    /// # Errors
    ///
    /// If any dimension is zero.
    pub fn new(dims: [usize; 3]) -> Result<Cube, CubeError> {
        if dims.contains(&0) {
            return Err(CubeError::InvalidDimensions(dims));
        }
        Ok(Cube::build(dims))
    }

    /// Create an `n×n×n` cube.
    ///
    /// # Errors
    ///
    /// If `n` is zero.
    pub fn uniform(n: usize) -> Result<Cube, CubeError> {
        Cube::new([n; 3])
    }

    /// The classic 3x3x3.
    #[must_use]
    pub fn cube3() -> Cube {
        Cube::build([3; 3])
    }

    /// Dimensions must be non-zero.
    pub(crate) fn build(dims: [usize; 3]) -> Cube {
        let mut squares = Vec::new();
        let mut faces: [Vec<usize>; 6] = Default::default();
        for face in Face::ALL {
            let (rows, cols) = face.shape(dims);
            for (row, col) in (0..rows).cartesian_product(0..cols) {
                faces[face.index()].push(squares.len());
                squares.push(Square {
                    face,
                    row,
                    col,
                    cubie: face.cubie(dims, row, col),
                    color: Color::solved(face),
                });
            }
        }

        let mut cube = Cube {
            dims,
            squares,
            faces,
            pieces: vec![],
            layers: Default::default(),
        };
        cube.rebuild_pieces();
        cube.rebuild_layers();
        cube
    }

    fn rebuild_pieces(&mut self) {
        let squares = &self.squares;
        let mut by_cubie: FxHashMap<[usize; 3], Vec<usize>> = FxHashMap::default();
        for (i, square) in squares.iter().enumerate() {
            by_cubie.entry(square.cubie).or_default().push(i);
        }
        self.pieces = by_cubie
            .into_iter()
            .sorted_unstable_by_key(|(cubie, _)| *cubie)
            .map(|(cubie, members)| {
                let kind = match members.iter().map(|&i| squares[i].face.axis()).unique().count() {
                    1 => PieceKind::Center,
                    2 => PieceKind::Edge,
                    _ => PieceKind::Corner,
                };
                Piece {
                    kind,
                    cubie,
                    squares: members,
                }
            })
            .collect();
    }

    fn rebuild_layers(&mut self) {
        let mut layers: [Vec<Layer>; 3] = Default::default();
        for axis in Axis::ALL {
            let a = axis.index();
            layers[a] = (0..self.dims[a])
                .map(|index| Layer {
                    axis,
                    index,
                    pieces: self
                        .pieces
                        .iter()
                        .positions(|piece| piece.cubie[a] == index)
                        .collect(),
                    strips: self.layer_strips(axis, index),
                })
                .collect();
        }
        self.layers = layers;
    }

    fn layer_strips(&self, axis: Axis, index: usize) -> [Vec<usize>; 4] {
        let sides = axis.side_faces();
        let on_face = |face: Face| -> Vec<usize> {
            self.faces[face.index()]
                .iter()
                .copied()
                .filter(|&i| self.squares[i].cubie[axis.index()] == index)
                .collect()
        };
        let carry = |strip: &[usize], quarter_turns: u8| -> Vec<usize> {
            strip
                .iter()
                .map(|&i| self.rotated_index(i, axis, quarter_turns))
                .collect()
        };

        if self.is_symmetric(axis) {
            let first = on_face(sides[0]);
            let second = carry(&first, 1);
            let third = carry(&second, 1);
            let fourth = carry(&third, 1);
            [first, second, third, fourth]
        } else {
            let first = on_face(sides[0]);
            let second = on_face(sides[1]);
            let third = carry(&first, 2);
            let fourth = carry(&second, 2);
            [first, second, third, fourth]
        }
    }

    /// Where a sticker ends up when `axis` is turned in place. Only valid for
    /// turns that map the cube onto itself.
    fn rotated_index(&self, square: usize, axis: Axis, quarter_turns: u8) -> usize {
        let Square { face, row, col, .. } = self.squares[square];
        let point = geometry::sticker_point(face, self.dims, row, col);
        let rotated = geometry::rotate_point(axis, point, quarter_turns);
        let (face, row, col) = geometry::locate(self.dims, rotated)
            .expect("a turn that preserves the dimensions keeps stickers on the surface");
        self.index_of(face, row, col)
    }

    fn index_of(&self, face: Face, row: usize, col: usize) -> usize {
        let (_, cols) = face.shape(self.dims);
        self.faces[face.index()][row * cols + col]
    }

    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    #[must_use]
    pub fn size(&self, axis: Axis) -> usize {
        self.dims[axis.index()]
    }

    /// Whether the two dimensions orthogonal to `axis` are equal, so that a
    /// quarter turn about it maps the cube onto itself.
    #[must_use]
    pub fn is_symmetric(&self, axis: Axis) -> bool {
        let [a, b] = axis.orthogonal();
        self.size(a) == self.size(b)
    }

    #[must_use]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// The squares of a face in row-major order, as indices into
    /// [`Cube::squares`].
    #[must_use]
    pub fn face(&self, face: Face) -> &[usize] {
        &self.faces[face.index()]
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[must_use]
    pub fn layers(&self, axis: Axis) -> &[Layer] {
        &self.layers[axis.index()]
    }

    #[must_use]
    pub fn layer(&self, axis: Axis, index: usize) -> Option<&Layer> {
        self.layers[axis.index()].get(index)
    }

    #[must_use]
    pub fn color(&self, face: Face, row: usize, col: usize) -> Option<Color> {
        let (rows, cols) = face.shape(self.dims);
        (row < rows && col < cols).then(|| self.squares[self.index_of(face, row, col)].color)
    }

    /// The colors of a face in row-major order.
    #[must_use]
    pub fn face_colors(&self, face: Face) -> Vec<Color> {
        self.faces[face.index()]
            .iter()
            .map(|&i| self.squares[i].color)
            .collect()
    }

    /// The color of the sticker that `cubie` shows on `face`, if it touches
    /// that face.
    #[must_use]
    pub fn sticker(&self, face: Face, cubie: [usize; 3]) -> Option<Color> {
        let (row, col) = face.position(self.dims, cubie)?;
        self.color(face, row, col)
    }

    /// The color of the centermost square of a face.
    #[must_use]
    pub fn reference_color(&self, face: Face) -> Color {
        let (rows, cols) = face.shape(self.dims);
        self.squares[self.index_of(face, rows / 2, cols / 2)].color
    }

    #[must_use]
    pub fn is_face_solved(&self, face: Face) -> bool {
        let reference = self.reference_color(face);
        self.faces[face.index()]
            .iter()
            .all(|&i| self.squares[i].color == reference)
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| self.is_face_solved(face))
    }

    pub fn set_color(&mut self, color: Color) {
        for square in &mut self.squares {
            square.color = color;
        }
    }

    pub fn set_face_color(&mut self, face: Face, color: Color) {
        for &i in &self.faces[face.index()] {
            self.squares[i].color = color;
        }
    }

    /// Paint every sticker of one axis slice, end faces included.
    ///
    /// # Errors
    ///
    /// If the layer is out of range.
    pub fn set_layer_color(&mut self, axis: Axis, layer: usize, color: Color) -> Result<(), CubeError> {
        self.check_layer(axis, layer)?;
        for square in &mut self.squares {
            if square.cubie[axis.index()] == layer {
                square.color = color;
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// If the square is not on the face.
    pub fn set_square_color(
        &mut self,
        face: Face,
        row: usize,
        col: usize,
        color: Color,
    ) -> Result<(), CubeError> {
        let (rows, cols) = face.shape(self.dims);
        if row >= rows || col >= cols {
            return Err(CubeError::SquareOutOfRange { face, row, col });
        }
        let i = self.index_of(face, row, col);
        self.squares[i].color = color;
        Ok(())
    }

    /// Restore the canonical solved layout without changing the dimensions.
    pub fn reset_colors(&mut self) {
        for square in &mut self.squares {
            square.color = Color::solved(square.face);
        }
    }

    fn check_layer(&self, axis: Axis, layer: usize) -> Result<(), CubeError> {
        let size = self.size(axis);
        if layer >= size {
            return Err(CubeError::LayerOutOfRange { axis, layer, size });
        }
        Ok(())
    }

    /// Check that a move refers only to existing layers.
    ///
    /// # Errors
    ///
    /// If the move turns no layers or runs past the end of its axis.
    pub fn check_move(&self, mv: &Move) -> Result<(), CubeError> {
        if mv.count == 0 {
            return Err(CubeError::EmptyMove);
        }
        self.check_layer(mv.axis, mv.start + mv.count - 1)
    }

    /// Whether `mv` turns every layer of its axis.
    #[must_use]
    pub fn is_whole_cube(&self, mv: &Move) -> bool {
        mv.start == 0 && mv.count == self.size(mv.axis)
    }

    /// Apply a move. A whole-cube move about a skewed axis reorients the
    /// puzzle; everything else turns its layers one by one.
    ///
    /// # Errors
    ///
    /// If the move refers to layers that don't exist. The cube is unchanged.
    pub fn apply(&mut self, mv: &Move) -> Result<(), CubeError> {
        self.check_move(mv)?;
        if self.is_whole_cube(mv) && !self.is_symmetric(mv.axis) && mv.direction != Direction::Half {
            self.reorient(mv.axis, mv.direction);
            return Ok(());
        }
        for layer in mv.layers() {
            self.rotate_layer(mv.axis, mv.direction, layer)?;
        }
        Ok(())
    }

    /// Turn a single layer. On a skewed axis only the half turn maps the
    /// cube onto itself, so quarter turns there turn by 180°.
    ///
    /// # Errors
    ///
    /// If `layer` is out of range. The cube is unchanged.
    pub fn rotate_layer(&mut self, axis: Axis, direction: Direction, layer: usize) -> Result<(), CubeError> {
        self.check_layer(axis, layer)?;
        let last = self.size(axis) - 1;
        let positive = Face::from_axis(axis, true);
        let negative = Face::from_axis(axis, false);

        if direction == Direction::Half || !self.is_symmetric(axis) {
            self.swap_strips(axis, layer);
            if layer == last {
                self.reflect_face(positive);
            }
            if layer == 0 {
                self.reflect_face(negative);
            }
        } else {
            let clockwise = direction == Direction::Clockwise;
            self.cycle_strips(axis, layer, clockwise);
            // The near face is seen from the other end of the axis
            if layer == last {
                self.turn_face(positive, clockwise);
            }
            if layer == 0 {
                self.turn_face(negative, !clockwise);
            }
        }
        Ok(())
    }

    fn cycle_strips(&mut self, axis: Axis, layer: usize, clockwise: bool) {
        let Cube { squares, layers, .. } = self;
        let strips = &layers[axis.index()][layer].strips;
        let order = if clockwise { [3, 2, 1, 0] } else { [0, 1, 2, 3] };

        let buffer = strips[order[0]].iter().map(|&i| squares[i].color).collect_vec();
        for pair in order.windows(2) {
            let (to, from) = (pair[0], pair[1]);
            for (&dst, &src) in strips[to].iter().zip(&strips[from]) {
                squares[dst].color = squares[src].color;
            }
        }
        for (&dst, color) in strips[order[3]].iter().zip(buffer) {
            squares[dst].color = color;
        }
    }

    fn swap_strips(&mut self, axis: Axis, layer: usize) {
        let Cube { squares, layers, .. } = self;
        let strips = &layers[axis.index()][layer].strips;
        for (a, b) in [(0, 2), (1, 3)] {
            for (&i, &j) in strips[a].iter().zip(&strips[b]) {
                let color = squares[i].color;
                squares[i].color = squares[j].color;
                squares[j].color = color;
            }
        }
    }

    /// Rotate the colors of a square face a quarter turn, one concentric ring
    /// at a time from the outside in.
    fn turn_face(&mut self, face: Face, clockwise: bool) {
        let (n, _) = face.shape(self.dims);
        let Cube { squares, faces, .. } = self;
        let face = &faces[face.index()];
        let at = |row: usize, col: usize| face[row * n + col];

        for depth in 0..n / 2 {
            let side = n - 2 * depth;
            let far = depth + side - 1;
            for k in 0..side - 1 {
                let top = at(depth, depth + k);
                let right = at(depth + k, far);
                let bottom = at(far, far - k);
                let left = at(far - k, depth);

                let ring = if clockwise {
                    [left, bottom, right, top]
                } else {
                    [top, right, bottom, left]
                };
                let saved = squares[ring[0]].color;
                squares[ring[0]].color = squares[ring[1]].color;
                squares[ring[1]].color = squares[ring[2]].color;
                squares[ring[2]].color = squares[ring[3]].color;
                squares[ring[3]].color = saved;
            }
        }
    }

    /// Turn a face by 180° in place: square `i` trades with `w·h - 1 - i`.
    fn reflect_face(&mut self, face: Face) {
        let Cube { squares, faces, .. } = self;
        let face = &faces[face.index()];
        let len = face.len();
        for i in 0..len / 2 {
            let (a, b) = (face[i], face[len - 1 - i]);
            let color = squares[a].color;
            squares[a].color = squares[b].color;
            squares[b].color = color;
        }
    }

    /// Rotate the whole puzzle about `axis`. The dimensions along the other
    /// two axes trade places on odd quarter turns, so the layout is rebuilt
    /// from scratch and every sticker's color is carried to its new square.
    pub fn reorient(&mut self, axis: Axis, direction: Direction) {
        let quarter_turns = direction.quarter_turns();
        let dims = geometry::rotated_dims(self.dims, axis, quarter_turns);
        let mut turned = Cube::build(dims);

        for square in &self.squares {
            let point = geometry::sticker_point(square.face, self.dims, square.row, square.col);
            let rotated = geometry::rotate_point(axis, point, quarter_turns);
            let (face, row, col) = geometry::locate(dims, rotated)
                .expect("a whole-cube rotation keeps stickers on the surface");
            let i = turned.index_of(face, row, col);
            turned.squares[i].color = square.color;
        }

        *self = turned;
    }
}

impl fmt::Display for Cube {
    /// An unfolded net with the top face above the left, front, right and
    /// back faces, and the bottom face below them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [_, y, z] = self.dims;
        let indent = " ".repeat(z + 1);
        let row_of = |face: Face, row: usize| -> String {
            let (_, cols) = face.shape(self.dims);
            (0..cols)
                .map(|col| self.squares[self.index_of(face, row, col)].color.letter())
                .collect()
        };

        for row in 0..z {
            writeln!(f, "{indent}{}", row_of(Face::Top, row))?;
        }
        for row in 0..y {
            let line = [Face::Left, Face::Front, Face::Right, Face::Back]
                .into_iter()
                .map(|face| row_of(face, row))
                .join(" ");
            writeln!(f, "{line}")?;
        }
        for row in 0..z {
            writeln!(f, "{indent}{}", row_of(Face::Bottom, row))?;
        }
        Ok(())
    }
}
