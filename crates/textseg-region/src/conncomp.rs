//! Connected component analysis
//!
//! Components are labeled by a breadth-first scan in raster order, so the
//! label of a component is the order in which its first (top-most, then
//! left-most) pixel is met.

use crate::error::{RegionError, RegionResult};
use crate::seedfill::exterior_background;
use std::collections::VecDeque;
use textseg_core::pix::get_data_bit;
use textseg_core::{Box, Boxa, Pix, PixelDepth};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

const FOUR_WAY: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl ConnectivityType {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }

    /// In-bounds neighbors of `(x, y)` in a `width x height` grid.
    pub(crate) fn neighbors(
        self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> impl Iterator<Item = (u32, u32)> {
        self.offsets().iter().filter_map(move |&(dx, dy)| {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            (nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64)
                .then_some((nx as u32, ny as u32))
        })
    }
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component, starting at 1 in discovery order
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u32, bounds: Box) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// Per-pixel labels of a binary image plus the components they index.
struct Labeling {
    width: u32,
    height: u32,
    /// 0 for background, otherwise the component label
    labels: Vec<u32>,
    components: Vec<ConnectedComponent>,
}

impl Labeling {
    fn new(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<Self> {
        if pix.depth() != PixelDepth::Bit1 {
            return Err(RegionError::UnsupportedDepth {
                expected: "1-bit",
                actual: pix.depth().bits(),
            });
        }

        let width = pix.width();
        let height = pix.height();
        let w = width as usize;
        let fg = foreground_flags(pix);
        let mut labels = vec![0u32; fg.len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..fg.len() {
            if !fg[start] || labels[start] != 0 {
                continue;
            }
            let label = components.len() as u32 + 1;
            let (sx, sy) = ((start % w) as u32, (start / w) as u32);
            let (mut x0, mut y0, mut x1, mut y1) = (sx, sy, sx, sy);
            let mut count = 0u32;

            labels[start] = label;
            queue.push_back((sx, sy));
            while let Some((x, y)) = queue.pop_front() {
                count += 1;
                x0 = x0.min(x);
                x1 = x1.max(x);
                y0 = y0.min(y);
                y1 = y1.max(y);
                for (nx, ny) in connectivity.neighbors(x, y, width, height) {
                    let idx = ny as usize * w + nx as usize;
                    if fg[idx] && labels[idx] == 0 {
                        labels[idx] = label;
                        queue.push_back((nx, ny));
                    }
                }
            }

            let bounds = Box::new_unchecked(
                x0 as i32,
                y0 as i32,
                (x1 - x0 + 1) as i32,
                (y1 - y0 + 1) as i32,
            );
            components.push(ConnectedComponent::new(label, count, bounds));
        }

        Ok(Self {
            width,
            height,
            labels,
            components,
        })
    }
}

/// Row-major foreground flags of a 1 bpp image.
fn foreground_flags(pix: &Pix) -> Vec<bool> {
    let mut flags = Vec::with_capacity(pix.width() as usize * pix.height() as usize);
    for y in 0..pix.height() {
        let line = pix.row_data(y);
        flags.extend((0..pix.width()).map(|x| get_data_bit(line, x) == 1));
    }
    flags
}

/// Find all connected components in a binary image
///
/// Returns the components in discovery order, each with its label, pixel
/// count and bounding box.
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(Labeling::new(pix, connectivity)?.components)
}

/// Bounding boxes of the outermost 8-connected components of a mask.
///
/// A component is outermost iff it touches the image border or is
/// 4-adjacent to the exterior background (see
/// [`exterior_background`](crate::seedfill::exterior_background)).
/// Components sitting inside a hole of another component are skipped.
///
/// Boxes come back in discovery (raster) order. An all-background mask
/// gives an empty [`Boxa`].
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] if `pix` is not 1 bpp.
pub fn find_outer_components(pix: &Pix) -> RegionResult<Boxa> {
    let labeling = Labeling::new(pix, ConnectivityType::EightWay)?;
    if labeling.components.is_empty() {
        return Ok(Boxa::new());
    }

    let exterior = foreground_flags(&exterior_background(pix)?);
    let (width, height) = (labeling.width, labeling.height);
    let w = width as usize;
    let mut outer = vec![false; labeling.components.len() + 1];

    for (idx, &label) in labeling.labels.iter().enumerate() {
        if label == 0 || outer[label as usize] {
            continue;
        }
        let (x, y) = ((idx % w) as u32, (idx / w) as u32);
        let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
        if on_border
            || ConnectivityType::FourWay
                .neighbors(x, y, width, height)
                .any(|(nx, ny)| exterior[ny as usize * w + nx as usize])
        {
            outer[label as usize] = true;
        }
    }

    Ok(labeling
        .components
        .iter()
        .filter(|c| outer[c.label as usize])
        .map(|c| c.bounds)
        .collect())
}
