/// Square spiral over integer offsets, starting at `(0, 0)` and heading up
/// `(0, -1)` first, turning at every ring corner. Yields exactly `steps`
/// positions.
#[derive(Clone, Debug)]
pub struct Spiral {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    remaining: usize,
}

impl Spiral {
    pub fn new(steps: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            dx: 0,
            dy: -1,
            remaining: steps,
        }
    }

    fn at_corner(&self) -> bool {
        let (x, y) = (self.x, self.y);
        x == y || (x < 0 && x == -y) || (x > 0 && x == 1 - y)
    }
}

impl Iterator for Spiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = (self.x, self.y);
        if self.at_corner() {
            (self.dx, self.dy) = (-self.dy, self.dx);
        }
        self.x += self.dx;
        self.y += self.dy;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Spiral {}
